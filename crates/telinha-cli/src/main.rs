mod shell;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use telinha_api::gemini::GeminiClient;
use telinha_core::catalog::Catalog;
use telinha_core::config::AppConfig;
use telinha_core::error::TelinhaError;
use telinha_core::persist;
use telinha_core::store::Store;

#[derive(Debug, Parser)]
#[command(name = "telinha", version, about = "Estante de mídia pessoal: perfis, catálogo e assistente")]
struct Args {
    /// Caminho do arquivo de configuração.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Caminho do banco de dados.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Não chama o assistente; usa as respostas determinísticas.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<(), TelinhaError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("telinha=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(db) = &args.db {
        config.storage.db_path = db.display().to_string();
    }

    let store = Store::open(&config.ensure_db_path()?)?;
    let catalog = Catalog::with_state(
        persist::load_profiles(&store)?,
        persist::load_library(&store)?,
        persist::load_featured(&store)?,
    );

    let assistant = if args.offline || !config.assistant.enabled {
        None
    } else {
        match GeminiClient::from_env(&config.assistant.api_key_env, config.assistant.model.clone())
        {
            Ok(client) => Some(client),
            Err(e) => {
                eprintln!("Assistente indisponível ({e}); usando respostas locais.");
                None
            }
        }
    };

    shell::Shell::new(catalog, store, assistant, config).run().await
}
