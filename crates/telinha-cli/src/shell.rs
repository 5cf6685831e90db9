//! Interactive session shell: the view layer over the catalog.
//!
//! One screen per navigation state. Every screen renders from catalog reads,
//! takes a single command, applies the mutation and mirrors the touched
//! collections to the store. Assistant calls are awaited inline, so there is
//! never more than one in flight.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;
use url::Url;

use telinha_api::gemini::GeminiClient;
use telinha_api::traits::{
    AssistantService, ContentKind, GeneratedMetadata, MetadataRequest, FALLBACK_REPLY,
};
use telinha_core::catalog::{
    AddEpisodesOutcome, Catalog, DeleteOutcome, SeasonTarget, ToggleOutcome, View,
};
use telinha_core::config::AppConfig;
use telinha_core::error::{CatalogError, TelinhaError};
use telinha_core::ingest::{self, IngestMetadata};
use telinha_core::models::{ChatMessage, ChatRole, MediaSource, Movie, Profile};
use telinha_core::persist;
use telinha_core::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    catalog: Catalog,
    store: Store,
    assistant: Option<GeminiClient>,
    config: AppConfig,
    transcript: Vec<ChatMessage>,
    input: Lines<BufReader<Stdin>>,
}

impl Shell {
    pub fn new(
        catalog: Catalog,
        store: Store,
        assistant: Option<GeminiClient>,
        config: AppConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            assistant,
            config,
            transcript: vec![ChatMessage::assistant(
                "Olá! Eu sou o assistente da Telinha. Quer uma recomendação \
                 ou tem dúvida sobre algum título?",
            )],
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run(mut self) -> Result<(), TelinhaError> {
        println!("Telinha — sua estante de mídia");
        loop {
            let flow = match self.catalog.view() {
                View::ProfileSelection => self.profile_selection().await?,
                View::Home => self.home().await?,
                View::Player => self.player().await?,
                View::SeriesDetails => self.series_details().await?,
                View::Upload => self.upload().await?,
            };
            if flow == Flow::Quit {
                break;
            }
        }
        println!("Até logo!");
        Ok(())
    }

    // ── Screens ─────────────────────────────────────────────────

    async fn profile_selection(&mut self) -> Result<Flow, TelinhaError> {
        println!();
        println!("━━━ Quem está assistindo? ━━━");
        for (idx, profile) in self.catalog.profiles().iter().enumerate() {
            println!("  {}. {}", idx + 1, profile.name);
        }
        println!("número entra | novo <nome> cria | sair");

        let Some(line) = self.read_line("> ").await? else {
            return Ok(Flow::Quit);
        };
        let (cmd, rest) = split_command(&line);

        match cmd {
            "" => {}
            "sair" | "q" => return Ok(Flow::Quit),
            "novo" => match self.catalog.create_profile(rest) {
                Ok(profile) => {
                    println!("Perfil \"{}\" criado.", profile.name);
                    if self.save_profiles() {
                        self.ack();
                    }
                }
                Err(CatalogError::EmptyName) => println!("Informe um nome para o perfil."),
                Err(CatalogError::ProfileLimit) => {
                    println!("Limite de 4 perfis atingido.");
                }
            },
            _ => match cmd.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    let id = self
                        .catalog
                        .profiles()
                        .get(n - 1)
                        .map(|p| p.id.clone());
                    match id {
                        Some(id) => {
                            self.catalog.select_profile(&id);
                        }
                        None => println!("Não existe perfil {n}."),
                    }
                }
                _ => println!("Comando não reconhecido."),
            },
        }
        Ok(Flow::Continue)
    }

    async fn home(&mut self) -> Result<Flow, TelinhaError> {
        self.render_home();

        let Some(line) = self.read_line("> ").await? else {
            return Ok(Flow::Quit);
        };
        let (cmd, rest) = split_command(&line);

        match cmd {
            "" => {}
            "sair" => return Ok(Flow::Quit),
            "assistir" => {
                let movie = match self.catalog.movie(rest) {
                    Some(m) => Some(m.clone()),
                    None => {
                        let featured = self.catalog.featured();
                        (featured.id == rest).then(|| featured.clone())
                    }
                };
                match movie {
                    Some(m) => self.catalog.play_movie(m),
                    None => println!("Título não encontrado."),
                }
            }
            "lista" => {
                let outcome = self.catalog.toggle_my_list(rest);
                self.report_toggle(outcome, "Adicionado à sua lista.", "Removido da sua lista.");
            }
            "curtir" => {
                let outcome = self.catalog.toggle_like(rest);
                self.report_toggle(outcome, "Curtido.", "Curtida removida.");
            }
            "destaque" => {
                self.catalog.set_featured(rest);
                if self.save_featured() {
                    self.ack();
                }
            }
            "apagar" => return self.delete_flow(rest).await,
            "buscar" => {
                let results = self.catalog.search(rest);
                if results.is_empty() {
                    println!("Nenhum título encontrado.");
                } else {
                    println!("Resultados para \"{rest}\":");
                    let profile = self.catalog.active_profile();
                    for movie in results {
                        println!("{}", movie_row(movie, profile));
                    }
                }
            }
            "enviar" => self.catalog.go_upload(),
            "chat" => return self.chat_panel().await,
            "perfil" => self.catalog.switch_profile(),
            _ => println!("Comando não reconhecido."),
        }
        Ok(Flow::Continue)
    }

    async fn player(&mut self) -> Result<Flow, TelinhaError> {
        let Some(movie) = self.catalog.open_movie().cloned() else {
            self.catalog.go_home();
            return Ok(Flow::Continue);
        };

        println!();
        println!("▶ Reproduzindo: {} ({})", movie.title, movie.duration);
        if let Some(video) = &movie.video {
            println!("  fonte: {}", self.source_label(video));
        }

        if self.read_line("[Enter] volta ").await?.is_none() {
            return Ok(Flow::Quit);
        }
        self.catalog.go_home();
        Ok(Flow::Continue)
    }

    async fn series_details(&mut self) -> Result<Flow, TelinhaError> {
        let Some(series) = self.catalog.open_movie().cloned() else {
            self.catalog.go_home();
            return Ok(Flow::Continue);
        };

        println!();
        println!("━━━ {} ━━━", series.title);
        println!(
            "{}% match · {} · {} · {}",
            series.match_score, series.year, series.genre, series.duration
        );
        println!("{}", series.description);
        for (idx, ep) in series.episodes.iter().enumerate() {
            println!(
                "  {:>3}. T{}:E{} {} ({})",
                idx + 1,
                ep.season,
                ep.number,
                ep.title,
                ep.duration
            );
        }
        println!("ep <n> assiste | add episódios | nova temporada | destaque | apagar | voltar");

        let Some(line) = self.read_line("> ").await? else {
            return Ok(Flow::Quit);
        };
        let (cmd, rest) = split_command(&line);

        match cmd {
            "" => {}
            "voltar" => self.catalog.go_home(),
            "ep" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 && n <= series.episodes.len() => {
                    self.catalog.play_episode(&series.episodes[n - 1]);
                }
                _ => println!("Episódio inválido."),
            },
            "add" => return self.add_episodes_flow(&series.id, SeasonTarget::CurrentSeason).await,
            "nova" => return self.add_episodes_flow(&series.id, SeasonTarget::NewSeason).await,
            "destaque" => {
                self.catalog.set_featured(&series.id);
                if self.save_featured() {
                    self.ack();
                }
                self.catalog.go_home();
            }
            "apagar" => return self.delete_flow(&series.id).await,
            _ => println!("Comando não reconhecido."),
        }
        Ok(Flow::Continue)
    }

    async fn upload(&mut self) -> Result<Flow, TelinhaError> {
        println!();
        println!("━━━ Adicionar ao catálogo ━━━");
        println!("  1. Filme (arquivo local)");
        println!("  2. Série (vários episódios)");
        println!("  3. Link online");
        println!("voltar cancela");

        let Some(line) = self.read_line("> ").await? else {
            return Ok(Flow::Quit);
        };

        match line.as_str() {
            "1" => self.upload_local(ContentKind::Movie).await,
            "2" => self.upload_local(ContentKind::Series).await,
            "3" => self.upload_external().await,
            "voltar" | "" => {
                self.catalog.go_home();
                Ok(Flow::Continue)
            }
            _ => {
                println!("Comando não reconhecido.");
                Ok(Flow::Continue)
            }
        }
    }

    // ── Ingest flows ────────────────────────────────────────────

    async fn upload_local(&mut self, kind: ContentKind) -> Result<Flow, TelinhaError> {
        let prompt = match kind {
            ContentKind::Movie => "Arquivo do filme: ",
            ContentKind::Series => "Arquivo ou pasta dos episódios: ",
        };
        let Some(path) = self.read_line(prompt).await? else {
            return Ok(Flow::Quit);
        };

        let mut files = ingest::collect_video_files(Path::new(&path));
        if files.is_empty() {
            println!("Nenhum arquivo de vídeo encontrado.");
            return Ok(Flow::Continue);
        }
        if kind == ContentKind::Movie {
            files.truncate(1);
        }

        let Some(notes) = self
            .read_line("Descreva o conteúdo para a IA (opcional): ")
            .await?
        else {
            return Ok(Flow::Quit);
        };
        let Some(cover) = self.read_line("Imagem de capa (opcional): ").await? else {
            return Ok(Flow::Quit);
        };
        let cover = (!cover.is_empty()).then(|| Path::new(&cover).to_path_buf());

        let label = files[0]
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());

        println!("Gerando metadados...");
        let metadata = self.metadata_for(&label, &notes, kind).await;

        let movie = {
            let media = self.catalog.media_mut();
            match kind {
                ContentKind::Movie => {
                    ingest::local_movie(&files[0], metadata, cover.as_deref(), media)
                }
                ContentKind::Series => {
                    ingest::local_series(&files, metadata, cover.as_deref(), media)
                }
            }
        };
        self.finish_upload(vec![movie]);
        Ok(Flow::Continue)
    }

    async fn upload_external(&mut self) -> Result<Flow, TelinhaError> {
        let Some(title) = self.read_line("Título do vídeo: ").await? else {
            return Ok(Flow::Quit);
        };
        if title.is_empty() {
            println!("Informe um título.");
            return Ok(Flow::Continue);
        }

        let Some(raw_url) = self.read_line("URL do vídeo: ").await? else {
            return Ok(Flow::Quit);
        };
        let url = match Url::parse(&raw_url) {
            Ok(url) => url,
            Err(_) => {
                println!("URL inválida.");
                return Ok(Flow::Continue);
            }
        };

        let Some(cover) = self.read_line("URL da capa (opcional): ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(notes) = self.read_line("Descrição (opcional): ").await? else {
            return Ok(Flow::Quit);
        };

        let cover = (!cover.is_empty()).then_some(cover);
        let movie = ingest::external_link(&title, &url, cover.as_deref(), &notes);
        self.finish_upload(vec![movie]);
        Ok(Flow::Continue)
    }

    async fn add_episodes_flow(
        &mut self,
        series_id: &str,
        target: SeasonTarget,
    ) -> Result<Flow, TelinhaError> {
        let Some(path) = self.read_line("Arquivo ou pasta dos episódios: ").await? else {
            return Ok(Flow::Quit);
        };
        let files = ingest::collect_video_files(Path::new(&path));
        if files.is_empty() {
            println!("Nenhum arquivo de vídeo encontrado.");
            return Ok(Flow::Continue);
        }

        let suggested = self.catalog.suggest_season(series_id, target);
        let prompt = match target {
            SeasonTarget::NewSeason => {
                format!("Iniciando a temporada {suggested}. Confirma o número? [{suggested}] ")
            }
            SeasonTarget::CurrentSeason => format!(
                "Adicionando episódios à temporada {suggested}. Confirma o número? [{suggested}] "
            ),
        };
        let Some(answer) = self.read_line(&prompt).await? else {
            return Ok(Flow::Quit);
        };
        // The confirmed number drives the whole batch.
        let season = answer.parse::<u32>().unwrap_or(suggested);

        match self.catalog.add_episodes(series_id, &files, season) {
            AddEpisodesOutcome::Appended { total_episodes } => {
                println!("Série agora tem {total_episodes} episódios.");
                if self.save_library() {
                    self.ack();
                }
            }
            AddEpisodesOutcome::SeriesNotFound => println!("Série não encontrada."),
        }
        Ok(Flow::Continue)
    }

    async fn metadata_for(&self, label: &str, notes: &str, kind: ContentKind) -> IngestMetadata {
        let request = MetadataRequest {
            source_label: label.to_string(),
            user_notes: notes.to_string(),
            kind,
        };
        let generated = match &self.assistant {
            Some(client) => match client.generate_metadata(&request).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(error = %e, "Metadata generation failed, using fallback");
                    GeneratedMetadata::fallback(label, notes)
                }
            },
            None => GeneratedMetadata::fallback(label, notes),
        };
        IngestMetadata {
            title: generated.title,
            description: generated.description,
            genre: generated.genre,
            match_score: generated.match_score,
        }
    }

    fn finish_upload(&mut self, movies: Vec<Movie>) {
        let had_profile = self.catalog.active_profile().is_some();
        let added = self.catalog.add_movies(movies);
        println!("{added} título(s) adicionados ao catálogo.");

        let library_ok = self.save_library();
        let profiles_ok = !had_profile || self.save_profiles();
        if library_ok && profiles_ok {
            self.ack();
        }
    }

    // ── Delete ──────────────────────────────────────────────────

    async fn delete_flow(&mut self, movie_id: &str) -> Result<Flow, TelinhaError> {
        let Some(title) = self.catalog.movie(movie_id).map(|m| m.title.clone()) else {
            println!("Título não encontrado.");
            return Ok(Flow::Continue);
        };

        if self.config.general.confirm_delete {
            let prompt = format!(
                "Tem certeza que deseja apagar \"{title}\"? Esta ação não pode ser desfeita. [s/N] "
            );
            let Some(answer) = self.read_line(&prompt).await? else {
                return Ok(Flow::Quit);
            };
            if !matches!(answer.to_lowercase().as_str(), "s" | "sim") {
                println!("Nada foi apagado.");
                return Ok(Flow::Continue);
            }
        }

        match self.catalog.delete_movie(movie_id) {
            DeleteOutcome::Deleted { title, .. } => {
                println!("\"{title}\" apagado.");
                let library_ok = self.save_library();
                let profiles_ok = self.save_profiles();
                let featured_ok = self.save_featured();
                if library_ok && profiles_ok && featured_ok {
                    self.ack();
                }
            }
            DeleteOutcome::NotFound => println!("Título não encontrado."),
        }
        Ok(Flow::Continue)
    }

    // ── Chat ────────────────────────────────────────────────────

    async fn chat_panel(&mut self) -> Result<Flow, TelinhaError> {
        println!();
        println!("━━━ Assistente Telinha ━━━ (/voltar sai)");
        for message in &self.transcript {
            print_chat(message);
        }

        loop {
            let Some(line) = self.read_line("você> ").await? else {
                return Ok(Flow::Quit);
            };
            if line == "/voltar" {
                return Ok(Flow::Continue);
            }
            if line.is_empty() {
                continue;
            }

            let context = self.catalog.viewing_context();
            self.transcript.push(ChatMessage::user(line.clone()));

            let reply = match &self.assistant {
                Some(client) => match client.chat(&line, Some(&context)).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "Chat request failed, using fallback");
                        FALLBACK_REPLY.to_string()
                    }
                },
                None => FALLBACK_REPLY.to_string(),
            };
            println!("tel> {reply}");
            self.transcript.push(ChatMessage::assistant(reply));
        }
    }

    // ── Rendering helpers ───────────────────────────────────────

    fn render_home(&self) {
        let profile = self.catalog.active_profile();
        let featured = self.catalog.featured();

        println!();
        println!("━━━ DESTAQUE ━━━");
        println!(
            "{} ({}) · {} · {}% match",
            featured.title, featured.year, featured.genre, featured.match_score
        );
        println!("{}", featured.description);

        if let Some(profile) = profile {
            let mine: Vec<&Movie> = self
                .catalog
                .library()
                .iter()
                .filter(|m| profile.my_list.contains(&m.id))
                .collect();
            if !mine.is_empty() {
                println!();
                println!("— Lista de {}", profile.name);
                for movie in mine {
                    println!("{}", movie_row(movie, Some(profile)));
                }
            }
        }

        println!();
        println!("— Em Alta");
        for movie in self.catalog.library() {
            println!("{}", movie_row(movie, profile));
        }
        println!();
        println!(
            "assistir <id> | lista <id> | curtir <id> | destaque <id> | apagar <id> | \
             buscar <texto> | enviar | chat | perfil | sair"
        );
    }

    fn source_label(&self, source: &MediaSource) -> String {
        match source {
            MediaSource::Remote(url) => url.clone(),
            MediaSource::Local(id) => self
                .catalog
                .media()
                .resolve(*id)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "recurso local liberado".to_string()),
        }
    }

    fn report_toggle(&self, outcome: ToggleOutcome, added_msg: &str, removed_msg: &str) {
        match outcome {
            ToggleOutcome::Added => {
                println!("{added_msg}");
                if self.save_profiles() {
                    self.ack();
                }
            }
            ToggleOutcome::Removed => {
                println!("{removed_msg}");
                if self.save_profiles() {
                    self.ack();
                }
            }
            ToggleOutcome::UnknownMovie => println!("Título não encontrado."),
            ToggleOutcome::NoActiveProfile => println!("Escolha um perfil primeiro."),
        }
    }

    // ── Persistence mirrors ─────────────────────────────────────

    fn save_profiles(&self) -> bool {
        match persist::save_profiles(&self.store, self.catalog.profiles()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to persist profiles");
                println!("Aviso: não foi possível salvar os perfis.");
                false
            }
        }
    }

    fn save_library(&self) -> bool {
        match persist::save_library(&self.store, self.catalog.library()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to persist library");
                println!("Aviso: não foi possível salvar o catálogo.");
                false
            }
        }
    }

    fn save_featured(&self) -> bool {
        match persist::save_featured(&self.store, self.catalog.featured_id()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to persist featured pointer");
                println!("Aviso: não foi possível salvar o destaque.");
                false
            }
        }
    }

    fn ack(&self) {
        println!("✔ Dados Salvos");
    }

    // ── Input ───────────────────────────────────────────────────

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TelinhaError> {
        use std::io::Write;
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.input.next_line().await?.map(|l| l.trim().to_string()))
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

fn movie_row(movie: &Movie, profile: Option<&Profile>) -> String {
    let mut markers = String::new();
    if movie.is_series() {
        markers.push_str(" [SÉRIE]");
    }
    if let Some(profile) = profile {
        if profile.my_list.contains(&movie.id) {
            markers.push_str(" ✔lista");
        }
        if profile.likes.contains(&movie.id) {
            markers.push_str(" ♥");
        }
    }
    format!(
        "  {:<20} {} ({}) · {} · {}%{}",
        movie.id, movie.title, movie.year, movie.genre, movie.match_score, markers
    )
}

fn print_chat(message: &ChatMessage) {
    match message.role {
        ChatRole::User => println!("você> {}", message.text),
        ChatRole::Assistant => println!("tel> {}", message.text),
    }
}
