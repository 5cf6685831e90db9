//! Persistence mirror between the in-memory catalog and the key-value store.
//!
//! Mutations happen in [`Catalog`](crate::catalog::Catalog); callers invoke
//! one of the `save_*` functions afterwards to mirror the touched piece.
//! Each of the three pieces initializes independently: from the store when
//! present and non-empty, from the built-in seeds otherwise. Writes are
//! whole-collection; there is no incremental persistence.

use tracing::warn;

use crate::defaults;
use crate::error::TelinhaError;
use crate::models::{Movie, Profile};
use crate::store::Store;

/// Store key for the profile collection (JSON array).
pub const KEY_PROFILES: &str = "telinha_profiles";
/// Store key for the featured movie id (plain string).
pub const KEY_FEATURED: &str = "telinha_featured";
/// Store key for the persisted library subset (JSON array, non-local only).
pub const KEY_LIBRARY: &str = "telinha_library";

/// Load the profile collection, falling back to seeds.
pub fn load_profiles(store: &Store) -> Result<Vec<Profile>, TelinhaError> {
    match store.get(KEY_PROFILES)? {
        Some(raw) => match serde_json::from_str::<Vec<Profile>>(&raw) {
            Ok(profiles) if !profiles.is_empty() => Ok(profiles),
            Ok(_) => Ok(defaults::seed_profiles()),
            Err(e) => {
                warn!(error = %e, "Persisted profiles unreadable, reseeding");
                Ok(defaults::seed_profiles())
            }
        },
        None => Ok(defaults::seed_profiles()),
    }
}

/// Load the library, falling back to seeds. Only non-local entries were ever
/// written, so everything loaded here is remotely addressable.
pub fn load_library(store: &Store) -> Result<Vec<Movie>, TelinhaError> {
    match store.get(KEY_LIBRARY)? {
        Some(raw) => match serde_json::from_str::<Vec<Movie>>(&raw) {
            Ok(library) if !library.is_empty() => Ok(library),
            Ok(_) => Ok(defaults::seed_library()),
            Err(e) => {
                warn!(error = %e, "Persisted library unreadable, reseeding");
                Ok(defaults::seed_library())
            }
        },
        None => Ok(defaults::seed_library()),
    }
}

/// Load the featured pointer, falling back to the default id.
pub fn load_featured(store: &Store) -> Result<String, TelinhaError> {
    Ok(store
        .get(KEY_FEATURED)?
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| defaults::DEFAULT_FEATURED_ID.to_string()))
}

/// Mirror the full profile collection.
pub fn save_profiles(store: &Store, profiles: &[Profile]) -> Result<(), TelinhaError> {
    store.set(KEY_PROFILES, &serde_json::to_string(profiles)?)
}

/// Mirror the featured pointer.
pub fn save_featured(store: &Store, featured_id: &str) -> Result<(), TelinhaError> {
    store.set(KEY_FEATURED, featured_id)
}

/// Mirror the library, excluding locally sourced entries: their session
/// handles would dangle after a reload.
pub fn save_library(store: &Store, library: &[Movie]) -> Result<(), TelinhaError> {
    let durable: Vec<&Movie> = library.iter().filter(|m| !m.is_local()).collect();
    store.set(KEY_LIBRARY, &serde_json::to_string(&durable)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::SessionMedia;
    use crate::models::MediaSource;

    fn external_movie(id: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: "Aula ao Vivo".to_string(),
            description: "Transmissão externa.".to_string(),
            thumbnail: MediaSource::Remote("https://example.com/capa.jpg".into()),
            video: Some(MediaSource::Remote("https://example.com/aula.mp4".into())),
            genre: "Web / Online".to_string(),
            duration: "Online".to_string(),
            year: 2026,
            match_score: 100,
            episodes: Vec::new(),
        }
    }

    #[test]
    fn test_empty_store_yields_seeds() {
        let store = Store::open_memory().unwrap();
        assert_eq!(load_profiles(&store).unwrap().len(), 2);
        assert_eq!(load_library(&store).unwrap().len(), 4);
        assert_eq!(load_featured(&store).unwrap(), defaults::DEFAULT_FEATURED_ID);
    }

    #[test]
    fn test_empty_persisted_collections_fall_back_to_seeds() {
        let store = Store::open_memory().unwrap();
        store.set(KEY_PROFILES, "[]").unwrap();
        store.set(KEY_LIBRARY, "[]").unwrap();
        store.set(KEY_FEATURED, "").unwrap();

        assert_eq!(load_profiles(&store).unwrap().len(), 2);
        assert_eq!(load_library(&store).unwrap().len(), 4);
        assert_eq!(load_featured(&store).unwrap(), defaults::DEFAULT_FEATURED_ID);
    }

    #[test]
    fn test_round_trip() {
        let store = Store::open_memory().unwrap();

        let profiles = defaults::seed_profiles();
        save_profiles(&store, &profiles).unwrap();
        save_featured(&store, "2").unwrap();

        let mut library = defaults::seed_library();
        library.insert(0, external_movie("ext-1"));
        save_library(&store, &library).unwrap();

        assert_eq!(load_profiles(&store).unwrap().len(), profiles.len());
        assert_eq!(load_featured(&store).unwrap(), "2");
        let loaded = load_library(&store).unwrap();
        assert_eq!(loaded.len(), 5);
        assert_eq!(loaded[0].id, "ext-1");
    }

    #[test]
    fn test_local_movies_are_never_persisted() {
        let store = Store::open_memory().unwrap();
        let mut media = SessionMedia::new();

        let mut local = external_movie("local-1");
        local.video = Some(MediaSource::Local(media.register("/tmp/v.mp4")));

        let mut library = defaults::seed_library();
        library.insert(0, local);
        save_library(&store, &library).unwrap();

        let loaded = load_library(&store).unwrap();
        assert_eq!(loaded.len(), 4);
        assert!(loaded.iter().all(|m| m.id != "local-1"));
    }
}
