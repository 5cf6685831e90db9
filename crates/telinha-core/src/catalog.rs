//! Catalog state manager: profiles, the movie library, the featured pointer
//! and session navigation state.
//!
//! All mutations are synchronous over in-memory state and atomic with
//! respect to it. Persistence is a separate step: after a mutating call
//! returns, the caller mirrors the touched collections through
//! [`crate::persist`]. That split keeps the operations unit-testable without
//! a storage backend.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::defaults::{self, DEFAULT_FEATURED_ID};
use crate::error::CatalogError;
use crate::ids;
use crate::ingest;
use crate::media::SessionMedia;
use crate::models::{Episode, Movie, Profile};

/// Most profiles a household can have.
pub const MAX_PROFILES: usize = 4;

/// Session navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ProfileSelection,
    Home,
    Player,
    Upload,
    SeriesDetails,
}

/// Result of a list/like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// No profile is active; state unchanged.
    NoActiveProfile,
    /// The id is not in the library; state unchanged.
    UnknownMovie,
}

/// Result of a confirmed movie deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The movie and every reference to it are gone.
    Deleted {
        title: String,
        released_handles: usize,
    },
    /// Unknown id; all state untouched.
    NotFound,
}

/// Result of appending an episode batch to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEpisodesOutcome {
    Appended { total_episodes: usize },
    SeriesNotFound,
}

/// Which season an episode batch is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonTarget {
    /// Extend the highest existing season.
    CurrentSeason,
    /// Start the next one.
    NewSeason,
}

/// In-memory catalog state and its mutation surface.
pub struct Catalog {
    profiles: Vec<Profile>,
    library: Vec<Movie>,
    featured_id: String,
    hero: Movie,
    current_profile: Option<String>,
    view: View,
    open_movie: Option<Movie>,
    media: SessionMedia,
}

enum ProfileSet {
    MyList,
    Likes,
}

impl Catalog {
    /// Catalog seeded with the built-in content.
    pub fn new() -> Self {
        Self::with_state(
            defaults::seed_profiles(),
            defaults::seed_library(),
            DEFAULT_FEATURED_ID.to_string(),
        )
    }

    /// Catalog over previously persisted state.
    pub fn with_state(profiles: Vec<Profile>, library: Vec<Movie>, featured_id: String) -> Self {
        Self {
            profiles,
            library,
            featured_id,
            hero: defaults::hero_movie(),
            current_profile: None,
            view: View::ProfileSelection,
            open_movie: None,
            media: SessionMedia::new(),
        }
    }

    // ── Read surface ────────────────────────────────────────────

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn library(&self) -> &[Movie] {
        &self.library
    }

    pub fn featured_id(&self) -> &str {
        &self.featured_id
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The profile currently driving per-profile state, if one is selected.
    pub fn active_profile(&self) -> Option<&Profile> {
        let id = self.current_profile.as_deref()?;
        self.profiles.iter().find(|p| p.id == id)
    }

    /// The movie open in the player or detail view.
    pub fn open_movie(&self) -> Option<&Movie> {
        self.open_movie.as_ref()
    }

    pub fn media(&self) -> &SessionMedia {
        &self.media
    }

    pub fn movie(&self, movie_id: &str) -> Option<&Movie> {
        self.library.iter().find(|m| m.id == movie_id)
    }

    /// Pure, case-insensitive substring filter over title and genre. An
    /// empty query yields the full library.
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.library
            .iter()
            .filter(|m| {
                m.title.to_lowercase().contains(&needle)
                    || m.genre.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Resolve the featured pointer. The fallback chain is total: a library
    /// match, the built-in hero when the pointer holds the default id, the
    /// first library entry, and finally the built-in hero again.
    pub fn featured(&self) -> &Movie {
        if let Some(movie) = self.library.iter().find(|m| m.id == self.featured_id) {
            return movie;
        }
        if self.featured_id == DEFAULT_FEATURED_ID {
            return &self.hero;
        }
        self.library.first().unwrap_or(&self.hero)
    }

    // ── Profiles ────────────────────────────────────────────────

    /// Select a profile and move to the home view. Unknown ids are a no-op.
    /// Transient selection state; never persisted.
    pub fn select_profile(&mut self, profile_id: &str) -> bool {
        if !self.profiles.iter().any(|p| p.id == profile_id) {
            return false;
        }
        self.current_profile = Some(profile_id.to_string());
        self.view = View::Home;
        debug!(profile = profile_id, "Profile selected");
        true
    }

    /// Create a profile with a fresh id and a name-derived avatar. The name
    /// is trimmed; empty names and a full household are rejected with state
    /// untouched. Callers mirror the profile collection afterwards.
    pub fn create_profile(&mut self, name: &str) -> Result<&Profile, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.profiles.len() >= MAX_PROFILES {
            return Err(CatalogError::ProfileLimit);
        }

        let profile = Profile::new(ids::fresh("p"), name);
        info!(name = %profile.name, "Profile created");
        self.profiles.push(profile);
        Ok(self.profiles.last().expect("profile was just pushed"))
    }

    /// Clear the selection and return to the profile picker.
    pub fn switch_profile(&mut self) {
        self.current_profile = None;
        self.open_movie = None;
        self.view = View::ProfileSelection;
    }

    /// Flip membership of a library movie in the active profile's list.
    /// Callers mirror the profile collection on `Added`/`Removed`.
    pub fn toggle_my_list(&mut self, movie_id: &str) -> ToggleOutcome {
        self.toggle(movie_id, ProfileSet::MyList)
    }

    /// Flip membership of a library movie in the active profile's likes.
    pub fn toggle_like(&mut self, movie_id: &str) -> ToggleOutcome {
        self.toggle(movie_id, ProfileSet::Likes)
    }

    fn toggle(&mut self, movie_id: &str, set: ProfileSet) -> ToggleOutcome {
        let Some(profile_id) = self.current_profile.clone() else {
            return ToggleOutcome::NoActiveProfile;
        };
        if !self.library.iter().any(|m| m.id == movie_id) {
            return ToggleOutcome::UnknownMovie;
        }
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == profile_id) else {
            return ToggleOutcome::NoActiveProfile;
        };

        let ids = match set {
            ProfileSet::MyList => &mut profile.my_list,
            ProfileSet::Likes => &mut profile.likes,
        };
        if let Some(pos) = ids.iter().position(|id| id == movie_id) {
            ids.remove(pos);
            ToggleOutcome::Removed
        } else {
            ids.push(movie_id.to_string());
            ToggleOutcome::Added
        }
    }

    // ── Featured pointer ────────────────────────────────────────

    /// Point the hero slot at a movie. No existence check here; resolution
    /// revalidates on every read. Callers mirror the pointer and surface the
    /// save acknowledgment.
    pub fn set_featured(&mut self, movie_id: &str) {
        self.featured_id = movie_id.to_string();
        info!(movie = movie_id, "Featured pointer set");
    }

    // ── Library ─────────────────────────────────────────────────

    /// Prepend newly ingested movies (newest first) and return home. With an
    /// active profile each new movie is toggled into that profile's list, so
    /// an id collision with an existing entry removes instead of adds.
    /// Callers mirror the library (and profiles when one was active).
    pub fn add_movies(&mut self, mut new_movies: Vec<Movie>) -> usize {
        let added = new_movies.len();
        let new_ids: Vec<String> = new_movies.iter().map(|m| m.id.clone()).collect();

        new_movies.append(&mut self.library);
        self.library = new_movies;

        if self.current_profile.is_some() {
            for id in &new_ids {
                self.toggle_my_list(id);
            }
        }

        info!(added, "Movies added to library");
        self.go_home();
        added
    }

    /// Remove a movie and every reference to it, as one unit: close the
    /// player/detail view if it is open there, drop it from the library,
    /// strip it from every profile's list and likes, reset a matching
    /// featured pointer to the default id, and release the session handles
    /// it held. Confirmation is the caller's job; this is the confirmed
    /// path. Callers mirror library and profiles on `Deleted`.
    pub fn delete_movie(&mut self, movie_id: &str) -> DeleteOutcome {
        let Some(pos) = self.library.iter().position(|m| m.id == movie_id) else {
            return DeleteOutcome::NotFound;
        };

        if self.open_movie.as_ref().is_some_and(|m| m.id == movie_id) {
            self.go_home();
        }

        let movie = self.library.remove(pos);

        for profile in &mut self.profiles {
            profile.my_list.retain(|id| id != movie_id);
            profile.likes.retain(|id| id != movie_id);
        }

        if self.featured_id == movie_id {
            self.featured_id = DEFAULT_FEATURED_ID.to_string();
        }

        let mut released = 0;
        for handle in movie.handles() {
            if self.media.release(handle) {
                released += 1;
            }
        }

        info!(title = %movie.title, released, "Movie deleted");
        DeleteOutcome::Deleted {
            title: movie.title,
            released_handles: released,
        }
    }

    // ── Series ──────────────────────────────────────────────────

    /// Append the given files to a series as episodes of `season`.
    ///
    /// Episode numbers continue the series-wide running count (existing
    /// count + position in the batch + 1) regardless of season; the series
    /// duration label becomes the new total. The open detail view is kept
    /// current. Local media stays session-only; callers mirror the library
    /// for the metadata that persists.
    pub fn add_episodes(
        &mut self,
        series_id: &str,
        files: &[PathBuf],
        season: u32,
    ) -> AddEpisodesOutcome {
        let Some(pos) = self.library.iter().position(|m| m.id == series_id) else {
            return AddEpisodesOutcome::SeriesNotFound;
        };

        let existing = self.library[pos].episodes.len();
        let thumbnail = self.library[pos].thumbnail.clone();
        let batch = ingest::episode_batch(
            series_id,
            &thumbnail,
            existing,
            files,
            season,
            &mut self.media,
        );

        let series = &mut self.library[pos];
        series.episodes.extend(batch);
        series.duration = format!("{} Episódios", series.episodes.len());
        let total = series.episodes.len();

        if self.open_movie.as_ref().is_some_and(|m| m.id == series_id) {
            self.open_movie = Some(self.library[pos].clone());
        }

        info!(series = series_id, total, "Episodes appended");
        AddEpisodesOutcome::Appended {
            total_episodes: total,
        }
    }

    /// Suggested season number for an episode batch: the highest existing
    /// season (default 1), plus one when starting a new season. A user
    /// override wins for the whole batch.
    pub fn suggest_season(&self, series_id: &str, target: SeasonTarget) -> u32 {
        let last = self
            .movie(series_id)
            .and_then(|s| s.episodes.iter().map(|e| e.season).max())
            .unwrap_or(1)
            .max(1);
        match target {
            SeasonTarget::CurrentSeason => last,
            SeasonTarget::NewSeason => last + 1,
        }
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Open a movie for viewing: series containers go to the detail view,
    /// everything else straight to the player.
    pub fn play_movie(&mut self, movie: Movie) {
        self.view = if movie.is_series() {
            View::SeriesDetails
        } else {
            View::Player
        };
        self.open_movie = Some(movie);
    }

    /// Project an episode into a standalone playable item and open the
    /// player.
    pub fn play_episode(&mut self, episode: &Episode) {
        self.open_movie = Some(Movie::from_episode(episode));
        self.view = View::Player;
    }

    /// Close any open movie and return to the home view.
    pub fn go_home(&mut self) {
        self.open_movie = None;
        self.view = View::Home;
    }

    /// Open the upload view.
    pub fn go_upload(&mut self) {
        self.open_movie = None;
        self.view = View::Upload;
    }

    /// Context line describing what the user is looking at, for the chat
    /// assistant.
    pub fn viewing_context(&self) -> String {
        match self.view {
            View::Upload => "O usuário está enviando um vídeo.".to_string(),
            View::Player | View::SeriesDetails => match &self.open_movie {
                Some(movie) => format!("O usuário está vendo: {}", movie.title),
                None => "O usuário está navegando.".to_string(),
            },
            _ => match self.active_profile() {
                Some(profile) => format!("O usuário {} está navegando.", profile.name),
                None => "O usuário está navegando.".to_string(),
            },
        }
    }

    /// Register a session media handle (used by ingest flows in the shell).
    pub fn media_mut(&mut self) -> &mut SessionMedia {
        &mut self.media
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestMetadata;
    use crate::models::MediaSource;

    fn movie(id: &str, title: &str, genre: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            thumbnail: MediaSource::Remote("https://example.com/capa.jpg".into()),
            video: Some(MediaSource::Remote("https://example.com/v.mp4".into())),
            genre: genre.to_string(),
            duration: "1h 00m".to_string(),
            year: 2024,
            match_score: 80,
            episodes: Vec::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::with_state(
            vec![Profile::new("p1".into(), "Ana")],
            vec![
                movie("1", "Abismo Azul", "Documentário"),
                movie("2", "Última Volta", "Ação"),
            ],
            DEFAULT_FEATURED_ID.to_string(),
        )
    }

    fn series(id: &str, episodes: usize) -> Movie {
        let mut m = movie(id, "Vila do Interior", "Drama");
        m.video = None;
        for i in 0..episodes {
            m.episodes.push(Episode {
                id: format!("{id}-ep-{i}"),
                title: format!("Episódio {}", i + 1),
                description: String::new(),
                thumbnail: m.thumbnail.clone(),
                video: MediaSource::Remote(format!("https://example.com/ep{i}.mp4")),
                duration: "45m".to_string(),
                season: 1,
                number: i as u32 + 1,
            });
        }
        m
    }

    // ── Profiles ────────────────────────────────────────────────

    #[test]
    fn test_select_unknown_profile_is_noop() {
        let mut cat = catalog();
        assert!(!cat.select_profile("nope"));
        assert!(cat.active_profile().is_none());
        assert_eq!(cat.view(), View::ProfileSelection);
    }

    #[test]
    fn test_select_profile_goes_home() {
        let mut cat = catalog();
        assert!(cat.select_profile("p1"));
        assert_eq!(cat.active_profile().unwrap().name, "Ana");
        assert_eq!(cat.view(), View::Home);
    }

    #[test]
    fn test_create_profile() {
        let mut cat = catalog();
        let profile = cat.create_profile("Kids").unwrap();
        assert!(profile.my_list.is_empty());
        assert!(profile.likes.is_empty());
        assert!(profile.avatar_url.contains("Kids"));
        assert_eq!(cat.profiles().len(), 2);
    }

    #[test]
    fn test_create_profile_rejects_blank_names() {
        let mut cat = catalog();
        assert_eq!(cat.create_profile("").unwrap_err(), CatalogError::EmptyName);
        assert_eq!(cat.create_profile("   ").unwrap_err(), CatalogError::EmptyName);
        assert_eq!(cat.profiles().len(), 1);
    }

    #[test]
    fn test_create_profile_enforces_household_limit() {
        let mut cat = catalog();
        for name in ["Bento", "Cora", "Davi"] {
            cat.create_profile(name).unwrap();
        }
        assert_eq!(cat.profiles().len(), MAX_PROFILES);
        assert_eq!(
            cat.create_profile("Quinto").unwrap_err(),
            CatalogError::ProfileLimit
        );
        assert_eq!(cat.profiles().len(), MAX_PROFILES);
    }

    #[test]
    fn test_switch_profile_returns_to_picker() {
        let mut cat = catalog();
        cat.select_profile("p1");
        cat.switch_profile();
        assert!(cat.active_profile().is_none());
        assert_eq!(cat.view(), View::ProfileSelection);
    }

    // ── Toggles ─────────────────────────────────────────────────

    #[test]
    fn test_toggle_without_profile_is_noop() {
        let mut cat = catalog();
        assert_eq!(cat.toggle_my_list("1"), ToggleOutcome::NoActiveProfile);
        assert_eq!(cat.toggle_like("1"), ToggleOutcome::NoActiveProfile);
        assert!(cat.profiles()[0].my_list.is_empty());
    }

    #[test]
    fn test_toggle_unknown_movie_is_noop() {
        let mut cat = catalog();
        cat.select_profile("p1");
        assert_eq!(cat.toggle_my_list("ghost"), ToggleOutcome::UnknownMovie);
        assert_eq!(cat.toggle_like("ghost"), ToggleOutcome::UnknownMovie);
        assert!(cat.profiles()[0].my_list.is_empty());
        assert!(cat.profiles()[0].likes.is_empty());
    }

    #[test]
    fn test_double_toggle_round_trips() {
        let mut cat = catalog();
        cat.select_profile("p1");

        assert_eq!(cat.toggle_like("2"), ToggleOutcome::Added);
        assert_eq!(cat.profiles()[0].likes, vec!["2".to_string()]);
        assert_eq!(cat.toggle_like("2"), ToggleOutcome::Removed);
        assert!(cat.profiles()[0].likes.is_empty());
    }

    // ── Featured ────────────────────────────────────────────────

    #[test]
    fn test_featured_resolves_library_match() {
        let mut cat = catalog();
        cat.set_featured("2");
        assert_eq!(cat.featured().id, "2");
    }

    #[test]
    fn test_featured_default_id_resolves_hero() {
        let cat = catalog();
        assert_eq!(cat.featured().id, DEFAULT_FEATURED_ID);
    }

    #[test]
    fn test_featured_dangling_pointer_falls_back_to_first() {
        let mut cat = catalog();
        cat.set_featured("ghost");
        assert_eq!(cat.featured().id, "1");
    }

    #[test]
    fn test_featured_never_fails_on_empty_library() {
        let mut cat = Catalog::with_state(Vec::new(), Vec::new(), "ghost".to_string());
        assert_eq!(cat.featured().id, DEFAULT_FEATURED_ID);
        cat.set_featured(DEFAULT_FEATURED_ID);
        assert_eq!(cat.featured().id, DEFAULT_FEATURED_ID);
    }

    // ── Delete ──────────────────────────────────────────────────

    #[test]
    fn test_delete_unknown_id_changes_nothing() {
        let mut cat = catalog();
        cat.select_profile("p1");
        cat.toggle_my_list("1");

        assert_eq!(cat.delete_movie("ghost"), DeleteOutcome::NotFound);
        assert_eq!(cat.library().len(), 2);
        assert_eq!(cat.profiles()[0].my_list, vec!["1".to_string()]);
    }

    #[test]
    fn test_delete_cascades_in_one_unit() {
        let mut cat = catalog();
        cat.select_profile("p1");
        cat.toggle_my_list("1");
        cat.toggle_like("1");
        cat.set_featured("1");

        let outcome = cat.delete_movie("1");
        assert!(matches!(outcome, DeleteOutcome::Deleted { .. }));

        assert!(cat.movie("1").is_none());
        assert!(cat.profiles()[0].my_list.is_empty());
        assert!(cat.profiles()[0].likes.is_empty());
        assert_eq!(cat.featured_id(), DEFAULT_FEATURED_ID);
        assert_ne!(cat.featured().id, "1");
    }

    #[test]
    fn test_delete_strips_references_from_every_profile() {
        let mut cat = catalog();
        cat.create_profile("Kids").unwrap();
        let kids_id = cat.profiles()[1].id.clone();

        cat.select_profile("p1");
        cat.toggle_my_list("2");
        cat.select_profile(&kids_id);
        cat.toggle_like("2");

        cat.delete_movie("2");
        for profile in cat.profiles() {
            assert!(!profile.my_list.contains(&"2".to_string()));
            assert!(!profile.likes.contains(&"2".to_string()));
        }
    }

    #[test]
    fn test_delete_open_movie_closes_view_first() {
        let mut cat = catalog();
        cat.select_profile("p1");
        let open = cat.movie("1").unwrap().clone();
        cat.play_movie(open);
        assert_eq!(cat.view(), View::Player);

        cat.delete_movie("1");
        assert!(cat.open_movie().is_none());
        assert_eq!(cat.view(), View::Home);
    }

    #[test]
    fn test_delete_releases_local_handles() {
        let mut cat = catalog();
        let local = {
            let media = cat.media_mut();
            let mut m = movie("loc", "Gravação Caseira", "Upload");
            m.video = Some(MediaSource::Local(media.register("/tmp/v.mp4")));
            m.thumbnail = MediaSource::Local(media.register("/tmp/capa.png"));
            m
        };
        cat.add_movies(vec![local]);
        assert_eq!(cat.media().len(), 2);

        match cat.delete_movie("loc") {
            DeleteOutcome::Deleted {
                released_handles, ..
            } => assert_eq!(released_handles, 2),
            other => panic!("expected Deleted, got {other:?}"),
        }
        assert!(cat.media().is_empty());
    }

    // ── Add movies ──────────────────────────────────────────────

    #[test]
    fn test_add_movies_prepends_newest_first() {
        let mut cat = catalog();
        cat.add_movies(vec![movie("5", "Novo", "Drama"), movie("6", "Mais Novo", "Drama")]);

        let ids: Vec<&str> = cat.library().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "6", "1", "2"]);
        assert_eq!(cat.view(), View::Home);
    }

    #[test]
    fn test_add_movies_without_profile_touches_no_profile() {
        let mut cat = catalog();
        cat.add_movies(vec![series("s1", 2)]);

        assert_eq!(cat.library()[0].id, "s1");
        assert!(cat.profiles()[0].my_list.is_empty());
    }

    #[test]
    fn test_add_movies_enters_active_profile_list() {
        let mut cat = catalog();
        cat.select_profile("p1");
        cat.add_movies(vec![movie("5", "Novo", "Drama")]);
        assert_eq!(cat.profiles()[0].my_list, vec!["5".to_string()]);
    }

    #[test]
    fn test_add_movies_colliding_id_removes_from_list() {
        // Toggle semantics are reused on purpose: a new movie whose id
        // already sits in the list gets toggled out, not in.
        let mut cat = catalog();
        cat.select_profile("p1");
        cat.toggle_my_list("1");
        assert_eq!(cat.profiles()[0].my_list, vec!["1".to_string()]);

        cat.add_movies(vec![movie("1", "Sombra do Abismo", "Suspense")]);
        assert!(cat.profiles()[0].my_list.is_empty());
    }

    // ── Episodes ────────────────────────────────────────────────

    #[test]
    fn test_add_episodes_to_unknown_series_is_noop() {
        let mut cat = catalog();
        let outcome = cat.add_episodes("ghost", &[PathBuf::from("/tmp/a.mp4")], 1);
        assert_eq!(outcome, AddEpisodesOutcome::SeriesNotFound);
        assert!(cat.media().is_empty());
    }

    #[test]
    fn test_add_episodes_extends_and_relabels() {
        let mut cat = catalog();
        cat.add_movies(vec![series("s1", 3)]);

        let files = vec![PathBuf::from("/tmp/a.mp4"), PathBuf::from("/tmp/b.mp4")];
        let outcome = cat.add_episodes("s1", &files, 1);
        assert_eq!(
            outcome,
            AddEpisodesOutcome::Appended { total_episodes: 5 }
        );

        let s = cat.movie("s1").unwrap();
        assert_eq!(s.duration, "5 Episódios");
        let numbers: Vec<u32> = s.episodes.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_numbering_continues_across_seasons() {
        // Episode numbers are a running series-wide count: starting season 2
        // after three season-1 episodes yields numbers 4 and 5, not 1 and 2.
        let mut cat = catalog();
        cat.add_movies(vec![series("s1", 3)]);

        let files = vec![PathBuf::from("/tmp/a.mp4"), PathBuf::from("/tmp/b.mp4")];
        cat.add_episodes("s1", &files, 2);

        let s = cat.movie("s1").unwrap();
        let season2: Vec<u32> = s
            .episodes
            .iter()
            .filter(|e| e.season == 2)
            .map(|e| e.number)
            .collect();
        assert_eq!(season2, vec![4, 5]);
    }

    #[test]
    fn test_add_episodes_refreshes_open_detail_view() {
        let mut cat = catalog();
        cat.add_movies(vec![series("s1", 1)]);
        let s = cat.movie("s1").unwrap().clone();
        cat.play_movie(s);
        assert_eq!(cat.view(), View::SeriesDetails);

        cat.add_episodes("s1", &[PathBuf::from("/tmp/a.mp4")], 1);
        assert_eq!(cat.open_movie().unwrap().episodes.len(), 2);
    }

    #[test]
    fn test_suggest_season() {
        let mut cat = catalog();
        let mut s = series("s1", 2);
        s.episodes[1].season = 3;
        cat.add_movies(vec![s]);

        assert_eq!(cat.suggest_season("s1", SeasonTarget::CurrentSeason), 3);
        assert_eq!(cat.suggest_season("s1", SeasonTarget::NewSeason), 4);
        // Empty series and unknown ids both suggest season 1.
        cat.add_movies(vec![movie("m", "Sem Episódios", "Drama")]);
        assert_eq!(cat.suggest_season("m", SeasonTarget::CurrentSeason), 1);
        assert_eq!(cat.suggest_season("ghost", SeasonTarget::CurrentSeason), 1);
    }

    // ── Search ──────────────────────────────────────────────────

    #[test]
    fn test_search_empty_query_returns_everything() {
        let cat = catalog();
        assert_eq!(cat.search("").len(), cat.library().len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let cat = catalog();
        let upper: Vec<&str> = cat.search("AÇÃO").iter().map(|m| m.id.as_str()).collect();
        let lower: Vec<&str> = cat.search("ação").iter().map(|m| m.id.as_str()).collect();
        assert_eq!(upper, lower);
        assert_eq!(upper, vec!["2"]);
    }

    #[test]
    fn test_search_matches_title_and_genre() {
        let cat = catalog();
        assert_eq!(cat.search("abismo").len(), 1);
        assert_eq!(cat.search("documentário").len(), 1);
        assert!(cat.search("zumbi").is_empty());
    }

    // ── Navigation ──────────────────────────────────────────────

    #[test]
    fn test_play_routes_series_to_details() {
        let mut cat = catalog();
        cat.add_movies(vec![series("s1", 2)]);

        let s = cat.movie("s1").unwrap().clone();
        cat.play_movie(s);
        assert_eq!(cat.view(), View::SeriesDetails);

        let m = cat.movie("1").unwrap().clone();
        cat.play_movie(m);
        assert_eq!(cat.view(), View::Player);
    }

    #[test]
    fn test_play_episode_projects_into_player() {
        let mut cat = catalog();
        cat.add_movies(vec![series("s1", 2)]);
        let episode = cat.movie("s1").unwrap().episodes[1].clone();

        cat.play_episode(&episode);
        assert_eq!(cat.view(), View::Player);
        assert_eq!(cat.open_movie().unwrap().id, episode.id);
    }

    // ── End-to-end ingest through the catalog ───────────────────

    #[test]
    fn test_ingested_series_flows_into_profile_list() {
        let mut cat = catalog();
        cat.select_profile("p1");

        let s = {
            let media = cat.media_mut();
            ingest::local_series(
                &[PathBuf::from("/tmp/e1.mp4"), PathBuf::from("/tmp/e2.mp4")],
                IngestMetadata {
                    title: "Quintal".to_string(),
                    description: "Série caseira.".to_string(),
                    genre: "Comédia".to_string(),
                    match_score: 85,
                },
                None,
                media,
            )
        };
        let id = s.id.clone();
        cat.add_movies(vec![s]);

        assert_eq!(cat.library()[0].id, id);
        assert!(cat.profiles()[0].my_list.contains(&id));
        assert_eq!(cat.media().len(), 2);
    }
}
