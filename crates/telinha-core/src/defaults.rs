//! Built-in seed content used when the store has no persisted state.

use crate::models::{MediaSource, Movie, Profile};

/// Well-known id of the built-in hero movie; the featured pointer resets to
/// it when its target disappears.
pub const DEFAULT_FEATURED_ID: &str = "hero-1";

fn remote(url: &str) -> MediaSource {
    MediaSource::Remote(url.to_string())
}

/// The built-in promotional movie, always available to featured resolution.
pub fn hero_movie() -> Movie {
    Movie {
        id: DEFAULT_FEATURED_ID.to_string(),
        title: "Horizonte de Neon".to_string(),
        description: "Numa megacidade controlada por corporações, uma pilota \
                      de corridas clandestinas descobre um segredo capaz de \
                      apagar a fronteira entre o real e o digital."
            .to_string(),
        thumbnail: remote("https://picsum.photos/1920/1080?random=1"),
        video: Some(remote(
            "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4",
        )),
        genre: "Ficção Científica".to_string(),
        duration: "2h 05m".to_string(),
        year: 2024,
        match_score: 98,
        episodes: Vec::new(),
    }
}

/// Seed catalog shown on first launch.
pub fn seed_library() -> Vec<Movie> {
    vec![
        Movie {
            id: "1".to_string(),
            title: "Abismo Azul".to_string(),
            description: "Documentário sobre as fossas mais profundas do oceano.".to_string(),
            thumbnail: remote("https://picsum.photos/800/450?random=2"),
            video: Some(remote(
                "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
            )),
            genre: "Documentário".to_string(),
            duration: "1h 30m".to_string(),
            year: 2023,
            match_score: 95,
            episodes: Vec::new(),
        },
        Movie {
            id: "2".to_string(),
            title: "Última Volta".to_string(),
            description: "Drama de corrida nas ruas estreitas de um principado.".to_string(),
            thumbnail: remote("https://picsum.photos/800/450?random=3"),
            video: Some(remote(
                "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
            )),
            genre: "Ação".to_string(),
            duration: "1h 55m".to_string(),
            year: 2022,
            match_score: 88,
            episodes: Vec::new(),
        },
        Movie {
            id: "3".to_string(),
            title: "Fogueira Acesa".to_string(),
            description: "Três horas de lenha crepitando para relaxar.".to_string(),
            thumbnail: remote("https://picsum.photos/800/450?random=4"),
            video: Some(remote(
                "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
            )),
            genre: "Relaxamento".to_string(),
            duration: "3h 00m".to_string(),
            year: 2021,
            match_score: 92,
            episodes: Vec::new(),
        },
        Movie {
            id: "4".to_string(),
            title: "Acima das Nuvens".to_string(),
            description: "Uma cordada tenta os cumes mais altos do planeta.".to_string(),
            thumbnail: remote("https://picsum.photos/800/450?random=5"),
            video: Some(remote(
                "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
            )),
            genre: "Aventura".to_string(),
            duration: "1h 45m".to_string(),
            year: 2024,
            match_score: 91,
            episodes: Vec::new(),
        },
    ]
}

/// Seed household profiles.
pub fn seed_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: "p1".to_string(),
            name: "João".to_string(),
            avatar_url: crate::models::avatar_for("João"),
            my_list: vec!["1".to_string(), "3".to_string()],
            likes: vec!["2".to_string()],
        },
        Profile {
            id: "p2".to_string(),
            name: "Infantil".to_string(),
            avatar_url: crate::models::avatar_for("Infantil"),
            my_list: vec!["2".to_string()],
            likes: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_references_are_consistent() {
        let library = seed_library();
        let known: Vec<&str> = library.iter().map(|m| m.id.as_str()).collect();

        for profile in seed_profiles() {
            for id in profile.my_list.iter().chain(profile.likes.iter()) {
                assert!(known.contains(&id.as_str()), "dangling seed reference {id}");
            }
        }
    }

    #[test]
    fn test_nothing_seeded_is_local() {
        assert!(!hero_movie().is_local());
        assert!(seed_library().iter().all(|m| !m.is_local()));
    }
}
