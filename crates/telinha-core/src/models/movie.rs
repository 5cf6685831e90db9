use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::media::HandleId;

/// Where a piece of media lives.
///
/// `Remote` sources are durable URLs and survive persistence round-trips.
/// `Local` sources are session handles issued by
/// [`SessionMedia`](crate::media::SessionMedia); they must be released when
/// their owner is deleted and are never written to the persistent store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MediaSource {
    Remote(String),
    Local(HandleId),
}

impl MediaSource {
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// The durable URL, if this source has one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote(url) => Some(url),
            Self::Local(_) => None,
        }
    }
}

/// A single installment of a series, owned by containment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: MediaSource,
    pub video: MediaSource,
    pub duration: String,
    pub season: u32,
    pub number: u32,
}

/// A catalog entry: a playable movie, or a series container whose playback
/// is delegated entirely to its episodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: MediaSource,
    /// Unused for series containers.
    pub video: Option<MediaSource>,
    pub genre: String,
    /// Display label ("1h 30m", "Online", "8 Episódios").
    pub duration: String,
    pub year: i32,
    /// Relevance score, 0-100.
    pub match_score: u8,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Movie {
    /// A movie is a series iff it carries at least one episode.
    pub fn is_series(&self) -> bool {
        !self.episodes.is_empty()
    }

    /// True when any media of this movie or its episodes is session-local.
    pub fn is_local(&self) -> bool {
        self.thumbnail.is_local()
            || self.video.as_ref().is_some_and(MediaSource::is_local)
            || self
                .episodes
                .iter()
                .any(|ep| ep.video.is_local() || ep.thumbnail.is_local())
    }

    /// Every session handle held by this movie and its episodes.
    pub fn handles(&self) -> Vec<HandleId> {
        let mut out = Vec::new();
        let mut push = |source: &MediaSource| {
            if let MediaSource::Local(id) = source {
                out.push(*id);
            }
        };
        push(&self.thumbnail);
        if let Some(video) = &self.video {
            push(video);
        }
        for ep in &self.episodes {
            push(&ep.thumbnail);
            push(&ep.video);
        }
        out
    }

    /// Project an episode into a standalone playable item.
    pub fn from_episode(episode: &Episode) -> Self {
        Self {
            id: episode.id.clone(),
            title: episode.title.clone(),
            description: episode.description.clone(),
            thumbnail: episode.thumbnail.clone(),
            video: Some(episode.video.clone()),
            genre: "Série".to_string(),
            duration: episode.duration.clone(),
            year: Utc::now().year(),
            match_score: 0,
            episodes: Vec::new(),
        }
    }
}
