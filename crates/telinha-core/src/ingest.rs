//! Ingest: building catalog entries from local files and external links.
//!
//! The assistant (or its deterministic fallback) supplies the descriptive
//! metadata; this module turns it plus the media inputs into [`Movie`] and
//! [`Episode`] values ready for the catalog. Local files are registered with
//! the session media registry here, so every produced handle has an owner.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use url::Url;
use walkdir::WalkDir;

use crate::ids;
use crate::media::SessionMedia;
use crate::models::{Episode, MediaSource, Movie};

/// Video file extensions considered for ingest.
const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "webm", "m4v", "mov"];

/// Thumbnail used when a local upload has no cover image.
const DEFAULT_THUMBNAIL: &str = "https://picsum.photos/800/450?grayscale";

/// Description used for external links submitted without notes.
const EXTERNAL_DESCRIPTION: &str = "Conteúdo adicionado via link externo.";

/// Descriptive metadata driving a local ingest, whatever its origin.
#[derive(Debug, Clone)]
pub struct IngestMetadata {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub match_score: u8,
}

/// Build a single-file local movie.
pub fn local_movie(
    file: &Path,
    metadata: IngestMetadata,
    cover: Option<&Path>,
    media: &mut SessionMedia,
) -> Movie {
    Movie {
        id: ids::fresh("local-movie"),
        title: metadata.title,
        description: metadata.description,
        thumbnail: cover_source(cover, media),
        video: Some(MediaSource::Local(media.register(file))),
        genre: metadata.genre,
        duration: "Filme".to_string(),
        year: Utc::now().year(),
        match_score: metadata.match_score,
        episodes: Vec::new(),
    }
}

/// Build a local series: the files become season-1 episodes in order.
pub fn local_series(
    files: &[PathBuf],
    metadata: IngestMetadata,
    cover: Option<&Path>,
    media: &mut SessionMedia,
) -> Movie {
    let series_id = ids::fresh("local-series");
    let thumbnail = cover_source(cover, media);

    let episodes: Vec<Episode> = files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            let number = idx as u32 + 1;
            Episode {
                id: format!("{series_id}-ep-{idx}"),
                title: format!("{} - Episódio {number}", metadata.title),
                description: format!("Episódio {number} da série {}.", metadata.title),
                thumbnail: thumbnail.clone(),
                video: MediaSource::Local(media.register(file)),
                duration: "45m".to_string(),
                season: 1,
                number,
            }
        })
        .collect();

    Movie {
        id: series_id,
        title: metadata.title,
        description: metadata.description,
        thumbnail,
        video: None,
        genre: metadata.genre,
        duration: format!("{} Episódios", episodes.len()),
        year: Utc::now().year(),
        match_score: metadata.match_score,
        episodes,
    }
}

/// Build a movie from an externally hosted link. Remote sources only, so the
/// entry survives persistence round-trips.
pub fn external_link(title: &str, url: &Url, cover_url: Option<&str>, notes: &str) -> Movie {
    let description = if notes.trim().is_empty() {
        EXTERNAL_DESCRIPTION.to_string()
    } else {
        notes.to_string()
    };
    let thumbnail = cover_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(DEFAULT_THUMBNAIL);

    Movie {
        id: ids::fresh("ext"),
        title: title.to_string(),
        description,
        thumbnail: MediaSource::Remote(thumbnail.to_string()),
        video: Some(MediaSource::Remote(url.to_string())),
        genre: "Web / Online".to_string(),
        duration: "Online".to_string(),
        year: Utc::now().year(),
        match_score: 100,
        episodes: Vec::new(),
    }
}

/// Build the episode batch for appending to an existing series.
///
/// Numbering continues the series-wide running count: with `existing_count`
/// episodes already present, the batch gets `existing_count + 1` onward in
/// file order, whatever season it lands in.
pub fn episode_batch(
    series_id: &str,
    series_thumbnail: &MediaSource,
    existing_count: usize,
    files: &[PathBuf],
    season: u32,
    media: &mut SessionMedia,
) -> Vec<Episode> {
    files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            let number = (existing_count + idx + 1) as u32;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Episode {
                id: ids::fresh(&format!("{series_id}-ep-added")),
                title: format!("Episódio {number}"),
                description: format!("Adicionado manualmente. Arquivo: {file_name}"),
                thumbnail: series_thumbnail.clone(),
                video: MediaSource::Local(media.register(file)),
                duration: "45m".to_string(),
                season,
                number,
            }
        })
        .collect()
}

/// Expand an ingest argument into video files: a video file stands alone, a
/// directory is walked for videos (sorted for deterministic episode order).
pub fn collect_video_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return if is_video(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_video(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn cover_source(cover: Option<&Path>, media: &mut SessionMedia) -> MediaSource {
    match cover {
        Some(path) => MediaSource::Local(media.register(path)),
        None => MediaSource::Remote(DEFAULT_THUMBNAIL.to_string()),
    }
}
