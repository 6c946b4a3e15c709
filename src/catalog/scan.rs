use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lofty::prelude::{Accessor, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Category, Track};

const UNKNOWN_ARTIST: &str = "Unknown Artist";

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Catalog id: the path relative to the scan root, `/`-separated.
fn track_id(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn category_for(root: &Path, path: &Path, settings: &LibrarySettings) -> Category {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let in_background_dir = rel
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .filter_map(|c| c.as_os_str().to_str())
        .any(|name| {
            settings
                .background_dirs
                .iter()
                .any(|d| d.eq_ignore_ascii_case(name))
        });

    if in_background_dir {
        Category::Bgm
    } else {
        Category::Song
    }
}

fn find_cover(path: &Path, settings: &LibrarySettings) -> Option<String> {
    let dir = path.parent()?;
    settings
        .cover_names
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .map(|p| p.display().to_string())
}

fn modified_at(path: &Path) -> DateTime<Utc> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}

/// Walk `dir` and build a track for every audio file the settings accept.
///
/// Tags are read with lofty when possible; unreadable files still show up
/// with their file stem as title. The result is ordered newest first.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();
    let root: PathBuf = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());

    let mut walker = WalkDir::new(&root).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file()
            || (!settings.include_hidden && is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist: Option<String> = None;
        let mut group: Option<String> = None;

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                        title = v.trim().to_string();
                    }
                    artist = tag
                        .artist()
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty());
                    group = tag
                        .album()
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty());
                }
            }
            Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
        }

        tracks.push(Track {
            id: track_id(&root, path),
            title,
            artist: artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            group,
            category: category_for(&root, path, settings),
            language: settings.default_language.clone(),
            cover: find_cover(path, settings),
            media: path.display().to_string(),
            created_at: modified_at(path),
        });
    }

    sort_newest_first(&mut tracks);
    tracks
}

/// Creation time descending; ties fall back to a case-insensitive title order.
pub(super) fn sort_newest_first(tracks: &mut [Track]) {
    tracks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}
