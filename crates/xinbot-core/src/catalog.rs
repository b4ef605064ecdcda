//! In-memory catalog of content units, built once at startup.

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::{ContentUnit, Subtitle};

/// Raw unit shape as stored in the e-learning dataset files.
#[derive(Debug, Deserialize)]
struct RawUnit {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    section_title: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content_text: String,
    #[serde(default)]
    is_article: bool,
    #[serde(default)]
    youtube_url: Option<String>,
    #[serde(default)]
    article_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    subtitles: Vec<Subtitle>,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    units: Vec<RawUnit>,
}

/// The full unit set plus an id index. Read-only after construction;
/// safe for unsynchronized concurrent reads.
pub struct Catalog {
    units: Vec<ContentUnit>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_units(units: Vec<ContentUnit>) -> Self {
        let mut units = units;
        for u in &mut units {
            let (title_text, body_text) = search_projection(u);
            u.title_text = title_text;
            u.body_text = body_text;
        }
        let by_id = units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.id.clone(), i))
            .collect();
        Self { units, by_id }
    }

    /// Load a single dataset file (`{"units": [...]}`).
    pub fn load_file(path: &Path) -> Result<Self> {
        let units = read_dataset(path)?;
        tracing::info!("loaded {} units from {}", units.len(), path.display());
        Ok(Self::from_units(units))
    }

    /// Load every `*_dataset.json` under `dir` (sorted for determinism).
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with("_dataset.json"))
            })
            .collect();
        files.sort();
        if files.is_empty() {
            anyhow::bail!("no *_dataset.json files under {}", dir.display());
        }
        let mut units = Vec::new();
        for path in &files {
            let batch = read_dataset(path)?;
            tracing::info!("loaded {} units from {}", batch.len(), path.display());
            units.extend(batch);
        }
        Ok(Self::from_units(units))
    }

    pub fn units(&self) -> &[ContentUnit] {
        &self.units
    }

    pub fn get(&self, index: usize) -> &ContentUnit {
        &self.units[index]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn read_dataset(path: &Path) -> Result<Vec<ContentUnit>> {
    let raw = std::fs::read_to_string(path)?;
    let dataset: RawDataset = serde_json::from_str(&raw)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "dataset".to_string());
    let units = dataset
        .units
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let media_url = if r.is_article {
                r.article_url.or(r.url).unwrap_or_default()
            } else {
                r.youtube_url.unwrap_or_default()
            };
            ContentUnit {
                id: r.id.unwrap_or_else(|| format!("{stem}:{i}")),
                section_title: r.section_title,
                title: r.title,
                content_text: r.content_text,
                is_article: r.is_article,
                media_url,
                subtitles: r.subtitles,
                title_text: String::new(),
                body_text: String::new(),
            }
        })
        .collect();
    Ok(units)
}

/// Lower-cased `(title, body)` search projection of one unit. The title
/// side joins section and unit title; the body side joins content text
/// and subtitle text.
fn search_projection(unit: &ContentUnit) -> (String, String) {
    let title = format!("{}{}", unit.section_title, unit.title).to_lowercase();
    let mut body = unit.content_text.clone();
    for seg in &unit.subtitles {
        if !body.is_empty() {
            body.push(' ');
        }
        body.push_str(&seg.text);
    }
    (title, body.to_lowercase())
}
