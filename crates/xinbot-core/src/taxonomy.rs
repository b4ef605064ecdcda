//! Curated keyword taxonomy and stop-word set.
//!
//! A built-in default ships in code; a JSON file can override it at
//! startup or via reload. Readers hold an `Arc` snapshot, so a reload
//! never exposes a partially-updated map.

use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// One topic category and its ordered keyword list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Read-only mapping `category -> keywords` plus the stop-word set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: Vec<Category>,
    stop_words: Vec<String>,
}

impl Taxonomy {
    /// The curated default keyword lists.
    pub fn builtin() -> Self {
        let cat = |name: &str, keywords: &[&str]| Category {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        };
        Self {
            categories: vec![
                cat(
                    "mood",
                    &[
                        "憂鬱", "情緒低落", "心情不好", "心情低落", "心情", "低落", "難過",
                        "沮喪", "沒動力",
                    ],
                ),
                cat("anxiety", &["焦慮", "緊張", "恐慌", "壓力", "職場壓力"]),
                cat("sleep", &["失眠", "睡不著"]),
                cat("loneliness", &["孤單", "寂寞"]),
                cat(
                    "family",
                    &["婆媳", "婆婆", "公婆", "家庭衝突", "家庭關係", "夫妻", "婚姻"],
                ),
                cat(
                    "parenting",
                    &[
                        "小孩", "孩子", "幼兒", "青少年", "教養", "親子", "親子衝突",
                        "親子關係", "吵架", "頂嘴", "哭鬧", "情緒失控", "脾氣",
                    ],
                ),
                cat("dementia", &["失智", "失智症", "健忘", "記憶力退化"]),
            ],
            stop_words: [
                "我", "你", "他", "她", "它", "我們", "你們", "他們", "最近", "一直",
                "覺得", "有點", "有一點", "如果", "好像", "是不是", "該怎麼辦", "怎麼辦",
                "怎麼做", "該怎麼做", "可以", "自己", "的", "了", "呢", "嗎", "吧",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let tax: Taxonomy = serde_json::from_str(&raw)?;
        if tax.categories.is_empty() {
            return Err(crate::error::Error::InvalidConfig(format!(
                "keyword file {} has no categories",
                path.display()
            ))
            .into());
        }
        Ok(tax)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.iter().any(|w| w == token)
    }
}

/// Shared snapshot handle. `current` clones the `Arc`; `replace` swaps the
/// whole structure atomically under a short write lock.
pub struct TaxonomyHandle {
    inner: RwLock<Arc<Taxonomy>>,
}

impl TaxonomyHandle {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            inner: RwLock::new(Arc::new(taxonomy)),
        }
    }

    pub fn current(&self) -> Arc<Taxonomy> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, taxonomy: Taxonomy) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Arc::new(taxonomy);
    }

    /// Hot-swap from a keyword file, or back to the builtin default when
    /// no path is given. Returns the number of categories now live.
    pub fn reload(&self, path: Option<&Path>) -> anyhow::Result<usize> {
        let taxonomy = match path {
            Some(p) => Taxonomy::from_path(p)?,
            None => Taxonomy::builtin(),
        };
        let n = taxonomy.categories.len();
        self.replace(taxonomy);
        tracing::info!("keyword taxonomy reloaded ({n} categories)");
        Ok(n)
    }
}
