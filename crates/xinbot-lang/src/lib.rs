#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Language detection and translation collaborator client.
//!
//! Failures are always survivable: detection falls back to a script
//! check, translation falls back to the input text. A small in-memory
//! cache keyed by `(target, text)` keeps repeated phrases cheap.

mod client;

pub use client::TranslationClient;

use xinbot_core::types::LanguageTag;

/// Local fallback when the detection collaborator is unavailable: Han
/// text is treated as Traditional Chinese, everything else as English.
pub fn fallback_language(text: &str) -> LanguageTag {
    let has_han = text
        .chars()
        .any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c));
    if has_han {
        "zh-TW".to_string()
    } else {
        "en".to_string()
    }
}

/// Whether a detected tag means the content language of the catalog.
pub fn is_chinese(tag: &str) -> bool {
    tag.starts_with("zh")
}
