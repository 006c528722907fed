use serde::{Deserialize, Serialize};
use thiserror::Error;

pub trait UrlTyped {
    fn get_path(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Navigation error: {0}")]
    Navigation(String),
    #[error("Waiting for selector `{selector}` failed on url: {url}")]
    SelectorTimeout { selector: String, url: String },
    #[error("Invalid html structure: {0}")]
    InvalidStructure(String),
    #[error("Output error: {0}")]
    Output(String),
}

/// A titled link discovered on a listing page. Identity is the url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogEntry {
    pub title: String,
    url: String,
}

impl CatalogEntry {
    pub fn new(title: String, url: String) -> Self {
        Self { title, url }
    }
}

impl UrlTyped for CatalogEntry {
    fn get_path(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entry_has_valid_traits() {
        let entry = CatalogEntry::new(
            "One Piece".to_string(),
            "https://oploverz.test/anime/one-piece/".to_string(),
        );
        assert_eq!(entry.get_path(), "https://oploverz.test/anime/one-piece/");
        assert_eq!(entry.title, "One Piece");
    }

    #[test]
    fn selector_timeout_mentions_selector_and_url() {
        let err = Error::SelectorTimeout {
            selector: ".clearfix img.cover".to_string(),
            url: "https://oploverz.test/anime/a/".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains(".clearfix img.cover"));
        assert!(msg.contains("https://oploverz.test/anime/a/"));
    }
}
