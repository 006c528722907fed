use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{CatalogEntry, UrlTyped};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorOption {
    pub text: String,
    pub value: String,
}

/// Raw extraction result of a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPage {
    pub cover_img: Option<String>,
    pub sinopsis: Option<String>,
    pub info_items: Vec<String>,
    pub other_episodes: Vec<CatalogEntry>,
}

/// Raw extraction result of an episode page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodePage {
    pub iframe_src: Option<String>,
    pub options: Vec<MirrorOption>,
}

impl EpisodePage {
    /// An episode without a player source or a mirror carries nothing to watch.
    pub fn is_playable(&self) -> bool {
        self.iframe_src.as_deref().is_some_and(|s| !s.is_empty()) || !self.options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRecord {
    pub title: String,
    pub url: String,
    pub iframe_src: Option<String>,
    pub options: Vec<MirrorOption>,
}

impl EpisodeRecord {
    pub fn new(link: &CatalogEntry, page: EpisodePage) -> Self {
        Self {
            title: link.title.clone(),
            url: link.get_path(),
            iframe_src: page.iframe_src,
            options: page.options,
        }
    }
}

/// Everything a detail traversal produces, minus the catalog title and url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDetails {
    pub cover_img: Option<String>,
    pub sinopsis: Option<String>,
    pub info_items: Vec<String>,
    pub episodes: Vec<EpisodeRecord>,
}

impl ItemDetails {
    pub fn new(page: DetailPage, episodes: Vec<EpisodeRecord>) -> Self {
        Self {
            cover_img: page.cover_img,
            sinopsis: page.sinopsis,
            info_items: page.info_items,
            episodes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub title: String,
    url: String,
    pub cover_img: Option<String>,
    pub sinopsis: Option<String>,
    pub info_items: Vec<String>,
    pub episodes: Vec<EpisodeRecord>,
}

impl ItemRecord {
    pub fn new(entry: CatalogEntry, details: ItemDetails) -> Self {
        Self {
            url: entry.get_path(),
            title: entry.title,
            cover_img: details.cover_img,
            sinopsis: details.sinopsis,
            info_items: details.info_items,
            episodes: details.episodes,
        }
    }

    /// Value of the `<key>: <value>` info line, e.g. `info_value("Status")`.
    /// Everything after the first colon is kept, so `Judul: Re:Zero` yields
    /// `Re:Zero`.
    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info_items
            .iter()
            .filter_map(|line| line.split_once(':'))
            .find(|(label, _)| label.trim() == key)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Title shown to readers: the catalog title, then `Judul`, then `Japanese`.
    pub fn display_title(&self) -> Option<&str> {
        Some(self.title.trim())
            .filter(|t| !t.is_empty())
            .or_else(|| self.info_value("Judul"))
            .or_else(|| self.info_value("Japanese"))
    }

    // Keyed on the catalog title, not `display_title()`.
    fn sort_key(&self) -> (String, &str, &str) {
        (self.title.to_lowercase(), self.title.as_str(), self.url.as_str())
    }
}

impl UrlTyped for ItemRecord {
    fn get_path(&self) -> String {
        self.url.clone()
    }
}

impl Eq for ItemRecord {}

impl PartialEq for ItemRecord {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.url == other.url
    }
}

impl Ord for ItemRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for ItemRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(title: &str, url: &str, info_items: &[&str]) -> ItemRecord {
        ItemRecord::new(
            CatalogEntry::new(title.to_string(), url.to_string()),
            ItemDetails {
                info_items: info_items.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn item_has_valid_traits() {
        let record = create_test_record(
            "Alpha",
            "https://oploverz.test/anime/alpha/",
            &["Status: Ongoing", "Tipe: TV"],
        );
        assert_eq!(record.get_path(), "https://oploverz.test/anime/alpha/");
        assert_eq!(record.info_value("Status"), Some("Ongoing"));
        assert_eq!(record.info_value("Tipe"), Some("TV"));
        assert_eq!(record.info_value("Durasi"), None);
    }

    #[test]
    fn info_value_keeps_text_after_first_colon() {
        let record = create_test_record("", "u", &["Judul: Re:Zero kara", "Genre:"]);
        assert_eq!(record.info_value("Judul"), Some("Re:Zero kara"));
        assert_eq!(record.info_value("Genre"), None);
    }

    #[test]
    fn display_title_fallback_chain() {
        let titled = create_test_record("Alpha", "a", &["Judul: Alfa"]);
        assert_eq!(titled.display_title(), Some("Alpha"));

        let judul = create_test_record("  ", "b", &["Japanese: Arufa", "Judul: Alfa"]);
        assert_eq!(judul.display_title(), Some("Alfa"));

        let japanese = create_test_record("", "c", &["Japanese: Arufa"]);
        assert_eq!(japanese.display_title(), Some("Arufa"));

        let nothing = create_test_record("", "d", &["Status: Ongoing"]);
        assert_eq!(nothing.display_title(), None);
    }

    #[test]
    fn item_ordering_ignores_case() {
        let mut records = vec![
            create_test_record("gamma", "g", &[]),
            create_test_record("Beta", "b", &[]),
            create_test_record("alpha", "a", &[]),
        ];
        records.sort();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Beta", "gamma"]);

        let resorted = {
            let mut again = records.clone();
            again.sort();
            again
        };
        assert_eq!(records, resorted);
    }

    #[test]
    fn item_ordering_breaks_ties_by_url() {
        let first = create_test_record("Alpha", "https://oploverz.test/a1/", &[]);
        let second = create_test_record("Alpha", "https://oploverz.test/a2/", &[]);
        assert!(first < second);
        assert_ne!(first, second);
    }

    #[test]
    fn ordering_uses_catalog_title() {
        let mut records = vec![
            create_test_record("Beta", "b", &[]),
            create_test_record("", "z", &["Judul: Zeta"]),
        ];
        records.sort();
        let shown: Vec<Option<&str>> = records.iter().map(|r| r.display_title()).collect();
        assert_eq!(shown, vec![Some("Zeta"), Some("Beta")]);
    }

    #[test]
    fn episode_playability() {
        assert!(!EpisodePage::default().is_playable());
        assert!(!EpisodePage {
            iframe_src: Some(String::new()),
            options: vec![],
        }
        .is_playable());
        assert!(EpisodePage {
            iframe_src: Some("https://player.test/e/1".to_string()),
            options: vec![],
        }
        .is_playable());
        assert!(EpisodePage {
            iframe_src: None,
            options: vec![MirrorOption {
                text: "Mirror 1".to_string(),
                value: "abc".to_string(),
            }],
        }
        .is_playable());
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = ItemRecord::new(
            CatalogEntry::new("Alpha".to_string(), "https://oploverz.test/a/".to_string()),
            ItemDetails {
                cover_img: Some("https://oploverz.test/a.jpg".to_string()),
                sinopsis: None,
                info_items: vec!["Status: Ongoing".to_string()],
                episodes: vec![EpisodeRecord {
                    title: "Episode 1".to_string(),
                    url: "https://oploverz.test/a-1/".to_string(),
                    iframe_src: Some("https://player.test/1".to_string()),
                    options: vec![],
                }],
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Alpha",
                "url": "https://oploverz.test/a/",
                "coverImg": "https://oploverz.test/a.jpg",
                "sinopsis": null,
                "infoItems": ["Status: Ongoing"],
                "episodes": [{
                    "title": "Episode 1",
                    "url": "https://oploverz.test/a-1/",
                    "iframeSrc": "https://player.test/1",
                    "options": []
                }]
            })
        );
    }
}
