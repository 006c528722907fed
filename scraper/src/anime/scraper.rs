use std::time::Duration;

use log::{error, info, warn};

use crate::{
    client::FetchHtml,
    error_log::ErrorSink,
    fetcher::{PageFetcher, WaitPolicy},
    types::{CatalogEntry, Error, UrlTyped},
};

use super::{
    models::{EpisodePage, EpisodeRecord, ItemDetails},
    parser,
};

/// Walks catalog, detail and episode pages one at a time over a single
/// session. Recoverable failures go to the error sink.
pub struct AnimeScraper<T, S>
where
    T: FetchHtml,
    S: ErrorSink,
{
    fetcher: PageFetcher<T>,
    error_log: S,
    page_timeout: Duration,
}

impl<T: FetchHtml, S: ErrorSink> AnimeScraper<T, S> {
    pub fn new(fetcher: PageFetcher<T>, error_log: S, page_timeout: Duration) -> Self {
        Self {
            fetcher,
            error_log,
            page_timeout,
        }
    }

    pub fn fetcher(&self) -> &PageFetcher<T> {
        &self.fetcher
    }

    pub fn error_log(&self) -> &S {
        &self.error_log
    }

    pub async fn scrape_catalog(
        &self,
        list_url: &str,
        timeout: Duration,
    ) -> Result<Vec<CatalogEntry>, Error> {
        let policy = WaitPolicy::network_idle(timeout).with_selector(parser::CATALOG_LINKS);
        let page = self.fetcher.load(list_url, &policy).await?;
        info!("Extracting list of anime URLs...");
        let catalog = parser::extract_catalog(page.document())?;
        page.close();
        Ok(catalog)
    }

    /// Fails when the detail page itself cannot be loaded; episode failures
    /// only shrink the episode list.
    pub async fn scrape_detail(&self, url: &str) -> Result<ItemDetails, Error> {
        info!("Scraping details from URL: {}", url);
        let policy = WaitPolicy::network_idle(self.page_timeout).with_selector(parser::COVER_IMG);
        let detail = {
            let page = self.fetcher.load(url, &policy).await?;
            let detail = parser::extract_detail(page.document())?;
            page.close();
            detail
        };

        let episodes = self.scrape_episodes(&detail.other_episodes).await;
        Ok(ItemDetails::new(detail, episodes))
    }

    /// Serial on purpose: one open page at a time, deterministic log order.
    pub async fn scrape_episodes(&self, links: &[CatalogEntry]) -> Vec<EpisodeRecord> {
        let policy = WaitPolicy::network_idle(self.page_timeout);
        let mut episodes = Vec::with_capacity(links.len());
        for link in links {
            let url = link.get_path();
            info!("Scraping episode: {}", link.title);
            match self.scrape_episode(&url, &policy).await {
                Ok(page) if page.is_playable() => episodes.push(EpisodeRecord::new(link, page)),
                Ok(_) => {
                    warn!(
                        "No valid iframe or select options found for episode URL: {}. Skipping...",
                        url
                    );
                    self.error_log
                        .record(format!(
                            "No valid iframe or select options found for episode URL: {}",
                            url
                        ))
                        .await;
                }
                Err(e) => {
                    error!("Error scraping episode URL: {}. Skipping... {}", url, e);
                    self.error_log
                        .record(format!("Error scraping episode URL: {} - {}", url, e))
                        .await;
                }
            }
        }
        episodes
    }

    async fn scrape_episode(&self, url: &str, policy: &WaitPolicy) -> Result<EpisodePage, Error> {
        let page = self.fetcher.load(url, policy).await?;
        let episode = parser::extract_episode(page.document());
        page.close();
        episode
    }
}
