use std::{ops::Range, path::PathBuf, time::Duration};

use log::{error, info, warn};

use crate::{
    client::FetchHtml,
    error_log::ErrorSink,
    output_writer::OutputWriter,
    types::{Error, UrlTyped},
};

use super::{models::ItemRecord, scraper::AnimeScraper};

/// Shard of the catalog to process. `size == 0` means the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Batch {
    pub index: usize,
    pub size: usize,
}

impl Batch {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    pub fn is_sliced(&self) -> bool {
        self.size > 0
    }

    /// `[index * size, index * size + size)` clipped to `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        if !self.is_sliced() {
            return 0..len;
        }
        let start = self.index.saturating_mul(self.size).min(len);
        let end = start.saturating_add(self.size).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub list_url: String,
    pub list_timeout: Duration,
    pub batch: Batch,
    pub output_path: PathBuf,
}

pub struct BatchController<T, S>
where
    T: FetchHtml,
    S: ErrorSink,
{
    scraper: AnimeScraper<T, S>,
    config: BatchConfig,
}

impl<T: FetchHtml, S: ErrorSink> BatchController<T, S> {
    pub fn new(scraper: AnimeScraper<T, S>, config: BatchConfig) -> Self {
        Self { scraper, config }
    }

    #[cfg(test)]
    pub fn scraper(&self) -> &AnimeScraper<T, S> {
        &self.scraper
    }

    /// Discovers the catalog, scrapes the configured batch item by item and
    /// returns the records sorted by title. Only a catalog failure is fatal.
    pub async fn collect(&self) -> Result<Vec<ItemRecord>, Error> {
        info!("Navigating to anime list page {}", self.config.list_url);
        let catalog = self
            .scraper
            .scrape_catalog(&self.config.list_url, self.config.list_timeout)
            .await?;
        info!("Found {} anime(s).", catalog.len());

        let batch = self.config.batch;
        let range = batch.range(catalog.len());
        if batch.is_sliced() {
            if range.is_empty() {
                info!("No more anime in this batch.");
            } else {
                info!(
                    "Processing batch {}, items {} to {}",
                    batch.index,
                    range.start,
                    range.end - 1
                );
            }
        }

        let mut records = Vec::with_capacity(range.len());
        for entry in batch.slice(&catalog) {
            info!("Scraping details for anime: {}", entry.title);
            match self.scraper.scrape_detail(&entry.get_path()).await {
                Ok(details) => {
                    let record = ItemRecord::new(entry.clone(), details);
                    if record.display_title().is_none() {
                        warn!("No displayable title for {}", record.get_path());
                    }
                    records.push(record);
                }
                Err(e) => {
                    error!("Error scraping details for {}: {}", entry.title, e);
                    self.scraper
                        .error_log()
                        .record(format!("Error scraping details for {}: {}", entry.title, e))
                        .await;
                }
            }
        }

        records.sort();
        Ok(records)
    }

    /// Runs the whole batch and replaces the artifact. Nothing is written
    /// unless the batch loop completed.
    pub async fn run<W: OutputWriter>(&self, writer: &W) -> Result<usize, Error> {
        let outcome = self.collect().await;
        info!("All anime details scraped. Closing session...");
        self.scraper.fetcher().close();

        let records = match outcome {
            Ok(records) => records,
            Err(e) => return Err(self.fail(e).await),
        };

        info!("Saving batch data to {}", self.config.output_path.display());
        if let Err(e) = writer.write(&records, &self.config.output_path).await {
            return Err(self.fail(e).await);
        }
        info!(
            "Data saved successfully. Total anime scraped in this batch: {}",
            records.len()
        );
        Ok(records.len())
    }

    async fn fail(&self, e: Error) -> Error {
        error!("An error occurred: {}", e);
        self.scraper
            .error_log()
            .record(format!("An error occurred: {}", e))
            .await;
        e
    }
}
