use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use log::{debug, warn};

use crate::{
    client::FetchHtml,
    document::{DocumentHandle, HtmlDocument},
    types::Error,
};

/// How long a load may take and what the document must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub required_selector: Option<String>,
}

impl WaitPolicy {
    /// Over HTTP the network is idle once the body has been fully received.
    pub fn network_idle(timeout: Duration) -> Self {
        Self {
            timeout,
            required_selector: None,
        }
    }

    pub fn with_selector(mut self, selector: &str) -> Self {
        self.required_selector = Some(selector.to_string());
        self
    }
}

/// One scraping session. Each `load` opens a fresh page that is released
/// when the returned [`Page`] is dropped.
#[derive(Debug)]
pub struct PageFetcher<T>
where
    T: FetchHtml,
{
    client: T,
    open_pages: Arc<AtomicUsize>,
}

impl<T: FetchHtml> PageFetcher<T> {
    pub fn new(client: T) -> Self {
        Self {
            client,
            open_pages: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[cfg(test)]
    pub fn client(&self) -> &T {
        &self.client
    }

    pub fn open_pages(&self) -> usize {
        self.open_pages.load(Ordering::SeqCst)
    }

    pub async fn load(&self, url: &str, policy: &WaitPolicy) -> Result<Page, Error> {
        let lease = PageLease::acquire(self.open_pages.clone());
        debug!(
            "loading {} (timeout: {}ms, selector: {:?})",
            url,
            policy.timeout.as_millis(),
            policy.required_selector
        );

        let html = tokio::time::timeout(policy.timeout, self.client.fetch(url, policy.timeout))
            .await
            .map_err(|_| {
                Error::Navigation(format!(
                    "timeout of {}ms exceeded on url: {}",
                    policy.timeout.as_millis(),
                    url
                ))
            })??;
        let document = HtmlDocument::parse(url, &html)?;
        debug!("loaded {} ({} bytes)", document.url(), html.len());

        if let Some(selector) = &policy.required_selector {
            if document.query_selector(selector)?.is_none() {
                return Err(Error::SelectorTimeout {
                    selector: selector.clone(),
                    url: url.to_string(),
                });
            }
        }

        Ok(Page {
            document,
            _lease: lease,
        })
    }

    /// Ends the session. Pages still alive at this point are reported.
    pub fn close(&self) {
        let open = self.open_pages();
        if open > 0 {
            warn!("closing session with {} page(s) still open", open);
        } else {
            debug!("session closed");
        }
    }
}

#[derive(Debug)]
struct PageLease(Arc<AtomicUsize>);

impl PageLease {
    fn acquire(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PageLease {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct Page {
    document: HtmlDocument,
    _lease: PageLease,
}

impl Page {
    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }

    /// Consumes the page; its lease is released on drop.
    pub fn close(self) {}
}
