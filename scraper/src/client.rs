use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::types::Error;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchHtml: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, Error>;
}

#[derive(Debug, Clone)]
pub struct HttpClientWrapper(pub Client);

impl HttpClientWrapper {
    pub fn build(user_agent: &str) -> Result<Self, Error> {
        Client::builder()
            .user_agent(user_agent)
            .build()
            .map(Self)
            .map_err(|e| Error::RequestError(format!("{:?}", e)))
    }
}

#[async_trait]
impl FetchHtml for HttpClientWrapper {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, Error> {
        self.0
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, url, timeout))?
            .error_for_status()
            .map_err(|e| Error::Navigation(format!("{} on url: {}", e, url)))?
            .text()
            .await
            .map_err(|e| transport_error(e, url, timeout))
    }
}

fn transport_error(err: reqwest::Error, url: &str, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Navigation(format!(
            "timeout of {}ms exceeded on url: {}",
            timeout.as_millis(),
            url
        ))
    } else {
        Error::RequestError(format!("{:?} on url: {}", err, url))
    }
}

/// In-memory transport keyed by url, recording every request in order.
#[cfg(test)]
pub(crate) struct StaticClient {
    pages: std::collections::HashMap<String, Result<String, Error>>,
    requests: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl StaticClient {
    pub(crate) fn new<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<String, Error>)>,
    {
        Self {
            pages: pages.into_iter().collect(),
            requests: std::sync::Mutex::new(vec![]),
        }
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl FetchHtml for StaticClient {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, Error> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(Error::RequestError(format!("no route on url: {}", url))))
    }
}
