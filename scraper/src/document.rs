use std::collections::HashMap;

use scraper::{ElementRef, Html};
use url::Url;

use crate::{types::Error, utils};

/// Snapshot of a matched element, detached from the parsed tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text_content: String,
    pub inner_text: String,
    attributes: HashMap<String, String>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl From<ElementRef<'_>> for Element {
    fn from(el: ElementRef<'_>) -> Self {
        Self {
            text_content: utils::text_content(&el),
            inner_text: utils::inner_text(&el),
            attributes: el
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Structural queries over a loaded page. Extractors only see this.
pub trait DocumentHandle {
    fn url(&self) -> &str;

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, Error>;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, Error>;

    /// Matches `selector` under the first `scope` match only; empty when
    /// `scope` is absent.
    fn query_selector_all_in(&self, scope: &str, selector: &str) -> Result<Vec<Element>, Error>;

    /// Resolves a possibly relative reference against the page url.
    fn resolve_url(&self, reference: &str) -> Option<String>;
}

#[derive(Debug)]
pub struct HtmlDocument {
    url: Url,
    html: Html,
}

impl HtmlDocument {
    pub fn parse(url: &str, source: &str) -> Result<Self, Error> {
        let url = Url::parse(url)
            .map_err(|e| Error::Navigation(format!("{} on url: {}", e, url)))?;
        Ok(Self {
            url,
            html: Html::parse_document(source),
        })
    }
}

impl DocumentHandle for HtmlDocument {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, Error> {
        let selector = utils::parse_selector(selector)?;
        Ok(self.html.select(&selector).next().map(Element::from))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, Error> {
        let selector = utils::parse_selector(selector)?;
        Ok(self.html.select(&selector).map(Element::from).collect())
    }

    fn query_selector_all_in(&self, scope: &str, selector: &str) -> Result<Vec<Element>, Error> {
        let scope = utils::parse_selector(scope)?;
        let selector = utils::parse_selector(selector)?;
        Ok(self
            .html
            .select(&scope)
            .next()
            .map(|el| el.select(&selector).map(Element::from).collect())
            .unwrap_or_default())
    }

    fn resolve_url(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        self.url.join(reference).ok().map(String::from)
    }
}
