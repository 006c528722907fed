use itertools::Itertools as _;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::types::Error;

lazy_static! {
    static ref REX_SPACES: Regex = Regex::new(r"[ \t\r\f\x{A0}]+").unwrap();
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, Error> {
    Selector::parse(selector)
        .map_err(|_| Error::InvalidStructure(format!("Invalid selector: {}", selector)))
}

/// Concatenation of every descendant text node, untouched.
pub(crate) fn text_content(el: &ElementRef) -> String {
    el.text().collect()
}

const BLOCK_ELEMENTS: [&str; 16] = [
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "section", "article",
    "blockquote", "table",
];

/// Rough `innerText`: whitespace runs collapsed per line, blank lines dropped.
/// `<br>` and block element boundaries are honoured as line breaks.
pub(crate) fn inner_text(el: &ElementRef) -> String {
    let mut raw = String::new();
    push_rendered_text(el, &mut raw);
    normalize_lines(&raw)
}

fn push_rendered_text(el: &ElementRef, raw: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            raw.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if name == "br" {
                raw.push('\n');
                continue;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                raw.push('\n');
            }
            push_rendered_text(&child, raw);
            if block {
                raw.push('\n');
            }
        }
    }
}

pub(crate) fn normalize_lines(raw: &str) -> String {
    raw.lines()
        .map(|line| REX_SPACES.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .join("\n")
}

/// Treats an empty or blank value the way the DOM's falsy checks do.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
