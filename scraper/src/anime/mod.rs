pub mod batch;
pub mod models;
pub mod parser;
pub mod scraper;

#[cfg(test)]
mod fixtures;
