use itertools::Itertools as _;

use crate::{
    document::{DocumentHandle, Element},
    types::{CatalogEntry, Error, UrlTyped},
    utils,
};

use super::models::{DetailPage, EpisodePage, MirrorOption};

pub const CATALOG_LINKS: &str = ".maxullink a";
pub const COVER_IMG: &str = ".clearfix img.cover";
pub const SINOPSIS: &str = ".clearfix .sinops";
pub const INFO_ITEMS: &str = ".infopost li";
pub const EPISODE_LINKS: &str = ".bottom-line a";
pub const PLAYER_IFRAME: &str = "#istream";
pub const MIRROR_SELECT: &str = ".mirvid";

/// Every catalog anchor, first occurrence per url. An empty list is valid.
pub fn extract_catalog<D: DocumentHandle + ?Sized>(doc: &D) -> Result<Vec<CatalogEntry>, Error> {
    let entries = extract_links(doc, CATALOG_LINKS)?
        .into_iter()
        .unique_by(|entry| entry.get_path())
        .collect_vec();
    Ok(entries)
}

pub fn extract_detail<D: DocumentHandle + ?Sized>(doc: &D) -> Result<DetailPage, Error> {
    let cover_img = doc
        .query_selector(COVER_IMG)?
        .and_then(|img| resolved_attr(doc, &img, "src"));
    let sinopsis = doc.query_selector(SINOPSIS)?.map(|el| el.inner_text);
    let info_items = doc
        .query_selector_all(INFO_ITEMS)?
        .into_iter()
        .map(|li| li.inner_text)
        .collect_vec();
    let other_episodes = extract_links(doc, EPISODE_LINKS)?;

    Ok(DetailPage {
        cover_img,
        sinopsis,
        info_items,
        other_episodes,
    })
}

pub fn extract_episode<D: DocumentHandle + ?Sized>(doc: &D) -> Result<EpisodePage, Error> {
    let iframe_src = doc
        .query_selector(PLAYER_IFRAME)?
        .and_then(|iframe| resolved_attr(doc, &iframe, "src"));
    let options = doc
        .query_selector_all_in(MIRROR_SELECT, "option")?
        .into_iter()
        .map(|option| {
            let text = option.text_content.trim().to_string();
            // the DOM falls back to the label when `value` is missing
            let value = option
                .attr("value")
                .map(String::from)
                .unwrap_or_else(|| text.clone());
            MirrorOption { text, value }
        })
        .collect_vec();

    Ok(EpisodePage {
        iframe_src,
        options,
    })
}

fn extract_links<D: DocumentHandle + ?Sized>(
    doc: &D,
    selector: &str,
) -> Result<Vec<CatalogEntry>, Error> {
    Ok(doc
        .query_selector_all(selector)?
        .into_iter()
        .filter_map(|a| {
            resolved_attr(doc, &a, "href")
                .map(|url| CatalogEntry::new(a.text_content.trim().to_string(), url))
        })
        .collect())
}

fn resolved_attr<D: DocumentHandle + ?Sized>(doc: &D, el: &Element, name: &str) -> Option<String> {
    utils::non_blank(el.attr(name).map(String::from)).and_then(|v| doc.resolve_url(&v))
}
