//! Canned pages shaped like the catalog site.

use itertools::Itertools as _;

pub const BASE_URL: &str = "https://oploverz.test";

pub fn url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

pub fn list_page(anime: &[(&str, &str)]) -> String {
    let items = anime
        .iter()
        .map(|(title, path)| format!(r#"<li><a href="{}">{}</a></li>"#, path, title))
        .join("\n");
    format!(
        r#"<html><body>
<div class="maxullink"><ul>
{}
</ul></div>
</body></html>"#,
        items
    )
}

pub fn detail_page(title: &str, with_cover: bool, episodes: &[(&str, &str)]) -> String {
    let slug = title.to_lowercase().replace(' ', "-");
    let cover = if with_cover {
        format!(r#"<img class="cover" src="/img/{}.jpg">"#, slug)
    } else {
        String::new()
    };
    let links = episodes
        .iter()
        .map(|(title, path)| format!(r#"<a href="{}">{}</a>"#, path, title))
        .join("\n");
    format!(
        r#"<html><body>
<div class="clearfix">
{cover}
<div class="sinops">
<p>{title} is a story.</p>
<p>Second paragraph.</p>
</div>
</div>
<div class="infopost"><ul>
<li><b>Judul:</b> {title}</li>
<li><b>Status:</b> Ongoing</li>
<li><b>Tipe:</b> TV</li>
</ul></div>
<div class="bottom-line">
{links}
</div>
</body></html>"#
    )
}

pub fn episode_page(iframe_src: Option<&str>, options: &[(&str, Option<&str>)]) -> String {
    let iframe = iframe_src
        .map(|src| format!(r#"<iframe id="istream" src="{}"></iframe>"#, src))
        .unwrap_or_default();
    let select = if options.is_empty() {
        String::new()
    } else {
        let opts = options
            .iter()
            .map(|(text, value)| match value {
                Some(v) => format!(r#"<option value="{}">{}</option>"#, v, text),
                None => format!("<option>{}</option>", text),
            })
            .join("");
        format!(r#"<select class="mirvid">{}</select>"#, opts)
    };
    format!(
        r#"<html><body>
<div class="player">{}</div>
<div class="mirror">{}</div>
</body></html>"#,
        iframe, select
    )
}
