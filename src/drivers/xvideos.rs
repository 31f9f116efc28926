//! Xvideos source driver.
//!
//! Pagination is 0-origin (`p=0` is the first page); the driver owns the
//! translation from 1-origin request pages.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::form_urlencoded;

use crate::driver::{absolute_url, normalize_duration, SourceDriver};
use crate::error::SearchError;
use crate::source::Source;
use crate::types::{RecordKind, VideoRecord};

const BASE_URL: &str = "https://www.xvideos.com";

/// Driver for the Xvideos platform.
pub struct XvideosDriver;

fn video_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/video(\d+)/").expect("valid video id regex"))
}

impl SourceDriver for XvideosDriver {
    fn source(&self) -> Source {
        Source::Xvideos
    }

    fn search_url(&self, query: &str, page: u32) -> String {
        let page = page.max(1) - 1;
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("k", query.trim())
            .append_pair("p", &page.to_string())
            .finish();
        format!("{BASE_URL}/?{params}")
    }

    fn extract(&self, html: &str) -> Result<Vec<VideoRecord>, SearchError> {
        parse_listing(html)
    }
}

pub(crate) fn parse_listing(html: &str) -> Result<Vec<VideoRecord>, SearchError> {
    let document = Html::parse_document(html);

    let item_sel = selector("div.thumb-block")?;
    let link_sel = selector("a")?;
    let title_sel = selector("p.title")?;
    let img_sel = selector("img")?;
    let metadata_sel = selector("p.metadata")?;

    let mut records = Vec::new();

    for item in document.select(&item_sel) {
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let href = match link.value().attr("href") {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };
        let Some(id) = video_id_re()
            .captures(href)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
        else {
            continue;
        };

        let title = link
            .value()
            .attr("title")
            .map(str::to_string)
            .or_else(|| {
                item.select(&title_sel)
                    .next()
                    .map(|el| el.text().collect::<String>().trim().to_string())
            })
            .filter(|t| !t.is_empty());
        let Some(title) = title else {
            continue;
        };

        let thumb = item.select(&img_sel).next().and_then(|img| {
            img.value()
                .attr("data-src")
                .or_else(|| img.value().attr("src"))
        });
        let Some(thumb) = thumb else {
            continue;
        };

        // Duration sits inside the metadata line, e.g. "1080p - 7:45".
        let duration = item
            .select(&metadata_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(|text| normalize_duration(&text));

        let (Some(url), Some(thumbnail)) =
            (absolute_url(href, BASE_URL), absolute_url(thumb, BASE_URL))
        else {
            continue;
        };

        records.push(VideoRecord {
            id,
            title,
            url,
            thumbnail: Some(thumbnail),
            duration,
            views: None,
            source: Source::Xvideos.slug().to_string(),
            kind: RecordKind::Video,
        });
    }

    tracing::debug!(count = records.len(), "xvideos listing parsed");
    Ok(records)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css)
        .map_err(|e| SearchError::ExtractionFailed(format!("invalid selector {css}: {e:?}")))
}
