//! Pornhub source driver.
//!
//! Search listings live under `/video/search` with standard query
//! parameters and 1-origin pagination. Listing items are `div.phimage`
//! blocks; placeholder thumbnails (`nothumb`) mark dead entries and are
//! skipped.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::form_urlencoded;

use crate::driver::{absolute_url, normalize_duration, SourceDriver};
use crate::error::SearchError;
use crate::source::Source;
use crate::types::{RecordKind, VideoRecord};

const BASE_URL: &str = "https://www.pornhub.com";

/// Driver for the Pornhub video platform.
pub struct PornhubDriver;

fn viewkey_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"viewkey=([A-Za-z0-9]+)").expect("valid viewkey regex"))
}

impl SourceDriver for PornhubDriver {
    fn source(&self) -> Source {
        Source::Pornhub
    }

    fn search_url(&self, query: &str, page: u32) -> String {
        let page = page.max(self.source().first_page());
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("search", query.trim())
            .append_pair("page", &page.to_string())
            .finish();
        format!("{BASE_URL}/video/search?{params}")
    }

    fn extract(&self, html: &str) -> Result<Vec<VideoRecord>, SearchError> {
        parse_listing(html)
    }
}

/// Parse a Pornhub search-listing page into records.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_listing(html: &str) -> Result<Vec<VideoRecord>, SearchError> {
    let document = Html::parse_document(html);

    let item_sel = selector("div.phimage")?;
    let link_sel = selector("a")?;
    let title_sel = selector("span.title")?;
    let img_sel = selector("img")?;
    let duration_sel = selector("var.duration, span.duration")?;

    let mut records = Vec::new();

    for item in document.select(&item_sel) {
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let href = match link.value().attr("href") {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };
        let Some(id) = viewkey_re()
            .captures(href)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
        else {
            tracing::trace!(href, "pornhub: item without viewkey skipped");
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
        if thumb.contains("nothumb") {
            continue;
        }

        let duration = item
            .select(&duration_sel)
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
            source: Source::Pornhub.slug().to_string(),
            kind: RecordKind::Video,
        });
    }

    tracing::debug!(count = records.len(), "pornhub listing parsed");
    Ok(records)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css)
        .map_err(|e| SearchError::ExtractionFailed(format!("invalid selector {css}: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_LISTING: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="phimage">
    <a href="/view_video.php?viewkey=ph5fa1b2c3" title="First Clip">
        <img data-src="https://ei.phncdn.com/videos/a1/thumb.jpg" />
    </a>
    <var class="duration">12:34</var>
</div>
<div class="phimage">
    <a href="/view_video.php?viewkey=ph64d9e8f7">
        <span class="title">Second Clip</span>
        <img src="//ei.phncdn.com/videos/b2/thumb.jpg" />
    </a>
    <span class="duration">3:05</span>
</div>
<div class="phimage">
    <a href="/view_video.php?viewkey=ph00000000" title="Dead Entry">
        <img data-src="https://ei.phncdn.com/nothumb.jpg" />
    </a>
</div>
<div class="phimage">
    <a href="/playlists/trending" title="Not A Video">
        <img data-src="https://ei.phncdn.com/videos/c3/thumb.jpg" />
    </a>
</div>
</body>
</html>"#;

    #[test]
    fn parses_well_formed_items() {
        let records = parse_listing(MOCK_LISTING).expect("should parse");
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, "ph5fa1b2c3");
        assert_eq!(records[0].title, "First Clip");
        assert_eq!(
            records[0].url,
            "https://www.pornhub.com/view_video.php?viewkey=ph5fa1b2c3"
        );
        assert_eq!(
            records[0].thumbnail.as_deref(),
            Some("https://ei.phncdn.com/videos/a1/thumb.jpg")
        );
        assert_eq!(records[0].duration.as_deref(), Some("12:34"));
        assert_eq!(records[0].source, "pornhub");
        assert_eq!(records[0].kind, RecordKind::Video);
    }

    #[test]
    fn title_falls_back_to_span() {
        let records = parse_listing(MOCK_LISTING).expect("should parse");
        assert_eq!(records[1].title, "Second Clip");
        assert_eq!(records[1].duration.as_deref(), Some("3:05"));
        // Protocol-relative thumbnail upgraded to https.
        assert_eq!(
            records[1].thumbnail.as_deref(),
            Some("https://ei.phncdn.com/videos/b2/thumb.jpg")
        );
    }

    #[test]
    fn placeholder_thumbnails_and_non_video_links_skipped() {
        let records = parse_listing(MOCK_LISTING).expect("should parse");
        assert!(records.iter().all(|r| r.id != "ph00000000"));
        assert!(records.iter().all(|r| !r.url.contains("playlists")));
    }

    #[test]
    fn empty_html_yields_empty() {
        let records = parse_listing("<html><body></body></html>").expect("should parse");
        assert!(records.is_empty());
    }

    #[test]
    fn search_url_encodes_query_and_page() {
        let driver = PornhubDriver;
        assert_eq!(
            driver.search_url("hot query", 2),
            "https://www.pornhub.com/video/search?search=hot+query&page=2"
        );
    }

    #[test]
    fn search_url_clamps_page_to_origin() {
        let driver = PornhubDriver;
        assert!(driver.search_url("q", 0).ends_with("page=1"));
    }
}
