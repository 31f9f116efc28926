//! SpankBang source driver.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::driver::{absolute_url, normalize_duration, SourceDriver};
use crate::error::SearchError;
use crate::source::Source;
use crate::types::{RecordKind, VideoRecord};

const BASE_URL: &str = "https://spankbang.com";

/// Driver for the SpankBang platform.
pub struct SpankbangDriver;

fn video_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/([a-z0-9_-]+)/video/").expect("valid video id regex"))
}

impl SourceDriver for SpankbangDriver {
    fn source(&self) -> Source {
        Source::Spankbang
    }

    fn search_url(&self, query: &str, page: u32) -> String {
        let page = page.max(self.source().first_page());
        let query = urlencoding::encode(query.trim());
        format!("{BASE_URL}/s/{query}/{page}/")
    }

    fn extract(&self, html: &str) -> Result<Vec<VideoRecord>, SearchError> {
        parse_listing(html)
    }
}

pub(crate) fn parse_listing(html: &str) -> Result<Vec<VideoRecord>, SearchError> {
    let document = Html::parse_document(html);

    let item_sel = selector("div.video-item")?;
    let link_sel = selector("a")?;
    let img_sel = selector("img")?;
    let duration_sel = selector("span.l")?;

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
            source: Source::Spankbang.slug().to_string(),
            kind: RecordKind::Video,
        });
    }

    tracing::debug!(count = records.len(), "spankbang listing parsed");
    Ok(records)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css)
        .map_err(|e| SearchError::ExtractionFailed(format!("invalid selector {css}: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_LISTING: &str = r#"<html><body>
<div class="video-item">
    <a href="/4abc9/video/first+clip" title="First Clip">
        <img data-src="https://tbi.sb-cd.com/t1.jpg" />
        <span class="l">8:00</span>
    </a>
</div>
<div class="video-item">
    <a href="/7def2/video/second+clip" title="Second Clip">
        <img src="/static/t2.jpg" />
        <span class="l">1:12:45</span>
    </a>
</div>
<div class="video-item">
    <a href="/playlist/99" title="A Playlist">
        <img data-src="https://tbi.sb-cd.com/t3.jpg" />
    </a>
</div>
</body></html>"#;

    #[test]
    fn parses_items_and_durations() {
        let records = parse_listing(MOCK_LISTING).expect("should parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "4abc9");
        assert_eq!(records[0].url, "https://spankbang.com/4abc9/video/first+clip");
        assert_eq!(records[0].duration.as_deref(), Some("8:00"));
        assert_eq!(records[1].duration.as_deref(), Some("1:12:45"));
        assert_eq!(
            records[1].thumbnail.as_deref(),
            Some("https://spankbang.com/static/t2.jpg")
        );
    }

    #[test]
    fn playlist_links_skipped() {
        let records = parse_listing(MOCK_LISTING).expect("should parse");
        assert!(records.iter().all(|r| !r.url.contains("playlist")));
    }

    #[test]
    fn search_url_keeps_one_origin() {
        let driver = SpankbangDriver;
        assert_eq!(
            driver.search_url("hot query", 1),
            "https://spankbang.com/s/hot%20query/1/"
        );
        assert_eq!(driver.search_url("q", 0), "https://spankbang.com/s/q/1/");
    }
}
