//! Redtube source driver.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::form_urlencoded;

use crate::driver::{absolute_url, normalize_duration, SourceDriver};
use crate::error::SearchError;
use crate::source::Source;
use crate::types::{RecordKind, VideoRecord};

const BASE_URL: &str = "https://www.redtube.com";

/// Driver for the Redtube platform.
pub struct RedtubeDriver;

fn video_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d+)").expect("valid video id regex"))
}

impl SourceDriver for RedtubeDriver {
    fn source(&self) -> Source {
        Source::Redtube
    }

    fn search_url(&self, query: &str, page: u32) -> String {
        let page = page.max(self.source().first_page());
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("search", query.trim())
            .append_pair("page", &page.to_string())
            .finish();
        format!("{BASE_URL}/?{params}")
    }

    fn extract(&self, html: &str) -> Result<Vec<VideoRecord>, SearchError> {
        parse_listing(html)
    }
}

pub(crate) fn parse_listing(html: &str) -> Result<Vec<VideoRecord>, SearchError> {
    let document = Html::parse_document(html);

    let item_sel = selector("li.video_li")?;
    let link_sel = selector("a.video_link")?;
    let img_sel = selector("img")?;
    let duration_sel = selector("span.duration")?;

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
            source: Source::Redtube.slug().to_string(),
            kind: RecordKind::Video,
        });
    }

    tracing::debug!(count = records.len(), "redtube listing parsed");
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
<li class="video_li">
    <a class="video_link" href="/176170791" title="Clip A">
        <img data-src="https://wi-ph.rdtcdn.com/t1.jpg" />
    </a>
    <span class="duration">10:30</span>
</li>
<li class="video_li">
    <a class="video_link" href="/176170792" title="Clip B">
        <img src="https://wi-ph.rdtcdn.com/t2.jpg" />
    </a>
</li>
<li class="video_li">
    <a href="/category/top" title="No video_link class">
        <img data-src="https://wi-ph.rdtcdn.com/t3.jpg" />
    </a>
</li>
</body></html>"#;

    #[test]
    fn parses_video_links() {
        let records = parse_listing(MOCK_LISTING).expect("should parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "176170791");
        assert_eq!(records[0].url, "https://www.redtube.com/176170791");
        assert_eq!(records[0].duration.as_deref(), Some("10:30"));
        assert_eq!(records[1].id, "176170792");
        assert_eq!(records[1].duration, None);
    }

    #[test]
    fn items_without_video_link_class_skipped() {
        let records = parse_listing(MOCK_LISTING).expect("should parse");
        assert!(records.iter().all(|r| !r.url.contains("category")));
    }

    #[test]
    fn search_url_uses_query_params() {
        let driver = RedtubeDriver;
        assert_eq!(
            driver.search_url("test", 1),
            "https://www.redtube.com/?search=test&page=1"
        );
        assert_eq!(
            driver.search_url("two words", 5),
            "https://www.redtube.com/?search=two+words&page=5"
        );
    }
}
