//! Trait definition for pluggable source drivers.
//!
//! Each video source (Pornhub, Xvideos, XNXX, SpankBang, Redtube)
//! implements [`SourceDriver`] to provide a uniform interface for building
//! search-listing URLs and extracting normalized records from fetched HTML.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::SearchError;
use crate::source::Source;
use crate::types::VideoRecord;

/// A pluggable source driver.
///
/// Implementors own everything site-specific:
///
/// - Search URL construction with query encoding and the site's native
///   page-numbering origin (requests are always 1-origin; 0-origin sites
///   translate here, never in the orchestrator)
/// - Listing-markup extraction via CSS selectors
///
/// Extraction skips individual malformed list items and continues; an
/// empty record sequence is a successful result, not an error. All
/// implementations are stateless and `Send + Sync`.
pub trait SourceDriver: Send + Sync {
    /// Returns which [`Source`] this driver serves.
    fn source(&self) -> Source;

    /// Builds the site's search-listing URL for a query and 1-origin page.
    fn search_url(&self, query: &str, page: u32) -> String;

    /// Extracts zero or more well-formed records from a listing page.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ExtractionFailed`] only when the markup is
    /// structurally unusable; malformed individual items are skipped.
    fn extract(&self, html: &str) -> Result<Vec<VideoRecord>, SearchError>;
}

/// Dispatch from a [`Source`] to its driver instance.
///
/// The driver set is closed: every registered source has exactly one
/// static, stateless driver.
pub fn driver_for(source: Source) -> &'static dyn SourceDriver {
    use crate::drivers::{
        PornhubDriver, RedtubeDriver, SpankbangDriver, XnxxDriver, XvideosDriver,
    };

    static PORNHUB: PornhubDriver = PornhubDriver;
    static XVIDEOS: XvideosDriver = XvideosDriver;
    static XNXX: XnxxDriver = XnxxDriver;
    static SPANKBANG: SpankbangDriver = SpankbangDriver;
    static REDTUBE: RedtubeDriver = RedtubeDriver;

    match source {
        Source::Pornhub => &PORNHUB,
        Source::Xvideos => &XVIDEOS,
        Source::Xnxx => &XNXX,
        Source::Spankbang => &SPANKBANG,
        Source::Redtube => &REDTUBE,
    }
}

/// Convert a scraped href to an absolute URL.
///
/// Handles protocol-relative (`//…`), already-absolute, `data:`, and
/// site-relative forms. Returns `None` for empty or unresolvable input.
pub(crate) fn absolute_url(href: &str, base: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("data:") {
        return Some(href.to_string());
    }
    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:(\d{1,2}):)?(\d{1,2}):(\d{2})").expect("valid duration regex")
    })
}

/// Extract and normalize a duration token from raw listing text.
///
/// Accepts text containing `m:ss` or `h:mm:ss` (possibly surrounded by
/// other metadata, e.g. `"1080p - 7:45"`), and returns the bare token with
/// the minute field zero-padded in the hour form. Returns `None` when no
/// duration token is present.
pub(crate) fn normalize_duration(raw: &str) -> Option<String> {
    let caps = duration_re().captures(raw.trim())?;
    let minutes = caps.get(2)?.as_str();
    let seconds = caps.get(3)?.as_str();
    match caps.get(1) {
        Some(hours) => Some(format!(
            "{}:{:0>2}:{}",
            hours.as_str(),
            minutes,
            seconds
        )),
        None => Some(format!("{minutes}:{seconds}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_source_dispatches_to_matching_driver() {
        for &source in Source::all() {
            assert_eq!(driver_for(source).source(), source);
        }
    }

    #[test]
    fn absolute_url_passes_through_absolute() {
        assert_eq!(
            absolute_url("https://example.com/a", "https://base.com"),
            Some("https://example.com/a".to_string())
        );
    }

    #[test]
    fn absolute_url_upgrades_protocol_relative() {
        assert_eq!(
            absolute_url("//cdn.example.com/t.jpg", "https://base.com"),
            Some("https://cdn.example.com/t.jpg".to_string())
        );
    }

    #[test]
    fn absolute_url_joins_relative_against_base() {
        assert_eq!(
            absolute_url("/video123/clip", "https://www.xvideos.com"),
            Some("https://www.xvideos.com/video123/clip".to_string())
        );
    }

    #[test]
    fn absolute_url_keeps_data_urls() {
        let data = "data:image/gif;base64,R0lGOD";
        assert_eq!(
            absolute_url(data, "https://base.com"),
            Some(data.to_string())
        );
    }

    #[test]
    fn absolute_url_rejects_empty() {
        assert_eq!(absolute_url("", "https://base.com"), None);
        assert_eq!(absolute_url("   ", "https://base.com"), None);
    }

    #[test]
    fn duration_plain_token() {
        assert_eq!(normalize_duration("12:34"), Some("12:34".to_string()));
        assert_eq!(normalize_duration("7:05"), Some("7:05".to_string()));
    }

    #[test]
    fn duration_with_hours_pads_minutes() {
        assert_eq!(normalize_duration("1:2:03"), Some("1:02:03".to_string()));
        assert_eq!(normalize_duration("2:15:00"), Some("2:15:00".to_string()));
    }

    #[test]
    fn duration_embedded_in_metadata_text() {
        assert_eq!(
            normalize_duration("1080p - 7:45 - 12k views"),
            Some("7:45".to_string())
        );
    }

    #[test]
    fn duration_absent_returns_none() {
        assert_eq!(normalize_duration("N/A"), None);
        assert_eq!(normalize_duration(""), None);
        assert_eq!(normalize_duration("12 min"), None);
    }
}
