//! The closed set of video sources this engine can query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered video source, in registration order.
///
/// The enum is the single authority on source identity: the wire slug,
/// the human-readable driver name, and the site's native page-numbering
/// origin all live here. Registration order (the order of [`Source::all`])
/// determines the ordering of merged search results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Pornhub — `div.phimage` listing markup, 1-origin pagination.
    Pornhub,
    /// Xvideos — `div.thumb-block` listing markup, 0-origin pagination.
    Xvideos,
    /// XNXX — path-segment search URLs, 0-origin pagination.
    Xnxx,
    /// SpankBang — path-segment search URLs, 1-origin pagination.
    Spankbang,
    /// Redtube — `li.video_li` listing markup, 1-origin pagination.
    Redtube,
}

impl Source {
    /// Returns the stable lowercase slug used as map key and API value.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Pornhub => "pornhub",
            Self::Xvideos => "xvideos",
            Self::Xnxx => "xnxx",
            Self::Spankbang => "spankbang",
            Self::Redtube => "redtube",
        }
    }

    /// Returns the human-readable driver name for this source.
    pub fn driver_name(&self) -> &'static str {
        match self {
            Self::Pornhub => "Pornhub",
            Self::Xvideos => "Xvideos",
            Self::Xnxx => "XNXX",
            Self::Spankbang => "SpankBang",
            Self::Redtube => "Redtube",
        }
    }

    /// The page number this site's listing starts at.
    ///
    /// Requests are always 1-origin; drivers for 0-origin sites translate.
    pub fn first_page(&self) -> u32 {
        match self {
            Self::Xvideos | Self::Xnxx => 0,
            _ => 1,
        }
    }

    /// Returns all registered sources in registration order.
    pub fn all() -> &'static [Source] {
        &[
            Self::Pornhub,
            Self::Xvideos,
            Self::Xnxx,
            Self::Spankbang,
            Self::Redtube,
        ]
    }

    /// Looks up a source by its slug. Slugs are lowercase; lookup is exact.
    pub fn from_slug(slug: &str) -> Option<Source> {
        Self::all().iter().copied().find(|s| s.slug() == slug)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
