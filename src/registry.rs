//! Runtime registry of sources and their enabled state.
//!
//! The registry is the single process-wide mutable source-state component.
//! All reads and mutations go through one [`RwLock`]; callers never see the
//! raw state.

use std::sync::{PoisonError, RwLock};

use serde::Serialize;

use crate::error::SearchError;
use crate::source::Source;
use crate::types::ALL_SOURCES;

/// Wire view of one registry entry.
#[derive(Debug, Clone, Serialize)]
pub struct SourceDescriptor {
    /// Stable lowercase slug.
    pub name: String,
    /// Human-readable driver name.
    pub driver_name: String,
    /// Whether the source is currently eligible for searches.
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy)]
struct SourceState {
    source: Source,
    enabled: bool,
}

/// Thread-safe registry of the known sources, in registration order.
///
/// Created once at process start with every source enabled; mutated only
/// via [`SourceRegistry::set_enabled`] / [`SourceRegistry::toggle`].
#[derive(Debug)]
pub struct SourceRegistry {
    states: RwLock<Vec<SourceState>>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRegistry {
    /// Create a registry with all registered sources enabled.
    pub fn new() -> Self {
        let states = Source::all()
            .iter()
            .map(|&source| SourceState {
                source,
                enabled: true,
            })
            .collect();
        Self {
            states: RwLock::new(states),
        }
    }

    /// List all sources in registration order.
    pub fn list(&self) -> Vec<SourceDescriptor> {
        let states = self
            .states
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        states
            .iter()
            .map(|st| SourceDescriptor {
                name: st.source.slug().to_string(),
                driver_name: st.source.driver_name().to_string(),
                enabled: st.enabled,
            })
            .collect()
    }

    /// Resolve a selection into the sorted set of enabled sources.
    ///
    /// The `"all"` sentinel (anywhere in the selection) yields every
    /// currently-enabled source. An explicit selection is intersected with
    /// the enabled set; slugs naming unknown or disabled sources are
    /// silently dropped — an empty result is valid and means "nothing
    /// eligible".
    pub fn resolve(&self, selection: &[String]) -> Vec<Source> {
        let states = self
            .states
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let want_all = selection.iter().any(|s| s == ALL_SOURCES);

        let mut resolved: Vec<Source> = states
            .iter()
            .filter(|st| st.enabled)
            .filter(|st| want_all || selection.iter().any(|slug| slug == st.source.slug()))
            .map(|st| st.source)
            .collect();
        resolved.sort_unstable_by_key(|s| s.slug());
        resolved
    }

    /// Returns whether a source is currently enabled.
    pub fn is_enabled(&self, source: Source) -> bool {
        let states = self
            .states
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        states
            .iter()
            .find(|st| st.source == source)
            .is_some_and(|st| st.enabled)
    }

    /// Set a source's enabled flag, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownSource`] if `slug` is not registered.
    pub fn set_enabled(&self, slug: &str, enabled: bool) -> Result<bool, SearchError> {
        let mut states = self
            .states
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let state = states
            .iter_mut()
            .find(|st| st.source.slug() == slug)
            .ok_or_else(|| SearchError::UnknownSource(slug.to_string()))?;
        state.enabled = enabled;
        tracing::info!(source = slug, enabled, "source state changed");
        Ok(enabled)
    }

    /// Flip a source's enabled flag, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownSource`] if `slug` is not registered.
    pub fn toggle(&self, slug: &str) -> Result<bool, SearchError> {
        let mut states = self
            .states
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let state = states
            .iter_mut()
            .find(|st| st.source.slug() == slug)
            .ok_or_else(|| SearchError::UnknownSource(slug.to_string()))?;
        state.enabled = !state.enabled;
        tracing::info!(source = slug, enabled = state.enabled, "source toggled");
        Ok(state.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(sources: &[Source]) -> Vec<&'static str> {
        sources.iter().map(|s| s.slug()).collect()
    }

    #[test]
    fn new_registry_lists_all_enabled_in_registration_order() {
        let registry = SourceRegistry::new();
        let descriptors = registry.list();
        assert_eq!(descriptors.len(), Source::all().len());
        assert!(descriptors.iter().all(|d| d.enabled));
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["pornhub", "xvideos", "xnxx", "spankbang", "redtube"]
        );
        assert_eq!(descriptors[0].driver_name, "Pornhub");
        assert_eq!(descriptors[2].driver_name, "XNXX");
    }

    #[test]
    fn resolve_all_sentinel_yields_sorted_enabled_set() {
        let registry = SourceRegistry::new();
        let resolved = registry.resolve(&["all".to_string()]);
        assert_eq!(
            slugs(&resolved),
            vec!["pornhub", "redtube", "spankbang", "xnxx", "xvideos"]
        );
    }

    #[test]
    fn resolve_explicit_selection_intersects() {
        let registry = SourceRegistry::new();
        let resolved = registry.resolve(&["xvideos".to_string(), "pornhub".to_string()]);
        assert_eq!(slugs(&resolved), vec!["pornhub", "xvideos"]);
    }

    #[test]
    fn resolve_drops_unknown_slugs_silently() {
        let registry = SourceRegistry::new();
        let resolved = registry.resolve(&["pornhub".to_string(), "dailymotion".to_string()]);
        assert_eq!(slugs(&resolved), vec!["pornhub"]);
    }

    #[test]
    fn resolve_drops_disabled_sources() {
        let registry = SourceRegistry::new();
        registry.set_enabled("xvideos", false).expect("known slug");
        let resolved = registry.resolve(&["all".to_string()]);
        assert!(!resolved.contains(&Source::Xvideos));
        assert_eq!(resolved.len(), Source::all().len() - 1);
    }

    #[test]
    fn resolve_only_disabled_selection_is_empty() {
        let registry = SourceRegistry::new();
        registry.set_enabled("redtube", false).expect("known slug");
        let resolved = registry.resolve(&["redtube".to_string()]);
        assert!(resolved.is_empty());
    }

    #[test]
    fn set_enabled_unknown_slug_fails() {
        let registry = SourceRegistry::new();
        let err = registry.set_enabled("dailymotion", true).unwrap_err();
        assert!(matches!(err, SearchError::UnknownSource(_)));
    }

    #[test]
    fn toggle_flips_and_reports_new_state() {
        let registry = SourceRegistry::new();
        assert!(!registry.toggle("pornhub").expect("known slug"));
        assert!(!registry.is_enabled(Source::Pornhub));
        assert!(registry.toggle("pornhub").expect("known slug"));
        assert!(registry.is_enabled(Source::Pornhub));
    }

    #[test]
    fn toggle_unknown_slug_fails() {
        let registry = SourceRegistry::new();
        let err = registry.toggle("vimeo").unwrap_err();
        assert_eq!(err.to_string(), "unknown source: vimeo");
    }

    #[test]
    fn toggle_does_not_affect_other_sources() {
        let registry = SourceRegistry::new();
        registry.toggle("xnxx").expect("known slug");
        assert!(registry.is_enabled(Source::Pornhub));
        assert!(registry.is_enabled(Source::Xvideos));
        assert!(!registry.is_enabled(Source::Xnxx));
    }
}
