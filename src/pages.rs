//! Web UI page paths
//!
//! The dashboard can be served under a path prefix (e.g. behind a reverse
//! proxy). The prefix is whatever precedes the page segment.

/// Page segments the dashboard routes to
pub const PAGE_SEGMENTS: [&str; 3] = ["/oview", "/detail", "/experiment"];

/// Path prefix the dashboard is served under, if any
///
/// `"/nni/oview"` → `Some("/nni")`, `"/oview"` → `None`. Paths that do not end
/// in a page segment are returned unchanged.
pub fn path_prefix(path: &str) -> Option<&str> {
    let prefix = PAGE_SEGMENTS
        .iter()
        .find_map(|segment| path.strip_suffix(segment))
        .unwrap_or(path);
    (!prefix.is_empty()).then_some(prefix)
}

/// Whether the path points at the experiment management page
pub fn is_manager_experiment_page(path: &str) -> bool {
    path.contains("experiment")
}
