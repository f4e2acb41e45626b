//! The API endpoints URIs.

/// The root route which confirms the server is running.
pub const ROOT: &str = "/";
/// The route that replaces the stored sale records with the seed dataset.
pub const SEED_DATABASE: &str = "/seed-database";
/// The route for a page of a month's sale records.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for a month's sale totals.
pub const STATISTICS: &str = "/statistics";
/// The route for a month's record counts per price range.
pub const BAR_CHART: &str = "/bar-chart";
/// The route for a month's record counts per category.
pub const PIE_CHART: &str = "/pie-chart";
/// The route for every section of a month's report in one response.
pub const COMBINED: &str = "/combined";
/// The page that shows a month's report as HTML.
pub const DASHBOARD_VIEW: &str = "/dashboard";
