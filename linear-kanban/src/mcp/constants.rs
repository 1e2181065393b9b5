//! Default limits and truncation budgets for MCP operations

/// Default `limit` for issue listings
pub const DEFAULT_ISSUE_LIMIT: usize = 50;
/// Default `limit` for issue search
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
/// Default `limit` for project update listings
pub const DEFAULT_PROJECT_UPDATE_LIMIT: usize = 10;
/// Default `limit` for milestone listings
pub const DEFAULT_MILESTONE_LIMIT: usize = 50;
/// Default `limit` for the issues of a milestone
pub const DEFAULT_MILESTONE_ISSUE_LIMIT: usize = 50;

/// Recent updates embedded in project details
pub const PROJECT_DETAIL_UPDATES: usize = 5;
/// Issues embedded in milestone details
pub const MILESTONE_DETAIL_ISSUES: usize = 20;

/// Issues in the `linear://issues` snapshot
pub const RESOURCE_ISSUE_COUNT: usize = 50;
/// Milestones in the `linear://milestones` snapshot
pub const RESOURCE_MILESTONE_COUNT: usize = 50;
/// Projects sampled by the `linear://project-updates` snapshot
pub const RESOURCE_UPDATE_PROJECTS: usize = 5;
/// Updates fetched per sampled project
pub const RESOURCE_UPDATES_PER_PROJECT: usize = 3;
/// Cap on the merged `linear://project-updates` snapshot
pub const RESOURCE_UPDATE_CAP: usize = 10;

/// Issue descriptions in listings, update bodies in project details
pub const LISTING_TEXT_BUDGET: usize = 300;
/// Issue descriptions in search hits
pub const SEARCH_TEXT_BUDGET: usize = 200;
/// Update bodies in the project-updates snapshot
pub const RESOURCE_TEXT_BUDGET: usize = 500;

/// State name reported when an issue's state is absent
pub const UNKNOWN_STATE: &str = "Unknown";
