/// Query parameter selecting the output encoding
pub const OUTPUT_PARAM: &str = "output";

/// Query parameter selecting the 1-indexed page
pub const PAGE_PARAM: &str = "page";

// =============================================================================
// API KEY
// =============================================================================

/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "api-key";

/// Header carrying the API key when it is not in the query string
pub const API_KEY_HEADER: &str = "x-api-key";

// =============================================================================
// PAGINATION HEADERS
// =============================================================================

/// Total number of records across all pages
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Number of pages at the current page limit
pub const PAGE_COUNT_HEADER: &str = "x-page-count";
