pub const AUTHORIZATION: &str = "Authorization";
pub const MESSAGE_INVALID_TOKEN: &str = "Could not validate credentials";

// Paths served without a bearer token.
pub const IGNORE_ROUTES: [&str; 3] = ["/auth/register", "/auth/token", "/health"];

pub const DEFAULT_TOKEN_EXPIRY_MINUTES: i64 = 30;
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

// The dashboard reads "all" transactions through one bounded fetch.
pub const DASHBOARD_TRANSACTION_LIMIT: i64 = 10_000;
pub const SERIES_MONTHS: usize = 6;
