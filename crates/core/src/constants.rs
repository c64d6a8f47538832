/// Currency used when a wish does not name one
pub const DEFAULT_CURRENCY: &str = "MNT";

/// Owner used when a stored row predates owner tracking
pub const DEFAULT_OWNER: &str = "Munhu";

/// Title given to imported rows that have none
pub const UNTITLED_WISH: &str = "Untitled";

/// Public path prefix under which uploaded files are served
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Timestamp layout used in CSV interchange (matches SQLite CURRENT_TIMESTAMP)
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
