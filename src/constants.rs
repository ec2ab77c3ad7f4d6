pub const LEDGER_KEY: &str = "ppd_contact_submissions";

pub const RATE_LIMIT_WINDOW_MS: i64 = 10 * 60 * 1000;
pub const RATE_LIMIT_MAX: usize = 3;

pub const MIN_ELAPSED_MS: i64 = 2_000;

pub const MESSAGE_MIN_CHARS: usize = 20;
pub const MESSAGE_MAX_CHARS: usize = 2_000;
