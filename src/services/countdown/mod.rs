mod engine;
mod livestream;
mod resend;

pub use engine::{
    card_countdown, format_remaining, CountdownEngine, CARD_PENDING_PREFIX, CARD_STARTED_TEXT,
    DEFAULT_ELAPSED_TEXT, DEFAULT_LIVE_TEXT,
};
pub use livestream::{livestream_status, LivestreamStatus};
pub use resend::{ResendCountdown, ResendSnapshot};
