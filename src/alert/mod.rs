pub mod decision;
pub mod notify;

pub use decision::{select_priority, should_alert};
pub use notify::{format_alert_text, AlertPayload, Notifier};
