//! Core types: expansion window, output records, links, text cleanup

pub mod contact;
pub mod links;
pub mod record;
pub mod text;
pub mod time;
pub mod tracing;

pub use contact::Mailbox;
pub use links::{ConferenceFinder, DEFAULT_LINK_PATTERNS};
pub use record::{sort_and_dedup, OutputRecord};
pub use text::clean_description;
pub use time::{ExpansionWindow, DEFAULT_FUTURE_DAYS, DEFAULT_PAST_DAYS};
pub use tracing::{init_tracing, TracingConfig, TracingError};
