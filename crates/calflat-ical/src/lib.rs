//! iCalendar engine: classification, recurrence expansion, record projection.
//!
//! This crate turns a parsed calendar into flat [`OutputRecord`]s:
//!
//! ```text
//! components ──▶ classify ──▶ { singles, masters, overrides }
//!                                 │
//!                                 ▼ expand (sanitize + stamp)
//!                          ResolvedOccurrence
//!                                 │
//!                                 ▼ project
//!                            OutputRecord ──▶ sort_and_dedup
//! ```
//!
//! The hard part is recurrence resolution: a recurring VEVENT is a master
//! carrying an RRULE, optionally overridden per instance (RECURRENCE-ID)
//! and thinned by exclusion dates (EXDATE). [`convert_calendar`] runs the
//! whole pipeline for one calendar in one shot; each run owns its own
//! state.
//!
//! [`OutputRecord`]: calflat_core::OutputRecord

pub mod classify;
pub mod component;
pub mod error;
pub mod expand;
pub mod pipeline;
pub mod project;
pub mod sanitize;
pub mod stamp;

pub use classify::{classify, Classified};
pub use component::{EventSource, IcsEvent};
pub use error::{ConvertError, ConvertResult, ExpandError};
pub use expand::{expand, ResolvedOccurrence};
pub use pipeline::{convert_calendar, ConvertOptions};
pub use project::project;
pub use sanitize::sanitize_rrule;
pub use stamp::RawStamp;
