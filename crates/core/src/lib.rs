//! Datepill Core
//!
//! Finds inline `📅 YYYY-MM-DD [HH:mm]` tokens in document text and
//! renders them as relative-time "pill" labels, color-coded by how
//! close the date is to now. Runs inside a document-editing host; the
//! host contract lives in `datepill-host-api`.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use datepill_core::{classify, scan, Bucket};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 10)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//!
//! let token = scan("Pay rent 📅 2024-06-11").next().unwrap();
//! let class = classify(token.date, token.time, now).unwrap();
//! assert_eq!(class.bucket, Bucket::Tomorrow);
//! assert_eq!(class.label, "Tomorrow");
//! ```
//!
//! # Surfaces
//!
//! The same scan-classify-replace contract renders on two surfaces:
//!
//! - [`DateHighlighter`] decorates the live editing viewport, skipping
//!   the token under the cursor so it stays editable.
//! - [`render::reader`] rewrites rendered task lists with static pills
//!   and keeps their strike-through state in step with checkbox
//!   toggles.
//!
//! Tokens that lexically match but name an impossible date
//! (`📅 2024-13-45`) are left untouched on both surfaces; the engine
//! never fails on user content.

pub mod classify;
pub mod plugin;
pub mod render;
pub mod scanner;
pub mod settings;
pub mod style;

pub use classify::{classify, Bucket, Classification};
pub use plugin::DatePillPlugin;
pub use render::editor::{DateHighlighter, PillWidget};
pub use scanner::{scan, DateToken};
pub use settings::{PillSettings, SettingsError};
pub use style::PillColors;
