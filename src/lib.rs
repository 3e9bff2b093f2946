//! waypost — table-of-contents extraction and scroll tracking for
//! rendered articles.
//!
//! The core is [`toc::TocController`]: mounted over an in-memory
//! [`page::Page`], it builds a navigation list from the page's
//! heading structure and keeps exactly one entry highlighted as the
//! viewport scrolls, with recomputation coalesced to one per
//! animation frame. The rest of the crate feeds it: byte-level
//! scanners that lift headings out of Markdown and rendered-HTML
//! article files, a simulated page builder, and a small CLI.

pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod page;
pub mod scan;
pub mod toc;
pub mod types;

pub use config::Config;
pub use error::WaypostError;
pub use page::{NodeId, Page, PageRefs};
pub use toc::{Reaction, TocController, TocEvent};
pub use types::{HeadingLevel, NavEntry, ScannedHeading};
