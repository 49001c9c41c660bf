//! # Cursive-refresh
//!
//! Pull-to-refresh and load-more for the Cursive TUI.
//!
//! A [`RefreshView`] wraps a scrollable content view (usually a
//! [`ScrollView`]) between a header and a footer:
//!
//! * Dragging the content down with the mouse while it is scrolled to the
//!   top reveals the header. Releasing past half its height refreshes.
//! * Scrolling past the bottom of the content loads more.
//!
//! The header and footer are configured through a [`RefreshStyle`].
//!
//! [`RefreshView`]: views::RefreshView
//! [`ScrollView`]: cursive_core::views::ScrollView
//! [`RefreshStyle`]: style::RefreshStyle
//!
//! ## Logging
//!
//! Status changes are reported through the [`log`] crate. Use
//! `cursive::logger::init()` and the debug console to see them.
//!
//! [`log`]: https://docs.rs/log
#![deny(missing_docs)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod pull;
pub mod status;
pub mod style;
pub mod views;

mod content;

pub use self::content::{ContentProvider, ScrollEdges};
pub use self::status::RefreshStatus;
