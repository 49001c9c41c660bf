//! Views provided by this crate.
//!
//! * [`RefreshView`] is the pull-to-refresh container itself.
//! * [`Indicator`] is the band used as its header and footer.

mod indicator;
mod refresh_view;

pub use self::indicator::Indicator;
pub use self::refresh_view::RefreshView;
