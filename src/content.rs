//! Traits connecting the content view to its refresh container.
use cursive_core::view::scroll::Scroller;
use cursive_core::view::{View, ViewWrapper};
use cursive_core::views::{NamedView, ResizedView, ScrollView};
use cursive_core::Vec2;

/// Supplies the content view of a [`RefreshView`].
///
/// Screens implement this to build their own content (usually a list
/// wrapped in a [`ScrollView`]). It is also implemented for any closure
/// returning a view.
///
/// [`RefreshView`]: crate::views::RefreshView
///
/// # Examples
///
/// ```rust
/// use cursive_core::views::{ScrollView, TextView};
/// use cursive_refresh::{ContentProvider, views::RefreshView};
///
/// struct NewsScreen;
///
/// impl ContentProvider for NewsScreen {
///     type Content = ScrollView<TextView>;
///
///     fn provide(self) -> Self::Content {
///         ScrollView::new(TextView::new("No news yet."))
///     }
/// }
///
/// let view = RefreshView::from_provider(NewsScreen);
/// assert_eq!(view.len(), 3);
/// ```
pub trait ContentProvider {
    /// Type of the provided view.
    type Content: View;

    /// Builds the content view.
    ///
    /// Called exactly once, when the container is created.
    fn provide(self) -> Self::Content;
}

impl<F, V> ContentProvider for F
where
    F: FnOnce() -> V,
    V: View,
{
    type Content = V;

    fn provide(self) -> V {
        self()
    }
}

/// Reports whether a scrollable view reached one of its vertical ends.
///
/// A pull only starts when the content is at the top, and loading more
/// only when it is at the bottom.
pub trait ScrollEdges {
    /// Returns `true` if the first row of the content is visible.
    fn is_at_top(&self) -> bool;

    /// Returns `true` if the last row of the content is visible.
    fn is_at_bottom(&self) -> bool;

    /// Returns `true` if a press at `position` grabs a scrollbar.
    ///
    /// Drags started there belong to the content, and never pull the header.
    fn is_on_scrollbar(&self, position: Vec2) -> bool {
        let _ = position;
        false
    }
}

impl<V: View> ScrollEdges for ScrollView<V> {
    fn is_at_top(&self) -> bool {
        ScrollView::is_at_top(self)
    }

    fn is_at_bottom(&self) -> bool {
        ScrollView::is_at_bottom(self)
    }

    fn is_on_scrollbar(&self, position: Vec2) -> bool {
        let core = self.get_scroller();
        let column = core.last_outer_size().x.saturating_sub(1);

        core.is_enabled().y
            && core.is_scrolling().y
            && position.x == column
            && position.y < core.last_available_size().y
    }
}

impl<V: View + ScrollEdges> ScrollEdges for NamedView<V> {
    fn is_at_top(&self) -> bool {
        self.with_view(V::is_at_top).unwrap_or(false)
    }

    fn is_at_bottom(&self) -> bool {
        self.with_view(V::is_at_bottom).unwrap_or(false)
    }

    fn is_on_scrollbar(&self, position: Vec2) -> bool {
        self.with_view(|v| v.is_on_scrollbar(position))
            .unwrap_or(false)
    }
}

impl<V: View + ScrollEdges> ScrollEdges for ResizedView<V> {
    fn is_at_top(&self) -> bool {
        self.get_inner().is_at_top()
    }

    fn is_at_bottom(&self) -> bool {
        self.get_inner().is_at_bottom()
    }

    fn is_on_scrollbar(&self, position: Vec2) -> bool {
        self.get_inner().is_on_scrollbar(position)
    }
}
