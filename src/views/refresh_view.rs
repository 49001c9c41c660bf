use crate::content::{ContentProvider, ScrollEdges};
use crate::pull::{PullState, Release};
use crate::status::RefreshStatus;
use crate::style::RefreshStyle;
use crate::views::Indicator;
use cursive_core::direction::Direction;
use cursive_core::event::{AnyCb, Event, EventResult, Key, MouseButton, MouseEvent};
use cursive_core::view::{CannotFocus, Selector, View, ViewNotFound};
use cursive_core::{Cursive, Printer, Rect, Vec2, With};
use log::debug;
use std::sync::Arc;

type RefreshCallback = dyn Fn(&mut Cursive) + Send + Sync;

/// Container adding pull-to-refresh and load-more to a scrollable view.
///
/// It stacks three children from top to bottom: a header, the content and a
/// footer. At rest only the content is visible. Dragging the content down
/// with the mouse while it is scrolled to the top reveals the header;
/// releasing it once at least half of the header is visible starts a
/// refresh. Scrolling further down once the content reached its bottom
/// starts loading more.
///
/// The application is told through the [`on_refresh`] and [`on_load_more`]
/// callbacks, and reports completion with [`finish_refreshing`] and
/// [`finish_loading`].
///
/// [`on_refresh`]: RefreshView::on_refresh
/// [`on_load_more`]: RefreshView::on_load_more
/// [`finish_refreshing`]: RefreshView::finish_refreshing
/// [`finish_loading`]: RefreshView::finish_loading
///
/// # Examples
///
/// ```rust
/// use cursive_core::views::{ScrollView, TextView};
/// use cursive_refresh::views::RefreshView;
///
/// let view = RefreshView::new(ScrollView::new(TextView::new("Hello")))
///     .on_refresh(|s| {
///         s.call_on_name("feed", |v: &mut RefreshView<ScrollView<TextView>>| {
///             v.finish_refreshing();
///         });
///     })
///     .on_load_more(|_| ());
/// ```
pub struct RefreshView<V> {
    header: Indicator,
    content: V,
    footer: Indicator,

    style: RefreshStyle,
    pull: PullState,

    // Row where the current left-button drag started, in our coordinates.
    drag_anchor: Option<usize>,

    // Size given to the last layout.
    last_size: Vec2,
    invalidated: bool,

    on_refresh: Option<Arc<RefreshCallback>>,
    on_load_more: Option<Arc<RefreshCallback>>,
}

impl<V> RefreshView<V> {
    /// Creates a new refresh view around `content`, with the default style.
    pub fn new(content: V) -> Self {
        Self::with_style(content, RefreshStyle::default())
    }

    /// Creates a new refresh view, asking `provider` for its content.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: ContentProvider<Content = V>,
    {
        Self::new(provider.provide())
    }

    /// Creates a new refresh view around `content`, with the given style.
    pub fn with_style(content: V, style: RefreshStyle) -> Self {
        let status = RefreshStatus::Idle;

        // Children are composed in order: header, content, footer.
        let header = Indicator::new(
            style.header_label(status),
            style.header_color(),
            style.header_height(),
        );
        let footer = Indicator::new(
            style.footer_label(status),
            style.footer_color(),
            style.footer_height(),
        );

        let mut pull = PullState::new(style.threshold());
        pull.set_header_height(style.header_height());

        RefreshView {
            header,
            content,
            footer,
            style,
            pull,
            drag_anchor: None,
            last_size: Vec2::zero(),
            invalidated: true,
            on_refresh: None,
            on_load_more: None,
        }
    }

    /// Returns the current style.
    pub fn style(&self) -> &RefreshStyle {
        &self.style
    }

    /// Replaces the style, updating the header and footer.
    pub fn set_style(&mut self, style: RefreshStyle) {
        self.header.set_color(style.header_color());
        self.header.set_height(style.header_height());
        self.footer.set_color(style.footer_color());
        self.footer.set_height(style.footer_height());
        self.pull.set_threshold(style.threshold());
        self.pull.set_header_height(style.header_height());
        self.style = style;
        self.sync_indicators();
        self.invalidated = true;
    }

    /// Replaces the style.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn styled(self, style: RefreshStyle) -> Self {
        self.with(|s| s.set_style(style))
    }

    /// Sets a callback to be run when a refresh starts.
    pub fn set_on_refresh<F>(&mut self, cb: F)
    where
        F: Fn(&mut Cursive) + 'static + Send + Sync,
    {
        self.on_refresh = Some(Arc::new(cb));
    }

    /// Sets a callback to be run when a refresh starts.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn on_refresh<F>(self, cb: F) -> Self
    where
        F: Fn(&mut Cursive) + 'static + Send + Sync,
    {
        self.with(|s| s.set_on_refresh(cb))
    }

    /// Sets a callback to be run when loading more starts.
    pub fn set_on_load_more<F>(&mut self, cb: F)
    where
        F: Fn(&mut Cursive) + 'static + Send + Sync,
    {
        self.on_load_more = Some(Arc::new(cb));
    }

    /// Sets a callback to be run when loading more starts.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn on_load_more<F>(self, cb: F) -> Self
    where
        F: Fn(&mut Cursive) + 'static + Send + Sync,
    {
        self.with(|s| s.set_on_load_more(cb))
    }

    /// Returns the current status.
    pub fn status(&self) -> RefreshStatus {
        self.pull.status()
    }

    /// Returns how many rows of the header are visible.
    pub fn current_offset(&self) -> usize {
        self.pull.offset()
    }

    /// Starts a refresh, as if the user pulled the header.
    ///
    /// Returns the refresh callback, or `EventResult::Ignored` if the view
    /// was not idle.
    pub fn refresh(&mut self) -> EventResult {
        if !self.pull.start_refreshing() {
            return EventResult::Ignored;
        }
        self.sync_indicators();
        callback_result(&self.on_refresh)
    }

    /// Marks the current refresh as done, and hides the header.
    pub fn finish_refreshing(&mut self) {
        if self.status() == RefreshStatus::Refreshing {
            self.pull.finish();
            self.collapse();
        }
    }

    /// Marks the current load as done, and hides the footer.
    pub fn finish_loading(&mut self) {
        if self.status() == RefreshStatus::Loading {
            self.pull.finish();
            self.sync_indicators();
        }
    }

    /// Returns the number of children. Always 3.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        3
    }

    /// Returns the header view.
    pub fn header(&self) -> &Indicator {
        &self.header
    }

    /// Returns the footer view.
    pub fn footer(&self) -> &Indicator {
        &self.footer
    }

    /// Gets access to the content view.
    pub fn get_content(&self) -> &V {
        &self.content
    }

    /// Gets mutable access to the content view.
    pub fn get_content_mut(&mut self) -> &mut V {
        self.invalidated = true;
        &mut self.content
    }

    /// Returns the content view.
    pub fn into_content(self) -> V {
        self.content
    }

    fn sync_indicators(&mut self) {
        let status = self.status();
        self.header.set_label(self.style.header_label(status));
        self.footer.set_label(self.style.footer_label(status));
    }

    fn collapse(&mut self) {
        self.pull.collapse(self.style.collapse_step());
        self.sync_indicators();
    }

    fn start_loading(&mut self) -> EventResult {
        if !self.pull.start_loading() {
            return EventResult::Ignored;
        }
        self.sync_indicators();
        callback_result(&self.on_load_more)
    }

    // Virtual row where the content starts.
    fn content_top(&self) -> usize {
        self.style.padding_top() + self.header.height()
    }

    // First virtual row currently visible.
    fn scroll_offset(&self) -> usize {
        let rest = self.content_top();
        if self.status() == RefreshStatus::Loading {
            rest + self.footer.height()
        } else {
            rest - self.pull.offset()
        }
    }
}

impl<V> RefreshView<V>
where
    V: View,
{
    /// Returns a reference to a child.
    ///
    /// Children are, in order, the header, the content and the footer.
    pub fn get_child(&self, i: usize) -> Option<&dyn View> {
        match i {
            0 => Some(&self.header),
            1 => Some(&self.content),
            2 => Some(&self.footer),
            _ => None,
        }
    }
}

impl<V> RefreshView<V>
where
    V: View + ScrollEdges,
{
    // Position in the content of a point at `local` in our coordinates.
    fn content_position(&self, local: Vec2) -> Option<Vec2> {
        (local + (0, self.scroll_offset())).checked_sub((0, self.content_top()))
    }

    // Sends an event to the content, translated to its coordinates.
    fn forward(&mut self, mut event: Event) -> EventResult {
        let top = self.content_top();
        let scroll = self.scroll_offset();

        if top >= scroll {
            event.relativize((0, top - scroll));
        } else if let Some(position) = event.mouse_position_mut() {
            *position = *position + (0, scroll - top);
        }

        self.content.on_event(event)
    }

    // Handles a left-button drag from `anchor` to `y`.
    //
    // Returns `None` if the drag is not ours, and should go to the content.
    fn on_drag(&mut self, anchor: usize, y: usize) -> Option<EventResult> {
        let status = self.status();

        if y > anchor {
            if self.header.height() == 0 {
                return None;
            }

            if status.is_pulling()
                || (status == RefreshStatus::Idle && self.content.is_at_top())
            {
                self.pull.pull(y - anchor);
                self.sync_indicators();
                return Some(EventResult::Consumed(None));
            }
        } else if status.is_pulling() {
            self.pull.pull(0);
            self.sync_indicators();
            return Some(EventResult::Consumed(None));
        } else if y < anchor
            && status == RefreshStatus::Idle
            && self.content.is_at_bottom()
        {
            return Some(self.start_loading());
        }

        None
    }

    // The content always sees the release, so it can drop any grab it holds.
    fn on_release(&mut self, event: Event) -> EventResult {
        self.drag_anchor = None;

        match self.pull.release() {
            Release::Refresh => {
                debug!("Pull released past the threshold");
                self.forward(event);
                self.sync_indicators();
                callback_result(&self.on_refresh)
            }
            Release::Cancel => {
                self.forward(event);
                self.collapse();
                EventResult::Consumed(None)
            }
            Release::Nothing => self.forward(event),
        }
    }
}

// Returns the callback, if any, wrapped in an `EventResult`.
fn callback_result(cb: &Option<Arc<RefreshCallback>>) -> EventResult {
    match cb {
        Some(cb) => {
            let cb = Arc::clone(cb);
            EventResult::with_cb(move |s| cb(s))
        }
        None => EventResult::Consumed(None),
    }
}

// Events asking to see further down.
fn scrolls_down(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(Key::Down)
            | Event::Key(Key::PageDown)
            | Event::Mouse {
                event: MouseEvent::WheelDown,
                ..
            }
    )
}

impl<V> View for RefreshView<V>
where
    V: View + ScrollEdges,
{
    fn draw(&self, printer: &Printer) {
        let printer = printer.content_offset((0, self.scroll_offset()));
        let width = self.last_size.x;

        let children: [(&dyn View, usize); 3] = [
            (&self.header, self.header.height()),
            (&self.content, self.last_size.y),
            (&self.footer, self.footer.height()),
        ];

        let mut top = self.style.padding_top();
        for (child, height) in children.iter() {
            let size = Vec2::new(width, *height);
            let printer = printer.offset((0, top)).cropped(size).inner_size(size);
            child.draw(&printer);
            top += height;
        }
    }

    fn layout(&mut self, size: Vec2) {
        self.last_size = size;

        let header = self.header.required_size(size);
        self.header.layout(Vec2::new(size.x, header.y));

        // The content is as large as the view itself.
        self.content.layout(size);

        let footer = self.footer.required_size(size);
        self.footer.layout(Vec2::new(size.x, footer.y));

        self.pull.set_header_height(header.y);
        self.invalidated = false;
    }

    fn needs_relayout(&self) -> bool {
        self.invalidated || self.content.needs_relayout()
    }

    fn required_size(&mut self, constraint: Vec2) -> Vec2 {
        let height = self.header.required_size(constraint).y
            + self.content.required_size(constraint).y
            + self.footer.required_size(constraint).y;

        Vec2::new(constraint.x, self.style.padding_top() + height)
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        if let Event::Mouse {
            offset,
            position,
            event: mouse,
        } = event
        {
            let local = position.saturating_sub(offset);

            match mouse {
                MouseEvent::Press(MouseButton::Left) => {
                    let on_scrollbar = self
                        .content_position(local)
                        .map_or(false, |pos| self.content.is_on_scrollbar(pos));
                    self.drag_anchor = if on_scrollbar { None } else { Some(local.y) };
                    return self.forward(event);
                }
                MouseEvent::Hold(MouseButton::Left) => {
                    if let Some(anchor) = self.drag_anchor {
                        if let Some(result) = self.on_drag(anchor, local.y) {
                            return result;
                        }
                    }
                    return self.forward(event);
                }
                MouseEvent::Release(MouseButton::Left) => {
                    return self.on_release(event);
                }
                _ => (),
            }
        }

        if event == Event::Refresh
            && self.status() == RefreshStatus::Idle
            && self.current_offset() > 0
        {
            self.collapse();
        }

        let scrolls_down = scrolls_down(&event);
        match self.forward(event) {
            EventResult::Ignored
                if scrolls_down
                    && self.status() == RefreshStatus::Idle
                    && self.content.is_at_bottom() =>
            {
                self.start_loading()
            }
            other => other,
        }
    }

    fn call_on_any(&mut self, selector: &Selector, callback: AnyCb) {
        self.content.call_on_any(selector, callback);
    }

    fn focus_view(&mut self, selector: &Selector) -> Result<EventResult, ViewNotFound> {
        self.content.focus_view(selector)
    }

    fn take_focus(&mut self, source: Direction) -> Result<EventResult, CannotFocus> {
        self.content.take_focus(source)
    }

    fn important_area(&self, size: Vec2) -> Rect {
        let area = self.content.important_area(size);
        let top = self.content_top();
        let scroll = self.scroll_offset();

        if top >= scroll {
            area + Vec2::new(0, top - scroll)
        } else {
            Rect::from_size((0, 0), size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursive_core::view::Nameable;
    use cursive_core::views::{DummyView, ScrollView, SelectView, TextView};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Content with a fixed size and controllable scroll edges.
    struct Feed {
        id: usize,
        size: Vec2,
        at_top: bool,
        at_bottom: bool,
        last_mouse: Option<Vec2>,
    }

    impl Feed {
        fn new(id: usize) -> Self {
            Feed {
                id,
                size: Vec2::new(10, 200),
                at_top: true,
                at_bottom: false,
                last_mouse: None,
            }
        }
    }

    impl View for Feed {
        fn draw(&self, _: &Printer) {}

        fn required_size(&mut self, _: Vec2) -> Vec2 {
            self.size
        }

        fn on_event(&mut self, event: Event) -> EventResult {
            if let Event::Mouse {
                offset, position, ..
            } = event
            {
                self.last_mouse = position.checked_sub(offset);
            }
            EventResult::Ignored
        }
    }

    impl ScrollEdges for Feed {
        fn is_at_top(&self) -> bool {
            self.at_top
        }

        fn is_at_bottom(&self) -> bool {
            self.at_bottom
        }
    }

    fn mouse_at(event: MouseEvent, x: usize, y: usize) -> Event {
        Event::Mouse {
            offset: Vec2::zero(),
            position: Vec2::new(x, y),
            event,
        }
    }

    fn mouse(event: MouseEvent, y: usize) -> Event {
        mouse_at(event, 3, y)
    }

    fn press(y: usize) -> Event {
        mouse(MouseEvent::Press(MouseButton::Left), y)
    }

    fn hold(y: usize) -> Event {
        mouse(MouseEvent::Hold(MouseButton::Left), y)
    }

    fn release(y: usize) -> Event {
        mouse(MouseEvent::Release(MouseButton::Left), y)
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&mut Cursive) + Send + Sync) {
        let count = Arc::new(AtomicUsize::new(0));
        let cb_count = Arc::clone(&count);
        (count, move |_: &mut Cursive| {
            cb_count.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn feed_view(header_height: usize) -> RefreshView<Feed> {
        let style = RefreshStyle::new().with_header_height(header_height);
        let mut view = RefreshView::with_style(Feed::new(0), style);
        view.layout(Vec2::new(20, 10));
        view
    }

    #[test]
    fn three_children_in_order() {
        let view = RefreshView::new(Feed::new(7));

        assert_eq!(view.len(), 3);
        assert!(view.get_child(0).unwrap().is::<Indicator>());
        assert!(view.get_child(1).unwrap().is::<Feed>());
        assert!(view.get_child(2).unwrap().is::<Indicator>());
        assert!(view.get_child(3).is_none());

        assert_eq!(view.footer().label(), "Pull up to load more");
        assert_eq!(view.header().label(), "");
    }

    #[test]
    fn provided_content_is_kept() {
        struct Screen;

        impl ContentProvider for Screen {
            type Content = Feed;

            fn provide(self) -> Feed {
                Feed::new(42)
            }
        }

        let view = RefreshView::from_provider(Screen);
        assert_eq!(view.get_content().id, 42);

        let view = RefreshView::from_provider(|| Feed::new(12));
        let content = view
            .get_child(1)
            .and_then(|child| child.downcast_ref::<Feed>())
            .unwrap();
        assert_eq!(content.id, 12);
        assert_eq!(view.into_content().id, 12);
    }

    #[test]
    fn height_is_padding_plus_children() {
        let style = RefreshStyle::new()
            .with_header_height(50)
            .with_footer_height(40);
        let mut view = RefreshView::with_style(Feed::new(0), style.clone());

        assert_eq!(view.required_size(Vec2::new(80, 10)), Vec2::new(80, 290));

        let mut view =
            RefreshView::with_style(Feed::new(0), style.with_padding_top(3));
        assert_eq!(view.required_size(Vec2::new(80, 10)), Vec2::new(80, 293));
    }

    #[test]
    fn width_is_the_constraint() {
        let mut view = RefreshView::new(Feed::new(0));
        view.get_content_mut().size = Vec2::new(500, 3);

        assert_eq!(view.required_size(Vec2::new(20, 5)).x, 20);
        assert_eq!(view.required_size(Vec2::new(1000, 5)).x, 1000);
    }

    #[test]
    fn pull_past_half_then_release_refreshes_once() {
        let (count, cb) = counter();
        let mut view = feed_view(4).on_refresh(cb);
        let mut siv = Cursive::new();

        assert_eq!(view.status(), RefreshStatus::Idle);

        view.on_event(press(2));
        assert!(view.on_event(hold(3)).is_consumed());
        assert_eq!(view.status(), RefreshStatus::PullToRefresh);
        assert_eq!(view.current_offset(), 1);
        assert_eq!(view.header().label(), "Pull down to refresh");

        view.on_event(hold(4)).process(&mut siv);
        assert_eq!(view.status(), RefreshStatus::ReleaseToRefresh);
        assert_eq!(view.header().label(), "Release to refresh");

        view.on_event(release(4)).process(&mut siv);
        assert_eq!(view.status(), RefreshStatus::Refreshing);
        assert_eq!(view.current_offset(), 4);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // The drag is over: further moves do nothing.
        view.on_event(hold(8)).process(&mut siv);
        view.on_event(release(8)).process(&mut siv);
        assert_eq!(view.status(), RefreshStatus::Refreshing);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        view.finish_refreshing();
        assert_eq!(view.status(), RefreshStatus::Idle);
        assert_eq!(view.current_offset(), 0);
    }

    #[test]
    fn release_below_half_cancels() {
        let (count, cb) = counter();
        let mut view = feed_view(4).on_refresh(cb);
        let mut siv = Cursive::new();

        view.on_event(press(2));
        view.on_event(hold(3));
        view.on_event(release(3)).process(&mut siv);

        assert_eq!(view.status(), RefreshStatus::Idle);
        assert_eq!(view.current_offset(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_pull_unless_content_is_at_top() {
        let mut view = feed_view(4);
        view.get_content_mut().at_top = false;

        view.on_event(press(2));
        assert!(!view.on_event(hold(6)).is_consumed());
        assert_eq!(view.status(), RefreshStatus::Idle);
        assert_eq!(view.get_content().last_mouse, Some(Vec2::new(3, 6)));
    }

    #[test]
    fn drag_up_at_bottom_loads_more() {
        let (count, cb) = counter();
        let mut view = feed_view(4).on_load_more(cb);
        let mut siv = Cursive::new();
        view.get_content_mut().at_bottom = true;

        view.on_event(press(5));
        view.on_event(hold(3)).process(&mut siv);
        assert_eq!(view.status(), RefreshStatus::Loading);
        assert_eq!(view.footer().label(), "Loading more...");

        view.on_event(hold(1)).process(&mut siv);
        view.on_event(release(1)).process(&mut siv);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        view.finish_loading();
        assert_eq!(view.status(), RefreshStatus::Idle);
        assert_eq!(view.footer().label(), "Pull up to load more");
    }

    #[test]
    fn scrolling_down_at_bottom_loads_more() {
        let mut view = feed_view(4);

        assert!(!view.on_event(Event::Key(Key::Down)).is_consumed());
        assert_eq!(view.status(), RefreshStatus::Idle);

        view.get_content_mut().at_bottom = true;
        assert!(view.on_event(Event::Key(Key::PageDown)).is_consumed());
        assert_eq!(view.status(), RefreshStatus::Loading);

        // Already loading.
        assert!(!view.on_event(Event::Key(Key::Down)).is_consumed());
    }

    #[test]
    fn programmatic_refresh() {
        let (count, cb) = counter();
        let mut view = feed_view(2).on_refresh(cb);
        let mut siv = Cursive::new();

        view.refresh().process(&mut siv);
        assert_eq!(view.status(), RefreshStatus::Refreshing);
        assert_eq!(view.header().label(), "Refreshing...");

        assert!(!view.refresh().is_consumed());
        assert_eq!(count.load(Ordering::SeqCst), 1);

        view.finish_refreshing();
        assert_eq!(view.status(), RefreshStatus::Idle);
    }

    #[test]
    fn header_collapses_on_refresh_ticks() {
        let style = RefreshStyle::new()
            .with_header_height(6)
            .with_collapse_step(Some(1));
        let mut view = RefreshView::with_style(Feed::new(0), style);
        view.layout(Vec2::new(20, 10));

        view.on_event(press(0));
        view.on_event(hold(2));
        view.on_event(release(2));
        assert_eq!(view.status(), RefreshStatus::Idle);
        assert_eq!(view.current_offset(), 1);

        view.on_event(Event::Refresh);
        assert_eq!(view.current_offset(), 0);
    }

    #[test]
    fn mouse_is_translated_for_content() {
        let mut view = feed_view(4);

        view.on_event(mouse(MouseEvent::WheelUp, 1));
        assert_eq!(view.get_content().last_mouse, Some(Vec2::new(3, 1)));

        // Header pulled down by 2 rows: the content moved down.
        view.on_event(press(0));
        view.on_event(hold(2));
        view.on_event(mouse(MouseEvent::WheelUp, 3));
        assert_eq!(view.get_content().last_mouse, Some(Vec2::new(3, 1)));
        view.on_event(hold(1));
        view.on_event(release(1));
        assert_eq!(view.status(), RefreshStatus::Idle);

        // Footer shown: the content moved up.
        view.get_content_mut().at_bottom = true;
        view.on_event(Event::Key(Key::Down));
        assert_eq!(view.status(), RefreshStatus::Loading);
        view.on_event(mouse(MouseEvent::WheelUp, 1));
        assert_eq!(view.get_content().last_mouse, Some(Vec2::new(3, 2)));
    }

    #[test]
    fn style_can_be_replaced() {
        let mut view = RefreshView::new(DummyView);

        view.set_style(RefreshStyle::new().with_header_height(5));
        assert_eq!(view.header().height(), 5);
        assert_eq!(view.style().header_height(), 5);
    }

    #[test]
    fn content_sees_the_release_of_a_pull() {
        let mut view = feed_view(4);

        view.on_event(press(0));
        view.on_event(hold(4));
        view.get_content_mut().last_mouse = None;
        view.on_event(release(4));
        assert_eq!(view.status(), RefreshStatus::Refreshing);
        assert!(view.get_content().last_mouse.is_some());

        view.finish_refreshing();
        view.on_event(press(0));
        view.on_event(hold(1));
        view.get_content_mut().last_mouse = None;
        view.on_event(release(1));
        assert_eq!(view.status(), RefreshStatus::Idle);
        assert!(view.get_content().last_mouse.is_some());
    }

    #[test]
    fn scrollbar_drag_belongs_to_content() {
        let (count, cb) = counter();
        let mut list = SelectView::new();
        for i in 0..30 {
            list.add_item(format!("Story #{}", i), i);
        }
        let mut view = RefreshView::new(ScrollView::new(list)).on_refresh(cb);
        let mut siv = Cursive::new();
        view.layout(Vec2::new(20, 10));

        let left = MouseEvent::Press(MouseButton::Left);
        let hold_left = MouseEvent::Hold(MouseButton::Left);
        let release_left = MouseEvent::Release(MouseButton::Left);

        // Grab the scrollbar thumb and drag it down.
        view.on_event(mouse_at(left, 19, 0)).process(&mut siv);
        view.on_event(mouse_at(hold_left, 19, 3)).process(&mut siv);
        view.on_event(mouse_at(hold_left, 19, 6)).process(&mut siv);
        view.on_event(mouse_at(release_left, 19, 6)).process(&mut siv);

        assert_eq!(view.status(), RefreshStatus::Idle);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(view.get_content().content_viewport().top() > 0);

        // A pull from the list itself still refreshes.
        view.get_content_mut().scroll_to_top();
        view.on_event(mouse_at(left, 2, 1)).process(&mut siv);
        view.on_event(mouse_at(hold_left, 2, 3)).process(&mut siv);
        view.on_event(mouse_at(hold_left, 2, 5)).process(&mut siv);
        view.on_event(mouse_at(release_left, 2, 5)).process(&mut siv);
        assert_eq!(view.status(), RefreshStatus::Refreshing);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // No grab left behind: a later drag does not move the viewport.
        view.finish_refreshing();
        view.on_event(mouse_at(left, 2, 5)).process(&mut siv);
        view.on_event(mouse_at(hold_left, 2, 4)).process(&mut siv);
        assert_eq!(view.get_content().content_viewport().top(), 0);
    }

    #[test]
    fn flat_header_never_pulls() {
        let mut view = feed_view(0);

        view.on_event(press(2));
        assert!(!view.on_event(hold(6)).is_consumed());
        assert_eq!(view.status(), RefreshStatus::Idle);
        assert_eq!(view.get_content().last_mouse, Some(Vec2::new(3, 6)));
    }

    #[test]
    fn scroll_offset_follows_status() {
        let style = RefreshStyle::new()
            .with_header_height(4)
            .with_padding_top(3);
        let mut view = RefreshView::with_style(Feed::new(0), style);
        view.layout(Vec2::new(20, 10));

        // Padding and header above the viewport.
        assert_eq!(view.scroll_offset(), 7);

        view.on_event(press(0));
        view.on_event(hold(1));
        assert_eq!(view.scroll_offset(), 6);
        view.on_event(hold(2));
        assert_eq!(view.scroll_offset(), 5);

        view.on_event(release(2));
        assert_eq!(view.status(), RefreshStatus::Refreshing);
        assert_eq!(view.scroll_offset(), 3);

        view.finish_refreshing();
        assert_eq!(view.scroll_offset(), 7);

        view.get_content_mut().at_bottom = true;
        view.on_event(Event::Key(Key::Down));
        assert_eq!(view.status(), RefreshStatus::Loading);
        assert_eq!(view.scroll_offset(), 8);

        view.finish_loading();
        assert_eq!(view.scroll_offset(), 7);
    }

    #[test]
    fn indicators_on_screen() {
        use cursive::backends::puppet::observed::ObservedScreen;
        use cursive::backends::puppet::Backend;
        use cursive::CursiveRunner;

        type News = RefreshView<ScrollView<TextView>>;

        let backend = Backend::init(Some(Vec2::new(30, 8)));
        let screens = backend.stream();
        let input = backend.input();
        let mut siv = Cursive::new().into_runner(backend);

        let style = RefreshStyle::new()
            .with_header_label(RefreshStatus::Idle, "Fresh news");
        siv.add_fullscreen_layer(
            RefreshView::with_style(ScrollView::new(TextView::new("Top story")), style)
                .with_name("news"),
        );

        let redraw = |siv: &mut CursiveRunner<Cursive>| -> ObservedScreen {
            input.send(Some(Event::Refresh)).unwrap();
            siv.step();

            let mut last = None;
            while let Ok(screen) = screens.try_recv() {
                last = Some(screen);
            }
            last.unwrap()
        };

        let screen = redraw(&mut siv);
        assert_eq!(screen.find_occurences("Top story").len(), 1);
        assert_eq!(screen.find_occurences("Fresh news").len(), 0);
        assert_eq!(screen.find_occurences("Pull up to load more").len(), 0);

        siv.call_on_name("news", |v: &mut News| v.on_event(Event::Key(Key::Down)));
        let screen = redraw(&mut siv);
        assert_eq!(screen.find_occurences("Loading more...").len(), 1);
        assert_eq!(screen.find_occurences("Top story").len(), 0);

        siv.call_on_name("news", |v: &mut News| {
            v.finish_loading();
            v.refresh()
        });
        let screen = redraw(&mut siv);
        assert_eq!(screen.find_occurences("Refreshing...").len(), 1);
        assert_eq!(screen.find_occurences("Top story").len(), 1);
    }
}
