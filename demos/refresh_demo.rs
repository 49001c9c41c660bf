use cursive::traits::*;
use cursive::views::{Dialog, OnEventView, ScrollView, SelectView};
use cursive::Cursive;
use cursive_refresh::style::RefreshStyle;
use cursive_refresh::views::RefreshView;

// A list of news items: drag it down to get newer ones, scroll past the end
// to get older ones.

type Feed = RefreshView<ScrollView<SelectView<usize>>>;

fn main() {
    cursive::logger::init();
    log::set_max_level(log::LevelFilter::Debug);

    let mut siv = cursive::default();

    // Refresh ticks animate the header back up.
    siv.set_fps(20);

    let mut list = SelectView::new();
    for i in 0..15 {
        list.add_item(format!("Story #{}", i), i);
    }

    let feed = RefreshView::with_style(
        ScrollView::new(list),
        RefreshStyle::new().with_collapse_step(Some(1)),
    )
    .on_refresh(prepend_newer)
    .on_load_more(append_older)
    .with_name("feed");

    siv.add_layer(
        Dialog::around(OnEventView::new(feed).on_event('r', |s| {
            if let Some(result) = s.call_on_name("feed", |v: &mut Feed| v.refresh()) {
                result.process(s);
            }
        }))
        .title("News (r: refresh, ~: logs)")
        .button("Quit", |s| s.quit())
        .fixed_size((40, 16)),
    );

    siv.add_global_callback('~', Cursive::toggle_debug_console);
    siv.add_global_callback('q', |s| s.quit());

    siv.run();
}

fn prepend_newer(s: &mut Cursive) {
    s.call_on_name("feed", |v: &mut Feed| {
        let list = v.get_content_mut().get_inner_mut();
        let newest = list
            .iter()
            .map(|(_, &i)| i)
            .max()
            .map_or(0, |i| i + 1);
        for i in newest..newest + 3 {
            list.insert_item(0, format!("Story #{}", i), i);
        }
        v.finish_refreshing();
    });
}

fn append_older(s: &mut Cursive) {
    s.call_on_name("feed", |v: &mut Feed| {
        let list = v.get_content_mut().get_inner_mut();
        let count = list.len();
        for i in 0..5 {
            list.add_item(format!("Archived #{}", count + i), count + i);
        }
        v.finish_loading();
    });
}
