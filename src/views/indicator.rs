use cursive_core::style::ColorStyle;
use cursive_core::view::View;
use cursive_core::{Printer, Vec2};
use unicode_width::UnicodeWidthStr;

/// Fixed-height band with a background color and a centered label.
///
/// Used as header and footer of a [`RefreshView`](super::RefreshView).
#[derive(Debug, Clone)]
pub struct Indicator {
    label: String,
    color: ColorStyle,
    height: usize,
}

impl Indicator {
    /// Creates a new indicator.
    pub fn new<S: Into<String>>(label: S, color: ColorStyle, height: usize) -> Self {
        Indicator {
            label: label.into(),
            color,
            height,
        }
    }

    /// Returns the current label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the label.
    pub fn set_label<S: Into<String>>(&mut self, label: S) {
        self.label = label.into();
    }

    /// Returns the background color.
    pub fn color(&self) -> ColorStyle {
        self.color
    }

    /// Sets the background color.
    pub fn set_color(&mut self, color: ColorStyle) {
        self.color = color;
    }

    /// Returns the height, in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sets the height, in rows.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }
}

impl View for Indicator {
    fn draw(&self, printer: &Printer) {
        printer.with_color(self.color, |printer| {
            for y in 0..printer.size.y {
                printer.print_hline((0, y), printer.size.x, " ");
            }

            if printer.size.y == 0 {
                return;
            }

            let x = printer.size.x.saturating_sub(self.label.width()) / 2;
            let y = (printer.size.y - 1) / 2;
            printer.print((x, y), &self.label);
        });
    }

    fn required_size(&mut self, constraint: Vec2) -> Vec2 {
        Vec2::new(constraint.x, self.height)
    }

    fn needs_relayout(&self) -> bool {
        false
    }
}
