//! Visual configuration for the header and footer of a refresh view.
//!
//! A [`RefreshStyle`] describes the header and footer of a
//! [`RefreshView`](crate::views::RefreshView): their height, colors and
//! labels, as well as the pull threshold.
//!
//! ## Configuring with toml
//!
//! This requires the `toml` feature to be enabled.
//!
//! ```toml
//! [dependencies]
//! cursive-refresh = { version = "*", features = ["toml"] }
//! ```
//!
//! Missing values keep their default:
//!
//! ```toml
//! threshold = 0.5
//! padding_top = 0
//! collapse_step = 1
//!
//! [header]
//! height = 2
//! front = "white"
//! back = "blue"
//! pull = "Pull down to refresh"
//! release = "Release to refresh"
//! refreshing = "Refreshing..."
//!
//! [footer]
//! height = 1
//! front = "black"
//! back = "cyan"
//! idle = "Pull up to load more"
//! loading = "Loading more..."
//! ```
use crate::status::RefreshStatus;
use cursive_core::style::{BaseColor, Color, ColorStyle};
use enum_map::{enum_map, EnumMap};
use std::fmt;
use std::io;

#[cfg(feature = "toml")]
use std::fs::File;
#[cfg(feature = "toml")]
use std::io::Read;
#[cfg(feature = "toml")]
use std::path::Path;

/// Header and footer appearance, and pull behaviour.
#[derive(Clone, Debug)]
pub struct RefreshStyle {
    header_height: usize,
    header_color: ColorStyle,
    header_labels: EnumMap<RefreshStatus, String>,

    footer_height: usize,
    footer_color: ColorStyle,
    footer_idle_label: String,
    footer_loading_label: String,

    threshold: f64,
    padding_top: usize,
    collapse_step: Option<usize>,
}

impl Default for RefreshStyle {
    fn default() -> Self {
        RefreshStyle::new()
    }
}

impl RefreshStyle {
    /// Returns the default style: white on blue header, black on cyan footer.
    pub fn new() -> Self {
        use crate::status::RefreshStatus::*;

        RefreshStyle {
            header_height: 2,
            header_color: ColorStyle::new(
                Color::Light(BaseColor::White),
                Color::Dark(BaseColor::Blue),
            ),
            header_labels: enum_map! {
                Idle => String::new(),
                PullToRefresh => "Pull down to refresh".to_string(),
                ReleaseToRefresh => "Release to refresh".to_string(),
                Refreshing => "Refreshing...".to_string(),
                Loading => String::new(),
            },
            footer_height: 1,
            footer_color: ColorStyle::new(
                Color::Dark(BaseColor::Black),
                Color::Dark(BaseColor::Cyan),
            ),
            footer_idle_label: "Pull up to load more".to_string(),
            footer_loading_label: "Loading more...".to_string(),
            threshold: 0.5,
            padding_top: 0,
            collapse_step: None,
        }
    }

    /// Height of the header, in rows.
    pub fn header_height(&self) -> usize {
        self.header_height
    }

    /// Sets the height of the header, in rows.
    #[must_use]
    pub fn with_header_height(mut self, height: usize) -> Self {
        self.header_height = height;
        self
    }

    /// Color of the header.
    pub fn header_color(&self) -> ColorStyle {
        self.header_color
    }

    /// Sets the color of the header.
    #[must_use]
    pub fn with_header_color(mut self, color: ColorStyle) -> Self {
        self.header_color = color;
        self
    }

    /// Label shown in the header for the given status.
    pub fn header_label(&self, status: RefreshStatus) -> &str {
        &self.header_labels[status]
    }

    /// Sets the label shown in the header for the given status.
    #[must_use]
    pub fn with_header_label<S: Into<String>>(
        mut self,
        status: RefreshStatus,
        label: S,
    ) -> Self {
        self.header_labels[status] = label.into();
        self
    }

    /// Height of the footer, in rows.
    pub fn footer_height(&self) -> usize {
        self.footer_height
    }

    /// Sets the height of the footer, in rows.
    #[must_use]
    pub fn with_footer_height(mut self, height: usize) -> Self {
        self.footer_height = height;
        self
    }

    /// Color of the footer.
    pub fn footer_color(&self) -> ColorStyle {
        self.footer_color
    }

    /// Sets the color of the footer.
    #[must_use]
    pub fn with_footer_color(mut self, color: ColorStyle) -> Self {
        self.footer_color = color;
        self
    }

    /// Label shown in the footer for the given status.
    pub fn footer_label(&self, status: RefreshStatus) -> &str {
        if status == RefreshStatus::Loading {
            &self.footer_loading_label
        } else {
            &self.footer_idle_label
        }
    }

    /// Sets the footer labels, while idle and while loading.
    #[must_use]
    pub fn with_footer_labels<S, T>(mut self, idle: S, loading: T) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        self.footer_idle_label = idle.into();
        self.footer_loading_label = loading.into();
        self
    }

    /// Fraction of the header height a drag must reach to trigger a refresh.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Sets the pull threshold, as a fraction of the header height.
    ///
    /// Returns an error if `threshold` is not in `(0, 1]`.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), Error> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(Error::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(())
    }

    /// Rows of blank space above the header.
    pub fn padding_top(&self) -> usize {
        self.padding_top
    }

    /// Sets the blank space above the header.
    #[must_use]
    pub fn with_padding_top(mut self, padding_top: usize) -> Self {
        self.padding_top = padding_top;
        self
    }

    /// Rows the header retracts per refresh tick, if animated.
    pub fn collapse_step(&self) -> Option<usize> {
        self.collapse_step
    }

    /// Sets how many rows the header retracts per refresh tick.
    ///
    /// `None` hides it at once. Animating requires the application to
    /// send refresh events, for example with `Cursive::set_fps`.
    #[must_use]
    pub fn with_collapse_step(mut self, step: Option<usize>) -> Self {
        self.collapse_step = step;
        self
    }

    #[cfg(feature = "toml")]
    #[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
    /// Load values from an already parsed toml [`Table`], overwriting previous values.
    ///
    /// [`Table`]: https://docs.rs/toml/latest/toml/type.Table.html
    pub fn load_toml(&mut self, table: &toml::value::Table) -> Result<(), Error> {
        if let Some(&toml::Value::Float(threshold)) = table.get("threshold") {
            self.set_threshold(threshold)?;
        }

        if let Some(&toml::Value::Integer(padding)) = table.get("padding_top") {
            self.padding_top = padding.max(0) as usize;
        }

        if let Some(&toml::Value::Integer(step)) = table.get("collapse_step") {
            self.collapse_step = if step > 0 { Some(step as usize) } else { None };
        }

        if let Some(toml::Value::Table(header)) = table.get("header") {
            if let Some(&toml::Value::Integer(height)) = header.get("height") {
                self.header_height = height.max(0) as usize;
            }
            self.header_color = load_color(header, self.header_color)?;

            for (key, status) in &[
                ("pull", RefreshStatus::PullToRefresh),
                ("release", RefreshStatus::ReleaseToRefresh),
                ("refreshing", RefreshStatus::Refreshing),
            ] {
                if let Some(toml::Value::String(label)) = header.get(*key) {
                    self.header_labels[*status] = label.clone();
                }
            }
        }

        if let Some(toml::Value::Table(footer)) = table.get("footer") {
            if let Some(&toml::Value::Integer(height)) = footer.get("height") {
                self.footer_height = height.max(0) as usize;
            }
            self.footer_color = load_color(footer, self.footer_color)?;

            if let Some(toml::Value::String(label)) = footer.get("idle") {
                self.footer_idle_label = label.clone();
            }
            if let Some(toml::Value::String(label)) = footer.get("loading") {
                self.footer_loading_label = label.clone();
            }
        }

        Ok(())
    }
}

// Reads the `front` and `back` keys of a section, keeping `current` for
// missing ones.
#[cfg(feature = "toml")]
fn load_color(
    table: &toml::value::Table,
    current: ColorStyle,
) -> Result<ColorStyle, Error> {
    let parse = |key: &str| -> Result<Option<Color>, Error> {
        match table.get(key) {
            Some(toml::Value::String(name)) => Color::parse(name)
                .map(Some)
                .ok_or_else(|| Error::NoSuchColor(name.clone())),
            _ => Ok(None),
        }
    };

    let mut color = current;
    if let Some(front) = parse("front")? {
        color.front = front.into();
    }
    if let Some(back) = parse("back")? {
        color.back = back.into();
    }
    Ok(color)
}

/// Possible error returned when configuring a style.
#[derive(Debug)]
pub enum Error {
    /// The threshold was not in `(0, 1]`.
    InvalidThreshold(f64),

    /// A color name could not be parsed.
    NoSuchColor(String),

    /// An error occurred when reading the file.
    Io(io::Error),

    #[cfg(feature = "toml")]
    #[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
    /// An error occurred when parsing the toml content.
    Parse(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidThreshold(threshold) => {
                write!(f, "threshold {} is not in (0, 1]", threshold)
            }
            Error::NoSuchColor(name) => write!(f, "no such color: {:?}", name),
            Error::Io(err) => write!(f, "could not read style: {}", err),
            #[cfg(feature = "toml")]
            Error::Parse(err) => write!(f, "could not parse style: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            #[cfg(feature = "toml")]
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Parse(err)
    }
}

/// Loads a style from file.
///
/// Must have the `toml` feature enabled.
#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
pub fn load_style_file<P: AsRef<Path>>(filename: P) -> Result<RefreshStyle, Error> {
    let content = {
        let mut content = String::new();
        let mut file = File::open(filename)?;
        file.read_to_string(&mut content)?;
        content
    };

    load_toml(&content)
}

/// Loads a style from a toml string.
///
/// Must have the `toml` feature enabled.
#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
pub fn load_toml(content: &str) -> Result<RefreshStyle, Error> {
    let table = toml::de::from_str(content)?;

    let mut style = RefreshStyle::default();
    style.load_toml(&table)?;

    Ok(style)
}
