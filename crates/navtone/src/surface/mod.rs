//! The render-tree query surface the detector reads from.
//!
//! The detector never touches a DOM directly. Anything that can answer four
//! questions can host it:
//!
//! - which element is topmost at a viewport coordinate ([`Surface::element_at`])
//! - what an element's resolved background is ([`Surface::background`])
//! - what its class list is ([`Surface::class_name`])
//! - who its parent is ([`Surface::parent`])
//!
//! plus the viewport geometry and the navigation bar's measured height.
//! A browser binding answers these with `elementFromPoint`, `getComputedStyle`
//! and `parentElement`; the bundled [`Snapshot`] answers them from a captured
//! page description.
//!
//! The surface is only ever read. Implementations should return `None` rather
//! than fail: a missing answer is treated as "no signal".

mod snapshot;

use std::borrow::Cow;

pub use snapshot::{NodeId, Rect, Snapshot, SnapshotNode};

/// Visible viewport geometry at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Vertical scroll offset of the document.
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    pub fn scrolled_to(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }
}

/// An element's resolved background, as computed-style text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Background {
    /// `background-color`, e.g. `rgb(17, 24, 39)` or `rgba(0, 0, 0, 0)`.
    pub color: Option<String>,
    /// `background-image`, e.g. `none`, `url(...)` or `linear-gradient(...)`.
    pub image: Option<String>,
}

impl Background {
    /// The image, unless absent, blank or `none`.
    pub fn image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .map(str::trim)
            .filter(|image| !image.is_empty() && !image.eq_ignore_ascii_case("none"))
    }

    /// The color text, unless absent or blank.
    pub fn color(&self) -> Option<&str> {
        self.color
            .as_deref()
            .map(str::trim)
            .filter(|color| !color.is_empty())
    }
}

/// Read access to a rendered page.
pub trait Surface {
    /// A cheap handle to one element.
    type Node: Clone + PartialEq;

    /// Current viewport size and scroll offset.
    fn viewport(&self) -> Viewport;

    /// Measured navigation bar height, if the bar has rendered.
    fn nav_height(&self) -> Option<f64>;

    /// The topmost element painted at viewport coordinate `(x, y)`.
    fn element_at(&self, x: f64, y: f64) -> Option<Self::Node>;

    /// The document body.
    fn body(&self) -> Self::Node;

    /// Resolved background of `node`.
    fn background(&self, node: &Self::Node) -> Background;

    /// Class list of `node` as a single space-separated string.
    fn class_name(&self, node: &Self::Node) -> Cow<'_, str>;

    /// Parent of `node`, `None` at the root.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
}
