//! Where the detector looks.
//!
//! Five probes cover the band directly behind the navigation bar (left,
//! center, right) plus the viewport center and a point near the bottom, so a
//! single narrow element under the bar can't outvote the rest of the page.

use crate::config::DetectorConfig;
use crate::surface::Viewport;

/// Which of the five probes a [`SamplePoint`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleSite {
    /// Horizontal center, just below the navigation bar.
    BelowNav,
    /// Center of the viewport.
    Center,
    /// Horizontal center, near the bottom of the viewport.
    NearBottom,
    /// Left inset, just below the navigation bar.
    LeftEdge,
    /// Right inset, just below the navigation bar.
    RightEdge,
}

/// A viewport coordinate probed during one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub site: SampleSite,
    pub x: f64,
    pub y: f64,
}

/// Computes the five probe coordinates for the current viewport.
///
/// `nav_height` is the measured bar height; `None` (not yet rendered) or a
/// non-finite measurement falls back to `config.default_nav_height`.
pub fn sample_points(
    viewport: Viewport,
    nav_height: Option<f64>,
    config: &DetectorConfig,
) -> [SamplePoint; 5] {
    let nav = nav_height
        .filter(|h| h.is_finite() && *h >= 0.0)
        .unwrap_or(config.default_nav_height);
    let below_nav = nav + config.below_nav_offset;
    let center_x = viewport.width / 2.0;

    let point = |site, x, y| SamplePoint { site, x, y };
    [
        point(SampleSite::BelowNav, center_x, below_nav),
        point(SampleSite::Center, center_x, viewport.height / 2.0),
        point(
            SampleSite::NearBottom,
            center_x,
            viewport.height - config.bottom_inset,
        ),
        point(SampleSite::LeftEdge, config.edge_inset, below_nav),
        point(
            SampleSite::RightEdge,
            viewport.width - config.edge_inset,
            below_nav,
        ),
    ]
}
