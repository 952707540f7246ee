//! One evaluation pass: probe, classify, vote.
//!
//! [`Detector::evaluate`] is a pure function of the surface's current state.
//! It reads five probes and the body, classifies each, and returns the
//! majority verdict together with the [`Appearance`] the navigation bar
//! should adopt. Calling it twice on an unchanged surface yields the same
//! result, so overlapping triggers are harmless: the last pass wins.
//!
//! ```rust
//! use navtone::{Detector, Rect, Snapshot, SnapshotNode, Viewport};
//!
//! let page = Snapshot::new(
//!     Viewport::new(1280.0, 800.0),
//!     SnapshotNode::new()
//!         .with_background_color("rgb(17, 24, 39)")
//!         .with_child(
//!             SnapshotNode::new()
//!                 .with_class("bg-gray-900")
//!                 .with_rect(Rect::new(0.0, 0.0, 1280.0, 2000.0)),
//!         ),
//! );
//!
//! let pass = Detector::new().evaluate(&page, "/");
//! assert!(pass.appearance.is_dark_background);
//! assert_eq!(pass.verdict.total, 6);
//! ```

use tracing::{debug, trace};

use crate::appearance::Appearance;
use crate::classify::Classifier;
use crate::config::DetectorConfig;
use crate::sample::{sample_points, SampleSite};
use crate::surface::Surface;
use crate::verdict::Verdict;
use crate::vocabulary::Vocabulary;

/// Classification of one probe. `dark` is `None` when nothing was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    pub site: SampleSite,
    pub dark: Option<bool>,
}

/// Everything one pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub samples: [SampleOutcome; 5],
    pub body_dark: bool,
    pub appearance: Appearance,
}

/// The contrast detector: configuration plus vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
    vocabulary: Vocabulary,
}

impl Detector {
    /// A detector with default configuration and the built-in vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.vocabulary, &self.config)
    }

    /// Runs one evaluation pass against the surface as it is right now.
    pub fn evaluate<S: Surface>(&self, surface: &S, route: &str) -> Evaluation {
        let classifier = self.classifier();
        let viewport = surface.viewport();
        let points = sample_points(viewport, surface.nav_height(), &self.config);

        let samples = points.map(|point| {
            let dark = surface
                .element_at(point.x, point.y)
                .map(|node| classifier.classify(surface, &node));
            trace!(site = ?point.site, x = point.x, y = point.y, ?dark, "sample");
            SampleOutcome {
                site: point.site,
                dark,
            }
        });

        let body_dark = classifier.classify(surface, &surface.body());
        let verdict = Verdict::tally(
            samples
                .iter()
                .map(|sample| sample.dark)
                .chain(std::iter::once(Some(body_dark))),
        );

        let scrolled = self
            .config
            .is_root(route)
            .then(|| viewport.scroll_y > self.config.scroll_threshold);

        let appearance = Appearance {
            is_dark_background: verdict.is_dark(),
            scrolled,
        };

        debug!(
            route,
            dark_count = verdict.dark_count,
            total = verdict.total,
            is_dark = appearance.is_dark_background,
            ?scrolled,
            "contrast pass"
        );

        Evaluation {
            verdict,
            samples,
            body_dark,
            appearance,
        }
    }
}
