//! # navtone - Adaptive Navigation Contrast
//!
//! `navtone` decides whether the page behind a fixed navigation bar reads as
//! dark, so the bar can switch between light-on-dark and dark-on-light text.
//! It works against any retained render tree that can hit-test a point and
//! report resolved backgrounds: a browser DOM, a native widget tree, or a
//! captured [`Snapshot`].
//!
//! ## Core Concepts
//!
//! - [`Surface`]: the read-only render-tree queries the detector needs
//! - [`Detector`]: one evaluation pass (five probes plus the body, majority vote)
//! - [`Classifier`]: dark/light classification of a single element
//! - [`Vocabulary`]: the design-system names that mark a background dark
//! - [`NavContrast`]: lifecycle controller wiring host events to passes
//! - [`Appearance`] / [`NavStyle`]: what the navigation bar renders with
//!
//! ## Quick Start
//!
//! ```rust
//! use navtone::{Detector, Rect, Snapshot, SnapshotNode, TextTone, Viewport};
//!
//! let page = Snapshot::new(
//!     Viewport::new(1280.0, 800.0),
//!     SnapshotNode::new()
//!         .with_background_color("rgb(255, 255, 255)")
//!         .with_child(
//!             SnapshotNode::new()
//!                 .with_class("bg-gradient-to-b from-slate-900 to-slate-800")
//!                 .with_rect(Rect::new(0.0, 0.0, 1280.0, 900.0)),
//!         ),
//! );
//!
//! let pass = Detector::new().evaluate(&page, "/");
//! assert_eq!(pass.verdict.dark_count, 5);
//! assert_eq!(pass.appearance.style().text, TextTone::Light);
//! ```
//!
//! ## Classification Order
//!
//! Each element is tested image first, then solid color, then class names,
//! then up to three ancestors. See [`Classifier`] for the details and
//! [`Vocabulary`] for customizing the names involved.
//!
//! ## Driving It From a UI Runtime
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use navtone::{Detector, Event, EventSource, NavContrast, Snapshot, SnapshotNode,
//!               SubscriptionId, Topic, Viewport};
//!
//! #[derive(Default)]
//! struct Noop(u64);
//!
//! impl EventSource for Noop {
//!     fn subscribe(&mut self, _topic: Topic) -> SubscriptionId {
//!         self.0 += 1;
//!         SubscriptionId(self.0)
//!     }
//!     fn unsubscribe(&mut self, _id: SubscriptionId) {}
//! }
//!
//! let page = Snapshot::new(Viewport::new(800.0, 600.0), SnapshotNode::new());
//! let start = Instant::now();
//!
//! let mut nav = NavContrast::new(Detector::new(), Noop::default());
//! nav.mount("/", start);
//! nav.handle(Event::Scroll, start + Duration::from_millis(5));
//!
//! // The settle pass and the debounced scroll both fall due by 100ms.
//! assert!(nav.tick(&page, start + Duration::from_millis(100)).is_some());
//! assert_eq!(nav.passes(), 1);
//! ```
//!
//! ## Logging
//!
//! Passes, subscriptions and route changes are reported through `tracing`
//! at `debug` level, individual probes at `trace`. No subscriber is
//! installed by this crate.

mod appearance;
mod classify;
mod color;
mod config;
mod controller;
mod debounce;
mod detector;
mod error;
mod events;
mod sample;
mod surface;
mod verdict;
mod vocabulary;

pub use appearance::{Appearance, BarFill, NavStyle, TextTone};
pub use classify::Classifier;
pub use color::Rgba;
pub use config::DetectorConfig;
pub use controller::{NavContrast, Trigger};
pub use debounce::Debouncer;
pub use detector::{Detector, Evaluation, SampleOutcome};
pub use error::{ConfigError, Result, SnapshotError};
pub use events::{
    Event, EventSource, MutationFilter, MutationRecord, SubscriptionId, Topic, Visibility,
};
pub use sample::{sample_points, SamplePoint, SampleSite};
pub use surface::{Background, NodeId, Rect, Snapshot, SnapshotNode, Surface, Viewport};
pub use verdict::Verdict;
pub use vocabulary::Vocabulary;
