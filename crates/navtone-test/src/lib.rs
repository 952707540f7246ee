//! Test harness for `navtone`.
//!
//! Three pieces cover what scenario tests need without a UI runtime:
//!
//! - [`PageBuilder`]: stacks full-width sections the way a marketing page is
//!   laid out, producing a [`Snapshot`].
//! - [`RecordingEvents`]: an [`EventSource`] that records subscriptions and
//!   can be inspected after it has been handed to a controller.
//! - [`Timeline`]: virtual milliseconds mapped onto `Instant`s.
//!
//! ```rust
//! use navtone::{Detector, NavContrast};
//! use navtone_test::{PageBuilder, RecordingEvents, Timeline};
//!
//! let page = PageBuilder::new(1280.0, 800.0)
//!     .nav_height(72.0)
//!     .section("hero", 700.0, |s| s.with_class("bg-slate-900"))
//!     .section("programs", 1200.0, |s| s.with_background_color("rgb(255, 255, 255)"))
//!     .build();
//!
//! let events = RecordingEvents::new();
//! let time = Timeline::new();
//! let mut nav = NavContrast::new(Detector::new(), events.clone());
//! nav.mount("/", time.at(0));
//! assert_eq!(events.active_count(), 4);
//!
//! nav.tick(&page, time.at(100));
//! assert!(nav.appearance().is_dark_background);
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use navtone::{EventSource, Rect, Snapshot, SnapshotNode, SubscriptionId, Topic, Viewport};

// ============================================================================
// Pages
// ============================================================================

/// Builds a page of full-width sections stacked top to bottom.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    width: f64,
    height: f64,
    nav_height: Option<f64>,
    body: SnapshotNode,
    cursor: f64,
}

impl PageBuilder {
    /// A page with the given viewport size and a white body.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            nav_height: None,
            body: SnapshotNode::new().with_background_color("rgb(255, 255, 255)"),
            cursor: 0.0,
        }
    }

    /// Replaces the body node's own styling, keeping sections added so far.
    pub fn body(mut self, style: impl FnOnce(SnapshotNode) -> SnapshotNode) -> Self {
        let children = std::mem::take(&mut self.body.children);
        let mut body = style(SnapshotNode::new());
        body.children = children;
        self.body = body;
        self
    }

    pub fn nav_height(mut self, height: f64) -> Self {
        self.nav_height = Some(height);
        self
    }

    /// Appends a full-width section of `height` below the previous one.
    pub fn section(
        mut self,
        id: &str,
        height: f64,
        style: impl FnOnce(SnapshotNode) -> SnapshotNode,
    ) -> Self {
        let rect = Rect::new(0.0, self.cursor, self.width, height);
        let node = style(SnapshotNode::new().with_id(id).with_rect(rect));
        self.body.children.push(node);
        self.cursor += height;
        self
    }

    /// Adds an arbitrary node to the body, outside the section flow.
    pub fn overlay(mut self, node: SnapshotNode) -> Self {
        self.body.children.push(node);
        self
    }

    /// Leaves `height` of uncovered space (only the body shows through).
    pub fn gap(mut self, height: f64) -> Self {
        self.cursor += height;
        self
    }

    pub fn build(self) -> Snapshot {
        let snapshot = Snapshot::new(Viewport::new(self.width, self.height), self.body);
        match self.nav_height {
            Some(h) => snapshot.with_nav_height(h),
            None => snapshot,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeMap<u64, Topic>,
    subscribed: usize,
    unsubscribed: usize,
}

/// An [`EventSource`] that records what was subscribed.
///
/// Clones share state, so a test can keep one handle while the controller
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    inner: Rc<RefCell<Registry>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active subscriptions, in subscription order.
    pub fn active(&self) -> Vec<Topic> {
        self.inner.borrow().active.values().cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    /// Total `subscribe` calls so far.
    pub fn subscribed(&self) -> usize {
        self.inner.borrow().subscribed
    }

    /// Total `unsubscribe` calls for ids that were active.
    pub fn unsubscribed(&self) -> usize {
        self.inner.borrow().unsubscribed
    }

    /// True if a subscription for `topic` is active.
    pub fn is_listening(&self, topic: &Topic) -> bool {
        self.inner.borrow().active.values().any(|t| t == topic)
    }
}

impl EventSource for RecordingEvents {
    fn subscribe(&mut self, topic: Topic) -> SubscriptionId {
        let mut registry = self.inner.borrow_mut();
        registry.next_id += 1;
        registry.subscribed += 1;
        let id = registry.next_id;
        registry.active.insert(id, topic);
        SubscriptionId(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let mut registry = self.inner.borrow_mut();
        if registry.active.remove(&id.0).is_some() {
            registry.unsubscribed += 1;
        }
    }
}

// ============================================================================
// Time
// ============================================================================

/// Virtual time: milliseconds since an arbitrary origin.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    origin: Instant,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// The instant `ms` milliseconds after the origin.
    pub fn at(&self, ms: u64) -> Instant {
        self.origin + Duration::from_millis(ms)
    }

    /// Milliseconds from the origin to `instant`.
    pub fn ms(&self, instant: Instant) -> u64 {
        instant.saturating_duration_since(self.origin).as_millis() as u64
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtone::Surface;

    #[test]
    fn test_sections_stack() {
        let page = PageBuilder::new(1000.0, 800.0)
            .section("a", 300.0, |s| s)
            .gap(100.0)
            .section("b", 300.0, |s| s)
            .build();

        let hit = page.element_at(10.0, 100.0).unwrap();
        assert_eq!(page.id_of(hit), Some("a"));
        assert_eq!(page.element_at(10.0, 350.0), None);
        let hit = page.element_at(10.0, 500.0).unwrap();
        assert_eq!(page.id_of(hit), Some("b"));
    }

    #[test]
    fn test_body_restyle_keeps_sections() {
        let page = PageBuilder::new(100.0, 100.0)
            .section("a", 50.0, |s| s)
            .body(|b| b.with_class("bg-black"))
            .build();
        assert_eq!(page.class_name(&page.body()), "bg-black");
        assert!(page.find("a").is_some());
    }

    #[test]
    fn test_recording_events_shared_between_clones() {
        let events = RecordingEvents::new();
        let mut handle = events.clone();
        let id = handle.subscribe(Topic::Scroll);
        assert!(events.is_listening(&Topic::Scroll));

        handle.unsubscribe(id);
        handle.unsubscribe(id);
        assert_eq!(events.active_count(), 0);
        assert_eq!(events.subscribed(), 1);
        assert_eq!(events.unsubscribed(), 1);
    }

    #[test]
    fn test_timeline_roundtrip() {
        let time = Timeline::new();
        assert_eq!(time.ms(time.at(250)), 250);
    }
}
