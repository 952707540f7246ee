//! Lifecycle wiring between host events and evaluation passes.
//!
//! [`NavContrast`] is what a navigation bar component holds on to. It
//! subscribes to the host's events on mount, turns them into scheduled
//! passes, runs due passes when the host ticks it, and keeps the latest
//! [`Appearance`] for the view to read.
//!
//! | Trigger                         | Scheduling                      |
//! |---------------------------------|---------------------------------|
//! | mount / route change            | after the settle delay          |
//! | scroll, resize                  | shared debounce window          |
//! | `class`/`style` mutation batch  | shared debounce window          |
//! | visibility hidden → visible     | next tick                       |
//!
//! Everything is driven by `&mut self` with explicit `now` values: the host's
//! event loop calls [`NavContrast::handle`] for notifications and
//! [`NavContrast::tick`] when [`NavContrast::next_deadline`] passes.
//!
//! Unmounting, navigating to another route, or dropping the controller
//! releases every subscription and cancels every pending pass before
//! anything new is set up, so two pipelines never run side by side.

use std::time::Instant;

use tracing::debug;

use crate::appearance::{Appearance, NavStyle};
use crate::debounce::Debouncer;
use crate::detector::Detector;
use crate::events::{
    Event, EventSource, MutationFilter, SubscriptionId, Topic, Visibility,
};
use crate::surface::Surface;

/// Why a pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Initial pass after mount or a route change.
    Mount,
    Scroll,
    Resize,
    /// The document became visible again.
    Visibility,
    /// A `class` or `style` attribute changed.
    Mutation,
}

/// Contrast detection bound to a navigation bar's lifecycle.
pub struct NavContrast<E: EventSource> {
    detector: Detector,
    events: E,
    mutation_filter: MutationFilter,
    route: Option<String>,
    subscriptions: Vec<SubscriptionId>,
    debouncer: Debouncer<Trigger>,
    settle_at: Option<Instant>,
    immediate: Option<(Trigger, Instant)>,
    visibility: Visibility,
    appearance: Appearance,
    passes: u64,
}

impl<E: EventSource> NavContrast<E> {
    pub fn new(detector: Detector, events: E) -> Self {
        let debouncer = Debouncer::new(detector.config().debounce());
        Self {
            detector,
            events,
            mutation_filter: MutationFilter::style_attributes(),
            route: None,
            subscriptions: Vec::new(),
            debouncer,
            settle_at: None,
            immediate: None,
            visibility: Visibility::Visible,
            appearance: Appearance::default(),
            passes: 0,
        }
    }

    /// Subscribes to host events for `route` and schedules the settle pass.
    /// Mounting an already mounted controller tears the old pipeline down first.
    pub fn mount(&mut self, route: impl Into<String>, now: Instant) {
        self.teardown();

        let route = route.into();
        let is_root = self.detector.config().is_root(&route);

        for topic in [
            Topic::Scroll,
            Topic::Resize,
            Topic::Visibility,
            Topic::Mutations(self.mutation_filter.clone()),
        ] {
            let id = self.events.subscribe(topic);
            self.subscriptions.push(id);
        }

        self.settle_at = Some(now + self.detector.config().settle());
        self.appearance = Appearance {
            scrolled: Appearance::initial(is_root).scrolled,
            ..self.appearance
        };
        debug!(
            route = route.as_str(),
            subscriptions = self.subscriptions.len(),
            "contrast detector mounted"
        );
        self.route = Some(route);
    }

    /// Re-mounts on `route` if it differs from the current one.
    /// Returns whether the pipeline was rebuilt.
    pub fn navigate(&mut self, route: impl Into<String>, now: Instant) -> bool {
        let route = route.into();
        if self.route.as_deref() == Some(route.as_str()) {
            return false;
        }
        debug!(from = ?self.route, to = route.as_str(), "route changed");
        self.mount(route, now);
        true
    }

    /// Releases all subscriptions and pending passes.
    pub fn unmount(&mut self) {
        if self.route.is_some() {
            debug!(route = ?self.route, "contrast detector unmounted");
        }
        self.teardown();
        self.appearance = Appearance::default();
    }

    fn teardown(&mut self) {
        if !self.subscriptions.is_empty() {
            debug!(count = self.subscriptions.len(), "releasing subscriptions");
        }
        for id in self.subscriptions.drain(..) {
            self.events.unsubscribe(id);
        }
        self.debouncer.cancel();
        self.settle_at = None;
        self.immediate = None;
        self.route = None;
    }

    /// Feeds one host notification. Ignored while unmounted.
    pub fn handle(&mut self, event: Event, now: Instant) {
        if self.route.is_none() {
            return;
        }

        match event {
            Event::Scroll => {
                self.debouncer.schedule(Trigger::Scroll, now);
            }
            Event::Resize => {
                self.debouncer.schedule(Trigger::Resize, now);
            }
            Event::VisibilityChanged(visibility) => {
                let was_hidden = self.visibility == Visibility::Hidden;
                self.visibility = visibility;
                if was_hidden && visibility == Visibility::Visible {
                    self.immediate = Some((Trigger::Visibility, now));
                }
            }
            Event::Mutations(records) => {
                if records.iter().any(|r| self.mutation_filter.accepts(r)) {
                    self.debouncer.schedule(Trigger::Mutation, now);
                }
            }
        }
    }

    /// Runs a pass if one is due, returning the new appearance.
    ///
    /// Several triggers falling due in the same tick share one pass: each
    /// would read the same render tree and produce the same result.
    pub fn tick<S: Surface>(&mut self, surface: &S, now: Instant) -> Option<Appearance> {
        let mut fired = Vec::new();
        if let Some((trigger, _)) = self.immediate.take() {
            fired.push(trigger);
        }
        if self.settle_at.is_some_and(|at| now >= at) {
            self.settle_at = None;
            fired.push(Trigger::Mount);
        }
        if let Some(trigger) = self.debouncer.fire_due(now) {
            fired.push(trigger);
        }
        if fired.is_empty() {
            return None;
        }

        let route = self.route.as_deref()?;
        let evaluation = self.detector.evaluate(surface, route);
        debug!(triggers = ?fired, pass = self.passes + 1, "ran contrast pass");
        self.passes += 1;
        self.appearance = evaluation.appearance;
        Some(self.appearance)
    }

    /// The earliest moment [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.immediate.map(|(_, requested)| requested),
            self.settle_at,
            self.debouncer.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// True while a pass is waiting to run.
    pub fn has_pending(&self) -> bool {
        self.immediate.is_some() || self.settle_at.is_some() || self.debouncer.is_pending()
    }

    /// The latest appearance, for the navigation view to render.
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn style(&self) -> NavStyle {
        self.appearance.style()
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.route.is_some()
    }

    /// Number of passes run since construction.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn events(&self) -> &E {
        &self.events
    }
}

impl<E: EventSource> Drop for NavContrast<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
