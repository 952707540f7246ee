//! Triggers the host delivers, and the subscription interface that produces them.
//!
//! The controller subscribes to four topics when it mounts and releases them
//! when it unmounts or the route changes. Hosts implement [`EventSource`]
//! over their runtime's listener API (`addEventListener`, a
//! `MutationObserver`, a window-system callback) and forward each
//! notification as an [`Event`] to [`NavContrast::handle`](crate::NavContrast::handle).

/// Opaque handle returned by [`EventSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// What a subscription listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topic {
    /// Window scroll.
    Scroll,
    /// Window resize.
    Resize,
    /// Document visibility changes.
    Visibility,
    /// DOM mutations under the body.
    Mutations(MutationFilter),
}

/// Which mutations a [`Topic::Mutations`] subscription observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFilter {
    /// Attribute names whose changes are reported.
    pub attributes: Vec<String>,
    /// Observe the whole body subtree rather than the body alone.
    pub subtree: bool,
}

impl MutationFilter {
    /// Style-affecting attribute changes anywhere under the body.
    pub fn style_attributes() -> Self {
        Self {
            attributes: vec!["class".to_string(), "style".to_string()],
            subtree: true,
        }
    }

    /// True if `record` is one this filter asks for.
    pub fn accepts(&self, record: &MutationRecord) -> bool {
        match record {
            MutationRecord::Attribute { name } => self
                .attributes
                .iter()
                .any(|attr| attr.eq_ignore_ascii_case(name)),
            MutationRecord::ChildList | MutationRecord::CharacterData => false,
        }
    }
}

/// One observed DOM mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// An attribute changed.
    Attribute { name: String },
    /// Children were added or removed.
    ChildList,
    /// Text content changed.
    CharacterData,
}

impl MutationRecord {
    pub fn attribute(name: impl Into<String>) -> Self {
        MutationRecord::Attribute { name: name.into() }
    }
}

/// Document visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// A notification forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Scroll,
    Resize,
    VisibilityChanged(Visibility),
    /// A batch of mutation records, as delivered to one observer callback.
    Mutations(Vec<MutationRecord>),
}

/// The host's listener registry.
pub trait EventSource {
    /// Starts delivering `topic` notifications.
    fn subscribe(&mut self, topic: Topic) -> SubscriptionId;

    /// Stops delivering notifications for `id`. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}
