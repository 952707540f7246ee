//! A captured page that can be queried like a live render tree.
//!
//! A snapshot is a node tree with layout rectangles and resolved backgrounds,
//! the same information a browser binding would read through
//! `elementFromPoint` and `getComputedStyle`. It is handy for replaying
//! captured pages offline and for exercising the detector without a UI
//! runtime.
//!
//! ```yaml
//! viewport: { width: 1280, height: 800, scroll_y: 0 }
//! nav_height: 72
//! body:
//!   background_color: "rgb(255, 255, 255)"
//!   children:
//!     - id: hero
//!       class: "bg-gray-900 text-white"
//!       rect: { x: 0, y: 0, width: 1280, height: 640 }
//!     - id: programs
//!       background_color: "rgb(249, 250, 251)"
//!       rect: { x: 0, y: 640, width: 1280, height: 900 }
//! ```
//!
//! # Hit testing
//!
//! Rectangles are in document coordinates; the viewport's `scroll_y` is added
//! to a probe before testing them. Nodes marked `fixed` (and their
//! descendants) use viewport coordinates and paint above everything else.
//! Within each layer, later nodes in document order paint over earlier ones,
//! so children cover their parents and later siblings cover earlier ones.
//! Nodes without a `rect` are never hit themselves.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Background, Surface, Viewport};
use crate::error::SnapshotError;

/// Handle to a node inside a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Axis-aligned layout box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges belong to the neighbor.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// One element of a snapshot document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapshotNode {
    pub id: Option<String>,
    pub class: String,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    pub rect: Option<Rect>,
    pub fixed: bool,
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_background_image(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn with_child(mut self, child: SnapshotNode) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDocument {
    viewport: Viewport,
    #[serde(default)]
    nav_height: Option<f64>,
    body: SnapshotNode,
}

#[derive(Debug, Clone)]
struct FlatNode {
    id: Option<String>,
    class: String,
    background: Background,
    rect: Option<Rect>,
    fixed: bool,
    parent: Option<usize>,
}

/// A queryable page capture. Index 0 is always the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "SnapshotDocument")]
pub struct Snapshot {
    viewport: Viewport,
    nav_height: Option<f64>,
    nodes: Vec<FlatNode>,
}

impl From<SnapshotDocument> for Snapshot {
    fn from(doc: SnapshotDocument) -> Self {
        let mut snapshot = Snapshot::new(doc.viewport, doc.body);
        snapshot.nav_height = doc.nav_height;
        snapshot
    }
}

impl Snapshot {
    /// Builds a snapshot from a viewport and the body node tree.
    pub fn new(viewport: Viewport, body: SnapshotNode) -> Self {
        let mut nodes = Vec::new();
        flatten(body, None, false, &mut nodes);
        Self {
            viewport,
            nav_height: None,
            nodes,
        }
    }

    pub fn with_nav_height(mut self, height: f64) -> Self {
        self.nav_height = Some(height);
        self
    }

    /// Parses a snapshot from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SnapshotError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a snapshot, picking the format from the extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&read()?),
            Some("json") => Self::from_json(&read()?),
            _ => Err(SnapshotError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Number of nodes, body included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by its `id`.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// The `id` of a node, if it has one.
    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|n| n.id.as_deref())
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_nav_height(&mut self, height: Option<f64>) {
        self.nav_height = height;
    }

    /// Replaces a node's class list. Unknown nodes are ignored.
    pub fn set_class(&mut self, node: NodeId, class: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.class = class.into();
        }
    }

    /// Replaces a node's background color. Unknown nodes are ignored.
    pub fn set_background_color(&mut self, node: NodeId, color: Option<String>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.background.color = color;
        }
    }

    /// Replaces a node's background image. Unknown nodes are ignored.
    pub fn set_background_image(&mut self, node: NodeId, image: Option<String>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.background.image = image;
        }
    }

    fn hit(&self, fixed_layer: bool, x: f64, y: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, node)| node.fixed == fixed_layer)
            .find(|(_, node)| node.rect.is_some_and(|rect| rect.contains(x, y)))
            .map(|(index, _)| NodeId(index))
    }
}

fn flatten(node: SnapshotNode, parent: Option<usize>, fixed: bool, out: &mut Vec<FlatNode>) {
    let index = out.len();
    let fixed = fixed || node.fixed;
    out.push(FlatNode {
        id: node.id,
        class: node.class,
        background: Background {
            color: node.background_color,
            image: node.background_image,
        },
        rect: node.rect,
        fixed,
        parent,
    });
    for child in node.children {
        flatten(child, Some(index), fixed, out);
    }
}

impl Surface for Snapshot {
    type Node = NodeId;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn nav_height(&self) -> Option<f64> {
        self.nav_height
    }

    fn element_at(&self, x: f64, y: f64) -> Option<NodeId> {
        let vp = self.viewport;
        if !(0.0..vp.width).contains(&x) || !(0.0..vp.height).contains(&y) {
            return None;
        }
        self.hit(true, x, y)
            .or_else(|| self.hit(false, x, y + vp.scroll_y))
    }

    fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn background(&self, node: &NodeId) -> Background {
        self.nodes
            .get(node.0)
            .map(|n| n.background.clone())
            .unwrap_or_default()
    }

    fn class_name(&self, node: &NodeId) -> Cow<'_, str> {
        self.nodes
            .get(node.0)
            .map(|n| Cow::Borrowed(n.class.as_str()))
            .unwrap_or(Cow::Borrowed(""))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes
            .get(node.0)
            .and_then(|n| n.parent)
            .map(NodeId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Snapshot {
        let body = SnapshotNode::new()
            .with_background_color("rgb(255, 255, 255)")
            .with_child(
                SnapshotNode::new()
                    .with_id("nav")
                    .fixed()
                    .with_rect(Rect::new(0.0, 0.0, 1000.0, 80.0))
                    .with_child(
                        SnapshotNode::new()
                            .with_id("logo")
                            .with_rect(Rect::new(0.0, 0.0, 200.0, 80.0)),
                    ),
            )
            .with_child(
                SnapshotNode::new()
                    .with_id("hero")
                    .with_class("bg-gray-900")
                    .with_rect(Rect::new(0.0, 0.0, 1000.0, 600.0))
                    .with_child(
                        SnapshotNode::new()
                            .with_id("card")
                            .with_rect(Rect::new(100.0, 100.0, 200.0, 200.0)),
                    ),
            )
            .with_child(
                SnapshotNode::new()
                    .with_id("footer")
                    .with_rect(Rect::new(0.0, 600.0, 1000.0, 400.0)),
            );
        Snapshot::new(Viewport::new(1000.0, 700.0), body).with_nav_height(80.0)
    }

    #[test]
    fn test_body_is_first_node() {
        let snap = page();
        assert_eq!(snap.body(), NodeId(0));
        assert_eq!(snap.parent(&NodeId(0)), None);
        assert_eq!(snap.len(), 6);
    }

    #[test]
    fn test_children_cover_parents() {
        let snap = page();
        let hit = snap.element_at(150.0, 150.0).unwrap();
        assert_eq!(snap.id_of(hit), Some("card"));

        let hit = snap.element_at(500.0, 300.0).unwrap();
        assert_eq!(snap.id_of(hit), Some("hero"));
    }

    #[test]
    fn test_fixed_layer_paints_on_top() {
        let snap = page();
        let hit = snap.element_at(50.0, 10.0).unwrap();
        assert_eq!(snap.id_of(hit), Some("logo"));
        let hit = snap.element_at(500.0, 10.0).unwrap();
        assert_eq!(snap.id_of(hit), Some("nav"));
    }

    #[test]
    fn test_scroll_moves_document_layer_only() {
        let mut snap = page();
        snap.set_scroll_y(300.0);

        // 400px into the viewport is 700px into the document.
        let hit = snap.element_at(500.0, 400.0).unwrap();
        assert_eq!(snap.id_of(hit), Some("footer"));

        let hit = snap.element_at(500.0, 10.0).unwrap();
        assert_eq!(snap.id_of(hit), Some("nav"));
    }

    #[test]
    fn test_probe_outside_viewport_or_content_is_none() {
        let snap = page();
        assert_eq!(snap.element_at(-1.0, 10.0), None);
        assert_eq!(snap.element_at(10.0, 700.0), None);
        assert_eq!(snap.element_at(1000.0, 10.0), None);

        let empty = Snapshot::new(Viewport::new(100.0, 100.0), SnapshotNode::new());
        assert_eq!(empty.element_at(50.0, 50.0), None);
    }

    #[test]
    fn test_parent_chain() {
        let snap = page();
        let card = snap.find("card").unwrap();
        let hero = snap.parent(&card).unwrap();
        assert_eq!(snap.id_of(hero), Some("hero"));
        assert_eq!(snap.parent(&hero), Some(snap.body()));
    }

    #[test]
    fn test_mutators() {
        let mut snap = page();
        let hero = snap.find("hero").unwrap();
        snap.set_class(hero, "bg-white");
        snap.set_background_image(hero, Some("url(night.jpg)".into()));
        assert_eq!(snap.class_name(&hero), "bg-white");
        assert_eq!(
            snap.background(&hero).image.as_deref(),
            Some("url(night.jpg)")
        );

        // Unknown handles are ignored rather than panicking.
        snap.set_class(NodeId(99), "x");
        assert_eq!(snap.class_name(&NodeId(99)), "");
    }

    #[test]
    fn test_from_yaml() {
        let snap = Snapshot::from_yaml(
            r#"
viewport: { width: 1280, height: 800, scroll_y: 40 }
nav_height: 72
body:
  background_color: "rgb(255, 255, 255)"
  children:
    - id: hero
      class: "bg-gray-900 text-white"
      rect: { x: 0, y: 0, width: 1280, height: 640 }
"#,
        )
        .unwrap();

        assert_eq!(snap.viewport().scroll_y, 40.0);
        assert_eq!(snap.nav_height(), Some(72.0));
        let hit = snap.element_at(640.0, 100.0).unwrap();
        assert_eq!(snap.id_of(hit), Some("hero"));
    }

    #[test]
    fn test_from_json() {
        let snap = Snapshot::from_json(
            r#"{"viewport": {"width": 10, "height": 10},
                "body": {"rect": {"x": 0, "y": 0, "width": 10, "height": 10}}}"#,
        )
        .unwrap();
        assert_eq!(snap.nav_height(), None);
        assert_eq!(snap.element_at(5.0, 5.0), Some(NodeId(0)));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let err = Snapshot::from_yaml(
            "viewport: { width: 1, height: 1 }\nbody: { colour: red }",
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::Yaml(_)));
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.yml");
        std::fs::write(&path, "viewport: { width: 10, height: 10 }\nbody: {}").unwrap();
        assert!(Snapshot::from_path(&path).is_ok());

        let txt = dir.path().join("page.txt");
        std::fs::write(&txt, "").unwrap();
        assert!(matches!(
            Snapshot::from_path(&txt).unwrap_err(),
            SnapshotError::UnsupportedFormat { .. }
        ));

        assert!(matches!(
            Snapshot::from_path(dir.path().join("missing.json")).unwrap_err(),
            SnapshotError::Io { .. }
        ));
    }
}
