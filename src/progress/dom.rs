//! An in-memory element tree following the page markup contract.
//!
//! [`Document`] keeps just enough of a DOM to host progress bars the way a
//! page stylesheet expects them: elements with a tag, an optional id, class
//! hooks and inline styles. [`Document::attach_status`] performs the one-time
//! setup around a target element and returns a [`DomStatus`] view.
//!
//! After attaching to `<canvas id="game">` the tree looks like:
//!
//! ```text
//! <div class="canvas-wrapper">
//!   <div class="progress-status" style="display: none">
//!     <div class="progress-track"><div class="progress-bar" style="width: 25%"></div></div>
//!   </div>
//!   <canvas id="game" class="loading"></canvas>
//! </div>
//! ```
//!
//! ```rust
//! use progressive_fetch::progress::dom::{Document, classes};
//!
//! # fn example() -> Result<(), progressive_fetch::Error> {
//! let document = Document::new();
//! let canvas = document.create_element("canvas");
//! document.set_id(canvas, "game");
//! document.append_child(document.body(), canvas)?;
//!
//! let status = document.attach_status("game")?;
//! assert!(document.has_class(canvas, classes::LOADING));
//! assert_eq!(document.style(status.element(), "display").as_deref(), Some("none"));
//! # Ok(())
//! # }
//! ```

use super::view::StatusView;
use crate::error::{Error, Result};

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Class hooks styled by the page stylesheet.
pub mod classes {
    /// Added to the target element once a controller is attached.
    pub const LOADING: &str = "loading";
    /// Wrapper inserted around the target element.
    pub const CANVAS_WRAPPER: &str = "canvas-wrapper";
    /// The shared status element hosting every progress track.
    pub const PROGRESS_STATUS: &str = "progress-status";
    /// One progress track per request.
    pub const PROGRESS_TRACK: &str = "progress-track";
    /// The fill inside a track; its width is the progress.
    pub const PROGRESS_BAR: &str = "progress-bar";
    /// Added to a fill whose transfer failed.
    pub const PROGRESS_BAR_FAILED: &str = "progress-bar--failed";
}

/// Index of an element in its [`Document`].
///
/// Only meaningful for the document that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            styles: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes[node.0].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn render(&self, node: NodeId, out: &mut String) {
        let n = &self.nodes[node.0];
        let _ = write!(out, "<{}", n.tag);
        if let Some(id) = &n.id {
            let _ = write!(out, " id=\"{}\"", escape_attr(id));
        }
        if !n.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&n.classes.join(" ")));
        }
        if !n.styles.is_empty() {
            let style: Vec<String> = n
                .styles
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", escape_attr(&style.join("; ")));
        }
        out.push('>');
        for &child in &n.children {
            self.render(child, out);
        }
        let _ = write!(out, "</{}>", n.tag);
    }
}

/// Escape `value` for use inside a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// A shared, mutable element tree rooted at a `<body>` element.
///
/// Cloning a document yields another handle to the same tree.
///
/// # Panics
///
/// Methods taking a [`NodeId`] panic if the id was created by a different
/// document.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Arc<Mutex<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty `<body>`.
    pub fn new() -> Self {
        Self {
            tree: Arc::new(Mutex::new(Tree {
                nodes: vec![Node::new("body")],
            })),
        }
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The root `<body>` element.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut tree = self.tree();
        tree.nodes.push(Node::new(tag));
        NodeId(tree.nodes.len() - 1)
    }

    /// Tag name of `node`.
    pub fn tag(&self, node: NodeId) -> String {
        self.tree().nodes[node.0].tag.clone()
    }

    /// Set the `id` attribute of `node`.
    pub fn set_id(&self, node: NodeId, id: &str) {
        self.tree().nodes[node.0].id = Some(id.to_string());
    }

    /// Finds the first element carrying `id`, attached or not.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree()
            .nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// Add `class` to `node` unless it is already there.
    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut tree = self.tree();
        let classes = &mut tree.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    /// Whether `node` carries `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree().nodes[node.0].classes.iter().any(|c| c == class)
    }

    /// Set an inline style property.
    pub fn set_style(&self, node: NodeId, property: &str, value: &str) {
        self.tree().nodes[node.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    /// Read an inline style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree().nodes[node.0].styles.get(property).cloned()
    }

    /// Parent of `node`, `None` for the body and detached elements.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree().nodes[node.0].parent
    }

    /// Children of `node`, in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree().nodes[node.0].children.clone()
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tree = self.tree();
        if tree.is_ancestor(child, parent) {
            return Err(Error::Internal(
                "cannot append an element inside itself".to_string(),
            ));
        }
        tree.detach(child);
        tree.nodes[child.0].parent = Some(parent);
        tree.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Move `child` into `parent`, right before `reference`.
    pub fn insert_before(&self, parent: NodeId, child: NodeId, reference: NodeId) -> Result<()> {
        let mut tree = self.tree();
        if tree.nodes[reference.0].parent != Some(parent) {
            return Err(Error::Internal(
                "reference element is not a child of the parent".to_string(),
            ));
        }
        if tree.is_ancestor(child, parent) {
            return Err(Error::Internal(
                "cannot insert an element inside itself".to_string(),
            ));
        }
        tree.detach(child);
        let index = tree.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(0);
        tree.nodes[child.0].parent = Some(parent);
        tree.nodes[parent.0].children.insert(index, child);
        Ok(())
    }

    /// Serialize the tree under `node` as markup.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree().render(node, &mut out);
        out
    }

    /// Prepare the element `target_id` for progress reporting.
    ///
    /// Marks it `loading`, wraps it in a `canvas-wrapper` and inserts a hidden
    /// `progress-status` element right before it inside the wrapper.
    pub fn attach_status(&self, target_id: &str) -> Result<DomStatus> {
        let target = self
            .get_element_by_id(target_id)
            .ok_or_else(|| Error::ElementNotFound(target_id.to_string()))?;
        let parent = self.parent(target).ok_or_else(|| {
            Error::Internal(format!("element #{} is not attached to the document", target_id))
        })?;

        self.add_class(target, classes::LOADING);

        let wrapper = self.create_element("div");
        self.add_class(wrapper, classes::CANVAS_WRAPPER);
        self.insert_before(parent, wrapper, target)?;
        self.append_child(wrapper, target)?;

        let status = self.create_element("div");
        self.add_class(status, classes::PROGRESS_STATUS);
        self.set_style(status, "display", "none");
        self.insert_before(wrapper, status, target)?;

        debug!(target_id, "attached progress status");
        Ok(DomStatus {
            document: self.clone(),
            status,
        })
    }
}

/// A `progress-status` element acting as a [`StatusView`].
#[derive(Debug, Clone)]
pub struct DomStatus {
    document: Document,
    status: NodeId,
}

/// The track and fill elements of one progress widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomBar {
    /// The `progress-track` element, a child of the status element.
    pub track: NodeId,
    /// The `progress-bar` element whose width shows the progress.
    pub fill: NodeId,
}

impl DomStatus {
    /// The status element.
    pub fn element(&self) -> NodeId {
        self.status
    }

    /// The document holding the status element.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the status element is currently displayed.
    pub fn is_visible(&self) -> bool {
        self.document.style(self.status, "display").as_deref() == Some("block")
    }
}

/// CSS width for `loaded` out of `total` bytes, e.g. `"25%"`.
///
/// Returns `None` when the total is unknown or zero.
pub fn progress_width(loaded: u64, total: Option<u64>) -> Option<String> {
    match total {
        Some(total) if total > 0 => Some(format!("{}%", 100.0 * loaded as f64 / total as f64)),
        _ => None,
    }
}

impl StatusView for DomStatus {
    type Bar = DomBar;

    fn append_bar(&self) -> DomBar {
        let track = self.document.create_element("div");
        self.document.add_class(track, classes::PROGRESS_TRACK);
        let fill = self.document.create_element("div");
        self.document.add_class(fill, classes::PROGRESS_BAR);

        // Both are fresh, so neither append can form a cycle.
        let _ = self.document.append_child(track, fill);
        let _ = self.document.append_child(self.status, track);
        DomBar { track, fill }
    }

    fn update_bar(&self, bar: &DomBar, loaded: u64, total: Option<u64>) {
        if let Some(width) = progress_width(loaded, total) {
            self.document.set_style(bar.fill, "width", &width);
        }
    }

    fn complete_bar(&self, bar: &DomBar, _total: Option<u64>) {
        self.document.set_style(bar.fill, "width", "100%");
    }

    fn fail_bar(&self, bar: &DomBar, _loaded: u64) {
        self.document.add_class(bar.fill, classes::PROGRESS_BAR_FAILED);
    }

    fn set_visible(&self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        self.document.set_style(self.status, "display", display);
    }
}
