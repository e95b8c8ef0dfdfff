//! Arena-based element tree.
//!
//! This module implements the builder's output representation using arena
//! allocation with typed indices. All elements live in a contiguous
//! `Vec<ElementData>` owned by the `Tree`, and are referenced by
//! `ElementId` — a newtype over `NonZeroU32`.
//!
//! This design provides O(1) element access, cache-friendly layout, and
//! safe bulk deallocation (drop the `Tree` and everything is freed). The
//! tree is append-only: elements are created, given text or children, and
//! never detached or reordered, so navigation is a per-element child vector
//! rather than sibling links.
//!
//! An element carries either a text payload or children, never both.

use std::num::NonZeroU32;

/// A typed index into the tree's element arena.
///
/// `ElementId` is a newtype over `NonZeroU32`, meaning it can never be zero
/// and `Option<ElementId>` has the same size as `ElementId` (niche
/// optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ElementId(NonZeroU32);

impl ElementId {
    /// Creates an `ElementId` from a raw arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0.
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("ElementId index must be non-zero"))
    }

    /// Returns the raw index as a `usize` for indexing into the arena.
    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// Storage for a single element in the tree arena.
///
/// Access individual elements via [`Tree::element`].
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element name. Always a valid XML name — the builder encodes
    /// every name before creating an element.
    pub name: String,
    /// The text payload. Present only on leaf elements.
    pub text: Option<String>,
    /// Parent element, if any. The root has no parent.
    pub parent: Option<ElementId>,
    /// Child elements, in append order.
    pub children: Vec<ElementId>,
}

impl ElementData {
    fn new(name: String) -> Self {
        Self {
            name,
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An element tree.
///
/// The `Tree` owns all elements in an arena and is created with its root
/// element in place. Each build call produces a fresh, exclusively-owned
/// tree.
///
/// # Examples
///
/// ```
/// use treedump::tree::Tree;
///
/// let mut tree = Tree::new("root");
/// let child = tree.create_element("child");
/// tree.append_child(tree.root(), child);
/// assert_eq!(tree.name(tree.root()), "root");
/// assert_eq!(tree.children(tree.root()).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// The element arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<ElementData>,
    /// The root element id.
    root: ElementId,
}

impl Tree {
    /// Creates a tree containing a single root element with the given name.
    #[must_use]
    pub fn new(root_name: &str) -> Self {
        let mut nodes = Vec::with_capacity(16);
        // Index 0: placeholder (ElementId uses NonZeroU32)
        nodes.push(ElementData::new(String::new()));
        // Index 1: the root element
        nodes.push(ElementData::new(root_name.to_string()));
        Self {
            nodes,
            root: ElementId::from_index(1),
        }
    }

    /// Returns the root element id.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Returns a reference to the `ElementData` for the given element.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a valid element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> &ElementData {
        &self.nodes[id.as_index()]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut ElementData {
        &mut self.nodes[id.as_index()]
    }

    /// Returns the name of an element.
    #[must_use]
    pub fn name(&self, id: ElementId) -> &str {
        &self.element(id).name
    }

    /// Returns the text payload of an element, if it has one.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).text.as_deref()
    }

    /// Returns the parent of an element.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).parent
    }

    /// Returns an iterator over the children of an element, in order.
    pub fn children(&self, id: ElementId) -> Children<'_> {
        Children {
            inner: self.element(id).children.iter(),
        }
    }

    /// Returns the number of children of an element.
    #[must_use]
    pub fn child_count(&self, id: ElementId) -> usize {
        self.element(id).children.len()
    }

    /// Returns the total number of elements in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1 // subtract placeholder at index 0
    }

    // --- Mutation ---

    /// Allocates a new detached element in the arena and returns its id.
    pub fn create_element(&mut self, name: &str) -> ElementId {
        let index = self.nodes.len();
        self.nodes.push(ElementData::new(name.to_string()));
        ElementId::from_index(index)
    }

    /// Sets the text payload of an element.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if the element already has children: an
    /// element carries text or children, never both.
    pub fn set_text(&mut self, id: ElementId, text: String) {
        debug_assert!(
            self.element(id).children.is_empty(),
            "element has children; it cannot also carry text"
        );
        self.element_mut(id).text = Some(text);
    }

    /// Appends a child element to the end of a parent's child list.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `child` already has a parent, or if the
    /// parent carries a text payload.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        debug_assert!(
            self.element(child).parent.is_none(),
            "child already has a parent"
        );
        debug_assert!(
            self.element(parent).text.is_none(),
            "element has a text payload; it cannot also have children"
        );

        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(child);
    }
}

/// Iterator over the children of an element.
pub struct Children<'a> {
    inner: std::slice::Iter<'a, ElementId>,
}

impl Iterator for Children<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}
