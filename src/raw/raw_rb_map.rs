use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};

/// The core Red-Black tree implementation backing `RbTreeMap`.
///
/// Nodes live in an append-only arena and refer to each other by `Handle`,
/// so the parent back-link is an index with no ownership semantics.
#[derive(Clone)]
pub(crate) struct RawRbMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of distinct keys in the tree.
    len: usize,
}

/// Result of descending the tree for a key.
pub(crate) enum SearchResult {
    /// Key present at the given node.
    Found(Handle),
    /// Key absent; an insertion would attach at this parent slot.
    /// `None` when the tree is empty.
    Vacant(Option<(Handle, Side)>),
}

/// Which insertion fix-up rule applies at the node under consideration.
///
/// Computed from (is-root, parent color, uncle color, node→parent→
/// grandparent side chain); exactly one variant applies per step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FixupCase {
    /// Node is the root: color it black and stop.
    Root,
    /// Parent is black: nothing to repair.
    ParentBlack,
    /// Parent and uncle are both red: recolor and continue at the
    /// grandparent.
    RedUncle,
    /// Uncle black or vacant, node and parent on opposite sides of the
    /// grandparent: rotate the parent, then continue as a line.
    Triangle,
    /// Uncle black or vacant, node and parent on the same side: recolor
    /// and rotate the grandparent; terminal.
    Line,
}

impl<K, V> RawRbMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of distinct keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no keys.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the node capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Clears all entries from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the root handle, if any.
    #[inline]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns true if `handle` refers to a red node. Vacant positions
    /// count as black.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.node(h).color().is_red())
    }

    // ─── Family navigation ──────────────────────────────────────────────

    /// Returns the parent of `handle`, or `None` for the root.
    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent()
    }

    /// Returns the grandparent of `handle`, if it has one.
    pub(crate) fn grandparent(&self, handle: Handle) -> Option<Handle> {
        self.parent(handle).and_then(|parent| self.parent(parent))
    }

    /// Returns the uncle of `handle`: the sibling of its parent, if the
    /// grandparent exists and has one.
    pub(crate) fn uncle(&self, handle: Handle) -> Option<Handle> {
        let parent = self.parent(handle)?;
        let grandparent = self.parent(parent)?;
        self.node(grandparent).child(self.side_of(grandparent, parent).opposite())
    }

    /// Returns which child slot of `parent` holds `child`.
    fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.node(parent).left() == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Walks to the extreme node of the subtree at `handle` on `side`.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.node(handle).child(side) {
            handle = next;
        }
        handle
    }

    /// Returns the handle holding the minimum key, if any.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root().map(|root| self.extreme(root, Side::Left))
    }

    /// Returns the handle holding the maximum key, if any.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root().map(|root| self.extreme(root, Side::Right))
    }

    /// Returns the in-order neighbor of `handle` on `side`:
    /// `Side::Right` is the successor, `Side::Left` the predecessor.
    pub(crate) fn neighbor(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut current = handle;
        while let Some(parent) = self.node(current).parent() {
            if self.node(parent).child(side.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    // ─── Rotation primitives ────────────────────────────────────────────

    /// Rotates left at `handle`, promoting its right child.
    ///
    /// # Panics
    ///
    /// Panics if the right child is vacant; calling a rotation on such a
    /// node is a programming error, not a recoverable condition.
    pub(crate) fn rotate_left(&mut self, handle: Handle) {
        self.rotate(handle, Side::Left);
    }

    /// Rotates right at `handle`, promoting its left child.
    ///
    /// # Panics
    ///
    /// Panics if the left child is vacant.
    pub(crate) fn rotate_right(&mut self, handle: Handle) {
        self.rotate(handle, Side::Right);
    }

    /// Rotates at `handle` in direction `dir`, promoting the child on the
    /// opposite side. Preserves BST order, touches no colors, and rewires
    /// the parent back-links of every moved node.
    fn rotate(&mut self, handle: Handle, dir: Side) {
        let Some(promoted) = self.node(handle).child(dir.opposite()) else {
            panic!("`RawRbMap::rotate()` - missing the child to promote!");
        };

        let old_parent = self.node(handle).parent();
        let transferred = self.node(promoted).child(dir);

        // The promoted node's inner subtree changes sides.
        self.node_mut(handle).set_child(dir.opposite(), transferred);
        if let Some(transferred) = transferred {
            self.node_mut(transferred).set_parent(Some(handle));
        }

        // The promoted node takes the rotated node's place.
        self.node_mut(promoted).set_parent(old_parent);
        match old_parent {
            Some(parent) => {
                let side = self.side_of(parent, handle);
                self.node_mut(parent).set_child(side, Some(promoted));
            }
            None => self.root = Some(promoted),
        }

        // The rotated node descends below it.
        self.node_mut(promoted).set_child(dir, Some(handle));
        self.node_mut(handle).set_parent(Some(promoted));
    }

    /// Toggles the color of `handle` and of both its children.
    ///
    /// # Panics
    ///
    /// Panics if either child is vacant; the flip is only meaningful on a
    /// node with two children.
    pub(crate) fn flip_colors(&mut self, handle: Handle) {
        let node = self.node(handle);
        let (Some(left), Some(right)) = (node.left(), node.right()) else {
            panic!("`RawRbMap::flip_colors()` - node is missing a child!");
        };
        for h in [handle, left, right] {
            let node = self.node_mut(h);
            node.set_color(node.color().flipped());
        }
    }
}

impl<K: Ord, V> RawRbMap<K, V> {
    /// Descends from the root comparing `key`, returning either the node
    /// holding it or the slot where it would be inserted.
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut attach = None;
        let mut current = self.root;

        while let Some(handle) = current {
            match key.cmp(self.node(handle).key().borrow()) {
                Ordering::Equal => return SearchResult::Found(handle),
                Ordering::Less => {
                    attach = Some((handle, Side::Left));
                    current = self.node(handle).left();
                }
                Ordering::Greater => {
                    attach = Some((handle, Side::Right));
                    current = self.node(handle).right();
                }
            }
        }

        SearchResult::Vacant(attach)
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(key) {
            SearchResult::Found(handle) => Some(self.node(handle).value()),
            SearchResult::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(key) {
            SearchResult::Found(handle) => Some(self.node_mut(handle).value_mut()),
            SearchResult::Vacant(_) => None,
        }
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(key) {
            SearchResult::Found(handle) => {
                let node = self.node(handle);
                Some((node.key(), node.value()))
            }
            SearchResult::Vacant(_) => None,
        }
    }

    /// Returns true if the tree contains the specified key.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        matches!(self.search(key), SearchResult::Found(_))
    }

    // ─── Insertion engine ───────────────────────────────────────────────

    /// Inserts a key-value pair, rebalancing as needed.
    ///
    /// A key already present has its value replaced in place: structure,
    /// colors and length are untouched and the old value is returned.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            SearchResult::Found(handle) => {
                Some(core::mem::replace(self.node_mut(handle).value_mut(), value))
            }
            SearchResult::Vacant(attach) => {
                let parent = attach.map(|(parent, _)| parent);
                let inserted = self.nodes.alloc(Node::new(key, value, parent));
                match attach {
                    Some((parent, side)) => self.node_mut(parent).set_child(side, Some(inserted)),
                    None => self.root = Some(inserted),
                }
                self.len += 1;
                self.insert_fixup(inserted);
                None
            }
        }
    }

    /// Classifies which fix-up rule applies at `handle`.
    fn fixup_case(&self, handle: Handle) -> FixupCase {
        let Some(parent) = self.node(handle).parent() else {
            return FixupCase::Root;
        };
        if self.node(parent).color().is_black() {
            return FixupCase::ParentBlack;
        }
        if self.is_red(self.uncle(handle)) {
            return FixupCase::RedUncle;
        }
        // A red parent is never the root, so the grandparent exists.
        let grandparent = self
            .node(parent)
            .parent()
            .expect("`RawRbMap::fixup_case()` - red parent without a grandparent!");
        if self.side_of(parent, handle) == self.side_of(grandparent, parent) {
            FixupCase::Line
        } else {
            FixupCase::Triangle
        }
    }

    /// Restores the color invariants after `inserted` was attached red,
    /// walking upward one rule at a time.
    fn insert_fixup(&mut self, inserted: Handle) {
        let mut current = inserted;
        loop {
            match self.fixup_case(current) {
                FixupCase::Root => {
                    self.node_mut(current).set_color(Color::Black);
                    break;
                }
                FixupCase::ParentBlack => break,
                FixupCase::RedUncle => {
                    // Parent and uncle red, grandparent black: one flip
                    // moves the potential violation to the grandparent.
                    let grandparent = self
                        .grandparent(current)
                        .expect("`RawRbMap::insert_fixup()` - red uncle without a grandparent!");
                    self.flip_colors(grandparent);
                    current = grandparent;
                }
                FixupCase::Triangle => {
                    let parent = self
                        .parent(current)
                        .expect("`RawRbMap::insert_fixup()` - triangle without a parent!");
                    let grandparent = self
                        .parent(parent)
                        .expect("`RawRbMap::insert_fixup()` - triangle without a grandparent!");
                    // Straighten the bend: the parent rotates toward its
                    // own side of the grandparent and drops below `current`.
                    match self.side_of(grandparent, parent) {
                        Side::Left => self.rotate_left(parent),
                        Side::Right => self.rotate_right(parent),
                    }
                    current = parent;
                }
                FixupCase::Line => {
                    let parent = self
                        .parent(current)
                        .expect("`RawRbMap::insert_fixup()` - line without a parent!");
                    let grandparent = self
                        .parent(parent)
                        .expect("`RawRbMap::insert_fixup()` - line without a grandparent!");
                    self.node_mut(parent).set_color(Color::Black);
                    self.node_mut(grandparent).set_color(Color::Red);
                    match self.side_of(grandparent, parent) {
                        Side::Left => self.rotate_right(grandparent),
                        Side::Right => self.rotate_left(grandparent),
                    }
                    break;
                }
            }
        }
    }

    /// Consumes the tree, yielding all entries in ascending key order.
    pub(crate) fn into_sorted_vec(self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle.to_index());
            current = self.neighbor(handle, Side::Right);
        }

        let mut slots: Vec<Option<(K, V)>> =
            self.nodes.into_slots().into_iter().map(|node| Some(node.into_entry())).collect();
        order
            .into_iter()
            .map(|index| {
                slots[index].take().expect("`RawRbMap::into_sorted_vec()` - slot visited twice!")
            })
            .collect()
    }
}

impl<K, V> RawRbMap<K, V> {
    // ─── Utility surface ────────────────────────────────────────────────

    /// Returns the number of nodes on the longest root-to-leaf path.
    /// An empty tree has height 0; a single node has height 1.
    pub(crate) fn height(&self) -> usize {
        self.height_below(self.root)
    }

    fn height_below(&self, handle: Option<Handle>) -> usize {
        match handle {
            None => 0,
            Some(handle) => {
                let node = self.node(handle);
                1 + core::cmp::max(self.height_below(node.left()), self.height_below(node.right()))
            }
        }
    }

    // ─── Validators ─────────────────────────────────────────────────────

    /// Checks that the root, if present, is black.
    pub(crate) fn root_is_black(&self) -> bool {
        self.root.is_none_or(|root| self.node(root).color().is_black())
    }

    /// Checks that every reachable node carries one of the two defined
    /// colors. The representation admits no other state; the walk is kept
    /// so the check stays independently callable.
    pub(crate) fn node_colors_valid(&self) -> bool {
        self.node_colors_valid_below(self.root)
    }

    fn node_colors_valid_below(&self, handle: Option<Handle>) -> bool {
        let Some(handle) = handle else { return true };
        let node = self.node(handle);
        let defined = matches!(node.color(), Color::Red | Color::Black);
        defined
            && self.node_colors_valid_below(node.left())
            && self.node_colors_valid_below(node.right())
    }

    /// Checks that no red node has a red child anywhere in the tree.
    pub(crate) fn no_red_red(&self) -> bool {
        self.no_red_red_below(self.root)
    }

    fn no_red_red_below(&self, handle: Option<Handle>) -> bool {
        let Some(handle) = handle else { return true };
        let node = self.node(handle);
        if node.color().is_red() && (self.is_red(node.left()) || self.is_red(node.right())) {
            return false;
        }
        self.no_red_red_below(node.left()) && self.no_red_red_below(node.right())
    }

    /// Checks that every path from any node down to a vacant position
    /// carries the same number of black nodes.
    pub(crate) fn black_height_balanced(&self) -> bool {
        self.black_height_below(self.root).is_some()
    }

    /// Black-height of the subtree at `handle`, counting a vacant position
    /// as one black unit on both sides. `None` when two sibling subtrees
    /// disagree anywhere below.
    fn black_height_below(&self, handle: Option<Handle>) -> Option<usize> {
        let Some(handle) = handle else { return Some(1) };
        let node = self.node(handle);
        let left = self.black_height_below(node.left())?;
        let right = self.black_height_below(node.right())?;
        (left == right).then(|| left + usize::from(node.color().is_black()))
    }

    /// Runs all four structural checks.
    pub(crate) fn is_valid(&self) -> bool {
        self.root_is_black()
            && self.node_colors_valid()
            && self.no_red_red()
            && self.black_height_balanced()
    }
}
