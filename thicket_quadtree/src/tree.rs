// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core quadtree implementation: structure, insertion and splitting, queries.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use kurbo::{Point, Rect};

use crate::types::{PointKey, Position, Quadrant, TreeConfig};

/// A point-indexed region quadtree node.
///
/// The root value *is* the tree: every node covers an axis-aligned half-open
/// box (`[left, right) × [top, bottom)`) and is either a leaf holding up to
/// `capacity` items keyed by their exact coordinates, or an internal node
/// holding exactly four children that tile its box around its center. A leaf
/// that an insert finds full splits into four children and redistributes its
/// items; nodes never merge back (removal and rebalancing are out of scope).
///
/// Items supply their location through the [`Position`] trait, and two items
/// at exactly the same coordinates cannot coexist (see [`PointKey`]).
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use thicket_quadtree::{Capacity, QuadTree, TreeConfig};
///
/// let mut tree = QuadTree::new(TreeConfig {
///     capacity: Capacity::C16,
///     width: 100.0,
///     height: 100.0,
///     center: Point::ZERO,
/// });
///
/// assert!(tree.insert(Point::new(10.0, -4.0)));
/// assert_eq!(tree.get(Point::new(10.0, -4.0)), Some(&Point::new(10.0, -4.0)));
///
/// // A second item at the same exact coordinates is rejected.
/// assert!(!tree.insert(Point::new(10.0, -4.0)));
/// assert_eq!(tree.len(), 1);
/// ```
pub struct QuadTree<T> {
    /// Half-open region covered by this node. Immutable once constructed.
    region: Rect,
    /// Leaf item limit, inherited unchanged by every child.
    capacity: usize,
    /// Distance from the root. Informational only; splitting is never
    /// depth-bounded.
    depth: usize,
    body: Body<T>,
}

/// A node is exactly one of: a leaf owning items, or an internal node owning
/// four children. There is no state in which it holds both (or neither).
enum Body<T> {
    Leaf(HashMap<PointKey, T>),
    Internal(Box<[QuadTree<T>; 4]>),
}

impl<T> core::fmt::Debug for QuadTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("region", &self.region)
            .field("depth", &self.depth)
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("is_leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<T> Default for QuadTree<T> {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl<T> QuadTree<T> {
    /// Create an empty tree (a root leaf at depth 0) from a configuration.
    pub fn new(config: TreeConfig) -> Self {
        let region = config.region();
        debug_assert!(
            region.width() > 0.0 && region.height() > 0.0,
            "tree region must have positive extent"
        );
        Self {
            region,
            capacity: config.capacity.get(),
            depth: 0,
            body: Body::Leaf(HashMap::new()),
        }
    }

    /// Derive the child node for one quadrant of this node's region.
    ///
    /// Child corners come directly from the parent's corners and center, so
    /// the four children tile the parent exactly, with no float drift at the
    /// shared edges.
    fn child(&self, quadrant: Quadrant) -> Self {
        let r = self.region;
        let c = r.center();
        let region = match quadrant {
            Quadrant::TopLeft => Rect::new(r.x0, r.y0, c.x, c.y),
            Quadrant::TopRight => Rect::new(c.x, r.y0, r.x1, c.y),
            Quadrant::BottomLeft => Rect::new(r.x0, c.y, c.x, r.y1),
            Quadrant::BottomRight => Rect::new(c.x, c.y, r.x1, r.y1),
        };
        Self {
            region,
            capacity: self.capacity,
            depth: self.depth + 1,
            body: Body::Leaf(HashMap::new()),
        }
    }

    /// The half-open region covered by this node.
    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Distance from the root (the root is 0).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The leaf item limit this tree was built with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this node is a leaf (holds items rather than children).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.body, Body::Leaf(_))
    }

    /// Whether a leaf has reached its capacity. Internal nodes hold no items
    /// and are never full.
    pub fn is_full(&self) -> bool {
        match &self.body {
            Body::Leaf(items) => items.len() >= self.capacity,
            Body::Internal(_) => false,
        }
    }

    /// Half-open box test: left/top edges inclusive, right/bottom exclusive.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        self.region.contains(p)
    }

    /// Number of items stored in this subtree.
    pub fn len(&self) -> usize {
        match &self.body {
            Body::Leaf(items) => items.len(),
            Body::Internal(children) => children.iter().map(Self::len).sum(),
        }
    }

    /// Whether this subtree stores no items.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            Body::Leaf(items) => items.is_empty(),
            Body::Internal(children) => children.iter().all(Self::is_empty),
        }
    }

    /// The item stored at exactly this coordinate, if any.
    ///
    /// Returns `None` when the point lies outside this node's box or no item
    /// occupies that exact spot. There is no nearest-match fallback.
    pub fn get(&self, p: Point) -> Option<&T> {
        if !self.region.contains(p) {
            return None;
        }
        match &self.body {
            Body::Leaf(items) => items.get(&PointKey::new(p)),
            Body::Internal(children) => {
                children[Quadrant::of(self.region.center(), p).index()].get(p)
            }
        }
    }

    /// Descend to the leaf whose region covers `p`.
    ///
    /// Returns `None` if `p` lies outside this node's box. Useful for
    /// inspecting tree shape (for example, a located leaf with `depth() > 0`
    /// proves a split happened).
    pub fn leaf_for(&self, p: Point) -> Option<&Self> {
        if !self.region.contains(p) {
            return None;
        }
        match &self.body {
            Body::Leaf(_) => Some(self),
            Body::Internal(children) => {
                children[Quadrant::of(self.region.center(), p).index()].leaf_for(p)
            }
        }
    }

    /// Visit every item in this subtree.
    ///
    /// Leaves are visited in depth-first quadrant order (upper-left first);
    /// the order within one leaf is the item map's and is unspecified.
    pub fn visit<'s, F: FnMut(&'s T)>(&'s self, mut f: F) {
        self.visit_inner(&mut f);
    }

    fn visit_inner<'s, F: FnMut(&'s T)>(&'s self, f: &mut F) {
        match &self.body {
            Body::Leaf(items) => {
                for item in items.values() {
                    f(item);
                }
            }
            Body::Internal(children) => {
                for child in children.iter() {
                    child.visit_inner(f);
                }
            }
        }
    }

    /// Collect every item in this subtree.
    pub fn items(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len());
        self.visit(|item| out.push(item));
        out
    }

    /// Collect the items satisfying `pred`, visiting the whole subtree.
    pub fn filter<F: FnMut(&T) -> bool>(&self, mut pred: F) -> Vec<&T> {
        let mut out = Vec::new();
        self.visit(|item| {
            if pred(item) {
                out.push(item);
            }
        });
        out
    }

    /// The first item satisfying `pred`, in depth-first quadrant order.
    ///
    /// Short-circuits on the first hit. As with [`visit`][Self::visit], the
    /// order within one leaf is unspecified.
    pub fn first<F: FnMut(&T) -> bool>(&self, mut pred: F) -> Option<&T> {
        self.first_inner(&mut pred)
    }

    fn first_inner<'s, F: FnMut(&T) -> bool>(&'s self, pred: &mut F) -> Option<&'s T> {
        match &self.body {
            Body::Leaf(items) => items.values().find(|&item| pred(item)),
            Body::Internal(children) => children.iter().find_map(|c| c.first_inner(pred)),
        }
    }

    /// Search the subtree for an item equal to `target` (by the item type's
    /// own equality, not by coordinates) and return its coordinate key.
    ///
    /// Returns `None` when no stored item compares equal.
    pub fn position_of(&self, target: &T) -> Option<PointKey>
    where
        T: PartialEq,
    {
        match &self.body {
            Body::Leaf(items) => items
                .iter()
                .find_map(|(key, item)| (item == target).then_some(*key)),
            Body::Internal(children) => children.iter().find_map(|c| c.position_of(target)),
        }
    }

    /// Discard every item and child in this subtree, resetting the node to an
    /// empty leaf.
    ///
    /// Geometry, depth, and capacity persist; the subtree shape does not.
    /// Internal nodes revert to leaf mode and their children are dropped
    /// permanently.
    pub fn clear(&mut self) {
        self.body = Body::Leaf(HashMap::new());
    }
}

impl<T: Position> QuadTree<T> {
    /// Insert an item at its own coordinates.
    ///
    /// Returns `false` (with no mutation of stored items) when the item's
    /// position lies outside this node's box, or when another item already
    /// occupies that exact coordinate. Inserting into a full leaf first
    /// splits it, redistributes the stored items into the four new children,
    /// and then retries; the cascade can deepen the tree by several levels
    /// when items are tightly clustered.
    pub fn insert(&mut self, item: T) -> bool {
        let p = item.position();
        if !self.region.contains(p) {
            return false;
        }
        match &mut self.body {
            Body::Internal(children) => {
                children[Quadrant::of(self.region.center(), p).index()].insert(item)
            }
            Body::Leaf(items) if items.len() < self.capacity => {
                match items.entry(PointKey::new(p)) {
                    Entry::Occupied(_) => false,
                    Entry::Vacant(slot) => {
                        let _ = slot.insert(item);
                        true
                    }
                }
            }
            Body::Leaf(_) => {
                self.split();
                self.insert(item)
            }
        }
    }

    /// Convert a full leaf into an internal node and redistribute its items.
    fn split(&mut self) {
        let items = match &mut self.body {
            Body::Leaf(items) => core::mem::take(items),
            Body::Internal(_) => {
                debug_assert!(false, "split called on an internal node");
                return;
            }
        };
        self.body = Body::Internal(Box::new([
            self.child(Quadrant::TopLeft),
            self.child(Quadrant::TopRight),
            self.child(Quadrant::BottomLeft),
            self.child(Quadrant::BottomRight),
        ]));
        let center = self.region.center();
        let Body::Internal(children) = &mut self.body else {
            return;
        };
        for (key, item) in items {
            // The children start empty with the same capacity, so moving at
            // most `capacity` items cannot overflow any of them.
            let moved = children[Quadrant::of(center, key.point()).index()].insert(item);
            debug_assert!(moved, "redistributed item must land in its quadrant");
        }
    }

    /// Collect every item within `radius` (Euclidean) of `center`.
    ///
    /// The returned `bool` reflects only whether `center` lies inside this
    /// node's box; it says nothing about whether any items were collected,
    /// so callers must inspect the collection separately. This is the defined
    /// contract, mirroring the box-containment entry test: when `center` is
    /// outside the box the call returns `(false, vec![])` without descending,
    /// and once inside, every item in the subtree is distance-tested with no
    /// further circle/box pruning.
    pub fn within_radius(&self, center: Point, radius: f64) -> (bool, Vec<&T>) {
        if !self.region.contains(center) {
            return (false, Vec::new());
        }
        let r2 = radius * radius;
        let mut hits = Vec::new();
        self.visit(|item| {
            if item.position().distance_squared(center) <= r2 {
                hits.push(item);
            }
        });
        (true, hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Capacity;

    /// Test item with an identity separate from its coordinates.
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct Marker {
        id: u32,
        at: Point,
    }

    impl Position for Marker {
        fn position(&self) -> Point {
            self.at
        }
    }

    fn marker(id: u32, x: f64, y: f64) -> Marker {
        Marker {
            id,
            at: Point::new(x, y),
        }
    }

    /// Capacity 16 over the box `[-50, 50) × [-50, 50)`.
    fn small_tree() -> QuadTree<Marker> {
        QuadTree::new(TreeConfig {
            capacity: Capacity::C16,
            width: 100.0,
            height: 100.0,
            center: Point::ZERO,
        })
    }

    #[test]
    fn insert_then_get_roundtrip() {
        let mut tree = small_tree();
        let m = marker(7, 12.5, -3.25);
        assert!(tree.insert(m), "in-bounds insert must succeed");
        assert_eq!(tree.get(m.at), Some(&m));
        assert_eq!(tree.get(Point::new(12.5, -3.0)), None, "no nearest match");
    }

    #[test]
    fn out_of_bounds_insert_is_rejected() {
        let mut tree = small_tree();
        assert!(!tree.insert(marker(1, 50.0, 0.0)), "right edge is exclusive");
        assert!(!tree.insert(marker(2, 0.0, -50.5)));
        assert_eq!(tree.len(), 0, "failed inserts must not mutate");
        assert!(tree.is_leaf());
    }

    #[test]
    fn boundary_edges_are_half_open() {
        let tree = small_tree();
        assert!(tree.contains_point(Point::new(-50.0, -50.0)));
        assert!(!tree.contains_point(Point::new(50.0, -50.0)));
        assert!(!tree.contains_point(Point::new(-50.0, 50.0)));
    }

    #[test]
    fn duplicate_coordinate_is_rejected() {
        let mut tree = small_tree();
        let first = marker(1, 5.0, 5.0);
        let second = marker(2, 5.0, 5.0);
        assert!(tree.insert(first));
        assert!(!tree.insert(second), "occupied coordinate must reject");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(first.at), Some(&first), "first item survives");
    }

    #[test]
    fn overflow_splits_the_leaf() {
        let mut tree = small_tree();
        // 17 distinct coordinates, all in the bottom-right quadrant.
        for i in 0..17 {
            let m = marker(i, 1.0 + f64::from(i), 1.0 + f64::from(i));
            assert!(tree.insert(m), "insert {i} must succeed");
        }
        assert!(!tree.is_leaf(), "capacity + 1 items must force a split");
        assert_eq!(tree.len(), 17);

        let leaf = tree.leaf_for(Point::new(1.0, 1.0)).unwrap();
        assert!(leaf.depth() > 0, "located leaf must sit below the root");

        for i in 0..17 {
            let at = Point::new(1.0 + f64::from(i), 1.0 + f64::from(i));
            assert_eq!(tree.get(at).map(|m| m.id), Some(i));
        }

        let (in_box, hits) = tree.within_radius(Point::ZERO, 200.0);
        assert!(in_box, "search center lies inside the root box");
        assert_eq!(hits.len(), 17, "radius 200 covers every item");
    }

    #[test]
    fn split_children_tile_the_parent_exactly() {
        let mut tree = small_tree();
        for i in 0..17 {
            assert!(tree.insert(marker(i, -40.0 + 2.0 * f64::from(i), -40.0)));
        }
        assert!(!tree.is_leaf());
        // The untouched first-level children are still leaves with regions
        // derived exactly from the parent's corners and center.
        let top_right = tree.leaf_for(Point::new(10.0, -10.0)).unwrap();
        assert_eq!(top_right.region(), Rect::new(0.0, -50.0, 50.0, 0.0));
        let bottom_right = tree.leaf_for(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(bottom_right.region(), Rect::new(0.0, 0.0, 50.0, 50.0));
        // Shared edges belong to the right/bottom child, never both.
        assert_eq!(
            tree.leaf_for(Point::new(0.0, -25.0)).unwrap().region().x0,
            0.0,
            "a point on the splitting axis lands in the right half"
        );
    }

    #[test]
    fn duplicate_into_full_leaf_splits_then_rejects() {
        let mut tree = small_tree();
        for i in 0..16 {
            assert!(tree.insert(marker(i, f64::from(i), 0.0)));
        }
        assert!(tree.is_leaf(), "exactly capacity items fit without a split");
        // The incoming duplicate still triggers the split; the rejection
        // happens at the child leaf it descends into.
        assert!(!tree.insert(marker(99, 3.0, 0.0)));
        assert!(!tree.is_leaf(), "the split itself is not rolled back");
        assert_eq!(tree.len(), 16);
        assert_eq!(tree.get(Point::new(3.0, 0.0)).map(|m| m.id), Some(3));
    }

    #[test]
    fn len_matches_items() {
        let mut tree = small_tree();
        for i in 0..40 {
            let x = f64::from(i % 7) * 13.0 - 45.0;
            let y = f64::from(i / 7) * 11.0 - 40.0;
            assert!(tree.insert(marker(i, x, y)));
        }
        assert!(!tree.is_leaf(), "40 items across a 16-capacity tree split");
        assert_eq!(tree.len(), tree.items().len());
        assert_eq!(tree.len(), 40);
        assert!(!tree.is_empty());
    }

    #[test]
    fn radius_bool_tracks_center_containment_only() {
        let mut tree = small_tree();
        assert!(tree.insert(marker(1, 40.0, 40.0)));

        // Center in the box, nothing in range: true with an empty collection.
        let (in_box, hits) = tree.within_radius(Point::new(-40.0, -40.0), 5.0);
        assert!(in_box, "bool reflects box containment, not matches");
        assert!(hits.is_empty());

        // Center outside the box: false and empty, even though items exist.
        let (in_box, hits) = tree.within_radius(Point::new(60.0, 0.0), 1000.0);
        assert!(!in_box);
        assert!(hits.is_empty(), "no descent happens from an outside center");
    }

    #[test]
    fn radius_uses_euclidean_distance() {
        let mut tree = small_tree();
        assert!(tree.insert(marker(1, 3.0, 4.0)));
        assert!(tree.insert(marker(2, 4.0, 4.0)));
        let (_, hits) = tree.within_radius(Point::ZERO, 5.0);
        let ids: Vec<u32> = hits.iter().map(|m| m.id).collect();
        assert_eq!(ids, [1], "distance 5 is included, sqrt(32) is not");
    }

    #[test]
    fn filter_visits_the_whole_subtree() {
        let mut tree = small_tree();
        for i in 0..24 {
            let x = -45.0 + 4.0 * f64::from(i);
            assert!(tree.insert(marker(i, x, x / 2.0)));
        }
        assert!(!tree.is_leaf());
        let evens = tree.filter(|m| m.id % 2 == 0);
        assert_eq!(evens.len(), 12);
        let none = tree.filter(|_| false);
        assert!(none.is_empty(), "filter never fails, it returns empty");
    }

    #[test]
    fn first_prefers_the_upper_left_quadrant() {
        let mut tree = small_tree();
        // Force a split, then place one item per quadrant.
        for i in 0..17 {
            assert!(tree.insert(marker(100 + i, 1.0 + f64::from(i), 1.0)));
        }
        assert!(tree.insert(marker(0, -10.0, -10.0)));
        assert!(tree.insert(marker(1, 10.0, -10.0)));
        assert!(tree.insert(marker(2, -10.0, 10.0)));

        let hit = tree.first(|m| m.id < 100).unwrap();
        assert_eq!(hit.id, 0, "depth-first order visits the upper-left child first");
        assert_eq!(tree.first(|m| m.id == 9999), None);
    }

    #[test]
    fn position_of_uses_item_equality() {
        let mut tree = small_tree();
        let m = marker(5, -20.0, 30.0);
        assert!(tree.insert(m));
        let key = tree.position_of(&m).expect("stored item must be found");
        assert_eq!(key.point(), m.at);
        assert_eq!(tree.position_of(&marker(5, -20.0, 31.0)), None);
        assert_eq!(tree.position_of(&marker(6, -20.0, 30.0)), None);
    }

    #[test]
    fn clear_resets_to_an_empty_leaf() {
        let mut tree = small_tree();
        for i in 0..20 {
            assert!(tree.insert(marker(i, f64::from(i) - 10.0, f64::from(i))));
        }
        assert!(!tree.is_leaf());
        let region = tree.region();

        tree.clear();
        assert!(tree.is_leaf(), "clear always yields a leaf");
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.region(), region, "geometry persists across clear");
        assert_eq!(tree.depth(), 0);

        assert!(tree.insert(marker(1, 0.0, 0.0)), "cleared tree is usable");
    }

    #[test]
    fn tight_clusters_cascade_multiple_splits() {
        let mut tree = small_tree();
        // 17 distinct coordinates packed into a 1-unit square force the
        // split cascade to run several levels deep.
        for i in 0..17 {
            let offset = f64::from(i) * 0.05;
            assert!(tree.insert(marker(i, 20.0 + offset, 20.0 + offset)));
        }
        assert_eq!(tree.len(), 17);
        let leaf = tree.leaf_for(Point::new(20.0, 20.0)).unwrap();
        assert!(leaf.depth() >= 2, "cluster of width 0.8 needs depth >= 2");
    }

    #[test]
    fn is_full_reports_leaves_only() {
        let mut tree = small_tree();
        for i in 0..16 {
            assert!(tree.insert(marker(i, f64::from(i), f64::from(i))));
        }
        assert!(tree.is_full());
        assert!(tree.insert(marker(16, -1.0, -1.0)));
        assert!(!tree.is_full(), "internal nodes are never full");
    }
}
