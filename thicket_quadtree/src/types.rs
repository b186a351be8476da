// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public vocabulary types: the item contract, coordinate keys, quadrants,
//! and tree configuration.

use core::hash::{Hash, Hasher};

use kurbo::{Point, Rect, Size};

/// Capability contract for items stored in a [`QuadTree`][crate::QuadTree].
///
/// An item only has to expose a read-only position; the tree uses it both for
/// box-membership tests and as the source of the item's [`PointKey`].
/// Coordinates are assumed to be finite (no NaNs); debug builds may assert.
pub trait Position {
    /// The item's location in tree space.
    fn position(&self) -> Point;
}

impl Position for Point {
    #[inline]
    fn position(&self) -> Point {
        *self
    }
}

/// Exact coordinate key identifying an item within a leaf.
///
/// Equality and hashing are defined over the raw bit patterns of the two
/// coordinates (`f64::to_bits`), never approximately. Two distinct items at
/// exactly the same `(x, y)` therefore cannot coexist in a tree.
///
/// Bitwise equality has two consequences worth noting: `-0.0` and `0.0` are
/// *different* keys, and a NaN coordinate is equal to an identical NaN. The
/// tree assumes finite coordinates throughout, so neither case arises in
/// normal use.
#[derive(Copy, Clone, Debug)]
pub struct PointKey {
    x: f64,
    y: f64,
}

impl PointKey {
    /// Create a key from a position.
    #[inline]
    pub const fn new(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }

    /// The key's x coordinate.
    #[inline]
    pub const fn x(self) -> f64 {
        self.x
    }

    /// The key's y coordinate.
    #[inline]
    pub const fn y(self) -> f64 {
        self.y
    }

    /// The key as a [`Point`].
    #[inline]
    pub const fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl PartialEq for PointKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for PointKey {}

impl Hash for PointKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl From<Point> for PointKey {
    #[inline]
    fn from(p: Point) -> Self {
        Self::new(p)
    }
}

/// One of the four child positions of an internal node.
///
/// The discriminants match the child array layout: 0 = upper-left,
/// 1 = upper-right, 2 = lower-left, 3 = lower-right. "Upper" is the smaller
/// y half, following the y-down convention of [`kurbo::Rect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Left of center, above center (index 0).
    TopLeft = 0,
    /// Right of center, above center (index 1).
    TopRight = 1,
    /// Left of center, below center (index 2).
    BottomLeft = 2,
    /// Right of center, below center (index 3).
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in child-array order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The child-array index of this quadrant.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Classify a point against a splitting center.
    ///
    /// The test is center-relative, not box-relative: `x < center.x` selects
    /// the left column and `y < center.y` selects the top row, so points on
    /// the splitting axes land in the right/bottom halves. This matches the
    /// half-open `[left, right) × [top, bottom)` box convention used by the
    /// tree.
    #[inline]
    pub fn of(center: Point, p: Point) -> Self {
        match (p.x < center.x, p.y < center.y) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }
}

/// Preset leaf capacities.
///
/// A leaf splits into four children when an insert finds it already holding
/// this many items. The capacity is fixed at construction and inherited
/// unchanged by every descendant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Capacity {
    /// 16 items per leaf.
    C16,
    /// 64 items per leaf.
    #[default]
    C64,
    /// 256 items per leaf.
    C256,
    /// 1024 items per leaf.
    C1024,
    /// 4096 items per leaf.
    C4096,
    /// 16384 items per leaf.
    C16384,
}

impl Capacity {
    /// The numeric item limit for this preset.
    #[inline]
    pub const fn get(self) -> usize {
        match self {
            Self::C16 => 16,
            Self::C64 => 64,
            Self::C256 => 256,
            Self::C1024 => 1024,
            Self::C4096 => 4096,
            Self::C16384 => 16384,
        }
    }
}

/// Configuration for building a [`QuadTree`][crate::QuadTree] root.
///
/// A plain value: construct one (or start from [`TreeConfig::default`]) and
/// pass it to [`QuadTree::new`][crate::QuadTree::new]. There is no shared or
/// process-wide configuration state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// Leaf capacity inherited by every node of the tree.
    pub capacity: Capacity,
    /// Total extent of the root region along x.
    pub width: f64,
    /// Total extent of the root region along y.
    pub height: f64,
    /// Center of the root region.
    pub center: Point,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            capacity: Capacity::default(),
            width: 1024.0,
            height: 1024.0,
            center: Point::ZERO,
        }
    }
}

impl TreeConfig {
    /// The root region described by this configuration.
    ///
    /// The box is half-open: left/top edges inclusive, right/bottom edges
    /// exclusive.
    #[inline]
    pub fn region(&self) -> Rect {
        Rect::from_center_size(self.center, Size::new(self.width, self.height))
    }
}
