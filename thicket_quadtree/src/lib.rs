// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_quadtree --heading-base-level=0

//! Thicket Quadtree: a point-indexed region quadtree.
//!
//! Thicket Quadtree is a reusable building block for spatial lookups over
//! positioned items: game entities, scattered glyphs, sample points, map
//! markers.
//!
//! - Stores items keyed by their exact `(x, y)` coordinates inside a rooted
//!   4-ary tree of axis-aligned square regions.
//! - A leaf holds up to a configured capacity of items; inserting into a full
//!   leaf splits it into four quadrant children around the region center and
//!   redistributes.
//! - Queries: exact point lookup, radius search, predicate search
//!   (collect-all and first-match), and full enumeration.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `kurbo/std`. Disable default features for
//!   `no_std` targets and enable `libm` instead; kurbo requires one of the
//!   two.
//! - `libm`: enables `kurbo/libm` for float support without `std`.
//!
//! ## Contract notes
//!
//! - Boxes are half-open: left/top edges inclusive, right/bottom exclusive. A
//!   point on a splitting axis belongs to the right/bottom child.
//! - Item identity within a leaf is the exact coordinate pair ([`PointKey`],
//!   bitwise `f64` equality). Two items at the same exact position cannot
//!   coexist; the second insert is rejected.
//! - Fallible operations report through `bool`/`Option` returns; nothing
//!   panics in normal operation.
//! - [`QuadTree::within_radius`] returns a `bool` that reflects only whether
//!   the search *center* lies inside the tree's box. Inspect the returned
//!   collection to learn whether anything was in range.
//! - Splits are driven purely by capacity and are geometrically symmetric
//!   around the node center, never load-balanced. Nodes do not merge back
//!   after [`QuadTree::clear`]; removal and rebalancing are out of scope, as
//!   is any thread-safety (wrap the tree in your own lock to share it).
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use thicket_quadtree::{Capacity, QuadTree, TreeConfig};
//!
//! let mut tree = QuadTree::new(TreeConfig {
//!     capacity: Capacity::C16,
//!     width: 100.0,
//!     height: 100.0,
//!     center: Point::ZERO,
//! });
//!
//! // Bare points implement the item contract.
//! for i in 0..20 {
//!     let p = Point::new(f64::from(i) * 2.0 - 20.0, f64::from(i) - 10.0);
//!     assert!(tree.insert(p));
//! }
//!
//! // Exact point lookup.
//! assert!(tree.get(Point::new(-20.0, -10.0)).is_some());
//! assert!(tree.get(Point::new(-20.0, -10.5)).is_none());
//!
//! // Radius search: the bool answers "was the center inside the box?".
//! let (in_box, near) = tree.within_radius(Point::ZERO, 5.0);
//! assert!(in_box);
//! assert!(!near.is_empty());
//!
//! // Predicate search over the whole tree.
//! let left_half = tree.filter(|p| p.x < 0.0);
//! assert_eq!(left_half.len(), 10);
//! ```
//!
//! Custom item types implement [`Position`]:
//!
//! ```rust
//! use kurbo::Point;
//! use thicket_quadtree::{Position, QuadTree, TreeConfig};
//!
//! #[derive(PartialEq, Debug)]
//! struct Beacon {
//!     name: &'static str,
//!     at: Point,
//! }
//!
//! impl Position for Beacon {
//!     fn position(&self) -> Point {
//!         self.at
//!     }
//! }
//!
//! let mut tree = QuadTree::new(TreeConfig::default());
//! let lighthouse = Beacon { name: "lighthouse", at: Point::new(12.0, -7.0) };
//! assert!(tree.insert(lighthouse));
//!
//! let found = tree.first(|b| b.name == "lighthouse").unwrap();
//! assert_eq!(tree.position_of(found).unwrap().point(), Point::new(12.0, -7.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::QuadTree;
pub use types::{Capacity, PointKey, Position, Quadrant, TreeConfig};
