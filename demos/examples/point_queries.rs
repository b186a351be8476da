// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a quadtree from a configuration, insert a point cloud, and run the
//! query surface: exact lookup, radius search, predicate search.

use kurbo::Point;
use thicket_quadtree::{Capacity, Position, QuadTree, TreeConfig};

#[derive(Debug, PartialEq)]
struct Town {
    name: &'static str,
    population: u32,
    at: Point,
}

impl Position for Town {
    fn position(&self) -> Point {
        self.at
    }
}

fn town(name: &'static str, population: u32, x: f64, y: f64) -> Town {
    Town {
        name,
        population,
        at: Point::new(x, y),
    }
}

fn main() {
    let mut tree = QuadTree::new(TreeConfig {
        capacity: Capacity::C16,
        width: 200.0,
        height: 200.0,
        center: Point::ZERO,
    });

    let towns = [
        town("Alder", 1_200, -80.0, -60.0),
        town("Birchmere", 45_000, -20.0, -85.0),
        town("Cobble", 300, 15.0, -10.0),
        town("Dunfell", 9_800, 40.0, 35.0),
        town("Eastreach", 77_000, 85.0, 80.0),
        town("Fenwick", 2_500, -45.0, 70.0),
    ];
    for t in towns {
        let name = t.name;
        let inserted = tree.insert(t);
        println!("insert {name:<10} -> {inserted}");
    }

    // Duplicate coordinates are rejected; the stored item wins.
    let rejected = tree.insert(town("Cobble II", 1, 15.0, -10.0));
    println!("insert duplicate at (15, -10) -> {rejected}");

    // Exact point lookup.
    if let Some(t) = tree.get(Point::new(40.0, 35.0)) {
        println!("at (40, 35): {} (pop {})", t.name, t.population);
    }

    // Radius search around the origin. The bool only reports whether the
    // center was inside the tree's box.
    let (in_box, near) = tree.within_radius(Point::ZERO, 60.0);
    println!("within 60 of origin (center in box: {in_box}):");
    for t in &near {
        println!("  {} at {:?}", t.name, t.at);
    }

    // Predicate searches.
    let cities = tree.filter(|t| t.population >= 10_000);
    println!("cities: {:?}", cities.iter().map(|t| t.name).collect::<Vec<_>>());

    match tree.first(|t| t.name.starts_with('F')) {
        Some(t) => println!("first F-name: {}", t.name),
        None => println!("no F-name found"),
    }

    println!("total stored: {}", tree.len());
}
