//! Axis-aligned geometry primitives: [`Point`] and [`Cuboid`].
//!
//! Translated from a free-region/placed-item geometry model into generic
//! Rust over the crate's [`Coord`] numeric contract.

use crate::numeric::Coord;
use serde::{Deserialize, Serialize};

/// A point in 3-space. `x`/`y` are the usual plane axes; `z` runs along the
/// "into the screen" (eye) axis matching the Cuboid's `outeye`/`ineye` edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Coord> Point<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned cuboid: origin `(x, y, z)` is the low corner on every axis,
/// `width`/`height`/`depth` are non-negative extents, `rid` is an optional
/// opaque identifier carried by placed items (`None` on free sections and
/// maximal cuboids).
///
/// `PartialEq` is structural over origin and size only, ignoring `rid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cuboid<T, R = String> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub width: T,
    pub height: T,
    pub depth: T,
    pub rid: Option<R>,
}

impl<T: Coord, R> PartialEq for Cuboid<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.z == other.z
            && self.width == other.width
            && self.height == other.height
            && self.depth == other.depth
    }
}

impl<T: Coord, R> Cuboid<T, R> {
    pub fn new(x: T, y: T, z: T, width: T, height: T, depth: T) -> Self {
        debug_assert!(width >= T::zero() && height >= T::zero() && depth >= T::zero());
        Self {
            x,
            y,
            z,
            width,
            height,
            depth,
            rid: None,
        }
    }

    pub fn with_rid(mut self, rid: Option<R>) -> Self {
        self.rid = rid;
        self
    }

    #[inline]
    pub fn left(&self) -> T {
        self.x
    }
    #[inline]
    pub fn right(&self) -> T {
        self.x + self.width
    }
    #[inline]
    pub fn bottom(&self) -> T {
        self.y
    }
    #[inline]
    pub fn top(&self) -> T {
        self.y + self.height
    }
    #[inline]
    pub fn outeye(&self) -> T {
        self.z
    }
    #[inline]
    pub fn ineye(&self) -> T {
        self.z + self.depth
    }

    pub fn origin(&self) -> Point<T> {
        Point::new(self.x, self.y, self.z)
    }

    pub fn volume(&self) -> T {
        self.width * self.height * self.depth
    }

    /// True if `other` lies fully within this cuboid's closed bounds.
    pub fn contains(&self, other: &Cuboid<T, R>) -> bool {
        other.y >= self.y
            && other.x >= self.x
            && other.z >= self.z
            && other.top() <= self.top()
            && other.right() <= self.right()
            && other.ineye() <= self.ineye()
    }

    /// Open-box overlap test. When `edges` is true, shared faces count as an
    /// intersection, except for corner-only touches (all three axes
    /// simultaneously coincident on a shared plane), which are always
    /// rejected so that an item touching only a free region's corner cannot
    /// split it.
    pub fn intersects(&self, other: &Cuboid<T, R>, edges: bool) -> bool {
        if self.bottom() > other.top()
            || self.top() < other.bottom()
            || self.left() > other.right()
            || self.right() < other.left()
            || self.outeye() > other.ineye()
            || self.ineye() < other.outeye()
        {
            return false;
        }

        if !edges
            && (self.bottom() == other.top()
                || self.top() == other.bottom()
                || self.left() == other.right()
                || self.right() == other.left()
                || self.outeye() == other.ineye()
                || self.ineye() == other.outeye())
        {
            return false;
        }

        let x_touch = self.left() == other.right() || other.left() == self.right();
        let y_touch = self.bottom() == other.top() || other.bottom() == self.top();
        let z_touch = self.outeye() == other.ineye() || other.outeye() == self.ineye();

        // Only a corner (all three axes touching on a boundary) is rejected;
        // an edge or face touch on one or two axes still counts.
        !(x_touch && y_touch && z_touch)
    }

    /// Returns the intersection box, or `None` when disjoint. With
    /// `edges=true` a zero-volume cuboid may be returned for an edge-only
    /// touch that isn't corner-only.
    pub fn intersection(&self, other: &Cuboid<T, R>, edges: bool) -> Option<Cuboid<T, R>> {
        if !self.intersects(other, edges) {
            return None;
        }

        let bottom = self.bottom().max(other.bottom());
        let left = self.left().max(other.left());
        let top = self.top().min(other.top());
        let right = self.right().min(other.right());
        let outeye = self.outeye().max(other.outeye());
        let ineye = self.ineye().min(other.ineye());

        Some(Cuboid::new(
            left,
            bottom,
            outeye,
            right - left,
            top - bottom,
            ineye - outeye,
        ))
    }

    /// Attempts to fold `other` into `self` in place. Succeeds (and mutates
    /// `self` into the union) only when one contains the other, or they
    /// share an entire face of matching extent on two of the three axes (the
    /// third axis then concatenates). Leaves `self` untouched on failure.
    pub fn join(&mut self, other: &Cuboid<T, R>) -> bool {
        if self.contains(other) {
            return true;
        }

        if other.contains(self) {
            self.x = other.x;
            self.y = other.y;
            self.z = other.z;
            self.width = other.width;
            self.height = other.height;
            self.depth = other.depth;
            return true;
        }

        if !self.intersects(other, true) {
            return false;
        }

        // Other cuboid is above/below this one (same x/z footprint and depth).
        if self.left() == other.left()
            && self.width == other.width
            && self.outeye() == other.outeye()
            && self.depth == other.depth
        {
            let y_min = self.bottom().min(other.bottom());
            let y_max = self.top().max(other.top());
            self.y = y_min;
            self.height = y_max - y_min;
            return true;
        }

        // Other cuboid is beside this one on the x axis.
        if self.bottom() == other.bottom()
            && self.height == other.height
            && self.outeye() == other.outeye()
            && self.depth == other.depth
        {
            let x_min = self.left().min(other.left());
            let x_max = self.right().max(other.right());
            self.x = x_min;
            self.width = x_max - x_min;
            return true;
        }

        // Other cuboid is beside this one on the z (depth) axis.
        if self.bottom() == other.bottom()
            && self.height == other.height
            && self.left() == other.left()
            && self.width == other.width
        {
            let z_min = self.outeye().min(other.outeye());
            let z_max = self.ineye().max(other.ineye());
            self.z = z_min;
            self.depth = z_max - z_min;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type C = Cuboid<i64, String>;

    #[test]
    fn contains_is_inclusive_of_bounds() {
        let outer: C = Cuboid::new(0, 0, 0, 10, 10, 10);
        let inner: C = Cuboid::new(0, 0, 0, 10, 10, 10);
        assert!(outer.contains(&inner));
    }

    #[test]
    fn face_touch_is_not_intersection_by_default() {
        let a: C = Cuboid::new(0, 0, 0, 5, 5, 5);
        let b: C = Cuboid::new(5, 0, 0, 5, 5, 5);
        assert!(!a.intersects(&b, false));
        assert!(a.intersects(&b, true));
    }

    #[test]
    fn corner_touch_never_intersects() {
        let a: C = Cuboid::new(0, 0, 0, 5, 5, 5);
        let b: C = Cuboid::new(5, 5, 5, 5, 5, 5);
        assert!(!a.intersects(&b, false));
        assert!(!a.intersects(&b, true));
    }

    #[test]
    fn intersection_symmetry() {
        let a: C = Cuboid::new(0, 0, 0, 6, 6, 6);
        let b: C = Cuboid::new(3, 3, 3, 6, 6, 6);
        assert_eq!(a.intersects(&b, false), b.intersects(&a, false));
        assert_eq!(a.intersection(&b, false), b.intersection(&a, false));
    }

    #[test]
    fn join_extends_on_shared_face() {
        let mut a: C = Cuboid::new(0, 0, 0, 5, 10, 10);
        let b: C = Cuboid::new(5, 0, 0, 5, 10, 10);
        assert!(a.join(&b));
        assert_eq!(a, Cuboid::new(0, 0, 0, 10, 10, 10));
    }

    #[test]
    fn join_fails_and_leaves_self_untouched() {
        let mut a: C = Cuboid::new(0, 0, 0, 5, 5, 5);
        let before = a.clone();
        let b: C = Cuboid::new(100, 100, 100, 5, 5, 5);
        assert!(!a.join(&b));
        assert_eq!(a, before);
    }

    #[test]
    fn rid_is_ignored_by_equality() {
        let a: C = Cuboid::new(0, 0, 0, 5, 5, 5).with_rid(Some("a".into()));
        let b: C = Cuboid::new(0, 0, 0, 5, 5, 5).with_rid(Some("b".into()));
        assert_eq!(a, b);
    }
}
