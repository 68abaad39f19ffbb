//! Accumulates leftover space handed in from elsewhere (e.g. an [`Enclose`]
//! refinement step or a caller managing several related bins) and makes it
//! available for packing small items into, without owning a bin of its own.
//!
//! [`Enclose`]: crate::enclose::Enclose

use crate::config::{GuillotineSelector, GuillotineSplitRule};
use crate::geometry::Cuboid;
use crate::numeric::Coord;
use crate::packer::guillotine::GuillotineBin;
use crate::packer::PackingAlgorithm;

/// Wraps a best-area-fit / minimize-largest-axis Guillotine bin, but never
/// seeds a full-bin free section: sections only arrive via [`Self::add_waste`].
pub struct WasteManager<T, R> {
    inner: GuillotineBin<T, R>,
}

impl<T: Coord, R: Clone> WasteManager<T, R> {
    pub fn new(rotation: bool, merge: bool) -> Self {
        let zero = T::zero();
        let inner = GuillotineBin::new(
            zero,
            zero,
            zero,
            rotation,
            GuillotineSelector::Baf,
            GuillotineSplitRule::Minas,
        )
        .with_merge(merge);
        let mut mgr = Self { inner };
        mgr.reset();
        mgr
    }

    /// Registers a new region of free space at `(x, y, z)` with the given
    /// extents, merging it into any adjacent waste already tracked.
    pub fn add_waste(&mut self, x: T, y: T, z: T, width: T, height: T, depth: T) {
        self.inner.add_waste_section(Cuboid::new(x, y, z, width, height, depth));
    }

    pub fn add_cub(&mut self, width: T, height: T, depth: T, rid: Option<R>) -> Option<Cuboid<T, R>> {
        self.inner.add_cub(width, height, depth, rid)
    }

    pub fn fitness(&self, width: T, height: T, depth: T) -> Option<T> {
        self.inner.fitness(width, height, depth)
    }

    pub fn used_volume(&self) -> T {
        self.inner.used_volume()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn placed(&self) -> &[Cuboid<T, R>] {
        self.inner.placed()
    }

    /// Drops every placement and tracked waste section; unlike a regular
    /// bin's `reset`, this leaves no free space behind, since a waste
    /// manager has no bounds of its own.
    pub fn reset(&mut self) {
        PackingAlgorithm::reset(&mut self.inner);
        self.inner.clear_sections();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Mgr = WasteManager<i64, String>;

    #[test]
    fn starts_with_no_space_to_place_into() {
        let mut mgr: Mgr = WasteManager::new(true, true);
        assert!(mgr.add_cub(1, 1, 1, None).is_none());
    }

    #[test]
    fn placed_waste_accepts_a_fitting_cuboid() {
        let mut mgr: Mgr = WasteManager::new(true, true);
        mgr.add_waste(0, 0, 0, 10, 10, 10);
        let c = mgr.add_cub(4, 4, 4, None).unwrap();
        assert_eq!((c.x, c.y, c.z), (0, 0, 0));
    }

    #[test]
    fn reset_clears_waste_and_placements() {
        let mut mgr: Mgr = WasteManager::new(true, true);
        mgr.add_waste(0, 0, 0, 10, 10, 10);
        mgr.add_cub(4, 4, 4, None);
        mgr.reset();
        assert!(mgr.is_empty());
        assert!(mgr.add_cub(1, 1, 1, None).is_none());
    }
}
