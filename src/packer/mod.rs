use crate::error::Result;
use crate::geometry::Cuboid;
use crate::numeric::Coord;

pub mod guillotine;
pub mod maxcubs;

/// Shared contract implemented by every single-bin packing algorithm
/// (the Guillotine and Maximal-Cuboids families).
///
/// `T` is the coordinate/size type; `R` is the caller-supplied identifier
/// attached to placed items.
pub trait PackingAlgorithm<T: Coord, R: Clone> {
    /// Bin width (x extent).
    fn width(&self) -> T;
    /// Bin height (y extent).
    fn height(&self) -> T;
    /// Bin depth (z extent).
    fn depth(&self) -> T;
    /// Whether placements may swap width/height when the normal orientation
    /// doesn't fit.
    fn rotation(&self) -> bool;

    /// Attempts to place a `width x height x depth` cuboid, returning the
    /// placed cuboid (with its chosen position and, if rotated, its rotated
    /// extents) on success.
    fn add_cub(
        &mut self,
        width: T,
        height: T,
        depth: T,
        rid: Option<R>,
    ) -> Option<Cuboid<T, R>>;

    /// Fitness of placing a `width x height x depth` cuboid: lower is
    /// better, `None` means it does not fit anywhere in the bin's current
    /// free space.
    fn fitness(&self, width: T, height: T, depth: T) -> Option<T>;

    /// Total placed volume so far.
    fn used_volume(&self) -> T;

    /// True if nothing has been placed.
    fn is_empty(&self) -> bool;

    /// Placed cuboids, in placement order.
    fn placed(&self) -> &[Cuboid<T, R>];

    /// Clears all placements and free-region state back to an empty bin.
    fn reset(&mut self);

    /// Checks the bin's invariants: every placed cuboid lies within bounds
    /// and no two placed cuboids overlap.
    fn validate_packing(&self) -> Result<()>;

    /// True when a cuboid of these dimensions could fit inside the bin's
    /// *original* (empty) volume in either orientation, ignoring current
    /// occupancy. Only width/height may swap; depth is never rotated into.
    fn fits_volume(&self, width: T, height: T, depth: T) -> bool {
        let (bw, bh, bd) = (self.width(), self.height(), self.depth());
        if depth > bd {
            return false;
        }
        let normal_fits = width <= bw && height <= bh;
        if normal_fits {
            return true;
        }
        self.rotation() && height <= bw && width <= bh
    }
}

fn collision_free<T: Coord, R>(placed: &[Cuboid<T, R>]) -> Result<()> {
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            if placed[i].intersects(&placed[j], false) {
                return Err(crate::error::PackError::InvariantViolation(format!(
                    "placed items {} and {} overlap",
                    i, j
                )));
            }
        }
    }
    Ok(())
}

fn bounds_ok<T: Coord, R>(placed: &[Cuboid<T, R>], bound: &Cuboid<T, R>) -> Result<()> {
    for (i, c) in placed.iter().enumerate() {
        if !bound.contains(c) {
            return Err(crate::error::PackError::InvariantViolation(format!(
                "placed item {} lies outside the bin bounds",
                i
            )));
        }
    }
    Ok(())
}

/// Shared `validate_packing` body: every placed cuboid must lie within the
/// bin's bounds, and no two may overlap. Used by both algorithm families so
/// the check stays consistent.
pub(crate) fn validate_against_bounds<T: Coord, R>(
    placed: &[Cuboid<T, R>],
    width: T,
    height: T,
    depth: T,
) -> Result<()> {
    let bound: Cuboid<T, R> = Cuboid::new(T::zero(), T::zero(), T::zero(), width, height, depth);
    bounds_ok(placed, &bound)?;
    collision_free(placed)
}
