//! Finds the smallest-volume bin that can hold a fixed list of cuboids by
//! trying a handful of candidate widths and refining each with an offline
//! pack.
//!
//! The reference algorithm refines with a Skyline bottom-left/waste-map
//! packer; that family isn't carried into this crate (see [`crate::packer`]),
//! so refinement here uses a best-short-side-fit Guillotine bin instead —
//! the closest available single-bin algorithm in spirit (bottom-left-ish
//! placement, low fragmentation).

use crate::config::{BinAlgo, GuillotineSelector, GuillotineSplitRule, SortOrder};
use crate::error::{PackError, Result};
use crate::geometry::Cuboid;
use crate::multibin::OfflinePacker;
use crate::numeric::Coord;
use crate::packer::guillotine::GuillotineBin;

/// The smallest enclosing bin found for a set of cuboids, along with where
/// each cuboid landed inside it.
pub struct EnclosedLayout<T, R> {
    pub width: T,
    pub height: T,
    pub depth: T,
    pub placements: Vec<Cuboid<T, R>>,
}

pub struct Enclose<T, R> {
    cuboids: Vec<(T, T, T, Option<R>)>,
    max_width: Option<T>,
    max_height: Option<T>,
    max_depth: Option<T>,
    rotation: bool,
}

impl<T: Coord, R: Clone> Enclose<T, R> {
    pub fn new(max_width: Option<T>, max_height: Option<T>, max_depth: Option<T>, rotation: bool) -> Self {
        Self {
            cuboids: Vec::new(),
            max_width,
            max_height,
            max_depth,
            rotation,
        }
    }

    pub fn add_cub(&mut self, width: T, height: T, depth: T, rid: Option<R>) {
        self.cuboids.push((width, height, depth, rid));
    }

    fn container_candidates(&self) -> Result<Vec<(T, T, T)>> {
        if self.cuboids.is_empty() {
            return Ok(Vec::new());
        }

        let zero = T::zero();
        let max_depth_sum = self.cuboids.iter().fold(zero, |acc, c| acc + c.2);

        let (mut sides, max_height, min_width, max_width) = if self.rotation {
            let mut sides: Vec<T> = self
                .cuboids
                .iter()
                .flat_map(|c| [c.0, c.1, c.2])
                .collect();
            sides.sort();
            let max_height = self.cuboids.iter().fold(zero, |acc, c| acc + c.0.max(c.1));
            let min_width = self
                .cuboids
                .iter()
                .map(|c| c.0.min(c.1))
                .fold(self.cuboids[0].0.min(self.cuboids[0].1), |a, b| a.max(b));
            (sides, max_height, min_width, max_height)
        } else {
            let mut sides: Vec<T> = self.cuboids.iter().map(|c| c.0).collect();
            sides.sort();
            let max_height = self.cuboids.iter().fold(zero, |acc, c| acc + c.1);
            let min_width = self
                .cuboids
                .iter()
                .map(|c| c.0)
                .fold(self.cuboids[0].0, |a, b| a.max(b));
            let max_width = sides.iter().fold(zero, |acc, s| acc + *s);
            (sides, max_height, min_width, max_width)
        };

        let max_depth = self.max_depth.map_or(max_depth_sum, |m| m.min(max_depth_sum));
        let max_height = self.max_height.map_or(max_height, |m| m.min(max_height));
        let max_width = self.max_width.map_or(max_width, |m| m.min(max_width));

        if max_width <= min_width {
            return Err(PackError::InvalidConfig(format!(
                "enclosing width range is empty: max_width ({max_width:?}) must exceed the widest required item ({min_width:?})"
            )));
        }

        let mut candidates = vec![max_width, min_width];
        let mut width = zero;
        for s in sides.iter().rev() {
            width = width + *s;
            candidates.push(width);
        }
        let mut width = zero;
        for s in sides.iter() {
            width = width + *s;
            candidates.push(width);
        }
        candidates.push(max_width);
        candidates.push(min_width);

        let mut seen = Vec::new();
        candidates.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(*c);
                true
            }
        });
        candidates.retain(|c| *c >= min_width && *c <= max_width);

        let min_volume = self.cuboids.iter().fold(zero, |acc, c| acc + c.0 * c.1 * c.2);
        Ok(candidates
            .into_iter()
            .filter(|c| *c * max_height * max_depth >= min_volume)
            .map(|c| (c, max_height, max_depth))
            .collect())
    }

    fn refine_candidate(&self, width: T, height: T, depth: T) -> Option<(T, T, T, Vec<Cuboid<T, R>>)> {
        let make = |w: T, h: T, d: T, rot: bool| {
            GuillotineBin::new(w, h, d, rot, GuillotineSelector::Bssf, GuillotineSplitRule::Sas)
        };
        let mut packer: OfflinePacker<T, R, GuillotineBin<T, R>, _> =
            OfflinePacker::new(BinAlgo::Bff, SortOrder::Lside, self.rotation, make).ok()?;
        packer.add_bin(width, height, depth, 1);
        for (w, h, d, rid) in self.cuboids.iter() {
            packer.add_cub(*w, *h, *d, rid.clone());
        }
        packer.pack().ok()?;

        let bin = packer.get(0).ok()?;
        let placed = bin.placed();
        if placed.len() != self.cuboids.len() {
            return None;
        }

        let new_height = placed.iter().map(|c| c.top()).max()?;
        let new_depth = placed.iter().map(|c| c.ineye()).max()?;
        Some((width, new_height, new_depth, placed.to_vec()))
    }

    /// Tries every candidate width and returns the smallest-volume bin that
    /// successfully holds every cuboid, or `None` if none do (e.g. the
    /// `max_*` caps are too tight to fit anything).
    ///
    /// # Errors
    /// Returns `Err(PackError::InvalidConfig)` when the configured `max_width`
    /// cap (if any) is too tight to ever accommodate the widest queued item —
    /// a caller-configuration mistake, not an unplaceable-item outcome.
    pub fn generate(&self) -> Result<Option<EnclosedLayout<T, R>>> {
        let candidates = self.container_candidates()?;
        if candidates.is_empty() {
            return Ok(None);
        }

        Ok(candidates
            .into_iter()
            .filter_map(|(w, h, d)| self.refine_candidate(w, h, d))
            .min_by_key(|(w, h, d, _)| *w * *h * *d)
            .map(|(width, height, depth, placements)| EnclosedLayout {
                width,
                height,
                depth,
                placements,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encloses_a_handful_of_cubes() {
        let mut enclose: Enclose<i64, String> = Enclose::new(None, None, None, true);
        enclose.add_cub(4, 4, 4, None);
        enclose.add_cub(4, 4, 4, None);
        enclose.add_cub(4, 4, 4, None);

        let layout = enclose.generate().unwrap().expect("some container should fit");
        assert_eq!(layout.placements.len(), 3);
        assert!(layout.width * layout.height * layout.depth >= 3 * 4 * 4 * 4);
    }

    #[test]
    fn empty_input_yields_no_layout() {
        let enclose: Enclose<i64, String> = Enclose::new(None, None, None, true);
        assert!(enclose.generate().unwrap().is_none());
    }

    #[test]
    fn respects_a_tight_max_width_cap() {
        let mut enclose: Enclose<i64, String> = Enclose::new(Some(5), None, None, true);
        enclose.add_cub(4, 4, 4, None);
        enclose.add_cub(4, 4, 4, None);
        let layout = enclose.generate().unwrap();
        if let Some(layout) = layout {
            assert!(layout.width <= 5);
        }
    }

    #[test]
    fn max_width_narrower_than_the_widest_item_is_a_config_error() {
        let mut enclose: Enclose<i64, String> = Enclose::new(Some(2), None, None, true);
        enclose.add_cub(4, 4, 4, None);
        assert!(matches!(enclose.generate(), Err(PackError::InvalidConfig(_))));
    }
}
