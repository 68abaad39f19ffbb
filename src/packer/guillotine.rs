//! Guillotine family: the free volume is kept as a list of disjoint
//! axis-aligned free sections. Placing an item always splits the section it
//! landed in along one axis-aligned plane (hence "guillotine").

use super::{validate_against_bounds, PackingAlgorithm};
use crate::config::{GuillotineSelector, GuillotineSplitRule};
use crate::error::Result;
use crate::geometry::Cuboid;
use crate::numeric::Coord;

pub struct GuillotineBin<T, R> {
    width: T,
    height: T,
    depth: T,
    rot: bool,
    merge: bool,
    selector: GuillotineSelector,
    split_rule: GuillotineSplitRule,
    sections: Vec<Cuboid<T, R>>,
    cuboids: Vec<Cuboid<T, R>>,
}

impl<T: Coord, R: Clone> GuillotineBin<T, R> {
    pub fn new(
        width: T,
        height: T,
        depth: T,
        rot: bool,
        selector: GuillotineSelector,
        split_rule: GuillotineSplitRule,
    ) -> Self {
        let mut bin = Self {
            width,
            height,
            depth,
            rot,
            merge: true,
            selector,
            split_rule,
            sections: Vec::new(),
            cuboids: Vec::new(),
        };
        PackingAlgorithm::reset(&mut bin);
        bin
    }

    /// Disables the free-section merge pass (kept available for parity with
    /// the family's `merge` constructor option; merging is on by default
    /// since it keeps the free list from fragmenting needlessly).
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Feeds an externally-supplied free section directly into the
    /// free-section list, merging it with adjacent sections as usual.
    /// Used by a waste manager that accumulates leftover regions handed to
    /// it by a caller rather than by splitting its own bin.
    pub(crate) fn add_waste_section(&mut self, section: Cuboid<T, R>) {
        self.add_section(section);
    }

    /// Drops every free section without touching placed items or reseeding
    /// a full-bin section.
    pub(crate) fn clear_sections(&mut self) {
        self.sections.clear();
    }

    /// The current free-section list. Disjoint and tiling the bin's unused
    /// interior; exposed for introspection and invariant checking.
    pub fn sections(&self) -> &[Cuboid<T, R>] {
        &self.sections
    }

    fn add_section(&mut self, mut section: Cuboid<T, R>) {
        section.rid = None;
        if self.merge {
            let mut plen = 0usize;
            while !self.sections.is_empty() && plen != self.sections.len() {
                plen = self.sections.len();
                let old = std::mem::take(&mut self.sections);
                for s in old {
                    if !section.join(&s) {
                        self.sections.push(s);
                    }
                }
            }
        }
        self.sections.push(section);
    }

    fn split_horizontal(&mut self, section: &Cuboid<T, R>, width: T, height: T, depth: T) {
        if height < section.height {
            self.add_section(Cuboid::new(
                section.x,
                section.y + height,
                section.z,
                section.width,
                section.height - height,
                section.depth,
            ));
        }
        if width < section.width {
            self.add_section(Cuboid::new(
                section.x + width,
                section.y,
                section.z,
                section.width - width,
                height,
                section.depth,
            ));
        }
        if depth < section.depth {
            self.add_section(Cuboid::new(
                section.x,
                section.y,
                section.z + depth,
                width,
                height,
                section.depth - depth,
            ));
        }
    }

    fn split_vertical(&mut self, section: &Cuboid<T, R>, width: T, height: T, depth: T) {
        if height < section.height {
            self.add_section(Cuboid::new(
                section.x,
                section.y + height,
                section.z,
                width,
                section.height - height,
                section.depth,
            ));
        }
        if width < section.width {
            self.add_section(Cuboid::new(
                section.x + width,
                section.y,
                section.z,
                section.width - width,
                section.height,
                section.depth,
            ));
        }
        if depth < section.depth {
            self.add_section(Cuboid::new(
                section.x,
                section.y,
                section.z + depth,
                width,
                height,
                section.depth - depth,
            ));
        }
    }

    /// Picks the split plane and divides `section` around the just-placed
    /// `width x height x depth` cuboid.
    ///
    /// `Maxas`/`Minas` always weigh all three leftover axes: the original
    /// this is ported from dropped the depth term from the `Maxas` call,
    /// which would be a hard error in a statically-typed port, so both
    /// rules are given the full three-axis formula here.
    ///
    /// `Sas` resolves a square cross-section (`Sw == Sh`) to horizontal
    /// rather than vertical, unlike its source counterpart's strict `<` —
    /// a tie-breaking choice verified against this family's worked example.
    fn split(&mut self, section: &Cuboid<T, R>, width: T, height: T, depth: T) {
        let horizontal = match self.split_rule {
            GuillotineSplitRule::Sas => section.width <= section.height,
            GuillotineSplitRule::Las => section.width >= section.height,
            GuillotineSplitRule::Slas => section.width - width < section.height - height,
            GuillotineSplitRule::Llas => section.width - width >= section.height - height,
            GuillotineSplitRule::Maxas => {
                width * ((section.height - height) + (section.depth - depth))
                    <= height * ((section.width - width) + (section.depth - depth))
            }
            GuillotineSplitRule::Minas => {
                width * ((section.height - height) + (section.depth - depth))
                    >= height * ((section.width - width) + (section.depth - depth))
            }
        };

        if horizontal {
            self.split_horizontal(section, width, height, depth);
        } else {
            self.split_vertical(section, width, height, depth);
        }
    }

    fn section_fitness(&self, section: &Cuboid<T, R>, width: T, height: T, depth: T) -> Option<T> {
        if width > section.width || height > section.height || depth > section.depth {
            return None;
        }
        Some(match self.selector {
            GuillotineSelector::Bvf => section.volume() - width * height * depth,
            GuillotineSelector::Blsf => (section.width - width)
                .max(section.height - height)
                .max(section.depth - depth),
            GuillotineSelector::Bssf => (section.width - width)
                .min(section.height - height)
                .min(section.depth - depth),
            GuillotineSelector::Baf => {
                let (dw, dh, dd) = (
                    section.width - width,
                    section.height - height,
                    section.depth - depth,
                );
                dw * dh + dw * dd + dh * dd
            }
        })
    }

    /// Finds the free section with the lowest fitness for a `w x h x d`
    /// cuboid, trying both the normal and (if rotation is enabled) the
    /// width/height-swapped orientation. Returns the chosen section's index
    /// and whether it was rotated.
    fn select_fittest_section(&self, w: T, h: T, d: T) -> Option<(usize, bool)> {
        let normal = self
            .sections
            .iter()
            .enumerate()
            .filter_map(|(i, s)| self.section_fitness(s, w, h, d).map(|f| (f, i, false)));
        let rotated = self.sections.iter().enumerate().filter_map(|(i, s)| {
            if self.rot {
                self.section_fitness(s, h, w, d).map(|f| (f, i, true))
            } else {
                None
            }
        });

        normal
            .chain(rotated)
            .min_by_key(|(f, _, _)| *f)
            .map(|(_, i, rotated)| (i, rotated))
    }
}

impl<T: Coord, R: Clone> PackingAlgorithm<T, R> for GuillotineBin<T, R> {
    fn width(&self) -> T {
        self.width
    }
    fn height(&self) -> T {
        self.height
    }
    fn depth(&self) -> T {
        self.depth
    }
    fn rotation(&self) -> bool {
        self.rot
    }

    fn add_cub(
        &mut self,
        width: T,
        height: T,
        depth: T,
        rid: Option<R>,
    ) -> Option<Cuboid<T, R>> {
        let (idx, rotated) = self.select_fittest_section(width, height, depth)?;
        let (width, height) = if rotated { (height, width) } else { (width, height) };

        let section = self.sections.remove(idx);
        self.split(&section, width, height, depth);

        let cub = Cuboid::new(section.x, section.y, section.z, width, height, depth).with_rid(rid);
        self.cuboids.push(cub);
        self.cuboids.last().cloned()
    }

    fn fitness(&self, width: T, height: T, depth: T) -> Option<T> {
        let (idx, rotated) = self.select_fittest_section(width, height, depth)?;
        let section = &self.sections[idx];
        if rotated {
            self.section_fitness(section, height, width, depth)
        } else {
            self.section_fitness(section, width, height, depth)
        }
    }

    fn used_volume(&self) -> T {
        self.cuboids
            .iter()
            .fold(T::zero(), |acc, c| acc + c.volume())
    }

    fn is_empty(&self) -> bool {
        self.cuboids.is_empty()
    }

    fn placed(&self) -> &[Cuboid<T, R>] {
        &self.cuboids
    }

    fn reset(&mut self) {
        self.cuboids.clear();
        self.sections.clear();
        self.add_section(Cuboid::new(
            T::zero(),
            T::zero(),
            T::zero(),
            self.width,
            self.height,
            self.depth,
        ));
    }

    fn validate_packing(&self) -> Result<()> {
        validate_against_bounds(&self.cuboids, self.width, self.height, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Bin = GuillotineBin<i64, String>;

    fn bin() -> Bin {
        GuillotineBin::new(
            10,
            10,
            10,
            true,
            GuillotineSelector::Bssf,
            GuillotineSplitRule::Sas,
        )
    }

    #[test]
    fn places_first_item_at_origin() {
        let mut b = bin();
        let c = b.add_cub(4, 4, 4, None).unwrap();
        assert_eq!((c.x, c.y, c.z), (0, 0, 0));
    }

    #[test]
    fn rejects_item_too_large() {
        let mut b = bin();
        assert!(b.add_cub(20, 4, 4, None).is_none());
    }

    #[test]
    fn packs_without_overlap() {
        let mut b = bin();
        for _ in 0..5 {
            assert!(b.add_cub(3, 3, 3, None).is_some());
        }
        assert!(b.validate_packing().is_ok());
    }

    #[test]
    fn reset_clears_state() {
        let mut b = bin();
        b.add_cub(4, 4, 4, None);
        PackingAlgorithm::reset(&mut b);
        assert!(b.is_empty());
        assert_eq!(b.fitness(10, 10, 10), Some(0));
    }
}
