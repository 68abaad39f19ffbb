//! Maximal-Cuboids family: the free volume is kept as a list of (possibly
//! overlapping) maximal empty cuboids. Placing an item intersects and
//! re-slices every maximal cuboid it overlaps, then drops any maximal
//! cuboid now contained by another.

use super::{validate_against_bounds, PackingAlgorithm};
use crate::config::MaxCubsSelector;
use crate::error::Result;
use crate::geometry::Cuboid;
use crate::numeric::Coord;

pub struct MaxCubsBin<T, R> {
    width: T,
    height: T,
    depth: T,
    rot: bool,
    selector: MaxCubsSelector,
    max_cubs: Vec<Cuboid<T, R>>,
    cuboids: Vec<Cuboid<T, R>>,
}

impl<T: Coord, R: Clone> MaxCubsBin<T, R> {
    pub fn new(width: T, height: T, depth: T, rot: bool, selector: MaxCubsSelector) -> Self {
        let mut bin = Self {
            width,
            height,
            depth,
            rot,
            selector,
            max_cubs: Vec::new(),
            cuboids: Vec::new(),
        };
        PackingAlgorithm::reset(&mut bin);
        bin
    }

    /// Fitness of placing a `w x h x d` cuboid into a specific maximal
    /// cuboid `m`; `None` if it doesn't fit. `Bl` always returns zero here —
    /// its ranking is positional and handled entirely in
    /// [`Self::select_position`].
    fn cub_fitness(&self, m: &Cuboid<T, R>, w: T, h: T, d: T) -> Option<T> {
        if w > m.width || h > m.height || d > m.depth {
            return None;
        }
        Some(match self.selector {
            MaxCubsSelector::Bl => T::zero(),
            MaxCubsSelector::Bssf => (m.width - w).min(m.height - h).min(m.depth - d),
            MaxCubsSelector::Blsf => (m.width - w).max(m.height - h).max(m.depth - d),
            MaxCubsSelector::Baf => m.volume() - w * h * d,
        })
    }

    /// Finds the best maximal cuboid to place a `w x h x d` cuboid into,
    /// trying both the normal and (if rotation is enabled) the
    /// width/height-swapped orientation. Returns the placed cuboid and the
    /// index of the maximal cuboid it was carved from.
    fn select_position(&self, w: T, h: T, d: T) -> Option<(Cuboid<T, R>, usize)> {
        if self.max_cubs.is_empty() {
            return None;
        }

        if self.selector == MaxCubsSelector::Bl {
            let normal = self.max_cubs.iter().enumerate().filter_map(|(i, m)| {
                self.cub_fitness(m, w, h, d)
                    .map(|_| ((m.y + h, m.x, m.z), i, w, h, d))
            });
            let rotated = self.max_cubs.iter().enumerate().filter_map(|(i, m)| {
                if self.rot {
                    self.cub_fitness(m, h, w, d)
                        .map(|_| ((m.y + w, m.x, m.z), i, h, w, d))
                } else {
                    None
                }
            });
            return normal
                .chain(rotated)
                .min_by_key(|(key, _, _, _, _)| *key)
                .map(|(_, i, w, h, d)| {
                    let m = &self.max_cubs[i];
                    (Cuboid::new(m.x, m.y, m.z, w, h, d), i)
                });
        }

        let normal = self
            .max_cubs
            .iter()
            .enumerate()
            .filter_map(|(i, m)| self.cub_fitness(m, w, h, d).map(|f| (f, i, w, h, d)));
        let rotated = self.max_cubs.iter().enumerate().filter_map(|(i, m)| {
            if self.rot {
                self.cub_fitness(m, h, w, d).map(|f| (f, i, h, w, d))
            } else {
                None
            }
        });

        normal
            .chain(rotated)
            .min_by_key(|(f, _, _, _, _)| *f)
            .map(|(_, i, w, h, d)| {
                let m = &self.max_cubs[i];
                (Cuboid::new(m.x, m.y, m.z, w, h, d), i)
            })
    }

    /// Slices `m` around the placed cuboid `c`, returning the up-to-five
    /// maximal cuboids that remain.
    ///
    /// The fifth (in-depth) slab intentionally keeps `c`'s own x/y footprint
    /// rather than `m`'s: the slab behind the placed item is only as wide as
    /// the item itself, not the whole parent maximal cuboid.
    fn generate_splits(m: &Cuboid<T, R>, c: &Cuboid<T, R>) -> Vec<Cuboid<T, R>> {
        let mut out = Vec::with_capacity(5);

        if c.left() > m.left() {
            out.push(Cuboid::new(
                m.left(),
                m.bottom(),
                m.outeye(),
                c.left() - m.left(),
                m.height,
                m.depth,
            ));
        }
        if c.right() < m.right() {
            out.push(Cuboid::new(
                c.right(),
                m.bottom(),
                m.outeye(),
                m.right() - c.right(),
                m.height,
                m.depth,
            ));
        }
        if c.top() < m.top() {
            out.push(Cuboid::new(
                m.left(),
                c.top(),
                m.outeye(),
                m.width,
                m.top() - c.top(),
                m.depth,
            ));
        }
        if c.bottom() > m.bottom() {
            out.push(Cuboid::new(
                m.left(),
                m.bottom(),
                m.outeye(),
                m.width,
                c.bottom() - m.bottom(),
                m.depth,
            ));
        }
        if c.ineye() < m.ineye() {
            out.push(Cuboid::new(
                c.left(),
                c.bottom(),
                c.ineye(),
                c.width,
                c.height,
                m.ineye() - c.ineye(),
            ));
        }

        out
    }

    fn split(&mut self, cub: &Cuboid<T, R>) {
        let old = std::mem::take(&mut self.max_cubs);
        for c in old {
            if c.intersects(cub, false) {
                self.max_cubs.extend(Self::generate_splits(&c, cub));
            } else {
                self.max_cubs.push(c);
            }
        }
    }

    /// The current maximal-cuboid list. May overlap; exposed for
    /// introspection and invariant checking.
    pub fn max_cubs(&self) -> &[Cuboid<T, R>] {
        &self.max_cubs
    }

    /// Drops every maximal cuboid that is fully contained by another.
    fn remove_duplicates(&mut self) {
        let n = self.max_cubs.len();
        let mut contained = vec![false; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if self.max_cubs[i].contains(&self.max_cubs[j]) {
                    contained[j] = true;
                } else if self.max_cubs[j].contains(&self.max_cubs[i]) {
                    contained[i] = true;
                }
            }
        }
        let mut idx = 0;
        self.max_cubs.retain(|_| {
            let keep = !contained[idx];
            idx += 1;
            keep
        });
    }
}

impl<T: Coord, R: Clone> PackingAlgorithm<T, R> for MaxCubsBin<T, R> {
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
        let (mut cub, _) = self.select_position(width, height, depth)?;
        self.split(&cub);
        self.remove_duplicates();
        cub.rid = rid;
        self.cuboids.push(cub.clone());
        Some(cub)
    }

    fn fitness(&self, width: T, height: T, depth: T) -> Option<T> {
        let (cub, idx) = self.select_position(width, height, depth)?;
        let m = &self.max_cubs[idx];
        self.cub_fitness(m, cub.width, cub.height, cub.depth)
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
        self.max_cubs = vec![Cuboid::new(
            T::zero(),
            T::zero(),
            T::zero(),
            self.width,
            self.height,
            self.depth,
        )];
    }

    fn validate_packing(&self) -> Result<()> {
        validate_against_bounds(&self.cuboids, self.width, self.height, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Bin = MaxCubsBin<i64, String>;

    fn bin(selector: MaxCubsSelector) -> Bin {
        MaxCubsBin::new(10, 10, 10, true, selector)
    }

    #[test]
    fn places_first_item_at_origin() {
        let mut b = bin(MaxCubsSelector::Bssf);
        let c = b.add_cub(4, 4, 4, None).unwrap();
        assert_eq!((c.x, c.y, c.z), (0, 0, 0));
    }

    #[test]
    fn rejects_item_too_large() {
        let mut b = bin(MaxCubsSelector::Bssf);
        assert!(b.add_cub(20, 4, 4, None).is_none());
    }

    #[test]
    fn packs_without_overlap_across_selectors() {
        for selector in [
            MaxCubsSelector::Bl,
            MaxCubsSelector::Bssf,
            MaxCubsSelector::Blsf,
            MaxCubsSelector::Baf,
        ] {
            let mut b = bin(selector);
            for _ in 0..6 {
                b.add_cub(3, 3, 3, None);
            }
            assert!(b.validate_packing().is_ok());
        }
    }

    #[test]
    fn reset_clears_state() {
        let mut b = bin(MaxCubsSelector::Bssf);
        b.add_cub(4, 4, 4, None);
        PackingAlgorithm::reset(&mut b);
        assert!(b.is_empty());
        assert_eq!(b.fitness(10, 10, 10), Some(0));
    }
}
