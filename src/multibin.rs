//! Multi-bin dispatch: Next-Fit, First-Fit, Best-Fit and Global heuristics
//! for spreading cuboids across however many bins of whatever sizes the
//! caller registered, each in online (packed as added) or offline (packed
//! on `pack()`) flavors.

use std::collections::VecDeque;
use std::marker::PhantomData;

use tracing::instrument;

use crate::bin_factory::BinFactory;
use crate::config::{BinAlgo, Mode, PackerConfig, SortOrder};
use crate::error::{PackError, Result};
use crate::geometry::Cuboid;
use crate::numeric::Coord;
use crate::packer::PackingAlgorithm;
use crate::sort::sort_cuboids;

/// Cuboids are packed as soon as they are added.
pub struct OnlinePacker<T, R, A, F> {
    rotation: bool,
    bin_algo: BinAlgo,
    make: F,
    closed_bins: VecDeque<A>,
    open_bins: VecDeque<A>,
    empty_bins: Vec<(u64, BinFactory<T, R, A, F>)>,
    next_bin_id: u64,
    _marker: PhantomData<R>,
}

impl<T, R, A, F> OnlinePacker<T, R, A, F>
where
    T: Coord,
    R: Clone,
    A: PackingAlgorithm<T, R>,
    F: Fn(T, T, T, bool) -> A + Copy,
{
    pub fn new(bin_algo: BinAlgo, rotation: bool, make: F) -> Result<Self> {
        if bin_algo == BinAlgo::Global {
            return Err(PackError::InvalidModeBinAlgo {
                mode: "online".into(),
                bin_algo: "global".into(),
            });
        }
        Ok(Self {
            rotation,
            bin_algo,
            make,
            closed_bins: VecDeque::new(),
            open_bins: VecDeque::new(),
            empty_bins: Vec::new(),
            next_bin_id: 0,
            _marker: PhantomData,
        })
    }

    pub fn add_bin(&mut self, width: T, height: T, depth: T, count: usize) {
        let id = self.next_bin_id;
        self.next_bin_id += 1;
        let factory = BinFactory::new(width, height, depth, count, self.rotation, self.make);
        self.empty_bins.push((id, factory));
    }

    fn new_open_bin(&mut self, width: T, height: T, depth: T) -> bool {
        let mut opened = false;
        let mut depleted_key = None;

        for (key, factory) in self.empty_bins.iter_mut() {
            if !factory.fits_inside(width, height, depth) {
                continue;
            }
            if let Some(new_bin) = factory.new_bin() {
                self.open_bins.push_back(new_bin);
                opened = true;
                if factory.is_empty() {
                    depleted_key = Some(*key);
                }
                break;
            }
        }

        if let Some(key) = depleted_key {
            self.empty_bins.retain(|(k, _)| *k != key);
        }
        opened
    }

    fn add_cub_bnf(&mut self, w: T, h: T, d: T, rid: Option<R>) -> Option<Cuboid<T, R>> {
        loop {
            if self.open_bins.is_empty() && !self.new_open_bin(w, h, d) {
                return None;
            }
            if let Some(cub) = self.open_bins.front_mut().unwrap().add_cub(w, h, d, rid.clone()) {
                return Some(cub);
            }
            let closed = self.open_bins.pop_front().unwrap();
            self.closed_bins.push_back(closed);
        }
    }

    fn add_cub_bff(&mut self, w: T, h: T, d: T, rid: Option<R>) -> Option<Cuboid<T, R>> {
        for bin in self.open_bins.iter_mut() {
            if let Some(cub) = bin.add_cub(w, h, d, rid.clone()) {
                return Some(cub);
            }
        }
        loop {
            if !self.new_open_bin(w, h, d) {
                return None;
            }
            if let Some(cub) = self.open_bins.back_mut().unwrap().add_cub(w, h, d, rid.clone()) {
                return Some(cub);
            }
        }
    }

    fn add_cub_bbf(&mut self, w: T, h: T, d: T, rid: Option<R>) -> Option<Cuboid<T, R>> {
        let best = self
            .open_bins
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.fitness(w, h, d).map(|f| (f, i)))
            .min_by_key(|(f, _)| *f);

        if let Some((_, idx)) = best {
            if let Some(cub) = self.open_bins[idx].add_cub(w, h, d, rid.clone()) {
                return Some(cub);
            }
        }

        loop {
            if !self.new_open_bin(w, h, d) {
                return None;
            }
            if let Some(cub) = self.open_bins.back_mut().unwrap().add_cub(w, h, d, rid.clone()) {
                return Some(cub);
            }
        }
    }

    #[instrument(skip(self, rid), level = "debug")]
    pub fn add_cub(&mut self, w: T, h: T, d: T, rid: Option<R>) -> Result<Option<Cuboid<T, R>>> {
        if w <= T::zero() || h <= T::zero() || d <= T::zero() {
            return Err(PackError::InvalidDimensions {
                width: format!("{:?}", w),
                height: format!("{:?}", h),
                depth: format!("{:?}", d),
            });
        }
        Ok(match self.bin_algo {
            BinAlgo::Bnf => self.add_cub_bnf(w, h, d, rid),
            BinAlgo::Bff => self.add_cub_bff(w, h, d, rid),
            BinAlgo::Bbf => self.add_cub_bbf(w, h, d, rid),
            BinAlgo::Global => unreachable!("validated at construction"),
        })
    }

    pub fn len(&self) -> usize {
        self.closed_bins.len() + self.open_bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter_bins(&self) -> impl Iterator<Item = &A> {
        self.closed_bins.iter().chain(self.open_bins.iter())
    }

    /// Returns the bin at `index`, supporting Python-style negative
    /// indexing from the end.
    pub fn get(&self, index: i64) -> Result<&A> {
        let size = self.len() as i64;
        let idx = if index < 0 { index + size } else { index };
        if idx < 0 || idx >= size {
            return Err(PackError::BinIndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let idx = idx as usize;
        if idx < self.closed_bins.len() {
            Ok(&self.closed_bins[idx])
        } else {
            Ok(&self.open_bins[idx - self.closed_bins.len()])
        }
    }

    pub fn cub_list(&self) -> Vec<(usize, Cuboid<T, R>)> {
        let mut out = Vec::new();
        for (i, bin) in self.iter_bins().enumerate() {
            for c in bin.placed() {
                out.push((i, c.clone()));
            }
        }
        out
    }

    pub fn bin_list(&self) -> Vec<(T, T, T)> {
        self.iter_bins().map(|b| (b.width(), b.height(), b.depth())).collect()
    }

    pub fn validate_packing(&self) -> Result<()> {
        for b in self.iter_bins() {
            b.validate_packing()?;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.closed_bins.clear();
        self.open_bins.clear();
        self.empty_bins.clear();
        self.next_bin_id = 0;
    }
}

/// Cuboids are buffered until `pack()` is called.
pub struct OfflinePacker<T, R, A, F> {
    inner: OnlinePacker<T, R, A, F>,
    sort_order: SortOrder,
    avail_bins: Vec<(T, T, T, usize)>,
    avail_cub: Vec<(T, T, T, Option<R>)>,
}

impl<T, R, A, F> OfflinePacker<T, R, A, F>
where
    T: Coord,
    R: Clone,
    A: PackingAlgorithm<T, R>,
    F: Fn(T, T, T, bool) -> A + Copy,
{
    pub fn new(bin_algo: BinAlgo, sort_order: SortOrder, rotation: bool, make: F) -> Result<Self> {
        Ok(Self {
            inner: OnlinePacker::new(bin_algo, rotation, make)?,
            sort_order,
            avail_bins: Vec::new(),
            avail_cub: Vec::new(),
        })
    }

    pub fn add_bin(&mut self, width: T, height: T, depth: T, count: usize) {
        self.avail_bins.push((width, height, depth, count));
    }

    pub fn add_cub(&mut self, width: T, height: T, depth: T, rid: Option<R>) {
        self.avail_cub.push((width, height, depth, rid));
    }

    /// Resets, registers all buffered bins, sorts the buffered cuboids per
    /// `sort_order`, then feeds them one by one through the configured
    /// dispatch heuristic. A no-op if no bins or no cuboids were added.
    #[instrument(skip(self), level = "debug")]
    pub fn pack(&mut self) -> Result<()> {
        self.inner.reset();
        if self.avail_bins.is_empty() || self.avail_cub.is_empty() {
            return Ok(());
        }

        for (w, h, d, count) in self.avail_bins.iter() {
            self.inner.add_bin(*w, *h, *d, *count);
        }

        let mut items = std::mem::take(&mut self.avail_cub);
        sort_cuboids(self.sort_order, &mut items);

        for (w, h, d, rid) in items.iter() {
            self.inner.add_cub(*w, *h, *d, rid.clone())?;
        }
        self.avail_cub = items;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    pub fn get(&self, index: i64) -> Result<&A> {
        self.inner.get(index)
    }
    pub fn cub_list(&self) -> Vec<(usize, Cuboid<T, R>)> {
        self.inner.cub_list()
    }
    pub fn bin_list(&self) -> Vec<(T, T, T)> {
        self.inner.bin_list()
    }
    pub fn validate_packing(&self) -> Result<()> {
        self.inner.validate_packing()
    }
}

/// Offline-only: for each bin, place the remaining cuboid with the best
/// fitness until it is filled or the cuboids are exhausted, then open the
/// next bin where at least one remaining cuboid fits.
pub struct GlobalPacker<T, R, A, F> {
    rotation: bool,
    make: F,
    closed_bins: VecDeque<A>,
    open_bins: VecDeque<A>,
    empty_bins: Vec<(u64, BinFactory<T, R, A, F>)>,
    next_bin_id: u64,
    avail_bins: Vec<(T, T, T, usize)>,
    avail_cub: Vec<(T, T, T, Option<R>)>,
}

impl<T, R, A, F> GlobalPacker<T, R, A, F>
where
    T: Coord,
    R: Clone,
    A: PackingAlgorithm<T, R>,
    F: Fn(T, T, T, bool) -> A + Copy,
{
    pub fn new(rotation: bool, make: F) -> Self {
        Self {
            rotation,
            make,
            closed_bins: VecDeque::new(),
            open_bins: VecDeque::new(),
            empty_bins: Vec::new(),
            next_bin_id: 0,
            avail_bins: Vec::new(),
            avail_cub: Vec::new(),
        }
    }

    pub fn add_bin(&mut self, width: T, height: T, depth: T, count: usize) {
        self.avail_bins.push((width, height, depth, count));
    }

    pub fn add_cub(&mut self, width: T, height: T, depth: T, rid: Option<R>) {
        self.avail_cub.push((width, height, depth, rid));
    }

    fn register_bin(&mut self, width: T, height: T, depth: T, count: usize) {
        let id = self.next_bin_id;
        self.next_bin_id += 1;
        let factory = BinFactory::new(width, height, depth, count, self.rotation, self.make);
        self.empty_bins.push((id, factory));
    }

    fn new_open_bin(&mut self, remaining: &[(u64, (T, T, T, Option<R>))]) -> bool {
        let mut opened = false;
        let mut to_delete = Vec::new();

        for (key, factory) in self.empty_bins.iter_mut() {
            let any_fits = remaining
                .iter()
                .any(|(_, (w, h, d, _))| factory.fits_inside(*w, *h, *d));
            if !any_fits {
                to_delete.push(*key);
                continue;
            }
            if let Some(new_bin) = factory.new_bin() {
                self.open_bins.push_back(new_bin);
                opened = true;
                if factory.is_empty() {
                    to_delete.push(*key);
                }
                break;
            }
        }

        self.empty_bins.retain(|(k, _)| !to_delete.contains(k));
        opened
    }

    #[instrument(skip(self), level = "debug")]
    pub fn pack(&mut self) -> Result<()> {
        self.closed_bins.clear();
        self.open_bins.clear();
        self.empty_bins.clear();
        self.next_bin_id = 0;

        if self.avail_bins.is_empty() || self.avail_cub.is_empty() {
            return Ok(());
        }

        let bins = std::mem::take(&mut self.avail_bins);
        for (w, h, d, count) in bins.iter() {
            self.register_bin(*w, *h, *d, *count);
        }
        self.avail_bins = bins;

        let mut remaining: Vec<(u64, (T, T, T, Option<R>))> = self
            .avail_cub
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, c)| (i as u64, c))
            .collect();

        while !remaining.is_empty() {
            if !self.new_open_bin(&remaining) {
                break;
            }

            loop {
                let best = remaining
                    .iter()
                    .enumerate()
                    .filter_map(|(ri, (_, (w, h, d, _)))| {
                        self.open_bins.back().unwrap().fitness(*w, *h, *d).map(|f| (f, ri))
                    })
                    .min_by_key(|(f, _)| *f);

                match best {
                    None => {
                        let closed = self.open_bins.pop_front().unwrap();
                        self.closed_bins.push_back(closed);
                        break;
                    }
                    Some((_, ri)) => {
                        let (_, (w, h, d, rid)) = remaining.remove(ri);
                        self.open_bins.back_mut().unwrap().add_cub(w, h, d, rid);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.closed_bins.len() + self.open_bins.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter_bins(&self) -> impl Iterator<Item = &A> {
        self.closed_bins.iter().chain(self.open_bins.iter())
    }

    pub fn get(&self, index: i64) -> Result<&A> {
        let size = self.len() as i64;
        let idx = if index < 0 { index + size } else { index };
        if idx < 0 || idx >= size {
            return Err(PackError::BinIndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let idx = idx as usize;
        if idx < self.closed_bins.len() {
            Ok(&self.closed_bins[idx])
        } else {
            Ok(&self.open_bins[idx - self.closed_bins.len()])
        }
    }

    pub fn cub_list(&self) -> Vec<(usize, Cuboid<T, R>)> {
        let mut out = Vec::new();
        for (i, bin) in self.iter_bins().enumerate() {
            for c in bin.placed() {
                out.push((i, c.clone()));
            }
        }
        out
    }

    pub fn bin_list(&self) -> Vec<(T, T, T)> {
        self.iter_bins().map(|b| (b.width(), b.height(), b.depth())).collect()
    }

    pub fn validate_packing(&self) -> Result<()> {
        for b in self.iter_bins() {
            b.validate_packing()?;
        }
        Ok(())
    }
}

/// Unified packer handle returned by [`new_packer`], covering all mode /
/// bin-algorithm combinations behind one type.
pub enum Packer<T, R, A, F> {
    Online(OnlinePacker<T, R, A, F>),
    Offline(OfflinePacker<T, R, A, F>),
    Global(GlobalPacker<T, R, A, F>),
}

impl<T, R, A, F> Packer<T, R, A, F>
where
    T: Coord,
    R: Clone,
    A: PackingAlgorithm<T, R>,
    F: Fn(T, T, T, bool) -> A + Copy,
{
    pub fn add_bin(&mut self, width: T, height: T, depth: T, count: usize) {
        match self {
            Packer::Online(p) => p.add_bin(width, height, depth, count),
            Packer::Offline(p) => p.add_bin(width, height, depth, count),
            Packer::Global(p) => p.add_bin(width, height, depth, count),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Packer::Online(p) => p.len(),
            Packer::Offline(p) => p.len(),
            Packer::Global(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: i64) -> Result<&A> {
        match self {
            Packer::Online(p) => p.get(index),
            Packer::Offline(p) => p.get(index),
            Packer::Global(p) => p.get(index),
        }
    }

    pub fn cub_list(&self) -> Vec<(usize, Cuboid<T, R>)> {
        match self {
            Packer::Online(p) => p.cub_list(),
            Packer::Offline(p) => p.cub_list(),
            Packer::Global(p) => p.cub_list(),
        }
    }

    pub fn bin_list(&self) -> Vec<(T, T, T)> {
        match self {
            Packer::Online(p) => p.bin_list(),
            Packer::Offline(p) => p.bin_list(),
            Packer::Global(p) => p.bin_list(),
        }
    }

    pub fn validate_packing(&self) -> Result<()> {
        match self {
            Packer::Online(p) => p.validate_packing(),
            Packer::Offline(p) => p.validate_packing(),
            Packer::Global(p) => p.validate_packing(),
        }
    }

    /// Online-mode placement: packs immediately, returning the placed
    /// cuboid or `None` if it fit nowhere.
    ///
    /// # Errors
    /// Returns an error if called in offline/global mode, or if a
    /// dimension isn't strictly positive.
    pub fn add_cub(&mut self, width: T, height: T, depth: T, rid: Option<R>) -> Result<Option<Cuboid<T, R>>> {
        match self {
            Packer::Online(p) => p.add_cub(width, height, depth, rid),
            _ => Err(PackError::InvalidModeBinAlgo {
                mode: "offline".into(),
                bin_algo: "add_cub is only valid in online mode".into(),
            }),
        }
    }

    /// Offline-mode buffering: queues a cuboid for the next `pack()` call.
    pub fn queue_cub(&mut self, width: T, height: T, depth: T, rid: Option<R>) -> Result<()> {
        match self {
            Packer::Offline(p) => {
                p.add_cub(width, height, depth, rid);
                Ok(())
            }
            Packer::Global(p) => {
                p.add_cub(width, height, depth, rid);
                Ok(())
            }
            Packer::Online(_) => Err(PackError::InvalidModeBinAlgo {
                mode: "online".into(),
                bin_algo: "queue_cub is only valid in offline/global mode".into(),
            }),
        }
    }

    /// Offline-mode packing: runs the buffered bins and cuboids through the
    /// configured heuristic.
    pub fn pack(&mut self) -> Result<()> {
        match self {
            Packer::Offline(p) => p.pack(),
            Packer::Global(p) => p.pack(),
            Packer::Online(_) => Err(PackError::InvalidModeBinAlgo {
                mode: "online".into(),
                bin_algo: "pack() is only valid in offline/global mode".into(),
            }),
        }
    }
}

/// Constructs a [`Packer`] for the given configuration and single-bin
/// algorithm factory closure. Fails at construction if `mode`/`bin_algo`
/// are an invalid combination (`Global` is offline-only).
pub fn new_packer<T, R, A, F>(config: &PackerConfig, make: F) -> Result<Packer<T, R, A, F>>
where
    T: Coord,
    R: Clone,
    A: PackingAlgorithm<T, R>,
    F: Fn(T, T, T, bool) -> A + Copy,
{
    config.validate()?;
    match (config.mode, config.bin_algo) {
        (Mode::Online, BinAlgo::Global) => unreachable!("rejected by PackerConfig::validate"),
        (Mode::Online, _) => Ok(Packer::Online(OnlinePacker::new(
            config.bin_algo,
            config.rotation,
            make,
        )?)),
        (Mode::Offline, BinAlgo::Global) => {
            Ok(Packer::Global(GlobalPacker::new(config.rotation, make)))
        }
        (Mode::Offline, _) => Ok(Packer::Offline(OfflinePacker::new(
            config.bin_algo,
            config.sort_order,
            config.rotation,
            make,
        )?)),
    }
}
