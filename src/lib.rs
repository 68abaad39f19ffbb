//! Generic axis-aligned 3D bin packing.
//!
//! - Algorithms: Guillotine (selector + split rule), Maximal-Cuboids (BL/BSSF/BLSF/BAF)
//! - Multi-bin dispatch: Next-Fit, First-Fit, Best-Fit, Global, each online or offline
//! - Generic over any [`numeric::Coord`] (built-in integers or the fixed-point [`numeric::Decimal`])
//! - [`enclose::Enclose`] searches for the smallest bin that holds a fixed cuboid list
//! - [`waste::WasteManager`] accumulates externally-supplied leftover space for later reuse
//!
//! Quick example:
//! ```
//! use cubpack::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let cfg = PackerConfig::builder()
//!     .mode(Mode::Offline)
//!     .bin_algo(BinAlgo::Bbf)
//!     .sort_order(SortOrder::Volume)
//!     .rotation(true)
//!     .build()?;
//!
//! let make = |w: i64, h: i64, d: i64, rot: bool| {
//!     GuillotineBin::new(w, h, d, rot, GuillotineSelector::Bssf, GuillotineSplitRule::Sas)
//! };
//! let mut packer = new_packer(&cfg, make)?;
//! packer.add_bin(10, 10, 10, 2);
//! packer.queue_cub(4, 4, 4, Some("crate-a".to_string()))?;
//! packer.pack()?;
//! # Ok(()) }
//! ```

pub mod bin_factory;
pub mod config;
pub mod enclose;
pub mod error;
pub mod geometry;
pub mod multibin;
pub mod numeric;
pub mod packer;
pub mod sort;
pub mod waste;

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use multibin::*;
pub use numeric::*;
pub use packer::PackingAlgorithm;
pub use sort::sort_cuboids;

/// Convenience prelude for common types and functions.
/// Importing `cubpack::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::bin_factory::BinFactory;
    pub use crate::config::{
        BinAlgo, GuillotineSelector, GuillotineSplitRule, MaxCubsSelector, Mode, PackerConfig,
        PackerConfigBuilder, SortOrder,
    };
    pub use crate::enclose::{Enclose, EnclosedLayout};
    pub use crate::error::{PackError, Result};
    pub use crate::geometry::{Cuboid, Point};
    pub use crate::multibin::{new_packer, GlobalPacker, OfflinePacker, OnlinePacker, Packer};
    pub use crate::numeric::{Coord, Decimal};
    pub use crate::packer::guillotine::GuillotineBin;
    pub use crate::packer::maxcubs::MaxCubsBin;
    pub use crate::packer::PackingAlgorithm;
    pub use crate::waste::WasteManager;
}
