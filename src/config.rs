use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Guillotine free-section fitness selectors: which free section a new
/// cuboid is placed into.
///
/// - `Bvf` (best volume fit): free section with the smallest leftover volume.
/// - `Blsf`/`Bssf` (best long/short side fit): smallest leftover on the
///   longest/shortest remaining axis.
/// - `Baf` (best area fit): free section with the smallest leftover
///   footprint area on the two non-placement axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuillotineSelector {
    Bvf,
    Blsf,
    Bssf,
    Baf,
}

impl FromStr for GuillotineSelector {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bvf" | "bestvolumefit" => Ok(Self::Bvf),
            "blsf" | "bestlongsidefit" => Ok(Self::Blsf),
            "bssf" | "bestshortsidefit" => Ok(Self::Bssf),
            "baf" | "bestareafit" => Ok(Self::Baf),
            _ => Err(()),
        }
    }
}

/// Guillotine split-axis rules: which of the three candidate planes is used
/// to divide the remaining free section after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuillotineSplitRule {
    /// Split along the shorter axis of the section.
    Sas,
    /// Split along the longer axis of the section.
    Las,
    /// Split along the shorter leftover axis after placement.
    Slas,
    /// Split along the longer leftover axis after placement.
    Llas,
    /// Split to maximize the area of the larger resulting piece.
    Maxas,
    /// Split to minimize the area of the larger resulting piece.
    Minas,
}

impl FromStr for GuillotineSplitRule {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sas" | "shortaxissplit" => Ok(Self::Sas),
            "las" | "longaxissplit" => Ok(Self::Las),
            "slas" | "shortleftoveraxissplit" => Ok(Self::Slas),
            "llas" | "longleftoveraxissplit" => Ok(Self::Llas),
            "maxas" | "maxarea" => Ok(Self::Maxas),
            "minas" | "minarea" => Ok(Self::Minas),
            _ => Err(()),
        }
    }
}

/// Maximal-Cuboids fitness selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxCubsSelector {
    /// Bottom-left: lowest y, then lowest x, then lowest z.
    Bl,
    /// Best short side fit.
    Bssf,
    /// Best long side fit.
    Blsf,
    /// Best area fit.
    Baf,
}

impl FromStr for MaxCubsSelector {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bl" | "bottomleft" => Ok(Self::Bl),
            "bssf" | "bestshortsidefit" => Ok(Self::Bssf),
            "blsf" | "bestlongsidefit" => Ok(Self::Blsf),
            "baf" | "bestareafit" => Ok(Self::Baf),
            _ => Err(()),
        }
    }
}

/// Deterministic pre-sort applied to the cuboid list before offline packing.
/// All orders but `None` sort in descending order of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Volume,
    Area,
    Diff,
    Sside,
    Lside,
    Ratio,
    None,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "volume" => Ok(Self::Volume),
            "area" => Ok(Self::Area),
            "diff" => Ok(Self::Diff),
            "sside" | "shortside" => Ok(Self::Sside),
            "lside" | "longside" => Ok(Self::Lside),
            "ratio" => Ok(Self::Ratio),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

/// Multi-bin dispatch heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinAlgo {
    /// Next fit: only one bin open at a time.
    Bnf,
    /// First fit: try every open bin in order, first that fits wins.
    Bff,
    /// Best fit: try every open bin, the one with the best fitness wins.
    Bbf,
    /// Global: for each open bin, place the remaining cuboid with the best
    /// fitness. Offline only.
    Global,
}

impl FromStr for BinAlgo {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bnf" | "nextfit" => Ok(Self::Bnf),
            "bff" | "firstfit" => Ok(Self::Bff),
            "bbf" | "bestfit" => Ok(Self::Bbf),
            "global" => Ok(Self::Global),
            _ => Err(()),
        }
    }
}

/// Online vs offline packing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Cuboids are packed as soon as they're added.
    Online,
    /// Cuboids are buffered and packed when `pack()` is called.
    Offline,
}

impl FromStr for Mode {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            _ => Err(()),
        }
    }
}

/// Top-level knobs controlling a multi-bin packer instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    pub mode: Mode,
    pub bin_algo: BinAlgo,
    pub sort_order: SortOrder,
    /// Enable/disable rotation of cuboids onto any of their three axis
    /// permutations when attempting a fit.
    pub rotation: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Offline,
            bin_algo: BinAlgo::Bbf,
            sort_order: SortOrder::Volume,
            rotation: true,
        }
    }
}

impl PackerConfig {
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }

    /// Validates the mode/bin-algorithm combination.
    ///
    /// `Global` dispatch only makes sense once every cuboid is known up
    /// front, so it is rejected in `Online` mode.
    pub fn validate(&self) -> Result<()> {
        if self.mode == Mode::Online && self.bin_algo == BinAlgo::Global {
            return Err(PackError::InvalidModeBinAlgo {
                mode: format!("{:?}", self.mode),
                bin_algo: format!("{:?}", self.bin_algo),
            });
        }
        Ok(())
    }
}

/// Builder for [`PackerConfig`].
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn mode(mut self, v: Mode) -> Self {
        self.cfg.mode = v;
        self
    }
    pub fn bin_algo(mut self, v: BinAlgo) -> Self {
        self.cfg.bin_algo = v;
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn rotation(mut self, v: bool) -> Self {
        self.cfg.rotation = v;
        self
    }
    pub fn build(self) -> Result<PackerConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PackerConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_abbreviation_and_long_form_aliases() {
        assert_eq!("bssf".parse(), Ok(GuillotineSelector::Bssf));
        assert_eq!("BestShortSideFit".parse(), Ok(GuillotineSelector::Bssf));
        assert_eq!("minas".parse(), Ok(GuillotineSplitRule::Minas));
        assert_eq!("bl".parse(), Ok(MaxCubsSelector::Bl));
        assert_eq!("lside".parse(), Ok(SortOrder::Lside));
        assert_eq!("bbf".parse(), Ok(BinAlgo::Bbf));
        assert_eq!("offline".parse(), Ok(Mode::Offline));
        assert!("nonsense".parse::<BinAlgo>().is_err());
    }

    #[test]
    fn global_online_is_rejected() {
        let cfg = PackerConfig::builder()
            .mode(Mode::Online)
            .bin_algo(BinAlgo::Global)
            .build();
        assert!(cfg.is_err());
    }
}
