//! Dataset catalog and routing policy.
//!
//! The archive is a fixed, named set of files per hazard, era and
//! statistic, with the wave projection split into two internal windows.
//! Routing is a total match over `DatasetKey` so the whole policy lives
//! here and is exhaustively checkable.

use std::path::{Path, PathBuf};

use hazard_common::{parse_year, HazardKind, HazardResult, PeriodRange, Scenario, Statistic};

/// Years at or after this boundary route to the projection datasets.
pub const FUTURE_CUTOFF_YEAR: i32 = 2015;

/// The two internal windows of the wave projection archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveWindow {
    /// 2015-2030 projection files.
    Early,
    /// 2031-2060 projection files.
    Late,
}

impl WaveWindow {
    /// Inclusive year coverage of this window.
    pub fn coverage(&self) -> (i32, i32) {
        match self {
            WaveWindow::Early => (2015, 2030),
            WaveWindow::Late => (2031, 2060),
        }
    }
}

/// Identity of one physical dataset in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKey {
    WindHistorical(Statistic),
    WindFuture(Statistic),
    WaveHistorical(Statistic),
    WaveFuture(Statistic, WaveWindow),
}

impl DatasetKey {
    /// Path of this dataset relative to the archive root.
    ///
    /// The layout is preserved from the existing data directories, so a
    /// deployed archive keeps working without renames.
    pub fn relative_path(&self) -> &'static str {
        match self {
            DatasetKey::WindHistorical(Statistic::Mean) => {
                "historico/vento/sfcWind_hist_processado.nc"
            }
            DatasetKey::WindHistorical(Statistic::Max) => {
                "historico/vento/sfcWindmax_hist_processado.nc"
            }
            DatasetKey::WindFuture(Statistic::Mean) => {
                "preditivo/vento/sfcWind_ssp585_processado.nc"
            }
            DatasetKey::WindFuture(Statistic::Max) => {
                "preditivo/vento/sfcWindmax_ssp585_processado.nc"
            }
            DatasetKey::WaveHistorical(Statistic::Mean) => {
                "historico/onda/hsmean_ww3_mri_1979_2015.nc"
            }
            DatasetKey::WaveHistorical(Statistic::Max) => {
                "historico/onda/hsmax_ww3_mri_1979_2015.nc"
            }
            DatasetKey::WaveFuture(Statistic::Mean, WaveWindow::Early) => {
                "preditivo/onda/hsmean_ww3_mri_2015_2030.nc"
            }
            DatasetKey::WaveFuture(Statistic::Mean, WaveWindow::Late) => {
                "preditivo/onda/hsmean_ww3_mri_2031_2060.nc"
            }
            DatasetKey::WaveFuture(Statistic::Max, WaveWindow::Early) => {
                "preditivo/onda/hsmax_ww3_mri_2015_2030.nc"
            }
            DatasetKey::WaveFuture(Statistic::Max, WaveWindow::Late) => {
                "preditivo/onda/hsmax_ww3_mri_2031_2060.nc"
            }
        }
    }

    /// The hazard this dataset belongs to.
    pub fn hazard(&self) -> HazardKind {
        match self {
            DatasetKey::WindHistorical(_) | DatasetKey::WindFuture(_) => HazardKind::Wind,
            DatasetKey::WaveHistorical(_) | DatasetKey::WaveFuture(_, _) => HazardKind::Wave,
        }
    }

    /// Preferred data-variable spellings for this dataset, in order.
    ///
    /// Wind archives carry a bias-corrected field next to the raw one;
    /// the corrected field wins when present. Wave archives name the
    /// significant height "hs"; anything else falls back to the first
    /// data variable in the file.
    pub fn variable_candidates(&self) -> &'static [&'static str] {
        match self.hazard() {
            HazardKind::Wind => &["sfcWind_corr", "sfcWind"],
            HazardKind::Wave => &["hs"],
        }
    }
}

/// Resolves dataset keys to absolute paths under a configured root.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    base_dir: PathBuf,
}

impl DatasetCatalog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the archive root from `NETCDF_BASE_DIR`, falling back to
    /// `data/netcdf` under the working directory.
    pub fn from_env() -> Self {
        let base = std::env::var("NETCDF_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/netcdf"));
        Self::new(base)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute path of a dataset.
    pub fn path(&self, key: DatasetKey) -> PathBuf {
        self.base_dir.join(key.relative_path())
    }

    /// Route a single-timestamp snapshot to its dataset.
    ///
    /// Years strictly before the cutoff read the historical archive;
    /// years at or after it read the projection. The wave projection
    /// additionally splits at 2031.
    pub fn snapshot_key(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        timestamp: &str,
    ) -> HazardResult<DatasetKey> {
        let year = parse_year(timestamp)?;
        Ok(match hazard {
            HazardKind::Wind => {
                if year < FUTURE_CUTOFF_YEAR {
                    DatasetKey::WindHistorical(stat)
                } else {
                    DatasetKey::WindFuture(stat)
                }
            }
            HazardKind::Wave => {
                if year < FUTURE_CUTOFF_YEAR {
                    DatasetKey::WaveHistorical(stat)
                } else if year < 2031 {
                    DatasetKey::WaveFuture(stat, WaveWindow::Early)
                } else {
                    DatasetKey::WaveFuture(stat, WaveWindow::Late)
                }
            }
        })
    }

    /// The single historical dataset for a hazard and statistic.
    pub fn historical_key(&self, hazard: HazardKind, stat: Statistic) -> DatasetKey {
        match hazard {
            HazardKind::Wind => DatasetKey::WindHistorical(stat),
            HazardKind::Wave => DatasetKey::WaveHistorical(stat),
        }
    }

    /// Future datasets overlapping a requested period.
    ///
    /// Wind has one projection file per statistic. Wave contributes
    /// every window whose coverage overlaps the period (inclusive
    /// bounds); a period spanning both windows reads both, in time
    /// order.
    pub fn future_keys(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        scenario: Scenario,
        period: PeriodRange,
    ) -> Vec<DatasetKey> {
        // One supported pathway; matching keeps the routing total when
        // more scenarios are archived.
        match scenario {
            Scenario::Ssp585 => {}
        }

        match hazard {
            HazardKind::Wind => vec![DatasetKey::WindFuture(stat)],
            HazardKind::Wave => [WaveWindow::Early, WaveWindow::Late]
                .into_iter()
                .filter(|window| {
                    let (start, end) = window.coverage();
                    period.overlaps(start, end)
                })
                .map(|window| DatasetKey::WaveFuture(stat, window))
                .collect(),
        }
    }

    /// Every dataset overlapping a period, across eras.
    ///
    /// Used by generic time-series and statistics queries whose range
    /// may span the era boundary; the resulting series are stitched and
    /// time-sorted by the reader.
    pub fn period_keys(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        scenario: Scenario,
        period: PeriodRange,
    ) -> Vec<DatasetKey> {
        let mut keys = Vec::new();
        if period.start_year < FUTURE_CUTOFF_YEAR {
            keys.push(self.historical_key(hazard, stat));
        }
        if period.end_year >= FUTURE_CUTOFF_YEAR {
            keys.extend(self.future_keys(hazard, stat, scenario, period));
        }
        keys
    }
}
