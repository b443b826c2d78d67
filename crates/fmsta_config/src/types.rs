//! Configuration types deserialized from a run's TOML config file.

use serde::Deserialize;

/// Tunable run-time parameters shared by the FM partitioner and the STA
/// engine, loadable from a TOML config file so experiments don't require
/// recompiling.
///
/// Every field has a documented default, so a caller may omit the config
/// file entirely and get the behavior named by each field's comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Target fraction of total cell weight assigned to partition 0,
    /// expressed as a ratio in `(0.0, 1.0)`. Defaults to an even 0.5 split;
    /// validated to lie strictly inside the open interval.
    pub balance_factor: f64,
    /// Hard cap on the number of FM passes run before giving up even if
    /// the cut is still improving.
    pub max_passes: u32,
    /// Number of consecutive passes with no cut improvement before the
    /// engine gives up early.
    pub max_stagnant_passes: u32,
    /// Parameters of the adaptive gain-bucket threshold schedule.
    pub threshold_schedule: ThresholdSchedule,
    /// Multiplicative margin applied to the clock period when deriving
    /// the required-time boundary condition at primary outputs / register
    /// inputs.
    pub clock_margin: f64,
    /// Input slew assumed at primary inputs that don't specify one,
    /// in picoseconds.
    pub default_input_slew_ps: f64,
    /// Load factor (in multiples of a reference inverter's input
    /// capacitance) assumed at primary outputs that don't specify a sink
    /// load.
    pub default_sink_load_factor: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            balance_factor: 0.5,
            max_passes: 50,
            max_stagnant_passes: 3,
            threshold_schedule: ThresholdSchedule::default(),
            clock_margin: 1.1,
            default_input_slew_ps: 2.0,
            default_sink_load_factor: 4.0,
        }
    }
}

/// Parameters of the FM engine's adaptive gain-bucket threshold schedule:
/// the bucket range starts at `start`, shrinks by `step` each time a pass
/// stagnates, and never drops below `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThresholdSchedule {
    /// Initial threshold value.
    pub start: i64,
    /// Amount subtracted from the threshold on each adjustment.
    pub step: i64,
    /// Minimum value the threshold is allowed to shrink to.
    pub floor: i64,
}

impl Default for ThresholdSchedule {
    fn default() -> Self {
        Self {
            start: 2000,
            step: -100,
            floor: 500,
        }
    }
}
