//! The FM engine: initial partition, per-pass move sequence, and the pass
//! driver.

use crate::balance::BalanceModel;
use crate::bucket::GainBucket;
use crate::error::FmError;
use crate::ids::CellId;
use crate::netlist::Netlist;
use fmsta_common::InternalError;
use fmsta_config::RunConfig;

/// A single applied move within a pass's history.
#[derive(Debug, Clone, Copy)]
struct Move {
    cell: CellId,
    from_partition: u8,
    to_partition: u8,
    gain_used: i64,
    resulting_cut: usize,
}

/// Summary of one completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Whether the pass reduced the cut size relative to its start.
    pub improved: bool,
    /// Cut size at the end of the pass (after any reverts).
    pub final_cut: usize,
    /// Number of moves retained after reverting non-improving moves.
    pub moves_applied: usize,
}

/// Summary of a complete `run()` driver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Cut size before the first pass.
    pub initial_cut: usize,
    /// Cut size after the final pass.
    pub final_cut: usize,
    /// Per-pass reports, in order.
    pub passes: Vec<PassReport>,
}

/// Computes a cell's gain from scratch per I4: the net reduction in cut
/// size that moving it to the other partition would cause.
fn compute_gain(netlist: &Netlist, cell_id: CellId) -> i64 {
    let cell = netlist.cell(cell_id);
    let own = cell.partition as usize;
    let mut gain = 0i64;
    for &net_id in &cell.nets {
        let net = netlist.net(net_id);
        let f = net.partition_count[own];
        let t = net.partition_count[1 - own];
        let before_cut = t > 0;
        let after_cut = f > 1;
        if before_cut && !after_cut {
            gain += 1;
        } else if !before_cut && after_cut {
            gain -= 1;
        }
    }
    gain
}

/// Drives Fiduccia–Mattheyses passes over a netlist to reduce its cut
/// size while keeping both partitions balanced.
pub struct FmEngine<'n> {
    netlist: &'n mut Netlist,
    balance: BalanceModel,
    bucket: GainBucket,
    cut_size: usize,
    partition_sizes: [usize; 2],
    last_pass_moves_retained: usize,
}

impl<'n> FmEngine<'n> {
    /// Builds the engine: assigns a deterministic initial partition
    /// (first `floor(n/2)` cells by id to partition 0, the rest to
    /// partition 1), recomputes every net's partition counts and every
    /// cell's gain from scratch, and seeds the gain bucket.
    pub fn new(netlist: &'n mut Netlist, balance_factor: f64) -> Result<Self, FmError> {
        let n = netlist.cell_count();
        let balance = BalanceModel::new(n, balance_factor)?;

        let half = n / 2;
        let cell_ids: Vec<CellId> = netlist.cells().map(|(id, _)| id).collect();
        for (index, &cell_id) in cell_ids.iter().enumerate() {
            netlist.cell_mut(cell_id).partition = if index < half { 0 } else { 1 };
        }

        let net_ids: Vec<crate::ids::NetId> = netlist.nets().map(|(id, _)| id).collect();
        for net_id in net_ids {
            let cell_ids_on_net = netlist.net(net_id).cells.clone();
            let mut counts = [0u32; 2];
            for cell_id in cell_ids_on_net {
                counts[netlist.cell(cell_id).partition as usize] += 1;
            }
            netlist.net_mut(net_id).partition_count = counts;
        }

        let mut partition_sizes = [0usize; 2];
        for &cell_id in &cell_ids {
            partition_sizes[netlist.cell(cell_id).partition as usize] += 1;
        }

        let mut bucket = GainBucket::new(netlist.max_degree());
        for &cell_id in &cell_ids {
            let gain = compute_gain(netlist, cell_id);
            netlist.cell_mut(cell_id).gain = gain;
            bucket.add(cell_id, netlist.cell(cell_id).partition, gain)?;
        }

        let cut_size = netlist.cut_size();

        Ok(Self {
            netlist,
            balance,
            bucket,
            cut_size,
            partition_sizes,
            last_pass_moves_retained: 0,
        })
    }

    /// Current cut size.
    pub fn cut_size(&self) -> usize {
        self.cut_size
    }

    fn adaptive_threshold(schedule: &fmsta_config::ThresholdSchedule, pass_index: u32) -> i64 {
        let raw = schedule.start + schedule.step * (pass_index as i64 - 1);
        raw.max(schedule.floor)
    }

    fn apply_move(&mut self, cell_id: CellId, gain: i64) -> Move {
        let from_partition = self.netlist.cell(cell_id).partition;
        let to_partition = 1 - from_partition;

        self.bucket.remove(cell_id, from_partition);
        self.netlist.cell_mut(cell_id).partition = to_partition;
        self.netlist.cell_mut(cell_id).locked = true;
        self.partition_sizes[from_partition as usize] -= 1;
        self.partition_sizes[to_partition as usize] += 1;

        let nets = self.netlist.cell(cell_id).nets.clone();
        for net_id in &nets {
            let net = self.netlist.net_mut(*net_id);
            net.partition_count[from_partition as usize] -= 1;
            net.partition_count[to_partition as usize] += 1;
        }

        self.cut_size = (self.cut_size as i64 - gain) as usize;

        for net_id in &nets {
            let neighbor_ids = self.netlist.net(*net_id).cells.clone();
            for neighbor_id in neighbor_ids {
                if neighbor_id == cell_id {
                    continue;
                }
                if self.netlist.cell(neighbor_id).locked {
                    continue;
                }
                let new_gain = compute_gain(self.netlist, neighbor_id);
                if new_gain != self.netlist.cell(neighbor_id).gain {
                    self.netlist.cell_mut(neighbor_id).gain = new_gain;
                    let neighbor_partition = self.netlist.cell(neighbor_id).partition;
                    self.bucket
                        .update_gain(neighbor_id, neighbor_partition, new_gain)
                        .expect("neighbor must already hold a bucket handle");
                }
            }
        }

        Move {
            cell: cell_id,
            from_partition,
            to_partition,
            gain_used: gain,
            resulting_cut: self.cut_size,
        }
    }

    fn undo_move(&mut self, mv: &Move) {
        self.netlist.cell_mut(mv.cell).partition = mv.from_partition;
        self.netlist.cell_mut(mv.cell).locked = false;
        self.partition_sizes[mv.to_partition as usize] -= 1;
        self.partition_sizes[mv.from_partition as usize] += 1;

        let nets = self.netlist.cell(mv.cell).nets.clone();
        for net_id in &nets {
            let net = self.netlist.net_mut(*net_id);
            net.partition_count[mv.to_partition as usize] -= 1;
            net.partition_count[mv.from_partition as usize] += 1;
        }

        self.cut_size += mv.gain_used as usize;

        let gain = compute_gain(self.netlist, mv.cell);
        self.netlist.cell_mut(mv.cell).gain = gain;
        self.bucket
            .add(mv.cell, mv.from_partition, gain)
            .expect("cell must not already hold a bucket handle after undo");

        for net_id in &nets {
            let neighbor_ids = self.netlist.net(*net_id).cells.clone();
            for neighbor_id in neighbor_ids {
                if neighbor_id == mv.cell {
                    continue;
                }
                if self.netlist.cell(neighbor_id).locked {
                    continue;
                }
                let new_gain = compute_gain(self.netlist, neighbor_id);
                if new_gain != self.netlist.cell(neighbor_id).gain {
                    self.netlist.cell_mut(neighbor_id).gain = new_gain;
                    let neighbor_partition = self.netlist.cell(neighbor_id).partition;
                    self.bucket
                        .update_gain(neighbor_id, neighbor_partition, new_gain)
                        .expect("neighbor must already hold a bucket handle");
                }
            }
        }
    }

    /// Runs a single FM pass: moves cells greedily by gain, tracks the
    /// best cut seen, then reverts back to that point.
    ///
    /// Returns `true` if the pass reduced the cut size.
    pub fn run_pass(
        &mut self,
        config: &RunConfig,
        pass_index: u32,
    ) -> Result<bool, InternalError> {
        let initial_cut = self.cut_size;
        let n = self.netlist.cell_count();

        let mut history: Vec<Move> = Vec::new();
        let mut best_cut = initial_cut;
        let mut best_index: Option<usize> = None;
        let mut stagnation: u32 = 0;
        let threshold = Self::adaptive_threshold(&config.threshold_schedule, pass_index);

        for _ in 0..n {
            let balance = self.balance;
            let partition_sizes = self.partition_sizes;
            let picked = self.bucket.pick_best_feasible(|cell_id, partition| {
                let other = 1 - partition;
                let hypothetical = {
                    let mut sizes = partition_sizes;
                    sizes[partition as usize] -= 1;
                    sizes[other as usize] += 1;
                    sizes
                };
                balance.is_balanced(hypothetical[0], hypothetical[1])
            });

            let Some((cell_id, partition, gain)) = picked else {
                break;
            };

            if self.netlist.cell(cell_id).locked {
                return Err(InternalError::new(format!(
                    "pickBestFeasible returned already-locked cell {cell_id:?} (I5 violation)"
                )));
            }
            debug_assert_eq!(self.netlist.cell(cell_id).partition, partition);

            let mv = self.apply_move(cell_id, gain);
            history.push(mv);

            if mv.resulting_cut < best_cut {
                best_cut = mv.resulting_cut;
                best_index = Some(history.len() - 1);
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            if stagnation >= threshold as u32 {
                break;
            }
        }

        let keep = best_index.map_or(0, |i| i + 1);
        self.last_pass_moves_retained = keep;
        for mv in history[keep..].iter().rev() {
            self.undo_move(mv);
        }

        for (cell_id, cell) in self.netlist.cells().map(|(id, c)| (id, c.clone())).collect::<Vec<_>>() {
            if cell.locked {
                self.netlist.cell_mut(cell_id).locked = false;
                let gain = compute_gain(self.netlist, cell_id);
                self.netlist.cell_mut(cell_id).gain = gain;
                let partition = self.netlist.cell(cell_id).partition;
                self.bucket.add(cell_id, partition, gain).expect(
                    "newly-unlocked cell must not already hold a bucket handle",
                );
            }
        }

        let recomputed = self.netlist.cut_size();
        if recomputed != best_cut {
            return Err(InternalError::new(format!(
                "cut size drift detected at end of pass: tracked {best_cut}, recomputed {recomputed} (I2 violation)"
            )));
        }
        self.cut_size = recomputed;

        Ok(best_cut < initial_cut)
    }

    /// Repeats passes until a pass fails to improve, three consecutive
    /// passes fail to improve, or `config.max_passes` is reached.
    pub fn run(&mut self, config: &RunConfig) -> Result<RunReport, InternalError> {
        let initial_cut = self.cut_size;
        let mut passes = Vec::new();
        let mut stagnant_passes = 0u32;

        for pass_index in 1..=config.max_passes {
            let improved = self.run_pass(config, pass_index)?;
            passes.push(PassReport {
                improved,
                final_cut: self.cut_size,
                moves_applied: self.last_pass_moves_retained,
            });

            if improved {
                stagnant_passes = 0;
            } else {
                stagnant_passes += 1;
            }

            if stagnant_passes >= config.max_stagnant_passes {
                break;
            }
        }

        Ok(RunReport {
            initial_cut,
            final_cut: self.cut_size,
            passes,
        })
    }

    /// Returns the final partition assignment as `(cell name, partition)`
    /// pairs in cell id order.
    pub fn assignment(&self) -> Vec<(String, u8)> {
        self.netlist
            .cells()
            .map(|(_, c)| (c.name.clone(), c.partition))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::{NetInput, PartitionInput};

    fn chain_netlist(n: usize) -> Netlist {
        let nets = (0..n.saturating_sub(1))
            .map(|i| NetInput {
                name: format!("n{i}"),
                cells: vec![format!("c{i}"), format!("c{}", i + 1)],
            })
            .collect();
        let input = PartitionInput {
            balance_factor: 0.5,
            nets,
        };
        Netlist::from_input(&input).unwrap()
    }

    #[test]
    fn initial_partition_splits_in_half() {
        let mut netlist = chain_netlist(8);
        let engine = FmEngine::new(&mut netlist, 0.5).unwrap();
        assert_eq!(engine.partition_sizes, [4, 4]);
    }

    #[test]
    fn initial_gain_matches_i4() {
        let mut netlist = chain_netlist(4);
        let engine = FmEngine::new(&mut netlist, 1.0).unwrap();
        // chain c0-c1-c2-c3, partition [c0,c1 | c2,c3]; only net n1 (c1-c2) is cut.
        assert_eq!(engine.cut_size(), 1);
    }

    #[test]
    fn run_pass_does_not_worsen_balance() {
        let mut netlist = chain_netlist(10);
        let mut engine = FmEngine::new(&mut netlist, 0.2).unwrap();
        let config = RunConfig::default();
        let _ = engine.run_pass(&config, 1).unwrap();
        assert!(engine
            .balance
            .is_balanced(engine.partition_sizes[0], engine.partition_sizes[1]));
    }

    #[test]
    fn run_pass_recomputed_cut_matches_tracked() {
        let mut netlist = chain_netlist(12);
        let mut engine = FmEngine::new(&mut netlist, 0.3).unwrap();
        let config = RunConfig::default();
        engine.run_pass(&config, 1).unwrap();
        assert_eq!(engine.cut_size(), engine.netlist.cut_size());
    }

    #[test]
    fn run_reduces_or_maintains_cut() {
        let mut netlist = chain_netlist(20);
        let mut engine = FmEngine::new(&mut netlist, 0.25).unwrap();
        let config = RunConfig::default();
        let report = engine.run(&config).unwrap();
        assert!(report.final_cut <= report.initial_cut);
    }

    #[test]
    fn run_terminates_within_max_passes() {
        let mut netlist = chain_netlist(16);
        let mut engine = FmEngine::new(&mut netlist, 0.2).unwrap();
        let mut config = RunConfig::default();
        config.max_passes = 5;
        let report = engine.run(&config).unwrap();
        assert!(report.passes.len() <= 5);
    }

    #[test]
    fn all_cells_unlocked_after_pass() {
        let mut netlist = chain_netlist(10);
        let mut engine = FmEngine::new(&mut netlist, 0.3).unwrap();
        let config = RunConfig::default();
        engine.run_pass(&config, 1).unwrap();
        for (_, cell) in engine.netlist.cells() {
            assert!(!cell.locked);
        }
    }

    #[test]
    fn adaptive_threshold_schedule() {
        let sched = fmsta_config::ThresholdSchedule {
            start: 2000,
            step: -100,
            floor: 500,
        };
        assert_eq!(FmEngine::adaptive_threshold(&sched, 1), 2000);
        assert_eq!(FmEngine::adaptive_threshold(&sched, 2), 1900);
        assert_eq!(FmEngine::adaptive_threshold(&sched, 20), 200i64.max(500));
        assert_eq!(FmEngine::adaptive_threshold(&sched, 100), 500);
    }

    #[test]
    fn assignment_covers_every_cell() {
        let mut netlist = chain_netlist(6);
        let engine = FmEngine::new(&mut netlist, 0.5).unwrap();
        let assignment = engine.assignment();
        assert_eq!(assignment.len(), 6);
    }
}
