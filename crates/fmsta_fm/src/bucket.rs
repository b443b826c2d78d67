//! Bucketed gain data structure: O(1) insert/remove/update and
//! downward-scanning max-gain lookup.

use crate::error::FmError;
use crate::ids::{BucketNodeId, CellId};
use fmsta_common::SlotArena;

/// A single doubly linked node in a gain-bucket slot list.
#[derive(Debug, Clone, Copy)]
struct Node {
    cell: CellId,
    gain: i64,
    prev: Option<BucketNodeId>,
    next: Option<BucketNodeId>,
}

/// One partition's bank: a slot array of doubly linked lists indexed by
/// `gain + max_degree`, plus a lazily-decremented running maximum.
#[derive(Debug, Clone)]
struct Bank {
    /// `slot_heads[i]` is the head of the list for gain `i as i64 - max_degree`.
    slot_heads: Vec<Option<BucketNodeId>>,
    max_degree: i64,
    /// Current maximum non-empty slot, expressed as a gain value. `None`
    /// when the bank is empty.
    max_gain: Option<i64>,
}

impl Bank {
    fn new(max_degree: i64) -> Self {
        let slot_count = (2 * max_degree + 1).max(1) as usize;
        Self {
            slot_heads: vec![None; slot_count],
            max_degree,
            max_gain: None,
        }
    }

    fn slot_index(&self, gain: i64) -> usize {
        (gain + self.max_degree) as usize
    }
}

/// A bucketed gain data structure with one bank per partition.
///
/// Answers "give me an unlocked cell of highest gain whose move keeps the
/// partition balanced" in time proportional to the number of buckets
/// scanned downward from the current maximum.
#[derive(Debug, Clone)]
pub struct GainBucket {
    nodes: SlotArena<BucketNodeId, Node>,
    banks: [Bank; 2],
    handles: std::collections::HashMap<CellId, BucketNodeId>,
}

impl GainBucket {
    /// Creates an empty bucket sized for the given maximum cell degree.
    pub fn new(max_degree: usize) -> Self {
        let max_degree = max_degree as i64;
        Self {
            nodes: SlotArena::new(),
            banks: [Bank::new(max_degree), Bank::new(max_degree)],
            handles: std::collections::HashMap::new(),
        }
    }

    /// Inserts `cell` (with its current partition and gain) at the head of
    /// its bank's slot.
    ///
    /// Fails with [`FmError::DuplicateInsert`] if the cell already has a
    /// bucket handle.
    pub fn add(&mut self, cell: CellId, partition: u8, gain: i64) -> Result<(), FmError> {
        if self.handles.contains_key(&cell) {
            return Err(FmError::DuplicateInsert(cell));
        }
        let bank = &mut self.banks[partition as usize];
        let slot = bank.slot_index(gain);
        let old_head = bank.slot_heads[slot];
        let node_id = self.nodes.alloc(Node {
            cell,
            gain,
            prev: None,
            next: old_head,
        });
        if let Some(head) = old_head {
            self.nodes.get_mut(head).unwrap().prev = Some(node_id);
        }
        bank.slot_heads[slot] = Some(node_id);
        bank.max_gain = Some(bank.max_gain.map_or(gain, |m| m.max(gain)));
        self.handles.insert(cell, node_id);
        Ok(())
    }

    /// Unlinks `cell` from its bank and frees its bucket node.
    ///
    /// No-op if the cell has no current bucket handle.
    pub fn remove(&mut self, cell: CellId, partition: u8) {
        let Some(node_id) = self.handles.remove(&cell) else {
            return;
        };
        let node = self.nodes.remove(node_id);
        let bank = &mut self.banks[partition as usize];
        let slot = bank.slot_index(node.gain);

        match node.prev {
            Some(prev_id) => self.nodes.get_mut(prev_id).unwrap().next = node.next,
            None => bank.slot_heads[slot] = node.next,
        }
        if let Some(next_id) = node.next {
            self.nodes.get_mut(next_id).unwrap().prev = node.prev;
        }

        if bank.max_gain == Some(node.gain) && bank.slot_heads[slot].is_none() {
            Self::rescan_max(bank);
        }
    }

    fn rescan_max(bank: &mut Bank) {
        let mut gain = bank.max_gain.unwrap_or(bank.max_degree);
        loop {
            let slot = bank.slot_index(gain);
            if bank.slot_heads[slot].is_some() {
                bank.max_gain = Some(gain);
                return;
            }
            if gain <= -bank.max_degree {
                bank.max_gain = None;
                return;
            }
            gain -= 1;
        }
    }

    /// Equivalent to `remove` then `add` with the new gain, atomic from
    /// the caller's perspective.
    pub fn update_gain(
        &mut self,
        cell: CellId,
        partition: u8,
        new_gain: i64,
    ) -> Result<(), FmError> {
        self.remove(cell, partition);
        self.add(cell, partition, new_gain)
    }

    /// `true` iff `cell` currently has a bucket handle.
    pub fn contains(&self, cell: CellId) -> bool {
        self.handles.contains_key(&cell)
    }

    /// Scans both banks from their current maxima downward and returns the
    /// highest-gain cell whose move to the other partition satisfies
    /// `is_feasible`.
    ///
    /// Ties between partitions favor the strictly higher gain; an exact
    /// tie favors partition 0.
    pub fn pick_best_feasible(
        &self,
        mut is_feasible: impl FnMut(CellId, u8) -> bool,
    ) -> Option<(CellId, u8, i64)> {
        let mut best: Option<(CellId, u8, i64)> = None;
        for partition in 0..2u8 {
            if let Some((cell, gain)) = self.scan_bank(partition, &mut is_feasible) {
                let better = match best {
                    None => true,
                    Some((_, _, best_gain)) => gain > best_gain,
                };
                if better {
                    best = Some((cell, partition, gain));
                }
            }
        }
        best
    }

    fn scan_bank(
        &self,
        partition: u8,
        is_feasible: &mut impl FnMut(CellId, u8) -> bool,
    ) -> Option<(CellId, i64)> {
        let bank = &self.banks[partition as usize];
        let mut gain = bank.max_gain?;
        loop {
            let slot = bank.slot_index(gain);
            let mut cursor = bank.slot_heads[slot];
            while let Some(node_id) = cursor {
                let node = self.nodes.get(node_id).expect("bucket node vanished");
                if is_feasible(node.cell, partition) {
                    return Some((node.cell, gain));
                }
                cursor = node.next;
            }
            if gain <= -bank.max_degree {
                return None;
            }
            gain -= 1;
        }
    }
}
