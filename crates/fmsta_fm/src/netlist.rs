//! The FM view of a netlist: an undirected bipartite cell/net graph.

use crate::error::FmError;
use crate::ids::{CellId, NetId};
use fmsta_common::Arena;
use serde::{Deserialize, Serialize};

/// A cell (movable vertex) in the FM hypergraph.
///
/// The bucket handle is a non-owning reference into a
/// [`crate::bucket::GainBucket`]; ownership of the linked-list node lives
/// in the bucket itself, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Human-readable name.
    pub name: String,
    /// Current partition assignment, either `0` or `1`.
    pub partition: u8,
    /// Current gain, bounded in magnitude by the cell's degree.
    pub gain: i64,
    /// Set when the cell has been moved during the current pass.
    pub locked: bool,
    /// Handle into the gain bucket, or `None` if the cell is locked or has
    /// not yet been seeded.
    pub bucket_node: Option<crate::ids::BucketNodeId>,
    /// Incident nets, duplicate-free.
    pub nets: Vec<NetId>,
}

impl Cell {
    fn new(name: String) -> Self {
        Self {
            name,
            partition: 0,
            gain: 0,
            locked: false,
            bucket_node: None,
            nets: Vec::new(),
        }
    }
}

/// A net (hyperedge) in the FM hypergraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// Human-readable name.
    pub name: String,
    /// Incident cells, duplicate-free.
    pub cells: Vec<CellId>,
    /// Per-partition cell counts, maintained incrementally (I1).
    pub partition_count: [u32; 2],
}

impl Net {
    fn new(name: String) -> Self {
        Self {
            name,
            cells: Vec::new(),
            partition_count: [0, 0],
        }
    }

    /// A net is cut iff both partitions have at least one cell on it.
    pub fn is_cut(&self) -> bool {
        self.partition_count[0] > 0 && self.partition_count[1] > 0
    }
}

/// The full FM netlist: cells and nets stored in dense, ID-indexed arenas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Netlist {
    cells: Arena<CellId, Cell>,
    nets: Arena<NetId, Net>,
}

/// JSON-deserializable description of a netlist to partition.
///
/// Mirrors the textual grammar's `NET <name> <cell_name>+ ;` statements:
/// cells are not declared up front, a cell comes into existence the first
/// time a net mentions its name.
#[derive(Debug, Clone, Deserialize)]
pub struct PartitionInput {
    /// Target fraction of total cell weight assigned to partition 0, a
    /// decimal in `[0, 1]`.
    pub balance_factor: f64,
    /// Nets, each given as the list of incident cell names.
    pub nets: Vec<NetInput>,
}

/// A single net in a [`PartitionInput`].
#[derive(Debug, Clone, Deserialize)]
pub struct NetInput {
    /// The net's name.
    pub name: String,
    /// Names of cells incident to this net.
    pub cells: Vec<String>,
}

impl Netlist {
    /// Builds a netlist from a [`PartitionInput`].
    ///
    /// Cell and net names are case-normalized to upper-case, matching the
    /// textual grammar's `NET <name> <cell_name>+ ;` statements. A cell
    /// name that repeats within a single net is silently deduplicated
    /// rather than counted twice on that net.
    pub fn from_input(input: &PartitionInput) -> Result<Netlist, FmError> {
        let mut cells: Arena<CellId, Cell> = Arena::new();
        let mut name_to_id: std::collections::HashMap<String, CellId> =
            std::collections::HashMap::new();

        let mut nets: Arena<NetId, Net> = Arena::new();
        for net_input in &input.nets {
            if net_input.cells.is_empty() {
                return Err(FmError::InputMalformed(format!(
                    "net '{}' has no incident cells",
                    net_input.name
                )));
            }
            let net_id = nets.alloc(Net::new(net_input.name.to_ascii_uppercase()));
            let mut seen = std::collections::HashSet::new();
            for cell_name in &net_input.cells {
                let upper = cell_name.to_ascii_uppercase();
                let cell_id = *name_to_id
                    .entry(upper.clone())
                    .or_insert_with(|| cells.alloc(Cell::new(upper)));
                if !seen.insert(cell_id) {
                    continue;
                }
                nets.get_mut(net_id).cells.push(cell_id);
                cells.get_mut(cell_id).nets.push(net_id);
            }
        }

        Ok(Netlist { cells, nets })
    }

    /// Number of cells in the netlist.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of nets in the netlist.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Maximum degree (incident net count) over all cells; zero for an
    /// empty netlist.
    pub fn max_degree(&self) -> usize {
        self.cells.values().map(|c| c.nets.len()).max().unwrap_or(0)
    }

    /// Iterates over `(CellId, &Cell)` pairs in id order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter()
    }

    /// Iterates over `(NetId, &Net)` pairs in id order.
    pub fn nets(&self) -> impl Iterator<Item = (NetId, &Net)> {
        self.nets.iter()
    }

    /// Returns a reference to a cell.
    pub fn cell(&self, id: CellId) -> &Cell {
        self.cells.get(id)
    }

    /// Returns a mutable reference to a cell.
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        self.cells.get_mut(id)
    }

    /// Returns a reference to a net.
    pub fn net(&self, id: NetId) -> &Net {
        self.nets.get(id)
    }

    /// Returns a mutable reference to a net.
    pub fn net_mut(&mut self, id: NetId) -> &mut Net {
        self.nets.get_mut(id)
    }

    /// Current size of partition `p`.
    pub fn partition_size(&self, p: u8) -> usize {
        self.cells.values().filter(|c| c.partition == p).count()
    }

    /// Current cut size: the number of nets with cells on both
    /// partitions (I2).
    pub fn cut_size(&self) -> usize {
        self.nets.values().filter(|n| n.is_cut()).count()
    }
}
