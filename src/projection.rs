//! Pure mapping from store contents to renderable structures.
//!
//! Nothing here suspends or performs I/O; [`Views::refresh`] runs in the same
//! critical section as the store replace that triggered it.

use crate::dispatch::Trigger;
use crate::model::{FrameTable, MemoryBlock, PageSlot, Process, ReplacementSummary, StatsSnapshot};
use crate::store::{Slice, Store};

/// Shown when a replacement result does not carry its own reference string.
pub const DEFAULT_REFERENCE_STRING: &str =
    "7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1";

pub const NO_MEMORY_BLOCKS: &str = "No memory blocks loaded";
pub const NO_PROCESSES: &str = "No processes created yet.";
pub const NO_RAM_PROCESSES: &str = "No processes in RAM";
pub const NO_SWAP_PROCESSES: &str = "No processes in swap space";

/// A list view, or the "no data" indicator that replaces it.
#[derive(Clone, Debug, PartialEq)]
pub enum Listing<T> {
    Placeholder(&'static str),
    Rows(Vec<T>),
}

impl<T> Listing<T> {
    fn from_rows(rows: Vec<T>, placeholder: &'static str) -> Self {
        if rows.is_empty() {
            Listing::Placeholder(placeholder)
        } else {
            Listing::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Listing::Placeholder(_) => &[],
            Listing::Rows(rows) => rows,
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Listing::Placeholder(p) => Some(*p),
            Listing::Rows(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockCell {
    pub id: i64,
    pub free: bool,
    pub title: String,
    /// Only allocated blocks can be clicked to deallocate.
    pub on_select: Option<Trigger>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRow {
    pub heading: String,
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Residence {
    Ram,
    Swap,
}

impl Residence {
    pub fn badge(self) -> &'static str {
        match self {
            Residence::Ram => "IN RAM",
            Residence::Swap => "IN SWAP",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResidencyPanel {
    Ids {
        residence: Residence,
        ids: Vec<String>,
    },
    Placeholder(&'static str),
    /// The last residency fetch failed.
    Unavailable(String),
}

impl ResidencyPanel {
    /// One display line per resident process, or the single indicator line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ResidencyPanel::Ids { residence, ids } => ids
                .iter()
                .map(|id| format!("Process {}  [{}]", id, residence.badge()))
                .collect(),
            ResidencyPanel::Placeholder(text) => vec![text.to_string()],
            ResidencyPanel::Unavailable(text) => vec![text.clone()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub value: String,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub text: String,
    pub occupied: bool,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmPanel {
    pub heading: String,
    pub page_faults: String,
    pub page_hits: String,
    pub hit_ratio: String,
    pub reference_string: String,
}

/// Everything the UI draws, derived from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Views {
    pub memory: Listing<BlockCell>,
    pub processes: Listing<ProcessRow>,
    pub ram: ResidencyPanel,
    pub swap: ResidencyPanel,
    pub stats: Vec<StatCard>,
    pub frames: Vec<FrameCell>,
    pub algorithm: Option<AlgorithmPanel>,
}

impl Views {
    pub fn project(store: &Store) -> Self {
        Self {
            memory: project_memory(store.memory_blocks()),
            processes: project_processes(store.processes()),
            ram: project_residency(store, Residence::Ram),
            swap: project_residency(store, Residence::Swap),
            stats: project_stats(store.stats()),
            frames: project_frames(store.page_frames()),
            algorithm: store.replacement().map(project_algorithm),
        }
    }

    /// Recompute only the views that depend on `slice`.
    pub fn refresh(&mut self, slice: Slice, store: &Store) {
        match slice {
            Slice::MemoryBlocks => self.memory = project_memory(store.memory_blocks()),
            Slice::Processes => self.processes = project_processes(store.processes()),
            Slice::RamResidents | Slice::SwapResidents | Slice::ResidencyFault => {
                self.ram = project_residency(store, Residence::Ram);
                self.swap = project_residency(store, Residence::Swap);
            }
            Slice::Stats => self.stats = project_stats(store.stats()),
            Slice::PageFrames => self.frames = project_frames(store.page_frames()),
            Slice::Replacement => self.algorithm = store.replacement().map(project_algorithm),
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::project(&Store::new())
    }
}

pub fn project_memory(blocks: &[MemoryBlock]) -> Listing<BlockCell> {
    let cells = blocks
        .iter()
        .map(|b| BlockCell {
            id: b.id,
            free: b.free,
            title: format!(
                "Block {}: {} (Size: {})",
                b.id,
                if b.free { "Free" } else { "Allocated" },
                b.size()
            ),
            on_select: b.is_allocated().then_some(Trigger::Deallocate(b.id)),
        })
        .collect();
    Listing::from_rows(cells, NO_MEMORY_BLOCKS)
}

pub fn project_processes(processes: &[Process]) -> Listing<ProcessRow> {
    let rows = processes
        .iter()
        .map(|p| ProcessRow {
            heading: format!("{} (ID: {})", p.name, p.id),
            detail: format!(
                "Size: {} | Status: {} | Priority: {}",
                p.size,
                p.status_label(),
                p.priority_label()
            ),
        })
        .collect();
    Listing::from_rows(rows, NO_PROCESSES)
}

pub fn project_residency(store: &Store, residence: Residence) -> ResidencyPanel {
    if let Some(fault) = store.residency_fault() {
        return ResidencyPanel::Unavailable(fault.to_string());
    }
    let (ids, placeholder) = match residence {
        Residence::Ram => (store.ram_residents(), NO_RAM_PROCESSES),
        Residence::Swap => (store.swap_residents(), NO_SWAP_PROCESSES),
    };
    if ids.is_empty() {
        ResidencyPanel::Placeholder(placeholder)
    } else {
        ResidencyPanel::Ids {
            residence,
            ids: ids.to_vec(),
        }
    }
}

fn percent(v: f64) -> String {
    format!("{}%", v)
}

pub fn project_stats(stats: &StatsSnapshot) -> Vec<StatCard> {
    vec![
        StatCard {
            value: stats.allocated_blocks.to_string(),
            label: "Allocated Blocks",
        },
        StatCard {
            value: stats.free_blocks.to_string(),
            label: "Free Blocks",
        },
        StatCard {
            value: percent(stats.utilization_percentage),
            label: "Memory Usage",
        },
        StatCard {
            value: percent(stats.success_rate),
            label: "Success Rate",
        },
        StatCard {
            value: stats.active_processes.to_string(),
            label: "Active Processes",
        },
        StatCard {
            value: stats.gc_collections.to_string(),
            label: "GC Collections",
        },
    ]
}

pub fn project_frames(table: &FrameTable) -> Vec<FrameCell> {
    table
        .frames()
        .iter()
        .map(|f| FrameCell {
            text: f.page_number.to_string(),
            occupied: f.occupied,
            title: match (f.occupied, f.page_number) {
                (true, PageSlot::Page(n)) => format!("Frame {}: Page {}", f.frame_id, n),
                _ => format!("Frame {}: Empty", f.frame_id),
            },
        })
        .collect()
}

pub fn project_algorithm(summary: &ReplacementSummary) -> AlgorithmPanel {
    AlgorithmPanel {
        heading: format!("Algorithm: {}", summary.algorithm.to_uppercase()),
        page_faults: summary.page_faults.to_string(),
        page_hits: summary.page_hits.to_string(),
        hit_ratio: percent(summary.hit_ratio),
        reference_string: summary
            .reference_string
            .clone()
            .unwrap_or_else(|| DEFAULT_REFERENCE_STRING.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/projection_tests.rs"]
mod tests;
