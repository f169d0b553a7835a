//! Last-known-authoritative mirrors of simulator state.
//!
//! `replace` is the only mutator. It accepts whatever the simulator returned
//! and overwrites one slice wholesale; nothing here merges with prior
//! contents or validates the payload.
//!
//! The RAM and swap residency lists are fetched independently and are
//! trusted to be disjoint. No reconciliation happens client-side.

use crate::model::{BlockId, FrameTable, MemoryBlock, Process, ReplacementSummary, StatsSnapshot};

/// Names one slice of the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slice {
    MemoryBlocks,
    Processes,
    RamResidents,
    SwapResidents,
    ResidencyFault,
    Stats,
    PageFrames,
    Replacement,
}

/// A complete new value for one slice.
#[derive(Clone, Debug)]
pub enum SliceUpdate {
    MemoryBlocks(Vec<MemoryBlock>),
    Processes(Vec<Process>),
    RamResidents(Vec<String>),
    SwapResidents(Vec<String>),
    /// `Some` while the last residency fetch failed.
    ResidencyFault(Option<String>),
    Stats(StatsSnapshot),
    PageFrames(FrameTable),
    Replacement(ReplacementSummary),
}

impl SliceUpdate {
    pub fn slice(&self) -> Slice {
        match self {
            SliceUpdate::MemoryBlocks(_) => Slice::MemoryBlocks,
            SliceUpdate::Processes(_) => Slice::Processes,
            SliceUpdate::RamResidents(_) => Slice::RamResidents,
            SliceUpdate::SwapResidents(_) => Slice::SwapResidents,
            SliceUpdate::ResidencyFault(_) => Slice::ResidencyFault,
            SliceUpdate::Stats(_) => Slice::Stats,
            SliceUpdate::PageFrames(_) => Slice::PageFrames,
            SliceUpdate::Replacement(_) => Slice::Replacement,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    memory_blocks: Vec<MemoryBlock>,
    processes: Vec<Process>,
    ram_residents: Vec<String>,
    swap_residents: Vec<String>,
    residency_fault: Option<String>,
    stats: StatsSnapshot,
    page_frames: FrameTable,
    replacement: Option<ReplacementSummary>,
}

impl Store {
    /// Empty collections and a seeded page-frame table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite one slice; returns which slice changed.
    pub fn replace(&mut self, update: SliceUpdate) -> Slice {
        let slice = update.slice();
        match update {
            SliceUpdate::MemoryBlocks(v) => self.memory_blocks = v,
            SliceUpdate::Processes(v) => self.processes = v,
            SliceUpdate::RamResidents(v) => self.ram_residents = v,
            SliceUpdate::SwapResidents(v) => self.swap_residents = v,
            SliceUpdate::ResidencyFault(v) => self.residency_fault = v,
            SliceUpdate::Stats(v) => self.stats = v,
            SliceUpdate::PageFrames(v) => self.page_frames = v,
            SliceUpdate::Replacement(v) => self.replacement = Some(v),
        }
        slice
    }

    pub fn memory_blocks(&self) -> &[MemoryBlock] {
        &self.memory_blocks
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn ram_residents(&self) -> &[String] {
        &self.ram_residents
    }

    pub fn swap_residents(&self) -> &[String] {
        &self.swap_residents
    }

    pub fn residency_fault(&self) -> Option<&str> {
        self.residency_fault.as_deref()
    }

    pub fn stats(&self) -> &StatsSnapshot {
        &self.stats
    }

    pub fn page_frames(&self) -> &FrameTable {
        &self.page_frames
    }

    pub fn replacement(&self) -> Option<&ReplacementSummary> {
        self.replacement.as_ref()
    }

    pub fn allocated_block_ids(&self) -> Vec<BlockId> {
        self.memory_blocks
            .iter()
            .filter(|b| b.is_allocated())
            .map(|b| b.id)
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
