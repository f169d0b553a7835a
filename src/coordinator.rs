//! Gates and sequences every state-changing call to the simulator.
//!
//! All mutating operations share one process-wide gate: a semaphore with a
//! single permit. A command that finds the gate held is dropped (not queued).
//! The permit is an RAII guard, so it is released on every exit path; a round
//! trip that never resolves holds it until the client's request timeout
//! fires.
//!
//! Each operation follows the same protocol: validate locally, take the gate,
//! perform the round trip, check the transport outcome, check the domain
//! outcome, then replace the affected store slices, refresh their views and
//! log, all under one session lock.

use std::sync::Arc;

use rand::SeedableRng;
use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use tokio::sync::{Semaphore, SemaphorePermit, TryAcquireError};

use crate::error::{CommandError, CommandResult, Outcome};
use crate::model::{BlockId, FrameTable, ReplacementSummary};
use crate::remote::{
    BlocksResponse, GarbageCollectResponse, ProcessesResponse, ReferenceString,
    ReplacementResponse, RequestError, SimulatorClient,
};
use crate::session::{self, Session, Severity, SharedSession};
use crate::store::SliceUpdate;

/// Prefix the simulator puts on failed swap confirmations.
const SWAP_FAILURE_MARKER: char = '❌';

/// Shown in both residency lists while they cannot be fetched.
pub const RESIDENCY_UNAVAILABLE: &str = "Backend connection failed";

/// How an operation reports its outcome to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Activity log entry only.
    Passive,
    /// Activity log entry plus a notice the user must dismiss.
    Blocking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Allocate,
    Deallocate,
    DeallocateRandom,
    Reset,
    CreateProcess,
    SwapOut,
    SwapIn,
    PageReplacement,
    GarbageCollect,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Allocate => "Allocation",
            Operation::Deallocate => "Block deallocation",
            Operation::DeallocateRandom => "Deallocation",
            Operation::Reset => "Reset",
            Operation::CreateProcess => "Process creation",
            Operation::SwapOut => "Swap out",
            Operation::SwapIn => "Swap in",
            Operation::PageReplacement => "Page replacement",
            Operation::GarbageCollect => "Garbage collection",
        }
    }

    pub fn notification(self) -> Notification {
        match self {
            Operation::SwapOut | Operation::SwapIn => Notification::Blocking,
            _ => Notification::Passive,
        }
    }
}

#[derive(Clone)]
pub struct Coordinator {
    client: SimulatorClient,
    session: SharedSession,
    gate: Arc<Semaphore>,
}

impl Coordinator {
    pub fn new(client: SimulatorClient, session: SharedSession) -> Self {
        Self {
            client,
            session,
            gate: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn client(&self) -> &SimulatorClient {
        &self.client
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// True while a mutating operation (or initialization) holds the gate.
    pub fn is_busy(&self) -> bool {
        self.gate.available_permits() == 0
    }

    pub(crate) fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut session::lock(&self.session))
    }

    fn try_enter(&self) -> Option<SemaphorePermit<'_>> {
        match self.gate.try_acquire() {
            Ok(permit) => Some(permit),
            Err(TryAcquireError::NoPermits) => {
                tracing::debug!("gate held; command dropped");
                None
            }
            Err(TryAcquireError::Closed) => None,
        }
    }

    /// Record a local validation failure. No round trip happens.
    pub(crate) fn reject(&self, op: Operation, message: impl Into<String>) -> CommandResult {
        let message = message.into();
        self.with_session(|s| {
            s.warn(message.clone());
            if op.notification() == Notification::Blocking {
                s.notify(Severity::Error, message.clone());
            }
        });
        Err(CommandError::InvalidInput(message))
    }

    /// Log a failed round trip and pass the result through.
    fn conclude(&self, op: Operation, result: CommandResult) -> CommandResult {
        if let Err(err) = &result {
            let line = format!("{} failed ({}): {}", op.label(), err.kind(), err);
            self.with_session(|s| {
                s.error(line);
                if op.notification() == Notification::Blocking {
                    let notice = match err {
                        CommandError::RequestFailed(e) => {
                            format!("{} Backend connection failed: {}", SWAP_FAILURE_MARKER, e)
                        }
                        other => other.to_string(),
                    };
                    s.notify(Severity::Error, notice);
                }
            });
        }
        result
    }

    pub async fn allocate(&self, size: u64, algorithm: &str) -> CommandResult {
        let op = Operation::Allocate;
        if size == 0 {
            return self.reject(op, "Allocation size must be a positive number");
        }
        let algorithm = algorithm.trim();
        if algorithm.is_empty() {
            return self.reject(op, "Please select an allocation algorithm");
        }
        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };

        let result = match self.client.allocate(size, algorithm).await {
            Ok(resp) => self.apply_blocks(
                resp,
                format!("Memory allocated: {} blocks using {} fit", size, algorithm),
            ),
            Err(err) => Err(err.into()),
        };
        self.conclude(op, result)
    }

    /// Free one specific block, as triggered from the memory map.
    pub async fn deallocate(&self, block_id: BlockId) -> CommandResult {
        let op = Operation::Deallocate;
        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };
        let result = match self.client.deallocate(block_id).await {
            Ok(resp) => self.apply_blocks(resp, format!("Block {} deallocated", block_id)),
            Err(err) => Err(err.into()),
        };
        self.conclude(op, result)
    }

    /// Free a block chosen uniformly among the currently allocated ones.
    pub async fn deallocate_random(&self) -> CommandResult {
        let op = Operation::DeallocateRandom;
        let candidates = self.with_session(|s| s.store().allocated_block_ids());
        let Some(block_id) = pick_block(&candidates) else {
            return self.reject(op, "No allocated blocks to deallocate");
        };

        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };
        let result = match self.client.deallocate(block_id).await {
            Ok(resp) => {
                self.apply_blocks(resp, format!("Memory deallocated: Block {}", block_id))
            }
            Err(err) => Err(err.into()),
        };
        self.conclude(op, result)
    }

    pub async fn reset(&self) -> CommandResult {
        let op = Operation::Reset;
        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };
        let result = match self.client.reset().await {
            Ok(resp) => self.apply_blocks(resp, "Memory reset successfully".to_string()),
            Err(err) => Err(err.into()),
        };
        self.conclude(op, result)
    }

    pub async fn create_process(&self, name: &str, size: u64) -> CommandResult {
        let op = Operation::CreateProcess;
        let name = name.trim();
        if name.is_empty() {
            return self.reject(op, "Please enter a process name");
        }
        if size == 0 {
            return self.reject(op, "Process size must be a positive number");
        }
        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };

        let result = match self.client.create_process(name, size).await {
            Ok(resp) => self.apply_processes(resp, name, size),
            Err(err) => Err(err.into()),
        };
        if result.is_ok() {
            self.refresh_residency().await;
        }
        self.conclude(op, result)
    }

    pub async fn swap_out(&self, process_id: &str) -> CommandResult {
        self.swap(Operation::SwapOut, process_id).await
    }

    pub async fn swap_in(&self, process_id: &str) -> CommandResult {
        self.swap(Operation::SwapIn, process_id).await
    }

    async fn swap(&self, op: Operation, process_id: &str) -> CommandResult {
        let process_id = process_id.trim();
        if process_id.is_empty() {
            return self.reject(op, "Please enter a Process ID.");
        }
        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };

        let reply = match op {
            Operation::SwapIn => self.client.swap_in(process_id).await,
            _ => self.client.swap_out(process_id).await,
        };
        let result = match reply {
            Ok(message) => {
                let message = message.trim().to_string();
                if message.starts_with(SWAP_FAILURE_MARKER) {
                    Err(CommandError::DomainFailure(message))
                } else {
                    self.with_session(|s| {
                        s.info(format!("{}: {}", op.label(), message));
                        s.notify(Severity::Info, message);
                    });
                    Ok(Outcome::Applied)
                }
            }
            Err(err) => Err(err.into()),
        };
        if result.is_ok() {
            self.refresh_residency().await;
        }
        self.conclude(op, result)
    }

    pub async fn simulate_page_replacement(&self, algorithm: &str) -> CommandResult {
        let op = Operation::PageReplacement;
        let algorithm = algorithm.trim();
        if algorithm.is_empty() {
            return self.reject(op, "Please select a page replacement algorithm");
        }
        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };
        let result = match self.client.page_replacement(algorithm).await {
            Ok(resp) => self.apply_replacement(resp, algorithm),
            Err(err) => Err(err.into()),
        };
        self.conclude(op, result)
    }

    pub async fn garbage_collect(&self) -> CommandResult {
        let op = Operation::GarbageCollect;
        let Some(_permit) = self.try_enter() else {
            return Ok(Outcome::Skipped);
        };
        let result = match self.client.garbage_collect().await {
            Ok(resp) => self.apply_gc(resp),
            Err(err) => Err(err.into()),
        };
        self.conclude(op, result)
    }

    /// Load every slice from scratch and reseed the page-frame table.
    ///
    /// The four sources are fetched concurrently. Each result is applied on
    /// its own; one failing source does not roll back the others. Waits for
    /// any in-flight command so the reload never interleaves with one.
    pub async fn initialize(&self) {
        let _permit = self.gate.acquire().await.ok();
        self.with_session(|s| s.info("Loading data from backend..."));

        let (blocks, processes, stats, residency) = tokio::join!(
            self.client.memory_blocks(),
            self.client.processes(),
            self.client.memory_stats(),
            self.fetch_residency(),
        );

        self.with_session(|s| {
            match blocks {
                Ok(blocks) => {
                    s.apply(SliceUpdate::MemoryBlocks(blocks));
                    s.info("Memory blocks loaded");
                }
                Err(err) => s.error(format!("Failed to load memory blocks: {}", err)),
            }
            match processes {
                Ok(processes) => {
                    s.apply(SliceUpdate::Processes(processes));
                    s.info("Processes loaded");
                }
                Err(err) => s.error(format!("Failed to load processes: {}", err)),
            }
            match stats {
                Ok(stats) => s.apply(SliceUpdate::Stats(stats)),
                Err(err) => s.error(format!("Failed to load stats: {}", err)),
            }
            apply_residency(s, residency);

            s.apply(SliceUpdate::PageFrames(FrameTable::seeded()));
            s.info("System initialization complete");
        });
    }

    async fn fetch_residency(&self) -> Result<(Vec<String>, Vec<String>), RequestError> {
        tokio::try_join!(self.client.ram_residents(), self.client.swap_residents())
    }

    /// Re-read both residency lists. Runs while the caller still holds the
    /// gate.
    async fn refresh_residency(&self) {
        let residency = self.fetch_residency().await;
        self.with_session(|s| apply_residency(s, residency));
    }

    fn apply_blocks(&self, resp: BlocksResponse, success: String) -> CommandResult {
        if !resp.success {
            return Err(domain_failure(resp.message));
        }
        let Some(blocks) = resp.memory_blocks else {
            return Err(CommandError::DomainFailure(
                "response did not include memoryBlocks".to_string(),
            ));
        };
        self.with_session(|s| {
            s.apply(SliceUpdate::MemoryBlocks(blocks));
            if let Some(stats) = resp.stats {
                s.apply(SliceUpdate::Stats(stats));
            }
            s.info(success);
        });
        Ok(Outcome::Applied)
    }

    fn apply_processes(&self, resp: ProcessesResponse, name: &str, size: u64) -> CommandResult {
        if !resp.success {
            return Err(domain_failure(resp.message));
        }
        let Some(processes) = resp.processes else {
            return Err(CommandError::DomainFailure(
                "response did not include processes".to_string(),
            ));
        };
        self.with_session(|s| {
            s.apply(SliceUpdate::Processes(processes));
            s.info(format!("Process created: {} (Size: {})", name, size));
        });
        Ok(Outcome::Applied)
    }

    fn apply_replacement(&self, resp: ReplacementResponse, requested: &str) -> CommandResult {
        if resp.success == Some(false) {
            return Err(domain_failure(resp.message));
        }
        let table = FrameTable::try_from(resp.page_frames)
            .map_err(|e| CommandError::DomainFailure(e.to_string()))?;
        let algorithm = if resp.algorithm.is_empty() {
            requested.to_string()
        } else {
            resp.algorithm
        };
        let summary = ReplacementSummary {
            algorithm,
            page_faults: resp.page_faults,
            page_hits: resp.page_hits,
            hit_ratio: resp.hit_ratio,
            reference_string: resp.reference_string.map(ReferenceString::into_display),
        };
        let line = format!(
            "Page replacement: {} - Faults: {}, Hit Ratio: {}%",
            summary.algorithm.to_uppercase(),
            summary.page_faults,
            summary.hit_ratio
        );
        self.with_session(|s| {
            s.apply(SliceUpdate::PageFrames(table));
            s.apply(SliceUpdate::Replacement(summary));
            s.info(line);
        });
        Ok(Outcome::Applied)
    }

    fn apply_gc(&self, resp: GarbageCollectResponse) -> CommandResult {
        if !resp.success {
            return Err(domain_failure(resp.message));
        }
        let Some(blocks) = resp.memory_blocks else {
            return Err(CommandError::DomainFailure(
                "response did not include memoryBlocks".to_string(),
            ));
        };
        self.with_session(|s| {
            s.apply(SliceUpdate::MemoryBlocks(blocks));
            if let Some(stats) = resp.stats {
                s.apply(SliceUpdate::Stats(stats));
            }
            let line = match resp.gc_collections {
                Some(total) => format!(
                    "Garbage collection: {} objects collected (total collections: {})",
                    resp.objects_collected, total
                ),
                None => format!(
                    "Garbage collection: {} objects collected",
                    resp.objects_collected
                ),
            };
            s.info(line);
        });
        Ok(Outcome::Applied)
    }
}

fn domain_failure(message: Option<String>) -> CommandError {
    CommandError::DomainFailure(
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "simulator reported failure".to_string()),
    )
}

fn apply_residency(s: &mut Session, residency: Result<(Vec<String>, Vec<String>), RequestError>) {
    match residency {
        Ok((ram, swap)) => {
            s.apply(SliceUpdate::RamResidents(ram));
            s.apply(SliceUpdate::SwapResidents(swap));
            s.apply(SliceUpdate::ResidencyFault(None));
            s.info("Swap lists updated from backend");
        }
        Err(err) => {
            s.apply(SliceUpdate::ResidencyFault(Some(
                RESIDENCY_UNAVAILABLE.to_string(),
            )));
            s.error(format!("Failed to update swap lists: {}", err));
        }
    }
}

/// One block id chosen uniformly at random.
fn pick_block(candidates: &[BlockId]) -> Option<BlockId> {
    let mut rng = StdRng::from_os_rng();
    candidates.iter().copied().choose(&mut rng)
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
