//! DTOs for simulator requests and responses.

use serde::{Deserialize, Serialize};

use crate::model::{BlockId, MemoryBlock, PageFrame, Process, StatsSnapshot, scalar_strings};

/// Response shared by allocate, deallocate and reset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocksResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub memory_blocks: Option<Vec<MemoryBlock>>,
    #[serde(default)]
    pub stats: Option<StatsSnapshot>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub processes: Option<Vec<Process>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarbageCollectResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub objects_collected: u64,
    #[serde(default)]
    pub gc_collections: Option<u64>,
    #[serde(default)]
    pub memory_blocks: Option<Vec<MemoryBlock>>,
    #[serde(default)]
    pub stats: Option<StatsSnapshot>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Page replacement carries no success flag on the reference backend; some
/// deployments add one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub algorithm: String,
    #[serde(default)]
    pub page_frames: Vec<PageFrame>,
    #[serde(default)]
    pub page_faults: u64,
    #[serde(default)]
    pub page_hits: u64,
    #[serde(default)]
    pub hit_ratio: f64,
    #[serde(default)]
    pub reference_string: Option<ReferenceString>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReferenceString {
    Text(String),
    Pages(Vec<i64>),
}

impl ReferenceString {
    pub fn into_display(self) -> String {
        match self {
            ReferenceString::Text(s) => s,
            ReferenceString::Pages(pages) => pages
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Process ids reported by the RAM / swap residency endpoints.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(super) struct ResidentIds(#[serde(deserialize_with = "scalar_strings")] pub(super) Vec<String>);

#[derive(Debug, Serialize)]
pub(super) struct AllocateForm<'a> {
    pub(super) size: u64,
    pub(super) algorithm: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeallocateForm {
    pub(super) block_id: BlockId,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateProcessForm<'a> {
    pub(super) name: &'a str,
    pub(super) size: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct AlgorithmForm<'a> {
    pub(super) algorithm: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SwapQuery<'a> {
    pub(super) process_id: &'a str,
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
