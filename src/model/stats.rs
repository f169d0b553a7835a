use serde::{Deserialize, Serialize};

/// Point-in-time aggregate reported by the simulator. Always replaced whole.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSnapshot {
    pub allocated_blocks: u64,
    pub free_blocks: u64,
    pub utilization_percentage: f64,
    pub success_rate: f64,
    pub active_processes: u64,
    pub gc_collections: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_blocks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_allocations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_allocations: Option<u64>,
}
