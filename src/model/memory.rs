use serde::{Deserialize, Serialize};

pub type BlockId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub id: BlockId,

    /// Absent on some backends; a missing size counts as one unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    pub free: bool,
}

impl MemoryBlock {
    pub fn size(&self) -> u64 {
        self.size.unwrap_or(1)
    }

    pub fn is_allocated(&self) -> bool {
        !self.free
    }
}
