mod frames;
mod memory;
mod process;
mod stats;
mod wire;

pub use self::frames::{
    FRAME_CAPACITY, FrameCountMismatch, FrameTable, PageFrame, PageSlot, ReplacementSummary,
};
pub use self::memory::{BlockId, MemoryBlock};
pub use self::process::Process;
pub use self::stats::StatsSnapshot;
pub(crate) use self::wire::scalar_strings;
