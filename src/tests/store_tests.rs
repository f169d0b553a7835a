use super::*;
use crate::model::{FRAME_CAPACITY, PageFrame, PageSlot};

fn block(id: BlockId, free: bool) -> MemoryBlock {
    MemoryBlock {
        id,
        size: Some(1),
        free,
    }
}

#[test]
fn new_store_is_empty_with_seeded_frames() {
    let store = Store::new();
    assert!(store.memory_blocks().is_empty());
    assert!(store.processes().is_empty());
    assert!(store.ram_residents().is_empty());
    assert!(store.swap_residents().is_empty());
    assert_eq!(store.page_frames().frames().len(), FRAME_CAPACITY);
    assert!(store.replacement().is_none());
    assert_eq!(store.stats(), &StatsSnapshot::default());
}

#[test]
fn replace_overwrites_without_merging() {
    let mut store = Store::new();
    store.replace(SliceUpdate::MemoryBlocks(vec![block(99, false), block(1, true)]));
    let slice = store.replace(SliceUpdate::MemoryBlocks(vec![block(1, false)]));

    assert_eq!(slice, Slice::MemoryBlocks);
    assert_eq!(store.memory_blocks(), &[block(1, false)]);
}

#[test]
fn replace_is_idempotent() {
    let mut store = Store::new();
    let ids = vec!["P1".to_string(), "P2".to_string()];
    store.replace(SliceUpdate::RamResidents(ids.clone()));
    store.replace(SliceUpdate::RamResidents(ids.clone()));
    assert_eq!(store.ram_residents(), ids.as_slice());
}

#[test]
fn residency_lists_are_stored_as_given() {
    let mut store = Store::new();
    // Overlap is the backend's problem; the store keeps both lists verbatim.
    store.replace(SliceUpdate::RamResidents(vec!["P1".into(), "P3".into()]));
    store.replace(SliceUpdate::SwapResidents(vec!["P3".into()]));
    assert_eq!(store.ram_residents(), &["P1".to_string(), "P3".to_string()]);
    assert_eq!(store.swap_residents(), &["P3".to_string()]);
}

#[test]
fn stats_are_replaced_whole() {
    let mut store = Store::new();
    store.replace(SliceUpdate::Stats(StatsSnapshot {
        allocated_blocks: 5,
        gc_collections: 2,
        ..StatsSnapshot::default()
    }));
    store.replace(SliceUpdate::Stats(StatsSnapshot {
        free_blocks: 10,
        ..StatsSnapshot::default()
    }));
    assert_eq!(store.stats().allocated_blocks, 0);
    assert_eq!(store.stats().gc_collections, 0);
    assert_eq!(store.stats().free_blocks, 10);
}

#[test]
fn page_frames_replaced_by_new_table() {
    let mut store = Store::new();
    let frames = (0..4)
        .map(|i| PageFrame {
            frame_id: i,
            page_number: PageSlot::Page(i + 3),
            occupied: true,
        })
        .collect::<Vec<_>>();
    let table = FrameTable::try_from(frames).expect("table");
    store.replace(SliceUpdate::PageFrames(table.clone()));
    assert_eq!(store.page_frames(), &table);
    assert_eq!(store.page_frames().occupied(), 4);
}

#[test]
fn allocated_block_ids_filters_free_blocks() {
    let mut store = Store::new();
    store.replace(SliceUpdate::MemoryBlocks(vec![
        block(0, true),
        block(1, false),
        block(2, true),
        block(3, false),
    ]));
    assert_eq!(store.allocated_block_ids(), vec![1, 3]);
}
