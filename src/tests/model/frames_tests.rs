use super::*;

#[test]
fn seeded_table_has_four_empty_frames() {
    let table = FrameTable::seeded();
    assert_eq!(table.frames().len(), FRAME_CAPACITY);
    for (i, frame) in table.frames().iter().enumerate() {
        assert_eq!(frame.frame_id, i as u32);
        assert_eq!(frame.page_number, PageSlot::Empty);
        assert!(!frame.occupied);
    }
    assert_eq!(table.occupied(), 0);
}

#[test]
fn page_slot_accepts_sentinels_and_numbers() {
    let frames: Vec<PageFrame> = serde_json::from_str(
        r#"[
            {"frameId":0,"pageNumber":-1,"occupied":false},
            {"frameId":1,"pageNumber":7,"occupied":true},
            {"frameId":2,"pageNumber":null,"occupied":false},
            {"frameId":3,"pageNumber":"empty"}
        ]"#,
    )
    .expect("parse frames");
    assert_eq!(frames[0].page_number, PageSlot::Empty);
    assert_eq!(frames[1].page_number, PageSlot::Page(7));
    assert_eq!(frames[2].page_number, PageSlot::Empty);
    assert_eq!(frames[3].page_number, PageSlot::Empty);
    assert!(!frames[3].occupied);
}

#[test]
fn page_slot_rejects_garbage_text() {
    let err = serde_json::from_str::<PageFrame>(r#"{"frameId":0,"pageNumber":"seven"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("invalid page number"), "{}", err);
}

#[test]
fn empty_slot_serializes_as_minus_one() {
    let v = serde_json::to_value(PageFrame::empty(2)).expect("serialize");
    assert_eq!(v["pageNumber"], serde_json::json!(-1));
    assert_eq!(v["frameId"], serde_json::json!(2));
}

#[test]
fn frame_table_requires_exact_capacity() {
    let three = vec![PageFrame::empty(0), PageFrame::empty(1), PageFrame::empty(2)];
    assert_eq!(FrameTable::try_from(three), Err(FrameCountMismatch(3)));

    let four = (0..4).map(PageFrame::empty).collect::<Vec<_>>();
    let table = FrameTable::try_from(four).expect("four frames");
    assert_eq!(table, FrameTable::seeded());
}
