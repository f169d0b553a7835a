use super::*;

#[test]
fn blocks_response_tolerates_missing_optional_fields() {
    let resp: BlocksResponse = serde_json::from_str(
        r#"{"success":true,"memoryBlocks":[{"id":1,"size":10,"free":false},{"id":2,"free":true}],
            "stats":{"allocatedBlocks":1,"freeBlocks":0}}"#,
    )
    .expect("parse");
    assert!(resp.success);
    let blocks = resp.memory_blocks.expect("blocks");
    assert_eq!(blocks[0].size(), 10);
    assert_eq!(blocks[1].size(), 1);
    let stats = resp.stats.expect("stats");
    assert_eq!(stats.allocated_blocks, 1);
    assert_eq!(stats.utilization_percentage, 0.0);
    assert!(resp.message.is_none());
}

#[test]
fn failure_response_keeps_backend_message() {
    let resp: BlocksResponse =
        serde_json::from_str(r#"{"success":false,"message":"No suitable memory block found"}"#)
            .expect("parse");
    assert!(!resp.success);
    assert_eq!(resp.message.as_deref(), Some("No suitable memory block found"));
}

#[test]
fn process_ids_and_priority_accept_numbers() {
    let resp: ProcessesResponse = serde_json::from_str(
        r#"{"success":true,"processes":[
            {"id":1,"name":"editor","size":4,"status":"Ready","priority":0},
            {"id":"P2","name":"shell","size":2}
        ]}"#,
    )
    .expect("parse");
    let procs = resp.processes.expect("processes");
    assert_eq!(procs[0].id, "1");
    // The simulator reports unprioritized processes as 0.
    assert_eq!(procs[0].priority, None);
    assert_eq!(procs[0].priority_label(), "Normal");
    assert_eq!(procs[1].id, "P2");
    assert_eq!(procs[1].status_label(), "Unknown");
    assert_eq!(procs[1].priority_label(), "Normal");
}

#[test]
fn blank_status_and_priority_fall_back_to_labels() {
    let resp: ProcessesResponse = serde_json::from_str(
        r#"{"success":true,"processes":[
            {"id":3,"name":"db","size":8,"status":"","priority":""},
            {"id":4,"name":"web","size":2,"status":"Running","priority":2},
            {"id":5,"name":"cron","size":1,"status":null,"priority":"High"}
        ]}"#,
    )
    .expect("parse");
    let procs = resp.processes.expect("processes");
    assert_eq!(procs[0].status_label(), "Unknown");
    assert_eq!(procs[0].priority_label(), "Normal");
    assert_eq!(procs[1].status_label(), "Running");
    assert_eq!(procs[1].priority_label(), "2");
    assert_eq!(procs[2].status_label(), "Unknown");
    assert_eq!(procs[2].priority_label(), "High");
}

#[test]
fn reference_string_accepts_text_or_pages() {
    let text: ReplacementResponse =
        serde_json::from_str(r#"{"algorithm":"fifo","referenceString":"1, 2"}"#).expect("parse");
    assert_eq!(
        text.reference_string.map(ReferenceString::into_display),
        Some("1, 2".to_string())
    );

    let pages: ReplacementResponse =
        serde_json::from_str(r#"{"algorithm":"lru","referenceString":[7,0,1]}"#).expect("parse");
    assert_eq!(
        pages.reference_string.map(ReferenceString::into_display),
        Some("7, 0, 1".to_string())
    );
}

#[test]
fn resident_ids_are_stringified() {
    let ids: ResidentIds = serde_json::from_str(r#"["Process-1", 2]"#).expect("parse");
    assert_eq!(ids.0, vec!["Process-1".to_string(), "2".to_string()]);
}

#[test]
fn forms_use_backend_field_names() {
    let v = serde_json::to_value(DeallocateForm { block_id: 3 }).expect("serialize");
    assert_eq!(v, serde_json::json!({"blockId": 3}));
    let v = serde_json::to_value(SwapQuery { process_id: "P1" }).expect("serialize");
    assert_eq!(v, serde_json::json!({"processId": "P1"}));
}
