use super::*;

#[test]
fn focus_cycles_through_every_field() {
    let mut focus = Focus::MemorySize;
    for _ in 0..FOCUS_ORDER.len() {
        focus = focus.next();
    }
    assert_eq!(focus, Focus::MemorySize);
    assert_eq!(Focus::MemorySize.prev(), Focus::CommandLine);
}

#[test]
fn enter_in_swap_field_swaps_out_and_shift_enter_swaps_in() {
    assert_eq!(Focus::SwapProcessId.submit(false), Some(Trigger::SwapOut));
    assert_eq!(Focus::SwapProcessId.submit(true), Some(Trigger::SwapIn));
    assert_eq!(Focus::ProcessName.submit(false), Some(Trigger::CreateProcess));
    assert_eq!(Focus::MemoryMap.submit(false), None);
}

#[test]
fn choices_wrap_in_both_directions() {
    assert_eq!(cycle_choice("worst", ALLOCATION_ALGORITHMS, true), "first");
    assert_eq!(cycle_choice("fifo", PAGE_ALGORITHMS, false), "optimal");
    assert_eq!(cycle_choice("LRU", PAGE_ALGORITHMS, true), "optimal");
    assert_eq!(cycle_choice("bogus", PAGE_ALGORITHMS, true), "fifo");
}

#[test]
fn only_free_text_fields_are_editable() {
    assert!(Focus::ProcessName.is_text_field());
    assert!(!Focus::PageAlgorithm.is_text_field());
    assert!(!Focus::CommandLine.is_text_field());
}

#[test]
fn successful_submissions_clear_their_inputs() {
    let mut form = FormState {
        process_name: "editor".into(),
        swap_process_id: "P1".into(),
        ..FormState::default()
    };
    clear_after_success(Trigger::Allocate, &mut form);
    assert_eq!(form.process_name, "editor");

    clear_after_success(Trigger::CreateProcess, &mut form);
    assert!(form.process_name.is_empty());
    assert_eq!(form.swap_process_id, "P1");

    clear_after_success(Trigger::SwapIn, &mut form);
    assert!(form.swap_process_id.is_empty());

    *value_mut(&mut form, Field::MemorySize) = "8".into();
    assert_eq!(value(&form, Field::MemorySize), "8");
}

#[test]
fn failed_swaps_clear_the_id_but_other_failures_keep_inputs() {
    let mut form = FormState {
        process_name: "editor".into(),
        swap_process_id: "P1".into(),
        ..FormState::default()
    };
    clear_after_domain_failure(Trigger::CreateProcess, &mut form);
    assert_eq!(form.process_name, "editor");

    clear_after_domain_failure(Trigger::SwapOut, &mut form);
    assert!(form.swap_process_id.is_empty());
}
