//! Focusable form fields and the trigger each one submits.

use crate::dispatch::{ALLOCATION_ALGORITHMS, FormState, PAGE_ALGORITHMS, Trigger};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Focus {
    MemorySize,
    AllocationAlgorithm,
    ProcessName,
    ProcessSize,
    SwapProcessId,
    PageAlgorithm,
    MemoryMap,
    CommandLine,
}

pub(in crate::tui_shell) const FOCUS_ORDER: [Focus; 8] = [
    Focus::MemorySize,
    Focus::AllocationAlgorithm,
    Focus::ProcessName,
    Focus::ProcessSize,
    Focus::SwapProcessId,
    Focus::PageAlgorithm,
    Focus::MemoryMap,
    Focus::CommandLine,
];

impl Focus {
    pub(in crate::tui_shell) fn next(self) -> Self {
        self.step(1)
    }

    pub(in crate::tui_shell) fn prev(self) -> Self {
        self.step(FOCUS_ORDER.len() - 1)
    }

    fn step(self, by: usize) -> Self {
        let i = FOCUS_ORDER.iter().position(|f| *f == self).unwrap_or(0);
        FOCUS_ORDER[(i + by) % FOCUS_ORDER.len()]
    }

    pub(in crate::tui_shell) fn label(self) -> &'static str {
        match self {
            Focus::MemorySize => "Size",
            Focus::AllocationAlgorithm => "Fit",
            Focus::ProcessName => "Name",
            Focus::ProcessSize => "Proc size",
            Focus::SwapProcessId => "Process ID",
            Focus::PageAlgorithm => "Paging",
            Focus::MemoryMap => "Memory map",
            Focus::CommandLine => "Command",
        }
    }

    /// Options for fields picked from a fixed list.
    pub(in crate::tui_shell) fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            Focus::AllocationAlgorithm => Some(ALLOCATION_ALGORITHMS),
            Focus::PageAlgorithm => Some(PAGE_ALGORITHMS),
            _ => None,
        }
    }

    /// True for free-text form fields.
    pub(in crate::tui_shell) fn is_text_field(self) -> bool {
        field(self).is_some() && self.choices().is_none()
    }

    /// What Enter (or Shift-Enter) submits from this field.
    pub(in crate::tui_shell) fn submit(self, shift: bool) -> Option<Trigger> {
        match self {
            Focus::MemorySize | Focus::AllocationAlgorithm => Some(Trigger::Allocate),
            Focus::ProcessName | Focus::ProcessSize => Some(Trigger::CreateProcess),
            Focus::SwapProcessId if shift => Some(Trigger::SwapIn),
            Focus::SwapProcessId => Some(Trigger::SwapOut),
            Focus::PageAlgorithm => Some(Trigger::PageReplacement),
            Focus::MemoryMap | Focus::CommandLine => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Field {
    MemorySize,
    AllocationAlgorithm,
    ProcessName,
    ProcessSize,
    SwapProcessId,
    PageAlgorithm,
}

pub(in crate::tui_shell) fn field(focus: Focus) -> Option<Field> {
    match focus {
        Focus::MemorySize => Some(Field::MemorySize),
        Focus::AllocationAlgorithm => Some(Field::AllocationAlgorithm),
        Focus::ProcessName => Some(Field::ProcessName),
        Focus::ProcessSize => Some(Field::ProcessSize),
        Focus::SwapProcessId => Some(Field::SwapProcessId),
        Focus::PageAlgorithm => Some(Field::PageAlgorithm),
        Focus::MemoryMap | Focus::CommandLine => None,
    }
}

pub(in crate::tui_shell) fn value(form: &FormState, field: Field) -> &str {
    match field {
        Field::MemorySize => &form.memory_size,
        Field::AllocationAlgorithm => &form.allocation_algorithm,
        Field::ProcessName => &form.process_name,
        Field::ProcessSize => &form.process_size,
        Field::SwapProcessId => &form.swap_process_id,
        Field::PageAlgorithm => &form.page_algorithm,
    }
}

pub(in crate::tui_shell) fn value_mut(form: &mut FormState, field: Field) -> &mut String {
    match field {
        Field::MemorySize => &mut form.memory_size,
        Field::AllocationAlgorithm => &mut form.allocation_algorithm,
        Field::ProcessName => &mut form.process_name,
        Field::ProcessSize => &mut form.process_size,
        Field::SwapProcessId => &mut form.swap_process_id,
        Field::PageAlgorithm => &mut form.page_algorithm,
    }
}

/// Step a choice field forwards or backwards. Unknown values restart at the
/// first option.
pub(in crate::tui_shell) fn cycle_choice(current: &str, choices: &[&str], forward: bool) -> String {
    let n = choices.len();
    let next = match choices.iter().position(|c| c.eq_ignore_ascii_case(current)) {
        Some(i) if forward => (i + 1) % n,
        Some(i) => (i + n - 1) % n,
        None => 0,
    };
    choices[next].to_string()
}

/// Fields emptied after a successful submission.
pub(in crate::tui_shell) fn clear_after_success(trigger: Trigger, form: &mut FormState) {
    match trigger {
        Trigger::CreateProcess => form.process_name.clear(),
        Trigger::SwapOut | Trigger::SwapIn => form.swap_process_id.clear(),
        _ => {}
    }
}

/// A swap the simulator answered with a failure still consumes the id.
pub(in crate::tui_shell) fn clear_after_domain_failure(trigger: Trigger, form: &mut FormState) {
    if matches!(trigger, Trigger::SwapOut | Trigger::SwapIn) {
        form.swap_process_id.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/forms_tests.rs"]
mod tests;
