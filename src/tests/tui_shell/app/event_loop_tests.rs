use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn ctrl_enter_allocates() {
    assert_eq!(
        shortcut_for(&key(KeyCode::Enter, KeyModifiers::CONTROL)),
        Some(Trigger::Allocate)
    );
}

#[test]
fn plain_and_shifted_enter_are_not_shortcuts() {
    assert_eq!(shortcut_for(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    assert_eq!(shortcut_for(&key(KeyCode::Enter, KeyModifiers::SHIFT)), None);
    assert_eq!(shortcut_for(&key(KeyCode::Enter, KeyModifiers::ALT)), None);
}

#[test]
fn letter_chords_follow_the_shortcut_table() {
    assert_eq!(
        shortcut_for(&key(KeyCode::Char('m'), KeyModifiers::CONTROL)),
        Some(Trigger::Allocate)
    );
    assert_eq!(
        shortcut_for(&key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
        Some(Trigger::Reset)
    );
    assert_eq!(
        shortcut_for(&key(KeyCode::Char('G'), KeyModifiers::ALT)),
        Some(Trigger::GarbageCollect)
    );
    assert_eq!(shortcut_for(&key(KeyCode::Char('m'), KeyModifiers::NONE)), None);
    assert_eq!(
        shortcut_for(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
        None
    );
}
