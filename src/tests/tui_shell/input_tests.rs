use super::*;

#[test]
fn editing_is_char_aware() {
    let mut input = Input::default();
    for c in "a❌b".chars() {
        input.insert_char(c);
    }
    assert_eq!(input.cursor, 3);
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "ab");
    input.delete();
    assert_eq!(input.buf, "a");
    input.move_right();
    assert_eq!(input.cursor, 1);
}

#[test]
fn history_walks_back_and_forward() {
    let mut input = Input::default();
    input.push_history("reset");
    input.push_history("reset");
    input.push_history("gc");

    input.history_up();
    assert_eq!(input.buf, "gc");
    input.history_up();
    assert_eq!(input.buf, "reset");
    input.history_up();
    assert_eq!(input.buf, "reset");
    input.history_down();
    assert_eq!(input.buf, "gc");
    input.history_down();
    assert!(input.buf.is_empty());
}
