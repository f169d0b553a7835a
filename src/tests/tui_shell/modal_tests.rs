use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::*;

#[test]
fn box_stays_inside_a_tiny_terminal() {
    let area = Rect::new(0, 0, 12, 4);
    let boxed = centered(area);
    assert!(boxed.right() <= area.right(), "{:?}", boxed);
    assert!(boxed.bottom() <= area.bottom(), "{:?}", boxed);
}

#[test]
fn box_is_centered_on_a_large_terminal() {
    let area = Rect::new(0, 0, 120, 40);
    let boxed = centered(area);
    assert_eq!(boxed.width, 70);
    assert_eq!(boxed.height, 10);
    assert_eq!(boxed.x, 25);
    assert_eq!(boxed.y, 15);
}

#[test]
fn notice_renders_on_a_small_terminal() {
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).expect("terminal");
    let notice = Notice {
        severity: Severity::Error,
        message: "❌ Process not found".into(),
    };
    terminal
        .draw(|f| draw_notice(f, &notice))
        .expect("draw notice");
}
