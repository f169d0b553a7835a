use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::session::{Notice, Severity};

/// A centered box, never larger than `area`.
fn centered(area: Rect) -> Rect {
    let w = area.width.saturating_sub(6).clamp(20, 70);
    let h = area.height.saturating_sub(6).clamp(6, 10);
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    }
    .intersection(area)
}

/// Draw a notice that must be dismissed before any other input is taken.
pub(super) fn draw_notice(frame: &mut ratatui::Frame, notice: &Notice) {
    dim_frame(frame);
    let box_area = centered(frame.area());
    frame.render_widget(Clear, box_area);

    let (title, color) = match notice.severity {
        Severity::Info => ("Notice", Color::Green),
        Severity::Error => ("Error", Color::Red),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(notice.message.as_str()).wrap(Wrap { trim: false }),
        parts[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            "Enter to dismiss",
            Style::default().fg(Color::Gray),
        ))
        .alignment(ratatui::layout::Alignment::Right),
        parts[1],
    );
}

fn dim_frame(frame: &mut ratatui::Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier |= Modifier::DIM;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/modal_tests.rs"]
mod tests;
