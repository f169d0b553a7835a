use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

/// Draw a bordered panel and return its inner area.
pub(super) fn render_panel_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    focused: bool,
    area: Rect,
) -> Rect {
    let color = if focused { Color::Cyan } else { Color::Yellow };
    let header = Line::from(Span::styled(title.to_string(), Style::default().fg(color)));
    let mut outer = Block::default().borders(Borders::ALL).title(header);
    if focused {
        outer = outer.border_style(Style::default().fg(Color::Cyan));
    }
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
