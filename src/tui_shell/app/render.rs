use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::activity_log::Level;
use crate::monitor::Health;
use crate::projection::{Listing, ResidencyPanel, Views};
use crate::session::{self, Session};

use super::super::modal;
use super::super::view::render_panel_chrome;
use super::forms::{self, FOCUS_ORDER, Focus};
use super::{App, time_utils};

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let session = session::lock(&app.session);
    let views = session.views();

    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(9),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    draw_stats(frame, views, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .split(chunks[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);
    draw_memory_map(frame, app, views, left[0]);
    draw_processes(frame, views, left[1]);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);
    draw_residency(frame, "RAM", &views.ram, Color::Green, middle[0]);
    draw_residency(frame, "Swap space", &views.swap, Color::Magenta, middle[1]);

    draw_paging(frame, views, columns[2]);
    draw_log(frame, &session, chunks[3]);
    draw_form(frame, app, chunks[4]);
    draw_command(frame, app, chunks[5]);

    if let Some(notice) = session.pending_notice() {
        modal::draw_notice(frame, notice);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let (label, color, since) = match app.health() {
        None => ("STARTING", Color::Gray, None),
        Some(status) => {
            let color = match status.health {
                Health::Healthy => Color::Green,
                Health::Degraded(_) => Color::Yellow,
                Health::Unreachable => Color::Red,
                Health::Unknown => Color::Gray,
            };
            let since = status
                .checked_at
                .map(|at| time_utils::fmt_since(at.elapsed()));
            (status.health.label(), color, since)
        }
    };

    let mut spans = vec![
        Span::styled("memsim", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
        Span::raw(app.base_url.as_str()),
        Span::raw("  backend: "),
        Span::styled(label, Style::default().fg(color)),
    ];
    if let Some(since) = since {
        spans.push(Span::styled(
            format!(" ({})", since),
            Style::default().fg(Color::Gray),
        ));
    }
    if app.coordinator().is_busy() {
        spans.push(Span::styled("  busy", Style::default().fg(Color::Yellow)));
    }
    if let Some(last) = &app.last_result {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(last.as_str(), Style::default().fg(Color::Gray)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn draw_stats(frame: &mut ratatui::Frame, views: &Views, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, views.stats.len().max(1) as u32); views.stats.len()])
        .split(area);
    for (card, cell) in views.stats.iter().zip(cells.iter()) {
        let line = Line::from(vec![
            Span::styled(
                card.value.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(card.label, Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
            *cell,
        );
    }
}

fn draw_memory_map(frame: &mut ratatui::Frame, app: &App, views: &Views, area: Rect) {
    let focused = app.focus == Focus::MemoryMap;
    let inner = render_panel_chrome(frame, "Memory map", focused, area);

    let lines = match &views.memory {
        Listing::Placeholder(text) => vec![Line::styled(*text, Style::default().fg(Color::Gray))],
        Listing::Rows(cells) => {
            let selected = app.memory_selected.min(cells.len().saturating_sub(1));
            let grid = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let mut style = if cell.free {
                        Style::default().fg(Color::Black).bg(Color::Green)
                    } else {
                        Style::default().fg(Color::White).bg(Color::Red)
                    };
                    if focused && i == selected {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    Span::styled(format!("{:>3} ", cell.id), style)
                })
                .collect::<Vec<_>>();
            let mut lines = vec![Line::from(grid)];
            if let Some(cell) = cells.get(selected).filter(|_| focused) {
                lines.push(Line::from(""));
                let hint = if cell.on_select.is_some() {
                    "  (Enter to deallocate)"
                } else {
                    ""
                };
                lines.push(Line::from(format!("{}{}", cell.title, hint)));
            }
            lines
        }
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_processes(frame: &mut ratatui::Frame, views: &Views, area: Rect) {
    let inner = render_panel_chrome(frame, "Processes", false, area);
    let lines = match &views.processes {
        Listing::Placeholder(text) => vec![Line::styled(*text, Style::default().fg(Color::Gray))],
        Listing::Rows(rows) => rows
            .iter()
            .flat_map(|row| {
                [
                    Line::styled(row.heading.as_str(), Style::default().fg(Color::Cyan)),
                    Line::styled(row.detail.as_str(), Style::default().fg(Color::Gray)),
                ]
            })
            .collect(),
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_residency(
    frame: &mut ratatui::Frame,
    title: &str,
    panel: &ResidencyPanel,
    color: Color,
    area: Rect,
) {
    let inner = render_panel_chrome(frame, title, false, area);
    let style = match panel {
        ResidencyPanel::Ids { .. } => Style::default().fg(color),
        ResidencyPanel::Placeholder(_) => Style::default().fg(Color::Gray),
        ResidencyPanel::Unavailable(_) => Style::default().fg(Color::Red),
    };
    let lines = panel
        .lines()
        .into_iter()
        .map(|l| Line::styled(l, style))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_paging(frame: &mut ratatui::Frame, views: &Views, area: Rect) {
    let inner = render_panel_chrome(frame, "Page frames", false, area);

    let frames = views
        .frames
        .iter()
        .map(|cell| {
            let style = if cell.occupied {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {:^3} ", cell.text), style)
        })
        .collect::<Vec<_>>();

    let mut lines = vec![Line::from(frames), Line::from("")];
    match &views.algorithm {
        Some(panel) => {
            lines.push(Line::styled(
                panel.heading.as_str(),
                Style::default().fg(Color::Yellow),
            ));
            lines.push(Line::from(format!("Page faults: {}", panel.page_faults)));
            lines.push(Line::from(format!("Page hits:   {}", panel.page_hits)));
            lines.push(Line::from(format!("Hit ratio:   {}", panel.hit_ratio)));
            lines.push(Line::styled(
                format!("Reference: {}", panel.reference_string),
                Style::default().fg(Color::Gray),
            ));
        }
        None => lines.push(Line::styled(
            "No simulation run yet",
            Style::default().fg(Color::Gray),
        )),
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_log(frame: &mut ratatui::Frame, session: &Session, area: Rect) {
    let inner = render_panel_chrome(frame, "Activity", false, area);
    // Newest at the bottom; keep only what fits.
    let visible = inner.height as usize;
    let log = session.log();
    let lines = log
        .entries()
        .skip(log.len().saturating_sub(visible))
        .map(|entry| {
            let color = match entry.level {
                Level::Info => Color::White,
                Level::Warn => Color::Yellow,
                Level::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.clock()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(entry.message.as_str(), Style::default().fg(color)),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_form(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for focus in FOCUS_ORDER {
        let Some(field) = forms::field(focus) else {
            continue;
        };
        let active = app.focus == focus;
        let value = if active && focus.is_text_field() {
            app.field_input.buf.as_str()
        } else {
            forms::value(&app.form, field)
        };
        let label_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value_style = if active {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("{}: ", focus.label()), label_style));
        let shown = if focus.choices().is_some() {
            format!("<{}>", value)
        } else {
            format!("[{}]", value)
        };
        spans.push(Span::styled(shown, value_style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .title("Tab: next field  Enter: submit  Shift-Enter: swap in  Ctrl-R/M/G: reset/allocate/gc"),
        ),
        area,
    );
}

fn draw_command(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let active = app.focus == Focus::CommandLine;
    let prompt_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(">", prompt_style),
        Span::raw(" "),
        Span::raw(app.command.buf.as_str()),
    ];
    if app.command.buf.is_empty() {
        spans.push(Span::styled(
            "allocate | deallocate | reset | create-process | swap-out | swap-in | page-replacement | gc | refresh | reconnect",
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP)),
        area,
    );

    if active {
        let x = 2 + app.command.cursor as u16;
        frame.set_cursor_position((area.x + x, area.y + 1));
    }
}
