use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap};

use crate::scoring::{Assessment, CATEGORIES};
use crate::tui::app::{App, InputMode, SaveStatus, Screen};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Fill(1),   // Screen body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.screen {
        Screen::Form => render_form(frame, chunks[1], app),
        Screen::Result => match app.assessment.as_ref() {
            Some(assessment) => render_result(frame, chunks[1], assessment, &app.colors),
            None => render_form(frame, chunks[1], app),
        },
    }
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.colors);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let c = &app.colors;
    let title = "Carbon Footprint";
    let mut spans = vec![Span::styled(title, Style::default().fg(c.title_color).bold())];

    let save_text = match app.save_status {
        SaveStatus::Pending(_) => "editing",
        SaveStatus::Saved(_) => "saved",
        SaveStatus::Idle => "",
    };
    let right = if save_text.is_empty() {
        format!("{} theme", app.theme.name())
    } else {
        format!("{}  {} theme", save_text, app.theme.name())
    };
    let padding = (area.width as usize).saturating_sub(title.len() + right.chars().count());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right, Style::default().fg(c.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let c = &app.colors;
    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress
        Constraint::Length(1), // Spacer
        Constraint::Fill(1),   // Questions
    ])
    .split(area);

    let progress = app.form.progress();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(c.progress_fill).bg(c.bar_empty))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{}/{} answered ({:.0}%)",
            app.form.filled_count(),
            CATEGORIES.len(),
            progress
        ));
    frame.render_widget(gauge, chunks[0]);

    let rows: Vec<Row> = CATEGORIES
        .iter()
        .enumerate()
        .map(|(idx, spec)| {
            let value = app.form.field(idx);
            let focused = idx == app.focused;
            let input = if focused {
                format!("{}_", value)
            } else {
                value.to_string()
            };

            let row_style = if app.is_error_field(idx) {
                c.field_error
            } else if focused {
                c.field_focus
            } else if idx % 2 == 1 {
                Style::default().bg(c.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(c.index_color)),
                Cell::from(format!("{} {}?", spec.question, spec.cadence.per_phrase())),
                Cell::from(input),
                Cell::from(spec.unit).style(Style::default().fg(c.muted)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index: "13."
        Constraint::Fill(1),    // Question
        Constraint::Length(12), // Answer
        Constraint::Length(14), // Unit
    ];

    let table = Table::new(rows, widths).header(
        Row::new(vec!["#", "Question", "Answer", "Unit"])
            .style(c.header_style)
            .bottom_margin(1),
    );

    frame.render_widget(table, chunks[2]);
}

fn render_result(frame: &mut Frame, area: Rect, assessment: &Assessment, c: &ThemeColors) {
    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let left = Layout::vertical([
        Constraint::Length(5), // Score box
        Constraint::Length(3), // Meter
        Constraint::Fill(1),   // Recommendations
    ])
    .split(columns[0]);

    let right = Layout::vertical([
        Constraint::Length(CATEGORIES.len() as u16 + 2), // Bar chart
        Constraint::Fill(1),                              // Shares
    ])
    .split(columns[1]);

    render_score_box(frame, left[0], assessment, c);
    render_meter(frame, left[1], assessment, c);
    render_recommendations(frame, left[2], assessment, c);
    render_bar_chart(frame, right[0], assessment, c);
    render_shares(frame, right[1], assessment, c);
}

fn render_score_box(frame: &mut Frame, area: Rect, assessment: &Assessment, c: &ThemeColors) {
    let zone_color = c.zone_color(assessment.zone);
    let block = Block::bordered()
        .title(" Your Footprint ")
        .border_style(Style::default().fg(zone_color));

    let lines = vec![
        Line::from(Span::styled(
            assessment.zone.headline(),
            Style::default().fg(zone_color).bold(),
        )),
        Line::from(vec![
            Span::styled(format!("{:.2}", assessment.score), Style::default().fg(c.text).bold()),
            Span::styled(" kg CO\u{2082}/day", Style::default().fg(c.muted)),
        ]),
        Line::from(Span::styled(
            format!("\u{2248} {:.1} kg/year", assessment.annual_projection()),
            Style::default().fg(c.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_meter(frame: &mut Frame, area: Rect, assessment: &Assessment, c: &ThemeColors) {
    let reading = assessment.gauge();
    let gauge = Gauge::default()
        .block(Block::bordered().title(" Meter "))
        .gauge_style(
            Style::default()
                .fg(c.gauge_color(reading.tier))
                .bg(c.bar_empty),
        )
        .ratio(reading.ratio())
        .label(reading.label());
    frame.render_widget(gauge, area);
}

fn render_bar_chart(frame: &mut Frame, area: Rect, assessment: &Assessment, c: &ThemeColors) {
    let block = Block::bordered().title(" Breakdown (kg/day) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let breakdown = assessment.breakdown();
    let max = breakdown
        .iter()
        .map(|b| b.value.abs())
        .fold(0.0_f64, f64::max);

    // label(12) + value(8) + spaces
    let bar_width = (inner.width as usize).saturating_sub(23).max(1);

    let lines: Vec<Line> = breakdown
        .iter()
        .zip(CATEGORIES.iter())
        .map(|(entry, spec)| {
            let (glyph, color) = if entry.value < 0.0 {
                ("\u{2592}", c.bar_negative)
            } else {
                ("\u{2588}", c.bar_positive)
            };
            Line::from(vec![
                Span::styled(format!("{:<12} ", spec.short_label), Style::default().fg(c.text)),
                Span::styled(
                    glyph.repeat(bar_cells(entry.value, max, bar_width)),
                    Style::default().fg(color),
                ),
                Span::styled(format!(" {:.2}", entry.value), Style::default().fg(c.muted)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_shares(frame: &mut Frame, area: Rect, assessment: &Assessment, c: &ThemeColors) {
    let block = Block::bordered().title(" Share of emissions ");
    let positive = assessment.positive_breakdown();
    let total: f64 = positive.iter().map(|p| p.value).sum();

    let lines: Vec<Line> = if positive.is_empty() || total <= 0.0 {
        vec![Line::from(Span::styled(
            "No emitting categories.",
            Style::default().fg(c.muted),
        ))]
    } else {
        positive
            .iter()
            .map(|p| {
                Line::from(vec![
                    Span::styled(format!("{:<16}", p.label), Style::default().fg(c.text)),
                    Span::styled(
                        format!("{:>5.1}%", p.value / total * 100.0),
                        Style::default().fg(c.bar_positive),
                    ),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_recommendations(
    frame: &mut Frame,
    area: Rect,
    assessment: &Assessment,
    c: &ThemeColors,
) {
    let block = Block::bordered().title(" Suggestions ");
    let mut lines = vec![Line::from(Span::styled(
        format!("Top contributors: {}", assessment.top_contributors.join(", ")),
        Style::default().fg(c.muted),
    ))];
    for r in assessment.recommendations() {
        lines.push(Line::from(vec![
            Span::styled("\u{2022} ", Style::default().fg(c.status_key_color)),
            Span::styled(r.text, Style::default().fg(c.text)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Cells a bar of `value` fills when `max` spans `width` cells
fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 {
        return 0;
    }
    let cells = (value.abs() / max * width as f64).round() as usize;
    // Any non-zero value stays visible
    if value != 0.0 {
        cells.clamp(1, width)
    } else {
        0
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let c = &app.colors;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            c.flash_error
        } else {
            c.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.screen {
            Screen::Form => &[
                ("\u{2191}/\u{2193}", ":move "),
                ("Enter", ":calculate "),
                ("Del", ":clear "),
                ("t", ":theme "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Screen::Result => &[
                ("b", ":back "),
                ("e", ":export "),
                ("o", ":open "),
                ("r", ":reset "),
                ("t", ":theme "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(c.status_key_color)));
            spans.push(Span::styled(*label, Style::default().fg(c.text)));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(c.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, c: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 17, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(c.popup_border))
        .style(Style::default().bg(c.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(c.status_key_color).bold();
    let entries = [
        ("j / Down / Tab", "Next question"),
        ("k / Up / S-Tab", "Previous question"),
        ("0-9 . - + e", "Type an answer"),
        ("Backspace", "Delete a character"),
        ("Delete", "Clear the answer"),
        ("Enter", "Calculate footprint"),
        ("b / Esc", "Back to the form"),
        ("e", "Export report"),
        ("o", "Open exported report"),
        ("r", "Reset all answers (result)"),
        ("t", "Toggle light/dark theme"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", key), key_style),
                Span::styled(*desc, Style::default().fg(c.text)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(c.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
