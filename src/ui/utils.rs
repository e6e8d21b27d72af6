use crate::app::App;
use crate::config::Theme;
use crate::models::Tool;
use ratatui::style::Color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn hex_to_rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    } else {
        Color::White
    }
}

/// Centered column taking 80% of the width and the given height, vertically
/// centered. Every panel renders inside one of these.
pub fn centered_column(area: Rect, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(80),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render_header(f: &mut Frame, app: &App) {
    let tool_label = match app.tool {
        Tool::Post => "post composer",
        Tool::Instruction => "instruction wizard",
    };

    let header_spans = vec![
        Span::styled(
            "drafta",
            Style::default()
                .fg(hex_to_rgb(&app.theme.main))
                .add_modifier(ratatui::style::Modifier::BOLD),
        ),
        Span::styled(
            format!(" | {}", tool_label),
            Style::default().fg(hex_to_rgb(&app.theme.sub)),
        ),
    ];

    let header_row_area = Rect::new(0, 1, f.area().width, 1);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(82),
            Constraint::Fill(1),
        ])
        .split(header_row_area);

    f.render_widget(Paragraph::new(Line::from(header_spans)), header_layout[1]);
}

/// Key hints on the last row, with any pending flash notice just above it.
pub fn render_footer(f: &mut Frame, app: &App, hints: &str) {
    let height = f.area().height;
    if height < 3 {
        return;
    }

    if let Some((message, _)) = &app.flash {
        let notice = Paragraph::new(message.as_str())
            .style(Style::default().fg(hex_to_rgb(&app.theme.error)))
            .alignment(Alignment::Center);
        f.render_widget(notice, Rect::new(0, height - 2, f.area().width, 1));
    }

    let footer = Paragraph::new(hints)
        .style(Style::default().fg(hex_to_rgb(&app.theme.sub_alt)))
        .alignment(Alignment::Center);
    f.render_widget(footer, Rect::new(0, height - 1, f.area().width, 1));
}

/// One-line text input row. The focused row gets a caret marker and a block
/// cursor after the value.
pub fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let marker_color = if focused {
        hex_to_rgb(&theme.caret)
    } else {
        hex_to_rgb(&theme.sub_alt)
    };

    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, Style::default().fg(marker_color)),
        Span::styled(
            format!("{:<20}", label),
            Style::default().fg(hex_to_rgb(&theme.sub)),
        ),
        Span::styled(value.to_string(), Style::default().fg(hex_to_rgb(&theme.text))),
    ];

    if focused {
        spans.push(Span::styled(
            " ",
            Style::default().bg(hex_to_rgb(&theme.caret)),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One-line selector row showing every option, the chosen one highlighted.
pub fn render_selector(
    f: &mut Frame,
    area: Rect,
    label: &str,
    options: &[&str],
    selected: &str,
    focused: bool,
    theme: &Theme,
) {
    let marker_color = if focused {
        hex_to_rgb(&theme.caret)
    } else {
        hex_to_rgb(&theme.sub_alt)
    };

    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, Style::default().fg(marker_color)),
        Span::styled(
            format!("{:<20}", label),
            Style::default().fg(hex_to_rgb(&theme.sub)),
        ),
    ];

    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                "  ",
                Style::default().fg(hex_to_rgb(&theme.sub_alt)),
            ));
        }
        if *option == selected {
            spans.push(Span::styled(
                format!("[{}]", option),
                Style::default()
                    .fg(hex_to_rgb(&theme.main))
                    .add_modifier(ratatui::style::Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", option),
                Style::default().fg(hex_to_rgb(&theme.sub)),
            ));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
