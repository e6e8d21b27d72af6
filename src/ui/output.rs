use crate::app::App;
use crate::error::AppError;
use crate::models::Tool;
use crate::ui::utils::{centered_column, hex_to_rgb, render_footer, render_header};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use textwrap::Options;

const RESULT_HINTS: &str = "c: copy | r: regenerate | e: edit | ctrl+r: start over | esc: quit";
const ERROR_HINTS: &str = "r: retry | e: edit | esc: quit";

/// Full-frame loading panel. This is the last frame drawn before the
/// blocking call, so it stays up for the whole request.
pub fn draw_loading(f: &mut Frame, app: &App) {
    render_header(f, app);

    let message = match app.tool {
        Tool::Post => "Crafting your LinkedIn post...",
        Tool::Instruction => "Assembling your system instruction...",
    };

    let area = centered_column(f.area(), 2);
    f.render_widget(
        Paragraph::new(message)
            .style(
                Style::default()
                    .fg(hex_to_rgb(&app.theme.main))
                    .add_modifier(ratatui::style::Modifier::BOLD),
            )
            .alignment(Alignment::Center),
        area,
    );
}

/// Result panel: the generated text on success, a message box on failure.
pub fn draw(f: &mut Frame, app: &App) {
    render_header(f, app);

    match &app.outcome {
        Some(Ok(text)) => draw_success(f, app, text),
        Some(Err(error)) => draw_failure(f, app, error),
        None => {}
    }
}

fn draw_success(f: &mut Frame, app: &App, text: &str) {
    let title = match app.tool {
        Tool::Post => " Your LinkedIn Post ",
        Tool::Instruction => " Your System Instruction ",
    };

    let height = (f.area().height.saturating_sub(6)).max(8);
    let area = centered_column(f.area(), height);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(hex_to_rgb(&app.theme.sub_alt)));
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let wrap_width = inner[0].width.saturating_sub(2).max(20) as usize;
    let lines: Vec<Line> = textwrap::wrap(text, Options::new(wrap_width))
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line.into_owned(),
                Style::default().fg(hex_to_rgb(&app.theme.text)),
            ))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner[0]);

    let ack = if app.copied_at.is_some() {
        Span::styled(
            "Copied!",
            Style::default()
                .fg(hex_to_rgb(&app.theme.main))
                .add_modifier(ratatui::style::Modifier::BOLD),
        )
    } else {
        Span::styled("c to copy", Style::default().fg(hex_to_rgb(&app.theme.sub)))
    };

    let status = Line::from(vec![
        Span::styled(
            format!("{} characters", text.chars().count()),
            Style::default().fg(hex_to_rgb(&app.theme.sub)),
        ),
        Span::styled("  |  ", Style::default().fg(hex_to_rgb(&app.theme.sub_alt))),
        ack,
    ]);
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), inner[1]);

    render_footer(f, app, RESULT_HINTS);
}

fn draw_failure(f: &mut Frame, app: &App, error: &AppError) {
    let title = match error {
        AppError::Configuration(_) => " API Key Required ",
        _ => " Generation Failed ",
    };

    let area = centered_column(f.area(), 8);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(hex_to_rgb(&app.theme.error)));
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Fill(1)])
        .split(area);

    let wrap_width = inner[0].width.saturating_sub(2).max(20) as usize;
    let lines: Vec<Line> = textwrap::wrap(&error.to_string(), Options::new(wrap_width))
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line.into_owned(),
                Style::default().fg(hex_to_rgb(&app.theme.text)),
            ))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner[0]);

    render_footer(f, app, ERROR_HINTS);
}
