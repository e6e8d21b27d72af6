use crate::app::App;
use crate::models::TOTAL_STEPS;
use crate::ui::utils::{
    centered_column, hex_to_rgb, render_footer, render_header, render_text_field,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HINTS: &str = "enter: next | ctrl+p: back | alt+1..5: jump | ctrl+g: generate | ctrl+r: start over | esc: quit";

const STEP_TITLES: [&str; TOTAL_STEPS] = [
    "Objective",
    "Audience",
    "Format",
    "Must do",
    "Must not",
];

const STEP_LEADS: [&str; TOTAL_STEPS] = [
    "What should the assistant accomplish? (required)",
    "Who will be talking to it?",
    "How should its answers be shaped?",
    "Up to three things it must always do",
    "Up to three things it must never do",
];

/// One wizard step: stepper, lead line, and the step's input rows.
pub fn draw(f: &mut Frame, app: &App) {
    render_header(f, app);

    let area = centered_column(f.area(), 9);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // stepper
            Constraint::Length(1),
            Constraint::Length(1), // lead
            Constraint::Length(1),
            Constraint::Length(1), // field 1
            Constraint::Length(1), // field 2
            Constraint::Length(1), // field 3
            Constraint::Length(1),
            Constraint::Length(1), // progress
        ])
        .split(area);

    f.render_widget(Paragraph::new(stepper_line(app)), rows[0]);

    f.render_widget(
        Paragraph::new(STEP_LEADS[app.step - 1])
            .style(Style::default().fg(hex_to_rgb(&app.theme.sub))),
        rows[2],
    );

    let theme = &app.theme;
    match app.step {
        1 => render_text_field(
            f,
            rows[4],
            "Primary objective",
            &app.wizard.primary_objective,
            app.focus == 0,
            theme,
        ),
        2 => render_text_field(
            f,
            rows[4],
            "Target audience",
            &app.wizard.target_audience,
            app.focus == 0,
            theme,
        ),
        3 => render_text_field(
            f,
            rows[4],
            "Output format",
            &app.wizard.output_format,
            app.focus == 0,
            theme,
        ),
        4 => {
            for (i, entry) in app.wizard.must_do.iter().enumerate() {
                render_text_field(
                    f,
                    rows[4 + i],
                    &format!("Rule {}", i + 1),
                    entry,
                    app.focus == i,
                    theme,
                );
            }
        }
        _ => {
            for (i, entry) in app.wizard.must_not.iter().enumerate() {
                render_text_field(
                    f,
                    rows[4 + i],
                    &format!("Rule {}", i + 1),
                    entry,
                    app.focus == i,
                    theme,
                );
            }
        }
    }

    let progress = Paragraph::new(format!("step {} / {}", app.step, TOTAL_STEPS))
        .style(Style::default().fg(hex_to_rgb(&theme.sub_alt)))
        .alignment(Alignment::Right);
    f.render_widget(progress, rows[8]);

    render_footer(f, app, HINTS);
}

/// The step-nav line. Every entry is a jump target (alt+digit), the current
/// one carries the brand color.
fn stepper_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, title) in STEP_TITLES.iter().enumerate() {
        let step = i + 1;
        if i > 0 {
            spans.push(Span::styled(
                "  ",
                Style::default().fg(hex_to_rgb(&app.theme.sub_alt)),
            ));
        }
        let style = if step == app.step {
            Style::default()
                .fg(hex_to_rgb(&app.theme.main))
                .add_modifier(ratatui::style::Modifier::BOLD)
        } else {
            Style::default().fg(hex_to_rgb(&app.theme.sub))
        };
        spans.push(Span::styled(format!("{} {}", step, title), style));
    }
    Line::from(spans)
}
