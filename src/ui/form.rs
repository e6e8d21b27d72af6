use crate::app::App;
use crate::models::{context_strength, Length, Style as PostStyle, Tone};
use crate::ui::utils::{
    centered_column, hex_to_rgb, render_footer, render_header, render_selector,
    render_text_field,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HINTS: &str =
    "tab: next field | \u{2190}/\u{2192}: choose | ctrl+g: generate | ctrl+r: reset | esc: quit";

/// The post composer's single form panel.
pub fn draw(f: &mut Frame, app: &App) {
    render_header(f, app);

    // 5 text rows, a counter row, a gap, 3 selector rows
    let area = centered_column(f.area(), 10);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // topic
            Constraint::Length(1), // counter
            Constraint::Length(1), // audience
            Constraint::Length(1), // key message
            Constraint::Length(1), // experience
            Constraint::Length(1), // industry
            Constraint::Length(1),
            Constraint::Length(1), // tone
            Constraint::Length(1), // length
            Constraint::Length(1), // style
        ])
        .split(area);

    let theme = &app.theme;
    render_text_field(f, rows[0], "Topic", &app.post.topic, app.focus == 0, theme);

    let chars = app.post.topic.chars().count();
    let counter = Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:<20}", ""),
            Style::default().fg(hex_to_rgb(&theme.sub)),
        ),
        Span::styled(
            format!("{} chars - {}", chars, context_strength(chars)),
            Style::default().fg(hex_to_rgb(&theme.sub_alt)),
        ),
    ]);
    f.render_widget(Paragraph::new(counter), rows[1]);

    render_text_field(
        f,
        rows[2],
        "Target audience",
        &app.post.target_audience,
        app.focus == 1,
        theme,
    );
    render_text_field(
        f,
        rows[3],
        "Key message",
        &app.post.key_message,
        app.focus == 2,
        theme,
    );
    render_text_field(
        f,
        rows[4],
        "Personal experience",
        &app.post.personal_experience,
        app.focus == 3,
        theme,
    );
    render_text_field(
        f,
        rows[5],
        "Industry context",
        &app.post.industry_context,
        app.focus == 4,
        theme,
    );

    let tone_options: Vec<&str> = Tone::ALL.iter().map(|t| t.as_str()).collect();
    render_selector(
        f,
        rows[7],
        "Tone",
        &tone_options,
        app.post.tone.as_str(),
        app.focus == 5,
        theme,
    );

    let length_options: Vec<&str> = Length::ALL.iter().map(|l| l.as_str()).collect();
    render_selector(
        f,
        rows[8],
        "Length",
        &length_options,
        app.post.length.as_str(),
        app.focus == 6,
        theme,
    );

    let style_options: Vec<&str> = PostStyle::ALL.iter().map(|s| s.as_str()).collect();
    render_selector(
        f,
        rows[9],
        "Engagement style",
        &style_options,
        app.post.style.as_str(),
        app.focus == 7,
        theme,
    );

    render_footer(f, app, HINTS);
}
