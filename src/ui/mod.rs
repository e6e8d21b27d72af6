pub mod form;
pub mod output;
pub mod utils;
pub mod wizard;

use crate::app::App;
use crate::models::{Phase, Tool};
use crate::ui::utils::hex_to_rgb;
use ratatui::{style::Style, widgets::Block, Frame};

/// Renders the whole frame. Which panel is drawn is a pure function of the
/// app state; nothing in here mutates it.
pub fn render(f: &mut Frame, app: &App) {
    let bg_color = hex_to_rgb(&app.theme.bg);
    f.render_widget(
        Block::default().style(Style::default().bg(bg_color)),
        f.area(),
    );

    match app.phase {
        Phase::Editing => match app.tool {
            Tool::Post => form::draw(f, app),
            Tool::Instruction => wizard::draw(f, app),
        },
        Phase::Generating => output::draw_loading(f, app),
        Phase::Done => output::draw(f, app),
    }
}
