mod app;
mod client;
mod config;
mod error;
mod models;
mod prompt;
mod ui;

use anyhow::Result;
use app::App;
use clap::{ArgAction, ArgGroup, Parser};
use client::GenClient;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::{Phase, Tool};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Parser, Debug)]
#[command(name = "drafta")]
#[command(version)]
#[command(about = "A rusty terminal generator for LinkedIn posts and system instructions", long_about = None)]
// disable the default flags so i can customize them manually below
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
#[command(group(
    ArgGroup::new("tool")
        .required(false)
        .args(&["post", "instruct"])
))]
struct Cli {
    /// Post tool: compose a LinkedIn post from a single form (default)
    #[arg(short, long, default_value_t = false, help_heading = "Tools")]
    post: bool,

    /// Instruction tool: build a reusable system instruction in five steps
    #[arg(short, long, default_value_t = false, help_heading = "Tools")]
    instruct: bool,

    /// Model to request (e.g. "gemini-pro"), overriding the config file
    #[arg(short, long)]
    model: Option<String>,

    /// Print help
    #[arg(short, long, action = ArgAction::Help, help_heading = "Flags")]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'V', long, action = ArgAction::Version, help_heading = "Flags")]
    version: Option<bool>,
}

fn main() -> Result<()> {
    // pick up GEMINI_API_KEY from a local .env before config resolution
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut app_config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config, using defaults. Error: {}",
            e
        );
        AppConfig::default()
    });

    if let Some(model) = cli.model {
        app_config.api.model = model;
    }

    let tool = if cli.instruct {
        Tool::Instruction
    } else {
        Tool::Post
    };

    let client = GenClient::new(app_config.api.clone())?;
    let mut app = App::new(tool, app_config.theme)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &client);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &GenClient,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;
        app.tick();

        if app.phase == Phase::Generating {
            // the loading frame above is on screen; this call blocks until
            // the provider answers, which is also the single-flight guard
            app.complete_generation(client);
            drain_pending_input()?;
            continue;
        }

        if event::poll(std::time::Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Keys typed while a request was in flight are not commands; drop them.
fn drain_pending_input() -> Result<()> {
    while event::poll(std::time::Duration::from_millis(0))? {
        let _ = event::read()?;
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char('q') if ctrl => app.quit(),
        KeyCode::Char('g') if ctrl => app.request_generation(),
        KeyCode::Char('n') if ctrl => app.next_step(),
        KeyCode::Char('p') if ctrl => app.prev_step(),
        KeyCode::Char('r') if ctrl => app.start_over(),
        KeyCode::Char(d @ '1'..='5') if alt => {
            app.jump_to_step(d as usize - '0' as usize);
        }
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Down => app.focus_next(),
        KeyCode::Up => app.focus_prev(),
        KeyCode::Left => app.on_left(),
        KeyCode::Right => app.on_right(),
        KeyCode::Enter => app.on_enter(),
        KeyCode::Char(c) => app.on_char(c),
        KeyCode::Backspace => app.on_backspace(),
        _ => {}
    }
}
