use crate::client::GenClient;
use crate::config::Theme;
use crate::error::AppError;
use crate::models::{
    wizard_fields, InstructionForm, Phase, PostForm, Tool, TOTAL_STEPS,
};
use crate::prompt;
use anyhow::Result;
use arboard::Clipboard;
use std::time::{Duration, Instant};

const FLASH_TTL: Duration = Duration::from_secs(3);
const COPY_ACK_TTL: Duration = Duration::from_secs(2);

/// Index layout of the post form's focusable rows.
const POST_FIELDS: usize = 8;
const POST_TONE_ROW: usize = 5;
const POST_LENGTH_ROW: usize = 6;
const POST_STYLE_ROW: usize = 7;

pub struct App {
    pub should_quit: bool,
    pub tool: Tool,
    pub phase: Phase,
    pub theme: Theme,

    pub post: PostForm,
    pub wizard: InstructionForm,

    /// Wizard navigation state, clamped to [1, TOTAL_STEPS].
    pub step: usize,
    /// Focused field within the visible panel.
    pub focus: usize,

    /// Result of the last finished attempt, rendered while `phase == Done`.
    pub outcome: Option<Result<String, AppError>>,
    /// Transient notice (validation, clipboard failure), cleared by tick.
    pub flash: Option<(String, Instant)>,
    /// Set on a successful copy; "Copied!" reverts when it expires.
    pub copied_at: Option<Instant>,

    post_system: String,
    architect_template: String,
}

impl App {
    pub fn new(tool: Tool, theme: Theme) -> Result<Self> {
        let post_system = prompt::template(prompt::POST_SYSTEM)?;
        let architect_template = prompt::template(prompt::INSTRUCTION_TEMPLATE)?;

        Ok(Self {
            should_quit: false,
            tool,
            phase: Phase::Editing,
            theme,
            post: PostForm::default(),
            wizard: InstructionForm::default(),
            step: 1,
            focus: 0,
            outcome: None,
            flash: None,
            copied_at: None,
            post_system,
            architect_template,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Expires timed UI state. Runs once per frame.
    pub fn tick(&mut self) {
        if self
            .flash
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= FLASH_TTL)
        {
            self.flash = None;
        }
        if self.copied_at.is_some_and(|at| at.elapsed() >= COPY_ACK_TTL) {
            self.copied_at = None;
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.flash = Some((message.into(), Instant::now()));
    }

    /* ---------- focus & editing ---------- */

    pub fn field_count(&self) -> usize {
        match self.tool {
            Tool::Post => POST_FIELDS,
            Tool::Instruction => wizard_fields(self.step),
        }
    }

    pub fn focus_next(&mut self) {
        if self.phase == Phase::Editing {
            self.focus = (self.focus + 1) % self.field_count();
        }
    }

    pub fn focus_prev(&mut self) {
        if self.phase == Phase::Editing {
            let count = self.field_count();
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// The text buffer behind the focused field, if it is a text field.
    fn active_buffer(&mut self) -> Option<&mut String> {
        match self.tool {
            Tool::Post => match self.focus {
                0 => Some(&mut self.post.topic),
                1 => Some(&mut self.post.target_audience),
                2 => Some(&mut self.post.key_message),
                3 => Some(&mut self.post.personal_experience),
                4 => Some(&mut self.post.industry_context),
                _ => None,
            },
            Tool::Instruction => match (self.step, self.focus) {
                (1, 0) => Some(&mut self.wizard.primary_objective),
                (2, 0) => Some(&mut self.wizard.target_audience),
                (3, 0) => Some(&mut self.wizard.output_format),
                (4, i) if i < 3 => Some(&mut self.wizard.must_do[i]),
                (5, i) if i < 3 => Some(&mut self.wizard.must_not[i]),
                _ => None,
            },
        }
    }

    pub fn on_char(&mut self, c: char) {
        match self.phase {
            Phase::Editing => {
                if let Some(buffer) = self.active_buffer() {
                    buffer.push(c);
                }
            }
            Phase::Done => match c {
                'c' => self.copy_result(),
                'r' => self.regenerate(),
                'e' => self.back_to_edit(),
                _ => {}
            },
            Phase::Generating => {}
        }
    }

    pub fn on_backspace(&mut self) {
        if self.phase != Phase::Editing {
            return;
        }
        if let Some(buffer) = self.active_buffer() {
            buffer.pop();
        }
    }

    /// Left/right cycle the selector rows of the post form.
    pub fn on_left(&mut self) {
        self.cycle_selector(false);
    }

    pub fn on_right(&mut self) {
        self.cycle_selector(true);
    }

    fn cycle_selector(&mut self, forward: bool) {
        if self.phase != Phase::Editing || self.tool != Tool::Post {
            return;
        }
        match self.focus {
            POST_TONE_ROW => {
                self.post.tone = if forward {
                    self.post.tone.next()
                } else {
                    self.post.tone.prev()
                };
            }
            POST_LENGTH_ROW => {
                self.post.length = if forward {
                    self.post.length.next()
                } else {
                    self.post.length.prev()
                };
            }
            POST_STYLE_ROW => {
                self.post.style = if forward {
                    self.post.style.next()
                } else {
                    self.post.style.prev()
                };
            }
            _ => {}
        }
    }

    pub fn on_enter(&mut self) {
        if self.phase != Phase::Editing {
            return;
        }
        match self.tool {
            Tool::Post => self.focus_next(),
            Tool::Instruction => self.next_step(),
        }
    }

    /* ---------- wizard navigation ---------- */

    pub fn next_step(&mut self) {
        if self.tool != Tool::Instruction || self.phase != Phase::Editing {
            return;
        }
        self.commit_step();
        if self.step < TOTAL_STEPS {
            self.step += 1;
            self.focus = 0;
        }
    }

    pub fn prev_step(&mut self) {
        if self.tool != Tool::Instruction || self.phase != Phase::Editing {
            return;
        }
        self.commit_step();
        if self.step > 1 {
            self.step -= 1;
            self.focus = 0;
        }
    }

    pub fn jump_to_step(&mut self, step: usize) {
        if self.tool != Tool::Instruction || self.phase != Phase::Editing {
            return;
        }
        self.commit_step();
        self.step = step.clamp(1, TOTAL_STEPS);
        self.focus = 0;
    }

    /// Trims the visible step's values into the record so navigating away
    /// never loses data. Buffers are the record, so trimming is the commit.
    fn commit_step(&mut self) {
        match self.step {
            1 => trim(&mut self.wizard.primary_objective),
            2 => trim(&mut self.wizard.target_audience),
            3 => trim(&mut self.wizard.output_format),
            4 => self.wizard.must_do.iter_mut().for_each(trim),
            5 => self.wizard.must_not.iter_mut().for_each(trim),
            _ => {}
        }
    }

    /* ---------- generation ---------- */

    /// Checks the active record's required field, trimming as it reads.
    fn validate(&mut self) -> Result<(), AppError> {
        match self.tool {
            Tool::Post => {
                self.post.trim_fields();
                if self.post.topic.is_empty() {
                    return Err(AppError::Validation(
                        "A topic is required before generating.".to_string(),
                    ));
                }
            }
            Tool::Instruction => {
                self.commit_step();
                self.wizard.trim_fields();
                if self.wizard.primary_objective.is_empty() {
                    return Err(AppError::Validation(
                        "A primary objective is required before generating.".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validates, then arms the Generating phase. The event loop draws the
    /// loading panel and calls `complete_generation`; not processing input
    /// during the blocking call is the whole single-flight story. A failed
    /// validation never reaches the prompt builder or the network.
    pub fn request_generation(&mut self) {
        if self.phase == Phase::Generating {
            return;
        }
        if let Err(error) = self.validate() {
            self.phase = Phase::Editing;
            self.focus = 0;
            // the wizard's required field lives on step 1
            if self.tool == Tool::Instruction {
                self.step = 1;
            }
            self.notify(error.to_string());
            return;
        }
        self.copied_at = None;
        self.phase = Phase::Generating;
    }

    /// Runs the blocking network call and lands in Done. Only called while
    /// `phase == Generating`, after the loading frame is on screen.
    pub fn complete_generation(&mut self, client: &GenClient) {
        let result = match self.tool {
            Tool::Post => client.generate(
                Some(&self.post_system),
                &prompt::post::build(&self.post),
            ),
            Tool::Instruction => client.generate(
                None,
                &prompt::instruction::build(&self.wizard, &self.architect_template),
            ),
        };
        self.outcome = Some(result);
        self.phase = Phase::Done;
    }

    pub fn regenerate(&mut self) {
        if self.phase == Phase::Done {
            self.request_generation();
        }
    }

    pub fn back_to_edit(&mut self) {
        if self.phase == Phase::Done {
            self.outcome = None;
            self.copied_at = None;
            self.phase = Phase::Editing;
        }
    }

    pub fn start_over(&mut self) {
        if self.phase == Phase::Generating {
            return;
        }
        self.post = PostForm::default();
        self.wizard = InstructionForm::default();
        self.step = 1;
        self.focus = 0;
        self.outcome = None;
        self.flash = None;
        self.copied_at = None;
        self.phase = Phase::Editing;
    }

    /* ---------- clipboard ---------- */

    pub fn copy_result(&mut self) {
        let Some(Ok(text)) = &self.outcome else {
            return;
        };
        let text = text.clone();
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            // a fresh copy restarts the acknowledgment window
            Ok(()) => self.copied_at = Some(Instant::now()),
            Err(e) => self.notify(format!("Copy failed: {}", e)),
        }
    }
}

fn trim(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard_app() -> App {
        App::new(Tool::Instruction, Theme::default()).unwrap()
    }

    fn post_app() -> App {
        App::new(Tool::Post, Theme::default()).unwrap()
    }

    #[test]
    fn test_prev_twice_from_step_three_lands_on_one() {
        let mut app = wizard_app();
        app.jump_to_step(3);
        app.prev_step();
        app.prev_step();
        assert_eq!(app.step, 1);
    }

    #[test]
    fn test_prev_at_first_step_is_a_noop() {
        let mut app = wizard_app();
        app.prev_step();
        assert_eq!(app.step, 1);
    }

    #[test]
    fn test_next_at_last_step_is_a_noop() {
        let mut app = wizard_app();
        app.jump_to_step(5);
        app.next_step();
        assert_eq!(app.step, 5);
    }

    #[test]
    fn test_jump_clamps_out_of_range_steps() {
        let mut app = wizard_app();
        app.jump_to_step(99);
        assert_eq!(app.step, 5);
        app.jump_to_step(0);
        assert_eq!(app.step, 1);
    }

    #[test]
    fn test_navigation_commits_trimmed_values() {
        let mut app = wizard_app();
        app.on_char(' ');
        for c in "Review code ".chars() {
            app.on_char(c);
        }
        app.next_step();
        assert_eq!(app.wizard.primary_objective, "Review code");
        app.prev_step();
        assert_eq!(app.step, 1);
        assert_eq!(app.wizard.primary_objective, "Review code");
    }

    #[test]
    fn test_blank_topic_takes_validation_path() {
        let mut app = post_app();
        app.post.topic = "   ".to_string();
        app.request_generation();
        assert_eq!(app.phase, Phase::Editing);
        assert!(app.outcome.is_none());
        let (message, _) = app.flash.as_ref().unwrap();
        assert!(message.contains("topic"));
    }

    #[test]
    fn test_blank_objective_forces_step_one() {
        let mut app = wizard_app();
        app.jump_to_step(4);
        app.request_generation();
        assert_eq!(app.phase, Phase::Editing);
        assert_eq!(app.step, 1);
        assert!(app.outcome.is_none());
    }

    #[test]
    fn test_valid_form_arms_generation() {
        let mut app = post_app();
        app.post.topic = "AI in hiring".to_string();
        app.request_generation();
        assert_eq!(app.phase, Phase::Generating);
    }

    #[test]
    fn test_missing_key_lands_in_configuration_error() {
        let mut app = post_app();
        app.post.topic = "AI in hiring".to_string();
        app.request_generation();
        assert_eq!(app.phase, Phase::Generating);

        // no key configured: the client refuses before touching the network
        let client = GenClient::new(crate::config::ApiConfig::default()).unwrap();
        app.complete_generation(&client);
        assert_eq!(app.phase, Phase::Done);
        assert!(matches!(
            app.outcome,
            Some(Err(AppError::Configuration(_)))
        ));
    }

    #[test]
    fn test_typing_reaches_the_focused_field() {
        let mut app = post_app();
        for c in "Hi".chars() {
            app.on_char(c);
        }
        app.focus_next();
        for c in "CTOs".chars() {
            app.on_char(c);
        }
        assert_eq!(app.post.topic, "Hi");
        assert_eq!(app.post.target_audience, "CTOs");
        app.on_backspace();
        assert_eq!(app.post.target_audience, "CTO");
    }

    #[test]
    fn test_selector_rows_cycle_not_type() {
        let mut app = post_app();
        app.focus = 6; // length row
        app.on_char('x');
        assert!(app.post.topic.is_empty());
        app.on_right();
        assert_eq!(app.post.length, crate::models::Length::Long);
        app.on_left();
        app.on_left();
        assert_eq!(app.post.length, crate::models::Length::Short);
    }

    #[test]
    fn test_focus_wraps_within_panel() {
        let mut app = wizard_app();
        app.jump_to_step(4);
        assert_eq!(app.field_count(), 3);
        app.focus_next();
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus, 0);
        app.focus_prev();
        assert_eq!(app.focus, 2);
    }

    #[test]
    fn test_start_over_resets_everything() {
        let mut app = wizard_app();
        app.wizard.primary_objective = "x".to_string();
        app.wizard.must_do[1] = "y".to_string();
        app.jump_to_step(4);
        app.outcome = Some(Ok("generated".to_string()));
        app.phase = Phase::Done;
        app.start_over();
        assert_eq!(app.step, 1);
        assert_eq!(app.phase, Phase::Editing);
        assert!(app.wizard.primary_objective.is_empty());
        assert!(app.wizard.must_do[1].is_empty());
        assert!(app.outcome.is_none());
    }

    #[test]
    fn test_done_phase_ignores_text_entry() {
        let mut app = post_app();
        app.post.topic = "AI".to_string();
        app.phase = Phase::Done;
        app.outcome = Some(Ok("post".to_string()));
        app.on_char('x');
        assert_eq!(app.post.topic, "AI");
    }

    #[test]
    fn test_back_to_edit_clears_outcome() {
        let mut app = post_app();
        app.phase = Phase::Done;
        app.outcome = Some(Err(AppError::Generation("boom".to_string())));
        app.back_to_edit();
        assert_eq!(app.phase, Phase::Editing);
        assert!(app.outcome.is_none());
    }
}
