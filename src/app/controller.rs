//! Key and command dispatch
//!
//! Everything the TUI does in response to input lives here, apart from
//! drawing, so it can run without a terminal.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::command::{Command, ParseResult, parse_command};
use super::input::{Action, key_to_action};
use super::state::{AppState, InputMode, Tab};
use crate::config::Config;
use crate::generate::MAX_SENTENCES;
use crate::llm::ApiKeyManager;
use crate::session::StudySession;

/// Application state plus the study session it drives
pub struct Controller {
    pub config: Config,
    pub state: AppState,
    pub session: StudySession,
}

impl Controller {
    pub fn new(config: Config, session: StudySession) -> Self {
        let state = AppState::new(&config);
        Self { config, state, session }
    }

    /// Handle a key press, returns true if should exit
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.state.command_line.mode {
            InputMode::Command => self.handle_command_key(key.code).await,
            InputMode::Insert => {
                self.handle_insert_key(key.code);
                Ok(false)
            }
            InputMode::Normal => match key_to_action(self.state.tab, key.code, key.modifiers) {
                Some(action) => self.perform(action).await,
                None => Ok(false),
            },
        }
    }

    async fn handle_command_key(&mut self, key: KeyCode) -> Result<bool> {
        let cl = &mut self.state.command_line;
        match key {
            KeyCode::Esc => cl.exit_input_mode(),
            KeyCode::Enter => {
                let input = cl.input.take();
                cl.add_to_history(input.clone());
                cl.exit_input_mode();
                return self.run_command_line(&input).await;
            }
            KeyCode::Backspace => {
                if cl.input.is_empty() {
                    cl.exit_input_mode();
                } else {
                    cl.input.delete_char();
                }
            }
            KeyCode::Left => cl.input.move_left(),
            KeyCode::Right => cl.input.move_right(),
            KeyCode::Home => cl.input.move_start(),
            KeyCode::End => cl.input.move_end(),
            KeyCode::Up => cl.history_up(),
            KeyCode::Down => cl.history_down(),
            KeyCode::Char(c) => cl.input.insert_char(c),
            _ => {}
        }
        Ok(false)
    }

    fn handle_insert_key(&mut self, key: KeyCode) {
        if key == KeyCode::Esc {
            self.state.command_line.exit_input_mode();
            return;
        }
        if self.state.tab == Tab::Highlight {
            self.state.highlight.spans.clear();
        }
        let Some(buffer) = self.state.active_buffer() else {
            self.state.command_line.exit_input_mode();
            return;
        };
        match key {
            KeyCode::Enter => buffer.insert_char('\n'),
            KeyCode::Backspace => buffer.delete_char(),
            KeyCode::Left => buffer.move_left(),
            KeyCode::Right => buffer.move_right(),
            KeyCode::Home => buffer.move_start(),
            KeyCode::End => buffer.move_end(),
            KeyCode::Char(c) => buffer.insert_char(c),
            _ => {}
        }
    }

    /// Parse and run one command line
    pub async fn run_command_line(&mut self, input: &str) -> Result<bool> {
        match parse_command(input) {
            ParseResult::Ok(command) => self.execute(command).await,
            ParseResult::UnknownCommand(cmd) => {
                self.state.command_line.set_error(format!("Unknown command: {}", cmd));
                Ok(false)
            }
            ParseResult::MissingArgument(cmd) => {
                self.state.command_line.set_error(format!(":{} needs an argument", cmd));
                Ok(false)
            }
            ParseResult::InvalidArgument(msg) => {
                self.state.command_line.set_error(msg);
                Ok(false)
            }
        }
    }

    async fn perform(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::NextTab => self.state.tab = self.state.tab.next(),
            Action::PrevTab => self.state.tab = self.state.tab.prev(),
            Action::ScrollUp => {
                self.state.highlight.scroll = self.state.highlight.scroll.saturating_sub(1)
            }
            Action::ScrollDown => {
                self.state.highlight.scroll = self.state.highlight.scroll.saturating_add(1)
            }
            Action::EnterCommand => self.state.command_line.enter_command_mode(),
            Action::EnterInsert => self.state.command_line.enter_insert_mode(),
            Action::Help => self.state.show_help = !self.state.show_help,
            Action::Back => {
                self.state.show_help = false;
                self.state.command_line.message = None;
            }
            Action::Highlight => {
                self.execute(Command::Highlight).await?;
            }
            Action::Paste => {
                self.execute(Command::Paste).await?;
            }
            Action::Generate => {
                self.execute(Command::Generate(None)).await?;
            }
            Action::IncreaseCount => self.state.sentences.increase_count(),
            Action::DecreaseCount => self.state.sentences.decrease_count(),
            Action::ToggleMode => self.state.sentences.toggle_mode(),
            Action::ToggleView => self.state.sentences.toggle_view(),
            Action::Reveal => {
                self.execute(Command::Reveal).await?;
            }
            Action::PlayAudio => {
                self.execute(Command::Play).await?;
            }
            Action::NewQuiz => {
                self.execute(Command::Quiz).await?;
            }
            Action::PrevTone => self.state.quiz.select_prev(),
            Action::NextTone => self.state.quiz.select_next(),
            Action::ChooseTone(c) => {
                self.state.quiz.select(&c.to_string());
                self.submit_answer(&c.to_string());
            }
            Action::Submit => {
                let tone = self.state.quiz.selected();
                self.submit_answer(tone);
            }
            Action::Quit => return Ok(true),
        };
        Ok(false)
    }

    /// Execute a parsed command, returns true if should exit
    pub async fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Load(paths) => self.load(&paths),
            Command::Clear => {
                self.session.clear_vocabulary();
                self.state.highlight.spans.clear();
                self.state.quiz.feedback = None;
                self.state.command_line.set_message("Cleared all vocabulary lists");
            }
            Command::Paste => self.paste(),
            Command::Highlight => self.highlight(),
            Command::Generate(count) => {
                if let Some(count) = count {
                    self.state.sentences.count = count.clamp(1, MAX_SENTENCES);
                }
                self.generate().await;
            }
            Command::Mode(mode) => {
                self.state.sentences.mode = mode;
                self.state.command_line.set_message(format!("Sentences from {}", mode.label()));
            }
            Command::View(view) => self.state.sentences.set_view(view),
            Command::Variant(variant) => {
                self.state.quiz.variant = variant;
                self.state.command_line.set_message(format!("Quiz sentences from {}", variant.label()));
            }
            Command::Reveal => self.state.sentences.revealed = true,
            Command::Play => self.play_audio().await,
            Command::Quiz => self.new_quiz().await,
            Command::Answer(tone) => {
                self.state.quiz.select(&tone);
                self.submit_answer(&tone);
            }
            Command::ApiKey(key) => self.store_api_key(&key),
            Command::Tab(tab) => self.state.tab = tab,
            Command::Quit => return Ok(true),
            Command::Help => self.state.show_help = true,
            Command::Nop => self.state.command_line.message = None,
        }
        Ok(false)
    }

    fn load(&mut self, paths: &[PathBuf]) {
        let report = self.session.load_files(paths);
        if report.failures.is_empty() {
            self.state.command_line.set_message(report.message());
        } else {
            self.state.command_line.set_error(report.message());
        }
        // Colors and lists changed, stale spans would be misleading
        self.state.highlight.spans.clear();
    }

    fn paste(&mut self) {
        let text = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match text {
            Ok(text) => {
                self.state.highlight.buffer.insert_str(&text);
                self.state.highlight.spans.clear();
                self.state.tab = Tab::Highlight;
                self.state.command_line.set_message("Pasted clipboard text");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard read failed");
                self.state.command_line.set_error(format!("Clipboard unavailable: {}", e));
            }
        }
    }

    fn highlight(&mut self) {
        let spans = self.session.highlight(self.state.highlight.buffer.text());
        let message = if self.session.store().is_empty() {
            "Load vocabulary lists to highlight text".to_string()
        } else {
            format!("{} matches", spans.len())
        };
        self.state.highlight.spans = spans;
        self.state.command_line.set_message(message);
    }

    async fn generate(&mut self) {
        let templates = self.state.sentences.templates.lines();
        let (count, mode) = (self.state.sentences.count, self.state.sentences.mode);

        match self.session.generate(count, &templates, mode).await {
            Ok(batch) => {
                self.state.sentences.revealed = false;
                match batch.notice {
                    Some(notice) => self.state.command_line.set_error(notice),
                    None => self
                        .state
                        .command_line
                        .set_message(format!("Generated {} sentences", batch.sentences.len())),
                }
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    async fn play_audio(&mut self) {
        match self.session.play_audio().await {
            Ok(path) => {
                self.state.command_line.set_message(format!("Playing {}", path.display()))
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    async fn new_quiz(&mut self) {
        self.state.quiz.feedback = None;
        match self.session.new_quiz(self.state.quiz.variant).await {
            Ok(start) => {
                self.state.tab = Tab::Quiz;
                match start.notice {
                    Some(notice) => self.state.command_line.set_error(notice),
                    None => self.state.command_line.message = None,
                }
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    fn submit_answer(&mut self, tone: &str) {
        match self.session.check_answer(tone) {
            Ok(outcome) => {
                self.state.quiz.feedback = Some((outcome.to_string(), outcome.is_correct()));
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    fn store_api_key(&mut self, key: &str) {
        match ApiKeyManager::set_api_key(key) {
            Ok(()) => {
                self.session.refresh_client(&self.config);
                self.state.command_line.set_message(format!(
                    "API key saved ({}), sentences: {}",
                    ApiKeyManager::mask_key(key.trim()),
                    self.session.generator().service().label()
                ));
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{GenerationMode, Strategy};
    use crate::quiz::QuizVariant;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    fn controller() -> Controller {
        let session =
            StudySession::with_service(Strategy::Local, "{word}", StdRng::seed_from_u64(9));
        Controller::new(Config::default(), session)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn vocab_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("hsk.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all("word,tone\n你好,3\n学习,2\n".as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn typed_command_runs_on_enter() {
        let mut app = controller();
        app.handle_key(key(KeyCode::Char(':'))).await.unwrap();
        for c in "tab quiz".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        let quit = app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert!(!quit);
        assert_eq!(app.state.tab, Tab::Quiz);
        assert_eq!(app.state.command_line.mode, InputMode::Normal);
        assert_eq!(app.state.command_line.history, vec!["tab quiz"]);
    }

    #[tokio::test]
    async fn quit_command_exits() {
        assert!(controller().run_command_line("q").await.unwrap());
    }

    #[tokio::test]
    async fn insert_mode_edits_the_highlight_text() {
        let mut app = controller();
        app.handle_key(key(KeyCode::Char('i'))).await.unwrap();
        for c in "学习".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        assert_eq!(app.state.highlight.buffer.text(), "学习");
        assert_eq!(app.state.command_line.mode, InputMode::Normal);
    }

    #[tokio::test]
    async fn load_then_highlight() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = controller();
        app.execute(Command::Load(vec![vocab_file(&dir)])).await.unwrap();
        app.state.highlight.buffer.set("我在学习中文");
        app.execute(Command::Highlight).await.unwrap();

        assert_eq!(app.state.highlight.spans.len(), 1);
        assert_eq!(app.state.command_line.message.as_deref(), Some("1 matches"));
    }

    #[tokio::test]
    async fn load_failure_is_reported_as_error() {
        let mut app = controller();
        app.run_command_line("load /definitely/missing.csv").await.unwrap();
        assert!(app.state.command_line.is_error);
        assert!(app.session.store().is_empty());
    }

    #[tokio::test]
    async fn generate_without_vocabulary_shows_notice() {
        let mut app = controller();
        app.execute(Command::Generate(Some(3))).await.unwrap();
        assert!(app.state.command_line.is_error);
        assert_eq!(app.state.command_line.message.as_deref(), Some("Load vocabulary lists first."));
    }

    #[tokio::test]
    async fn placeholder_generation_uses_template_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = controller();
        app.execute(Command::Load(vec![vocab_file(&dir)])).await.unwrap();
        app.execute(Command::Mode(GenerationMode::Placeholder)).await.unwrap();
        app.state.sentences.templates.set("我爱{word}");
        app.execute(Command::Generate(Some(2))).await.unwrap();

        assert_eq!(app.session.sentences().len(), 2);
        assert!(app.session.sentences().iter().all(|s| s.starts_with("我爱")));
    }

    #[tokio::test]
    async fn answering_before_a_quiz_is_an_error() {
        let mut app = controller();
        app.execute(Command::Answer("3".into())).await.unwrap();
        assert_eq!(
            app.state.command_line.message.as_deref(),
            Some("No active quiz. Start one with :quiz")
        );
    }

    #[tokio::test]
    async fn quiz_flow_records_feedback() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = controller();
        app.execute(Command::Load(vec![vocab_file(&dir)])).await.unwrap();
        app.execute(Command::Variant(QuizVariant::Sampled)).await.unwrap();
        app.execute(Command::Quiz).await.unwrap();
        assert_eq!(app.state.tab, Tab::Quiz);

        let correct = app.session.quiz().current().unwrap().correct_tone.clone();
        app.handle_key(key(KeyCode::Char(correct.chars().next().unwrap()))).await.unwrap();
        assert_eq!(app.state.quiz.feedback, Some(("Correct".to_string(), true)));

        let wrong = if correct == "1" { "2" } else { "1" };
        app.execute(Command::Answer(wrong.into())).await.unwrap();
        let (text, ok) = app.state.quiz.feedback.clone().unwrap();
        assert!(!ok);
        assert_eq!(text, format!("Incorrect, correct tone is {}", correct));
    }
}
