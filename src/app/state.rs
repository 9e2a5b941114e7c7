//! Application state definitions

use std::str::FromStr;

use crate::config::Config;
use crate::generate::{GenerationMode, MAX_SENTENCES};
use crate::highlight::HighlightSpan;
use crate::quiz::{QuizVariant, TONE_CHOICES};

/// Which tab is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Highlight,
    Sentences,
    Quiz,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Highlight, Tab::Sentences, Tab::Quiz];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Highlight => "Highlight Text",
            Tab::Sentences => "Sentence Generator",
            Tab::Quiz => "Tone Quiz",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highlight" | "text" | "1" => Ok(Tab::Highlight),
            "sentences" | "generate" | "2" => Ok(Tab::Sentences),
            "quiz" | "tones" | "3" => Ok(Tab::Quiz),
            _ => Err(format!("Unknown tab: {}. Options: highlight, sentences, quiz", s)),
        }
    }
}

/// How generated sentences are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SentenceView {
    /// Sentences are shown as text
    #[default]
    Reading,
    /// Sentences are hidden until revealed, for listening practice
    Audio,
}

impl FromStr for SentenceView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reading" | "read" | "text" => Ok(SentenceView::Reading),
            "audio" | "listen" | "listening" => Ok(SentenceView::Audio),
            _ => Err(format!("Unknown view: {}. Options: reading, audio", s)),
        }
    }
}

/// Editable text with a character-indexed cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    /// Cursor position in characters
    cursor: usize,
}

impl TextBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the content, cursor at the end
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the content, leaving the buffer empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.text.len())
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Insert text at the cursor, e.g. from the clipboard
    pub fn insert_str(&mut self, s: &str) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.text.insert_str(byte_idx, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.text.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Non-blank lines, trimmed
    pub fn lines(&self) -> Vec<String> {
        self.text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect()
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys trigger actions
    #[default]
    Normal,
    /// Accepting a `:` command
    Command,
    /// Typing into the current tab's text area
    Insert,
}

/// State for the command line at the bottom of the screen
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    pub mode: InputMode,
    /// Command being typed
    pub input: TextBuffer,
    /// Status or error message shown in normal mode
    pub message: Option<String>,
    pub is_error: bool,
    /// Submitted commands, oldest first
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 200;

    pub fn enter_command_mode(&mut self) {
        self.mode = InputMode::Command;
        self.input.clear();
        self.message = None;
        self.history_index = None;
    }

    pub fn enter_insert_mode(&mut self) {
        self.mode = InputMode::Insert;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(index);
        self.input.set(self.history[index].clone());
    }

    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input.set(self.history[i + 1].clone());
            } else {
                self.history_index = None;
                self.input.clear();
            }
        }
    }
}

/// Highlight tab state
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    pub buffer: TextBuffer,
    /// Spans from the last highlight pass; cleared whenever the text changes
    pub spans: Vec<HighlightSpan>,
    pub scroll: u16,
}

/// Sentence tab state
#[derive(Debug, Clone)]
pub struct SentenceState {
    /// User templates for placeholder mode, one per line
    pub templates: TextBuffer,
    pub count: usize,
    pub mode: GenerationMode,
    pub view: SentenceView,
    /// Whether sentences are visible in audio view
    pub revealed: bool,
}

impl SentenceState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            templates: TextBuffer::default(),
            count: config.sentence_count.clamp(1, MAX_SENTENCES),
            mode: config.generation_mode,
            view: SentenceView::Reading,
            revealed: false,
        }
    }

    pub fn increase_count(&mut self) {
        self.count = (self.count + 1).min(MAX_SENTENCES);
    }

    pub fn decrease_count(&mut self) {
        self.count = self.count.saturating_sub(1).max(1);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            GenerationMode::FixedForm => GenerationMode::Placeholder,
            GenerationMode::Placeholder => GenerationMode::FixedForm,
        };
    }

    pub fn set_view(&mut self, view: SentenceView) {
        self.view = view;
        self.revealed = false;
    }

    pub fn toggle_view(&mut self) {
        self.set_view(match self.view {
            SentenceView::Reading => SentenceView::Audio,
            SentenceView::Audio => SentenceView::Reading,
        });
    }

    /// Whether the sentence text should be drawn
    pub fn text_visible(&self) -> bool {
        self.view == SentenceView::Reading || self.revealed
    }
}

/// Quiz tab state
#[derive(Debug, Clone, Default)]
pub struct QuizState {
    pub variant: QuizVariant,
    /// Index into [`TONE_CHOICES`]
    pub selected_tone: usize,
    /// Last grading result and whether it was correct
    pub feedback: Option<(String, bool)>,
}

impl QuizState {
    pub fn selected(&self) -> &'static str {
        TONE_CHOICES[self.selected_tone.min(TONE_CHOICES.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected_tone = (self.selected_tone + 1) % TONE_CHOICES.len();
    }

    pub fn select_prev(&mut self) {
        self.selected_tone = (self.selected_tone + TONE_CHOICES.len() - 1) % TONE_CHOICES.len();
    }

    /// Select a tone by label, returns false for unknown labels
    pub fn select(&mut self, tone: &str) -> bool {
        match TONE_CHOICES.iter().position(|t| *t == tone) {
            Some(i) => {
                self.selected_tone = i;
                true
            }
            None => false,
        }
    }
}

/// Full application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Tab,
    pub highlight: HighlightState,
    pub sentences: SentenceState,
    pub quiz: QuizState,
    pub command_line: CommandLineState,
    pub show_help: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tab: Tab::default(),
            highlight: HighlightState::default(),
            sentences: SentenceState::from_config(config),
            quiz: QuizState { variant: config.quiz_variant, ..Default::default() },
            command_line: CommandLineState::default(),
            show_help: false,
        }
    }

    /// The text area typed into by insert mode on the current tab
    pub fn active_buffer(&mut self) -> Option<&mut TextBuffer> {
        match self.tab {
            Tab::Highlight => Some(&mut self.highlight.buffer),
            Tab::Sentences => Some(&mut self.sentences.templates),
            Tab::Quiz => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tabs_cycle_both_ways() {
        assert_eq!(Tab::Highlight.next(), Tab::Sentences);
        assert_eq!(Tab::Quiz.next(), Tab::Highlight);
        assert_eq!(Tab::Highlight.prev(), Tab::Quiz);
        assert_eq!("quiz".parse::<Tab>(), Ok(Tab::Quiz));
    }

    #[test]
    fn text_buffer_edits_by_character() {
        let mut buffer = TextBuffer::default();
        buffer.insert_str("学中文");
        buffer.move_left();
        buffer.insert_char('习');
        assert_eq!(buffer.text(), "学中习文");
        buffer.move_start();
        buffer.delete_char();
        assert_eq!(buffer.text(), "学中习文");
        buffer.move_end();
        buffer.delete_char();
        assert_eq!(buffer.text(), "学中习");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn text_buffer_lines_skip_blanks() {
        let mut buffer = TextBuffer::default();
        buffer.set("我喜欢{word}\n\n  {word}很好  \n");
        assert_eq!(buffer.lines(), vec!["我喜欢{word}", "{word}很好"]);
    }

    #[test]
    fn sentence_count_stays_in_range() {
        let mut state = SentenceState::from_config(&Config::default());
        state.count = 1;
        state.decrease_count();
        assert_eq!(state.count, 1);
        state.count = MAX_SENTENCES;
        state.increase_count();
        assert_eq!(state.count, MAX_SENTENCES);
    }

    #[test]
    fn audio_view_hides_text_until_revealed() {
        let mut state = SentenceState::from_config(&Config::default());
        assert!(state.text_visible());
        state.toggle_view();
        assert!(!state.text_visible());
        state.revealed = true;
        assert!(state.text_visible());
        state.toggle_view();
        assert_eq!(state.view, SentenceView::Reading);
    }

    #[test]
    fn tone_selection_wraps() {
        let mut quiz = QuizState::default();
        quiz.select_prev();
        assert_eq!(quiz.selected(), "5");
        quiz.select_next();
        assert_eq!(quiz.selected(), "1");
        assert!(quiz.select("3"));
        assert!(!quiz.select("9"));
        assert_eq!(quiz.selected(), "3");
    }

    #[test]
    fn history_navigation() {
        let mut cl = CommandLineState::default();
        cl.add_to_history("load a.csv".into());
        cl.add_to_history("quiz".into());
        cl.history_up();
        assert_eq!(cl.input.text(), "quiz");
        cl.history_up();
        assert_eq!(cl.input.text(), "load a.csv");
        cl.history_down();
        assert_eq!(cl.input.text(), "quiz");
        cl.history_down();
        assert!(cl.input.is_empty());
    }
}
