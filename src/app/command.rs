//! Command parsing for the command line

use std::path::PathBuf;

use super::state::{SentenceView, Tab};
use crate::generate::GenerationMode;
use crate::quiz::QuizVariant;

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load vocabulary files: :load a.csv b.csv
    Load(Vec<PathBuf>),
    /// Drop all loaded vocabulary: :clear
    Clear,
    /// Paste the clipboard into the highlight text: :paste
    Paste,
    /// Highlight the current text: :highlight
    Highlight,
    /// Generate sentences: :generate [count]
    Generate(Option<usize>),
    /// Switch the sentence source: :mode forms|templates
    Mode(GenerationMode),
    /// Switch the sentence view: :view reading|audio
    View(SentenceView),
    /// Switch how quiz sentences are built: :variant forms|sampled
    Variant(QuizVariant),
    /// Show hidden sentences in audio view: :reveal
    Reveal,
    /// Read the sentences aloud: :play
    Play,
    /// Start a new quiz question: :quiz
    Quiz,
    /// Answer the quiz: :answer <tone>
    Answer(String),
    /// Store the API key in the keyring: :api-key <key>
    ApiKey(String),
    /// Switch tab: :tab <name>
    Tab(Tab),
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument could not be understood
    InvalidArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "load" | "l" | "open" => {
            if args.is_empty() {
                ParseResult::MissingArgument("load".to_string())
            } else {
                ParseResult::Ok(Command::Load(args.split_whitespace().map(PathBuf::from).collect()))
            }
        }
        "clear" => ParseResult::Ok(Command::Clear),
        "paste" | "p" => ParseResult::Ok(Command::Paste),
        "highlight" | "hl" => ParseResult::Ok(Command::Highlight),
        "generate" | "gen" | "g" => {
            if args.is_empty() {
                ParseResult::Ok(Command::Generate(None))
            } else {
                match args.parse::<usize>() {
                    Ok(n) => ParseResult::Ok(Command::Generate(Some(n))),
                    Err(_) => ParseResult::InvalidArgument(format!("Not a count: {}", args)),
                }
            }
        }
        "mode" => parse_arg("mode", args, Command::Mode),
        "view" => parse_arg("view", args, Command::View),
        "variant" => parse_arg("variant", args, Command::Variant),
        "tab" | "t" => parse_arg("tab", args, Command::Tab),
        "reveal" | "r" => ParseResult::Ok(Command::Reveal),
        "play" | "audio" => ParseResult::Ok(Command::Play),
        "quiz" | "new" => ParseResult::Ok(Command::Quiz),
        "answer" | "a" => {
            if args.is_empty() {
                ParseResult::MissingArgument("answer".to_string())
            } else {
                ParseResult::Ok(Command::Answer(args.to_string()))
            }
        }
        "api-key" | "key" => {
            if args.is_empty() {
                ParseResult::MissingArgument("api-key".to_string())
            } else {
                ParseResult::Ok(Command::ApiKey(args.to_string()))
            }
        }
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

/// Parse a single `FromStr` argument into a command
fn parse_arg<T, F>(name: &str, args: &str, build: F) -> ParseResult
where
    T: std::str::FromStr<Err = String>,
    F: FnOnce(T) -> Command,
{
    if args.is_empty() {
        return ParseResult::MissingArgument(name.to_string());
    }
    match args.parse::<T>() {
        Ok(value) => ParseResult::Ok(build(value)),
        Err(e) => ParseResult::InvalidArgument(e),
    }
}

/// Lines shown by :help
pub const HELP_LINES: &[(&str, &str)] = &[
    (":load <file.csv>...", "Load vocabulary lists"),
    (":clear", "Remove all vocabulary lists"),
    (":paste", "Paste clipboard text into the highlight tab"),
    (":highlight", "Highlight vocabulary in the text"),
    (":generate [n]", "Generate n practice sentences"),
    (":mode forms|templates", "Choose the sentence source"),
    (":view reading|audio", "Show sentences or hide them for listening"),
    (":reveal / :play", "Reveal hidden sentences / read them aloud"),
    (":quiz", "Start a new tone question"),
    (":answer <tone>", "Answer the current question"),
    (":variant forms|sampled", "Choose how quiz sentences are built"),
    (":api-key <key>", "Store the API key in the system keyring"),
    (":tab <name>", "Switch to highlight, sentences or quiz"),
    (":q", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command("q"), ParseResult::Ok(Command::Quit));
        assert_eq!(parse_command("QUIT"), ParseResult::Ok(Command::Quit));
    }

    #[test]
    fn parse_load_with_several_files() {
        assert_eq!(
            parse_command("load hsk1.csv  hsk2.csv"),
            ParseResult::Ok(Command::Load(vec![
                PathBuf::from("hsk1.csv"),
                PathBuf::from("hsk2.csv")
            ]))
        );
    }

    #[test]
    fn parse_load_missing_arg() {
        assert!(matches!(parse_command("load"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_generate_count() {
        assert_eq!(parse_command("gen"), ParseResult::Ok(Command::Generate(None)));
        assert_eq!(parse_command("generate 8"), ParseResult::Ok(Command::Generate(Some(8))));
        assert!(matches!(parse_command("generate lots"), ParseResult::InvalidArgument(_)));
    }

    #[test]
    fn parse_mode_and_view() {
        assert_eq!(
            parse_command("mode templates"),
            ParseResult::Ok(Command::Mode(GenerationMode::Placeholder))
        );
        assert_eq!(
            parse_command("view audio"),
            ParseResult::Ok(Command::View(SentenceView::Audio))
        );
        assert!(matches!(parse_command("view loud"), ParseResult::InvalidArgument(_)));
        assert!(matches!(parse_command("mode"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_answer_keeps_argument() {
        assert_eq!(parse_command("answer 3"), ParseResult::Ok(Command::Answer("3".to_string())));
        assert!(matches!(parse_command("a"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_tab() {
        assert_eq!(parse_command("tab quiz"), ParseResult::Ok(Command::Tab(Tab::Quiz)));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_command("unknown"), ParseResult::UnknownCommand(_)));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert_eq!(parse_command(""), ParseResult::Ok(Command::Nop));
        assert_eq!(parse_command("   "), ParseResult::Ok(Command::Nop));
    }
}
