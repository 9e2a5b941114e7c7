use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shengci::generate::GenerationMode;
use shengci::quiz::QuizVariant;
use shengci::{App, Config, StudySession};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shengci")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Vocabulary CSV files to load at startup
    vocab: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the vocabulary words found in a text
    Highlight {
        /// Vocabulary CSV files
        #[arg(short, long = "vocab", required = true)]
        vocab: Vec<PathBuf>,
        /// Text to scan, read from stdin when absent
        text: Option<String>,
    },
    /// Print a batch of practice sentences
    Generate {
        /// Vocabulary CSV files
        #[arg(short, long = "vocab", required = true)]
        vocab: Vec<PathBuf>,
        /// Number of sentences (1-20)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Sentence source: forms or templates
        #[arg(short, long)]
        mode: Option<GenerationMode>,
        /// File with one template per line
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },
    /// Ask one tone question on the terminal
    Quiz {
        /// Vocabulary CSV files with a tone column
        #[arg(short, long = "vocab", required = true)]
        vocab: Vec<PathBuf>,
        /// How the sentence is built: forms or sampled
        #[arg(long)]
        variant: Option<QuizVariant>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Highlight { vocab, text }) => {
            init_logging(None)?;
            let session = load_session(&config, &vocab);
            let text = match text {
                Some(text) => text,
                None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
            };
            for span in session.highlight(&text) {
                println!("{}\t{}\t{}..{}", span.word, span.list_name, span.start, span.end);
            }
        }
        Some(Commands::Generate { vocab, count, mode, templates }) => {
            init_logging(None)?;
            let mut session = load_session(&config, &vocab);
            let templates = match templates {
                Some(path) => read_templates(&path)?,
                None => Vec::new(),
            };
            let batch = session
                .generate(
                    count.unwrap_or(config.sentence_count),
                    &templates,
                    mode.unwrap_or(config.generation_mode),
                )
                .await?;
            if let Some(notice) = batch.notice {
                eprintln!("{}", notice);
            }
            for (i, sentence) in batch.sentences.iter().enumerate() {
                println!("{:>2}. {}", i + 1, sentence);
            }
        }
        Some(Commands::Quiz { vocab, variant }) => {
            init_logging(None)?;
            let mut session = load_session(&config, &vocab);
            let start = session.new_quiz(variant.unwrap_or(config.quiz_variant)).await?;
            if let Some(notice) = start.notice {
                eprintln!("{}", notice);
            }
            println!("{}", start.question.sentence);
            print!("Tone of {} (1-5): ", start.question.target_word);
            io::stdout().flush()?;

            let mut answer = String::new();
            io::stdin().lock().read_line(&mut answer).context("Failed to read answer")?;
            println!("{}", session.check_answer(answer.trim())?);
        }
        None => {
            init_logging(Some(&Config::log_path()?))?;
            let session = load_session(&config, &cli.vocab);
            let mut app = App::new(config, session)?;
            app.run().await?;
        }
    }

    Ok(())
}

/// Log to stderr, or to a file while the TUI owns the terminal
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "shengci=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {:?}", parent))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            registry
                .with(fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None => registry.with(fmt::layer().with_target(false).with_writer(io::stderr)).init(),
    }
    Ok(())
}

fn load_session(config: &Config, vocab: &[PathBuf]) -> StudySession {
    let mut session = StudySession::from_config(config);
    if !vocab.is_empty() {
        let report = session.load_files(vocab);
        if !report.failures.is_empty() {
            eprintln!("{}", report.message());
        }
    }
    session
}

fn read_templates(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read templates from {:?}", path))?;
    Ok(contents.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
}
