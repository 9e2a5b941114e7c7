//! Shengci - a terminal app for studying Chinese vocabulary
//!
//! Load vocabulary lists from CSV files, highlight them in free text,
//! generate practice sentences from grammar forms or templates, and quiz
//! yourself on tones.

pub mod app;
pub mod audio;
pub mod config;
pub mod generate;
pub mod highlight;
pub mod llm;
pub mod quiz;
pub mod session;
pub mod theme;
pub mod ui;
pub mod vocab;

pub use app::App;
pub use config::Config;
pub use session::StudySession;
pub use theme::Theme;
