//! Read generated sentences aloud
//!
//! Speech comes from the language-model service as an mp3 file, which is
//! written to a temporary path and handed to the platform's default opener.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::llm::{LlmClient, ServiceError};

/// Separator placed between sentences in the spoken text
const SENTENCE_JOINER: &str = "。";

/// Errors that abort a single playback request
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Generate sentences first.")]
    NoSentences,

    #[error("Audio unavailable: {0}")]
    Service(#[from] ServiceError),

    #[error("Failed to prepare audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// Text sent to the speech endpoint for a batch
pub fn speech_text(sentences: &[String]) -> Option<String> {
    let parts: Vec<&str> =
        sentences.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
    if parts.is_empty() { None } else { Some(parts.join(SENTENCE_JOINER)) }
}

/// Synthesize the batch and open the resulting file
pub async fn play_sentences(
    client: Option<&LlmClient>,
    sentences: &[String],
) -> Result<PathBuf, AudioError> {
    let text = speech_text(sentences).ok_or(AudioError::NoSentences)?;
    let client = client.ok_or(ServiceError::ApiKeyNotFound)?;

    let audio = client.synthesize_speech(&text).await?;
    let path = write_temp_audio(&audio)?;
    open_with_default_player(&path)?;

    tracing::info!(path = %path.display(), bytes = audio.len(), "Playing sentence audio");
    Ok(path)
}

/// Persist audio bytes to a temporary `.mp3` that outlives this process
fn write_temp_audio(audio: &[u8]) -> std::io::Result<PathBuf> {
    use std::io::Write;

    let mut file = tempfile::Builder::new().prefix("shengci-").suffix(".mp3").tempfile()?;
    file.write_all(audio)?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}

/// Launch the platform opener without waiting for playback
fn open_with_default_player(path: &Path) -> std::io::Result<()> {
    opener_command(path).spawn().map(|_| ())
}

fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_text_joins_non_blank_sentences() {
        let sentences = vec!["你好".to_string(), "  ".to_string(), "再见".to_string()];
        assert_eq!(speech_text(&sentences).as_deref(), Some("你好。再见"));
        assert_eq!(speech_text(&[]), None);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_the_network() {
        let err = play_sentences(None, &[]).await.unwrap_err();
        assert!(matches!(err, AudioError::NoSentences));
    }

    #[tokio::test]
    async fn missing_client_reports_missing_key() {
        let err = play_sentences(None, &["你好".to_string()]).await.unwrap_err();
        assert!(matches!(err, AudioError::Service(ServiceError::ApiKeyNotFound)));
    }

    #[test]
    fn temp_audio_is_kept_on_disk() {
        let path = write_temp_audio(b"ID3").unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn opener_receives_the_path() {
        let command = opener_command(Path::new("/tmp/a.mp3"));
        assert!(command.get_args().any(|a| a == "/tmp/a.mp3"));
    }
}
