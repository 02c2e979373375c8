use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Voice '{0}' not found. Run with --list-voices to see installed voices.")]
    VoiceNotFound(String),

    #[error("No voices available")]
    NoVoices,

    #[error("TTS engine failed{}: {message}", .status.map(|c| format!(" (exit code {})", c)).unwrap_or_default())]
    EngineFailed { message: String, status: Option<i32> },

    #[error("Fragment {ordinal} has audio format {found}, expected {expected}")]
    FormatMismatch {
        ordinal: usize,
        expected: String,
        found: String,
    },

    #[error("No fragments to synthesize")]
    NoFragments,

    #[error("Audio player failed{}: {message}", .status.map(|c| format!(" (exit code {})", c)).unwrap_or_default())]
    PlayerFailed { message: String, status: Option<i32> },
}
