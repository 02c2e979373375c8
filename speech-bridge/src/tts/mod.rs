//! TTS backend trait and types.

pub mod espeak;
#[cfg(test)]
pub mod mock;

use anyhow::Result;

pub const MIN_RATE: i32 = -10;
pub const MAX_RATE: i32 = 10;
pub const MAX_VOLUME: u8 = 100;

/// Clamp a speaking rate to -10..=10.
pub fn clamp_rate(rate: i32) -> i32 {
    rate.clamp(MIN_RATE, MAX_RATE)
}

/// Clamp a volume to 0..=100.
pub fn clamp_volume(volume: i32) -> u8 {
    volume.clamp(0, MAX_VOLUME as i32) as u8
}

/// Options for synthesizing a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsOptions {
    /// Engine voice identifier. None uses the engine default.
    pub voice: Option<String>,
    /// Speaking rate (-10 to 10, default 0)
    pub rate: i32,
    /// Volume (0-100, default 100)
    pub volume: u8,
}

impl Default for TtsOptions {
    fn default() -> Self {
        Self {
            voice: None,
            rate: 0,
            volume: MAX_VOLUME,
        }
    }
}

impl TtsOptions {
    /// Create new TTS options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voice identifier.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Set the speaking rate.
    pub fn with_rate(mut self, rate: i32) -> Self {
        self.rate = clamp_rate(rate);
        self
    }

    /// Set the volume.
    pub fn with_volume(mut self, volume: i32) -> Self {
        self.volume = clamp_volume(volume);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

/// An installed voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// Identifier passed back to the engine
    pub id: String,
    /// Display name, used for lookups
    pub name: String,
    pub gender: Gender,
    pub language: String,
}

/// TTS backend trait - all TTS engines implement this.
pub trait TtsBackend: Send + Sync {
    /// Enumerate installed voices.
    fn list_voices(&self) -> Result<Vec<VoiceInfo>>;

    /// Synthesize one fragment, returning a complete WAV file.
    fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<Vec<u8>>;

    /// Engine name for display.
    fn name(&self) -> &str;
}

/// Create the TTS backend driving the given engine executable.
pub fn create_backend(engine_bin: &str) -> Box<dyn TtsBackend> {
    Box::new(espeak::EspeakBackend::new(engine_bin))
}

/// Find the first voice whose name contains `query`, ignoring case.
pub fn find_voice<'a>(voices: &'a [VoiceInfo], query: &str) -> Option<&'a VoiceInfo> {
    let query = query.to_lowercase();
    voices
        .iter()
        .find(|v| v.name.to_lowercase().contains(&query))
}
