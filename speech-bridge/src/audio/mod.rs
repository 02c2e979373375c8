//! Audio output: WAV files and device playback.

pub mod device;
pub mod player;

pub use device::{list_devices, resolve_device};
pub use player::play_wav;

use anyhow::{Context, Result};
use std::path::Path;

/// Write merged WAV bytes to a file.
pub fn write_wav_file(path: &Path, wav: &[u8]) -> Result<()> {
    std::fs::write(path, wav).with_context(|| format!("Failed to write {}", path.display()))
}
