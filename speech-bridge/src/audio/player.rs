//! WAV playback through an external player.

use super::device::OutputDevice;
use crate::error::BridgeError;
use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Build the player arguments for a file and an optional device.
pub fn player_args(wav_path: &Path, device: Option<&OutputDevice>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-q".into()];

    if let Some(device) = device {
        args.push("-D".into());
        args.push(device.alsa_name().into());
    }

    args.push(wav_path.as_os_str().to_owned());
    args
}

/// Play WAV bytes and wait until playback finishes.
pub fn play_wav(player_bin: &str, wav: &[u8], device: Option<&OutputDevice>) -> Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix("speech-bridge-")
        .suffix(".wav")
        .tempfile()
        .context("Failed to create temporary WAV file")?;
    file.write_all(wav)
        .context("Failed to write temporary WAV file")?;
    file.flush()?;

    let args = player_args(file.path(), device);
    debug!("{} {:?}", player_bin, args);

    let output = Command::new(player_bin)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {}", player_bin))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BridgeError::PlayerFailed {
            message: stderr.trim().to_string(),
            status: output.status.code(),
        }
        .into());
    }

    Ok(())
}
