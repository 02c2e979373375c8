//! espeak-ng backend, driven as a subprocess.
//!
//! Voices come from `espeak-ng --voices`. Each fragment is synthesized into a
//! temporary WAV file with `-w`, which gets a correct RIFF header (streaming
//! to stdout does not).

use super::{Gender, TtsBackend, TtsOptions, VoiceInfo};
use crate::error::BridgeError;
use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// espeak-ng default speed in words per minute.
const BASE_WPM: i32 = 175;
/// Words per minute added per rate step.
const WPM_PER_STEP: i32 = 15;

pub struct EspeakBackend {
    bin: String,
}

impl EspeakBackend {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn check_output(&self, output: Output) -> Result<Output> {
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BridgeError::EngineFailed {
                message: stderr.trim().to_string(),
                status: output.status.code(),
            }
            .into());
        }
        Ok(output)
    }
}

/// Map a -10..=10 rate to espeak words per minute.
pub fn rate_to_wpm(rate: i32) -> i32 {
    BASE_WPM + super::clamp_rate(rate) * WPM_PER_STEP
}

/// Build the synthesis arguments. Text is read from stdin.
pub fn synthesis_args(options: &TtsOptions, wav_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-w".into(),
        wav_path.as_os_str().to_owned(),
        "-s".into(),
        rate_to_wpm(options.rate).to_string().into(),
        "-a".into(),
        options.volume.to_string().into(),
    ];

    if let Some(voice) = &options.voice {
        args.push("-v".into());
        args.push(voice.into());
    }

    args.push("--stdin".into());
    args
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  af              --/M      Afrikaans          gmw/af
/// ```
pub fn parse_voices(output: &str) -> Vec<VoiceInfo> {
    output
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }

            let language = fields[1];
            let gender = match fields[2].rsplit('/').next() {
                Some("M") => Gender::Male,
                Some("F") => Gender::Female,
                _ => Gender::Unknown,
            };

            Some(VoiceInfo {
                id: language.to_string(),
                name: fields[3].replace('_', " "),
                gender,
                language: language.to_string(),
            })
        })
        .collect()
}

impl TtsBackend for EspeakBackend {
    fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        let output = Command::new(&self.bin)
            .arg("--voices")
            .output()
            .with_context(|| format!("Failed to run {}", self.bin))?;
        let output = self.check_output(output)?;

        Ok(parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }

    fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<Vec<u8>> {
        let wav_file = tempfile::Builder::new()
            .prefix("speech-bridge-")
            .suffix(".wav")
            .tempfile()
            .context("Failed to create temporary WAV file")?;

        let args = synthesis_args(options, wav_file.path());
        debug!("{} {:?}", self.bin, args);

        let mut child = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to run {}", self.bin))?;

        // Stdin is closed before waiting so the engine sees end of input
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // A failed write usually means the engine exited early; its stderr
        // says why
        let output = child
            .wait_with_output()
            .context("Failed to wait for the TTS engine")?;
        self.check_output(output)?;
        written.context("Failed to send text to the TTS engine")?;

        std::fs::read(wav_file.path()).context("Failed to read synthesized audio")
    }

    fn name(&self) -> &str {
        &self.bin
    }
}
