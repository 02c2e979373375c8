//! Mock TTS backend for testing
//!
//! Produces a short PCM tone per fragment so the synthesizer driver can be
//! tested without an engine installed.

use anyhow::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use std::sync::Mutex;

use super::{Gender, TtsBackend, TtsOptions, VoiceInfo};
use crate::error::BridgeError;

/// Samples generated per char of input.
pub const SAMPLES_PER_CHAR: usize = 10;

pub fn mono_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

pub struct MockBackend {
    voices: Vec<VoiceInfo>,
    spec: WavSpec,
    /// 1-based call from which a different sample rate is produced
    mismatch_from: Option<usize>,
    /// 1-based call that fails
    fail_on: Option<usize>,
    calls: Mutex<Vec<(String, TtsOptions)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            voices: vec![
                VoiceInfo {
                    id: "en".to_string(),
                    name: "English".to_string(),
                    gender: Gender::Male,
                    language: "en".to_string(),
                },
                VoiceInfo {
                    id: "ru".to_string(),
                    name: "Russian Irina".to_string(),
                    gender: Gender::Female,
                    language: "ru".to_string(),
                },
            ],
            spec: mono_spec(22050),
            mismatch_from: None,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn without_voices(mut self) -> Self {
        self.voices.clear();
        self
    }

    pub fn with_mismatch_from(mut self, call: usize) -> Self {
        self.mismatch_from = Some(call);
        self
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// Texts and options received so far, in order.
    pub fn calls(&self) -> Vec<(String, TtsOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TtsBackend for MockBackend {
    fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        Ok(self.voices.clone())
    }

    fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<Vec<u8>> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((text.to_string(), options.clone()));
            calls.len()
        };

        if self.fail_on == Some(call) {
            return Err(BridgeError::EngineFailed {
                message: "mock failure".to_string(),
                status: Some(1),
            }
            .into());
        }

        let spec = match self.mismatch_from {
            Some(from) if call >= from => mono_spec(self.spec.sample_rate * 2),
            _ => self.spec,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for i in 0..text.chars().count() * SAMPLES_PER_CHAR {
            writer.write_sample((i % 100) as i16)?;
        }
        writer.finalize()?;

        Ok(cursor.into_inner())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
