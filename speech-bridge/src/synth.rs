//! Synthesizer driver: feeds fragments to the TTS backend in order and
//! concatenates their PCM into a single WAV.

use crate::error::BridgeError;
use crate::tts::{TtsBackend, TtsOptions};
use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use std::io::{Cursor, Read, Seek, Write};

/// Human-readable description of a WAV format.
pub fn describe_spec(spec: &WavSpec) -> String {
    let format = match spec.sample_format {
        SampleFormat::Int => "int",
        SampleFormat::Float => "float",
    };
    format!(
        "{} Hz, {} ch, {}-bit {}",
        spec.sample_rate, spec.channels, spec.bits_per_sample, format
    )
}

fn synthesize_one(
    backend: &dyn TtsBackend,
    text: &str,
    ordinal: usize,
    options: &TtsOptions,
) -> Result<WavReader<Cursor<Vec<u8>>>> {
    let wav = backend
        .synthesize(text, options)
        .with_context(|| format!("Failed to synthesize fragment {}", ordinal))?;

    WavReader::new(Cursor::new(wav))
        .with_context(|| format!("TTS engine returned invalid WAV for fragment {}", ordinal))
}

fn copy_samples<R, W>(reader: &mut WavReader<R>, writer: &mut WavWriter<W>) -> Result<()>
where
    R: Read,
    W: Write + Seek,
{
    match reader.spec().sample_format {
        SampleFormat::Int => {
            for sample in reader.samples::<i32>() {
                writer.write_sample(sample?)?;
            }
        }
        SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                writer.write_sample(sample?)?;
            }
        }
    }
    Ok(())
}

/// Synthesize fragments in order and merge them into one WAV file.
///
/// The first fragment fixes the output format; later fragments must match it.
/// `on_progress` is called with the 1-based ordinal of each finished fragment.
pub fn synthesize_fragments<F>(
    backend: &dyn TtsBackend,
    fragments: &[String],
    options: &TtsOptions,
    mut on_progress: F,
) -> Result<Vec<u8>>
where
    F: FnMut(usize),
{
    let (first, rest) = fragments.split_first().ok_or(BridgeError::NoFragments)?;

    let mut reader = synthesize_one(backend, first, 1, options)?;
    let spec = reader.spec();
    debug!("Output format: {}", describe_spec(&spec));

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).context("Failed to start WAV output")?;
    copy_samples(&mut reader, &mut writer)?;
    on_progress(1);

    for (i, fragment) in rest.iter().enumerate() {
        let ordinal = i + 2;
        let mut reader = synthesize_one(backend, fragment, ordinal, options)?;

        if reader.spec() != spec {
            return Err(BridgeError::FormatMismatch {
                ordinal,
                expected: describe_spec(&spec),
                found: describe_spec(&reader.spec()),
            }
            .into());
        }

        copy_samples(&mut reader, &mut writer)?;
        on_progress(ordinal);
    }

    writer.finalize().context("Failed to finish WAV output")?;
    Ok(cursor.into_inner())
}
