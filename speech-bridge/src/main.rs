//! speech-bridge - Speak text or save it as WAV through a command-line TTS engine

mod audio;
mod config;
mod error;
mod synth;
mod tts;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use config::BridgeConfig;
use error::BridgeError;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use speech_chunker::Chunker;
use std::path::PathBuf;
use tts::{MAX_RATE, MIN_RATE, TtsBackend, TtsOptions, VoiceInfo, clamp_rate, clamp_volume};

#[derive(Parser, Debug)]
#[command(name = "speech-bridge")]
#[command(about = "Speak text or save it as WAV through a command-line TTS engine", long_about = None)]
#[command(version, arg_required_else_help = true)]
struct Args {
    /// Text to speak; every following argument is part of the text
    #[arg(short, long, num_args = 1.., allow_hyphen_values = true)]
    text: Vec<String>,

    /// Voice to use (case-insensitive part of the voice name)
    #[arg(short, long)]
    voice: Option<String>,

    /// Speaking rate (-10 to 10)
    #[arg(short, long, allow_negative_numbers = true)]
    rate: Option<i32>,

    /// Volume (0 to 100)
    #[arg(long, visible_alias = "vol", allow_negative_numbers = true)]
    volume: Option<i32>,

    /// Output device ID (default: system device)
    #[arg(short, long)]
    device: Option<String>,

    /// Save audio to a WAV file instead of playing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use a random installed voice
    #[arg(long, visible_alias = "rv")]
    random_voice: bool,

    /// Use a random speaking rate
    #[arg(long, visible_alias = "rr")]
    random_rate: bool,

    /// Maximum fragment length in chars (default: 50); long texts are split
    /// because some voices cannot handle them in one piece
    #[arg(long, visible_alias = "cs", allow_negative_numbers = true)]
    chunk_size: Option<i64>,

    /// List installed voices
    #[arg(long, visible_alias = "lv")]
    list_voices: bool,

    /// List output devices
    #[arg(long, visible_alias = "ld")]
    list_devices: bool,

    /// Enable debug output
    #[arg(long, visible_alias = "db", default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set default voice
    SetVoice {
        /// Part of a voice name
        name: String,
    },
    /// Set default speaking rate
    SetRate {
        /// Value (-10 to 10)
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Set default volume
    SetVolume {
        /// Value (0 to 100)
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Set default chunk size
    SetChunkSize {
        /// Maximum fragment length in chars
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Set default output device
    SetDevice {
        /// Device ID from --list-devices
        id: String,
    },
}

/// Settings for one run: CLI flags over configured defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    text: String,
    voice: Option<String>,
    rate: i32,
    volume: u8,
    chunk_size: usize,
    device: Option<String>,
    output: Option<PathBuf>,
}

impl Settings {
    fn resolve(args: &Args, config: &BridgeConfig) -> Self {
        Self {
            text: args.text.join(" "),
            voice: args.voice.clone().or_else(|| config.voice.clone()),
            rate: args.rate.map(clamp_rate).unwrap_or(config.rate),
            volume: args.volume.map(clamp_volume).unwrap_or(config.volume),
            chunk_size: args
                .chunk_size
                .map(clamp_chunk_size)
                .unwrap_or(config.chunk_size),
            device: args.device.clone().or_else(|| config.device.clone()),
            output: args.output.clone(),
        }
    }
}

fn clamp_chunk_size(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    let config = BridgeConfig::load().context("Failed to load configuration")?;
    let backend = tts::create_backend(&config.engine_bin);

    if args.list_voices {
        return print_voices(backend.as_ref());
    }

    if args.list_devices {
        return print_devices(&config.player_bin);
    }

    let mut settings = Settings::resolve(&args, &config);

    let voice = if args.random_voice {
        let voice = pick_random_voice(backend.as_ref())?;
        info!("Selected random voice: {}", voice.name);
        Some(voice)
    } else if let Some(query) = &settings.voice {
        Some(select_voice(backend.as_ref(), query)?)
    } else {
        None
    };

    if args.random_rate {
        settings.rate = rand::thread_rng().gen_range(MIN_RATE..=MAX_RATE);
        info!("Selected random rate: {}", settings.rate);
    }

    log_parameters(&settings, voice.as_ref(), backend.as_ref());

    if settings.text.trim().is_empty() {
        anyhow::bail!("No text to speak. Use --text <TEXT>.");
    }

    let mut options = TtsOptions::new()
        .with_rate(settings.rate)
        .with_volume(settings.volume.into());
    if let Some(voice) = &voice {
        options = options.with_voice(&voice.id);
    }

    let chunker = Chunker::new(settings.chunk_size);
    let fragments = chunker.chunk_with(&settings.text, |fragment| {
        debug!(
            "Fragment #{} ({} chars): \"{}\"",
            fragment.ordinal, fragment.char_len, fragment.text
        );
    });

    if fragments.is_empty() {
        anyhow::bail!("Text could not be split into fragments");
    }

    let pb = if fragments.len() > 1 && !args.debug {
        let pb = ProgressBar::new(fragments.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} fragments")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let wav = synth::synthesize_fragments(backend.as_ref(), &fragments, &options, |done| {
        pb.set_position(done as u64)
    })?;
    pb.finish_and_clear();

    match &settings.output {
        Some(path) => {
            audio::write_wav_file(path, &wav)?;
            info!("Audio saved to {}", path.display());
        }
        None => {
            let devices = match &settings.device {
                Some(_) => audio::list_devices(&config.player_bin).unwrap_or_else(|e| {
                    warn!("Could not list output devices: {:#}", e);
                    Vec::new()
                }),
                None => Vec::new(),
            };
            let device = audio::resolve_device(settings.device.as_deref(), &devices);
            audio::play_wav(&config.player_bin, &wav, device)?;
        }
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Find the requested voice among installed voices.
fn select_voice(backend: &dyn TtsBackend, query: &str) -> Result<VoiceInfo> {
    let voices = backend.list_voices().context("Failed to list voices")?;
    tts::find_voice(&voices, query)
        .cloned()
        .ok_or_else(|| BridgeError::VoiceNotFound(query.to_string()).into())
}

fn pick_random_voice(backend: &dyn TtsBackend) -> Result<VoiceInfo> {
    let voices = backend.list_voices().context("Failed to list voices")?;
    voices
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| BridgeError::NoVoices.into())
}

fn log_parameters(settings: &Settings, voice: Option<&VoiceInfo>, backend: &dyn TtsBackend) {
    debug!("Synthesis parameters:");
    debug!("  Engine: {}", backend.name());
    debug!(
        "  Voice: {}",
        voice.map(|v| v.name.as_str()).unwrap_or("default")
    );
    debug!("  Rate: {}", settings.rate);
    debug!("  Volume: {}", settings.volume);
    debug!(
        "  Output device: {}",
        settings.device.as_deref().unwrap_or("default")
    );
    debug!("  Chunk size: {}", settings.chunk_size);
    debug!("Version: {}", env!("CARGO_PKG_VERSION"));
    if let Some(built) = build_timestamp() {
        debug!("Build time: {}", built);
    }
}

/// Modification time of the running executable.
fn build_timestamp() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    let modified = std::fs::metadata(exe).ok()?.modified().ok()?;
    Some(
        DateTime::<Local>::from(modified)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    )
}

fn print_voices(backend: &dyn TtsBackend) -> Result<()> {
    let voices = backend.list_voices().context("Failed to list voices")?;
    if voices.is_empty() {
        warn!("No voices available");
    }
    for voice in voices {
        println!(
            "{} -- {}, {}",
            voice.name,
            voice.gender.as_str(),
            voice.language
        );
    }
    Ok(())
}

fn print_devices(player_bin: &str) -> Result<()> {
    let devices = audio::list_devices(player_bin)?;
    if devices.is_empty() {
        warn!("No output devices found");
    }
    for device in devices {
        println!("{} -- {}", device.index, device.name);
    }
    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = BridgeConfig::load()?;
            println!("Configuration file: {:?}", BridgeConfig::config_path());
            println!();
            match &config.voice {
                Some(voice) => println!("voice = \"{}\"", voice),
                None => println!("voice = (engine default)"),
            }
            println!("rate = {}", config.rate);
            println!("volume = {}", config.volume);
            println!("chunk_size = {}", config.chunk_size);
            match &config.device {
                Some(device) => println!("device = \"{}\"", device),
                None => println!("device = (system default)"),
            }
            println!("engine_bin = \"{}\"", config.engine_bin);
            println!("player_bin = \"{}\"", config.player_bin);
        }
        ConfigAction::SetVoice { name } => {
            let mut config = BridgeConfig::load()?;
            config.voice = Some(name.clone());
            config.save()?;
            println!("Default voice set to: {}", name);
        }
        ConfigAction::SetRate { value } => {
            let mut config = BridgeConfig::load()?;
            config.rate = clamp_rate(*value);
            config.save()?;
            println!("Default rate set to: {}", config.rate);
        }
        ConfigAction::SetVolume { value } => {
            let mut config = BridgeConfig::load()?;
            config.volume = clamp_volume(*value);
            config.save()?;
            println!("Default volume set to: {}", config.volume);
        }
        ConfigAction::SetChunkSize { value } => {
            let mut config = BridgeConfig::load()?;
            config.chunk_size = clamp_chunk_size(*value);
            config.save()?;
            println!("Default chunk size set to: {}", config.chunk_size);
        }
        ConfigAction::SetDevice { id } => {
            let mut config = BridgeConfig::load()?;
            config.device = Some(id.clone());
            config.save()?;
            println!("Default output device set to: {}", id);
        }
    }
    Ok(())
}
