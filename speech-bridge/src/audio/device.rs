//! Output device enumeration and selection.

use anyhow::{Context, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;

/// A line of `aplay -l`:
/// `card 0: PCH [HDA Intel PCH], device 0: ALC3246 Analog [ALC3246 Analog]`
static DEVICE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^card (\d+): [^\[]*\[([^\]]*)\], device (\d+): [^\[]*\[([^\]]*)\]")
        .expect("device line pattern is valid")
});

/// A playback device, addressed by its position in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDevice {
    pub index: usize,
    pub card: u32,
    pub device: u32,
    pub name: String,
}

impl OutputDevice {
    /// ALSA device name for the player's `-D` option.
    pub fn alsa_name(&self) -> String {
        format!("plughw:{},{}", self.card, self.device)
    }
}

/// Parse `aplay -l` output into indexed devices.
pub fn parse_device_list(output: &str) -> Vec<OutputDevice> {
    output
        .lines()
        .filter_map(|line| DEVICE_LINE.captures(line))
        .enumerate()
        .filter_map(|(index, caps)| {
            Some(OutputDevice {
                index,
                card: caps[1].parse().ok()?,
                device: caps[3].parse().ok()?,
                name: format!("{} - {}", &caps[2], &caps[4]),
            })
        })
        .collect()
}

/// List playback devices known to the player.
pub fn list_devices(player_bin: &str) -> Result<Vec<OutputDevice>> {
    let output = Command::new(player_bin)
        .arg("-l")
        .output()
        .with_context(|| format!("Failed to run {} -l", player_bin))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} -l failed: {}", player_bin, stderr.trim());
    }

    Ok(parse_device_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Resolve a device ID against the listing.
///
/// Returns None, meaning the system default, when no ID is given or the ID is
/// not a valid index.
pub fn resolve_device<'a>(id: Option<&str>, devices: &'a [OutputDevice]) -> Option<&'a OutputDevice> {
    let id = id?;

    let Ok(index) = id.trim().parse::<usize>() else {
        warn!("Invalid device ID '{}'. Using the default device.", id);
        return None;
    };

    let device = devices.get(index);
    if device.is_none() {
        warn!("Device with ID '{}' not found. Using the default device.", id);
    }
    device
}
