//! WAV playback through the system player.
//!
//! Playback is fire-and-forget: `aplay` runs detached while the sequence
//! keeps pacing, the same way the chime overlaps the beak movement on the
//! physical clock.

use std::process::Command;
use std::process::Stdio;

use crate::hardware::Chime;
use crate::hardware::HardwareError;

pub struct WavPlayer {
    clip: Option<camino::Utf8PathBuf>,
}

impl WavPlayer {
    /// `None` is explicit silent mode: the player exists, `play` does
    /// nothing. A configured clip that is missing on disk is an error.
    pub fn load(clip: Option<&camino::Utf8Path>) -> Result<Self, HardwareError> {
        if let Some(clip) = clip {
            if !clip.exists() {
                return Err(HardwareError::MissingClip {
                    path: clip.to_path_buf(),
                });
            }
        }

        Ok(Self {
            clip: clip.map(camino::Utf8Path::to_path_buf),
        })
    }
}

impl Chime for WavPlayer {
    fn play(&mut self) -> Result<(), HardwareError> {
        let Some(clip) = &self.clip else {
            tracing::debug!("No clip configured, staying silent");
            return Ok(());
        };

        Command::new("aplay")
            .arg("-q")
            .arg(clip.as_str())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(HardwareError::SpawnPlayer)?;

        Ok(())
    }
}

/// Sets the mixer once per invocation. Failure only costs loudness, so it is
/// logged and otherwise ignored.
pub fn set_mixer_volume(volume: f32) {
    let percent = (volume * 100.0).round() as u8;
    let status = Command::new("amixer")
        .args(["-q", "-M", "sset", "PCM"])
        .arg(format!("{percent}%"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!(?status, "amixer exited non-zero"),
        Err(error) => tracing::warn!(?error, "Failed to run amixer"),
    }
}
