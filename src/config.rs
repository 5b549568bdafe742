use std::time::Duration;

use crate::color::ColorOrder;
use crate::color::HandColor;
use crate::geometry::Direction;
use crate::geometry::RingLayout;
use crate::geometry::RingSize;

/// The external scheduler re-invokes the process once per minute. The cuckoo
/// sequence must always finish inside that window, even at twelve o'clock.
const SCHEDULER_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct Config {
    pub clock: ClockConfig,
    pub ring: RingConfig,
    pub hands: HandsConfig,
    pub sound: SoundConfig,
    pub bird: BirdConfig,
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct ClockConfig {
    /// IANA timezone identifier, e.g. "US/Pacific". Absent means the system
    /// default.
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct RingConfig {
    pub host: std::net::IpAddr,
    pub port: u16,
    pub bind_port: u16,
    pub pixels: u16,
    pub direction: Direction,
    pub color_order: ColorOrder,
    pub brightness: f32,
}

impl RingConfig {
    pub fn size(&self) -> Result<RingSize, ConfigError> {
        RingSize::from_pixels(self.pixels).ok_or(ConfigError::UnsupportedRingSize {
            pixels: self.pixels,
        })
    }

    pub fn layout(&self) -> Result<RingLayout, ConfigError> {
        Ok(RingLayout::new(self.size()?, self.direction))
    }
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct HandsConfig {
    pub hour: Vec<u8>,
    pub minute: Vec<u8>,
}

impl HandsConfig {
    pub fn hour_color(&self) -> Result<HandColor, ConfigError> {
        hand_color("hour", &self.hour)
    }

    pub fn minute_color(&self) -> Result<HandColor, ConfigError> {
        hand_color("minute", &self.minute)
    }
}

fn hand_color(hand: &'static str, components: &[u8]) -> Result<HandColor, ConfigError> {
    HandColor::from_components(components).ok_or(ConfigError::HandColorShape {
        hand,
        count: components.len(),
    })
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct SoundConfig {
    /// Tick played on every invocation. Absent means silent.
    #[serde(default)]
    pub click: Option<camino::Utf8PathBuf>,

    /// Played once per announce cycle of the cuckoo sequence. Absent means
    /// the bird flaps silently.
    #[serde(default)]
    pub cuckoo: Option<camino::Utf8PathBuf>,

    pub volume: f32,
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct BirdConfig {
    pub motor_forward: PwmAddress,
    pub motor_reverse: PwmAddress,
    pub beak: PwmAddress,

    /// GPIO line that switches the speaker amplifier on.
    #[serde(default)]
    pub amplifier_gpio: Option<u32>,

    #[serde(default)]
    pub timing: BirdTiming,
}

/// A sysfs PWM channel, `/sys/class/pwm/pwmchip{chip}/pwm{channel}`.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct PwmAddress {
    pub chip: u32,
    pub channel: u32,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct BirdTiming {
    /// How long the extension motor runs, in each direction.
    #[serde(with = "humantime_serde", default = "default_extend_time")]
    pub extend_time: Duration,

    /// Beak-open hold, one per announced hour.
    #[serde(with = "humantime_serde", default = "default_hold")]
    pub open_hold: Duration,

    /// Beak-closed hold between repetitions.
    #[serde(with = "humantime_serde", default = "default_hold")]
    pub close_hold: Duration,
}

impl Default for BirdTiming {
    fn default() -> Self {
        Self {
            extend_time: default_extend_time(),
            open_hold: default_hold(),
            close_hold: default_hold(),
        }
    }
}

impl BirdTiming {
    /// Twelve o'clock is the longest sequence the bird can run.
    pub fn worst_case(&self) -> Duration {
        self.extend_time * 2 + (self.open_hold + self.close_hold) * 12
    }
}

fn default_extend_time() -> Duration {
    Duration::from_millis(350)
}

fn default_hold() -> Duration {
    Duration::from_secs(1)
}

impl Config {
    pub async fn load(path: &camino::Utf8Path) -> Result<Self, ConfigError> {
        let config_str =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadingFile {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: Config = toml::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// All checks run before any hardware is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.ring.size()?;

        if !(0.0..=1.0).contains(&self.ring.brightness) {
            return Err(ConfigError::BrightnessOutOfRange {
                value: self.ring.brightness,
            });
        }

        if !(0.0..=1.0).contains(&self.sound.volume) {
            return Err(ConfigError::VolumeOutOfRange {
                value: self.sound.volume,
            });
        }

        let ring_channels = self.ring.color_order.channel_count();
        for (hand, components) in [("hour", &self.hands.hour), ("minute", &self.hands.minute)] {
            let color = hand_color(hand, components)?;
            if color.channel_count() > ring_channels {
                return Err(ConfigError::MismatchedHandChannels {
                    hand,
                    color_channels: color.channel_count(),
                    ring_channels,
                });
            }
        }

        let worst_case = self.bird.timing.worst_case();
        if worst_case >= SCHEDULER_INTERVAL {
            return Err(ConfigError::CuckooOvershootsSchedule {
                worst_case,
                interval: SCHEDULER_INTERVAL,
            });
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file from path '{}'", .path)]
    ReadingFile {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParsingConfig(#[from] toml::de::Error),

    #[error("Unsupported ring size {} (supported: 16, 24)", .pixels)]
    UnsupportedRingSize { pixels: u16 },

    #[error("Brightness {} is outside 0.0..=1.0", .value)]
    BrightnessOutOfRange { value: f32 },

    #[error("Volume {} is outside 0.0..=1.0", .value)]
    VolumeOutOfRange { value: f32 },

    #[error("The {} hand color has {} components, expected 3 or 4", .hand, .count)]
    HandColorShape { hand: &'static str, count: usize },

    #[error(
        "The {} hand color has {} channels but the ring carries {}",
        .hand,
        .color_channels,
        .ring_channels
    )]
    MismatchedHandChannels {
        hand: &'static str,
        color_channels: usize,
        ring_channels: usize,
    },

    #[error(
        "Worst-case cuckoo sequence ({:?}) does not fit the {:?} scheduler interval",
        .worst_case,
        .interval
    )]
    CuckooOvershootsSchedule {
        worst_case: Duration,
        interval: Duration,
    },
}
