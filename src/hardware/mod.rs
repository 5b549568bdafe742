//! Hardware collaborators. Everything in here is direct I/O; the decisions
//! live in `geometry` and `cuckoo`.

mod amp;
mod pwm;
mod ring;
mod tone;

pub use self::amp::Amplifier;
pub use self::pwm::BeakDrive;
pub use self::pwm::BirdMotor;
pub use self::ring::DdpRing;
pub use self::tone::WavPlayer;
pub use self::tone::set_mixer_volume;

/// The bird's extension motor. Positive throttle pushes the bird out and
/// negative pulls it back; zero stops the motor.
pub trait Motor {
    fn set_throttle(&mut self, throttle: f32) -> Result<(), HardwareError>;
}

/// The beak drive. 1.0 is fully open, 0.0 fully closed.
pub trait Beak {
    fn set_fraction(&mut self, fraction: f32) -> Result<(), HardwareError>;
}

/// Tone trigger. A player without a configured clip swallows `play` calls.
pub trait Chime {
    fn play(&mut self) -> Result<(), HardwareError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    #[error("Failed to bind UDP socket for the ring connection")]
    UdpBind(#[source] std::io::Error),

    #[error("DDP error")]
    Ddp(#[from] ddp_rs::error::DDPError),

    #[error("Failed to write sysfs attribute '{}'", .path.display())]
    SysfsWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sound clip '{}' does not exist", .path)]
    MissingClip { path: camino::Utf8PathBuf },

    #[error("Failed to spawn the sound player")]
    SpawnPlayer(#[source] std::io::Error),
}
