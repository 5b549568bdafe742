//! Sysfs PWM plumbing for the bird mechanism.
//!
//! The extension motor sits on an H-bridge fed by two PWM channels (one per
//! direction); the beak is a single drive whose duty fraction sets how far
//! it opens. Both run at 1 kHz.

use std::path::Path;
use std::path::PathBuf;

use crate::config::PwmAddress;
use crate::hardware::Beak;
use crate::hardware::HardwareError;
use crate::hardware::Motor;

const PERIOD_NS: u32 = 1_000_000;

struct PwmChannel {
    pwm_dir: PathBuf,
}

impl PwmChannel {
    fn export(address: PwmAddress) -> Result<Self, HardwareError> {
        let chip_dir = PathBuf::from(format!("/sys/class/pwm/pwmchip{}", address.chip));
        let pwm_dir = chip_dir.join(format!("pwm{}", address.channel));

        // A previous invocation may have left the channel exported.
        if !pwm_dir.exists() {
            write_attr(&chip_dir.join("export"), &address.channel.to_string())?;
        }

        let channel = Self { pwm_dir };
        channel.write("period", &PERIOD_NS.to_string())?;
        channel.write("duty_cycle", "0")?;
        channel.write("enable", "1")?;
        Ok(channel)
    }

    fn write(&self, attribute: &str, value: &str) -> Result<(), HardwareError> {
        write_attr(&self.pwm_dir.join(attribute), value)
    }

    fn set_duty_fraction(&mut self, fraction: f32) -> Result<(), HardwareError> {
        let fraction = fraction.clamp(0.0, 1.0);
        let duty = (f64::from(fraction) * f64::from(PERIOD_NS)) as u64;
        self.write("duty_cycle", &duty.to_string())
    }
}

fn write_attr(path: &Path, value: &str) -> Result<(), HardwareError> {
    std::fs::write(path, value).map_err(|source| HardwareError::SysfsWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub struct BirdMotor {
    forward: PwmChannel,
    reverse: PwmChannel,
}

impl BirdMotor {
    pub fn new(forward: PwmAddress, reverse: PwmAddress) -> Result<Self, HardwareError> {
        Ok(Self {
            forward: PwmChannel::export(forward)?,
            reverse: PwmChannel::export(reverse)?,
        })
    }
}

impl Motor for BirdMotor {
    fn set_throttle(&mut self, throttle: f32) -> Result<(), HardwareError> {
        let throttle = throttle.clamp(-1.0, 1.0);
        // The idle side goes low first so both legs are never driven at once.
        if throttle >= 0.0 {
            self.reverse.set_duty_fraction(0.0)?;
            self.forward.set_duty_fraction(throttle)
        } else {
            self.forward.set_duty_fraction(0.0)?;
            self.reverse.set_duty_fraction(-throttle)
        }
    }
}

pub struct BeakDrive {
    channel: PwmChannel,
}

impl BeakDrive {
    pub fn new(address: PwmAddress) -> Result<Self, HardwareError> {
        Ok(Self {
            channel: PwmChannel::export(address)?,
        })
    }
}

impl Beak for BeakDrive {
    fn set_fraction(&mut self, fraction: f32) -> Result<(), HardwareError> {
        self.channel.set_duty_fraction(fraction)
    }
}
