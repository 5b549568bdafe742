//! Speaker amplifier enable line.

use std::path::Path;
use std::path::PathBuf;

use crate::hardware::HardwareError;

/// Drives the amplifier's enable GPIO high. The line stays high after the
/// process exits; the next invocation finds it already exported.
pub struct Amplifier {
    _line: u32,
}

impl Amplifier {
    pub fn switch_on(line: u32) -> Result<Self, HardwareError> {
        let gpio_dir = PathBuf::from(format!("/sys/class/gpio/gpio{line}"));

        if !gpio_dir.exists() {
            write_attr(Path::new("/sys/class/gpio/export"), &line.to_string())?;
        }
        write_attr(&gpio_dir.join("direction"), "out")?;
        write_attr(&gpio_dir.join("value"), "1")?;

        tracing::debug!(line, "Amplifier switched on");
        Ok(Self { _line: line })
    }
}

fn write_attr(path: &Path, value: &str) -> Result<(), HardwareError> {
    std::fs::write(path, value).map_err(|source| HardwareError::SysfsWrite {
        path: path.to_path_buf(),
        source,
    })
}
