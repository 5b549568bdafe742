#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Setting up error reporting failed")]
    InstallingColorEyre(#[source] color_eyre::Report),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Hardware(#[from] crate::hardware::HardwareError),

    #[error("Error getting local time")]
    TimeOffset(#[source] time::error::IndeterminateOffset),
}
