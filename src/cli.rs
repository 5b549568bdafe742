use clap::Parser;

/// LED-ring cuckoo clock. Meant to be invoked by cron once per minute.
#[derive(Debug, Parser)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Path of the configuration file
    #[clap(long, short)]
    pub config: camino::Utf8PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Render the hands and, at the top of the hour, run the bird
    Run,

    /// Load and validate the configuration without touching any hardware
    VerifyConfig,
}
