mod cli;
mod color;
mod config;
mod cuckoo;
mod error;
mod geometry;
mod hardware;
mod logging;
mod wallclock;

use crate::hardware::Chime;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    setup_panic();
    color_eyre::install().map_err(crate::error::Error::InstallingColorEyre)?;
    let cli = <crate::cli::Cli as clap::Parser>::parse();
    crate::logging::setup(cli.verbosity);
    let cfg = crate::config::Config::load(&cli.config).await?;

    match cli.command {
        cli::Command::Run => {
            run(cfg).await?;
        }
        cli::Command::VerifyConfig => {
            tracing::info!("Configuration verified");
        }
    }

    Ok(())
}

fn setup_panic() {
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
}

async fn run(config: crate::config::Config) -> Result<(), crate::error::Error> {
    if let Some(timezone) = config.clock.timezone.as_deref() {
        crate::wallclock::set_timezone(timezone);
    }

    // Everything derived from configuration is resolved before the first
    // hardware touch.
    let layout = config.ring.layout()?;
    let order = config.ring.color_order;
    let hour_channels = order.arrange(config.hands.hour_color()?);
    let minute_channels = order.arrange(config.hands.minute_color()?);

    let _amplifier = config
        .bird
        .amplifier_gpio
        .map(crate::hardware::Amplifier::switch_on)
        .transpose()?;
    crate::hardware::set_mixer_volume(config.sound.volume);

    let mut click = crate::hardware::WavPlayer::load(config.sound.click.as_deref())?;
    click.play()?;

    let mut ring = crate::hardware::DdpRing::connect(&config.ring, &layout)?;
    // Blank the ring first, otherwise last minute's hands stay lit.
    ring.clear();
    ring.show()?;

    let now = crate::wallclock::sample().map_err(crate::error::Error::TimeOffset)?;
    let hour_pixel = layout.hour_pixel(now.hour);
    let minute_pixel = layout.minute_pixel(now.minute);

    ring.set_pixel(hour_pixel, &hour_channels);
    // The minute hand wins when both hands land on the same pixel.
    ring.set_pixel(minute_pixel, &minute_channels);
    ring.show()?;

    tracing::info!(
        "Time: {:02}:{:02}  Pixel: {:02},{:02}",
        now.hour,
        now.minute,
        hour_pixel,
        minute_pixel,
    );

    if now.minute == 0 {
        let mut motor =
            crate::hardware::BirdMotor::new(config.bird.motor_forward, config.bird.motor_reverse)?;
        let mut beak = crate::hardware::BeakDrive::new(config.bird.beak)?;
        let mut chime = crate::hardware::WavPlayer::load(config.sound.cuckoo.as_deref())?;

        crate::cuckoo::CuckooSequencer::new(&mut motor, &mut beak, &mut chime, config.bird.timing)
            .run(now.hour)
            .await?;
    }

    Ok(())
}
