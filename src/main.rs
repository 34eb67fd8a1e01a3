//! # BCD Clock Application Entry Point
//!
//! This binary is the host for the clock face: it loads the configuration,
//! attaches an in-memory display, delivers ticks from a timer aligned to the
//! wall clock and redraws only the regions each tick invalidated.
//! With `--stdout` every frame is printed to the terminal (development mode);
//! otherwise only the dirty regions are logged.


use anyhow::Context;
use bcd_clock_lib::{
    config::{Config, TickGranularity},
    face::ClockFace,
    framebuffer::FrameBuffer,
    TimeSample,
};
use chrono::{DateTime, Local, Timelike};
use embedded_graphics::prelude::OriginDimensions;
use log::{debug, info};
use std::env;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Print every frame as ASCII art
    stdout: bool,
    /// Render one frame and exit
    once: bool,
    /// Alternative config file
    config_path: Option<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Options {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdout" => options.stdout = true,
            "--once" => options.once = true,
            "--config" => options.config_path = args.next(),
            _ => {}
        }
    }
    options
}

/// Time left until the next whole second (or minute) on the wall clock.
fn until_next_tick(granularity: TickGranularity, now: &DateTime<Local>) -> Duration {
    let into_second = Duration::from_nanos(u64::from(now.nanosecond() % 1_000_000_000));
    let period = granularity.period();
    let elapsed = match granularity {
        TickGranularity::Second => into_second,
        TickGranularity::Minute => Duration::from_secs(u64::from(now.second())) + into_second,
    };
    period.saturating_sub(elapsed)
}

fn print_frame(frame: &FrameBuffer, face: &ClockFace) {
    let now = face.now();
    println!(
        "{:02}:{:02}:{:02}  {}",
        now.hour,
        now.minute,
        now.second,
        face.date_label()
    );
    print!("{}", frame.to_ascii());
}

async fn run(config: Config, options: Options) -> anyhow::Result<()> {
    let palette = config.face.palette();
    let mut frame = FrameBuffer::new(config.display.width, config.display.height);
    frame.fill(palette.background);

    let mut face = ClockFace::new(&config, TimeSample::from_datetime(&Local::now()));
    let dirty = face.attach(frame.size());
    face.render(&mut frame, dirty)
        .context("initial render failed")?;

    if options.stdout || options.once {
        print_frame(&frame, &face);
    }
    if options.once {
        return Ok(());
    }

    let granularity = face.granularity();
    let start = Instant::now() + until_next_tick(granularity, &Local::now());
    let mut ticker = time::interval_at(start, granularity.period());
    // A suspended host should resume on the next boundary, not replay every missed tick
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("ticking every {:?}", granularity.period());
    loop {
        ticker.tick().await;

        let dirty = face.tick(TimeSample::from_datetime(&Local::now()));
        face.render(&mut frame, dirty).context("render failed")?;
        debug!("redrew {:?}", dirty);

        if options.stdout {
            print_frame(&frame, &face);
        }
    }
}

/// Main application entry point.
///
/// Single control thread: ticks and attach events are serialized into one face.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args(env::args().skip(1));
    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    run(config, options).await
}
