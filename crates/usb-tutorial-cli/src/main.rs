//! USB Tutorial Control Tool
//!
//! CLI for the tutorial devices: blink the LED, push an image to the
//! display, and stream readings from the voltage logger.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::RgbImage;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use usb_tutorial_hw::display::parse_hex_color;
use usb_tutorial_hw::{
    list_devices, load_image, DeviceKind, DeviceTransport, DisplayDevice, LedDevice, LoggerDevice,
    Sample, DISPLAY_HEIGHT, DISPLAY_WIDTH,
};

use config::Config;

#[derive(Parser)]
#[command(name = "usbtut")]
#[command(about = "Control tool for the USB tutorial devices")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Blink the LED on the blinky device
    Blink {
        /// Toggle interval in milliseconds (default from config: 600)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: Option<u64>,

        /// Stop after this many toggles
        #[arg(long)]
        count: Option<u64>,
    },
    /// Show an image or a solid color on the display
    Display {
        /// Image file (must be 128x160 unless --fit is given)
        #[arg(required_unless_present = "color")]
        image: Option<PathBuf>,

        /// Scale the image to the display size
        #[arg(long, requires = "image")]
        fit: bool,

        /// Fill with a color in hex format (e.g., #FF0000 for red)
        #[arg(long, conflicts_with = "image")]
        color: Option<String>,
    },
    /// Print voltages read from the logger
    Log {
        /// Stop after this many packets
        #[arg(long)]
        count: Option<u64>,

        /// Print one JSON object per sample
        #[arg(long)]
        json: bool,
    },
    /// List attached tutorial devices
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Commands::Blink { interval_ms, count } => handle_blink(&config, interval_ms, count).await,
        Commands::Display { image, fit, color } => handle_display(&config, image, fit, color),
        Commands::Log { count, json } => handle_log(&config, count, json).await,
        Commands::List => handle_list(&config),
    }
}

async fn handle_blink(config: &Config, interval_ms: Option<u64>, count: Option<u64>) -> Result<()> {
    let mut led = LedDevice::open(config.vendor_id, config.blinky.product_id, config.timeout())
        .context("Failed to open blinky device")?;

    let interval = Duration::from_millis(interval_ms.unwrap_or(config.blinky.interval));
    run_blink(
        &mut led,
        interval,
        count,
        tokio::signal::ctrl_c(),
        &mut std::io::stdout(),
    )
    .await?;
    Ok(())
}

/// Toggles the LED every `interval` until `shutdown` resolves or `count`
/// toggles are done, then leaves it off. Returns the number of toggles.
async fn run_blink<T, F, W>(
    led: &mut LedDevice<T>,
    interval: Duration,
    count: Option<u64>,
    shutdown: F,
    out: &mut W,
) -> Result<u64>
where
    T: DeviceTransport,
    F: Future,
    W: Write,
{
    let mut ticker = tokio::time::interval(interval);
    tokio::pin!(shutdown);

    let mut toggles = 0u64;
    while count.map_or(true, |n| toggles < n) {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                debug!("Interrupted");
                break;
            }
            _ = ticker.tick() => {
                let on = led.toggle().context("Failed to switch LED")?;
                writeln!(out, "LED {}", if on { "on" } else { "off" })?;
                toggles += 1;
            }
        }
    }

    if led.is_on() {
        led.off().context("Failed to switch LED off")?;
    }
    Ok(toggles)
}

/// What `display` sends, resolved before the device is opened.
enum Frame {
    Color(u16),
    Image(RgbImage),
}

fn handle_display(
    config: &Config,
    image: Option<PathBuf>,
    fit: bool,
    color: Option<String>,
) -> Result<()> {
    let frame = match (image, color) {
        (_, Some(color)) => {
            let value =
                parse_hex_color(&color).with_context(|| format!("Invalid color: {}", color))?;
            Frame::Color(value)
        }
        (Some(path), None) => {
            let size = fit.then_some((DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32));
            let image = load_image(&path, size)
                .with_context(|| format!("Failed to load image {}", path.display()))?;
            Frame::Image(image)
        }
        (None, None) => anyhow::bail!("Either an image or --color is required"),
    };

    let display =
        DisplayDevice::open(config.vendor_id, config.display.product_id, config.timeout())
            .context("Failed to open display device")?;
    let sent = match frame {
        Frame::Color(color) => display.clear(color),
        Frame::Image(image) => display.draw_image(&image),
    };
    sent.context("Failed to send frame")?;
    println!("Frame sent ({}x{})", DISPLAY_WIDTH, DISPLAY_HEIGHT);
    Ok(())
}

async fn handle_log(config: &Config, count: Option<u64>, json: bool) -> Result<()> {
    let logger = Arc::new(
        LoggerDevice::open(config.vendor_id, config.logger.product_id, config.timeout())
            .context("Failed to open logger device")?,
    );
    run_log(
        logger,
        count,
        json,
        tokio::signal::ctrl_c(),
        &mut std::io::stdout(),
    )
    .await?;
    Ok(())
}

/// Prints samples until `shutdown` resolves or `count` packets arrived.
///
/// Timeouts are retried and do not count as packets; any other error ends
/// the loop. Returns the number of packets printed.
async fn run_log<T, F, W>(
    logger: Arc<LoggerDevice<T>>,
    count: Option<u64>,
    json: bool,
    shutdown: F,
    out: &mut W,
) -> Result<u64>
where
    T: DeviceTransport + Send + Sync + 'static,
    F: Future,
    W: Write,
{
    tokio::pin!(shutdown);

    let mut packets = 0u64;
    while count.map_or(true, |n| packets < n) {
        let reader = Arc::clone(&logger);
        let read = tokio::task::spawn_blocking(move || reader.read_samples());

        let samples = tokio::select! {
            biased;
            _ = &mut shutdown => {
                debug!("Interrupted");
                break;
            }
            result = read => result.context("Logger read task failed")?,
        };

        match samples {
            Ok(samples) => {
                for sample in samples {
                    write_sample(out, sample, json)?;
                }
                packets += 1;
            }
            Err(e) if e.is_timeout() => debug!("No data within timeout, retrying"),
            Err(e) => return Err(e).context("Failed to read samples"),
        }
    }
    Ok(packets)
}

fn write_sample<W: Write>(out: &mut W, sample: Sample, json: bool) -> Result<()> {
    if json {
        let line = serde_json::json!({
            "raw": sample.raw(),
            "voltage": sample.voltage(),
        });
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    } else {
        writeln!(out, "{}", sample)?;
    }
    Ok(())
}

fn handle_list(config: &Config) -> Result<()> {
    let devices = list_devices(config.vendor_id).context("Failed to enumerate USB devices")?;
    if devices.is_empty() {
        println!("No devices with vendor ID {:04X} found", config.vendor_id);
        return Ok(());
    }

    for device in devices {
        let kind = DeviceKind::from_product_id(device.product_id)
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "Bus {:03} Device {:03}: ID {:04x}:{:04x} {}",
            device.bus, device.address, device.vendor_id, device.product_id, kind
        );
    }
    Ok(())
}
