//! Shoulder goniometer application for live range-of-motion measurement.

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use shoulder_goniometer::{
    app::GoniometerApp, config::Config, landmarks::Side, measurement::MeasurementKind,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long)]
    cam: Option<i32>,

    /// Video file to process
    #[arg(short, long)]
    video: Option<String>,

    /// Arm to measure (left, right)
    #[arg(short, long, value_parser = parse_side)]
    side: Option<Side>,

    /// Measurement (ABD/ADD, FLEX/EXT, ROTATION)
    #[arg(short, long, value_parser = parse_measurement)]
    measure: Option<MeasurementKind>,

    /// Path to the pose landmark ONNX model
    #[arg(long)]
    model: Option<String>,

    /// Run without a display window
    #[arg(long)]
    headless: bool,

    /// Show the video mirrored (selfie view); measurement is unaffected
    #[arg(long)]
    mirror_view: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,
}

fn parse_side(value: &str) -> std::result::Result<Side, String> {
    value.parse().map_err(|e: shoulder_goniometer::Error| e.to_string())
}

fn parse_measurement(value: &str) -> std::result::Result<MeasurementKind, String> {
    value.parse().map_err(|e: shoulder_goniometer::Error| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Shoulder Goniometer");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line flags take precedence over the file
    if let Some(cam) = args.cam {
        config.camera.index = cam;
    }
    if let Some(video) = args.video {
        config.camera.video_path = Some(video);
    }
    if let Some(side) = args.side {
        config.measurement.side = side;
    }
    if let Some(kind) = args.measure {
        config.measurement.kind = kind;
    }
    if let Some(model) = args.model {
        config.model.pose_landmarks = model.into();
    }
    if args.headless {
        config.display.enabled = false;
    }
    if args.mirror_view {
        config.display.mirror_view = true;
    }

    config.validate()?;

    let mut app = GoniometerApp::new(&config)?;
    let range = app.run()?;

    println!("MAX: {:.2}", range.max_angle);
    println!("MIN: {:.2}", range.min_angle);

    Ok(())
}
