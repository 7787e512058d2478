//! airmouse — hand-gesture pointer control engine.
//!
//! Translates per-frame hand-pose observations (and optional voice
//! commands) into cursor motion and click events.  Pose estimation,
//! microphone capture, and OS pointer injection are external
//! collaborators behind the `PoseSource`, `SpeechRecognizer`, and
//! `PointerSink` seams; the binary wires the demo collaborators in.

use clap::Parser;
use tracing::info;

use airmouse::config::{self, EngineConfig};
use airmouse::{action, capture, engine, gesture, motion, runtime, voice};

#[derive(Parser, Debug)]
#[command(name = "airmouse", about = "Hand-gesture pointer control engine")]
struct Cli {
    /// Camera capture resolution as WxH
    #[arg(long, default_value = "640x480")]
    camera_resolution: String,

    /// Host display resolution as WxH
    #[arg(long, default_value = "1920x1080")]
    screen_resolution: String,

    /// Cursor smoothing divisor (higher = smoother, laggier)
    #[arg(long, default_value_t = 7.0)]
    smoothing: f64,

    /// Active region as x_min,x_max,y_min,y_max in normalized frame coords
    #[arg(long, default_value = "0.2,0.8,0.2,0.8")]
    move_region: String,

    /// Landmark driving the cursor: index or wrist
    #[arg(long, default_value = "index")]
    track: String,

    /// Click recognition policy: angle or pinch
    #[arg(long, default_value = "angle")]
    click_gate: String,

    /// Gesture memory on tracking dropout: hold or reset
    #[arg(long, default_value = "hold")]
    on_dropout: String,

    /// Minimum index/middle spread angle (degrees) for an angle-gated click
    #[arg(long, default_value_t = 33.5)]
    angle_threshold: f64,

    /// Double-click merge window in seconds
    #[arg(long, default_value_t = 0.4)]
    double_click_interval: f64,

    /// Pinch distance threshold (scaled normalized units)
    #[arg(long, default_value_t = 40.0)]
    click_distance: f64,

    /// Cooldown between pinch clicks in seconds
    #[arg(long, default_value_t = 0.5)]
    click_delay: f64,

    /// Disable the voice command channel
    #[arg(long)]
    no_voice: bool,

    /// Exit after N seconds (headless/CI testing)
    #[arg(long)]
    exit_after: Option<u64>,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn build_config(cli: &Cli) -> EngineConfig {
    let (camera_width, camera_height) = match config::parse_resolution(&cli.camera_resolution) {
        Some(dims) => dims,
        None => {
            eprintln!(
                "Invalid camera resolution: {}. Use WxH, e.g. 640x480",
                cli.camera_resolution,
            );
            std::process::exit(1);
        }
    };
    let (screen_width, screen_height) = match config::parse_resolution(&cli.screen_resolution) {
        Some(dims) => dims,
        None => {
            eprintln!(
                "Invalid screen resolution: {}. Use WxH, e.g. 1920x1080",
                cli.screen_resolution,
            );
            std::process::exit(1);
        }
    };
    let move_region = match motion::ActiveRegion::parse(&cli.move_region) {
        Some(region) => region,
        None => {
            eprintln!(
                "Invalid move region: {}. Use x_min,x_max,y_min,y_max within [0,1]",
                cli.move_region,
            );
            std::process::exit(1);
        }
    };
    let tracked_point = match engine::TrackedPoint::parse(&cli.track) {
        Some(point) => point,
        None => {
            eprintln!("Unknown tracked point: {}. Use: index or wrist", cli.track);
            std::process::exit(1);
        }
    };
    let gate = match config::GateMode::parse(&cli.click_gate) {
        Some(gate) => gate,
        None => {
            eprintln!("Unknown click gate: {}. Use: angle or pinch", cli.click_gate);
            std::process::exit(1);
        }
    };
    let dropout = match gesture::DropoutPolicy::parse(&cli.on_dropout) {
        Some(policy) => policy,
        None => {
            eprintln!("Unknown dropout policy: {}. Use: hold or reset", cli.on_dropout);
            std::process::exit(1);
        }
    };

    EngineConfig {
        camera_width,
        camera_height,
        screen_width,
        screen_height,
        smoothing: cli.smoothing,
        move_region,
        angle_threshold_deg: cli.angle_threshold,
        double_click_interval_s: cli.double_click_interval,
        click_distance: cli.click_distance,
        click_delay_s: cli.click_delay,
        tracked_point,
        gate,
        dropout,
        ..EngineConfig::default()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("airmouse {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airmouse=info".into()),
        )
        .init();

    info!("airmouse v{} starting", env!("CARGO_PKG_VERSION"));

    let config = build_config(&cli);
    info!(
        track = %cli.track,
        click_gate = %cli.click_gate,
        on_dropout = %cli.on_dropout,
        "engine configured"
    );

    let source = capture::ScriptedSource::demo();
    info!(frames = source.remaining(), "demo pose script loaded");
    let sink = action::LogSink::new();
    let recognizer: Option<Box<dyn voice::SpeechRecognizer + Send>> = if cli.no_voice {
        None
    } else {
        Some(Box::new(voice::StdinRecognizer::new()))
    };

    runtime::run(config, source, sink, recognizer, cli.exit_after)
}
