use std::process;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use clap::Parser;

use presencelock_core::capture::infrastructure::nokhwa_frame_source::{
    list_cameras, NokhwaFrameSource,
};
use presencelock_core::detection::infrastructure::detector_factory::{
    create_detector, DetectorConfig, DetectorKind,
};
use presencelock_core::detection::infrastructure::{onnx_blazeface_detector, onnx_yolo_detector};
use presencelock_core::lock::domain::lock_actuator::LockActuator;
use presencelock_core::lock::infrastructure::command_lock_actuator::CommandLockActuator;
use presencelock_core::monitor::infrastructure::blocking_tick_driver::BlockingTickDriver;
use presencelock_core::monitor::session_controller::{SessionConfig, SessionController};
use presencelock_core::monitor::session_logger::LogSessionLogger;
use presencelock_core::shared::constants::{MAX_LOCK_DELAY_SECS, MIN_LOCK_DELAY_SECS};

/// Locks the workstation when no face has been in front of the camera
/// for a configurable number of seconds.
#[derive(Parser)]
#[command(name = "presencelock")]
struct Cli {
    /// List available capture devices and exit.
    #[arg(long)]
    list_cameras: bool,

    /// Camera index to monitor (see --list-cameras).
    #[arg(long, default_value = "0")]
    camera: u32,

    /// Seconds of sustained absence before the workstation locks (1-10).
    #[arg(long, default_value = "5")]
    delay: u32,

    /// Detection strategy: blazeface (fast) or yolo (accurate).
    #[arg(long, default_value = "blazeface")]
    detector: String,

    /// Detection confidence threshold (0.0-1.0). Default depends on the
    /// chosen strategy.
    #[arg(long)]
    confidence: Option<f64>,

    /// Ignore detected faces smaller than this edge length in pixels
    /// (blazeface only).
    #[arg(long, default_value = "30")]
    min_face_size: u32,

    /// Custom lock command line, overriding the platform default.
    #[arg(long)]
    lock_command: Option<String>,

    /// Stop monitoring after this many seconds (default: run until
    /// interrupted).
    #[arg(long)]
    duration: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.list_cameras {
        return run_list_cameras();
    }

    validate(&cli)?;

    let kind: DetectorKind = cli.detector.parse()?;
    let confidence = cli.confidence.unwrap_or(match kind {
        DetectorKind::Blazeface => onnx_blazeface_detector::DEFAULT_CONFIDENCE,
        DetectorKind::Yolo => onnx_yolo_detector::DEFAULT_CONFIDENCE,
    });
    let detector = create_detector(
        kind,
        DetectorConfig {
            confidence,
            min_region_size: cli.min_face_size,
        },
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    let actuator: Box<dyn LockActuator> = match &cli.lock_command {
        Some(command_line) => Box::new(
            CommandLockActuator::from_command_line(command_line)
                .ok_or("--lock-command must not be empty")?,
        ),
        None => Box::new(CommandLockActuator::platform_default()),
    };

    let mut controller = SessionController::new();
    controller.start(
        SessionConfig::new(cli.camera, cli.delay),
        Box::new(NokhwaFrameSource::new(cli.camera)),
        detector,
        actuator,
        Box::new(LogSessionLogger::new()),
        Box::new(BlockingTickDriver),
    )?;

    // A stop request (Ctrl-C or --duration elapsing) flips the session's
    // cancellation token; the worker winds down and releases the camera
    // within one poll interval.
    if let Some(token) = controller.cancellation_token() {
        let handler_token = token.clone();
        ctrlc::set_handler(move || {
            log::info!("interrupt received, stopping");
            handler_token.store(true, Ordering::Relaxed);
        })?;

        if let Some(secs) = cli.duration {
            let timer_token = token;
            thread::spawn(move || {
                thread::sleep(Duration::from_secs(secs));
                timer_token.store(true, Ordering::Relaxed);
            });
        }
    }

    log::info!(
        "monitoring camera {} (locking after {}s of absence)",
        cli.camera,
        cli.delay
    );

    if let Some(outcome) = controller.wait() {
        log::info!(
            "monitoring ended: {} frames observed, {} locks fired",
            outcome.frames_observed,
            outcome.locks_fired
        );
    }

    Ok(())
}

fn run_list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let cameras = list_cameras()?;
    if cameras.is_empty() {
        println!("No capture devices found.");
        return Ok(());
    }
    for camera in cameras {
        println!("{camera}");
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(MIN_LOCK_DELAY_SECS..=MAX_LOCK_DELAY_SECS).contains(&cli.delay) {
        return Err(format!(
            "Delay must be between {MIN_LOCK_DELAY_SECS} and {MAX_LOCK_DELAY_SECS} seconds, got {}",
            cli.delay
        )
        .into());
    }
    if let Some(confidence) = cli.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(format!(
                "Confidence must be between 0.0 and 1.0, got {confidence}"
            )
            .into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
