use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use facecapture_core::capture::infrastructure::recorded_landmark_source::RecordedLandmarkSource;
use facecapture_core::features::domain::feature_extractor::FeatureExtractor;
use facecapture_core::features::domain::metric_result::MetricResult;
use facecapture_core::features::domain::metric_table::{HeadWidthFormula, MetricTable};
use facecapture_core::persistence::domain::persisted_record::PersistedRecord;
use facecapture_core::persistence::infrastructure::text_file_sink::TextFileSink;
use facecapture_core::session::domain::capture_session::CaptureSession;
use facecapture_core::session::infrastructure::ingestion_worker::{
    spawn_ingestion, IngestionConfig, IngestionHandle,
};
use facecapture_core::session::infrastructure::shared_session::SharedSession;
use facecapture_core::session::session_logger::StdoutSessionLogger;
use facecapture_core::shared::settings::CaptureSettings;

/// Facial landmark capture and anthropometric feature extraction.
#[derive(Parser)]
#[command(name = "facecapture")]
struct Cli {
    /// Settings file (defaults to the user config directory).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one whole session from a landmark recording and save it.
    Replay {
        #[command(flatten)]
        session: SessionArgs,

        /// Subject name the averages are stored under.
        #[arg(long)]
        name: String,

        /// Compute and print, but do not save.
        #[arg(long)]
        dry_run: bool,
    },
    /// Feed a recording in the background and take commands from stdin.
    Console {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the records in a subject store file.
    Show {
        /// Store file, e.g. FaceofAlice.txt.
        store: PathBuf,
    },
    /// Print the effective settings, optionally writing them to disk.
    Settings {
        /// Write the settings to the --settings path or the user config file.
        #[arg(long)]
        write: bool,
    },
}

#[derive(Args)]
struct SessionArgs {
    /// Landmark recording (JSON lines: `null` or 121 [x, y, z] triples).
    recording: PathBuf,

    /// Directory for subject store files.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// HeadWidth arithmetic: legacy or euclidean.
    #[arg(long)]
    head_width: Option<HeadWidthFormula>,

    /// Milliseconds between recorded ticks.
    #[arg(long)]
    tick_ms: Option<u64>,
}

/// Settings after CLI overrides.
struct Resolved {
    output_dir: PathBuf,
    head_width: HeadWidthFormula,
    tick: Duration,
    progress_every: usize,
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
    let settings = match &cli.settings {
        Some(path) => CaptureSettings::load_from(path)?,
        None => CaptureSettings::load(),
    };

    match cli.command {
        Commands::Replay {
            session,
            name,
            dry_run,
        } => run_replay(&session, &resolve(&settings, &session), &name, dry_run),
        Commands::Console { session } => run_console(&session, &resolve(&settings, &session)),
        Commands::Show { store } => run_show(&store),
        Commands::Settings { write } => run_settings(&settings, cli.settings.as_deref(), write),
    }
}

fn resolve(settings: &CaptureSettings, args: &SessionArgs) -> Resolved {
    Resolved {
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| settings.output_dir.clone()),
        head_width: args.head_width.unwrap_or(settings.head_width),
        tick: Duration::from_millis(args.tick_ms.unwrap_or(settings.tick_ms)),
        progress_every: settings.progress_every,
    }
}

fn new_session(resolved: &Resolved) -> SharedSession {
    let extractor = FeatureExtractor::new(MetricTable::standard(resolved.head_width));
    SharedSession::new(CaptureSession::new(extractor))
}

fn start_ingestion(
    recording: &Path,
    session: &SharedSession,
    resolved: &Resolved,
) -> Result<IngestionHandle, Box<dyn std::error::Error>> {
    let source = RecordedLandmarkSource::open(recording)?;
    Ok(spawn_ingestion(
        Box::new(source),
        session.clone(),
        IngestionConfig::new(resolved.tick),
        Box::new(StdoutSessionLogger::new(resolved.progress_every)),
    ))
}

fn run_replay(
    args: &SessionArgs,
    resolved: &Resolved,
    name: &str,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = new_session(resolved);
    session.start()?;

    let stats = start_ingestion(&args.recording, &session, resolved)?.join()?;
    log::info!(
        "Replayed {} ticks ({} track failures, {} committed)",
        stats.ticks,
        stats.track_failures,
        stats.committed
    );

    session.stop()?;
    let result = session.compute()?;
    print_result(&result);

    if dry_run {
        session.discard_and_reset()?;
        return Ok(());
    }

    let mut sink = TextFileSink::new(&resolved.output_dir);
    session.save_and_reset(name, &mut sink)?;
    log::info!("Record written to {}", sink.path_for(name)?.display());
    Ok(())
}

fn run_console(
    args: &SessionArgs,
    resolved: &Resolved,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = new_session(resolved);
    let handle = start_ingestion(&args.recording, &session, resolved)?;
    let mut sink = TextFileSink::new(&resolved.output_dir);

    eprintln!("Commands: start, stop, compute, save <name>, discard, status, quit");
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let mut parts = line.trim().splitn(2, ' ');
        let outcome = match (parts.next().unwrap_or(""), parts.next().map(str::trim)) {
            ("", _) => continue,
            ("start", _) => session.start(),
            ("stop", _) => session.stop(),
            ("compute", _) => session.compute().map(|r| print_result(&r)),
            ("save", Some(name)) if !name.is_empty() => session
                .save_and_reset(name, &mut sink)
                .map(|r| eprintln!("Saved '{}'", r.name)),
            ("save", _) => {
                eprintln!("Usage: save <name>");
                continue;
            }
            ("discard", _) => session.discard_and_reset(),
            ("status", _) => {
                eprintln!("{} ({} frames)", session.state(), session.count());
                continue;
            }
            ("quit" | "exit", _) => break,
            (other, _) => {
                eprintln!("Unknown command '{other}'");
                continue;
            }
        };

        match outcome {
            Ok(()) => eprintln!("-> {} ({} frames)", session.state(), session.count()),
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    handle.cancel();
    let stats = handle.join()?;
    log::info!("Ingestion ended after {} ticks", stats.ticks);
    Ok(())
}

fn run_show(store: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(store)?;
    let names: Vec<&str> = MetricTable::default().names().collect();
    for record in PersistedRecord::parse_all(&text)? {
        println!("{}", record.name);
        for (name, value) in names.iter().zip(record.values) {
            println!("  {name:22} {value:.6}");
        }
    }
    Ok(())
}

fn run_settings(
    settings: &CaptureSettings,
    explicit: Option<&Path>,
    write: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    if !write {
        return Ok(());
    }

    let path = explicit
        .map(Path::to_path_buf)
        .or_else(CaptureSettings::config_path)
        .ok_or("No user config directory available")?;
    settings.save_to(&path)?;
    log::info!("Settings written to {}", path.display());
    Ok(())
}

fn print_result(result: &MetricResult) {
    println!("Averaged over {} frames:", result.frames_used());
    for (name, value) in result.entries() {
        println!("  {name:22} {value:.6}");
    }
}
