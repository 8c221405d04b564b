use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, VocabularyApp};
use storage::repository::Storage;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Snapshot};

/// Exit status used after an interrupt, matching the shell convention for SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Parser)]
#[command(name = "vocab", about = "Vocabulary flashcards in the terminal", version)]
struct Args {
    /// JSON file holding the vocabulary list
    #[arg(long, env = "VOCAB_DATA_FILE", default_value = "vocabulary.json")]
    data_file: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "VOCAB_LOG", default_value = "warn")]
    log_level: String,

    /// Seed for the quiz shuffle (random when omitted)
    #[arg(long, env = "VOCAB_SEED")]
    seed: Option<u64>,

    /// Do not write the vocabulary file when leaving through the menu
    #[arg(long)]
    no_save_on_exit: bool,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs go to stderr so they never interleave with prompts.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn save_snapshot(storage: &Storage, snapshots: &watch::Receiver<Snapshot>) {
    let snapshot = snapshots.borrow().clone();
    if !snapshot.unsaved {
        return;
    }
    match storage.entries.save_entries(&snapshot.entries) {
        Ok(()) => eprintln!("\nSaved {} words.", snapshot.entries.len()),
        Err(err) => {
            tracing::warn!(%err, "interrupt save failed");
            eprintln!("\nWarning: could not save ({err}).");
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);
    tracing::debug!(?args, "starting");

    let storage = Storage::json_file(&args.data_file);
    let mut app = VocabularyApp::open(Clock::default_clock(), &storage);
    let (tx, rx) = watch::channel(Snapshot::of(&app));

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let save_on_exit = !args.no_save_on_exit;

    // Reading stdin blocks, so the menu runs off the async workers.
    let menu = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut cli = Cli::new(stdin.lock(), stdout.lock(), rng).with_snapshots(tx);
        cli.run(&mut app, save_on_exit)
    });

    tokio::select! {
        result = menu => {
            result
                .context("menu loop panicked")?
                .context("terminal I/O failed")?;
            Ok(())
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl+c")?;
            tracing::info!("interrupt received, saving before exit");
            save_snapshot(&storage, &rx);
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
