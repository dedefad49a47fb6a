//! FaceLock - CLI
//!
//! Command-line interface for sealing and sign-in.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use facelock::codec::pretty_bytes;
use facelock::seal::{sealed_file_name, PayloadInfo};
use facelock::store::write_atomic;
use facelock::{FaceLock, FaceLockConfig, FaceLockError};

#[derive(Parser)]
#[command(name = "facelock")]
#[command(version = facelock::VERSION)]
#[command(about = "FaceLock - seal files with a face image (demonstration only)")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File caching the enrolled hash
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Override the match threshold
    #[arg(short, long)]
    threshold: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal a file with a face image
    Seal {
        /// Face image
        #[arg(short, long)]
        face: PathBuf,

        /// File to seal
        input: PathBuf,

        /// Output path (default: <input name>.facelock)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// MIME type recorded in the container
        #[arg(long, default_value = "")]
        mime: String,
    },

    /// Unseal a .facelock container
    Unseal {
        /// Face image used when sealing
        #[arg(short, long)]
        face: PathBuf,

        /// Container file
        input: PathBuf,

        /// Output path (default: unlocked_<original name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the perceptual hash of an image
    Hash {
        /// Image file
        #[arg(short, long)]
        face: PathBuf,
    },

    /// Enroll a face and save it to the store
    Enroll {
        /// Face image
        #[arg(short, long)]
        face: PathBuf,
    },

    /// Liveness challenge, then match against the enrolled face
    Signin {
        /// Fresh capture
        #[arg(short, long)]
        face: PathBuf,

        /// Leave the challenge incomplete (demonstrates the liveness gate; always denied)
        #[arg(long)]
        skip_liveness: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let message = match e.downcast_ref::<FaceLockError>() {
            Some(err) => err.user_message(),
            None => format!("{:#}", e),
        };
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<FaceLockConfig> {
    let mut config = match &cli.config {
        Some(path) => FaceLockConfig::load(path)?,
        None => FaceLockConfig::default(),
    };
    if let Some(store) = &cli.store {
        config.store_path = Some(store.clone());
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    Ok(config)
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Seal { face, input, output, mime } => {
            let lock = FaceLock::new(config)?;
            let face_bytes = read(&face)?;
            let plaintext = read(&input)?;

            let name = input
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("payload")
                .to_string();
            let sealed = lock.seal(&face_bytes, &plaintext, &PayloadInfo::new(name.as_str(), mime))?;

            let output = output.unwrap_or_else(|| input.with_file_name(sealed_file_name(&name)));
            write_atomic(&output, &sealed)?;

            println!("🔐 Encrypted ✓");
            println!("   Name: {}", output.display());
            println!("   Size: {}", pretty_bytes(sealed.len() as u64));
        }

        Commands::Unseal { face, input, output } => {
            let lock = FaceLock::new(config)?;
            let container = read(&input)?;
            let face_bytes = read(&face)?;

            let opened = lock.unseal(&face_bytes, &container)?;
            let output = output.unwrap_or_else(|| input.with_file_name(opened.output_name()));
            write_atomic(&output, &opened.plaintext)?;

            println!("🔓 Decrypted ✓");
            println!("   Recovered file: {}", output.display());
            println!("   Recovered file size: {}", pretty_bytes(opened.plaintext.len() as u64));
        }

        Commands::Hash { face } => {
            let lock = FaceLock::new(config)?;
            let hash = lock.compute_hash(&read(&face)?)?;
            println!("{}", hash);
        }

        Commands::Enroll { face } => {
            if config.store_path.is_none() {
                anyhow::bail!("enroll needs --store or store_path in the config");
            }
            let mut lock = FaceLock::new(FaceLockConfig {
                persist_enrollment: true,
                ..config
            })?;
            let hex = lock.enroll(&read(&face)?)?;

            println!("✅ Face enrolled. You can now run liveness and sign in.");
            println!("   Demo Hash: {}…", &hex[..hex.len().min(64)]);
        }

        Commands::Signin { face, skip_liveness } => {
            let mut lock = FaceLock::new(config)?;
            if !lock.state().is_enrolled() {
                return Err(FaceLockError::NotEnrolled.into());
            }
            let probe = read(&face)?;

            let prompt = lock.issue_challenge();
            println!("👀 Do this: {}", prompt);
            if !skip_liveness {
                print!("   Press Enter once done… ");
                io::stdout().flush()?;
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                lock.complete_challenge()?;
                println!("   Completed: {}", prompt);
            }

            let outcome = lock.attempt_match(&probe)?;
            if outcome.accepted {
                println!("✅ Match ✓ (distance {})", outcome.distance);
            } else {
                println!("⛔ Denied ✗ (distance {})", outcome.distance);
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
