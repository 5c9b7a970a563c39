//! voicegate - speaker enrollment and verification from the command line.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use voicegate_provider::{
    Classifier, EnergyEmbedder, FrequencySummarizer, LexiconClassifier, SpeakerEmbedder,
    Summarizer,
};
use voicegate_store::{ProfileStore, DEFAULT_THRESHOLD};

/// Dimensionality of the built-in embedder. Externally computed embeddings
/// (--embedding) may use whatever their model family produces.
const EMBED_DIM: usize = 192;

/// Speaker enrollment and verification over cosine similarity.
///
/// Profiles live in a flat JSON snapshot (name -> embedding vector). Voice
/// samples come in either as a precomputed embedding (JSON float array) or
/// as raw PCM16 mono audio fed through the built-in embedder.
#[derive(Parser)]
#[command(name = "voicegate")]
#[command(about = "Speaker enrollment and verification over cosine similarity")]
#[command(version)]
struct Cli {
    /// Snapshot file holding enrolled profiles
    #[arg(long, global = true, default_value = "voice_db.json")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a reference voice under a name
    Enroll {
        /// Profile name (unique key, last write wins)
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        input: SampleInput,
    },
    /// Compare a voice sample against every enrolled profile
    Verify {
        #[command(flatten)]
        input: SampleInput,

        /// Minimum similarity to accept (strict comparison)
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
    },
    /// List enrolled profiles
    List,
    /// Remove one enrolled profile
    Remove {
        #[arg(short, long)]
        name: String,
    },
    /// Delete every enrolled profile
    Reset,
    /// Classify the sentiment of a piece of text
    Sentiment {
        #[arg(long)]
        text: String,
    },
    /// Produce an extractive summary of a piece of text
    Summarize {
        #[arg(long)]
        text: String,

        /// Maximum sentences to keep
        #[arg(short, long, default_value_t = 3)]
        sentences: usize,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SampleInput {
    /// JSON file containing an embedding vector (array of floats)
    #[arg(long)]
    embedding: Option<PathBuf>,

    /// Raw PCM16 little-endian mono audio at 16 kHz
    #[arg(long)]
    audio: Option<PathBuf>,
}

impl SampleInput {
    fn vector(&self) -> Result<Vec<f32>> {
        if let Some(path) = &self.embedding {
            let raw =
                fs::read(path).with_context(|| format!("read {}", path.display()))?;
            let v: Vec<f32> = serde_json::from_slice(&raw)
                .with_context(|| format!("parse embedding {}", path.display()))?;
            return Ok(v);
        }

        // clap's group guarantees exactly one input is present.
        let path = self.audio.as_ref().expect("input group");
        let raw = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let samples = decode_pcm16(&raw);
        let embedder = EnergyEmbedder::new(EMBED_DIM);
        Ok(embedder.embed(&samples)?)
    }
}

/// PCM16 little-endian mono -> f32 samples in [-1, 1].
fn decode_pcm16(raw: &[u8]) -> Vec<f32> {
    raw.chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / 32768.0)
        .collect()
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Enroll { name, input } => {
            let mut store = ProfileStore::open(&cli.db)?;
            store.enroll(&name, input.vector()?)?;
            println!("enrolled {name} ({} profile(s) total)", store.len());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { input, threshold } => {
            let store = ProfileStore::open(&cli.db)?;
            let vector = input.vector()?;

            for c in store.rank(&vector)? {
                println!("{:<24} {:.4}", c.name, c.score);
            }

            let result = store.verify(&vector, threshold)?;
            match result.best_name {
                None => {
                    println!("no enrollments yet");
                    Ok(ExitCode::FAILURE)
                }
                Some(name) if result.matched => {
                    println!("verified as {name} (similarity {:.4})", result.score);
                    Ok(ExitCode::SUCCESS)
                }
                Some(_) => {
                    println!(
                        "speaker not recognized (best {:.4}, threshold {threshold:.2})",
                        result.score
                    );
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::List => {
            let store = ProfileStore::open(&cli.db)?;
            if store.is_empty() {
                println!("no profiles enrolled");
            } else {
                for p in store.profiles() {
                    println!("{:<24} dim {}", p.name, p.vector.len());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Remove { name } => {
            let mut store = ProfileStore::open(&cli.db)?;
            if !store.remove(&name)? {
                bail!("no profile named {name:?}");
            }
            println!("removed {name}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Reset => {
            let mut store = ProfileStore::open(&cli.db)?;
            store.clear()?;
            println!("removed all profiles");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Sentiment { text } => {
            let label = LexiconClassifier::new().classify(&text)?;
            println!("{} ({:+.2})", label.name, label.score);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Summarize { text, sentences } => {
            let summary = FrequencySummarizer::new().summarize(&text, sentences)?;
            println!("{summary}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
