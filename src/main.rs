use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use polly_uploader::{
    AppResult, ArtifactName, ArtifactUploader, Pipeline, PollySynthesizer, ResolvedInputs,
    RunOutcome, RunTimestamp, UploaderConfig, build_s3_store, load_sdk_config,
};

/// Polly Uploader - Synthesize a text file with Amazon Polly and store the audio in S3
#[derive(Parser, Debug)]
#[command(name = "polly-uploader")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Text file to synthesize
    #[arg(value_name = "TEXT_FILE")]
    text_file: Option<PathBuf>,

    /// Destination S3 bucket
    #[arg(value_name = "BUCKET")]
    bucket: Option<String>,

    /// Folder inside the bucket
    #[arg(value_name = "FOLDER")]
    folder: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Captured before anything else so the artifact name reflects the start of the run
    let started_at = RunTimestamp::now();

    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Initialize crypto provider for TLS connections
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("Crypto provider already installed");
    }

    let cli = Cli::parse();

    match run(cli, started_at).await {
        Ok(outcome) => {
            debug!(?outcome, "Finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.prints_to_stdout() {
                println!("{err}");
            } else {
                eprintln!("{err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli, started_at: RunTimestamp) -> AppResult<RunOutcome> {
    // Arguments are checked before any file or network access
    let inputs = ResolvedInputs::resolve(cli.text_file, cli.bucket, cli.folder)?;

    let config = match cli.config.as_deref() {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            UploaderConfig::from_file(path)?
        }
        None => UploaderConfig::from_env()?,
    };

    let sdk_config = load_sdk_config(config.region.as_deref()).await;
    let synthesizer = PollySynthesizer::from_sdk_config(&sdk_config);
    let store = build_s3_store(&sdk_config, &config.storage, &inputs.bucket)?;

    let uploader = ArtifactUploader::new(
        store,
        inputs.bucket.clone(),
        ArtifactName::from_timestamp(&started_at),
    )
    .with_scratch_dir(config.audio.scratch_dir())
    .with_extension(synthesizer.speech_config().file_extension())
    .with_content_type(synthesizer.speech_config().mime_type())
    .with_local_copy(config.audio.local_copy.clone());

    let pipeline = Pipeline::new(Box::new(synthesizer), uploader, config.on_unreachable);
    pipeline.run(&inputs).await
}
