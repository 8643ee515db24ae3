//! vectorize: command line front end for the image-to-SVG service.
//!
//! Two subcommands:
//!
//! - `encode` prints the base64 `imageData` payload of an image, for
//!   pasting into a GraphQL console.
//! - `convert` runs the same upload state machine as the web client
//!   against the service and writes the returned SVG to disk.
//!
//! # Usage
//!
//! ```text
//! vectorize encode photo.png
//! vectorize convert photo.png --endpoint http://127.0.0.1:8000/graphql -o photo.svg
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod http;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vectorize_core::{ClientConfig, FileReadError, UploadError, UploadWidget, encode};

use crate::http::ReqwestClient;

/// Convert raster images to SVG through the vectorize GraphQL service.
#[derive(Parser)]
#[command(name = "vectorize", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the base64 payload of an image.
    Encode {
        /// Path to the image file.
        image_path: PathBuf,
    },
    /// Upload an image and save the returned SVG.
    Convert {
        /// Path to the input image (PNG or JPEG).
        image_path: PathBuf,

        /// GraphQL endpoint URL.
        #[arg(long, default_value = ClientConfig::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Full client config as a JSON string.
        ///
        /// When provided, `--endpoint` is ignored.
        #[arg(long)]
        config_json: Option<String>,

        /// Where to write the SVG. Defaults to `generated_image.svg`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Errors that end a CLI run.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Image file not found at '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid --config-json: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to initialize HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Command::Encode { image_path } => run_encode(&image_path, &mut io::stdout().lock()),
        Command::Convert {
            image_path,
            endpoint,
            config_json,
            output,
        } => {
            let config = match config_json {
                Some(json) => serde_json::from_str(&json).map_err(CliError::from),
                None => Ok(ClientConfig { endpoint }),
            };
            match config {
                Ok(config) => run_convert(&image_path, config, output).await,
                Err(e) => Err(e),
            }
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `err` followed by every cause not already part of its message.
fn render_error(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str("\n  caused by: ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

fn read_image(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CliError::NotFound(path.to_path_buf())
        } else {
            CliError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Print the base64 payload of `path`, framed for copy-pasting.
fn run_encode(path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let bytes = read_image(path)?;
    if encode::detect_format(&bytes).is_none() {
        tracing::warn!(path = %path.display(), "file is not a PNG or JPEG; the service will reject it");
    }
    let payload = encode::encode_payload(&bytes);

    let to_stdout = |e: io::Error| CliError::Write {
        path: PathBuf::from("<stdout>"),
        source: e,
    };
    writeln!(out, "--- COPY THIS BASE64 STRING ---").map_err(to_stdout)?;
    writeln!(out, "{}", payload.as_str()).map_err(to_stdout)?;
    writeln!(out, "-------------------------------").map_err(to_stdout)?;
    Ok(())
}

/// Upload `path` and write the returned SVG.
async fn run_convert(
    path: &Path,
    config: ClientConfig,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let client = ReqwestClient::new(config)?;
    let mut widget = UploadWidget::new();

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let ticket = widget.select_file(name);
    let read = read_image(path).map_err(|e| FileReadError(e.to_string()));
    widget.complete_read(ticket, read);
    if let Some(error) = widget.error() {
        return Err(error.clone().into());
    }

    widget.submit_upload(&client).await?;

    let Some(artifact) = widget.svg_artifact() else {
        return Err(UploadError::MalformedResponse.into());
    };
    let output = output.unwrap_or_else(|| PathBuf::from(artifact.filename));
    std::fs::write(&output, artifact.contents).map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;
    println!("SVG written to {}", output.display());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_with_defaults() {
        let cli = Cli::try_parse_from(["vectorize", "convert", "cat.png"]).unwrap();
        match cli.command {
            Command::Convert {
                image_path,
                endpoint,
                config_json,
                output,
            } => {
                assert_eq!(image_path, PathBuf::from("cat.png"));
                assert_eq!(endpoint, ClientConfig::DEFAULT_ENDPOINT);
                assert!(config_json.is_none());
                assert!(output.is_none());
            }
            Command::Encode { .. } => unreachable!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["vectorize", "encode", "-vv", "cat.png"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn encode_frames_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bytes.bin");
        std::fs::write(&path, b"hello").unwrap();

        let mut out = Vec::new();
        run_encode(&path, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "--- COPY THIS BASE64 STRING ---",
                "aGVsbG8=",
                "-------------------------------"
            ]
        );
    }

    #[test]
    fn encode_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = run_encode(&path, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
        assert!(err.to_string().contains("missing.png"));
    }

    #[tokio::test]
    async fn convert_rejects_non_image_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not an image").unwrap();

        // Nothing listens here; reaching the network would fail differently.
        let config = ClientConfig {
            endpoint: "http://127.0.0.1:9/graphql".into(),
        };
        let err = run_convert(&path, config, None).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Upload(UploadError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn convert_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.png");
        let err = run_convert(&path, ClientConfig::default(), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to read file.");

        let rendered = render_error(&err);
        assert!(rendered.starts_with("Failed to read file."));
        assert!(rendered.contains("caused by: Image file not found at"));
        assert!(rendered.contains("gone.png"));
    }

    #[test]
    fn rendered_errors_do_not_repeat_causes() {
        let err = CliError::from(UploadError::from(vectorize_core::ClientError::Graphql(
            "Invalid input: Incorrect padding".into(),
        )));
        assert_eq!(render_error(&err), "Error: Invalid input: Incorrect padding");
    }
}
