use anyhow::{Context, Result};
use clap::Parser;
use speaker_notify::mail::{DirMailer, SmtpMailer};
use speaker_notify::{Pipeline, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "speaker-notify",
    about = "Email each confirmed speaker their session schedule"
)]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Config file, read before SPEAKER_NOTIFY_* environment variables.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the emails as .eml files into DIR instead of sending them.
    #[arg(long, value_name = "DIR")]
    dry_run: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env first, so it can set RUST_LOG
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbosity))
        .init();
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let settings = Settings::load(cli.config.as_deref()).context("loading configuration")?;
    tracing::debug!(?settings, "configuration loaded");

    let pipeline = Pipeline::new(&settings);
    let summary = match &cli.dry_run {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "dry run, emails are written to disk");
            pipeline.run(&DirMailer::new(dir)).await?
        }
        None => {
            let mailer =
                SmtpMailer::from_config(&settings.email).context("configuring SMTP transport")?;
            pipeline.run(&mailer).await?
        }
    };

    tracing::info!(
        speakers = summary.speakers,
        composed = summary.composed,
        sent = summary.sent,
        "done"
    );
    Ok(())
}

/// RUST_LOG wins over -v.
fn log_filter(verbosity: u8) -> EnvFilter {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "speaker-notify",
            "-vv",
            "--config",
            "bdxio.toml",
            "--dry-run",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.verbosity, 2);
        assert_eq!(cli.config, Some(PathBuf::from("bdxio.toml")));
        assert_eq!(cli.dry_run, Some(PathBuf::from("out")));
    }

    #[test]
    fn everything_is_optional() {
        let cli = Cli::try_parse_from(["speaker-notify"]).unwrap();

        assert_eq!(cli.verbosity, 0);
        assert!(cli.config.is_none());
        assert!(cli.dry_run.is_none());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["speaker-notify", "--force"]).is_err());
    }

    #[test]
    fn log_filter_reads_rust_log_from_dotenv() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter(1).to_string(), "debug");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "RUST_LOG=warn\n").unwrap();
        dotenvy::from_path(&path).unwrap();

        assert_eq!(log_filter(0).to_string(), "warn");

        std::env::remove_var("RUST_LOG");
    }
}
