//! `postbox-submit`: send or list submissions from the command line.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use postbox::client::{ClientError, SubmissionClient};

const GENERIC_FAILURE: &str = "Something went wrong, please try again.";

#[derive(Parser)]
#[command(name = "postbox-submit", about = "Send an address to a postbox server")]
struct Cli {
    /// Base URL of the postbox server.
    #[arg(long, env = "POSTBOX_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit an address.
    Send {
        /// Address text, sent verbatim.
        address: String,
    },
    /// List every stored submission.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = SubmissionClient::new(cli.url, Duration::from_secs(cli.timeout_secs))?;

    match cli.command {
        Command::Send { address } => match client.submit(&address).await {
            Ok(submission) => {
                println!("Message sent. Thank you for sharing this with me. (#{})", submission.id);
                Ok(ExitCode::SUCCESS)
            }
            Err(ClientError::EmptyAddress) => {
                eprintln!("Please write something before sending.");
                Ok(ExitCode::FAILURE)
            }
            Err(err) => {
                eprintln!("{GENERIC_FAILURE}\n  {err}");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::List => match client.list().await {
            Ok(submissions) => {
                for s in submissions {
                    println!("{}\t{}\t{}", s.id, s.created_at.to_rfc3339(), s.address);
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{GENERIC_FAILURE}\n  {err}");
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
