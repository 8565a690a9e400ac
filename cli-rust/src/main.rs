use clap::{Parser, Subcommand};
use futures::{stream, Stream};
use idea_forge_sdk::{
    DepthRequest, ForgeClient, ForgeClientOptions, IndependentRequest, BASE_URL_ENV,
    DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD,
};
use std::{error::Error, io};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::Output;

pub type BoxedError = Box<dyn Error + Send + Sync>;

/// Command-line front end for an Idea Forge server.
#[derive(Parser, Debug)]
#[command(name = "idea-forge", version, about)]
struct Cli {
    /// Base URL of the Idea Forge server.
    #[arg(long, global = true, env = BASE_URL_ENV)]
    api_url: Option<String>,

    /// Print raw JSON instead of formatted text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single idea for a track.
    Independent {
        #[arg(short, long)]
        track: String,
        #[arg(short, long, default_value = "")]
        requirements: String,
    },
    /// Iterate on a problem until an idea scores above the threshold.
    Depth {
        #[arg(short, long)]
        track: String,
        #[arg(short, long)]
        problem: String,
        #[arg(long, default_value_t = DEFAULT_THRESHOLD,
              value_parser = clap::value_parser!(u32).range(1..=9))]
        threshold: u32,
        #[arg(short, long = "max-iter", default_value_t = DEFAULT_MAX_ITERATIONS,
              value_parser = clap::value_parser!(u32).range(1..=20))]
        max_iterations: u32,
    },
    /// Ask the server to stop the running depth search.
    Stop,
    /// Show what the server is doing.
    Status,
}

/// One item per Ctrl-C press. Ends if the handler cannot be installed.
fn ctrl_c_presses() -> impl Stream<Item = ()> {
    stream::unfold((), |()| async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Some(((), ())),
            Err(error) => {
                tracing::warn!(%error, "failed to listen for Ctrl-C");
                None
            }
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let output = if cli.json { Output::Json } else { Output::Text };
    let client = ForgeClient::new(ForgeClientOptions {
        base_url: cli.api_url,
    });
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Independent {
            track,
            requirements,
        } => {
            let request = IndependentRequest::new(track).with_requirements(requirements);
            commands::independent(&client, request, &mut out, output).await?;
        }
        Command::Depth {
            track,
            problem,
            threshold,
            max_iterations,
        } => {
            let request = DepthRequest::new(track, problem)
                .with_threshold(threshold)
                .with_max_iterations(max_iterations);
            commands::depth(&client, request, &mut out, output, ctrl_c_presses()).await?;
        }
        Command::Stop => commands::stop(&client, &mut out).await?,
        Command::Status => commands::status(&client, &mut out, output).await?,
    }

    Ok(())
}
