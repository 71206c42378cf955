// hubstats: GitHub repository statistics in the terminal.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hubstats::app::App;
use hubstats::error::Result;
use hubstats::records::Dataset;
use hubstats::report::{DEFAULT_AUTHOR_LIMIT, Report};
use hubstats::repo_client::RepoClient;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "hubstats=info" } else { "hubstats=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config = args.client_config();
    let mut client = RepoClient::new(&args.owner, &args.repo, config).await?;

    let command = args.command.unwrap_or(Command::Show {
        authors: DEFAULT_AUTHOR_LIMIT,
    });
    match command {
        Command::Show { authors } => {
            let report = Report::collect(&mut client, authors).await?;

            let mut terminal = ratatui::init();
            let result = App::new(report).run(&mut terminal);
            ratatui::restore();
            result?;
        }
        Command::Fetch => {
            let contributions = client.contributors().await?;
            let counts = [
                (Dataset::TotalContributions, contributions.totals.len()),
                (Dataset::WeeklyContributions, contributions.weekly.len()),
                (Dataset::CodeFrequency, client.code_frequency().await?.len()),
                (Dataset::Issues, client.issues().await?.len()),
                (Dataset::Stargazers, client.stargazers().await?.len()),
                (Dataset::CommitActivity, client.commit_activity().await?.len()),
            ];

            println!("{}", client.cache_dir().display());
            for (dataset, count) in counts {
                println!("  {:<22} {:>8}", dataset.file_stem(), count);
            }
        }
        Command::ClearCache => {
            client.delete_cache()?;
            println!("Cleared {}", client.cache_dir().display());
        }
        Command::User { login } => {
            let profile = client.user_profile(&login).await?;
            println!("{}", profile.login);
            if let Some(name) = &profile.name {
                println!("  name:       {}", name);
            }
            if let Some(company) = &profile.company {
                println!("  company:    {}", company);
            }
            if let Some(location) = &profile.location {
                println!("  location:   {}", location);
            }
            println!("  repos:      {}", profile.public_repos);
            println!(
                "  followers:  {} (following {})",
                profile.followers, profile.following
            );
            println!("  joined:     {}", profile.created_at.date_naive());
        }
    }

    Ok(())
}
