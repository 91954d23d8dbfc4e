use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use carbonscope::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.get_command() {
        cli::Commands::Estimate {
            usage,
            region,
            day,
            start,
            end,
            json,
        } => {
            commands::estimate::execute(
                &args.regions,
                &args.profiles,
                &usage,
                &region,
                day,
                start,
                end,
                json,
            )?;
        }
        cli::Commands::Serve { host, port } => {
            commands::serve::execute(&args.regions, &args.profiles, &host, port).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.regions, &args.profiles)?,
            cli::ConfigCommands::Validate => {
                commands::config::validate(&args.regions, &args.profiles)?
            }
        },
        cli::Commands::Version => {
            println!("carbonscope v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
