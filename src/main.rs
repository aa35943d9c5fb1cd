use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // serve and analyze initialize tracing themselves once the configured
    // level and format are known
    match args.get_command() {
        cli::Commands::Serve => {
            commands::serve::execute(&args.config).await?;
        }
        cli::Commands::Analyze { image, model } => {
            commands::analyze::execute(&args.config, &image, model).await?;
        }
        cli::Commands::Models => commands::models::execute(),
        cli::Commands::Config { action } => {
            product_lens::init_tracing("warn", "pretty");
            match action {
                cli::ConfigCommands::Show => commands::config::show(&args.config)?,
                cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
            }
        }
    }

    Ok(())
}
