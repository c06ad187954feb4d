mod cli;
mod config;
mod error;

use std::{process, time::Duration};

use clap::{CommandFactory, Parser};
#[cfg(feature = "colored-output")]
use colored::*;
use hipchat_notify::{AlertContext, HipChatAlarmCallback, http};
use tracing::{Level, error, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::{
    cli::{Args, Commands},
    config::Overrides,
    error::{AppError, Result},
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        #[cfg(feature = "colored-output")]
        {
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
        #[cfg(not(feature = "colored-output"))]
        {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    init_logging(args.verbose, args.quiet, args.log_json)?;

    match args.command {
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            return Ok(());
        }
        Commands::Fields => {
            let fields = HipChatAlarmCallback::requested_configuration();
            println!("{}", serde_json::to_string_pretty(&fields)?);
            return Ok(());
        }
        _ => {}
    }

    let overrides = Overrides {
        api_token: args.api_token,
        room: args.room,
        api_base_url: args.api_base_url,
    };
    let configuration = config::load(args.config.as_deref(), overrides, args.fill_defaults)?;
    let client = http::build_client(Duration::from_secs(args.timeout))?;
    let callback = HipChatAlarmCallback::with_client(configuration, client);

    match args.command {
        Commands::Check => {
            callback.check_configuration()?;
            println!("✓ Configuration is valid");
        }
        Commands::Attributes => {
            println!("{}", serde_json::to_string_pretty(&callback.attributes())?);
        }
        Commands::Send {
            stream,
            description,
        } => {
            callback.check_configuration()?;
            let alert = AlertContext::new(stream, description);
            callback.send(&alert).await?;
            info!(stream = %alert.stream_title, "Notification delivered");
            println!("✓ Notification delivered");
        }
        Commands::Completions { .. } | Commands::Fields => {}
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool, json: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(verbose)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}
