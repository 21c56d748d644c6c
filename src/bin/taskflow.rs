use anyhow::Result;
use clap::Parser;
use std::io;
use taskflow::cli::{self, Cli, CliCommand};
use taskflow::config::Config;
use taskflow::context::StandardContext;
use taskflow::controller::Dispatcher;
use taskflow::logging;

fn main() -> Result<()> {
    let args = Cli::parse();
    let ctx = StandardContext::new(args.root.clone());

    let config = match Config::load(&ctx) {
        Ok(c) => c,
        Err(e) => {
            // A broken config is reported rather than silently replaced.
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx, config.level_filter()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut dispatcher = Dispatcher::from_config(&ctx, &config)?;

    match args.command {
        Some(CliCommand::Exec { yes, lines }) => {
            cli::run_exec(&mut dispatcher, &lines, yes, &mut io::stdout().lock())?
        }
        Some(CliCommand::List) => {
            cli::print_events(&mut io::stdout().lock(), dispatcher.store().list_all())?
        }
        None => run_interactive(dispatcher)?,
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive(dispatcher: Dispatcher) -> Result<()> {
    taskflow::tui::run(dispatcher)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(mut dispatcher: Dispatcher) -> Result<()> {
    let stdin = io::stdin();
    cli::run_repl(&mut dispatcher, &mut stdin.lock(), &mut io::stdout().lock())?;
    Ok(())
}
