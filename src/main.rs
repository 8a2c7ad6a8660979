use clap::Parser;
use std::process::ExitCode;

use ghch::{
    Args, Result,
    cli::{self, EXIT_CODE_ERR, EXIT_CODE_OK},
    command,
};

fn initialize_logger(verbose: bool) -> Result<()> {
    let filter = if verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("ghch")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    color_eyre::install()?;
    initialize_logger(args.verbose)?;
    command::execute(&args).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => return cli::handle_parse_error(err),
    };

    match run(args).await {
        Ok(()) => ExitCode::from(EXIT_CODE_OK),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(EXIT_CODE_ERR)
        }
    }
}
