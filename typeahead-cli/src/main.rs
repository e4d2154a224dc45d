mod args;
mod catalog;
mod error;
mod paths;
mod printer;
mod script;

use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};
use typeahead::{Typeahead, TypeaheadConfig, TypeaheadOptions};

use crate::args::CliArgs;
use crate::catalog::Entry;
use crate::error::CliError;
use crate::printer::PrintHandlers;
use crate::script::{Flow, Session};

fn init_logging(path: &Path, level: LevelFilter) -> Result<(), CliError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let log_file = File::create(path)?;
    WriteLogger::init(level, Config::default(), log_file)
        .map_err(|e| CliError::Logging(e.to_string()))
}

async fn run(args: CliArgs) -> Result<(), CliError> {
    let log_file = args.log_file.clone().unwrap_or_else(paths::default_log_file);
    init_logging(&log_file, args.log_level)?;
    log::info!("Logging to {}", log_file.display());

    let entries = Arc::new(catalog::load_entries(&args.items)?);
    let options = match &args.options {
        Some(path) => catalog::load_options(path)?,
        None => TypeaheadOptions::default(),
    };
    let options = args.apply_overrides(options);
    log::debug!("Typeahead options: {:?}", options);

    let typeahead = Typeahead::new(TypeaheadConfig::<Entry, String>::for_items().options(options))
        .with_handlers(Arc::new(PrintHandlers));
    let session = Session::new(typeahead, entries);
    log::info!("Created typeahead {}", session.typeahead().id());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.run_line(&line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            // Bad commands and failing handlers don't end the script
            Err(e) => {
                log::warn!("Command '{}' failed: {}", line.trim(), e);
                eprintln!("error: {e}");
            }
        }
    }

    log::info!("Script finished");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
