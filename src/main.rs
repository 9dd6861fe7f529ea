use std::process::ExitCode;

use clap::Parser;
use sorticon::cli::Cli;
use sorticon::{config, iconset, logger};

fn run(cli: &Cli) -> sorticon::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let file_settings = config::read_config(cli.config.as_deref(), &cwd)?;
    let settings = cli.settings().or(file_settings);

    logger::init(&logger::effective_level(
        settings.log_level(),
        cli.verbose,
        cli.quiet,
    ));
    if let Some(path) = &settings.loaded_from {
        tracing::debug!(path = %path.display(), "loaded config file");
    }
    for key in &settings.unknown_keys {
        tracing::warn!(key = %key, "ignoring unknown config key");
    }

    // Colors are parsed here, so a bad color aborts before any file is written.
    let options = settings.resolve()?;
    let icons = iconset::generate(&options)?;
    for icon in &icons {
        println!("Generated: {}", icon.path.display());
    }
    if cli.manifest {
        let icons_entry = iconset::manifest_icons(&icons);
        println!("{:#}", serde_json::json!({ "icons": icons_entry }));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
