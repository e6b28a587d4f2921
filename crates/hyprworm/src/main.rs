//! hyprworm
//!
//! Lists Hyprland windows in a dmenu-style picker and focuses the one chosen.

mod arrange;
mod hypr_ipc;
mod logging;
mod picker;
mod selection;
mod switcher;

#[cfg(test)]
mod test_utils;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use miette::IntoDiagnostic;

use crate::hypr_ipc::HyprClient;
use crate::switcher::{Outcome, RunOptions, SwitcherError};

#[derive(Parser, Debug)]
#[command(name = "hyprworm")]
#[command(about = "Window switcher for Hyprland")]
#[command(version)]
struct Args {
    /// Path to configuration file [default: ~/.config/hyprworm/config]
    #[arg(short, long)]
    config: Option<String>,

    /// Picker command, overriding the `launcher` setting
    #[arg(short, long)]
    launcher: Option<String>,

    /// Print the picker lines to stdout instead of launching the picker
    #[arg(long)]
    list: bool,

    /// Exit with an error if focusing the selected window fails
    #[arg(long)]
    strict: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    let args = Args::parse();

    // Expand tilde in config path
    let config_path: Option<PathBuf> = args
        .config
        .as_deref()
        .map(|path| shellexpand::tilde(path).into_owned().into());

    let mut config =
        logging::with_bootstrap(|| hyprworm_config::load_config(config_path.as_deref()))?;

    if let Some(launcher) = &args.launcher {
        config.launcher = launcher
            .parse()
            .map_err(|e: String| miette::miette!("Invalid --launcher: {}", e))?;
    }

    logging::init(&config);
    tracing::debug!(?config, "Configuration loaded");

    let client = HyprClient::from_env()
        .map_err(SwitcherError::from)?
        .with_timeout(config.ipc_timeout);

    let options = RunOptions {
        list_only: args.list,
        strict_dispatch: args.strict,
    };

    match switcher::run(&config, &client, options).await {
        Ok(Outcome::Listed(lines)) => {
            let mut stdout = std::io::stdout().lock();
            for line in lines {
                writeln!(stdout, "{}", line).into_diagnostic()?;
            }
            Ok(())
        }
        Ok(outcome) => {
            tracing::debug!(?outcome, "Finished");
            Ok(())
        }
        Err(e) => {
            // The miette report covers stderr; this copy is for the log file
            tracing::debug!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
