#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, colors};

mod config;
mod errors;
mod orchestrator;
mod ordering;
mod resolver;
mod spec;
mod ui;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::Order(command) => {
      let config = ui::commands::OrderConfig::from_command(command)?;
      ui::commands::order_operations(config, &colors)?;
    }
    Commands::Validate(command) => ui::commands::validate_spec(&command, &colors)?,
    Commands::Resolve(command) => ui::commands::resolve_definitions(&command)?,
  }

  Ok(())
}
