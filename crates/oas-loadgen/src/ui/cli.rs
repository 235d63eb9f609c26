use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas-loadgen")]
#[command(author, version, about = "OpenAPI to dependency-ordered load-test plan generator")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Produce the dependency-ordered operation sequence for a specification
  Order(OrderCommand),
  /// Report resources no ordered operation ever produces
  Validate(ValidateCommand),
  /// Resolve definitions into flat data-generation templates
  Resolve(ResolveCommand),
}

#[derive(Args, Debug)]
pub struct OrderCommand {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Derive resource tags for parameters and definitions before ordering
  #[arg(long, default_value_t = false)]
  pub tag: bool,

  /// Pin extra ordering constraints as 'METHOD url=METHOD url' pairs,
  /// parent before child (repeatable)
  #[arg(long = "depends", value_name = "PARENT=CHILD")]
  pub depends: Option<Vec<String>>,

  /// Exclude operations by key, e.g. 'DELETE /pet/{id}' (repeatable)
  #[arg(long = "exclude", value_name = "KEY")]
  pub exclude: Option<Vec<String>>,

  /// Emit the plan as JSON on stdout instead of a table
  #[arg(long, default_value_t = false)]
  pub json: bool,

  /// Enable verbose output with per-resource role counts
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (the ordered table only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct ValidateCommand {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Derive resource tags for parameters and definitions before validating
  #[arg(long, default_value_t = false)]
  pub tag: bool,
}

#[derive(Args, Debug)]
pub struct ResolveCommand {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Resolve only this definition (default: all definitions)
  #[arg(short, long, value_name = "NAME")]
  pub definition: Option<String>,

  /// Keep readOnly fields in the resolved templates
  #[arg(long, default_value_t = false)]
  pub read_only: bool,
}
