use std::path::PathBuf;

use chrono::{Local, Timelike};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  config::OrderingConfig,
  orchestrator::{Orchestrator, RunStats},
  spec::{OperationInterface, loader},
  ui::{Colors, OrderCommand, colors::IntoComfyColor, term_width},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct OrderConfig {
  pub input: PathBuf,
  pub tag: bool,
  pub json: bool,
  pub verbose: bool,
  pub quiet: bool,
  pub ordering: OrderingConfig,
}

/// One row of the machine-readable plan.
#[derive(Debug, serde::Serialize)]
struct PlanEntry<'a> {
  position: usize,
  method: String,
  url: &'a str,
  tags: &'a [String],
}

impl OrderConfig {
  pub fn from_command(command: OrderCommand) -> anyhow::Result<Self> {
    let OrderCommand {
      input,
      tag,
      depends,
      exclude,
      json,
      verbose,
      quiet,
    } = command;

    let ordering = OrderingConfig {
      operation_dependencies: parse_dependencies(depends)?,
      exclude_operations: exclude.map(|keys| keys.into_iter().collect()).unwrap_or_default(),
      ..OrderingConfig::default()
    };

    Ok(Self {
      input,
      tag,
      json,
      verbose,
      quiet,
      ordering,
    })
  }
}

fn parse_dependencies(depends: Option<Vec<String>>) -> anyhow::Result<Vec<(String, String)>> {
  let Some(entries) = depends else {
    return Ok(Vec::new());
  };

  let mut pairs = Vec::new();
  for entry in entries {
    let (parent, child) = entry.split_once('=').ok_or_else(|| {
      anyhow::anyhow!("Invalid depends format '{entry}': expected PARENT=CHILD (e.g. 'POST /pet=GET /pet')")
    })?;
    pairs.push((parent.trim().to_string(), child.trim().to_string()));
  }
  Ok(pairs)
}

struct OrderLogger<'a> {
  config: &'a OrderConfig,
  colors: &'a Colors,
}

impl<'a> OrderLogger<'a> {
  fn new(config: &'a OrderConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_ordering(&self) {
    self.info(&"Ordering operations...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &RunStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Operations ordered:", stats.operations_ordered.to_string());
    self.stat("Resources discovered:", stats.resources_discovered.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    if self.config.verbose {
      for (resource, producers, consumers, destructors) in &stats.resource_roles {
        self.stat(
          "",
          format!("{resource}: {producers} producers, {consumers} consumers, {destructors} destructors"),
        );
      }
    }
  }

  fn print_warnings(&self, stats: &RunStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.as_str().with(self.colors.primary())
      );
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully ordered operations".with(self.colors.success())
      );
    }
  }
}

fn render_plan(ordered: &[OperationInterface], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  header.add_cell(Cell::new("#").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("METHOD").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("PATH").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("TAGS").fg(IntoComfyColor::into(colors.label())));
  table.set_header(header);

  for (position, operation) in ordered.iter().enumerate() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(position + 1)
        .fg(IntoComfyColor::into(colors.value()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(
      Cell::new(operation.method.to_string())
        .fg(IntoComfyColor::into(colors.accent()))
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&operation.url).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(operation.tags.join(", ")).fg(IntoComfyColor::into(colors.value())));
    table.add_row(row);
  }

  table
}

pub fn order_operations(config: OrderConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = OrderLogger::new(&config, colors);

  if !config.json {
    logger.log_loading();
  }
  let spec = loader::load_spec(&config.input)?;

  let mut orchestrator = Orchestrator::new(spec, config.ordering.clone());
  if config.tag {
    if !config.json {
      logger.info(&"Tagging resources...".with(colors.primary()).to_string());
    }
    orchestrator.tag_resources()?;
  }

  if config.json {
    let (ordered, _) = orchestrator.order()?;
    let entries: Vec<PlanEntry<'_>> = ordered
      .iter()
      .enumerate()
      .map(|(index, operation)| PlanEntry {
        position: index + 1,
        method: operation.method.to_string(),
        url: &operation.url,
        tags: &operation.tags,
      })
      .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    return Ok(());
  }

  logger.log_ordering();
  let (ordered, stats) = orchestrator.order()?;

  println!("{}", render_plan(&ordered, colors));
  logger.print_statistics(&stats);
  logger.print_warnings(&stats);
  logger.log_success();

  Ok(())
}
