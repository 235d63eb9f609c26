use crossterm::style::Stylize;

use crate::{
  config::OrderingConfig,
  orchestrator::Orchestrator,
  spec::loader,
  ui::{Colors, ValidateCommand},
};

/// Analyze the resource graph and report resources no operation produces.
///
/// Findings are advisory: a spec can legitimately consume resources created
/// out of band, so this never fails the process.
pub fn validate_spec(command: &ValidateCommand, colors: &Colors) -> anyhow::Result<()> {
  let spec = loader::load_spec(&command.input)?;

  let mut orchestrator = Orchestrator::new(spec, OrderingConfig::default());
  if command.tag {
    orchestrator.tag_resources()?;
  }

  let warnings = orchestrator.validate()?;
  if warnings.is_empty() {
    println!(
      "{} {}",
      "OK".with(colors.success()),
      format!("every consumed resource in {} has a producer", command.input.display()).with(colors.primary())
    );
    return Ok(());
  }

  for warning in &warnings {
    eprintln!(
      "{} {}",
      "Warning:".with(colors.accent()),
      warning.as_str().with(colors.primary())
    );
  }
  println!(
    "{}",
    format!("{} resource(s) are consumed but never produced", warnings.len()).with(colors.label())
  );

  Ok(())
}
