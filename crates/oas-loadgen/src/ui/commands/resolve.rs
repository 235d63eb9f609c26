use serde_json::{Map, Value};

use crate::{config::OrderingConfig, orchestrator::Orchestrator, spec::loader, ui::ResolveCommand};

/// Print resolved data-generation templates as pretty JSON.
///
/// Output is plain JSON on stdout so it can be piped; no colors, no chrome.
pub fn resolve_definitions(command: &ResolveCommand) -> anyhow::Result<()> {
  let spec = loader::load_spec(&command.input)?;
  let orchestrator = Orchestrator::new(spec, OrderingConfig::default());

  let document = match &command.definition {
    Some(name) => {
      let Some(template) = orchestrator.template(name, command.read_only)? else {
        anyhow::bail!("No definition named '{name}' in {}", command.input.display());
      };
      Value::Object(template)
    }
    None => {
      let mut document = Map::new();
      for (name, template) in orchestrator.templates(command.read_only)? {
        document.insert(name, Value::Object(template));
      }
      Value::Object(document)
    }
  };

  println!("{}", serde_json::to_string_pretty(&document)?);
  Ok(())
}
