//! Parameter entry.
//! Parameters come from stdin and command-line flags, flags winning;
//! interactive prompts fill in whatever is still missing.

use std::io::Read;

use dialoguer::Input;

use crate::error::{GpigError, GpigResult};
use crate::params::{ParameterId, ParameterSet};

/// Asks the user for parameter values.
pub trait Prompter {
    fn ask(&self, id: ParameterId, default: &str) -> GpigResult<String>;
}

/// Terminal prompter built on dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, id: ParameterId, default: &str) -> GpigResult<String> {
        Input::<String>::new()
            .with_prompt(format!("{} ({})", id.label(), id.help()))
            .default(default.to_string())
            .interact_text()
            .map_err(|e| GpigError::PromptError(e.to_string()))
    }
}

/// Reads a JSON parameter object from stdin. Empty input yields no parameters.
pub fn load_from_stdin() -> GpigResult<ParameterSet> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_parameters(&buffer)
}

/// Parses a JSON parameter object such as `{"PkgName": "com.author.tool"}`.
pub fn parse_parameters(text: &str) -> GpigResult<ParameterSet> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(ParameterSet::new());
    }
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| GpigError::ConfigError(format!("invalid parameters on stdin: {}", e)))?;
    ParameterSet::from_json(&value)
}

/// Completes `provided` so that every parameter has a value.
///
/// Missing values are asked for through `prompter`, offering the matching
/// entry of `defaults`. Without a prompter the default is taken as is.
pub fn collect_parameters(
    prompter: Option<&dyn Prompter>,
    provided: ParameterSet,
    defaults: &ParameterSet,
) -> GpigResult<ParameterSet> {
    let mut params = ParameterSet::new();
    for id in ParameterId::ALL {
        let value = match (provided.get(id), prompter) {
            (Some(value), _) => value.to_string(),
            (None, Some(prompter)) => prompter.ask(id, defaults.get(id).unwrap_or_default())?,
            (None, None) => defaults.get(id).unwrap_or_default().to_string(),
        };
        params.set(id, value);
    }
    Ok(params)
}
