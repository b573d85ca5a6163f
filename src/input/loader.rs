use anyhow::{Result, Context as AnyhowContext};
use std::fs;
use crate::input::NodeInput;

/// Load a node input document. JSON files load too, being valid YAML.
pub fn load_input_from_yaml(file_path: &str) -> Result<NodeInput> {
    let yaml_content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read input file from {}", file_path))?;

    let input: NodeInput = serde_yaml::from_str(&yaml_content)
        .with_context(|| format!("Failed to deserialize node input from {}", file_path))?;

    Ok(input)
}
