//! Schema command: JSON schema of the configuration file

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use schemars::schema_for;
use serde_json::Value;
use std::{fs, path::PathBuf};

use crate::config::Config;

const SCHEMA_TITLE: &str = "opsdesk configuration";
const SCHEMA_DESCRIPTION: &str = "Configuration file of the opsdesk console (.opsdesk.json or opsdesk.json)";

/// Print the schema of the configuration file
#[derive(Debug, Args)]
pub struct SchemaCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: SchemaFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaCommand {
    pub fn execute(&self) -> Result<()> {
        let output = self.render()?;

        if let Some(ref output_path) = self.output {
            fs::write(output_path, output)
                .with_context(|| format!("Failed to write schema to: {}", output_path.display()))?;
            println!("Schema written to: {}", output_path.display());
        } else {
            println!("{}", output);
        }

        Ok(())
    }

    /// The schema in the requested format
    pub fn render(&self) -> Result<String> {
        let schema_value = Self::schema()?;

        let output = match self.format {
            SchemaFormat::Json if self.pretty => serde_json::to_string_pretty(&schema_value)?,
            SchemaFormat::Json => serde_json::to_string(&schema_value)?,
            SchemaFormat::Yaml => serde_yaml::to_string(&schema_value).context("Failed to convert schema to YAML")?,
        };
        Ok(output)
    }

    fn schema() -> Result<Value> {
        let schema = schema_for!(Config);
        let mut schema_value = serde_json::to_value(schema).context("Failed to convert schema to JSON value")?;

        if let Some(obj) = schema_value.as_object_mut() {
            obj.insert("title".to_string(), Value::String(SCHEMA_TITLE.to_string()));
            obj.insert("description".to_string(), Value::String(SCHEMA_DESCRIPTION.to_string()));
        }

        Ok(schema_value)
    }
}
