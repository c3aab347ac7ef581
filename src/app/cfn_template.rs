//! CloudFormation template representation for synthesized stacks.
//!
//! This module holds the data structures a [`crate::app::stack::Stack`] renders
//! into. Templates serialize to the standard CloudFormation layout in JSON or
//! YAML and can be read back for inspection in tests and tooling.
//!
//! # Core Components
//!
//! - [`CloudFormationTemplate`] - The template with its resources and outputs
//! - [`Resource`] - A single AWS resource with its properties
//! - [`Output`] - A value returned after stack creation
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use jitsidash::app::cfn_template::CloudFormationTemplate;
//!
//! let template = CloudFormationTemplate::from_file(Path::new("template.yaml"))?;
//! for (logical_id, resource) in template.resources_of_type("AWS::CloudWatch::Dashboard") {
//!     println!("{}: {:?}", logical_id, resource.properties.get("DashboardName"));
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Template format version written by every synthesized stack.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A CloudFormation template.
///
/// Sections are kept in sorted maps so that synthesizing the same stack twice
/// yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CloudFormationTemplate {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub aws_template_format_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, Resource>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

/// An AWS resource definition within a CloudFormation template.
///
/// Properties are stored as raw JSON values because the shape depends on the
/// resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

impl Resource {
    /// Create a resource of the given type with no properties.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Set a property, replacing any previous value.
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}

/// A CloudFormation template output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub value: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

/// Export configuration for a CloudFormation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Export {
    pub name: Value,
}

impl CloudFormationTemplate {
    /// Create an empty template with the standard format version.
    pub fn new() -> Self {
        Self {
            aws_template_format_version: Some(TEMPLATE_FORMAT_VERSION.to_string()),
            ..Default::default()
        }
    }

    /// Load a template from a JSON or YAML file.
    ///
    /// The format follows the file extension. Unknown extensions are sniffed:
    /// content starting with `{` is read as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse as a template.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => {
                if content.trim_start().starts_with('{') {
                    Self::from_json(&content)
                } else {
                    Self::from_yaml(&content)
                }
            }
        }
    }

    /// Parse a template from a JSON string.
    pub fn from_json(json_content: &str) -> Result<Self> {
        serde_json::from_str::<CloudFormationTemplate>(json_content)
            .map_err(|e| anyhow!("Failed to parse JSON: {}", e))
    }

    /// Parse a template from a YAML string.
    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        serde_yaml::from_str::<CloudFormationTemplate>(yaml_content)
            .map_err(|e| anyhow!("Failed to parse YAML: {}", e))
    }

    /// Render the template as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the template as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Save the template to a file.
    ///
    /// YAML is used for `.yaml` and `.yml` extensions, JSON for everything else.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        let content = match extension.as_deref() {
            Some("yaml") | Some("yml") => self.to_yaml_string()?,
            _ => self.to_json_string()?,
        };

        fs::write(path, content)
            .with_context(|| format!("Failed to write template {}", path.display()))?;
        Ok(())
    }

    /// All resources of the given CloudFormation type, in logical id order.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a Resource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, resource)| resource.resource_type == resource_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_template() -> CloudFormationTemplate {
        let mut template = CloudFormationTemplate::new();
        template.resources.insert(
            "Board".to_string(),
            Resource::new("AWS::CloudWatch::Dashboard")
                .with_property("DashboardName", json!("board")),
        );
        template.resources.insert(
            "Logs".to_string(),
            Resource::new("AWS::Logs::LogGroup"),
        );
        template
    }

    #[test]
    fn test_new_template_has_format_version() {
        let template = CloudFormationTemplate::new();
        assert_eq!(
            template.aws_template_format_version.as_deref(),
            Some("2010-09-09")
        );
        assert!(template.resources.is_empty());
        assert!(template.outputs.is_empty());
    }

    #[test]
    fn test_json_uses_cloudformation_keys() {
        let json = sample_template().to_json_string().unwrap();
        assert!(json.contains("\"AWSTemplateFormatVersion\": \"2010-09-09\""));
        assert!(json.contains("\"Type\": \"AWS::CloudWatch::Dashboard\""));
        assert!(json.contains("\"DashboardName\": \"board\""));
        // Empty sections are omitted
        assert!(!json.contains("Outputs"));
        assert!(!json.contains("Description"));
    }

    #[test]
    fn test_yaml_parses_back() {
        let template = sample_template();
        let yaml = template.to_yaml_string().unwrap();
        let parsed = CloudFormationTemplate::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, template);
    }

    #[test]
    fn test_resources_of_type_filters() {
        let template = sample_template();
        let dashboards: Vec<_> = template
            .resources_of_type("AWS::CloudWatch::Dashboard")
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(dashboards, vec!["Board"]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = CloudFormationTemplate::from_json("not json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse JSON"));
    }
}
