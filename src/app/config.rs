//! Declarative build files.
//!
//! A build file describes one stack: dashboards that already exist in it, the
//! dashboard the Jitsi widgets go to, and the components to add. TOML and YAML
//! are both accepted.
//!
//! ```toml
//! stack_name = "jitsi-monitoring"
//!
//! [dashboard]
//! dashboard_id = "jitsi-dashboard"
//!
//! [dashboard.dashboard_props]
//! dashboard_name = "jitsi"
//!
//! [[components]]
//! kind = "web"
//! log_groups = "/jitsi/web"
//!
//! [[components]]
//! kind = "jicofo"
//! log_groups = ["/jitsi/focus-a", "/jitsi/focus-b"]
//! options = { time_bin = "5m" }
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::app::cloudwatch::DashboardProps;
use crate::app::errors::DashboardError;
use crate::app::jitsi::{
    JitsiCloudWatchDashboard, JitsiComponent, JitsiDashboardOptions, JitsiWidgetOptions, LogGroups,
};
use crate::app::stack::Stack;

/// Top level of a build file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub stack_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Dashboards created before the Jitsi dashboard is resolved
    #[serde(default)]
    pub existing_dashboards: Vec<ExistingDashboardConfig>,

    pub dashboard: JitsiDashboardOptions,

    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

/// A dashboard defined in the stack independently of the Jitsi widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingDashboardConfig {
    pub id: String,
    #[serde(default)]
    pub props: DashboardProps,
}

/// One component widget block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub kind: JitsiComponent,
    pub log_groups: LogGroups,
    #[serde(default)]
    pub options: JitsiWidgetOptions,
}

impl DashboardConfig {
    /// Load a build file; `.yaml`/`.yml` are read as YAML, everything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        let config = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };

        crate::log_debug!(
            "Loaded config {} with {} component(s)",
            path.display(),
            config.components.len()
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow!("Failed to parse TOML config: {}", e))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| anyhow!("Failed to parse YAML config: {}", e))
    }

    /// Build the stack the file describes.
    ///
    /// # Errors
    ///
    /// Fails on any dashboard construction error, e.g. a missing or
    /// conflicting dashboard selection or a duplicate id, and on a component
    /// with an empty `log_groups` list.
    pub fn build(&self) -> Result<Stack> {
        if let Some(component) = self.components.iter().find(|c| c.log_groups.is_empty()) {
            return Err(DashboardError::EmptyLogGroups {
                component: component.kind.to_string(),
            }
            .into());
        }

        let mut stack = Stack::new(&self.stack_name);
        if let Some(description) = &self.description {
            stack = stack.with_description(description);
        }

        for existing in &self.existing_dashboards {
            stack.add_dashboard(&existing.id, existing.props.clone())?;
        }

        let mut dashboard = JitsiCloudWatchDashboard::new(&mut stack, self.dashboard.clone())
            .context("Invalid dashboard section")?;

        for component in &self.components {
            crate::log_info!("Adding {} widgets", component.kind);
            dashboard.add_component(
                component.kind,
                component.log_groups.clone(),
                &component.options,
            );
        }

        Ok(stack)
    }
}
