//! Stack: the scope dashboards are created in and synthesized from.
//!
//! A [`Stack`] owns every [`Dashboard`] created through it. Widget builders
//! borrow dashboards mutably for the length of a build and the stack renders
//! them into a [`CloudFormationTemplate`] with [`Stack::synth`].

use anyhow::Result;
use serde_json::json;

use crate::app::cfn_template::{CloudFormationTemplate, Output};
use crate::app::cloudwatch::{Dashboard, DashboardProps};
use crate::app::errors::DashboardError;

#[derive(Debug, Clone, PartialEq)]
struct DashboardConstruct {
    id: String,
    logical_id: String,
    dashboard: Dashboard,
}

/// A collection of dashboard resources that synthesizes to one template.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    name: String,
    description: Option<String>,
    dashboards: Vec<DashboardConstruct>,
}

/// Turn a construct id into a CloudFormation logical id.
///
/// Logical ids may only contain ASCII letters and digits, so everything else
/// is dropped.
pub fn logical_id(id: &str) -> Result<String, DashboardError> {
    let logical: String = id.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if logical.is_empty() {
        return Err(DashboardError::InvalidConstructId { id: id.to_string() });
    }
    Ok(logical)
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            dashboards: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a new dashboard under `id`.
    ///
    /// # Errors
    ///
    /// Fails when `id` has no usable characters or when it, or its logical id,
    /// is already taken.
    pub fn add_dashboard(
        &mut self,
        id: &str,
        props: DashboardProps,
    ) -> Result<&mut Dashboard, DashboardError> {
        let logical_id = logical_id(id)?;
        if self
            .dashboards
            .iter()
            .any(|construct| construct.id == id || construct.logical_id == logical_id)
        {
            return Err(DashboardError::DuplicateConstructId { id: id.to_string() });
        }

        crate::log_info!(
            "Creating dashboard '{}' ({}) in stack '{}'",
            id,
            logical_id,
            self.name
        );

        self.dashboards.push(DashboardConstruct {
            id: id.to_string(),
            logical_id,
            dashboard: Dashboard::new(props),
        });

        let index = self.dashboards.len() - 1;
        Ok(&mut self.dashboards[index].dashboard)
    }

    pub fn dashboard(&self, id: &str) -> Option<&Dashboard> {
        self.dashboards
            .iter()
            .find(|construct| construct.id == id)
            .map(|construct| &construct.dashboard)
    }

    pub fn dashboard_mut(&mut self, id: &str) -> Option<&mut Dashboard> {
        self.dashboards
            .iter_mut()
            .find(|construct| construct.id == id)
            .map(|construct| &mut construct.dashboard)
    }

    /// Construct ids of all dashboards in creation order.
    pub fn dashboard_ids(&self) -> Vec<&str> {
        self.dashboards
            .iter()
            .map(|construct| construct.id.as_str())
            .collect()
    }

    /// Render the stack into a CloudFormation template.
    ///
    /// Each dashboard becomes a resource under its logical id and gets an
    /// output named `<LogicalId>Name` that resolves to the dashboard name.
    pub fn synth(&self) -> Result<CloudFormationTemplate> {
        let mut template = CloudFormationTemplate::new();
        template.description = self.description.clone();

        for construct in &self.dashboards {
            let resource = construct.dashboard.to_resource()?;
            template
                .resources
                .insert(construct.logical_id.clone(), resource);
            template.outputs.insert(
                format!("{}Name", construct.logical_id),
                Output {
                    value: json!({ "Ref": construct.logical_id }),
                    description: Some(format!("Name of dashboard {}", construct.id)),
                    export: None,
                },
            );
        }

        crate::log_info!(
            "Synthesized stack '{}' with {} dashboard(s)",
            self.name,
            self.dashboards.len()
        );

        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::cloudwatch::DASHBOARD_RESOURCE_TYPE;

    #[test]
    fn test_logical_id_strips_separators() {
        assert_eq!(logical_id("test-dashboard-id").unwrap(), "testdashboardid");
        assert_eq!(logical_id("Jitsi_Board 1").unwrap(), "JitsiBoard1");
        assert_eq!(
            logical_id("--"),
            Err(DashboardError::InvalidConstructId { id: "--".to_string() })
        );
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut stack = Stack::new("s");
        stack.add_dashboard("board", DashboardProps::default()).unwrap();

        assert_eq!(
            stack.add_dashboard("board", DashboardProps::default()).unwrap_err(),
            DashboardError::DuplicateConstructId { id: "board".to_string() }
        );
        // Same logical id through a different construct id
        assert_eq!(
            stack.add_dashboard("bo-ard", DashboardProps::default()).unwrap_err(),
            DashboardError::DuplicateConstructId { id: "bo-ard".to_string() }
        );
        assert_eq!(stack.dashboard_ids(), vec!["board"]);
    }

    #[test]
    fn test_synth_renders_dashboards_and_outputs() {
        let mut stack = Stack::new("s").with_description("monitoring");
        stack
            .add_dashboard("main-board", DashboardProps::default().with_dashboard_name("main"))
            .unwrap();

        let template = stack.synth().unwrap();
        assert_eq!(template.description.as_deref(), Some("monitoring"));

        let resource = &template.resources["mainboard"];
        assert_eq!(resource.resource_type, DASHBOARD_RESOURCE_TYPE);
        assert_eq!(resource.properties["DashboardName"], json!("main"));

        let output = &template.outputs["mainboardName"];
        assert_eq!(output.value, json!({ "Ref": "mainboard" }));
    }

    #[test]
    fn test_lookup_by_construct_id() {
        let mut stack = Stack::new("s");
        stack.add_dashboard("a", DashboardProps::default()).unwrap();
        assert!(stack.dashboard("a").is_some());
        assert!(stack.dashboard_mut("a").is_some());
        assert!(stack.dashboard("b").is_none());
    }
}
