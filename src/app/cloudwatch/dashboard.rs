//! CloudWatch dashboard resource and grid layout.
//!
//! A [`Dashboard`] collects widgets in rows. Every [`AddWidgets::add_widgets`]
//! call appends one row: widgets in the row flow left to right across the
//! 24-column grid and wrap when they run out of room, rows stack top to
//! bottom. Positions are computed when the dashboard is rendered.

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::widgets::{Widget, REGION_TOKEN};
use crate::app::cfn_template::Resource;

/// CloudFormation type of a dashboard resource.
pub const DASHBOARD_RESOURCE_TYPE: &str = "AWS::CloudWatch::Dashboard";

/// Width of the CloudWatch dashboard grid in columns.
pub const GRID_WIDTH: u32 = 24;

/// The append operation widget builders depend on.
///
/// Implemented by [`Dashboard`]; builders accept any implementation so they
/// can be pointed at a recording double in tests.
pub trait AddWidgets {
    /// Append widgets as a single row.
    fn add_widgets(&mut self, widgets: Vec<Widget>);
}

/// Whether per-widget periods are overridden by the dashboard time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodOverride {
    Auto,
    Inherit,
}

impl PeriodOverride {
    fn as_str(&self) -> &'static str {
        match self {
            PeriodOverride::Auto => "auto",
            PeriodOverride::Inherit => "inherit",
        }
    }
}

/// Creation properties for a new dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardProps {
    /// Name shown in the CloudWatch console; generated by CloudFormation when unset
    pub dashboard_name: Option<String>,
    /// Default start of the time range, e.g. `-PT6H`
    pub start: Option<String>,
    /// Default end of the time range
    pub end: Option<String>,
    pub period_override: Option<PeriodOverride>,
}

impl DashboardProps {
    pub fn with_dashboard_name(mut self, name: impl Into<String>) -> Self {
        self.dashboard_name = Some(name.into());
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn with_period_override(mut self, period_override: PeriodOverride) -> Self {
        self.period_override = Some(period_override);
        self
    }
}

/// A widget together with its grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedWidget<'a> {
    pub widget: &'a Widget,
    pub x: u32,
    pub y: u32,
}

/// A CloudWatch dashboard under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    props: DashboardProps,
    rows: Vec<Vec<Widget>>,
}

impl Dashboard {
    pub fn new(props: DashboardProps) -> Self {
        Self {
            props,
            rows: Vec::new(),
        }
    }

    pub fn props(&self) -> &DashboardProps {
        &self.props
    }

    pub fn dashboard_name(&self) -> Option<&str> {
        self.props.dashboard_name.as_deref()
    }

    /// Widgets grouped by the call that appended them.
    pub fn rows(&self) -> &[Vec<Widget>] {
        &self.rows
    }

    /// All widgets in append order.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.rows.iter().flatten()
    }

    pub fn widget_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Assign grid positions to every widget. Coordinates saturate at
    /// `u32::MAX` for oversized widgets.
    pub fn layout(&self) -> Vec<PlacedWidget<'_>> {
        let mut placed = Vec::with_capacity(self.widget_count());
        let mut top: u32 = 0;

        for row in &self.rows {
            let mut x: u32 = 0;
            let mut y = top;
            let mut line_height = 0;

            for widget in row {
                if x > 0 && x.saturating_add(widget.width()) > GRID_WIDTH {
                    y = y.saturating_add(line_height);
                    x = 0;
                    line_height = 0;
                }
                crate::trace_trace!(
                    "Placing {} widget {:?} at ({}, {})",
                    widget.kind(),
                    widget.title(),
                    x,
                    y
                );
                placed.push(PlacedWidget { widget, x, y });
                x = x.saturating_add(widget.width());
                line_height = line_height.max(widget.height());
            }

            top = y.saturating_add(line_height);
        }

        placed
    }

    /// The dashboard body as JSON, with the region placeholder still in place.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        if let Some(start) = &self.props.start {
            body.insert("start".to_string(), json!(start));
        }
        if let Some(end) = &self.props.end {
            body.insert("end".to_string(), json!(end));
        }
        if let Some(period_override) = &self.props.period_override {
            body.insert("periodOverride".to_string(), json!(period_override.as_str()));
        }

        let widgets: Vec<Value> = self
            .layout()
            .into_iter()
            .map(|placed| placed.widget.to_json(placed.x, placed.y))
            .collect();
        body.insert("widgets".to_string(), Value::Array(widgets));

        Value::Object(body)
    }

    /// Render the dashboard as an `AWS::CloudWatch::Dashboard` resource.
    ///
    /// `DashboardBody` is a JSON string. When a widget queries the deployment
    /// region the body becomes an `Fn::Join` with `Ref: AWS::Region` spliced in.
    pub fn to_resource(&self) -> Result<Resource> {
        let body = serde_json::to_string(&self.body())?;

        let body_value = if body.contains(REGION_TOKEN) {
            let mut parts = Vec::new();
            for (i, chunk) in body.split(REGION_TOKEN).enumerate() {
                if i > 0 {
                    parts.push(json!({ "Ref": "AWS::Region" }));
                }
                if !chunk.is_empty() {
                    parts.push(Value::String(chunk.to_string()));
                }
            }
            json!({ "Fn::Join": ["", parts] })
        } else {
            Value::String(body)
        };

        let mut resource =
            Resource::new(DASHBOARD_RESOURCE_TYPE).with_property("DashboardBody", body_value);
        if let Some(name) = &self.props.dashboard_name {
            resource = resource.with_property("DashboardName", json!(name));
        }

        crate::trace_debug!(
            "Rendered dashboard {:?} with {} widgets",
            self.props.dashboard_name,
            self.widget_count()
        );

        Ok(resource)
    }
}

impl AddWidgets for Dashboard {
    fn add_widgets(&mut self, widgets: Vec<Widget>) {
        if widgets.is_empty() {
            return;
        }
        self.rows.push(widgets);
    }
}
