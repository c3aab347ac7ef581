//! CloudWatch dashboard widget descriptors.
//!
//! Widgets are plain values: they know their size and how to render
//! themselves into the dashboard body JSON once a position is assigned.

#![warn(clippy::all, rust_2018_idioms)]

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Placeholder for the deployment region inside a rendered dashboard body.
///
/// [`crate::app::cloudwatch::Dashboard::to_resource`] replaces it with a
/// `Ref` to the `AWS::Region` pseudo parameter.
pub const REGION_TOKEN: &str = "${Token[AWS.Region]}";

const DEFAULT_TEXT_WIDTH: u32 = 6;
const DEFAULT_TEXT_HEIGHT: u32 = 2;
const DEFAULT_QUERY_WIDTH: u32 = 6;
const DEFAULT_QUERY_HEIGHT: u32 = 6;

/// How a Logs Insights query result is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogQueryVisualizationType {
    #[default]
    Table,
    Line,
    StackedArea,
    Bar,
    Pie,
}

impl LogQueryVisualizationType {
    /// Value of the `view` property in the dashboard body.
    pub fn view(&self) -> &'static str {
        match self {
            LogQueryVisualizationType::Table => "table",
            LogQueryVisualizationType::Line | LogQueryVisualizationType::StackedArea => {
                "timeSeries"
            }
            LogQueryVisualizationType::Bar => "bar",
            LogQueryVisualizationType::Pie => "pie",
        }
    }

    /// Value of the `stacked` property, only present for time series views.
    pub fn stacked(&self) -> Option<bool> {
        match self {
            LogQueryVisualizationType::Line => Some(false),
            LogQueryVisualizationType::StackedArea => Some(true),
            _ => None,
        }
    }
}

/// A markdown text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWidget {
    pub markdown: String,
    pub width: u32,
    pub height: u32,
    /// `"solid"` or `"transparent"`; omitted from the body when unset
    pub background: Option<String>,
}

impl TextWidget {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            width: DEFAULT_TEXT_WIDTH,
            height: DEFAULT_TEXT_HEIGHT,
            background: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    fn properties(&self) -> Value {
        let mut properties = Map::new();
        properties.insert("markdown".to_string(), json!(self.markdown));
        if let Some(background) = &self.background {
            properties.insert("background".to_string(), json!(background));
        }
        Value::Object(properties)
    }
}

/// A widget that runs a Logs Insights query over one or more log groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQueryWidget {
    pub title: String,
    pub log_group_names: Vec<String>,
    pub query_lines: Vec<String>,
    pub view: LogQueryVisualizationType,
    pub width: u32,
    pub height: u32,
    /// Region the query runs in; the deployment region when unset
    pub region: Option<String>,
}

impl LogQueryWidget {
    pub fn new(
        title: impl Into<String>,
        log_group_names: Vec<String>,
        query_lines: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            log_group_names,
            query_lines,
            view: LogQueryVisualizationType::default(),
            width: DEFAULT_QUERY_WIDTH,
            height: DEFAULT_QUERY_HEIGHT,
            region: None,
        }
    }

    pub fn with_view(mut self, view: LogQueryVisualizationType) -> Self {
        self.view = view;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// The full query string sent to Logs Insights.
    ///
    /// Every log group becomes a `SOURCE` clause; query lines are joined with
    /// `\n| ` so each line starts its own pipeline stage.
    pub fn query_string(&self) -> String {
        let sources = self
            .log_group_names
            .iter()
            .map(|name| format!("SOURCE '{}'", name))
            .collect::<Vec<_>>()
            .join(" | ");

        format!("{} | {}", sources, self.query_lines.join("\n| "))
    }

    fn properties(&self) -> Value {
        let mut properties = Map::new();
        properties.insert("view".to_string(), json!(self.view.view()));
        properties.insert("title".to_string(), json!(self.title));
        properties.insert(
            "region".to_string(),
            json!(self.region.as_deref().unwrap_or(REGION_TOKEN)),
        );
        properties.insert("query".to_string(), json!(self.query_string()));
        if let Some(stacked) = self.view.stacked() {
            properties.insert("stacked".to_string(), json!(stacked));
        }
        Value::Object(properties)
    }
}

/// Any widget that can be placed on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Text(TextWidget),
    LogQuery(LogQueryWidget),
}

impl Widget {
    pub fn width(&self) -> u32 {
        match self {
            Widget::Text(text) => text.width,
            Widget::LogQuery(query) => query.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Widget::Text(text) => text.height,
            Widget::LogQuery(query) => query.height,
        }
    }

    /// Title for query widgets, `None` for text blocks.
    pub fn title(&self) -> Option<&str> {
        match self {
            Widget::Text(_) => None,
            Widget::LogQuery(query) => Some(&query.title),
        }
    }

    /// Short kind name used in logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Text(_) => "text",
            Widget::LogQuery(_) => "log",
        }
    }

    pub fn as_text(&self) -> Option<&TextWidget> {
        match self {
            Widget::Text(text) => Some(text),
            Widget::LogQuery(_) => None,
        }
    }

    pub fn as_log_query(&self) -> Option<&LogQueryWidget> {
        match self {
            Widget::Text(_) => None,
            Widget::LogQuery(query) => Some(query),
        }
    }

    /// Whether the rendered widget refers to the deployment region.
    pub fn uses_deployment_region(&self) -> bool {
        matches!(self, Widget::LogQuery(query) if query.region.is_none())
    }

    /// Render the widget at grid position `(x, y)`.
    pub fn to_json(&self, x: u32, y: u32) -> Value {
        let properties = match self {
            Widget::Text(text) => text.properties(),
            Widget::LogQuery(query) => query.properties(),
        };

        json!({
            "type": self.kind(),
            "width": self.width(),
            "height": self.height(),
            "x": x,
            "y": y,
            "properties": properties,
        })
    }
}

impl From<TextWidget> for Widget {
    fn from(widget: TextWidget) -> Self {
        Widget::Text(widget)
    }
}

impl From<LogQueryWidget> for Widget {
    fn from(widget: LogQueryWidget) -> Self {
        Widget::LogQuery(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_widget() -> LogQueryWidget {
        LogQueryWidget::new(
            "Errors",
            vec!["/jitsi/a".to_string(), "/jitsi/b".to_string()],
            vec![
                "filter @message like \"ERROR\"".to_string(),
                "stats count(*) by bin(5m)".to_string(),
            ],
        )
    }

    #[test]
    fn test_query_string_joins_sources_and_lines() {
        assert_eq!(
            query_widget().query_string(),
            "SOURCE '/jitsi/a' | SOURCE '/jitsi/b' | filter @message like \"ERROR\"\n| stats count(*) by bin(5m)"
        );
    }

    #[test]
    fn test_view_mapping() {
        assert_eq!(LogQueryVisualizationType::Line.view(), "timeSeries");
        assert_eq!(LogQueryVisualizationType::StackedArea.view(), "timeSeries");
        assert_eq!(LogQueryVisualizationType::Pie.view(), "pie");
        assert_eq!(LogQueryVisualizationType::Bar.view(), "bar");
        assert_eq!(LogQueryVisualizationType::Table.view(), "table");
        assert_eq!(LogQueryVisualizationType::Line.stacked(), Some(false));
        assert_eq!(LogQueryVisualizationType::StackedArea.stacked(), Some(true));
        assert_eq!(LogQueryVisualizationType::Pie.stacked(), None);
    }

    #[test]
    fn test_log_widget_json() {
        let widget: Widget = query_widget()
            .with_view(LogQueryVisualizationType::Line)
            .with_width(8)
            .with_height(8)
            .into();

        let rendered = widget.to_json(8, 1);
        assert_eq!(rendered["type"], "log");
        assert_eq!(rendered["x"], 8);
        assert_eq!(rendered["y"], 1);
        assert_eq!(rendered["width"], 8);
        assert_eq!(rendered["properties"]["view"], "timeSeries");
        assert_eq!(rendered["properties"]["stacked"], false);
        assert_eq!(rendered["properties"]["region"], REGION_TOKEN);
        assert!(widget.uses_deployment_region());
    }

    #[test]
    fn test_explicit_region_is_kept() {
        let widget: Widget = query_widget().with_region("eu-central-1").into();
        let rendered = widget.to_json(0, 0);
        assert_eq!(rendered["properties"]["region"], "eu-central-1");
        assert!(rendered["properties"].get("stacked").is_none());
        assert!(!widget.uses_deployment_region());
    }

    #[test]
    fn test_text_widget_json() {
        let widget: Widget = TextWidget::new("## Header").with_width(24).with_height(1).into();
        assert_eq!(
            widget.to_json(0, 0),
            json!({
                "type": "text",
                "width": 24,
                "height": 1,
                "x": 0,
                "y": 0,
                "properties": { "markdown": "## Header" },
            })
        );
        assert_eq!(widget.title(), None);
    }
}
