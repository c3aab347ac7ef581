//! CloudWatch Dashboard Module
//!
//! Models CloudWatch dashboards the way CloudFormation expects them: a list of
//! positioned widgets serialized into the `DashboardBody` of an
//! `AWS::CloudWatch::Dashboard` resource.
//!
//! ## Usage
//!
//! ```rust
//! use jitsidash::app::cloudwatch::{
//!     AddWidgets, Dashboard, DashboardProps, LogQueryVisualizationType, LogQueryWidget, TextWidget,
//! };
//!
//! let mut dashboard = Dashboard::new(DashboardProps::default().with_dashboard_name("ops"));
//! dashboard.add_widgets(vec![
//!     TextWidget::new("## Ops").with_width(24).with_height(1).into(),
//!     LogQueryWidget::new(
//!         "Errors",
//!         vec!["/app/logs".to_string()],
//!         vec!["filter @message like \"ERROR\"".to_string()],
//!     )
//!     .with_view(LogQueryVisualizationType::Line)
//!     .into(),
//! ]);
//! assert_eq!(dashboard.widget_count(), 2);
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod dashboard;
pub mod widgets;

pub use dashboard::{
    AddWidgets, Dashboard, DashboardProps, PeriodOverride, PlacedWidget,
    DASHBOARD_RESOURCE_TYPE, GRID_WIDTH,
};
pub use widgets::{LogQueryVisualizationType, LogQueryWidget, TextWidget, Widget};
