//! Jitsi Monitoring Widgets
//!
//! Predefined CloudWatch Logs Insights widget blocks for the Jitsi Meet
//! services: web frontend, videobridge (JVB), conference focus (Jicofo),
//! XMPP server (Prosody) and recorder (Jibri).
//!
//! ## Usage
//!
//! ```rust
//! use jitsidash::app::cloudwatch::DashboardProps;
//! use jitsidash::app::jitsi::{JitsiCloudWatchDashboard, JitsiDashboardOptions, JitsiWidgetOptions};
//! use jitsidash::app::stack::Stack;
//!
//! let mut stack = Stack::new("jitsi-monitoring");
//! let mut dashboard = JitsiCloudWatchDashboard::new(
//!     &mut stack,
//!     JitsiDashboardOptions::default()
//!         .with_dashboard_id("jitsi-dashboard")
//!         .with_dashboard_props(DashboardProps::default().with_dashboard_name("jitsi")),
//! )?;
//!
//! dashboard.add_web("/jitsi/web", &JitsiWidgetOptions::default());
//! dashboard.add_jicofo(["/jitsi/a", "/jitsi/b"], &JitsiWidgetOptions::new().with_time_bin("5m"));
//!
//! let template = stack.synth()?;
//! assert_eq!(template.resources.len(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod dashboard;
pub mod options;
pub mod widgets;

pub use dashboard::{DashboardSource, JitsiCloudWatchDashboard, JitsiDashboardOptions};
pub use options::{
    stream_filter, JitsiComponent, JitsiWidgetOptions, LogGroups, ResolvedWidgetOptions,
};
pub use widgets::{
    jitsi_widgets, jitsi_widgets_jibri, jitsi_widgets_jicofo, jitsi_widgets_jvb,
    jitsi_widgets_prosody, jitsi_widgets_web,
};
