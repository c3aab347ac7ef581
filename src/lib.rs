//! jitsidash - CloudWatch Logs Insights dashboards for Jitsi Meet
//!
//! jitsidash builds CloudWatch dashboards for the services of a Jitsi Meet
//! deployment and synthesizes them into CloudFormation templates. Each service
//! gets a predefined block of Logs Insights widgets: a markdown header and a
//! set of pie, line and bar charts driven by fixed queries over the service's
//! log groups.
//!
//! # Core Features
//!
//! - **Component widget blocks**: web, JVB, Jicofo, Prosody and Jibri
//! - **Dashboard reuse**: add widgets to a new dashboard or one already in the stack
//! - **Deterministic synthesis**: identical input renders identical templates
//! - **Build files**: describe a whole stack in TOML or YAML for the `jitsidash` binary
//!
//! # Getting Started
//!
//! Start with [`app::jitsi::JitsiCloudWatchDashboard`] on an [`app::stack::Stack`],
//! or call the free builder functions in [`app::jitsi::widgets`] with any
//! [`app::cloudwatch::AddWidgets`] implementation.
//!
//! Query execution, log ingestion and deployment are out of scope: the
//! output is a template for CloudFormation to deploy.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
