//! Core modules for jitsidash.
//!
//! # Module Organization
//!
//! ## Dashboard Model
//! - [`cloudwatch`] - CloudWatch dashboard resource, widgets and grid layout
//! - [`stack`] - Scope that owns dashboards and synthesizes them
//! - [`cfn_template`] - CloudFormation template the stack renders into
//!
//! ## Jitsi Widgets
//! - [`jitsi`] - Per-component widget builders and the dashboard wrapper
//!
//! ## Input
//! - [`config`] - TOML/YAML build files for the `jitsidash` binary
//! - [`errors`] - Dashboard construction errors
//!
//! # Architecture
//!
//! Builders only append widgets. Layout happens when a dashboard renders
//! itself, and rendering only happens when the stack is synthesized:
//! [`config`] → [`jitsi`] → [`cloudwatch`] → [`stack`] → [`cfn_template`]

pub mod cfn_template;
pub mod cloudwatch;
pub mod config;
pub mod errors;
pub mod jitsi;
pub mod stack;
