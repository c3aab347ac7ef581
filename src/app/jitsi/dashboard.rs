//! Jitsi monitoring dashboard wrapper.
//!
//! [`JitsiCloudWatchDashboard`] either reuses a dashboard already defined in a
//! [`Stack`] or creates a new one there, then exposes one method per Jitsi
//! component that appends that component's widgets.
//!
//! The choice between the two is a [`DashboardSource`]. Callers that receive
//! loosely shaped input (configuration files) go through
//! [`JitsiDashboardOptions`], which is validated into a source.

#![warn(clippy::all, rust_2018_idioms)]

use serde::{Deserialize, Serialize};

use super::options::{JitsiComponent, JitsiWidgetOptions, LogGroups};
use super::widgets::{
    jitsi_widgets, jitsi_widgets_jibri, jitsi_widgets_jicofo, jitsi_widgets_jvb,
    jitsi_widgets_prosody, jitsi_widgets_web,
};
use crate::app::cloudwatch::{Dashboard, DashboardProps};
use crate::app::errors::DashboardError;
use crate::app::stack::Stack;

/// Where the wrapped dashboard comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardSource {
    /// A dashboard already created in the stack under this construct id
    UseExisting(String),
    /// A dashboard to create under `id`
    CreateNew { id: String, props: DashboardProps },
}

impl DashboardSource {
    pub fn existing(id: impl Into<String>) -> Self {
        DashboardSource::UseExisting(id.into())
    }

    pub fn create(id: impl Into<String>, props: DashboardProps) -> Self {
        DashboardSource::CreateNew {
            id: id.into(),
            props,
        }
    }
}

/// Unvalidated construction options.
///
/// Exactly one of `dashboard` and `dashboard_id` must be set.
/// `dashboard_props` only applies together with `dashboard_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitsiDashboardOptions {
    /// Construct id of an existing dashboard to use
    pub dashboard: Option<String>,
    /// Construct id for a new dashboard
    pub dashboard_id: Option<String>,
    /// Props for a new dashboard
    pub dashboard_props: Option<DashboardProps>,
}

impl JitsiDashboardOptions {
    pub fn with_dashboard(mut self, id: impl Into<String>) -> Self {
        self.dashboard = Some(id.into());
        self
    }

    pub fn with_dashboard_id(mut self, id: impl Into<String>) -> Self {
        self.dashboard_id = Some(id.into());
        self
    }

    pub fn with_dashboard_props(mut self, props: DashboardProps) -> Self {
        self.dashboard_props = Some(props);
        self
    }

    /// True when props are given alongside an existing dashboard and will be
    /// dropped.
    pub fn ignores_props(&self) -> bool {
        self.dashboard.is_some() && self.dashboard_props.is_some()
    }
}

impl TryFrom<JitsiDashboardOptions> for DashboardSource {
    type Error = DashboardError;

    fn try_from(options: JitsiDashboardOptions) -> Result<Self, Self::Error> {
        let ignores_props = options.ignores_props();
        let JitsiDashboardOptions {
            dashboard,
            dashboard_id,
            dashboard_props,
        } = options;

        match (dashboard, dashboard_id) {
            (None, None) => Err(DashboardError::MissingDashboard),
            (Some(_), Some(_)) => Err(DashboardError::ConflictingDashboard),
            (Some(existing), None) => {
                if ignores_props {
                    crate::log_warn!(
                        "dashboard_props will be ignored as an existing dashboard is being used"
                    );
                }
                Ok(DashboardSource::UseExisting(existing))
            }
            (None, Some(id)) => Ok(DashboardSource::CreateNew {
                id,
                props: dashboard_props.unwrap_or_default(),
            }),
        }
    }
}

/// A dashboard in a stack with Jitsi widget builders attached.
#[derive(Debug)]
pub struct JitsiCloudWatchDashboard<'a> {
    dashboard: &'a mut Dashboard,
}

impl<'a> JitsiCloudWatchDashboard<'a> {
    /// Validate `options` and resolve the dashboard in `stack`.
    ///
    /// # Errors
    ///
    /// - [`DashboardError::MissingDashboard`] when neither `dashboard` nor `dashboard_id` is set
    /// - [`DashboardError::ConflictingDashboard`] when both are set
    /// - any error of [`JitsiCloudWatchDashboard::from_source`]
    pub fn new(stack: &'a mut Stack, options: JitsiDashboardOptions) -> Result<Self, DashboardError> {
        let source = DashboardSource::try_from(options)?;
        Self::from_source(stack, source)
    }

    /// Resolve an already validated source in `stack`.
    ///
    /// # Errors
    ///
    /// - [`DashboardError::UnknownDashboard`] when reusing an id the stack does not have
    /// - [`DashboardError::DuplicateConstructId`] or [`DashboardError::InvalidConstructId`]
    ///   when creating a dashboard the stack cannot accept
    pub fn from_source(stack: &'a mut Stack, source: DashboardSource) -> Result<Self, DashboardError> {
        let dashboard = match source {
            DashboardSource::UseExisting(id) => {
                crate::log_debug!("Using existing dashboard '{}'", id);
                stack
                    .dashboard_mut(&id)
                    .ok_or(DashboardError::UnknownDashboard { id })?
            }
            DashboardSource::CreateNew { id, props } => stack.add_dashboard(&id, props)?,
        };

        Ok(Self { dashboard })
    }

    pub fn dashboard(&self) -> &Dashboard {
        &*self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut *self.dashboard
    }

    /// Add Jitsi Web monitoring widgets.
    pub fn add_web(&mut self, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions) {
        jitsi_widgets_web(&mut *self.dashboard, log_groups, options);
    }

    /// Add JVB (Jitsi Videobridge) monitoring widgets.
    pub fn add_jvb(&mut self, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions) {
        jitsi_widgets_jvb(&mut *self.dashboard, log_groups, options);
    }

    /// Add Jicofo monitoring widgets.
    pub fn add_jicofo(&mut self, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions) {
        jitsi_widgets_jicofo(&mut *self.dashboard, log_groups, options);
    }

    /// Add Prosody monitoring widgets.
    pub fn add_prosody(&mut self, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions) {
        jitsi_widgets_prosody(&mut *self.dashboard, log_groups, options);
    }

    /// Add Jibri monitoring widgets.
    pub fn add_jibri(&mut self, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions) {
        jitsi_widgets_jibri(&mut *self.dashboard, log_groups, options);
    }

    /// Add the widgets of any component.
    pub fn add_component(
        &mut self,
        component: JitsiComponent,
        log_groups: impl Into<LogGroups>,
        options: &JitsiWidgetOptions,
    ) {
        jitsi_widgets(component, &mut *self.dashboard, log_groups, options);
    }
}
