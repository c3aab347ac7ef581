//! Widget builders for each Jitsi component.
//!
//! Every builder appends one row to the dashboard: a full-width markdown
//! header followed by the component's Logs Insights query widgets. The query
//! lines are written for the CloudWatch Logs Insights dialect and are passed
//! through unchanged.

#![warn(clippy::all, rust_2018_idioms)]

use crate::app::cloudwatch::{
    AddWidgets, LogQueryVisualizationType, LogQueryWidget, TextWidget, Widget,
};

use super::options::{
    JitsiComponent, JitsiWidgetOptions, LogGroups, ResolvedWidgetOptions, HEADER_HEIGHT,
    HEADER_WIDTH,
};

/// Shared state of one builder call.
struct ComponentWidgets {
    component: JitsiComponent,
    log_group_names: Vec<String>,
    options: ResolvedWidgetOptions,
}

impl ComponentWidgets {
    fn new(component: JitsiComponent, log_groups: LogGroups, options: &JitsiWidgetOptions) -> Self {
        let options = options.resolve(component);
        if log_groups.is_empty() {
            crate::log_warn!(
                "No log groups given for {} widgets; their queries have no SOURCE",
                component
            );
        }
        crate::log_debug!(
            "Building {} widgets for log groups {:?} with {:?}",
            component,
            log_groups,
            options
        );
        Self {
            component,
            log_group_names: log_groups.to_vec(),
            options,
        }
    }

    fn stream_filter(&self) -> String {
        self.options.stream_filter()
    }

    fn time_bin(&self) -> &str {
        &self.options.time_bin
    }

    fn header(&self) -> Widget {
        TextWidget::new(self.component.header_markdown())
            .with_width(HEADER_WIDTH)
            .with_height(HEADER_HEIGHT)
            .into()
    }

    fn query(
        &self,
        title: &str,
        view: LogQueryVisualizationType,
        width: u32,
        query_lines: Vec<String>,
    ) -> Widget {
        LogQueryWidget::new(title, self.log_group_names.clone(), query_lines)
            .with_view(view)
            .with_width(width)
            .with_height(self.options.height)
            .into()
    }

    /// Log level pie chart shared by the Java services, whose lines start with
    /// `<Service> <date> <time> <LEVEL>`.
    fn log_levels(&self, title: &str, service: &str) -> Widget {
        self.query(
            title,
            LogQueryVisualizationType::Pie,
            self.options.width,
            vec![
                self.stream_filter(),
                format!(
                    "parse @message '{} * * * ' as date, time, level, rest",
                    service
                ),
                "filter ispresent(level)".to_string(),
                "stats count(*) as count by level".to_string(),
            ],
        )
    }
}

/// Append Jitsi Web widgets: error rate, HTTP methods and HTTP status codes.
pub fn jitsi_widgets_web<D>(dashboard: &mut D, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions)
where
    D: AddWidgets + ?Sized,
{
    let set = ComponentWidgets::new(JitsiComponent::Web, log_groups.into(), options);
    let filter = set.stream_filter();
    let width = set.options.width;

    let widgets = vec![
        set.header(),
        set.query(
            "Jitsi Web Error Rate",
            LogQueryVisualizationType::Line,
            width,
            vec![
                format!(
                    "{} and (@message like \"ERROR\" or @message like \"error\")",
                    filter
                ),
                format!("stats count(*) as count by bin({})", set.time_bin()),
                "sort @timestamp asc".to_string(),
            ],
        ),
        set.query(
            "HTTP Methods Distribution",
            LogQueryVisualizationType::Pie,
            width,
            vec![
                filter.clone(),
                r#"parse @message /"(?<method>GET|POST|PUT|DELETE|HEAD|OPTIONS|PATCH) /"#
                    .to_string(),
                "filter ispresent(method)".to_string(),
                "stats count(*) as count by method".to_string(),
            ],
        ),
        set.query(
            "HTTP Status Code Distribution",
            LogQueryVisualizationType::Pie,
            width,
            vec![
                filter,
                r#"parse @message /(?<ip>[0-9.]+) (?<identd>\S+) (?<user>\S+) \[(?<timestamp>[^\]]+)\] "(?<request>[^"]*)" (?<status_code>\d{3}) (?<bytes>\d+) "(?<referrer>[^"]*)" "(?<agent>[^"]*)"/"#
                    .to_string(),
                "filter ispresent(status_code)".to_string(),
                "stats count(*) as count by status_code".to_string(),
            ],
        ),
    ];

    dashboard.add_widgets(widgets);
}

/// Append JVB (Jitsi Videobridge) widgets: log level distribution.
pub fn jitsi_widgets_jvb<D>(dashboard: &mut D, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions)
where
    D: AddWidgets + ?Sized,
{
    let set = ComponentWidgets::new(JitsiComponent::Jvb, log_groups.into(), options);

    let widgets = vec![
        set.header(),
        set.log_levels("JVB Log Levels Distribution", "JVB"),
    ];

    dashboard.add_widgets(widgets);
}

/// Append Jicofo widgets: log levels, conference requests, member and
/// conference lifecycle events, active conferences and Jibri sessions.
pub fn jitsi_widgets_jicofo<D>(dashboard: &mut D, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions)
where
    D: AddWidgets + ?Sized,
{
    let set = ComponentWidgets::new(JitsiComponent::Jicofo, log_groups.into(), options);
    let filter = set.stream_filter();
    let bin = set.time_bin();
    let wide = set.options.scaled_width(2, 1);
    let medium = set.options.scaled_width(3, 2);

    let widgets = vec![
        set.header(),
        set.log_levels("Jicofo Log Levels Distribution", "Jicofo"),
        set.query(
            "Conference Requests",
            LogQueryVisualizationType::Bar,
            wide,
            vec![
                filter.clone(),
                "filter @message like \"Conference request\"".to_string(),
                format!("stats count(*) as requestCount by bin({})", bin),
                "sort @timestamp asc".to_string(),
            ],
        ),
        set.query(
            "Member Join/Leave Events",
            LogQueryVisualizationType::Bar,
            medium,
            vec![
                filter.clone(),
                "filter @message like \"JitsiMeetConferenceImpl.onMemberJoined\" or @message like \"JitsiMeetConferenceImpl.onMemberLeft\"".to_string(),
                "parse @message \"JitsiMeetConferenceImpl.*#\" as eventType".to_string(),
                format!(
                    "stats sum(eventType = \"onMemberJoined\") as Joined, sum(eventType = \"onMemberLeft\") as Left by bin({})",
                    bin
                ),
                "sort @timestamp asc".to_string(),
            ],
        ),
        set.query(
            "Active Conferences",
            LogQueryVisualizationType::Line,
            medium,
            vec![
                filter.clone(),
                r#"parse @message /\[room=(?<room_id>[^ ]*) meeting_id=(?<meeting_id>[^\] ]*)/"#
                    .to_string(),
                "filter ispresent(meeting_id)".to_string(),
                format!("stats count_distinct(meeting_id) as count by bin({})", bin),
                "sort @timestamp asc".to_string(),
            ],
        ),
        set.query(
            "Conference Start/Stop Events",
            LogQueryVisualizationType::Bar,
            medium,
            vec![
                filter.clone(),
                "filter @message like \"JitsiMeetConferenceImpl.<init>\" or @message like \"JitsiMeetConferenceImpl.stop\"".to_string(),
                "parse @message \"JitsiMeetConferenceImpl.*#\" as eventType".to_string(),
                format!(
                    "stats sum(eventType = \"<init>\") as Init, sum(eventType = \"stop\") as Stop by bin({})",
                    bin
                ),
                "sort @timestamp asc".to_string(),
            ],
        ),
        set.query(
            "Jibri Recording Session Start | Stop Events",
            LogQueryVisualizationType::Bar,
            medium,
            vec![
                filter,
                "filter @message like \"JibriSession.startInternal\" or @message like \"JibriSession.stop\"".to_string(),
                "parse @message \"JibriSession.*#\" as eventType".to_string(),
                format!(
                    "stats sum(eventType = \"startInternal\") as Start, sum(eventType = \"stop\") as Stop by bin({})",
                    bin
                ),
                "sort @timestamp asc".to_string(),
            ],
        ),
    ];

    dashboard.add_widgets(widgets);
}

/// Append Prosody widgets: log levels, client connection events and an
/// estimate of active client connections.
pub fn jitsi_widgets_prosody<D>(dashboard: &mut D, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions)
where
    D: AddWidgets + ?Sized,
{
    let set = ComponentWidgets::new(JitsiComponent::Prosody, log_groups.into(), options);
    let filter = set.stream_filter();
    let bin = set.time_bin();
    let wide = set.options.scaled_width(2, 1);

    let widgets = vec![
        set.header(),
        set.query(
            "Prosody Log Levels Distribution",
            LogQueryVisualizationType::Pie,
            set.options.width,
            vec![
                filter.clone(),
                // level and message are tab separated
                r#"parse @message "* * * *\t*" as date, time, connection_id, level, message"#
                    .to_string(),
                "filter ispresent(level)".to_string(),
                "fields trim(level) as trim_level".to_string(),
                "stats count(*) as count by trim_level".to_string(),
            ],
        ),
        set.query(
            "Client Connection Events",
            LogQueryVisualizationType::Bar,
            wide,
            vec![
                filter.clone(),
                "filter @message like \"Client disconnected\" or @message like \"Client connected\"".to_string(),
                format!(
                    "stats sum(@message like \"Client connected\") as Connected, sum(@message like \"Client disconnected\") as Disconnected by bin({})",
                    bin
                ),
                "sort @timestamp asc".to_string(),
            ],
        ),
        set.query(
            "Active Client Connections",
            LogQueryVisualizationType::Line,
            wide,
            vec![
                filter,
                "filter @message like \"Client connected\" or @message like \"Client disconnected\"".to_string(),
                format!(
                    "stats running_sum(if(@message like \"Client connected\", 1, -1)) as active_connections by bin({})",
                    bin
                ),
                "sort @timestamp asc".to_string(),
            ],
        ),
    ];

    dashboard.add_widgets(widgets);
}

/// Append Jibri widgets: log levels, active Jibri instances and active
/// recordings.
pub fn jitsi_widgets_jibri<D>(dashboard: &mut D, log_groups: impl Into<LogGroups>, options: &JitsiWidgetOptions)
where
    D: AddWidgets + ?Sized,
{
    let set = ComponentWidgets::new(JitsiComponent::Jibri, log_groups.into(), options);
    let filter = set.stream_filter();
    let bin = set.time_bin();
    let width = set.options.width;

    let widgets = vec![
        set.header(),
        set.log_levels("Jibri Log Levels Distribution", "Jibri"),
        set.query(
            "Active Jibri Services",
            LogQueryVisualizationType::Line,
            width,
            vec![
                filter.clone(),
                "parse @logStream \"jitsi/jibri_*-*\" as version, container_id".to_string(),
                "filter ispresent(container_id)".to_string(),
                format!(
                    "stats count_distinct(container_id) as activity_count by bin({})",
                    bin
                ),
                "sort @timestamp asc".to_string(),
            ],
        ),
        set.query(
            "Active Jibri Recordings",
            LogQueryVisualizationType::Line,
            width,
            vec![
                filter,
                "filter @message like \"MediaReceivedStatusCheck.run\"".to_string(),
                "parse @message \"[session_id=*]\" as session_id".to_string(),
                "filter ispresent(session_id)".to_string(),
                format!("stats count_distinct(session_id) as count by bin({})", bin),
                "sort @timestamp asc".to_string(),
            ],
        ),
    ];

    dashboard.add_widgets(widgets);
}

/// Append the widgets of `component`.
pub fn jitsi_widgets<D>(
    component: JitsiComponent,
    dashboard: &mut D,
    log_groups: impl Into<LogGroups>,
    options: &JitsiWidgetOptions,
) where
    D: AddWidgets + ?Sized,
{
    match component {
        JitsiComponent::Web => jitsi_widgets_web(dashboard, log_groups, options),
        JitsiComponent::Jvb => jitsi_widgets_jvb(dashboard, log_groups, options),
        JitsiComponent::Jicofo => jitsi_widgets_jicofo(dashboard, log_groups, options),
        JitsiComponent::Prosody => jitsi_widgets_prosody(dashboard, log_groups, options),
        JitsiComponent::Jibri => jitsi_widgets_jibri(dashboard, log_groups, options),
    }
}
