//! Frozen layout and template tests.
//!
//! The widget grid and the synthesized template are what ends up in a
//! deployed dashboard, so their shape is pinned with an `insta` snapshot and
//! checked through a full file round trip.

use insta::assert_json_snapshot;
use jitsidash::app::cfn_template::CloudFormationTemplate;
use jitsidash::app::cloudwatch::{Dashboard, DashboardProps, PeriodOverride};
use jitsidash::app::jitsi::{
    JitsiCloudWatchDashboard, JitsiComponent, JitsiDashboardOptions, JitsiWidgetOptions,
};
use jitsidash::app::stack::Stack;
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::Value;
use tempfile::TempDir;

#[derive(Serialize)]
struct PlacedSummary<'a> {
    kind: &'a str,
    title: Option<&'a str>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

fn placed_summary(dashboard: &Dashboard) -> Vec<PlacedSummary<'_>> {
    dashboard
        .layout()
        .into_iter()
        .map(|placed| PlacedSummary {
            kind: placed.widget.kind(),
            title: placed.widget.title(),
            x: placed.x,
            y: placed.y,
            width: placed.widget.width(),
            height: placed.widget.height(),
        })
        .collect()
}

fn jitsi_stack() -> Stack {
    let mut stack = Stack::new("jitsi-monitoring").with_description("Jitsi monitoring");
    let mut dashboard = JitsiCloudWatchDashboard::new(
        &mut stack,
        JitsiDashboardOptions::default()
            .with_dashboard_id("jitsi-dashboard")
            .with_dashboard_props(
                DashboardProps::default()
                    .with_dashboard_name("jitsi")
                    .with_start("-PT12H")
                    .with_period_override(PeriodOverride::Auto),
            ),
    )
    .unwrap();

    for component in JitsiComponent::ALL {
        dashboard.add_component(
            component,
            format!("/jitsi/{}", component),
            &JitsiWidgetOptions::default(),
        );
    }
    stack
}

/// The Jicofo block is the only one whose row wraps, which makes it the
/// layout most likely to drift.
#[test]
fn test_jicofo_layout_is_frozen() {
    let mut dashboard = Dashboard::default();
    jitsidash::app::jitsi::jitsi_widgets_jicofo(
        &mut dashboard,
        "/jitsi/jicofo",
        &JitsiWidgetOptions::default(),
    );

    assert_json_snapshot!("jicofo_layout", placed_summary(&dashboard));
}

#[test]
fn test_dashboard_body_round_trip() {
    let stack = jitsi_stack();
    let template = stack.synth().unwrap();

    let resource = &template.resources["jitsidashboard"];
    assert_eq!(resource.properties["DashboardName"], Value::from("jitsi"));

    // Re-assemble the Fn::Join with a concrete region and parse the body
    let parts = resource.properties["DashboardBody"]["Fn::Join"][1]
        .as_array()
        .unwrap();
    let body: String = parts
        .iter()
        .map(|part| match part {
            Value::String(chunk) => chunk.clone(),
            _ => "eu-west-1".to_string(),
        })
        .collect();
    let body: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(body["start"], "-PT12H");
    assert_eq!(body["periodOverride"], "auto");

    let widgets = body["widgets"].as_array().unwrap();
    assert_eq!(widgets.len(), 4 + 2 + 7 + 4 + 4);
    assert_eq!(widgets[1]["properties"]["region"], "eu-west-1");
    assert_eq!(widgets[1]["properties"]["view"], "timeSeries");
    assert_eq!(
        widgets[1]["properties"]["query"],
        "SOURCE '/jitsi/web' | filter @logStream like \"jitsi/web_\" and (@message like \"ERROR\" or @message like \"error\")\n| stats count(*) as count by bin(5m)\n| sort @timestamp asc"
    );

    // Headers start each component block at column 0
    let headers: Vec<(u64, u64)> = widgets
        .iter()
        .filter(|w| w["type"] == "text")
        .map(|w| (w["x"].as_u64().unwrap(), w["y"].as_u64().unwrap()))
        .collect();
    assert_eq!(headers, vec![(0, 0), (0, 9), (0, 18), (0, 43), (0, 60)]);
}

#[test]
fn test_template_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let template = jitsi_stack().synth().unwrap();

    for file_name in ["template.json", "template.yaml"] {
        let path = temp_dir.path().join(file_name);
        template.to_file(&path).unwrap();

        let loaded = CloudFormationTemplate::from_file(&path).unwrap();
        assert_eq!(loaded, template, "{}", file_name);
    }

    let json = std::fs::read_to_string(temp_dir.path().join("template.json")).unwrap();
    assert!(json.contains("\"AWS::CloudWatch::Dashboard\""));
    assert!(json.contains("\"jitsidashboardName\""));
}

#[test]
fn test_synthesis_is_deterministic() {
    let first = jitsi_stack().synth().unwrap().to_json_string().unwrap();
    let second = jitsi_stack().synth().unwrap().to_json_string().unwrap();
    assert_eq!(first, second);
}
