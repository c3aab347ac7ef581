//! Jitsi component identities, widget options and log group references.

#![warn(clippy::all, rust_2018_idioms)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Default widget width and height in grid units.
pub const DEFAULT_WIDGET_SIZE: u32 = 8;

/// Width and height of the header text widget on top of each component block.
pub const HEADER_WIDTH: u32 = 24;
pub const HEADER_HEIGHT: u32 = 1;

/// The Jitsi services a widget block can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JitsiComponent {
    /// Jitsi Meet web frontend (nginx access logs)
    Web,
    /// Jitsi Videobridge
    Jvb,
    /// Jicofo conference focus
    Jicofo,
    /// Prosody XMPP server
    Prosody,
    /// Jibri recording service
    Jibri,
}

impl JitsiComponent {
    pub const ALL: [JitsiComponent; 5] = [
        JitsiComponent::Web,
        JitsiComponent::Jvb,
        JitsiComponent::Jicofo,
        JitsiComponent::Prosody,
        JitsiComponent::Jibri,
    ];

    /// Log stream prefix used when none is configured.
    pub fn default_stream_prefix(&self) -> &'static str {
        match self {
            JitsiComponent::Web => "jitsi/web_",
            JitsiComponent::Jvb => "jitsi/jvb_",
            JitsiComponent::Jicofo => "jitsi/jicofo_",
            JitsiComponent::Prosody => "jitsi/prosody_",
            JitsiComponent::Jibri => "jitsi/jibri_",
        }
    }

    /// Aggregation bin used when none is configured.
    pub fn default_time_bin(&self) -> &'static str {
        match self {
            JitsiComponent::Web => "5m",
            _ => "15m",
        }
    }

    /// Markdown of the header widget.
    pub fn header_markdown(&self) -> &'static str {
        match self {
            JitsiComponent::Web => "## Jitsi Web Monitoring Dashboard",
            JitsiComponent::Jvb => "## JVB (Jitsi Videobridge) Monitoring Dashboard",
            JitsiComponent::Jicofo => "## Jicofo Monitoring Dashboard",
            JitsiComponent::Prosody => "## Prosody Monitoring Dashboard",
            JitsiComponent::Jibri => "## Jibri Monitoring Dashboard",
        }
    }
}

impl std::fmt::Display for JitsiComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JitsiComponent::Web => "web",
            JitsiComponent::Jvb => "jvb",
            JitsiComponent::Jicofo => "jicofo",
            JitsiComponent::Prosody => "prosody",
            JitsiComponent::Jibri => "jibri",
        };
        write!(f, "{}", name)
    }
}

/// Options accepted by every component builder. Unset fields fall back to the
/// component defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitsiWidgetOptions {
    /// Prefix used to filter log streams
    pub stream_prefix: Option<String>,
    /// Widget base width (defaults to 8)
    pub width: Option<u32>,
    /// Widget base height (defaults to 8)
    pub height: Option<u32>,
    /// Time bin for aggregations, e.g. `5m`
    pub time_bin: Option<String>,
}

impl JitsiWidgetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stream_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.stream_prefix = Some(prefix.into());
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_time_bin(mut self, time_bin: impl Into<String>) -> Self {
        self.time_bin = Some(time_bin.into());
        self
    }

    /// Fill unset fields with the defaults of `component`.
    pub fn resolve(&self, component: JitsiComponent) -> ResolvedWidgetOptions {
        ResolvedWidgetOptions {
            stream_prefix: self
                .stream_prefix
                .clone()
                .unwrap_or_else(|| component.default_stream_prefix().to_string()),
            width: self.width.unwrap_or(DEFAULT_WIDGET_SIZE),
            height: self.height.unwrap_or(DEFAULT_WIDGET_SIZE),
            time_bin: self
                .time_bin
                .clone()
                .unwrap_or_else(|| component.default_time_bin().to_string()),
        }
    }
}

/// Widget options with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWidgetOptions {
    pub stream_prefix: String,
    pub width: u32,
    pub height: u32,
    pub time_bin: String,
}

impl ResolvedWidgetOptions {
    /// The query line restricting a query to the configured log streams.
    pub fn stream_filter(&self) -> String {
        stream_filter(&self.stream_prefix)
    }

    /// Base width scaled by `numerator / denominator`, rounded down.
    /// Saturates at `u32::MAX` instead of overflowing.
    pub fn scaled_width(&self, numerator: u32, denominator: u32) -> u32 {
        let scaled = u64::from(self.width) * u64::from(numerator) / u64::from(denominator.max(1));
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

/// `filter @logStream like "<prefix>"`
pub fn stream_filter(prefix: &str) -> String {
    format!("filter @logStream like \"{}\"", prefix)
}

/// One log group name or an ordered list of them.
///
/// Serialized as a bare string or an array, matching how the names are
/// written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogGroups {
    Single(String),
    Multiple(Vec<String>),
}

impl LogGroups {
    /// The names in their given order.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            LogGroups::Single(name) => vec![name.clone()],
            LogGroups::Multiple(names) => names.clone(),
        }
    }

    /// True for an empty list. A query needs at least one log group.
    pub fn is_empty(&self) -> bool {
        match self {
            LogGroups::Single(_) => false,
            LogGroups::Multiple(names) => names.is_empty(),
        }
    }
}

impl From<&str> for LogGroups {
    fn from(name: &str) -> Self {
        LogGroups::Single(name.to_string())
    }
}

impl From<String> for LogGroups {
    fn from(name: String) -> Self {
        LogGroups::Single(name)
    }
}

impl From<Vec<String>> for LogGroups {
    fn from(names: Vec<String>) -> Self {
        LogGroups::Multiple(names)
    }
}

impl From<Vec<&str>> for LogGroups {
    fn from(names: Vec<&str>) -> Self {
        LogGroups::Multiple(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for LogGroups {
    fn from(names: &[&str]) -> Self {
        LogGroups::Multiple(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LogGroups {
    fn from(names: [&str; N]) -> Self {
        LogGroups::Multiple(names.iter().map(|name| name.to_string()).collect())
    }
}

impl Serialize for LogGroups {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LogGroups::Single(name) => name.serialize(serializer),
            LogGroups::Multiple(names) => names.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LogGroups {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(name) => Ok(LogGroups::Single(name)),
            Value::Array(items) => {
                let names: Result<Vec<String>, _> = items
                    .into_iter()
                    .map(|item| {
                        item.as_str()
                            .map(|name| name.to_string())
                            .ok_or_else(|| serde::de::Error::custom("Expected string in array"))
                    })
                    .collect();
                Ok(LogGroups::Multiple(names?))
            }
            _ => Err(serde::de::Error::custom(
                "Expected log group name or array of names",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_component_defaults() {
        let web = JitsiWidgetOptions::default().resolve(JitsiComponent::Web);
        assert_eq!(web.stream_prefix, "jitsi/web_");
        assert_eq!(web.width, 8);
        assert_eq!(web.height, 8);
        assert_eq!(web.time_bin, "5m");

        let jibri = JitsiWidgetOptions::default().resolve(JitsiComponent::Jibri);
        assert_eq!(jibri.stream_prefix, "jitsi/jibri_");
        assert_eq!(jibri.time_bin, "15m");
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let resolved = JitsiWidgetOptions::new()
            .with_stream_prefix("meet/web-")
            .with_width(6)
            .with_height(4)
            .with_time_bin("1h")
            .resolve(JitsiComponent::Web);

        assert_eq!(resolved.stream_prefix, "meet/web-");
        assert_eq!(resolved.width, 6);
        assert_eq!(resolved.height, 4);
        assert_eq!(resolved.time_bin, "1h");
        assert_eq!(resolved.stream_filter(), "filter @logStream like \"meet/web-\"");
    }

    #[test]
    fn test_scaled_width_rounds_down() {
        let resolved = JitsiWidgetOptions::new()
            .with_width(7)
            .resolve(JitsiComponent::Jicofo);
        assert_eq!(resolved.scaled_width(2, 1), 14);
        assert_eq!(resolved.scaled_width(3, 2), 10);
    }

    #[test]
    fn test_scaled_width_saturates_on_large_widths() {
        let resolved = JitsiWidgetOptions::new()
            .with_width(u32::MAX - 1)
            .resolve(JitsiComponent::Jicofo);
        assert_eq!(resolved.scaled_width(2, 1), u32::MAX);
        assert_eq!(resolved.scaled_width(3, 2), u32::MAX);

        let big = JitsiWidgetOptions::new()
            .with_width(3_000_000_000)
            .resolve(JitsiComponent::Jicofo);
        assert_eq!(big.scaled_width(1, 2), 1_500_000_000);
        assert_eq!(big.scaled_width(2, 1), u32::MAX);
    }

    #[test]
    fn test_log_groups_keep_order() {
        assert_eq!(LogGroups::from("one").to_vec(), vec!["one"]);
        assert_eq!(
            LogGroups::from(["b", "a", "c"]).to_vec(),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_log_groups_empty() {
        assert!(LogGroups::from(Vec::<String>::new()).is_empty());
        assert!(!LogGroups::from("").is_empty());
        assert!(!LogGroups::from(["a"]).is_empty());
    }

    #[test]
    fn test_log_groups_deserialize_both_shapes() {
        let single: LogGroups = serde_json::from_str("\"/jitsi/web\"").unwrap();
        assert_eq!(single, LogGroups::Single("/jitsi/web".to_string()));

        let many: LogGroups = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(many.to_vec(), vec!["a", "b"]);

        assert!(serde_json::from_str::<LogGroups>("[1]").is_err());
        assert!(serde_json::from_str::<LogGroups>("3").is_err());
    }

    #[test]
    fn test_component_names() {
        let names: Vec<String> = JitsiComponent::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["web", "jvb", "jicofo", "prosody", "jibri"]);

        let parsed: JitsiComponent = serde_json::from_str("\"prosody\"").unwrap();
        assert_eq!(parsed, JitsiComponent::Prosody);
    }
}
