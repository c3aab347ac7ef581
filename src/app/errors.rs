//! Construction errors.

/// Misuse of dashboard construction options.
///
/// These are reported synchronously by the call that received the bad input
/// and never leave a half-built dashboard behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Neither an existing dashboard nor a dashboard id was given
    MissingDashboard,
    /// Both an existing dashboard and a dashboard id were given
    ConflictingDashboard,
    /// The existing dashboard id is not defined in the stack
    UnknownDashboard { id: String },
    /// A construct with the same id or logical id is already in the stack
    DuplicateConstructId { id: String },
    /// The id has no characters usable in a CloudFormation logical id
    InvalidConstructId { id: String },
    /// A component was given an empty list of log groups
    EmptyLogGroups { component: String },
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::MissingDashboard => write!(
                f,
                "Either a dashboard or dashboard_id with optional props must be provided"
            ),
            DashboardError::ConflictingDashboard => write!(
                f,
                "Either a dashboard or dashboard_id with optional props must be provided, not both"
            ),
            DashboardError::UnknownDashboard { id } => {
                write!(f, "No dashboard with id '{}' exists in the stack", id)
            }
            DashboardError::DuplicateConstructId { id } => {
                write!(f, "A construct with id '{}' already exists in the stack", id)
            }
            DashboardError::InvalidConstructId { id } => write!(
                f,
                "Construct id '{}' contains no alphanumeric characters",
                id
            ),
            DashboardError::EmptyLogGroups { component } => write!(
                f,
                "Specify at least one log group name for the {} widgets",
                component
            ),
        }
    }
}

impl std::error::Error for DashboardError {}
