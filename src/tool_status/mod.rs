//! Status lines for assistant tool calls.
//!
//! Each known tool registers a [`ToolStatusFormatter`]; anything else goes
//! through the registry's fallback entry. Formatting never performs I/O and
//! never fails.

mod error;
mod formatters;
mod labels;
mod record;
mod registry;
mod status;

pub use error::ToolStatusError;
pub use formatters::{
    AggregateDataFormatter, CreateChartFormatter, CreateReportFormatter, DescribeTableFormatter,
    ExploreFieldFormatter, FallbackFormatter, ListTablesFormatter, QueryDataFormatter,
    SendReportEmailFormatter,
};
pub use labels::humanize_field;
pub use record::ToolExecutionRecord;
pub use registry::ToolStatusRegistry;
pub use status::{StatusIcon, ToolStatusLine};

/// Formats successful executions of one tool.
pub trait ToolStatusFormatter: Send + Sync {
    /// Name the tool dispatch layer uses (e.g. `"explore_field"`).
    fn tool_name(&self) -> &'static str;

    /// Short label used for failure lines (e.g. `"Explore field"`).
    fn display_name(&self) -> &'static str;

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine;
}
