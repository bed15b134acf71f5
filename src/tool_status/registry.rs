use indexmap::IndexMap;
use std::sync::Arc;

use crate::console::console;

use super::{
    AggregateDataFormatter, CreateChartFormatter, CreateReportFormatter, DescribeTableFormatter,
    ExploreFieldFormatter, FallbackFormatter, ListTablesFormatter, QueryDataFormatter,
    SendReportEmailFormatter, ToolExecutionRecord, ToolStatusError, ToolStatusFormatter,
    ToolStatusLine,
};

/// Tool name to formatter, plus one fallback entry for unregistered tools.
#[derive(Clone)]
pub struct ToolStatusRegistry {
    formatters: IndexMap<&'static str, Arc<dyn ToolStatusFormatter>>,
    fallback: FallbackFormatter,
}

impl ToolStatusRegistry {
    /// Registry with only the fallback entry.
    pub fn empty() -> Self {
        Self {
            formatters: IndexMap::new(),
            fallback: FallbackFormatter,
        }
    }

    /// Builder form of [`register_formatter`](Self::register_formatter).
    ///
    /// A formatter whose tool name is already registered is dropped with a
    /// warning; the first one stays in place.
    pub fn with_formatter(mut self, formatter: Arc<dyn ToolStatusFormatter>) -> Self {
        if let Err(e) = self.register_formatter(formatter) {
            console().warning(&e.to_string());
        }
        self
    }

    pub fn register_formatter(
        &mut self,
        formatter: Arc<dyn ToolStatusFormatter>,
    ) -> Result<(), ToolStatusError> {
        let name = formatter.tool_name();
        if self.formatters.contains_key(name) {
            return Err(ToolStatusError::DuplicateFormatter {
                tool: name.to_string(),
            });
        }
        self.formatters.insert(name, formatter);
        Ok(())
    }

    pub fn get_formatter(&self, tool_name: &str) -> Option<&dyn ToolStatusFormatter> {
        self.formatters.get(tool_name).map(|f| f.as_ref())
    }

    /// Registered tool names in registration order.
    pub fn known_tools(&self) -> Vec<&'static str> {
        self.formatters.keys().copied().collect()
    }

    pub fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let formatter = self.get_formatter(&record.tool_name);

        if let Some(error) = record.error_text() {
            return match formatter {
                Some(formatter) => ToolStatusLine::failure(
                    format!("{} failed", formatter.display_name()),
                    error,
                ),
                None => self.fallback.failure(record, error),
            };
        }

        match formatter {
            Some(formatter) => formatter.format(record),
            None => self.fallback.format(record),
        }
    }
}

impl Default for ToolStatusRegistry {
    fn default() -> Self {
        Self::empty()
            .with_formatter(Arc::new(ListTablesFormatter))
            .with_formatter(Arc::new(DescribeTableFormatter))
            .with_formatter(Arc::new(ExploreFieldFormatter))
            .with_formatter(Arc::new(QueryDataFormatter))
            .with_formatter(Arc::new(AggregateDataFormatter))
            .with_formatter(Arc::new(CreateReportFormatter))
            .with_formatter(Arc::new(CreateChartFormatter))
            .with_formatter(Arc::new(SendReportEmailFormatter))
    }
}
