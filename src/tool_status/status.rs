use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    Discover,
    Inspect,
    Query,
    Aggregate,
    Report,
    Chart,
    Email,
    Generic,
    Failure,
}

impl StatusIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::Discover => "🗂",
            StatusIcon::Inspect => "🔍",
            StatusIcon::Query => "📋",
            StatusIcon::Aggregate => "📊",
            StatusIcon::Report => "📄",
            StatusIcon::Chart => "📈",
            StatusIcon::Email => "✉",
            StatusIcon::Generic => "⏺",
            StatusIcon::Failure => "✗",
        }
    }
}

/// Human-readable status for one tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatusLine {
    pub icon: StatusIcon,
    pub label: String,
    pub detail: String,
}

impl ToolStatusLine {
    pub fn new(icon: StatusIcon, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
            detail: detail.into(),
        }
    }

    pub fn failure(label: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusIcon::Failure, label, error)
    }

    pub fn is_failure(&self) -> bool {
        self.icon == StatusIcon::Failure
    }
}

impl fmt::Display for ToolStatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon.glyph(), self.label)?;
        if !self.detail.is_empty() {
            if self.is_failure() {
                write!(f, ": {}", self.detail)?;
            } else {
                write!(f, " ({})", self.detail)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let line = ToolStatusLine::new(StatusIcon::Query, "Queried shipments", "120 rows");
        assert_eq!(line.to_string(), "📋 Queried shipments (120 rows)");

        let line = ToolStatusLine::new(StatusIcon::Generic, "custom_tool", "");
        assert_eq!(line.to_string(), "⏺ custom_tool");

        let line = ToolStatusLine::failure("Explore field failed", "no such column");
        assert!(line.is_failure());
        assert_eq!(line.to_string(), "✗ Explore field failed: no such column");
    }
}
