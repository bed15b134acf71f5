use super::{StatusIcon, ToolExecutionRecord, ToolStatusFormatter, ToolStatusLine, humanize_field};

fn counted(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn with_subject(verb: &str, subject: &str) -> String {
    if subject.is_empty() {
        verb.to_string()
    } else {
        format!("{} {}", verb, subject)
    }
}

pub struct ListTablesFormatter;

impl ToolStatusFormatter for ListTablesFormatter {
    fn tool_name(&self) -> &'static str {
        "list_tables"
    }

    fn display_name(&self) -> &'static str {
        "List tables"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let count = record.result_count("count", "tables");
        ToolStatusLine::new(StatusIcon::Discover, "Listed tables", counted(count, "table"))
    }
}

pub struct DescribeTableFormatter;

impl ToolStatusFormatter for DescribeTableFormatter {
    fn tool_name(&self) -> &'static str {
        "describe_table"
    }

    fn display_name(&self) -> &'static str {
        "Describe table"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let count = record.result_count("column_count", "columns");
        ToolStatusLine::new(
            StatusIcon::Inspect,
            with_subject("Described", record.input_str("table")),
            counted(count, "column"),
        )
    }
}

pub struct ExploreFieldFormatter;

impl ToolStatusFormatter for ExploreFieldFormatter {
    fn tool_name(&self) -> &'static str {
        "explore_field"
    }

    fn display_name(&self) -> &'static str {
        "Explore field"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let field = humanize_field(record.input_str("field"));
        let mut label = with_subject("Explored", &field);
        let table = record.input_str("table");
        if !table.is_empty() {
            label = format!("{} in {}", label, table);
        }

        let count = record.result_count("distinct_count", "values");
        ToolStatusLine::new(
            StatusIcon::Inspect,
            label,
            counted(count, "distinct value"),
        )
    }
}

pub struct QueryDataFormatter;

impl ToolStatusFormatter for QueryDataFormatter {
    fn tool_name(&self) -> &'static str {
        "query_data"
    }

    fn display_name(&self) -> &'static str {
        "Query data"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let count = record.result_count("row_count", "rows");
        ToolStatusLine::new(
            StatusIcon::Query,
            with_subject("Queried", record.input_str("table")),
            counted(count, "row"),
        )
    }
}

pub struct AggregateDataFormatter;

impl ToolStatusFormatter for AggregateDataFormatter {
    fn tool_name(&self) -> &'static str {
        "aggregate_data"
    }

    fn display_name(&self) -> &'static str {
        "Aggregate data"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let metric = humanize_field(record.input_str("metric"));
        let group_by = humanize_field(record.input_str("group_by"));

        let mut label = with_subject("Aggregated", &metric);
        if !group_by.is_empty() {
            label = format!("{} by {}", label, group_by);
        }

        let count = record.result_count("group_count", "groups");
        ToolStatusLine::new(StatusIcon::Aggregate, label, counted(count, "group"))
    }
}

pub struct CreateReportFormatter;

impl ToolStatusFormatter for CreateReportFormatter {
    fn tool_name(&self) -> &'static str {
        "create_report"
    }

    fn display_name(&self) -> &'static str {
        "Create report"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let title = match record.input_str("title") {
            "" => record.result_str("title"),
            title => title,
        };
        ToolStatusLine::new(StatusIcon::Report, "Created report", title)
    }
}

pub struct CreateChartFormatter;

impl ToolStatusFormatter for CreateChartFormatter {
    fn tool_name(&self) -> &'static str {
        "create_chart"
    }

    fn display_name(&self) -> &'static str {
        "Create chart"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let label = match record.input_str("chart_type") {
            "" => "Created chart".to_string(),
            chart_type => format!("Created {} chart", chart_type),
        };
        ToolStatusLine::new(StatusIcon::Chart, label, record.input_str("title"))
    }
}

pub struct SendReportEmailFormatter;

impl ToolStatusFormatter for SendReportEmailFormatter {
    fn tool_name(&self) -> &'static str {
        "send_report_email"
    }

    fn display_name(&self) -> &'static str {
        "Send report email"
    }

    fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        let detail = match record.input_str("recipient") {
            "" => {
                let count = record
                    .tool_input
                    .get("recipients")
                    .and_then(|v| v.as_array())
                    .map(|items| items.len() as u64)
                    .unwrap_or(0);
                format!("to {}", counted(count, "recipient"))
            }
            recipient => format!("to {}", recipient),
        };
        ToolStatusLine::new(StatusIcon::Email, "Emailed report", detail)
    }
}

/// Default entry for tools nobody registered: the raw name, no detail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackFormatter;

impl FallbackFormatter {
    pub fn format(&self, record: &ToolExecutionRecord) -> ToolStatusLine {
        ToolStatusLine::new(StatusIcon::Generic, record.tool_name.clone(), "")
    }

    pub fn failure(&self, record: &ToolExecutionRecord, error: String) -> ToolStatusLine {
        ToolStatusLine::failure(format!("{} failed", record.tool_name), error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_tables() {
        let record = ToolExecutionRecord::new(
            "list_tables",
            json!({}),
            json!({"tables": ["shipments", "carriers"]}),
        );
        let line = ListTablesFormatter.format(&record);

        assert_eq!(line.icon, StatusIcon::Discover);
        assert_eq!(line.label, "Listed tables");
        assert_eq!(line.detail, "2 tables");
    }

    #[test]
    fn test_explore_field_humanizes_field() {
        let record = ToolExecutionRecord::new(
            "explore_field",
            json!({"table": "shipments", "field": "carrier_name"}),
            json!({"distinct_count": 1}),
        );
        let line = ExploreFieldFormatter.format(&record);

        assert_eq!(line.label, "Explored Carrier in shipments");
        assert_eq!(line.detail, "1 distinct value");
    }

    #[test]
    fn test_query_data_missing_fields_default() {
        let record = ToolExecutionRecord::new("query_data", json!({}), json!({}));
        let line = QueryDataFormatter.format(&record);

        assert_eq!(line.label, "Queried");
        assert_eq!(line.detail, "0 rows");
    }

    #[test]
    fn test_aggregate_data() {
        let record = ToolExecutionRecord::new(
            "aggregate_data",
            json!({"metric": "freight_cost", "group_by": "origin_country"}),
            json!({"groups": [{}, {}, {}]}),
        );
        let line = AggregateDataFormatter.format(&record);

        assert_eq!(line.icon, StatusIcon::Aggregate);
        assert_eq!(line.label, "Aggregated Freight cost by Origin country");
        assert_eq!(line.detail, "3 groups");
    }

    #[test]
    fn test_report_title_from_result() {
        let record = ToolExecutionRecord::new(
            "create_report",
            json!({}),
            json!({"title": "Q3 carrier scorecard"}),
        );
        let line = CreateReportFormatter.format(&record);

        assert_eq!(line.label, "Created report");
        assert_eq!(line.detail, "Q3 carrier scorecard");
    }

    #[test]
    fn test_chart_and_email() {
        let chart = ToolExecutionRecord::new(
            "create_chart",
            json!({"chart_type": "bar", "title": "Late deliveries"}),
            json!({}),
        );
        assert_eq!(CreateChartFormatter.format(&chart).label, "Created bar chart");

        let email = ToolExecutionRecord::new(
            "send_report_email",
            json!({"recipients": ["a@example.com", "b@example.com"]}),
            json!({}),
        );
        assert_eq!(
            SendReportEmailFormatter.format(&email).detail,
            "to 2 recipients"
        );
    }

    #[test]
    fn test_fallback() {
        let record = ToolExecutionRecord::new("warehouse_lookup", json!({"x": 1}), json!({}));
        let line = FallbackFormatter.format(&record);

        assert_eq!(line.icon, StatusIcon::Generic);
        assert_eq!(line.label, "warehouse_lookup");
        assert_eq!(line.detail, "");
    }
}
