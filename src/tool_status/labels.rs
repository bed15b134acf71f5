use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\-.\s]+").expect("separator pattern is valid"));

/// Human label for a column or field name.
pub fn humanize_field(field: &str) -> String {
    if let Some(label) = known_label(field) {
        return label.to_string();
    }
    SEPARATORS.replace_all(field, " ").trim().to_string()
}

fn known_label(field: &str) -> Option<&'static str> {
    let label = match field {
        "carrier_name" | "carrier" => "Carrier",
        "carrier_id" => "Carrier ID",
        "shipment_id" => "Shipment ID",
        "order_id" => "Order ID",
        "tracking_number" => "Tracking number",
        "ship_date" => "Ship date",
        "delivery_date" => "Delivery date",
        "expected_delivery_date" => "Expected delivery",
        "origin_city" => "Origin city",
        "origin_country" => "Origin country",
        "destination_city" => "Destination city",
        "destination_country" => "Destination country",
        "service_level" => "Service level",
        "transit_days" => "Transit days",
        "weight_kg" => "Weight (kg)",
        "freight_cost" => "Freight cost",
        "total_cost" => "Total cost",
        "on_time" => "On time",
        "status" => "Status",
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields() {
        assert_eq!(humanize_field("carrier_name"), "Carrier");
        assert_eq!(humanize_field("weight_kg"), "Weight (kg)");
        assert_eq!(humanize_field("order_id"), "Order ID");
    }

    #[test]
    fn test_unknown_fields_replace_separators() {
        assert_eq!(humanize_field("pallet_count"), "pallet count");
        assert_eq!(humanize_field("dock-door.number"), "dock door number");
        assert_eq!(humanize_field("__customs__hold_"), "customs hold");
        assert_eq!(humanize_field(""), "");
    }
}
