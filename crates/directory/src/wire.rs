//! Wire-shape tolerance and normalization.
//!
//! Directory responses vary: list endpoints answer with either a bare JSON
//! array or a `{results, next, ...}` envelope, numbers sometimes arrive as
//! strings, and any item field may be null or absent. All of that collapses
//! into one normalization step here — the engine only ever sees canonical
//! records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use parishkeep_core::num;
use parishkeep_inventory::{InventoryItem, ItemLabel, ItemStatus};

/// A list response in either accepted shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPage<T> {
    Envelope {
        results: Vec<T>,
        #[serde(default)]
        next: Option<String>,
    },
    Bare(Vec<T>),
}

impl<T> ListPage<T> {
    /// Canonical sequence plus the next-page indicator (bare arrays have
    /// no continuation).
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            ListPage::Envelope { results, next } => (results, next),
            ListPage::Bare(items) => (items, None),
        }
    }
}

/// Item record as it appears on the wire: everything optional, numbers
/// possibly stringly-typed.
#[derive(Debug, Default, Deserialize)]
pub struct RawInventoryItem {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub acquisition_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub salvage_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub useful_life_years: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub ministry_name: Option<String>,
}

impl RawInventoryItem {
    /// Normalize into the canonical engine record. Total: no wire value can
    /// make this fail.
    pub fn normalize(self) -> InventoryItem {
        InventoryItem {
            id: self.id,
            item_name: self.item_name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            acquisition_date: self.acquisition_date.as_deref().and_then(parse_wire_date),
            acquisition_cost: num::coerce_amount(self.acquisition_cost),
            salvage_value: num::coerce_amount(self.salvage_value),
            useful_life_years: num::coerce_life_years(self.useful_life_years),
            quantity: num::coerce_count(self.quantity),
            status: ItemStatus::parse(self.status.as_deref().unwrap_or_default()),
            label: ItemLabel::parse(self.label.as_deref().unwrap_or_default()),
            remarks: self.remarks.unwrap_or_default(),
            ministry_name: self.ministry_name.unwrap_or_default(),
        }
    }
}

/// Ministry record as listed by the ministry directory.
#[derive(Debug, Default, Deserialize)]
pub struct RawMinistry {
    #[serde(default)]
    pub name: Option<String>,
}

/// Acquisition dates arrive as either full timestamps or plain calendar
/// dates; plain dates anchor at midnight UTC. Unparseable values drop to
/// `None`.
pub fn parse_wire_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = trimmed.parse::<DateTime<Utc>>() {
        return Some(ts);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// First validation message in a rejection body, depth-first.
///
/// Validation errors come back as `{"field": ["message", ...]}` maps, a
/// `{"detail": "..."}` object, or occasionally a bare string; the first
/// string encountered is the one shown to the user.
pub fn first_validation_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(values) => values.iter().find_map(first_validation_message),
        Value::Object(map) => map.values().find_map(first_validation_message),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_and_envelope_normalize_to_the_same_sequence() {
        let bare: ListPage<RawInventoryItem> =
            serde_json::from_value(json!([{"item_name": "Projector"}])).unwrap();
        let (items, next) = bare.into_parts();
        assert_eq!(items.len(), 1);
        assert!(next.is_none());

        let envelope: ListPage<RawInventoryItem> = serde_json::from_value(json!({
            "count": 1,
            "next": "https://api.example.org/inventory/?page=2",
            "previous": null,
            "results": [{"item_name": "Projector"}],
        }))
        .unwrap();
        let (items, next) = envelope.into_parts();
        assert_eq!(items.len(), 1);
        assert_eq!(
            next.as_deref(),
            Some("https://api.example.org/inventory/?page=2")
        );
    }

    #[test]
    fn every_field_may_be_absent() {
        let raw: RawInventoryItem = serde_json::from_value(json!({})).unwrap();
        let item = raw.normalize();
        assert_eq!(item, InventoryItem::default());
    }

    #[test]
    fn stringly_typed_numbers_are_accepted() {
        let raw: RawInventoryItem = serde_json::from_value(json!({
            "acquisition_cost": "1250.50",
            "salvage_value": "not a number",
            "quantity": "3",
            "useful_life_years": 5,
        }))
        .unwrap();

        let item = raw.normalize();
        assert_eq!(item.acquisition_cost, 1250.50);
        assert_eq!(item.salvage_value, 0.0);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.useful_life_years, Some(5));
    }

    #[test]
    fn negative_wire_numbers_coerce_to_zero() {
        let raw: RawInventoryItem = serde_json::from_value(json!({
            "acquisition_cost": -900.0,
            "quantity": -4,
            "useful_life_years": 0,
        }))
        .unwrap();

        let item = raw.normalize();
        assert_eq!(item.acquisition_cost, 0.0);
        assert_eq!(item.quantity, 0);
        assert_eq!(item.useful_life_years, None);
    }

    #[test]
    fn dates_parse_in_both_wire_forms() {
        let plain = parse_wire_date("2024-03-01").unwrap();
        assert_eq!(plain.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let stamped = parse_wire_date("2024-03-01T08:30:00Z").unwrap();
        assert_eq!(stamped.to_rfc3339(), "2024-03-01T08:30:00+00:00");

        assert!(parse_wire_date("").is_none());
        assert!(parse_wire_date("March 1st").is_none());
    }

    #[test]
    fn unrecognized_enum_values_fall_back() {
        let raw: RawInventoryItem = serde_json::from_value(json!({
            "status": "Misplaced",
            "label": "borrowed",
        }))
        .unwrap();

        let item = raw.normalize();
        assert_eq!(item.status, ItemStatus::Unknown);
        assert_eq!(item.label, ItemLabel::Unlabeled);
    }

    #[test]
    fn first_validation_message_walks_field_maps() {
        let body = json!({
            "item_name": ["an item with this name already exists"],
            "quantity": ["must be positive"],
        });
        assert_eq!(
            first_validation_message(&body).as_deref(),
            Some("an item with this name already exists")
        );

        let detail = json!({"detail": "not found"});
        assert_eq!(first_validation_message(&detail).as_deref(), Some("not found"));

        assert_eq!(first_validation_message(&json!({"errors": {}})), None);
        assert_eq!(first_validation_message(&json!(42)), None);
    }
}
