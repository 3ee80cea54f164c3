use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Physical condition of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Good,
    NeedsRepair,
    Retired,
    Lost,
    /// Missing or unrecognized wire value.
    #[serde(other)]
    Unknown,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Good => "good",
            ItemStatus::NeedsRepair => "needs_repair",
            ItemStatus::Retired => "retired",
            ItemStatus::Lost => "lost",
            ItemStatus::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse; anything unrecognized maps to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => ItemStatus::Good,
            "needs_repair" => ItemStatus::NeedsRepair,
            "retired" => ItemStatus::Retired,
            "lost" => ItemStatus::Lost,
            _ => ItemStatus::Unknown,
        }
    }
}

/// Provenance of an asset (how the church came to own it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemLabel {
    Donated,
    ChurchProvided,
    /// Missing or unrecognized wire value.
    #[serde(other)]
    Unlabeled,
}

impl ItemLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemLabel::Donated => "donated",
            ItemLabel::ChurchProvided => "church-provided",
            ItemLabel::Unlabeled => "unlabeled",
        }
    }

    /// Case-insensitive parse; anything unrecognized maps to `Unlabeled`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "donated" => ItemLabel::Donated,
            "church-provided" => ItemLabel::ChurchProvided,
            _ => ItemLabel::Unlabeled,
        }
    }
}

/// Canonical asset record as seen by the engine.
///
/// This is the already-normalized form: the directory boundary has coerced
/// every numeric field, defaulted every string, and mapped enum-ish wire
/// values to their typed variants. Nothing downstream re-validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Server-assigned identifier; absent for not-yet-created records.
    pub id: Option<i64>,
    pub item_name: String,
    pub description: String,
    pub acquisition_date: Option<DateTime<Utc>>,
    pub acquisition_cost: f64,
    pub salvage_value: f64,
    /// `None` means "no depreciation schedule" (never zero).
    pub useful_life_years: Option<u32>,
    pub quantity: u32,
    pub status: ItemStatus,
    pub label: ItemLabel,
    pub remarks: String,
    pub ministry_name: String,
}

impl Default for InventoryItem {
    fn default() -> Self {
        Self {
            id: None,
            item_name: String::new(),
            description: String::new(),
            acquisition_date: None,
            acquisition_cost: 0.0,
            salvage_value: 0.0,
            useful_life_years: None,
            quantity: 0,
            status: ItemStatus::Unknown,
            label: ItemLabel::Unlabeled,
            remarks: String::new(),
            ministry_name: String::new(),
        }
    }
}

/// Mutation payload for create/update calls.
///
/// Mirrors the canonical record minus the server-assigned id; the engine
/// never invents identifiers. The acquisition date is a plain calendar date
/// here (what the admin picked in a form), not a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub item_name: String,
    pub description: String,
    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_cost: f64,
    pub salvage_value: f64,
    pub useful_life_years: Option<u32>,
    pub quantity: u32,
    pub status: ItemStatus,
    pub label: ItemLabel,
    pub remarks: String,
    pub ministry_name: String,
}
