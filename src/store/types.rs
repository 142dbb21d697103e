//! Domain types read from the external item/location store

use crate::core::error::Error;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A physical campus, the top-level partition of locations and items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Campus {
    #[serde(rename = "신촌")]
    Sinchon,
    #[serde(rename = "송도")]
    Songdo,
}

impl Campus {
    /// Display name used throughout the store and the wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            Campus::Sinchon => "신촌",
            Campus::Songdo => "송도",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Campus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "신촌" => Ok(Campus::Sinchon),
            "송도" => Ok(Campus::Songdo),
            other => Err(Error::UnknownCampus {
                name: other.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a lost item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Claimed,
    Expired,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Claimed => "claimed",
            ItemStatus::Expired => "expired",
        }
    }
}

/// A registered drop-off/found location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub campus: Campus,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Joined location columns embedded in an item row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub campus: Campus,
}

/// A lost item as stored; the search pipeline treats it as an opaque
/// candidate apart from the searchable text fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostItem {
    pub id: String,
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_location: Option<LocationRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_location: Option<String>,
    pub found_date: NaiveDate,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
}

impl LostItem {
    /// Searchable text blob: name + description + found-location name,
    /// lowercased. All substring matching runs against this.
    pub fn search_blob(&self) -> String {
        let description = self.description.as_deref().unwrap_or("");
        let location = self
            .found_location
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("");
        format!("{} {} {}", self.item_name, description, location).to_lowercase()
    }
}
