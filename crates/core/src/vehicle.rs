//! Shared vocabulary: vehicle categories and listing lifecycle states.

use serde::{Deserialize, Serialize};

/// Top-level vehicle category a brand belongs to.
///
/// Wire values are the Portuguese category names used throughout the site
/// and stored verbatim in the `brands.vehicle_kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    #[serde(rename = "carros")]
    Cars,
    #[serde(rename = "motos")]
    Motorcycles,
    #[serde(rename = "caminhoes")]
    Trucks,
}

impl VehicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Cars => "carros",
            VehicleKind::Motorcycles => "motos",
            VehicleKind::Trucks => "caminhoes",
        }
    }

    /// Parse a canonical wire value. Callers normalize case and accents
    /// first; anything unrecognized is `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "carros" => Some(VehicleKind::Cars),
            "motos" => Some(VehicleKind::Motorcycles),
            "caminhoes" => Some(VehicleKind::Trucks),
            _ => None,
        }
    }
}

/// Lifecycle state of an advert.
///
/// New adverts start as `Pending` and only become publicly visible once a
/// moderator flips them to `Active`. Stored as TEXT in `adverts.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdvertStatus {
    Active,
    Pending,
    Rejected,
}

impl AdvertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvertStatus::Active => "ACTIVE",
            AdvertStatus::Pending => "PENDING",
            AdvertStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(AdvertStatus::Active),
            "PENDING" => Some(AdvertStatus::Pending),
            "REJECTED" => Some(AdvertStatus::Rejected),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- VehicleKind ---------------------------------------------------------

    #[test]
    fn vehicle_kind_round_trips_wire_values() {
        for kind in [VehicleKind::Cars, VehicleKind::Motorcycles, VehicleKind::Trucks] {
            assert_eq!(VehicleKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn vehicle_kind_rejects_unknown_values() {
        assert_eq!(VehicleKind::from_str("barcos"), None);
        assert_eq!(VehicleKind::from_str(""), None);
    }

    #[test]
    fn vehicle_kind_serializes_portuguese_names() {
        let json = serde_json::to_string(&VehicleKind::Trucks).unwrap();
        assert_eq!(json, "\"caminhoes\"");
    }

    // -- AdvertStatus --------------------------------------------------------

    #[test]
    fn advert_status_round_trips_wire_values() {
        for status in [
            AdvertStatus::Active,
            AdvertStatus::Pending,
            AdvertStatus::Rejected,
        ] {
            assert_eq!(AdvertStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn advert_status_rejects_lowercase() {
        assert_eq!(AdvertStatus::from_str("active"), None);
    }
}
