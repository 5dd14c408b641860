//! Normalized vehicle model shared by every provider

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Bike,
    Scooter,
}

impl Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleKind::Bike => write!(f, "bike"),
            VehicleKind::Scooter => write!(f, "scooter"),
        }
    }
}

/// A bike, scooter or docked bike station reported by one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identifier, unique within its provider only
    pub id: String,
    #[serde(rename = "type")]
    pub kind: VehicleKind,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: Coordinate,
    /// Distance from the query origin in km
    pub distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bikes_available: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docks_available: Option<u32>,
    pub is_available: bool,
}

impl Vehicle {
    /// A docked station holding one or more bikes
    #[must_use]
    pub fn station(
        id: impl Into<String>,
        provider: impl Into<String>,
        name: impl Into<String>,
        location: Coordinate,
        distance_km: f64,
        bikes_available: u32,
        docks_available: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind: VehicleKind::Bike,
            provider: provider.into(),
            name: Some(name.into()),
            location,
            distance_km,
            battery_level: None,
            bikes_available: Some(bikes_available),
            docks_available: Some(docks_available),
            is_available: true,
        }
    }

    /// A single free-floating bike
    #[must_use]
    pub fn bike(
        id: impl Into<String>,
        provider: impl Into<String>,
        location: Coordinate,
        distance_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: VehicleKind::Bike,
            provider: provider.into(),
            name: None,
            location,
            distance_km,
            battery_level: None,
            bikes_available: None,
            docks_available: None,
            is_available: true,
        }
    }

    /// A free-floating scooter
    #[must_use]
    pub fn scooter(
        id: impl Into<String>,
        provider: impl Into<String>,
        location: Coordinate,
        distance_km: f64,
        battery_level: Option<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: VehicleKind::Scooter,
            provider: provider.into(),
            name: None,
            location,
            distance_km,
            battery_level,
            bikes_available: None,
            docks_available: None,
            is_available: true,
        }
    }
}
