//! Fixed pricing tables
//!
//! Two tables, one per client type, each with four tiers in ascending
//! `max_km` order. The last tier is unbounded.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Which pricing table applies to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    Existing,
    New,
}

impl ClientType {
    pub fn from_is_new(is_new_client: bool) -> Self {
        if is_new_client {
            ClientType::New
        } else {
            ClientType::Existing
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientType::Existing => f.write_str("existing"),
            ClientType::New => f.write_str("new"),
        }
    }
}

/// Hourly rate and minimum billable hours for a distance band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingTier {
    /// Inclusive upper bound in km; `None` means unbounded
    pub max_km: Option<Decimal>,
    /// Currency per hour
    pub rate: Decimal,
    pub min_hours: Decimal,
    /// Human-readable range for UI annotation
    pub label: &'static str,
}

impl PricingTier {
    pub fn covers(&self, total_km: Decimal) -> bool {
        self.max_km.is_none_or(|max| total_km <= max)
    }
}

/// Complete pricing reference data for one client type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingTable {
    pub client_type: ClientType,
    pub tiers: [PricingTier; 4],
    /// Flat displacement fee for trips up to 50 km
    pub flat_fee_up_to_50: Decimal,
    /// Flat displacement fee for trips up to 100 km
    pub flat_fee_up_to_100: Decimal,
    /// Currency per km beyond 100 km
    pub per_km_rate: Decimal,
}

impl PricingTable {
    /// Tier used when nothing else matches
    pub fn last_tier(&self) -> &PricingTier {
        &self.tiers[self.tiers.len() - 1]
    }
}

const fn whole(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 0)
}

const fn cents(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 2)
}

const fn tier(max_km: Option<u32>, rate: u32, min_hours: u32, label: &'static str) -> PricingTier {
    PricingTier {
        max_km: match max_km {
            Some(km) => Some(whole(km)),
            None => None,
        },
        rate: whole(rate),
        min_hours: whole(min_hours),
        label,
    }
}

pub static EXISTING_CLIENT_TABLE: PricingTable = PricingTable {
    client_type: ClientType::Existing,
    tiers: [
        tier(Some(50), 150, 2, "0–50 km"),
        tier(Some(100), 165, 3, "51–100 km"),
        tier(Some(200), 180, 4, "101–200 km"),
        tier(None, 200, 5, "200+ km"),
    ],
    flat_fee_up_to_50: cents(8000),
    flat_fee_up_to_100: cents(15000),
    per_km_rate: cents(220),
};

pub static NEW_CLIENT_TABLE: PricingTable = PricingTable {
    client_type: ClientType::New,
    tiers: [
        tier(Some(50), 180, 2, "0–50 km"),
        tier(Some(100), 200, 3, "51–100 km"),
        tier(Some(200), 220, 4, "101–200 km"),
        tier(None, 250, 5, "200+ km"),
    ],
    flat_fee_up_to_50: cents(10000),
    flat_fee_up_to_100: cents(18000),
    per_km_rate: cents(257),
};

/// Pricing table for a client type
pub fn table_for(client_type: ClientType) -> &'static PricingTable {
    match client_type {
        ClientType::Existing => &EXISTING_CLIENT_TABLE,
        ClientType::New => &NEW_CLIENT_TABLE,
    }
}
