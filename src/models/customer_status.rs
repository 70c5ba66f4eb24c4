use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::services::clock::truncate_to_second;

/// Customer id written by the onboarding flow until real customer linkage exists
pub const PLACEHOLDER_CUSTOMER_ID: i32 = 43;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub timestamp: DateTimeUtc,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub consumption_kwh: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 4)))")]
    pub price_per_kwh: Decimal,
    pub donation_status: DonationStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// What happens to a customer's surplus income
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "passive")]
    Passive,
    /// Passive for six months, then active
    #[sea_orm(string_value = "deferred")]
    Deferred,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Active => "active",
            DonationStatus::Passive => "passive",
            DonationStatus::Deferred => "deferred",
        }
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DonationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(DonationStatus::Active),
            "passive" => Ok(DonationStatus::Passive),
            "deferred" => Ok(DonationStatus::Deferred),
            other => Err(format!("Unknown donation status: {}", other)),
        }
    }
}

/// A status row that has not been written yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewStatusRecord {
    pub customer_id: i32,
    /// Creation instant; filled from the caller's clock when absent
    pub timestamp: Option<DateTime<Utc>>,
    pub consumption_kwh: Decimal,
    pub price_per_kwh: Decimal,
    pub donation_status: DonationStatus,
}

impl NewStatusRecord {
    /// Record with the fixed customer id and zeroed metering fields
    pub fn placeholder(donation_status: DonationStatus) -> Self {
        Self {
            customer_id: PLACEHOLDER_CUSTOMER_ID,
            timestamp: None,
            consumption_kwh: Decimal::ZERO,
            price_per_kwh: Decimal::ZERO,
            donation_status,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the insertable model. The timestamp is stored at whole-second
    /// precision whichever source it came from.
    pub fn into_active_model(self, default_now: impl FnOnce() -> DateTime<Utc>) -> ActiveModel {
        let timestamp = truncate_to_second(self.timestamp.unwrap_or_else(default_now));

        ActiveModel {
            customer_id: Set(self.customer_id),
            timestamp: Set(timestamp),
            consumption_kwh: Set(self.consumption_kwh),
            price_per_kwh: Set(self.price_per_kwh),
            donation_status: Set(self.donation_status),
            ..Default::default()
        }
    }
}
