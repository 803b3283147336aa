//! Member profile and portfolio model.

use crate::core::progress::progress_pct;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One property position held by a member. Amounts are USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    pub name: String,
    pub location: String,
    pub country: String,
    pub investment_size: f64,
    pub yearly_return_val: f64,
    pub yearly_return_pct: f64,
    /// Fraction of the property owned, e.g. "1/8".
    pub shares_owned: String,
}

/// Revenue attributed to a member for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub level: String,
    pub total_points: u32,
    pub next_level_points: u32,
    pub total_invested: f64,
    pub total_yearly_return: f64,
    pub total_yearly_return_pct: f64,
    pub used_free_nights: u32,
    pub total_free_nights: u32,
    #[serde(default)]
    pub member_since: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_revenue: Vec<MonthlyRevenue>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl UserProfile {
    /// Progress towards the next membership level, clamped to 100%.
    pub fn level_progress(&self) -> Result<f64> {
        progress_pct(
            f64::from(self.total_points),
            f64::from(self.next_level_points),
        )
    }

    /// Share of the yearly free-night allowance already used.
    pub fn free_nights_progress(&self) -> Result<f64> {
        progress_pct(
            f64::from(self.used_free_nights),
            f64::from(self.total_free_nights),
        )
    }

    pub fn remaining_free_nights(&self) -> u32 {
        self.total_free_nights.saturating_sub(self.used_free_nights)
    }
}

/// A community leaderboard row, ordered by points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub points: u32,
}

/// Read access to member profiles.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<UserProfile>;
    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;
}
