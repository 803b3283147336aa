//! Property listing model and the catalog abstraction.

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Shown when a listing reaches us without any images.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

/// Shares a property is divided into unless the listing says otherwise.
pub const DEFAULT_TOTAL_SHARES: u32 = 12;

/// A property investment listing.
///
/// Countries are referenced by id (alpha-3 code); `country_name` carries the
/// joined display name supplied by the backend. Amounts are USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub location: String,
    pub country_id: String,
    pub country_name: String,
    pub capacity: u32,
    pub total_price: f64,
    #[serde(default = "default_total_shares")]
    pub total_shares: u32,
    pub available_shares_pct: f64,
    pub expected_roi_pct: f64,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_total_shares() -> u32 {
    DEFAULT_TOTAL_SHARES
}

impl Opportunity {
    /// Guarantees a non-empty, non-blank image list.
    pub fn normalize_images(&mut self) {
        self.images.retain(|url| !url.trim().is_empty());
        if self.images.is_empty() {
            self.images.push(PLACEHOLDER_IMAGE.to_string());
        }
    }
}

/// Fields for a listing that does not exist yet. Produced by
/// [`DraftOpportunity::build`], never constructed ad hoc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOpportunity {
    pub title: String,
    pub location: String,
    pub country_id: String,
    pub capacity: u32,
    pub total_price: f64,
    pub total_shares: u32,
    pub available_shares_pct: f64,
    pub expected_roi_pct: f64,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
}

/// A partial update to an existing listing. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpportunityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_shares_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_roi_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
}

impl OpportunityPatch {
    pub fn is_empty(&self) -> bool {
        self == &OpportunityPatch::default()
    }
}

/// Collects listing fields step by step and validates them before commit.
#[derive(Debug, Clone, Default)]
pub struct DraftOpportunity {
    title: Option<String>,
    location: Option<String>,
    country_id: Option<String>,
    capacity: u32,
    total_price: Option<f64>,
    total_shares: u32,
    available_shares_pct: f64,
    expected_roi_pct: f64,
    images: Vec<String>,
    amenities: Vec<String>,
}

impl DraftOpportunity {
    pub fn new() -> Self {
        DraftOpportunity {
            capacity: 2,
            total_shares: DEFAULT_TOTAL_SHARES,
            available_shares_pct: 100.0,
            expected_roi_pct: 10.0,
            ..DraftOpportunity::default()
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn country_id(mut self, country_id: &str) -> Self {
        self.country_id = Some(country_id.to_string());
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn total_price(mut self, total_price: f64) -> Self {
        self.total_price = Some(total_price);
        self
    }

    pub fn total_shares(mut self, total_shares: u32) -> Self {
        self.total_shares = total_shares;
        self
    }

    pub fn available_shares_pct(mut self, pct: f64) -> Self {
        self.available_shares_pct = pct;
        self
    }

    pub fn expected_roi_pct(mut self, pct: f64) -> Self {
        self.expected_roi_pct = pct;
        self
    }

    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn amenities(mut self, amenities: Vec<String>) -> Self {
        self.amenities = amenities;
        self
    }

    /// Validates the draft and produces a listing ready for commit.
    pub fn build(self) -> Result<NewOpportunity> {
        let Some(title) = self.title.filter(|t| !t.trim().is_empty()) else {
            bail!("Listing title is required");
        };
        let Some(location) = self.location.filter(|l| !l.trim().is_empty()) else {
            bail!("Listing location is required");
        };
        let Some(country_id) = self.country_id.filter(|c| !c.trim().is_empty()) else {
            bail!("Listing country is required");
        };
        let Some(total_price) = self.total_price else {
            bail!("Listing price is required");
        };
        if total_price <= 0.0 {
            bail!("Listing price must be positive, got {total_price}");
        }
        if self.capacity == 0 {
            bail!("Listing capacity must be at least 1");
        }
        if self.total_shares == 0 {
            bail!("Listing must have at least 1 share");
        }
        if !(0.0..=100.0).contains(&self.available_shares_pct) {
            bail!(
                "Available shares must be between 0 and 100 percent, got {}",
                self.available_shares_pct
            );
        }
        if self.expected_roi_pct < 0.0 {
            bail!("Expected ROI cannot be negative, got {}", self.expected_roi_pct);
        }

        let mut images: Vec<String> = self
            .images
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();
        if images.is_empty() {
            images.push(PLACEHOLDER_IMAGE.to_string());
        }

        Ok(NewOpportunity {
            title,
            location,
            country_id,
            capacity: self.capacity,
            total_price,
            total_shares: self.total_shares,
            available_shares_pct: self.available_shares_pct,
            expected_roi_pct: self.expected_roi_pct,
            images,
            amenities: self.amenities,
        })
    }
}

/// Read/write access to the listing catalog.
#[async_trait]
pub trait OpportunityCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<Opportunity>>;
    async fn create(&self, listing: &NewOpportunity) -> Result<Opportunity>;
    async fn update(&self, id: &str, patch: &OpportunityPatch) -> Result<()>;
    async fn remove(&self, id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_builds_valid_listing() {
        let listing = DraftOpportunity::new()
            .title("Aegean Blue")
            .location("Santorini")
            .country_id("GRC")
            .capacity(4)
            .total_price(150_000.0)
            .expected_roi_pct(12.5)
            .images(vec!["https://example.com/a.png".to_string()])
            .amenities(vec!["Wifi".to_string(), "Pool".to_string()])
            .build()
            .unwrap();

        assert_eq!(listing.title, "Aegean Blue");
        assert_eq!(listing.country_id, "GRC");
        assert_eq!(listing.total_shares, DEFAULT_TOTAL_SHARES);
        assert_eq!(listing.available_shares_pct, 100.0);
    }

    #[test]
    fn test_draft_requires_core_fields() {
        let missing_title = DraftOpportunity::new()
            .location("Tyrol")
            .country_id("AUT")
            .total_price(100_000.0)
            .build();
        assert!(missing_title.unwrap_err().to_string().contains("title"));

        let missing_price = DraftOpportunity::new()
            .title("Alpine Retreat")
            .location("Tyrol")
            .country_id("AUT")
            .build();
        assert!(missing_price.unwrap_err().to_string().contains("price"));
    }

    #[test]
    fn test_draft_rejects_out_of_range_values() {
        let base = || {
            DraftOpportunity::new()
                .title("Alpine Retreat")
                .location("Tyrol")
                .country_id("AUT")
        };

        assert!(base().total_price(0.0).build().is_err());
        assert!(base().total_price(-1.0).build().is_err());
        assert!(base().total_price(1.0).available_shares_pct(120.0).build().is_err());
        assert!(base().total_price(1.0).expected_roi_pct(-2.0).build().is_err());
        assert!(base().total_price(1.0).capacity(0).build().is_err());
        assert!(base().total_price(1.0).total_shares(0).build().is_err());
    }

    #[test]
    fn test_draft_substitutes_placeholder_image() {
        let listing = DraftOpportunity::new()
            .title("Alpine Retreat")
            .location("Tyrol")
            .country_id("AUT")
            .total_price(100_000.0)
            .images(vec!["".to_string()])
            .build()
            .unwrap();
        assert_eq!(listing.images, vec![PLACEHOLDER_IMAGE.to_string()]);
    }

    #[test]
    fn test_normalize_images_fills_placeholder() {
        let mut opp = Opportunity {
            id: "1".to_string(),
            title: "t".to_string(),
            location: "l".to_string(),
            country_id: "AUT".to_string(),
            country_name: "Austria".to_string(),
            capacity: 2,
            total_price: 1.0,
            total_shares: 12,
            available_shares_pct: 100.0,
            expected_roi_pct: 10.0,
            images: vec![" ".to_string()],
            amenities: vec![],
            tags: vec![],
        };
        opp.normalize_images();
        assert_eq!(opp.images, vec![PLACEHOLDER_IMAGE.to_string()]);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(OpportunityPatch::default().is_empty());
        let patch = OpportunityPatch {
            title: Some("New name".to_string()),
            ..OpportunityPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_total_shares_defaults_on_deserialize() {
        let json = r#"{
            "id": "1", "title": "t", "location": "l",
            "country_id": "AUT", "country_name": "Austria",
            "capacity": 2, "total_price": 1.0,
            "available_shares_pct": 100.0, "expected_roi_pct": 10.0,
            "images": [], "amenities": []
        }"#;
        let opp: Opportunity = serde_json::from_str(json).unwrap();
        assert_eq!(opp.total_shares, DEFAULT_TOTAL_SHARES);
        assert!(opp.tags.is_empty());
    }
}
