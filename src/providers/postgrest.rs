//! PostgREST-style client for the hosted Nextribe backend.
//!
//! Tables: `countries`, `opportunities`, `profiles`, `investments`.
//! Opportunity reads embed the joined country name via
//! `select=*,countries(name)`; listings always reference countries by id.

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::country::{Country, CountryDirectory, CountryStatus, Milestone};
use crate::core::opportunity::{
    NewOpportunity, Opportunity, OpportunityCatalog, OpportunityPatch,
};
use crate::core::profile::{
    Holding, LeaderboardEntry, MonthlyRevenue, ProfileSource, UserProfile,
};
use crate::providers::util::with_retry;

const FETCH_RETRIES: usize = 2;
const RETRY_DELAY_MS: u64 = 250;

pub struct PostgrestClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl PostgrestClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        PostgrestClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path_and_query: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, path_and_query);
        let mut builder = self.http.request(method, &url);
        if let Some(key) = &self.api_key {
            builder = builder
                .header("apikey", key)
                .header("Authorization", format!("Bearer {key}"));
        }
        builder
    }

    async fn fetch_rows<T: for<'de> Deserialize<'de>>(&self, path_and_query: &str) -> Result<Vec<T>> {
        with_retry(
            || async {
                let response = self
                    .request(reqwest::Method::GET, path_and_query)
                    .send()
                    .await
                    .with_context(|| format!("Request to {path_and_query} failed"))?;
                let response = response
                    .error_for_status()
                    .with_context(|| format!("Backend rejected {path_and_query}"))?;
                response
                    .json::<Vec<T>>()
                    .await
                    .with_context(|| format!("Malformed response from {path_and_query}"))
            },
            FETCH_RETRIES,
            RETRY_DELAY_MS,
        )
        .await
    }
}

#[derive(Deserialize, Debug)]
struct CountryRow {
    id: String,
    name: String,
    status: CountryStatus,
    description: Option<String>,
    #[serde(default)]
    locations_proposed: u32,
    #[serde(default)]
    locations_target: u32,
    #[serde(default)]
    architects_recommended: u32,
    #[serde(default)]
    architects_target: u32,
    #[serde(default)]
    ambassador_applications: u32,
    #[serde(default)]
    ambassador_target: u32,
    #[serde(default)]
    content_creators: u32,
    #[serde(default)]
    content_creators_target: u32,
    #[serde(default)]
    b2b_clients: u32,
    #[serde(default)]
    b2b_clients_target: u32,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Country {
        let milestone = |current, target| Milestone { current, target };
        Country {
            id: row.id,
            name: row.name,
            status: row.status,
            description: row.description,
            locations: milestone(row.locations_proposed, row.locations_target),
            architects: milestone(row.architects_recommended, row.architects_target),
            ambassador_applications: milestone(row.ambassador_applications, row.ambassador_target),
            content_creators: milestone(row.content_creators, row.content_creators_target),
            b2b_clients: milestone(row.b2b_clients, row.b2b_clients_target),
        }
    }
}

#[derive(Deserialize, Debug)]
struct CountryRef {
    name: String,
}

#[derive(Deserialize, Debug)]
struct OpportunityRow {
    id: String,
    title: String,
    location: String,
    #[serde(default)]
    country_id: String,
    /// Embedded join result from `countries(name)`.
    countries: Option<CountryRef>,
    capacity: u32,
    total_price: f64,
    total_shares: Option<u32>,
    available_shares_pct: f64,
    expected_roi_pct: f64,
    images: Option<Vec<String>>,
    amenities: Option<Vec<String>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl From<OpportunityRow> for Opportunity {
    fn from(row: OpportunityRow) -> Opportunity {
        let mut opportunity = Opportunity {
            id: row.id,
            title: row.title,
            location: row.location,
            country_id: row.country_id,
            country_name: row
                .countries
                .map(|c| c.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            capacity: row.capacity,
            total_price: row.total_price,
            total_shares: row
                .total_shares
                .unwrap_or(crate::core::opportunity::DEFAULT_TOTAL_SHARES),
            available_shares_pct: row.available_shares_pct,
            expected_roi_pct: row.expected_roi_pct,
            images: row.images.unwrap_or_default(),
            amenities: row.amenities.unwrap_or_default(),
            tags: row.tags.unwrap_or_default(),
        };
        opportunity.normalize_images();
        opportunity
    }
}

/// Insert payload; column names match the `opportunities` table.
#[derive(Serialize, Debug)]
struct OpportunityInsert<'a> {
    title: &'a str,
    location: &'a str,
    country_id: &'a str,
    capacity: u32,
    total_price: f64,
    total_shares: u32,
    available_shares_pct: f64,
    expected_roi_pct: f64,
    images: &'a [String],
    amenities: &'a [String],
}

#[derive(Deserialize, Debug)]
struct ProfileRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    total_points: u32,
    #[serde(default)]
    next_level_points: u32,
    #[serde(default)]
    total_invested: f64,
    #[serde(default)]
    total_yearly_return: f64,
    #[serde(default)]
    total_yearly_return_pct: f64,
    #[serde(default)]
    used_free_nights: u32,
    #[serde(default)]
    total_free_nights: u32,
    #[serde(default)]
    member_since: Option<NaiveDate>,
    #[serde(default)]
    monthly_revenue: Vec<MonthlyRevenue>,
}

#[derive(Deserialize, Debug)]
struct LeaderboardRow {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    total_points: u32,
}

#[derive(Deserialize, Debug)]
struct InvestmentRow {
    id: String,
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    investment_size: f64,
    #[serde(default)]
    yearly_return_val: f64,
    #[serde(default)]
    yearly_return_pct: f64,
    #[serde(default)]
    shares_owned: String,
}

#[async_trait]
impl CountryDirectory for PostgrestClient {
    #[instrument(name = "FetchCountries", skip(self))]
    async fn list(&self) -> Result<Vec<Country>> {
        let rows: Vec<CountryRow> = self.fetch_rows("countries?select=*").await?;
        debug!("Fetched {} country rows", rows.len());
        Ok(rows.into_iter().map(Country::from).collect())
    }
}

#[async_trait]
impl OpportunityCatalog for PostgrestClient {
    #[instrument(name = "FetchOpportunities", skip(self))]
    async fn list(&self) -> Result<Vec<Opportunity>> {
        let rows: Vec<OpportunityRow> = self
            .fetch_rows("opportunities?select=*,countries(name)")
            .await?;
        debug!("Fetched {} opportunity rows", rows.len());
        Ok(rows.into_iter().map(Opportunity::from).collect())
    }

    #[instrument(name = "CreateOpportunity", skip(self, listing), fields(title = %listing.title))]
    async fn create(&self, listing: &NewOpportunity) -> Result<Opportunity> {
        let payload = OpportunityInsert {
            title: &listing.title,
            location: &listing.location,
            country_id: &listing.country_id,
            capacity: listing.capacity,
            total_price: listing.total_price,
            total_shares: listing.total_shares,
            available_shares_pct: listing.available_shares_pct,
            expected_roi_pct: listing.expected_roi_pct,
            images: &listing.images,
            amenities: &listing.amenities,
        };

        let response = self
            .request(
                reqwest::Method::POST,
                "opportunities?select=*,countries(name)",
            )
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .context("Create listing request failed")?
            .error_for_status()
            .context("Backend rejected the new listing")?;

        let mut rows: Vec<OpportunityRow> = response
            .json()
            .await
            .context("Malformed response to listing creation")?;
        let row = rows
            .pop()
            .ok_or_else(|| anyhow!("Backend returned no row for the created listing"))?;
        Ok(Opportunity::from(row))
    }

    #[instrument(name = "UpdateOpportunity", skip(self, patch), fields(id = %id))]
    async fn update(&self, id: &str, patch: &OpportunityPatch) -> Result<()> {
        if patch.is_empty() {
            bail!("Nothing to update");
        }
        self.request(
            reqwest::Method::PATCH,
            &format!("opportunities?id=eq.{id}"),
        )
        .json(patch)
        .send()
        .await
        .with_context(|| format!("Update request for listing {id} failed"))?
        .error_for_status()
        .with_context(|| format!("Backend rejected the update for listing {id}"))?;
        Ok(())
    }

    #[instrument(name = "DeleteOpportunity", skip(self), fields(id = %id))]
    async fn remove(&self, id: &str) -> Result<()> {
        self.request(
            reqwest::Method::DELETE,
            &format!("opportunities?id=eq.{id}"),
        )
        .send()
        .await
        .with_context(|| format!("Delete request for listing {id} failed"))?
        .error_for_status()
        .with_context(|| format!("Backend rejected the delete for listing {id}"))?;
        Ok(())
    }
}

#[async_trait]
impl ProfileSource for PostgrestClient {
    #[instrument(name = "FetchProfile", skip(self), fields(user_id = %user_id))]
    async fn fetch(&self, user_id: &str) -> Result<UserProfile> {
        let profile_path = format!("profiles?id=eq.{user_id}&select=*");
        let investments_path = format!("investments?user_id=eq.{user_id}&select=*");
        let (mut rows, holdings) = futures::try_join!(
            self.fetch_rows::<ProfileRow>(&profile_path),
            self.fetch_rows::<InvestmentRow>(&investments_path),
        )?;
        let row = rows
            .pop()
            .ok_or_else(|| anyhow!("No profile found for user {user_id}"))?;

        Ok(UserProfile {
            name: row.name.unwrap_or_else(|| "Anonymous".to_string()),
            level: row.level.unwrap_or_else(|| "Explorer".to_string()),
            total_points: row.total_points,
            next_level_points: row.next_level_points,
            total_invested: row.total_invested,
            total_yearly_return: row.total_yearly_return,
            total_yearly_return_pct: row.total_yearly_return_pct,
            used_free_nights: row.used_free_nights,
            total_free_nights: row.total_free_nights,
            member_since: row.member_since,
            monthly_revenue: row.monthly_revenue,
            holdings: holdings
                .into_iter()
                .map(|inv| Holding {
                    id: inv.id,
                    name: inv.name,
                    location: inv.location,
                    country: inv.country,
                    investment_size: inv.investment_size,
                    yearly_return_val: inv.yearly_return_val,
                    yearly_return_pct: inv.yearly_return_pct,
                    shares_owned: inv.shares_owned,
                })
                .collect(),
        })
    }

    #[instrument(name = "FetchLeaderboard", skip(self))]
    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let rows: Vec<LeaderboardRow> = self
            .fetch_rows(&format!(
                "profiles?select=id,name,total_points&order=total_points.desc&limit={limit}"
            ))
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                id: row.id,
                name: row.name.unwrap_or_else(|| "Anonymous".to_string()),
                points: row.total_points,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::opportunity::{DraftOpportunity, PLACEHOLDER_IMAGE};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_opportunities_maps_rows() {
        let server = MockServer::start().await;
        let body = r#"[{
            "id": "opp-1",
            "title": "Alpine Retreat",
            "location": "Tyrol",
            "country_id": "AUT",
            "countries": { "name": "Austria" },
            "capacity": 6,
            "total_price": 95000.0,
            "total_shares": null,
            "available_shares_pct": 75.0,
            "expected_roi_pct": 12.5,
            "images": null,
            "amenities": ["Wifi", "Hot Tub"]
        }]"#;

        Mock::given(method("GET"))
            .and(path("/rest/v1/opportunities"))
            .and(query_param("select", "*,countries(name)"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri(), Some("anon"));
        let opportunities = OpportunityCatalog::list(&client).await.unwrap();

        assert_eq!(opportunities.len(), 1);
        let opp = &opportunities[0];
        assert_eq!(opp.country_name, "Austria");
        assert_eq!(opp.total_shares, 12);
        // Missing image list is normalized to the placeholder.
        assert_eq!(opp.images, vec![PLACEHOLDER_IMAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_list_countries_maps_milestones() {
        let server = MockServer::start().await;
        let body = r#"[{
            "id": "BGR",
            "name": "Bulgaria",
            "status": "development",
            "description": "First build in progress",
            "locations_proposed": 3,
            "locations_target": 5
        }]"#;

        Mock::given(method("GET"))
            .and(path("/rest/v1/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri(), None);
        let countries = CountryDirectory::list(&client).await.unwrap();

        assert_eq!(countries[0].status, CountryStatus::Development);
        assert_eq!(countries[0].locations.current, 3);
        assert_eq!(countries[0].locations.target, 5);
        // Columns absent from the row default to zero.
        assert_eq!(countries[0].b2b_clients.target, 0);
    }

    #[tokio::test]
    async fn test_create_returns_representation() {
        let server = MockServer::start().await;
        let body = r#"[{
            "id": "opp-9",
            "title": "Aegean Blue",
            "location": "Santorini",
            "country_id": "GRC",
            "countries": { "name": "Greece" },
            "capacity": 4,
            "total_price": 150000.0,
            "total_shares": 12,
            "available_shares_pct": 100.0,
            "expected_roi_pct": 12.5,
            "images": ["https://example.com/a.png"],
            "amenities": []
        }]"#;

        Mock::given(method("POST"))
            .and(path("/rest/v1/opportunities"))
            .respond_with(ResponseTemplate::new(201).set_body_string(body))
            .mount(&server)
            .await;

        let listing = DraftOpportunity::new()
            .title("Aegean Blue")
            .location("Santorini")
            .country_id("GRC")
            .capacity(4)
            .total_price(150_000.0)
            .expected_roi_pct(12.5)
            .images(vec!["https://example.com/a.png".to_string()])
            .build()
            .unwrap();

        let client = PostgrestClient::new(&server.uri(), Some("anon"));
        let created = client.create(&listing).await.unwrap();
        assert_eq!(created.id, "opp-9");
        assert_eq!(created.country_name, "Greece");
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch() {
        let client = PostgrestClient::new("http://localhost:1", None);
        let err = client
            .update("opp-1", &OpportunityPatch::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[tokio::test]
    async fn test_fetch_profile_joins_investments() {
        let server = MockServer::start().await;
        let profile_body = r#"[{
            "id": "user-1",
            "name": "Nikolay Nekov",
            "level": "Visionary",
            "total_points": 15420,
            "next_level_points": 20000,
            "total_invested": 125000.0,
            "total_yearly_return": 15625.0,
            "total_yearly_return_pct": 12.5,
            "used_free_nights": 3,
            "total_free_nights": 15
        }]"#;
        let investments_body = r#"[{
            "id": "inv-1",
            "name": "Alpine Retreat",
            "location": "Tyrol",
            "country": "Austria",
            "investment_size": 50000.0,
            "yearly_return_val": 6250.0,
            "yearly_return_pct": 12.5,
            "shares_owned": "1/8"
        }]"#;

        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(profile_body))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/investments"))
            .respond_with(ResponseTemplate::new(200).set_body_string(investments_body))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri(), Some("anon"));
        let profile = client.fetch("user-1").await.unwrap();
        assert_eq!(profile.name, "Nikolay Nekov");
        assert_eq!(profile.holdings.len(), 1);
        assert_eq!(profile.holdings[0].shares_owned, "1/8");
    }

    #[tokio::test]
    async fn test_missing_profile_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/investments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri(), None);
        let err = client.fetch("ghost").await.unwrap_err();
        assert!(err.to_string().contains("No profile found"));
    }
}
