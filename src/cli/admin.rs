//! The `admin` commands: listing management against the backend catalog.

use super::ui;
use crate::core::country::CountryDirectory;
use crate::core::opportunity::{DraftOpportunity, OpportunityCatalog, OpportunityPatch};
use anyhow::{Result, bail};
use tracing::info;

/// Field values for a new listing, as collected from the command line.
pub struct NewListingArgs {
    pub title: String,
    pub location: String,
    pub country_id: String,
    pub capacity: Option<u32>,
    pub total_price: f64,
    pub total_shares: Option<u32>,
    pub available_shares_pct: Option<f64>,
    pub expected_roi_pct: Option<f64>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
}

pub async fn add(
    catalog: &dyn OpportunityCatalog,
    directory: &dyn CountryDirectory,
    args: NewListingArgs,
) -> Result<()> {
    let spinner = ui::new_spinner("Validating country...");
    let countries = directory.list().await?;
    spinner.finish_and_clear();

    if !countries.iter().any(|c| c.id == args.country_id) {
        let known = countries
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        bail!(
            "Unknown country id '{}' (known: {known})",
            args.country_id
        );
    }

    let mut draft = DraftOpportunity::new()
        .title(&args.title)
        .location(&args.location)
        .country_id(&args.country_id)
        .total_price(args.total_price)
        .images(args.images)
        .amenities(args.amenities);
    if let Some(capacity) = args.capacity {
        draft = draft.capacity(capacity);
    }
    if let Some(total_shares) = args.total_shares {
        draft = draft.total_shares(total_shares);
    }
    if let Some(pct) = args.available_shares_pct {
        draft = draft.available_shares_pct(pct);
    }
    if let Some(pct) = args.expected_roi_pct {
        draft = draft.expected_roi_pct(pct);
    }
    let listing = draft.build()?;

    let created = catalog.create(&listing).await?;
    info!("Created listing {}", created.id);
    println!(
        "Created listing {} — {} ({}, {})",
        ui::style_text(&created.id, ui::StyleType::Highlight),
        created.title,
        created.location,
        created.country_name
    );
    Ok(())
}

pub async fn update(
    catalog: &dyn OpportunityCatalog,
    id: &str,
    patch: OpportunityPatch,
) -> Result<()> {
    if patch.is_empty() {
        bail!("No fields to update; pass at least one field flag such as --price");
    }
    catalog.update(id, &patch).await?;
    info!("Updated listing {id}");
    println!("Updated listing {id}");
    Ok(())
}

pub async fn remove(catalog: &dyn OpportunityCatalog, id: &str) -> Result<()> {
    catalog.remove(id).await?;
    info!("Deleted listing {id}");
    println!("Deleted listing {id}");
    Ok(())
}
