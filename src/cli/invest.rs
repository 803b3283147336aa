//! The `invest` command: simulates returns for one listing selection.

use super::ui;
use crate::core::calculator;
use crate::core::currency::CurrencyTable;
use crate::core::opportunity::{Opportunity, OpportunityCatalog};
use anyhow::{Result, bail};
use comfy_table::Cell;
use tracing::warn;

/// Flags resolved for one simulation run.
pub struct Selection<'a> {
    /// Listing id; the first catalog entry when absent.
    pub opportunity_id: Option<&'a str>,
    pub share_count: u32,
    pub currency: &'a str,
}

pub async fn run(
    catalog: &dyn OpportunityCatalog,
    currencies: &CurrencyTable,
    selection: Selection<'_>,
) -> Result<()> {
    let spinner = ui::new_spinner("Fetching opportunities...");
    let opportunities = catalog.list().await.unwrap_or_else(|e| {
        warn!("Falling back to an empty catalog: {e}");
        Vec::new()
    });
    spinner.finish_and_clear();

    let Some(opportunity) = select(&opportunities, selection.opportunity_id)? else {
        println!("No opportunities found.");
        return Ok(());
    };

    if opportunity.total_price <= 0.0 {
        bail!(
            "Listing '{}' has no valid price; returns cannot be simulated",
            opportunity.title
        );
    }
    if selection.share_count < 1 || selection.share_count > opportunity.total_shares {
        bail!(
            "Share count must be between 1 and {} for '{}', got {}",
            opportunity.total_shares,
            opportunity.title,
            selection.share_count
        );
    }

    let spec = currencies.get(selection.currency)?;
    let metrics = calculator::compute(opportunity, selection.share_count);

    println!(
        "ROI Calculator: {}\n",
        ui::style_text(&opportunity.title, ui::StyleType::Title)
    );
    println!(
        "{} — {}, {}   (expected ROI {}%)\n",
        ui::style_text("Simulating returns", ui::StyleType::Subtle),
        opportunity.location,
        opportunity.country_name,
        opportunity.expected_roi_pct
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("Shares"),
        Cell::new(format!(
            "{} / {}",
            selection.share_count, opportunity.total_shares
        )),
    ]);
    table.add_row(vec![
        Cell::new("Ownership"),
        Cell::new(format!("{:.1}%", metrics.ownership_pct)),
    ]);
    table.add_row(vec![
        Cell::new("Required investment"),
        Cell::new(spec.format(metrics.investment_cost)),
    ]);
    table.add_row(vec![
        Cell::new("Free nights / year"),
        Cell::new(metrics.free_nights_per_year.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Est. yearly cash return"),
        Cell::new(ui::style_text(
            &format!("+{}", spec.format(metrics.yearly_cash_return)),
            ui::StyleType::Positive,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Projected value (5y)"),
        Cell::new(spec.format(metrics.projected_value_5y)),
    ]);
    table.add_row(vec![
        Cell::new("Projected value (10y)"),
        Cell::new(spec.format(metrics.projected_value_10y)),
    ]);
    println!("{table}");

    println!(
        "\n{}",
        ui::style_text(
            "*Projections assume 5% nominal annual appreciation. Returns are not guaranteed.",
            ui::StyleType::Subtle
        )
    );

    Ok(())
}

fn select<'a>(
    opportunities: &'a [Opportunity],
    opportunity_id: Option<&str>,
) -> Result<Option<&'a Opportunity>> {
    match opportunity_id {
        Some(id) => match opportunities.iter().find(|o| o.id == id) {
            Some(opportunity) => Ok(Some(opportunity)),
            None => bail!("No opportunity with id '{id}' in the catalog"),
        },
        None => Ok(opportunities.first()),
    }
}
