//! The `opportunities` command: the investment catalog as a table.

use super::ui;
use crate::core::currency::CurrencyTable;
use crate::core::opportunity::OpportunityCatalog;
use anyhow::Result;
use comfy_table::Cell;
use tracing::warn;

pub async fn run(
    catalog: &dyn OpportunityCatalog,
    currencies: &CurrencyTable,
    currency: &str,
) -> Result<()> {
    let spec = currencies.get(currency)?;

    let spinner = ui::new_spinner("Fetching opportunities...");
    let opportunities = catalog.list().await.unwrap_or_else(|e| {
        warn!("Falling back to an empty catalog: {e}");
        Vec::new()
    });
    spinner.finish_and_clear();

    if opportunities.is_empty() {
        println!("No opportunities found.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Title"),
        ui::header_cell("Location"),
        ui::header_cell("Cap"),
        ui::header_cell("ROI (%)"),
        ui::header_cell(&format!("Unit Price ({})", spec.code)),
        ui::header_cell("Available Shares"),
    ]);

    for opp in &opportunities {
        table.add_row(vec![
            Cell::new(&opp.id),
            Cell::new(&opp.title),
            Cell::new(format!("{}, {}", opp.location, opp.country_name)),
            Cell::new(opp.capacity.to_string()),
            Cell::new(format!("{:.1}", opp.expected_roi_pct)),
            Cell::new(spec.format(opp.total_price)),
            // Listings track availability as a percentage of all shares.
            ui::meter_cell(opp.available_shares_pct.round() as u32, 100),
        ]);
    }

    println!(
        "{}\n",
        ui::style_text("Nextribe Projects", ui::StyleType::Title)
    );
    println!("{table}");
    println!(
        "\n{} listing(s). Run `nextribe invest --opportunity <ID>` to simulate returns.",
        opportunities.len()
    );

    Ok(())
}
