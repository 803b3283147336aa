//! The `countries` command: expansion status across the network.

use super::ui;
use crate::core::country::{Country, CountryDirectory, expansion_stats};
use anyhow::Result;
use comfy_table::Cell;
use console::style;
use tracing::warn;

pub async fn run(directory: &dyn CountryDirectory) -> Result<()> {
    let spinner = ui::new_spinner("Fetching countries...");
    let countries = directory.list().await.unwrap_or_else(|e| {
        warn!("Falling back to an empty country list: {e}");
        Vec::new()
    });
    spinner.finish_and_clear();

    if countries.is_empty() {
        println!("No countries found.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Country"),
        ui::header_cell("Status"),
        ui::header_cell("Locations"),
        ui::header_cell("Architects"),
        ui::header_cell("Ambassadors"),
        ui::header_cell("Creators"),
        ui::header_cell("B2B"),
    ]);

    for country in &countries {
        table.add_row(country_row(country));
    }

    println!(
        "{}\n",
        ui::style_text("Expansion Status", ui::StyleType::Title)
    );
    println!("{table}");

    let stats = expansion_stats(&countries);
    let summary = format!(
        "Active (development/operating): {}   In pipeline: {}",
        stats.active, stats.total_proposed
    );
    println!("\n{}", style(summary).bold());

    Ok(())
}

/// One table row per country: code, name, status, then the five
/// expansion meters.
fn country_row(country: &Country) -> Vec<Cell> {
    let status = if country.status.has_ambassador() {
        ui::style_text(&country.status.to_string(), ui::StyleType::Highlight)
    } else {
        country.status.to_string()
    };
    vec![
        Cell::new(&country.id),
        Cell::new(&country.name),
        Cell::new(status),
        ui::meter_cell(country.locations.current, country.locations.target),
        ui::meter_cell(country.architects.current, country.architects.target),
        ui::meter_cell(
            country.ambassador_applications.current,
            country.ambassador_applications.target,
        ),
        ui::meter_cell(
            country.content_creators.current,
            country.content_creators.target,
        ),
        ui::meter_cell(country.b2b_clients.current, country.b2b_clients.target),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::{CountryStatus, Milestone};

    #[test]
    fn test_country_row_renders_all_five_meters() {
        let country = Country {
            id: "BGR".to_string(),
            name: "Bulgaria".to_string(),
            status: CountryStatus::Development,
            description: None,
            locations: Milestone {
                current: 3,
                target: 5,
            },
            architects: Milestone {
                current: 2,
                target: 4,
            },
            ambassador_applications: Milestone {
                current: 1,
                target: 3,
            },
            content_creators: Milestone {
                current: 0,
                target: 2,
            },
            b2b_clients: Milestone {
                current: 5,
                target: 5,
            },
        };

        let mut table = ui::new_styled_table();
        table.add_row(country_row(&country));
        let rendered = table.to_string();

        assert!(rendered.contains("3/5"));
        assert!(rendered.contains("2/4"), "architects meter missing: {rendered}");
        assert!(rendered.contains("1/3"));
        assert!(rendered.contains("0/2"));
        assert!(rendered.contains("5/5"));
    }
}
