//! The `profile` command: member summary, meters and holdings.

use super::ui;
use crate::core::currency::CurrencyTable;
use crate::core::profile::ProfileSource;
use anyhow::{Context, Result};
use comfy_table::Cell;

const LEADERBOARD_SIZE: usize = 10;

pub async fn run(
    profiles: &dyn ProfileSource,
    currencies: &CurrencyTable,
    user_id: &str,
    currency: &str,
    show_leaderboard: bool,
) -> Result<()> {
    let spec = currencies.get(currency)?;

    let spinner = ui::new_spinner("Fetching profile...");
    let profile = profiles
        .fetch(user_id)
        .await
        .with_context(|| format!("Could not load profile for user {user_id}"))?;
    spinner.finish_and_clear();

    println!(
        "{}  {}\n",
        ui::style_text(&profile.name, ui::StyleType::Title),
        ui::style_text(&format!("[{}]", profile.level), ui::StyleType::Highlight)
    );
    if let Some(member_since) = profile.member_since {
        println!(
            "{}",
            ui::style_text(
                &format!("Member since {}", member_since.format("%B %Y")),
                ui::StyleType::Subtle
            )
        );
    }

    // Meters can be misconfigured server-side (zero targets); show n/a then.
    let level_meter = profile
        .level_progress()
        .map(|pct| format!("{pct:.0}%"))
        .unwrap_or_else(|_| "n/a".to_string());
    let nights_meter = profile
        .free_nights_progress()
        .map(|pct| format!("{pct:.0}%"))
        .unwrap_or_else(|_| "n/a".to_string());

    let mut stats = ui::new_styled_table();
    stats.set_header(vec![ui::header_cell("Stat"), ui::header_cell("Value")]);
    stats.add_row(vec![
        Cell::new("Points"),
        Cell::new(format!(
            "{} / {} ({level_meter} to next level)",
            profile.total_points, profile.next_level_points
        )),
    ]);
    stats.add_row(vec![
        Cell::new("Total invested"),
        Cell::new(spec.format(profile.total_invested)),
    ]);
    stats.add_row(vec![
        Cell::new("Yearly return"),
        Cell::new(ui::style_text(
            &format!(
                "+{} ({}%)",
                spec.format(profile.total_yearly_return),
                profile.total_yearly_return_pct
            ),
            ui::StyleType::Positive,
        )),
    ]);
    stats.add_row(vec![
        Cell::new("Free nights"),
        Cell::new(format!(
            "{} used / {} total ({nights_meter} used, {} remaining)",
            profile.used_free_nights,
            profile.total_free_nights,
            profile.remaining_free_nights()
        )),
    ]);
    println!("\n{stats}");

    if !profile.holdings.is_empty() {
        let mut holdings = ui::new_styled_table();
        holdings.set_header(vec![
            ui::header_cell("Property"),
            ui::header_cell("Location"),
            ui::header_cell("Shares"),
            ui::header_cell(&format!("Invested ({})", spec.code)),
            ui::header_cell("Yearly Return"),
        ]);
        for holding in &profile.holdings {
            holdings.add_row(vec![
                Cell::new(&holding.name),
                Cell::new(format!("{}, {}", holding.location, holding.country)),
                Cell::new(&holding.shares_owned),
                Cell::new(spec.format(holding.investment_size)),
                Cell::new(format!(
                    "+{} ({}%)",
                    spec.format(holding.yearly_return_val),
                    holding.yearly_return_pct
                )),
            ]);
        }
        println!(
            "\n{}\n",
            ui::style_text("Portfolio", ui::StyleType::Label)
        );
        println!("{holdings}");
    }

    if show_leaderboard {
        let entries = profiles.leaderboard(LEADERBOARD_SIZE).await?;
        if !entries.is_empty() {
            ui::print_separator();
            let mut board = ui::new_styled_table();
            board.set_header(vec![
                ui::header_cell("#"),
                ui::header_cell("Member"),
                ui::header_cell("Points"),
            ]);
            for (rank, entry) in entries.iter().enumerate() {
                board.add_row(vec![
                    Cell::new((rank + 1).to_string()),
                    Cell::new(&entry.name),
                    Cell::new(entry.points.to_string()),
                ]);
            }
            println!(
                "{}\n",
                ui::style_text("Community Leaderboard", ui::StyleType::Label)
            );
            println!("{board}");
        }
    }

    Ok(())
}
