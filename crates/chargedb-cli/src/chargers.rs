//! Read-only charger lookups.

use chargedb_core::ChargerRecord;
use chargedb_sync::{get_chargers_by_town, now_epoch_secs, ChargerStore};

/// Print the chargers stored for `town`.
///
/// # Errors
///
/// Returns an error if the town is blank or the store query fails.
pub(crate) async fn run_chargers_by_town(
    store: &dyn ChargerStore,
    town: &str,
    json: bool,
) -> anyhow::Result<()> {
    let result = get_chargers_by_town(store, Some(town), now_epoch_secs()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.chargers.is_empty() {
        println!("no chargers found for {}; run `sync` first", result.town);
        return Ok(());
    }

    println!("{} charger(s) in {}", result.count, result.town);
    println!("{}", table_header());
    for charger in &result.chargers {
        println!("{}", table_row(charger));
    }
    Ok(())
}

/// Print one stored charger as pretty JSON.
///
/// # Errors
///
/// Returns an error if the charger is not stored or the query fails.
pub(crate) async fn run_show_charger(store: &dyn ChargerStore, charger_id: &str) -> anyhow::Result<()> {
    let charger = store
        .get(charger_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("charger '{charger_id}' not found; run `sync` first"))?;
    println!("{}", serde_json::to_string_pretty(&charger)?);
    Ok(())
}

pub(crate) fn table_header() -> String {
    format!("{:<10}{:<8}{:<14}TITLE", "ID", "POINTS", "STATUS")
}

pub(crate) fn table_row(charger: &ChargerRecord) -> String {
    let points = charger
        .number_of_points
        .map_or_else(|| "-".to_string(), |n| n.to_string());
    let status = charger.status_type.as_deref().unwrap_or("-");
    let title = charger.title.as_deref().unwrap_or("-");
    let title = if title.chars().count() > 50 {
        format!("{}...", title.chars().take(50).collect::<String>())
    } else {
        title.to_string()
    };
    format!("{:<10}{points:<8}{status:<14}{title}", charger.charger_id)
}
