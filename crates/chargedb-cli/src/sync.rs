//! The `sync` command: one reconciliation pass, for cron-style triggers.

use std::sync::Arc;

use chargedb_core::AppConfig;
use chargedb_ocm::{OcmClient, OcmClientConfig};
use chargedb_sync::{now_epoch_secs, ChargerStore, Reconciler, SyncPlan, SyncSettings};

/// Runs one pass against `OpenChargeMap`.
///
/// With `dry_run`, fetches and diffs only and prints the planned changes.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the pass fails.
pub(crate) async fn run_sync(
    config: &AppConfig,
    store: Arc<dyn ChargerStore>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let source = OcmClient::new(&OcmClientConfig::from_app_config(config))?;
    if config.ocm_api_key.is_none() {
        tracing::warn!("OCM_API_KEY not set; requests may be rate limited or rejected");
    }
    let reconciler = Reconciler::new(
        Arc::new(source),
        store,
        SyncSettings::from_app_config(config),
    );

    if dry_run {
        let plan = reconciler.plan_at(now_epoch_secs()).await?;
        print!("{}", describe_plan(&plan));
        return Ok(());
    }

    let report = reconciler.run().await?;
    println!(
        "sync complete: fetched {}, upserted {}, deleted {}",
        report.fetched, report.upserted, report.deleted
    );
    Ok(())
}

/// Human-readable summary of a dry run.
pub(crate) fn describe_plan(plan: &SyncPlan) -> String {
    let report = plan.report();
    let mut out = format!(
        "[dry-run] fetched {}, would upsert {}, would delete {}\n",
        report.fetched, report.upserted, report.deleted
    );
    for id in &plan.stale_ids {
        out.push_str("  - ");
        out.push_str(id);
        out.push('\n');
    }
    out
}
