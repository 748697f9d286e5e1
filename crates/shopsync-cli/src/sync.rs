//! `sync` command handler.

use shopsync_core::{AppConfig, RunResult, SyncPlan};
use shopsync_engine::SyncService;

/// Runs one sync (or a dry run) and prints the outcome.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built or the run fails
/// fatally (feed, destination listing or sweep).
pub(crate) async fn run_sync_command(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let service = SyncService::from_app_config(config)?;
    tracing::info!(dry_run, store = %config.shopify_store_domain, "sync command started");

    if dry_run {
        let plan = service.plan().await?;
        println!("{}", format_plan(&plan));
        return Ok(());
    }

    let result = service.run().await?;
    println!("{}", format_result(&result));
    Ok(())
}

fn format_result(result: &RunResult) -> String {
    let c = result.counts;
    format!(
        "sync complete: {} created, {} updated, {} unchanged, {} discarded, {} deleted",
        c.created, c.updated, c.unchanged, c.discarded, result.deleted
    )
}

fn format_plan(plan: &SyncPlan) -> String {
    let mut lines = vec![format!(
        "dry-run: would create {}, update {}, leave {} unchanged, discard {}, delete {}",
        plan.to_create.len(),
        plan.to_update.len(),
        plan.counts.unchanged,
        plan.to_discard.len(),
        plan.to_delete.len()
    )];
    if !plan.to_delete.is_empty() {
        lines.push(format!("  delete: [{}]", plan.to_delete.join(", ")));
    }
    for (sku, reason) in &plan.to_discard {
        lines.push(format!("  discard {sku}: {reason}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use shopsync_core::{Action, ActionCounts};

    use super::*;

    #[test]
    fn result_line_lists_every_counter() {
        let mut counts = ActionCounts::default();
        counts.record(Action::Create);
        counts.record(Action::Discard);
        let result = RunResult {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            counts,
            deleted: 3,
            outcomes: Vec::new(),
            discards: Vec::new(),
        };
        assert_eq!(
            format_result(&result),
            "sync complete: 1 created, 0 updated, 0 unchanged, 1 discarded, 3 deleted"
        );
    }

    #[test]
    fn plan_lists_deletions_and_discards() {
        let plan = SyncPlan {
            to_create: vec!["A".to_owned()],
            to_discard: vec![("B".to_owned(), "invalid price for creation".to_owned())],
            to_delete: vec!["X".to_owned(), "Y".to_owned()],
            ..SyncPlan::default()
        };
        let text = format_plan(&plan);
        assert!(text.starts_with("dry-run: would create 1, update 0"));
        assert!(text.contains("  delete: [X, Y]"));
        assert!(text.contains("  discard B: invalid price for creation"));
    }
}
