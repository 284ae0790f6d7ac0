use clap::Parser;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["chargedb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_sync_command() {
    let cli = Cli::try_parse_from(["chargedb-cli", "sync"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Sync { dry_run: false })));
}

#[test]
fn parses_sync_dry_run() {
    let cli = Cli::try_parse_from(["chargedb-cli", "sync", "--dry-run"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Sync { dry_run: true })));
}

#[test]
fn parses_chargers_with_town() {
    let cli = Cli::try_parse_from(["chargedb-cli", "chargers", "Novi Sad"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Chargers { ref town, json: false }) if town == "Novi Sad"
    ));
}

#[test]
fn chargers_requires_a_town() {
    assert!(Cli::try_parse_from(["chargedb-cli", "chargers"]).is_err());
}

#[test]
fn parses_show_command() {
    let cli = Cli::try_parse_from(["chargedb-cli", "show", "12345"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Show { ref charger_id }) if charger_id == "12345"
    ));
}

#[test]
fn parses_db_subcommands() {
    let cases = [
        ("ping", DbCommands::Ping),
        ("provision", DbCommands::Provision),
        ("purge-expired", DbCommands::PurgeExpired),
    ];
    for (arg, expected) in cases {
        let cli = Cli::try_parse_from(["chargedb-cli", "db", arg]).expect("expected valid cli args");
        match cli.command {
            Some(Commands::Db { command }) => {
                assert_eq!(
                    std::mem::discriminant(&command),
                    std::mem::discriminant(&expected),
                    "{arg}"
                );
            }
            other => panic!("expected db command for {arg}, got {other:?}"),
        }
    }
}

#[test]
fn describe_plan_lists_stale_ids() {
    let plan = chargedb_sync::SyncPlan {
        fetched: 3,
        upserts: vec![chargedb_sync::test_support::charger("1", "Belgrade", 0)],
        stale_ids: vec!["7".to_string(), "8".to_string()],
    };
    let out = sync::describe_plan(&plan);
    assert!(out.starts_with("[dry-run] fetched 3, would upsert 1, would delete 2\n"));
    assert!(out.contains("  - 7\n"));
    assert!(out.contains("  - 8\n"));
}

#[test]
fn table_row_fills_missing_fields() {
    let mut charger = chargedb_sync::test_support::charger("42", "Belgrade", 0);
    assert_eq!(
        chargers::table_row(&charger),
        format!("{:<10}{:<8}{:<14}-", "42", "-", "-")
    );

    charger.number_of_points = Some(4);
    charger.status_type = Some("Operational".to_string());
    charger.title = Some("x".repeat(60));
    let row = chargers::table_row(&charger);
    assert!(row.contains("Operational"));
    assert!(row.ends_with(&format!("{}...", "x".repeat(50))));
}

#[tokio::test]
async fn show_reports_missing_charger() {
    let store = chargedb_sync::test_support::MemoryChargerStore::new();
    let err = chargers::run_show_charger(&store, "nope")
        .await
        .expect_err("should fail");
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn chargers_by_town_rejects_blank_town() {
    let store = chargedb_sync::test_support::MemoryChargerStore::new();
    assert!(chargers::run_chargers_by_town(&store, "  ", false).await.is_err());
}
