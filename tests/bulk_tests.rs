use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

const EXPORT: &str = "Comparison of Teammate performance
\"Date range: Jan 1, 2026 - Jan 31, 2026\"
Teammate,Teammate ID,Closed conversations by teammates,Replies sent,Teammate CSAT score
Alice Martin,101,\"1,234\",\"2,001\",96.9%
Bob Stone,102,640,900,87.7% (822/937)
Chloe Park,103,320,410,-
Dan Idle,104,-,0,-
Summary,,\"2,194\",\"3,311\",92.1%
";

fn run_bulk(temp: &assert_fs::TempDir) -> ChildPath {
    let input = temp.child("export.csv");
    input.write_str(EXPORT).unwrap();
    let store = temp.child("history.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "bulk",
        input.path().to_str().unwrap(),
        "--store",
        store.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Processed 3 agents, 2 team members qualified"))
        .stdout(predicate::str::contains("Results recorded in"));
    store
}

#[test]
fn bulk_records_every_agent_with_chats() {
    let temp = assert_fs::TempDir::new().unwrap();
    let store = run_bulk(&temp);

    store.assert(predicate::str::contains("\"agentName\": \"Alice Martin\""));
    store.assert(predicate::str::contains("\"agentName\": \"Chloe Park\""));
    store.assert(predicate::str::contains("Dan Idle").not());
    store.assert(predicate::str::contains("excludedFromPodium"));
}

#[test]
fn bulk_dry_run_leaves_store_untouched() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("export.csv");
    input.write_str(EXPORT).unwrap();
    let store = temp.child("history.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "bulk",
        input.path().to_str().unwrap(),
        "--dry-run",
        "--store",
        store.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Alice Martin"));
    store.assert(predicate::path::missing());
}

#[test]
fn bulk_uses_column_overrides_without_header() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("export.csv");
    input
        .write_str("Agent,Score,Volume\nEve,93%,800\nFrank,90%,450\nGina,95%,0\n")
        .unwrap();
    let store = temp.child("history.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "bulk",
        input.path().to_str().unwrap(),
        "--name-column",
        "0",
        "--chats-column",
        "2",
        "--csat-column",
        "1",
        "--store",
        store.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Processed 2 agents, 1 team members qualified for a bonus, 1 skipped without closed chats",
        ));
}

#[test]
fn bulk_rejects_out_of_range_override() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("export.csv");
    input.write_str(EXPORT).unwrap();
    let store = temp.child("history.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "bulk",
        input.path().to_str().unwrap(),
        "--csat-column",
        "42",
        "--store",
        store.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
    store.assert(predicate::path::missing());
}

#[test]
fn stats_and_podium_summarize_history() {
    let temp = assert_fs::TempDir::new().unwrap();
    let store = run_bulk(&temp);
    let store_arg = store.path().to_str().unwrap().to_string();

    let mut stats = assert_cmd::cargo_bin_cmd!("agent-bonus");
    stats.args(["stats", "--store", &store_arg]);
    stats
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculations: 3"))
        .stdout(predicate::str::contains("Team members: 3"))
        .stdout(predicate::str::contains("Team objective: 1500 chats"));

    let mut podium = assert_cmd::cargo_bin_cmd!("agent-bonus");
    podium.args(["podium", "--store", &store_arg]);
    podium
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Alice Martin - 1234 chats - 96.9% CSAT"))
        .stdout(predicate::str::contains("Bob Stone").not());
}

#[test]
fn excluded_agent_leaves_the_podium() {
    let temp = assert_fs::TempDir::new().unwrap();
    let store = run_bulk(&temp);
    let store_arg = store.path().to_str().unwrap().to_string();

    let mut exclude = assert_cmd::cargo_bin_cmd!("agent-bonus");
    exclude.args(["exclude", "Alice Martin", "--store", &store_arg]);
    exclude
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Martin excluded from the podium"));

    let mut podium = assert_cmd::cargo_bin_cmd!("agent-bonus");
    podium.args(["podium", "--store", &store_arg]);
    podium
        .assert()
        .success()
        .stdout(predicate::str::contains("No agent meets the podium criteria yet"));

    let mut include = assert_cmd::cargo_bin_cmd!("agent-bonus");
    include.args(["include", "Alice Martin", "--store", &store_arg]);
    include
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Martin is back on the podium"));
}

#[test]
fn export_and_clear_history() {
    let temp = assert_fs::TempDir::new().unwrap();
    let store = run_bulk(&temp);
    let store_arg = store.path().to_str().unwrap().to_string();
    let report = temp.child("report.csv");

    let mut export = assert_cmd::cargo_bin_cmd!("agent-bonus");
    export.args([
        "export",
        "-o",
        report.path().to_str().unwrap(),
        "--store",
        &store_arg,
    ]);
    export
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));
    report.assert(predicate::str::starts_with(
        "Date,Agent Name,Closed Chats,CSAT,Bonus (EUR),Total Cost (EUR),Cost per Chat (EUR)",
    ));
    report.assert(predicate::str::contains("Alice Martin,1234,96.9,700.00,3700.00,3.00"));

    let mut clear = assert_cmd::cargo_bin_cmd!("agent-bonus");
    clear.args(["clear-history", "--store", &store_arg]);
    clear
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 3 recorded calculations"));

    let mut history = assert_cmd::cargo_bin_cmd!("agent-bonus");
    history.args(["history", "--store", &store_arg]);
    history
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations recorded yet"));
}

#[test]
fn plot_bonuses_creates_png() {
    let temp = assert_fs::TempDir::new().unwrap();
    let store = run_bulk(&temp);
    let chart = temp.child("bonuses.png");
    let chart_arg = chart.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "plot-bonuses",
        "-o",
        &chart_arg,
        "--store",
        store.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bonus chart written to"));

    let metadata = fs::metadata(chart_arg).unwrap();
    assert!(metadata.len() > 0);
}
