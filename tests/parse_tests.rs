use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

const EXPORT: &str = "Comparison of Teammate performance
\"Date range: Jan 1, 2026 - Jan 31, 2026\"
Teammate,Teammate ID,Closed conversations by teammates,Replies sent,Teammate CSAT score
Alice Martin,101,\"1,234\",\"2,001\",96.9%
Bob Stone,102,640,900,87.7% (822/937)
Chloe Park,103,320,410,-
Dan Idle,104,-,0,-
Summary,,\"2,194\",\"3,311\",92.1%
";

#[test]
fn parse_writes_records_as_json() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("export.csv");
    input.write_str(EXPORT).unwrap();
    let output = temp.child("records.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "parse",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Saved 3 records to"))
        .stdout(predicate::str::contains("Records retained: 3"));

    let json: Value = serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["name"], "Alice Martin");
    assert_eq!(records[0]["closedConversations"].as_f64(), Some(1234.0));
    assert_eq!(records[0]["csatScore"].as_f64(), Some(96.9));
    assert_eq!(records[1]["csatScore"].as_f64(), Some(87.7));
    assert!(records[2]["csatScore"].is_null());
}

#[test]
fn parse_fails_for_missing_input() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("records.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args(["parse", "missing-export.csv", output.path().to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("input file not found"));
    output.assert(predicate::path::missing());
}

#[test]
fn parse_rejects_files_above_the_size_limit() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("large_export.csv");
    std::fs::File::create(input.path())
        .unwrap()
        .set_len(10 * 1024 * 1024 + 1)
        .unwrap();
    let output = temp.child("output.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "parse",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse Intercom export"))
        .stderr(predicate::str::contains("the limit is"));
    output.assert(predicate::path::missing());
}

#[test]
fn parse_requires_the_intercom_columns() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("export.csv");
    input.write_str("Name,Chats,Score\nAlice,600,95%\n").unwrap();
    let output = temp.child("records.json");

    let mut cmd = assert_cmd::cargo_bin_cmd!("agent-bonus");
    cmd.args([
        "parse",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse Intercom export"))
        .stderr(predicate::str::contains("missing"));
    output.assert(predicate::path::missing());
}
