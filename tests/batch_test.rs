use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

mod common;
use common::{BASE, DYNAMIC_15000, DYNAMIC_25000};

#[test]
fn test_batch_end_to_end() {
    let mut cmd = Command::new(cargo_bin!("qris"));
    cmd.env_remove("QRIS_TEMPLATE")
        .args(["--config", "tests/fixtures/merchant.toml"])
        .args(["batch", "tests/fixtures/orders.csv"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("order,total,payload,qr_url,error\n"))
        .stdout(predicate::str::contains(format!(
            "A-1,25000,{DYNAMIC_25000},https://api.qrserver.com/v1/create-qr-code/?data={DYNAMIC_25000}&size=300x300,\n"
        )))
        .stdout(predicate::str::contains(format!("A-2,15000,{DYNAMIC_15000},")))
        .stdout(predicate::str::contains(format!("A-6,25000,{DYNAMIC_25000},")))
        .stderr(predicate::str::contains("skipping unreadable order"));
}

#[test]
fn test_batch_rejected_rows_carry_no_payload() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "order, total").unwrap();
    writeln!(csv, "Z-1, 0").unwrap();
    writeln!(csv, "Z-2, -5").unwrap();
    writeln!(csv, "Z-3, 99.5").unwrap();
    writeln!(csv, "Z-4, 7").unwrap();

    let mut cmd = Command::new(cargo_bin!("qris"));
    cmd.env_remove("QRIS_TEMPLATE")
        .args(["--template", BASE, "batch"])
        .arg(csv.path());

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut reader = csv::Reader::from_reader(stdout.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);

    for row in &rows[..3] {
        assert_eq!(&row[2], "", "rejected order {} got a payload", &row[0]);
        assert_eq!(&row[3], "");
        assert!(row[4].contains("positive whole number"));
    }
    assert!(rows[3][2].starts_with("000201010212540175802ID6304"));
    assert_eq!(&rows[3][4], "");
}

#[test]
fn test_batch_rejects_dynamic_template() {
    let mut cmd = Command::new(cargo_bin!("qris"));
    cmd.env_remove("QRIS_TEMPLATE")
        .args(["--template", DYNAMIC_25000, "batch", "tests/fixtures/orders.csv"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not a static payload"));
}

#[test]
fn test_batch_missing_input() {
    let mut cmd = Command::new(cargo_bin!("qris"));
    cmd.env_remove("QRIS_TEMPLATE")
        .args(["--template", BASE, "batch", "tests/fixtures/does_not_exist.csv"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
