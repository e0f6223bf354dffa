use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kinsenas(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kinsenas").unwrap();
    cmd.env("KINSENAS_DATA_DIR", dir.path());
    cmd
}

#[test]
fn test_fresh_budget_shows_defaults() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cut-off: 15th / 30th"))
        .stdout(predicate::str::contains("Housing Loan"))
        .stdout(predicate::str::contains("₱5843"))
        .stdout(predicate::str::contains("₱6843"));
}

#[test]
fn test_budget_edits_persist_between_runs() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["budget", "add-row"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added row 6"));

    kinsenas(&dir)
        .args(["budget", "edit", "6", "--name", "Internet", "--first", "843"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining: ₱5000 / ₱6843"));

    kinsenas(&dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Internet"))
        .stdout(predicate::str::contains("₱5000"));

    assert!(dir.path().join("data").join("budget.rows.json").exists());
}

#[test]
fn test_cutoff_day_is_clamped() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["budget", "cutoff", "first", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The first cutoff is now the 1st"));

    kinsenas(&dir)
        .args(["budget", "cutoff", "second", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("the 31st"));

    kinsenas(&dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cut-off: 1st / 31st"));
}

#[test]
fn test_salary_row_survives_removal() {
    let dir = TempDir::new().unwrap();

    for _ in 0..4 {
        kinsenas(&dir)
            .args(["budget", "remove-row"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed row"));
    }

    kinsenas(&dir)
        .args(["budget", "remove-row"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The salary row cannot be removed."));
}

#[test]
fn test_renaming_salary_row_fails() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["budget", "edit", "1", "--name", "Bonus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be renamed"));
}

#[test]
fn test_new_month_shows_seed_rows() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["expenses", "show", "--month", "2026-01"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("January 2026"))
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Transportation"))
        .stdout(predicate::str::contains("Total Expenses ₱0"));

    assert!(!dir.path().join("data").join("expenses.byMonth.json").exists());
}

#[test]
fn test_expense_edits_and_navigation() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["expenses", "edit", "1", "--amount", "1200", "--month", "2026-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses ₱1200"));

    kinsenas(&dir)
        .args(["expenses", "show", "--month", "2025-12", "--next"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("January 2026"))
        .stdout(predicate::str::contains("Total Expenses ₱1200"));

    kinsenas(&dir)
        .args(["expenses", "show", "--month", "2026-01", "--prev"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("December 2025"))
        .stdout(predicate::str::contains("Total Expenses ₱0"));

    kinsenas(&dir)
        .args(["expenses", "months"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-01  January 2026"));
}

#[test]
fn test_expense_rows_can_be_emptied() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["expenses", "remove", "1", "2", "--month", "2026-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 'Food'"))
        .stdout(predicate::str::contains("Removed 'Transportation'"));

    kinsenas(&dir)
        .args(["expenses", "remove-row", "--month", "2026-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses to remove."));
}

#[test]
fn test_invalid_month_is_rejected() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["expenses", "show", "--month", "2026-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM"));
}

#[test]
fn test_history_lists_changes() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes recorded yet."));

    kinsenas(&dir)
        .args(["budget", "cutoff", "first", "10"])
        .assert()
        .success();

    kinsenas(&dir)
        .args(["expenses", "add-row", "--month", "2026-02"])
        .assert()
        .success();

    kinsenas(&dir)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE CutoffDay first"))
        .stdout(predicate::str::contains("CREATE ExpenseRow"))
        .stdout(predicate::str::contains("in 2026-02"));
}

#[test]
fn test_audit_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"audit_enabled": false, "currency_symbol": "$"}"#,
    )
    .unwrap();

    kinsenas(&dir)
        .args(["budget", "add-row"])
        .assert()
        .success();

    assert!(!dir.path().join("audit.log").exists());

    kinsenas(&dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$5843"));
}

#[test]
fn test_unwritable_audit_log_still_saves() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("audit.log")).unwrap();

    kinsenas(&dir)
        .args(["expenses", "add-row", "--month", "2026-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added row 3"))
        .stderr(predicate::str::contains("the change was saved"));

    kinsenas(&dir)
        .args(["expenses", "months"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-05  May 2026"));
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();

    kinsenas(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol: ₱"))
        .stdout(predicate::str::contains("audit.log"));
}
