use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn script_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("catatan_cli").unwrap();
    cmd.env("CATATAN_HOME", home)
        .env("CATATAN_CLI_SCRIPT", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempdir().unwrap();
    let input = "login kitakita Terang\n\
                 add Gaji income 5000000 --date 2024-01-01 --category Gaji\n\
                 add Makan expense 50000 --date 2024-01-02\n\
                 report --by type\n\
                 exit\n";

    script_cmd(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Berhasil masuk"))
        .stdout(contains("Saldo       : Rp 4.950.000"))
        .stdout(contains("Pemasukan"))
        .stdout(contains("-Rp 50.000"));

    let json = std::fs::read_to_string(home.path().join("entries.json")).unwrap();
    assert!(json.contains("\"Gaji\""));
    assert!(json.contains("\"expense\""));
}

#[test]
fn ledger_commands_need_login() {
    let home = tempdir().unwrap();
    script_cmd(home.path())
        .write_stdin("list\nlogin kitakita terang\nlist\n")
        .assert()
        .success()
        .stderr(contains("Belum masuk"))
        .stderr(contains("Username atau password salah"));
    assert!(!home.path().join("entries.json").exists());
}

#[test]
fn empty_report_and_search_show_messages() {
    let home = tempdir().unwrap();
    script_cmd(home.path())
        .write_stdin(
            "login kitakita Terang\n\
             report --from 2030-01-01\n\
             list kopi\n",
        )
        .assert()
        .success()
        .stdout(contains(
            "Tidak ada data pada rentang dan filter yang dipilih.",
        ))
        .stdout(contains("Tidak ada data cocok dengan pencarian."));
}

#[test]
fn report_json_is_machine_readable() {
    let home = tempdir().unwrap();
    let output = script_cmd(home.path())
        .write_stdin(
            "login kitakita Terang\n\
             add Gaji income 100 --date 2024-01-01\n\
             report --json --status unpaid\n",
        )
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find('{').expect("json object in output");
    let report: serde_json::Value = serde_json::from_str(&stdout[start..]).unwrap();
    assert_eq!(report["group_by"], "name");
    assert_eq!(report["totals"]["income"], 100);
    assert_eq!(report["rows"][0]["key"], "Gaji");
}

#[test]
fn unknown_command_suggests_alternative() {
    let home = tempdir().unwrap();
    script_cmd(home.path())
        .write_stdin("reprot\n")
        .assert()
        .success()
        .stdout(contains("`report`").and(contains("Maksud Anda")));
}

#[test]
fn version_reports_package_version() {
    let home = tempdir().unwrap();
    script_cmd(home.path())
        .write_stdin("version\n")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn configured_currency_and_locale_format_reports() {
    let home = tempdir().unwrap();
    script_cmd(home.path())
        .write_stdin(
            "login kitakita Terang\n\
             config set currency USD\n\
             config set locale en-US\n\
             add Gaji income 5000000 --date 2024-01-01\n\
             add Makan expense 50000 --date 2024-01-02\n\
             report --by type\n",
        )
        .assert()
        .success()
        .stdout(contains("Saldo       : $ 4,950,000"))
        .stdout(contains("-$ 50,000"));
}

#[test]
fn restore_keeps_pre_restore_state_as_backup() {
    let home = tempdir().unwrap();
    script_cmd(home.path())
        .write_stdin(
            "login kitakita Terang\n\
             add A expense 1000 --date 2024-01-01\n\
             add B expense 1000 --date 2024-01-02\n\
             add C expense 1000 --date 2024-01-03\n",
        )
        .assert()
        .success();

    let backups_dir = home.path().join("backups");
    let mut names: Vec<String> = std::fs::read_dir(&backups_dir)
        .unwrap()
        .map(|item| item.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let oldest = names.first().unwrap().clone();

    script_cmd(home.path())
        .write_stdin(format!("restore {oldest} --yes\n"))
        .assert()
        .success();

    let current: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(home.path().join("entries.json")).unwrap())
            .unwrap();
    assert_eq!(current.as_array().unwrap().len(), 1);

    let three_entry_backup = std::fs::read_dir(&backups_dir).unwrap().any(|item| {
        let raw = std::fs::read_to_string(item.unwrap().path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value.as_array().map_or(false, |entries| entries.len() == 3)
    });
    assert!(three_entry_backup);
}
