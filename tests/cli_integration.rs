use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CHARGE_EMAIL: &str = "Subject: Card activity\n\
                            \n\
                            > A charge of $5 was made\n\
                            Do not reply to this email\n";

/// Creates a scratch directory holding `1.txt` and the given email files.
fn mail_dir(index: &str, emails: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.txt"), index).unwrap();
    for (name, content) in emails {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn fix_emails(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fix-emails").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_one_matching_file_of_two() {
    let dir = mail_dir(
        "match.eml\nplain.eml\n",
        &[("match.eml", CHARGE_EMAIL), ("plain.eml", "Hello\nNothing to see\n")],
    );

    fix_emails(&dir)
        .assert()
        .success()
        .stdout("match.eml\n");

    assert_eq!(
        fs::read_to_string(dir.path().join("match.eml.edited")).unwrap(),
        "A charge of $5 was made\n"
    );
    assert!(!dir.path().join("plain.eml.edited").exists());
}

#[test]
fn test_stderr_is_silent_on_success() {
    let dir = mail_dir("match.eml\n", &[("match.eml", CHARGE_EMAIL)]);

    fix_emails(&dir)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_index_fails() {
    let dir = TempDir::new().unwrap();

    fix_emails(&dir)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("1.txt"));
}

#[test]
fn test_missing_email_aborts_remaining_files() {
    let dir = mail_dir(
        "ghost.eml\nmatch.eml\n",
        &[("match.eml", CHARGE_EMAIL)],
    );

    fix_emails(&dir)
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ghost.eml"));

    assert!(!dir.path().join("match.eml.edited").exists());
}

#[test]
fn test_terminator_before_start_marker_writes_nothing() {
    let dir = mail_dir(
        "early.eml\n",
        &[("early.eml", "Do not reply\n> A charge of $5 was made\nDo not reply\n")],
    );

    fix_emails(&dir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!dir.path().join("early.eml.edited").exists());
}

#[test]
fn test_existing_result_is_overwritten() {
    let dir = mail_dir("match.eml\n", &[("match.eml", CHARGE_EMAIL)]);
    fs::write(dir.path().join("match.eml.edited"), "old\nstuff\n").unwrap();

    fix_emails(&dir).assert().success();
    fix_emails(&dir).assert().success().stdout("match.eml\n");

    assert_eq!(
        fs::read_to_string(dir.path().join("match.eml.edited")).unwrap(),
        "A charge of $5 was made\n"
    );
}

#[test]
fn test_custom_index_and_base_dir() {
    let work = TempDir::new().unwrap();
    let mail = mail_dir("", &[("gas.eml", "> a gas station charge of $40 =\n> Do not reply\n")]);
    fs::write(work.path().join("batch.txt"), "gas.eml\n").unwrap();

    fix_emails(&work)
        .args(["--index", "batch.txt", "--base-dir"])
        .arg(mail.path())
        .assert()
        .success()
        .stdout("gas.eml\n");

    assert_eq!(
        fs::read_to_string(mail.path().join("gas.eml.edited")).unwrap(),
        "a gas station charge of $40\n"
    );
}

#[test]
fn test_dry_run_reports_without_writing() {
    let dir = mail_dir("match.eml\n", &[("match.eml", CHARGE_EMAIL)]);

    fix_emails(&dir)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout("match.eml\n");

    assert!(!dir.path().join("match.eml.edited").exists());
}

#[test]
fn test_skip_blank_lines() {
    let dir = mail_dir("\nmatch.eml\n\n", &[("match.eml", CHARGE_EMAIL)]);

    fix_emails(&dir).assert().code(4);

    fix_emails(&dir)
        .arg("--skip-blank-lines")
        .assert()
        .success()
        .stdout("match.eml\n");
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = mail_dir("", &[("match.eml", CHARGE_EMAIL)]);
    fs::write(dir.path().join("list.txt"), "match.eml\n").unwrap();
    fs::write(
        dir.path().join("fix-emails.toml"),
        "[input]\nindex_file = \"list.txt\"\nskip_blank_lines = false\n\n[output]\nshow_summary = false\n",
    )
    .unwrap();

    fix_emails(&dir)
        .assert()
        .success()
        .stdout("match.eml\n");
}

#[test]
fn test_invalid_config_file() {
    let dir = mail_dir("match.eml\n", &[("match.eml", CHARGE_EMAIL)]);
    fs::write(dir.path().join("broken.toml"), "[input\n").unwrap();

    fix_emails(&dir)
        .args(["--config", "broken.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_json_output() {
    let dir = mail_dir("match.eml\n", &[("match.eml", CHARGE_EMAIL)]);

    fix_emails(&dir)
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"written\""))
        .stdout(predicate::str::contains("\"file\":\"match.eml\""))
        .stdout(predicate::str::contains("\"type\":\"summary\""));
}

#[test]
fn test_verbose_summary_goes_to_stderr() {
    let dir = mail_dir("match.eml\n", &[("match.eml", CHARGE_EMAIL)]);

    fix_emails(&dir)
        .args(["--output-format", "plain", "-v"])
        .assert()
        .success()
        .stdout("match.eml\n")
        .stderr(predicate::str::contains("Blocks written: 1"));
}

#[test]
fn test_generate_config() {
    let dir = TempDir::new().unwrap();

    fix_emails(&dir)
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("fix-emails.toml"));

    let content = fs::read_to_string(dir.path().join("fix-emails.toml")).unwrap();
    assert!(content.contains("index_file = \"1.txt\""));
}

#[test]
fn test_latin1_email_is_copied_byte_for_byte() {
    let dir = mail_dir("latin1.eml\n", &[]);
    fs::write(
        dir.path().join("latin1.eml"),
        b"> A charge at caf\xe9 of $5\nDo not reply\n",
    )
    .unwrap();

    fix_emails(&dir).assert().success().stdout("latin1.eml\n");

    assert_eq!(
        fs::read(dir.path().join("latin1.eml.edited")).unwrap(),
        b"A charge at caf\xe9 of $5\n"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_filename_in_index() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = mail_dir("", &[("after.eml", CHARGE_EMAIL)]);
    fs::write(dir.path().join("1.txt"), b"caf\xe9.eml\nafter.eml\n").unwrap();
    fs::write(dir.path().join(OsStr::from_bytes(b"caf\xe9.eml")), CHARGE_EMAIL).unwrap();

    fix_emails(&dir)
        .assert()
        .success()
        .stdout(&b"caf\xe9.eml\nafter.eml\n"[..]);

    assert!(dir
        .path()
        .join(OsStr::from_bytes(b"caf\xe9.eml.edited"))
        .exists());
    assert!(dir.path().join("after.eml.edited").exists());
}
