use crate::common::file::write_file;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Fixed commit date so ids and log output are reproducible
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// How `log` renders `COMMIT_DATE`
pub const READABLE_COMMIT_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![
        ("NO_PAGER", "1"),
        ("NO_COLOR", "1"),
        ("TWIG_COMMIT_DATE", COMMIT_DATE),
    ]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    run_twig_command(dir, &["commit", "-m", message])
}

/// Write, stage and commit a single file
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(dir, name, content);
    run_twig_command(dir, &["add", name]).assert().success();
    twig_commit(dir, message).assert().success();
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_twig_command(dir, args)
        .output()
        .expect("Failed to run twig");
    assert!(
        output.status.success(),
        "twig {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("Non UTF-8 output")
}

/// Ids printed by `log`, newest first
pub fn history(dir: &Path) -> Vec<String> {
    stdout_of(dir, &["log"])
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

pub fn head_id(dir: &Path) -> String {
    history(dir)
        .into_iter()
        .next()
        .expect("log printed no commit")
}

/// Messages printed by `log`, newest first
pub fn history_messages(dir: &Path) -> Vec<String> {
    let output = stdout_of(dir, &["log"]);
    let lines = output.lines().collect::<Vec<_>>();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.starts_with("Date: "))
        .filter_map(|(i, _)| lines.get(i + 1))
        .map(|line| line.to_string())
        .collect()
}
