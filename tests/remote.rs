use crate::common::command::{
    commit_file, head_id, history, history_messages, init_repository_dir, run_twig_command,
    stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::path::Path;

mod common;

/// A local repository with `origin` pointing at a second, empty repository
struct Pair {
    local: TempDir,
    remote: TempDir,
}

impl Pair {
    fn local(&self) -> &Path {
        self.local.path()
    }

    fn remote(&self) -> &Path {
        self.remote.path()
    }
}

#[fixture]
fn pair(
    #[from(init_repository_dir)] local: TempDir,
    #[from(init_repository_dir)] remote: TempDir,
) -> Pair {
    let remote_twig = remote.path().join(".twig");
    run_twig_command(
        local.path(),
        &["add-remote", "origin", &remote_twig.to_string_lossy()],
    )
    .assert()
    .success();

    Pair { local, remote }
}

#[rstest]
fn push_sends_the_history_and_moves_the_remote_branch(pair: Pair) {
    commit_file(pair.local(), "a.txt", "one", "first");
    commit_file(pair.local(), "b.txt", "two", "second");

    run_twig_command(pair.local(), &["push", "origin", "master"])
        .assert()
        .success();

    assert_eq!(history(pair.remote()), history(pair.local()));
    run_twig_command(pair.remote(), &["checkout", &head_id(pair.local()), "--", "b.txt"])
        .assert()
        .success();
    assert_eq!(read_file(pair.remote(), "b.txt"), "two");
}

#[rstest]
fn push_creates_a_missing_remote_branch(pair: Pair) {
    commit_file(pair.local(), "a.txt", "one", "first");

    run_twig_command(pair.local(), &["push", "origin", "feature"])
        .assert()
        .success();

    run_twig_command(pair.remote(), &["checkout", "feature"])
        .assert()
        .success();
    assert_eq!(read_file(pair.remote(), "a.txt"), "one");
}

#[rstest]
fn push_behind_the_remote_fails_and_leaves_it_untouched(pair: Pair) {
    commit_file(pair.remote(), "r.txt", "remote", "remote work");
    let remote_history = history(pair.remote());
    commit_file(pair.local(), "l.txt", "local", "local work");

    run_twig_command(pair.local(), &["push", "origin", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please pull down remote changes before pushing.",
        ));

    assert_eq!(history(pair.remote()), remote_history);
}

#[rstest]
fn fetch_creates_a_tracking_branch(pair: Pair) {
    commit_file(pair.remote(), "r.txt", "remote", "remote work");
    let remote_head = head_id(pair.remote());

    run_twig_command(pair.local(), &["fetch", "origin", "master"])
        .assert()
        .success();

    assert!(stdout_of(pair.local(), &["status"]).contains("*master\norigin/master\n"));
    assert_eq!(history_messages(pair.local()), vec!["initial commit"]);
    run_twig_command(pair.local(), &["checkout", "origin/master"])
        .assert()
        .success();
    assert_eq!(head_id(pair.local()), remote_head);
    assert_eq!(read_file(pair.local(), "r.txt"), "remote");
}

#[rstest]
fn fetch_of_a_missing_branch_fails(pair: Pair) {
    run_twig_command(pair.local(), &["fetch", "origin", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "That remote does not have that branch.",
        ));
}

#[rstest]
fn pull_fast_forwards_onto_the_remote_head(pair: Pair) {
    commit_file(pair.remote(), "r.txt", "remote", "remote work");

    run_twig_command(pair.local(), &["pull", "origin", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("Current branch fast-forwarded.\n"));

    assert_eq!(head_id(pair.local()), head_id(pair.remote()));
    assert_eq!(read_file(pair.local(), "r.txt"), "remote");
}

#[rstest]
fn pull_merges_diverged_work_and_then_push_succeeds(pair: Pair) {
    commit_file(pair.remote(), "r.txt", "remote", "remote work");
    commit_file(pair.local(), "l.txt", "local", "local work");

    run_twig_command(pair.local(), &["pull", "origin", "master"])
        .assert()
        .success();

    assert_eq!(
        history_messages(pair.local())[0],
        "Merged origin/master into master."
    );
    assert_eq!(read_file(pair.local(), "r.txt"), "remote");
    assert_eq!(read_file(pair.local(), "l.txt"), "local");

    run_twig_command(pair.local(), &["push", "origin", "master"])
        .assert()
        .success();
    assert_eq!(head_id(pair.remote()), head_id(pair.local()));
}

#[rstest]
fn remote_paths_may_be_relative(
    #[from(init_repository_dir)] local: TempDir,
    #[from(init_repository_dir)] remote: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let remote_name = remote
        .path()
        .file_name()
        .ok_or("temp dir without a name")?
        .to_string_lossy()
        .to_string();
    let relative = format!("../{}/.twig", remote_name);
    run_twig_command(local.path(), &["add-remote", "origin", &relative])
        .assert()
        .success();
    commit_file(local.path(), "a.txt", "one", "first");

    run_twig_command(local.path(), &["push", "origin", "master"])
        .assert()
        .success();

    assert_eq!(head_id(remote.path()), head_id(local.path()));
    Ok(())
}

#[rstest]
fn adding_a_remote_twice_fails(pair: Pair) {
    run_twig_command(pair.local(), &["add-remote", "origin", "/elsewhere/.twig"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name already exists.",
        ));
}

#[rstest]
fn removed_remotes_are_forgotten(pair: Pair) {
    run_twig_command(pair.local(), &["rm-remote", "origin"])
        .assert()
        .success();

    run_twig_command(pair.local(), &["push", "origin", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name does not exist.",
        ));
    run_twig_command(pair.local(), &["rm-remote", "origin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name does not exist.",
        ));
}

#[rstest]
#[case::push("push")]
#[case::fetch("fetch")]
fn missing_remote_directory_fails(init_repository_dir: TempDir, #[case] command: &str) {
    let dir = init_repository_dir.path();
    let missing = dir.join("nowhere").join(".twig");
    run_twig_command(dir, &["add-remote", "gone", &missing.to_string_lossy()])
        .assert()
        .success();

    run_twig_command(dir, &[command, "gone", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote directory not found."));
}
