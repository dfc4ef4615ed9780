use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

fn demo_trees() -> Vec<std::path::PathBuf> {
    let mut trees = fs::read_dir(dt_test_example::trees_root())
        .expect("demo trees root must exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    trees.sort();
    trees
}

#[test]
fn check_passes_for_all_demo_trees() {
    let bin = env!("CARGO_BIN_EXE_dialogtree");
    let trees = demo_trees();
    assert!(!trees.is_empty(), "expected demo trees");

    for tree in trees {
        let output = Command::new(bin)
            .arg("check")
            .arg("--tree")
            .arg(&tree)
            .output()
            .expect("cli should execute");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            output.status.success(),
            "check failed for {}\nstdout:\n{}\nstderr:\n{}",
            tree.display(),
            stdout,
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(stdout.starts_with("RESULT:OK"), "unexpected report: {}", stdout);
    }
}

#[test]
fn check_flags_broken_tree() {
    let bin = env!("CARGO_BIN_EXE_dialogtree");
    let output = Command::new(bin)
        .arg("check")
        .arg("--tree")
        .arg(dt_test_example::broken_tree_path("dangling"))
        .output()
        .expect("cli should execute");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ISSUES"));
    assert!(stdout.contains("DANGLING:menu|missing"));
}

#[test]
fn play_follows_redirect_rule() {
    let bin = env!("CARGO_BIN_EXE_dialogtree");
    let mut child = Command::new(bin)
        .arg("play")
        .arg("--tree")
        .arg(dt_test_example::tree_path("support"))
        .arg("--redirect")
        .arg("Read the docs=https://example.com/docs")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("cli should spawn");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"1\n")
        .expect("stdin write");
    let output = child.wait_with_output().expect("cli should finish");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("REDIRECT:https://example.com/docs"));
    assert!(stdout.contains("[bot] Opening the documentation for you, [name]."));
    assert!(stdout.contains("[END]"));
}

#[test]
fn play_reports_load_error_protocol() {
    let bin = env!("CARGO_BIN_EXE_dialogtree");
    let output = Command::new(bin)
        .arg("play")
        .arg("--tree")
        .arg(std::env::temp_dir().join("dialogtree-rs-definitely-missing.json"))
        .stdin(Stdio::null())
        .output()
        .expect("cli should execute");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:CLI_SOURCE_NOT_FOUND"));
}
