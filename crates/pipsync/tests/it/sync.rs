use regex::Regex;

use crate::common::TestProject;

#[test]
fn generated_mode_writes_requirements_from_direct_file() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\n");

    let output = project
        .command()
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0), "stderr: {stderr}");
    assert!(stderr.contains("Syncing file:"), "got: {stderr}");

    // The direct input is untouched; the generated file holds the closure.
    assert_eq!(project.read("requirements.direct.txt"), "requests==2.20.0\n");
    insta::assert_snapshot!(project.read("requirements.txt"), @r"
    certifi==2020.12.5
    requests==2.25.1
    urllib3==1.26.4
    ");
}

#[test]
fn summary_counts_synced_and_skipped_files() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\n");
    project.write("services/api/requirements.direct.txt", "\n");

    let output = project
        .command()
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    let summary = Regex::new(r"Synced (\d+) files \| Skipped (\d+) files").unwrap();
    let captures = summary.captures(&stderr).expect("missing summary line");
    assert_eq!(&captures[1], "1");
    assert_eq!(&captures[2], "1");
}

#[test]
fn in_place_mode_rewrites_requirements_files() {
    let project = TestProject::new();
    project.write("requirements.txt", "requests==2.20.0\norphan-pkg==1.0\n");

    let output = project
        .command()
        .arg("--in-place")
        .output()
        .expect("Failed to execute pipsync");

    assert_eq!(output.status.code(), Some(0));
    // Non-destructive default: the orphan survives with its original line.
    insta::assert_snapshot!(project.read("requirements.txt"), @r"
    certifi==2020.12.5
    orphan-pkg==1.0
    requests==2.25.1
    urllib3==1.26.4
    ");
}

#[test]
fn in_place_force_removes_and_reports_orphans() {
    let project = TestProject::new();
    project.write("requirements.txt", "requests==2.20.0\norphan-pkg==1.0\n");

    let output = project
        .command()
        .args(["--in-place", "--force"])
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stderr.contains("Force Sync: package 'orphan-pkg' removed"),
        "got: {stderr}"
    );
    insta::assert_snapshot!(project.read("requirements.txt"), @r"
    certifi==2020.12.5
    requests==2.25.1
    urllib3==1.26.4
    ");
}

#[test]
fn orphan_removal_wording_in_generated_mode() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\norphan-pkg==1.0\n");

    let output = project
        .command()
        .arg("--verbose")
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    // Generated mode reports a manifest miss, not a forced removal.
    assert!(
        stderr.contains("Package 'orphan-pkg' not found in Pipfile"),
        "got: {stderr}"
    );
    assert!(!stderr.contains("Force Sync"), "got: {stderr}");
    assert!(!project.read("requirements.txt").contains("orphan-pkg"));
}

#[test]
fn skipped_dev_wording_without_dev_flag() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\npytest==6.0.0\n");

    let output = project
        .command()
        .arg("--verbose")
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    // A dev-only entry gets the dev wording, not the manifest-miss wording.
    assert!(
        stderr.contains("Skipped dev package 'pytest'"),
        "got: {stderr}"
    );
    assert!(
        !stderr.contains("Package 'pytest' not found in Pipfile"),
        "got: {stderr}"
    );
    assert!(!project.read("requirements.txt").contains("pytest"));
}

#[test]
fn graph_miss_warns_and_keeps_the_root() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\n");
    // Empty the graph so the root itself cannot be expanded.
    project.write("graph.json", "[]");

    let output = project
        .command()
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stderr.contains("package 'requests' not found in dependency graph"),
        "got: {stderr}"
    );
    // Only the root survives, re-pinned from the lockfile.
    insta::assert_snapshot!(project.read("requirements.txt"), @"requests==2.25.1");
}

#[test]
fn dev_flag_includes_dev_packages() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\npytest==6.0.0\n");

    let output = project
        .command()
        .arg("--dev")
        .output()
        .expect("Failed to execute pipsync");

    assert_eq!(output.status.code(), Some(0));
    insta::assert_snapshot!(project.read("requirements.txt"), @r"
    certifi==2020.12.5
    pluggy==0.13.1
    pytest==6.2.3
    requests==2.25.1
    urllib3==1.26.4
    ");
}

#[test]
fn excluded_directories_are_not_synced() {
    let project = TestProject::new();
    project.write("vendor/requirements.direct.txt", "requests==2.20.0\n");
    project.write("app/requirements.direct.txt", "requests==2.20.0\n");

    let output = project
        .command()
        .args(["--exclude", "vendor"])
        .output()
        .expect("Failed to execute pipsync");

    assert_eq!(output.status.code(), Some(0));
    assert!(project.root().join("app/requirements.txt").is_file());
    assert!(!project.root().join("vendor/requirements.txt").exists());
}

#[test]
fn missing_lockfile_exits_one() {
    let project = TestProject::new();
    fs_err::remove_file(project.root().join("Pipfile.lock")).unwrap();

    let output = project
        .command()
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Pipfile.lock not found"), "got: {stderr}");
}

#[test]
fn lockfile_path_argument_is_accepted() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\n");

    // Point PATH at the lockfile itself instead of the project directory.
    let mut command = crate::common::pipsync_command();
    command.arg(project.root().join("Pipfile.lock"));
    command.env(
        "PIPSYNC_GRAPH_COMMAND",
        format!("cat {}", project.root().join("graph.json").display()),
    );
    let output = command.output().expect("Failed to execute pipsync");

    assert_eq!(output.status.code(), Some(0));
    assert!(project.root().join("requirements.txt").is_file());
}

#[test]
fn graph_command_failure_is_fatal() {
    let project = TestProject::new();
    project.write("requirements.direct.txt", "requests==2.20.0\n");

    let output = project
        .command()
        .env("PIPSYNC_GRAPH_COMMAND", "false")
        .output()
        .expect("Failed to execute pipsync");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr.contains("failed to obtain the dependency graph"),
        "got: {stderr}"
    );
}
