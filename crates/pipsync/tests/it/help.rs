use crate::common::pipsync_command;

#[test]
fn help_lists_every_flag() {
    let output = pipsync_command()
        .arg("--help")
        .output()
        .expect("Failed to execute pipsync");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Sync requirements.txt files with a project Pipfile."));
    for flag in [
        "--exclude", "--force", "--in-place", "--dev", "--verbose", "--quiet",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in help:\n{stdout}");
    }
}

#[test]
fn short_help_flag_works() {
    let output = pipsync_command()
        .arg("-h")
        .output()
        .expect("Failed to execute pipsync");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
}
