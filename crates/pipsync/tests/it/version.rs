use crate::common::pipsync_command;

#[test]
fn version_flag_prints_version_and_exits_zero() {
    let output = pipsync_command()
        .arg("--version")
        .output()
        .expect("Failed to execute pipsync");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(
        stdout.trim(),
        format!("pipsync {}", env!("CARGO_PKG_VERSION"))
    );
}
