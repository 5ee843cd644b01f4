use std::process::Command;

#[test]
fn missing_mesh_exits_with_status_one() {
    let resources = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_wave"))
        .arg("--mesh")
        .arg("missing.raw")
        .arg("--resources")
        .arg(resources.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.raw"), "stderr: {stderr}");
}
