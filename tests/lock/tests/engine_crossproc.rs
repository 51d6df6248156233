//! Cross-process determinism: spawns the `engine_fixture` binary under four
//! environment variants, each in its own working directory, and asserts all
//! produce identical output.

use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("engine_fixture");
    path.to_string_lossy().to_string()
}

fn run_variant(env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let work_dir = tempfile::tempdir().expect("tempdir");

    let mut command = Command::new(&bin);
    command.current_dir(work_dir.path());

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin} (overrides={env_overrides:?}): {e}"));

    assert!(
        output.status.success(),
        "engine_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let baseline = run_variant(&[]);

    assert!(
        baseline.contains("best=(4, 4, 14)\n"),
        "unexpected best match: {baseline}"
    );
    assert!(baseline.contains("first_enumerated=true\n"));
    assert!(baseline.contains("second_enumerated=false\n"));
    assert!(baseline.contains("second_best=(4, 4, 14)\n"));
    assert!(
        baseline.contains("log_digest=sha256:"),
        "baseline output missing log_digest"
    );
    assert!(
        baseline.contains("manifest_digest=sha256:"),
        "baseline output missing manifest_digest"
    );

    let variants: &[&[(&str, &str)]] = &[
        &[("LC_ALL", "C")],
        &[("LANG", "en_US.UTF-8"), ("LC_ALL", "en_US.UTF-8")],
        &[("RUST_LOG", "trace"), ("TZ", "Pacific/Chatham")],
    ];
    for overrides in variants {
        assert_eq!(
            run_variant(overrides),
            baseline,
            "output diverged under {overrides:?}"
        );
    }
}
