//! Integration tests for Wheelhouse

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn wheelhouse(project: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("wheelhouse");
        cmd.current_dir(project)
            .env_remove("WHEELHOUSE_PINFILE")
            .env_remove("WHEELHOUSE_CONFIG")
            // Point at a nonexistent config so the user's global settings
            // cannot leak into assertions
            .args(["--config", "no-such-config.toml"]);
        cmd
    }

    fn write_pinfile(dir: &Path, body: &str) {
        fs::write(dir.join("wheelhouse.toml"), body).unwrap();
    }

    const PINNED_SIX: &str = r#"
wheel_dir = "wheels"

[[wheel]]
name = "six"
version = "1.10.0"
source = "https://files.example/six-1.10.0.tar.gz"
"#;

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        wheelhouse(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("prebuilt wheels for pinned"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        wheelhouse(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("wheelhouse"));
    }

    #[test]
    fn missing_pinfile_is_a_fault() {
        let temp = TempDir::new().unwrap();
        wheelhouse(temp.path())
            .arg("build-wheels")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Pinfile not found"));
    }

    #[test]
    fn check_missing_wheel_exits_one() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);

        wheelhouse(temp.path())
            .args(["build-wheels", "--check"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Wheel for six 1.10.0 is missing"));
    }

    #[test]
    fn check_does_not_create_wheel_dir() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);

        wheelhouse(temp.path())
            .args(["build-wheels", "--check"])
            .assert()
            .code(1);

        assert!(!temp.path().join("wheels").exists());
    }

    #[test]
    fn check_cached_wheel_succeeds() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);
        let wheels = temp.path().join("wheels");
        fs::create_dir_all(&wheels).unwrap();
        fs::write(wheels.join("six-1.10.0-py2.py3-none-any.whl"), b"wheel").unwrap();

        wheelhouse(temp.path())
            .args(["build-wheels", "--check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("exists"));
    }

    #[test]
    fn check_silent_emits_nothing() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);
        let wheels = temp.path().join("wheels");
        fs::create_dir_all(&wheels).unwrap();
        fs::write(wheels.join("six-1.10.0-py2.py3-none-any.whl"), b"wheel").unwrap();

        wheelhouse(temp.path())
            .args(["build-wheels", "--check", "--silent"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn build_skips_cached_wheel() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);
        let wheels = temp.path().join("wheels");
        fs::create_dir_all(&wheels).unwrap();
        fs::write(wheels.join("six-1.10.0-py2.py3-none-any.whl"), b"wheel").unwrap();

        wheelhouse(temp.path())
            .arg("build-wheels")
            .assert()
            .success()
            .stdout(predicate::str::contains("*** Already built:"));
    }

    #[test]
    fn range_pin_is_a_domain_error() {
        let temp = TempDir::new().unwrap();
        write_pinfile(
            temp.path(),
            r#"
[[wheel]]
name = "flask"
version = ">=1.0"
source = "https://files.example/flask.tar.gz"
"#,
        );

        wheelhouse(temp.path())
            .args(["build-wheels", "--check"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("constraint was: flask >=1.0"));
    }

    #[test]
    fn conflicting_pins_are_a_domain_error() {
        let temp = TempDir::new().unwrap();
        write_pinfile(
            temp.path(),
            r#"
[[wheel]]
name = "My-Pkg"
version = "1.0"
source = "https://files.example/my_pkg-1.0.tar.gz"

[[wheel]]
name = "my_pkg"
version = "2.0"
source = "https://files.example/my_pkg-2.0.tar.gz"
"#,
        );

        wheelhouse(temp.path())
            .args(["build-wheels", "--check"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "Incompatible requirements found: My-Pkg==1.0 and my_pkg==2.0",
            ));
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);

        wheelhouse(temp.path())
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached wheels"));
    }

    #[test]
    fn cache_list_table() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);
        let wheels = temp.path().join("wheels");
        fs::create_dir_all(&wheels).unwrap();
        fs::write(wheels.join("six-1.10.0-py2.py3-none-any.whl"), b"wheel").unwrap();

        wheelhouse(temp.path())
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("NAME").and(predicate::str::contains("six")));
    }

    #[test]
    fn cache_list_json() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);
        let wheels = temp.path().join("wheels");
        fs::create_dir_all(&wheels).unwrap();
        fs::write(wheels.join("six-1.10.0-py2.py3-none-any.whl"), b"wheel").unwrap();

        wheelhouse(temp.path())
            .args(["cache", "list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"version\": \"1.10.0\""));
    }

    #[test]
    fn cache_info_reports_status() {
        let temp = TempDir::new().unwrap();
        write_pinfile(temp.path(), PINNED_SIX);

        wheelhouse(temp.path())
            .args(["cache", "info"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Using indexes:")
                    .and(predicate::str::contains("https://pypi.org/simple"))
                    .and(predicate::str::contains("missing")),
            );
    }
}
