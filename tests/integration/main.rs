//! Integration tests for Csup

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn csup() -> Command {
        cargo_bin_cmd!("csup")
    }

    /// Write a config that keeps every path inside the temp dir
    fn write_config(temp: &TempDir) -> std::path::PathBuf {
        let config_path = temp.path().join("config.toml");
        let content = format!(
            r#"
[launcher]
bin_dir = "{bin}"

[cache]
dir = "{cache}"
store_root = "{store}"
"#,
            bin = temp.path().join("bin").display(),
            cache = temp.path().join("cache").display(),
            store = temp.path().join("store").display(),
        );
        std::fs::write(&config_path, content).unwrap();
        config_path
    }

    fn seed_cache_dir(temp: &TempDir) {
        let cache = temp.path().join("cache");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(cache.join("artifact.jar"), b"jar bytes").unwrap();
    }

    #[test]
    fn help_displays() {
        csup()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Coursier toolchain"));
    }

    #[test]
    fn version_displays() {
        csup()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("csup"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        csup()
            .args(["config", "path", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        csup()
            .args(["config", "show", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("[launcher]"))
            .stdout(predicate::str::contains("sonatype:snapshots"));
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        csup()
            .args(["cache", "list", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries found"));
    }

    #[test]
    fn cache_save_then_restore_roundtrip() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        seed_cache_dir(&temp);

        csup()
            .args(["cache", "save", "--hash", "abc", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("saved as coursier-cache-abc-"));

        std::fs::remove_dir_all(temp.path().join("cache")).unwrap();

        // A new run gets a new timestamped primary key; the hash
        // fallback carries the restore.
        csup()
            .args(["cache", "restore", "--hash", "abc", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("restored from coursier-cache-abc-"));

        assert!(temp.path().join("cache").join("artifact.jar").exists());
    }

    #[test]
    fn cache_restore_miss_still_succeeds() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        csup()
            .args(["cache", "restore", "--hash", "zzz", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("miss"));
    }

    #[test]
    fn cache_requires_hash_source() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        csup()
            .args(["cache", "restore", "--config"])
            .arg(&config_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("--hash"));
    }

    #[test]
    fn cache_list_shows_saved_entry() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        seed_cache_dir(&temp);

        csup()
            .args(["cache", "save", "--hash", "abc", "--config"])
            .arg(&config_path)
            .assert()
            .success();

        csup()
            .args(["cache", "list", "--format", "plain", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("coursier-cache-abc-"));
    }

    #[test]
    fn remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);

        for _ in 0..2 {
            csup()
                .args(["remove", "--config"])
                .arg(&config_path)
                .assert()
                .success()
                .stdout(predicate::str::contains("best effort"));
        }
    }

    #[test]
    fn launch_empty_version_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        csup()
            .args(["launch", "scalafmt", "--app-version", "  ", "--config"])
            .arg(&config_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("must not be empty"));
    }

    #[cfg(unix)]
    #[test]
    fn launch_without_install_fails_with_command_error() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);
        // Empty bin dir and a PATH without cs: spawn must fail loudly
        csup()
            .args(["launch", "scalafmt", "--config"])
            .arg(&config_path)
            .env("PATH", temp.path().join("bin"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Command failed"));
    }

    #[cfg(unix)]
    #[test]
    fn launch_failure_names_qualified_app() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(&temp);

        // Fake launcher in the configured bin dir that always fails
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        write_fake_launcher(&bin.join("cs"), "#!/bin/sh\nexit 9\n");

        csup()
            .args([
                "launch",
                "scalafmt",
                "--app-version",
                "3.8.1",
                "--config",
            ])
            .arg(&config_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("scalafmt:3.8.1"));
    }

    #[cfg(unix)]
    fn write_fake_launcher(path: &Path, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, script).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(not(unix))]
    fn write_fake_launcher(_path: &Path, _script: &str) {}
}
