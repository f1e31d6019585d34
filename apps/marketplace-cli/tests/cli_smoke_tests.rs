//! CLI smoke tests for the marketplace-cli binary
//!
//! Each test that touches state points `app.home_dir` at a temp directory,
//! so the file store and log files never leave it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper to run the marketplace-cli binary with given arguments
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_marketplace-cli"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute marketplace-cli")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Temp home plus a config file that points at it.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new(extra: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let home = dir.path().join("home");
        let config = dir.path().join("config.yaml");
        let content = format!(
            r#"
app:
  home_dir: "{home}"

logging:
  default:
    console_level: "off"
    file: "logs/marketplace.log"
    file_level: "debug"
{extra}"#,
            home = home.to_string_lossy().replace('\\', "/"),
        );
        std::fs::write(&config, content).expect("Failed to write config file");
        Self { dir, config }
    }

    fn run(&self, args: &[&str]) -> Output {
        let config = self.config.to_str().expect("utf-8 path");
        let mut full = vec!["--config", config];
        full.extend_from_slice(args);
        run_cli(&full)
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            stderr(&output)
        );
        stdout(&output)
    }

    fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }
}

#[test]
fn test_cli_help_command() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let out = stdout(&output);
    assert!(out.contains("marketplace-cli"), "Should contain binary name");
    assert!(out.contains("Usage:"), "Should contain usage information");
    for command in ["register", "login", "projects", "dashboard", "skills", "check"] {
        assert!(out.contains(command), "Should list '{command}'");
    }
    assert!(out.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_cli(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let out = stdout(&output);
    assert!(out.contains("marketplace-cli"));
    assert!(out.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_cli(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    assert!(stderr(&output).contains("error"));
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_cli(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let err = stderr(&output);
    assert!(err.contains("config file not found"), "{err}");
    assert_eq!(err.trim().lines().count(), 1, "one-line error: {err}");
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_cli(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
    assert!(stderr(&output).contains("yaml"), "{}", stderr(&output));
}

#[test]
fn test_cli_check_with_valid_config() {
    let ws = Workspace::new("");
    let out = ws.run_ok(&["check"]);

    assert!(out.contains("Configuration check passed"), "{out}");
    assert!(ws.home().is_dir(), "home_dir should be created");
}

#[test]
fn test_cli_without_subcommand_runs_check() {
    let ws = Workspace::new("");
    let out = ws.run_ok(&[]);

    assert!(out.contains("Configuration check passed"), "{out}");
    assert!(!ws.home().join("store").exists(), "check should not open the store");
}

#[test]
fn test_cli_check_rejects_unknown_module_keys() {
    let ws = Workspace::new("modules:\n  marketplace:\n    colour: blue\n");
    let output = ws.run(&["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("marketplace"), "{}", stderr(&output));
}

#[test]
fn test_cli_print_config() {
    let ws = Workspace::new("");
    let out = ws.run_ok(&["--print-config", "--mock"]);

    assert!(out.contains("backend: memory"), "{out}");
}

#[test]
fn test_cli_end_to_end_session_survives_invocations() {
    let ws = Workspace::new("");

    let out = ws.run_ok(&[
        "register",
        "--name",
        "Acme",
        "--email",
        "ops@acme.test",
        "--role",
        "client",
        "--password",
        "pw",
    ]);
    assert!(out.contains("Registered and logged in as Acme"), "{out}");

    let out = ws.run_ok(&["whoami"]);
    assert!(out.contains("ops@acme.test"), "{out}");
    assert!(out.contains("Your Company Name"), "{out}");

    let out = ws.run_ok(&[
        "projects",
        "post",
        "--description",
        "Need a logo",
        "--budget",
        "100",
    ]);
    assert!(out.contains("Posted project 4"), "{out}");

    let out = ws.run_ok(&["projects", "list", "--budget", "500-1000"]);
    assert!(out.contains("Mobile App UI Design"), "{out}");
    assert!(!out.contains("Project 4"), "{out}");

    let out = ws.run_ok(&["dashboard"]);
    assert!(out.contains("total:     1"), "{out}");
    assert!(out.contains("earnings:  $0"), "{out}");

    ws.run_ok(&["logout"]);
    let out = ws.run_ok(&["whoami"]);
    assert!(out.contains("Not logged in"), "{out}");

    let output = ws.run(&["login", "--email", "ops@acme.test", "--password", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unauthorized"), "{}", stderr(&output));

    assert!(store_file(&ws.home(), "users").is_file());
    assert!(ws.home().join("logs").is_dir());
}

#[test]
fn test_cli_freelancer_skills_and_avatar() {
    let ws = Workspace::new("");
    ws.run_ok(&[
        "register",
        "--name",
        "Dev",
        "--email",
        "dev@example.com",
        "--role",
        "freelancer",
        "--password",
        "pw",
    ]);

    let out = ws.run_ok(&["skills", "add", "Rust"]);
    assert!(out.contains("Skills: Rust"), "{out}");
    let out = ws.run_ok(&["skills", "add", "Go"]);
    assert!(out.contains("Skills: Rust, Go"), "{out}");
    let out = ws.run_ok(&["skills", "remove", "Rust"]);
    assert!(out.contains("Skills: Go"), "{out}");

    let avatar = ws.dir.path().join("me.png");
    std::fs::write(&avatar, [0x89, b'P', b'N', b'G']).unwrap();
    let out = ws.run_ok(&["profile", "avatar", avatar.to_str().unwrap()]);
    assert!(out.contains("Avatar updated"), "{out}");

    let out = ws.run_ok(&["whoami"]);
    assert!(out.contains("avatar: set"), "{out}");
}

#[test]
fn test_cli_mock_store_keeps_nothing() {
    let ws = Workspace::new("");
    ws.run_ok(&[
        "--mock",
        "register",
        "--name",
        "Temp",
        "--email",
        "t@example.com",
        "--role",
        "client",
        "--password",
        "pw",
    ]);

    let out = ws.run_ok(&["whoami"]);
    assert!(out.contains("Not logged in"), "{out}");
    assert!(!store_file(&ws.home(), "users").exists());
}

fn store_file(home: &Path, key: &str) -> PathBuf {
    home.join("store").join(format!("{key}.json"))
}
