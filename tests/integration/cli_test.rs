use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

// Nothing listens on the discard port.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn folio_command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env("FOLIO_API_URL", UNREACHABLE_API)
        .env_remove("API_URL")
        .env_remove("RUST_LOG")
        .env_remove("FOLIO_LOG_LEVEL");
    cmd
}

fn run_folio(args: &[&str]) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    folio_command(home.path())
        .args(args)
        .output()
        .expect("Failed to execute folio command")
}

fn run_folio_with_env(args: &[&str], env_vars: Vec<(&str, &str)>) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let mut cmd = folio_command(home.path());
    cmd.args(args);
    for (key, value) in env_vars {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute folio command")
}

fn run_folio_with_stdin(args: &[&str], stdin: &str) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let mut child = folio_command(home.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn folio command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for folio")
}

fn output_to_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_to_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

mod version_command_tests {
    use super::*;

    #[test]
    fn test_version_command_basic() {
        let output = run_folio(&["version"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "version command should succeed");
        assert!(stdout.contains("folio"));
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_version_command_detailed() {
        let output = run_folio(&["version", "--detailed"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("Folio Version Information"));
        assert!(stdout.contains("/api/chat"));
    }

    #[test]
    fn test_help_lists_commands() {
        let output = run_folio(&["--help"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        for command in ["chat", "resume", "contact", "status", "version"] {
            assert!(stdout.contains(command), "help should mention {}", command);
        }
    }
}

mod resume_command_tests {
    use super::*;

    #[test]
    fn test_bundled_resume_json() {
        let output = run_folio(&["resume", "--source", "bundled", "--format", "json"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "stderr: {}", stderr_to_string(&output));
        let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
        assert!(value["name"].is_string());
        assert!(value["skills"]["frontend"].is_array());
        assert!(value["contact"]["email"].is_string());
    }

    #[test]
    fn test_skills_section_text() {
        let output = run_folio(&["resume", "--section", "skills"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("Tech Stack"));
        assert!(stdout.contains("FRONTEND"));
        assert!(stdout.contains("DEVOPS & TOOLS"));
    }

    #[test]
    fn test_full_resume_text() {
        let output = run_folio(&["resume"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        for heading in ["About", "Projects", "Experience", "Education", "Contact"] {
            assert!(stdout.contains(heading), "missing section {}", heading);
        }
    }

    #[test]
    fn test_unknown_section_fails() {
        let output = run_folio(&["resume", "--section", "hobbies"]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("Unknown section"));
    }

    #[test]
    fn test_resume_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "File Person",
                "title": "Tester",
                "skills": {{"languages": ["Rust"]}},
                "contact": {{"email": "file@example.com"}}
            }}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let output = run_folio(&["resume", "--path", path, "--section", "skills"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "stderr: {}", stderr_to_string(&output));
        assert!(stdout.contains("LANGUAGES"));
        assert!(stdout.contains("Rust"));
    }

    #[test]
    fn test_missing_resume_file_fails() {
        let output = run_folio(&["resume", "--path", "/nonexistent/resume.json"]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("Resume unavailable"));
    }

    #[test]
    fn test_remote_resume_unreachable_fails() {
        let output = run_folio(&["resume", "--source", "remote"]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("Resume unavailable"));
    }
}

mod contact_command_tests {
    use super::*;

    #[test]
    fn test_invalid_contact_reports_fields() {
        let output = run_folio(&["contact", "--name", "Ann", "--email", "ann@x", "--message", "hi"]);
        let stdout = output_to_string(&output);

        assert!(!output.status.success());
        assert!(stdout.contains("Invalid email format"));
        assert!(stdout.contains("Message must be at least 10 characters"));
        assert!(!stdout.contains("Name is required"));
    }

    #[test]
    fn test_valid_contact_prints_mailto() {
        let output = run_folio(&[
            "contact",
            "--name",
            "Ann",
            "--email",
            "ann@x.io",
            "--message",
            "Hello there, friend",
            "--to",
            "me@example.com",
        ]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("mailto:me@example.com?subject=Portfolio%20Contact%20from%20Ann"));
        assert!(stdout.contains("&body=Name%3A%20Ann%0AEmail%3A%20ann%40x.io"));
    }

    #[test]
    fn test_contact_defaults_to_resume_email() {
        let output = run_folio(&[
            "contact",
            "-n",
            "Ann",
            "-e",
            "ann@x.io",
            "-m",
            "Hello there, friend",
        ]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("mailto:alex.morgan@example.com?subject="));
    }
}

mod chat_command_tests {
    use super::*;

    #[test]
    fn test_one_shot_unreachable_backend() {
        let output = run_folio(&["chat", "--message", "hi"]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output)
            .contains("Unable to connect to the server. Please try again later."));
    }

    #[test]
    fn test_one_shot_blank_message() {
        let output = run_folio(&["chat", "--message", "   "]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("E4001"));
    }

    #[test]
    fn test_interactive_quit() {
        let output = run_folio_with_stdin(&["chat"], "/help\n/quit\n");
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("Portfolio Assistant"));
        assert!(stdout.contains("💼 Skills & expertise"));
        assert!(stdout.contains("/retry"));
    }

    #[test]
    fn test_interactive_failure_is_shown_with_retry_hint() {
        let output = run_folio_with_stdin(&["chat"], "hello\n");
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("hello"));
        assert!(stdout.contains("Unable to connect to the server"));
        assert!(stdout.contains("/retry"));
    }
}

mod status_command_tests {
    use super::*;

    #[test]
    fn test_status_unreachable_json() {
        let output = run_folio(&["status", "--format", "json"]);
        let stdout = output_to_string(&output);

        assert!(!output.status.success());
        let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
        assert_eq!(value["reachable"], false);
        assert_eq!(value["api_url"], UNREACHABLE_API);
    }

    #[test]
    fn test_status_unreachable_text() {
        let output = run_folio(&["status"]);

        assert!(!output.status.success());
        assert!(output_to_string(&output).contains("unreachable"));
        assert!(stderr_to_string(&output).contains("E2003"));
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_invalid_api_url_rejected() {
        let output = run_folio_with_env(&["version"], vec![("FOLIO_API_URL", "ftp://nope")]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("api.base_url"));
    }

    #[test]
    fn test_rust_log_target_filter_accepted() {
        let output = run_folio_with_env(&["version"], vec![("RUST_LOG", "folio_core")]);

        assert!(output.status.success(), "stderr: {}", stderr_to_string(&output));
        assert!(output_to_string(&output).contains("folio"));
    }

    #[test]
    fn test_api_url_flag_overrides_env() {
        let output = run_folio(&[
            "status",
            "--format",
            "json",
            "--api-url",
            "http://127.0.0.1:9/",
        ]);
        let stdout = output_to_string(&output);

        let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
        assert_eq!(value["api_url"], "http://127.0.0.1:9");
    }
}
