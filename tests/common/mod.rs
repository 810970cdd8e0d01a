use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run syllabus commands with an isolated config home
pub struct SyllabusTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl SyllabusTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        // Find the binary - check both debug and release
        let binary_path = if cfg!(debug_assertions) {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/syllabus")
        } else {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/release/syllabus")
        };

        // If the above doesn't exist, try the alternative
        let binary_path = if std::path::Path::new(binary_path).exists() {
            binary_path.to_string()
        } else {
            // Fallback to debug
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/syllabus").to_string()
        };

        SyllabusTest {
            temp_dir,
            binary_path,
        }
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("SYLLABUS_CONFIG_DIR", self.temp_dir.path())
            .env_remove("SYLLABUS_API_URL")
            .env_remove("SYLLABUS_API_TOKEN");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute syllabus command")
    }

    pub fn run_with_api(&self, api_url: &str, args: &[&str]) -> Output {
        self.command(args)
            .env("SYLLABUS_API_URL", api_url)
            .output()
            .expect("Failed to execute syllabus command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
