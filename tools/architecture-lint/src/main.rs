//! `architecture-lint [BACKEND_DIR]`
//!
//! Lints the backend at `BACKEND_DIR`, or the workspace's `backend/` when no
//! directory is given, and exits non-zero on any boundary violation.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let backend_dir = env::args_os()
        .nth(1)
        .map_or_else(workspace_backend_dir, PathBuf::from);

    match architecture_lint::lint_backend_sources(&backend_dir) {
        Ok(checked) => {
            let _ = writeln!(
                io::stdout().lock(),
                "architecture lint: {checked} files within their boundaries"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = writeln!(
                io::stderr().lock(),
                "architecture lint failed for {}:\n{err}",
                backend_dir.display()
            );
            ExitCode::FAILURE
        }
    }
}

/// `tools/architecture-lint` sits two levels below the workspace root.
fn workspace_backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("backend")
}
