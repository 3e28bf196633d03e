//! lctl - a context-aware command-line client for lakeFS

use std::process::ExitCode;

use lctl::ui::output;

fn main() -> ExitCode {
    match lctl::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
