mod error;
mod progress;

pub use error::print_error;
pub use progress::Progress;

use std::io::{self, IsTerminal, Write};

/// What kind of terminal the process is talking to; drives banner and
/// progress output.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: io::stderr().is_terminal(),
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        if quiet {
            self.interactive = false;
        }
        self
    }
}

const BANNER: &str = r"
   ┌─────────────────────────────────────────┐
   │  pforge · protein-ligand fingerprints   │
   └─────────────────────────────────────────┘
";

pub fn print_banner() {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", BANNER.trim_end());
}

pub fn banner_for_help() -> &'static str {
    BANNER
}

/// Forwards decoder/normalizer warnings to the user without aborting.
pub fn print_warnings(warnings: &[String]) {
    let mut stderr = io::stderr().lock();
    for warning in warnings {
        let _ = writeln!(stderr, "  \x1b[33m!\x1b[0m {}", warning);
    }
}
