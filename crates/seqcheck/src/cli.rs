#![forbid(unsafe_code)]

//! Command-line argument parsing for the conformance harness.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `SEQCHECK_*` prefix;
//! explicit flags win over the environment.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
seqcheck — terminal-emulator conformance harness

USAGE:
    seqcheck [OPTIONS] [FIXTURE_DIR]

Feeds recorded escape-sequence fixtures to the controlling terminal, reads
the terminal's reflected output back from the same device, and diffs it
byte-for-byte against golden transcripts.

OPTIONS:
    --fixtures=DIR       Directory of *.in / *.text fixture pairs (default: fixtures)
    --failures=DIR       Directory for mismatch artifacts (default: failures)
    --rows-per-page=N    Report rows between pagination pauses, 0 disables (default: 25)
    --log=PATH           Append tracing diagnostics to PATH (never the terminal)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    SEQCHECK_FIXTURES        Override the fixture directory
    SEQCHECK_FAILURES        Override the artifact directory
    SEQCHECK_ROWS_PER_PAGE   Override --rows-per-page
    SEQCHECK_LOG             Override --log
    SEQCHECK_LOG_FILTER      Tracing filter directives (default: debug)

The harness must run with stdin and stdout attached to a real interactive
terminal; pipes and redirections are refused.";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Directory holding the fixture corpus.
    pub fixtures: PathBuf,
    /// Directory for mismatch artifacts.
    pub failures: PathBuf,
    /// Report rows between pagination pauses; 0 disables pagination.
    pub rows_per_page: usize,
    /// Tracing log file, when diagnostics are wanted.
    pub log: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            fixtures: PathBuf::from("fixtures"),
            failures: PathBuf::from("failures"),
            rows_per_page: 25,
            log: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version`, or malformed input.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("seqcheck {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = get_env("SEQCHECK_FIXTURES")
            && !val.trim().is_empty()
        {
            opts.fixtures = PathBuf::from(val);
        }
        if let Some(val) = get_env("SEQCHECK_FAILURES")
            && !val.trim().is_empty()
        {
            opts.failures = PathBuf::from(val);
        }
        if let Some(val) = get_env("SEQCHECK_ROWS_PER_PAGE")
            && let Ok(n) = val.parse()
        {
            opts.rows_per_page = n;
        }
        if let Some(val) = get_env("SEQCHECK_LOG")
            && !val.trim().is_empty()
        {
            opts.log = Some(PathBuf::from(val));
        }

        let mut positional_seen = false;
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--fixtures=") {
                        opts.fixtures = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--failures=") {
                        opts.failures = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--rows-per-page=") {
                        match val.parse() {
                            Ok(n) => opts.rows_per_page = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--rows-per-page",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log = Some(PathBuf::from(val));
                    } else if !other.starts_with('-') && !positional_seen {
                        opts.fixtures = PathBuf::from(other);
                        positional_seen = true;
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        Ok(opts)
    }
}
