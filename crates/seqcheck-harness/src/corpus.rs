//! Fixture corpus discovery.
//!
//! A fixture is a pair of files in one directory: `<name>.in` holds the raw
//! bytes injected into the terminal, `<name>.text` the exact transcript the
//! terminal is expected to reflect back. Discovery only looks at inputs;
//! a missing transcript surfaces when the case runs, not here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of input fixtures.
pub const INPUT_EXT: &str = "in";

/// Extension of golden expected transcripts.
pub const EXPECTED_EXT: &str = "text";

/// One conformance test case. Immutable after discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCase {
    name: String,
    input_path: PathBuf,
}

impl FixtureCase {
    /// Build a case from its input path; the name is the file stem.
    #[must_use]
    pub fn new(input_path: PathBuf) -> Self {
        let name = input_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, input_path }
    }

    /// Case name: report label and artifact file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the raw bytes to inject.
    #[must_use]
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Location of the golden transcript. Always derived from the input
    /// path (same directory and stem, transcript extension) — never stored.
    #[must_use]
    pub fn expected_path(&self) -> PathBuf {
        self.input_path.with_extension(EXPECTED_EXT)
    }
}

/// Scan `dir` for input fixtures, ordered byte-wise by full path.
///
/// The sort fixes both execution and report order, and is stable across
/// platforms and repeated scans of an unchanged directory.
///
/// # Errors
///
/// Fails when the directory cannot be read.
pub fn discover(dir: &Path) -> io::Result<Vec<FixtureCase>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(INPUT_EXT) && path.is_file() {
            inputs.push(path);
        }
    }
    // OsStr ordering is byte-wise lexicographic; component-wise PathBuf
    // ordering is not guaranteed identical across platforms.
    inputs.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(inputs.into_iter().map(FixtureCase::new).collect())
}
