//! Snapshot file naming.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use dicty_core::StepId;

/// Roster file extension.
pub const ROSTER_EXT: &str = "cells";
/// Field matrix file extension.
pub const FIELD_EXT: &str = "camp";
/// Run parameter file extension.
pub const PARAMS_EXT: &str = "playground";

/// The three files that make up one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotPaths {
    /// `{prefix}.cells`
    pub roster: PathBuf,
    /// `{prefix}.camp`
    pub field: PathBuf,
    /// `{prefix}.playground`
    pub params: PathBuf,
}

impl SnapshotPaths {
    /// Paths for an explicit prefix such as `out/run_0100`.
    pub fn from_prefix(prefix: impl AsRef<Path>) -> Self {
        let prefix = prefix.as_ref();
        Self {
            roster: with_suffix(prefix, ROSTER_EXT),
            field: with_suffix(prefix, FIELD_EXT),
            params: with_suffix(prefix, PARAMS_EXT),
        }
    }

    /// Paths for `base` at `step`: prefix `{base}_{step:04}`.
    pub fn for_step(base: impl AsRef<Path>, step: StepId) -> Self {
        let mut prefix = base.as_ref().as_os_str().to_owned();
        prefix.push(format!("_{:04}", step.0));
        Self::from_prefix(PathBuf::from(prefix))
    }
}

// Appends rather than replaces, so prefixes containing dots survive.
fn with_suffix(prefix: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(prefix.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_prefix_is_zero_padded() {
        let p = SnapshotPaths::for_step("out/run", StepId(30));
        assert_eq!(p.roster, PathBuf::from("out/run_0030.cells"));
        assert_eq!(p.field, PathBuf::from("out/run_0030.camp"));
        assert_eq!(p.params, PathBuf::from("out/run_0030.playground"));
    }

    #[test]
    fn wide_steps_are_not_truncated() {
        let p = SnapshotPaths::for_step("r", StepId(123_456));
        assert_eq!(p.field, PathBuf::from("r_123456.camp"));
    }

    #[test]
    fn dotted_prefix_keeps_its_dots() {
        let p = SnapshotPaths::from_prefix("a.b/run.v2_0010");
        assert_eq!(p.params, PathBuf::from("a.b/run.v2_0010.playground"));
    }
}
