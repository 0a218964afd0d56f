//! Snapshot export.
//!
//! The `write_*` functions are generic over `W: Write` so tests can use
//! `Vec<u8>`; [`SnapshotWriter`] opens the three files for a step and
//! calls them with buffered file handles.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use dicty_core::StepId;
use dicty_engine::{Agent, Arena};
use dicty_field::CampField;

use crate::codec::{encode_agent, encode_params, encode_row, is_valid_base, RunParameters};
use crate::error::SnapshotError;
use crate::paths::SnapshotPaths;

/// Write one roster line per agent.
pub fn write_roster<W: Write>(w: &mut W, agents: &[Agent]) -> Result<(), SnapshotError> {
    for agent in agents {
        writeln!(w, "{}", encode_agent(&agent.to_record()))?;
    }
    Ok(())
}

/// Write the field matrix, one `x` row per line.
pub fn write_field<W: Write>(w: &mut W, field: &CampField) -> Result<(), SnapshotError> {
    let height = field.lattice().height() as usize;
    for row in field.values().chunks(height) {
        writeln!(w, "{}", encode_row(row))?;
    }
    Ok(())
}

/// Write the run parameter line.
pub fn write_params<W: Write>(w: &mut W, params: &RunParameters) -> Result<(), SnapshotError> {
    if !is_valid_base(&params.output_base) {
        return Err(SnapshotError::InvalidBase {
            base: params.output_base.clone(),
        });
    }
    writeln!(w, "{}", encode_params(params))?;
    Ok(())
}

/// Writes numbered snapshots under a common base path.
///
/// # Examples
///
/// ```no_run
/// use dicty_engine::{Arena, ArenaConfig};
/// use dicty_snapshot::SnapshotWriter;
///
/// let arena = Arena::new(ArenaConfig::default()).unwrap();
/// let mut writer = SnapshotWriter::new("out/run");
/// let paths = writer.write(&arena).unwrap();
/// assert!(paths.roster.ends_with("run_0000.cells"));
/// ```
#[derive(Debug)]
pub struct SnapshotWriter {
    base: PathBuf,
    written: u64,
}

impl SnapshotWriter {
    /// Snapshots go to `{base}_{step:04}.*`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            written: 0,
        }
    }

    /// Base path.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Number of snapshots written so far.
    pub fn snapshots_written(&self) -> u64 {
        self.written
    }

    /// Write the arena's current state, named after its current step.
    pub fn write(&mut self, arena: &Arena) -> Result<SnapshotPaths, SnapshotError> {
        self.write_step(arena.step(), arena)
    }

    /// Write the arena's current state under an explicit step number.
    pub fn write_step(
        &mut self,
        step: StepId,
        arena: &Arena,
    ) -> Result<SnapshotPaths, SnapshotError> {
        let paths = SnapshotPaths::for_step(&self.base, step);
        let params = RunParameters::from_config(arena.config());
        if !is_valid_base(&params.output_base) {
            return Err(SnapshotError::InvalidBase {
                base: params.output_base,
            });
        }

        let mut out = BufWriter::new(File::create(&paths.params)?);
        write_params(&mut out, &params)?;
        out.flush()?;

        let mut out = BufWriter::new(File::create(&paths.roster)?);
        write_roster(&mut out, arena.agents())?;
        out.flush()?;

        let mut out = BufWriter::new(File::create(&paths.field)?);
        write_field(&mut out, arena.field())?;
        out.flush()?;

        self.written += 1;
        debug!(
            step = %step,
            agents = arena.agents().len(),
            prefix = %paths.roster.with_extension("").display(),
            "snapshot written"
        );
        Ok(paths)
    }
}
