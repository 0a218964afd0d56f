//! Snapshot import.
//!
//! Every reader takes a `file` label that ends up in
//! [`SnapshotError::Malformed`] together with the 1-based line number.
//! Blank lines are skipped. Nothing is returned unless the whole input
//! decodes. [`Snapshot::load`] validates the parameter line before it
//! reads the matrix, so a corrupt shape is reported against the
//! `.playground` file instead of driving an allocation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use dicty_engine::{Agent, Arena, ArenaConfig};

use crate::codec::{decode_agent, decode_params, decode_row, RunParameters};
use crate::error::{DecodeError, SnapshotError};
use crate::paths::SnapshotPaths;

/// Non-blank lines with their 1-based numbers.
fn numbered_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(usize, String), std::io::Error>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(l) if l.trim().is_empty() => None,
            Ok(l) => Some(Ok((i + 1, l))),
            Err(e) => Some(Err(e)),
        })
}

/// Read a roster and rebuild each agent.
pub fn read_roster<R: BufRead>(reader: R, file: &str) -> Result<Vec<Agent>, SnapshotError> {
    let mut agents = Vec::new();
    for entry in numbered_lines(reader) {
        let (n, line) = entry?;
        let record = decode_agent(&line).map_err(|d| SnapshotError::malformed(file, n, d))?;
        let agent =
            Agent::from_record(&record).map_err(|e| SnapshotError::malformed(file, n, e))?;
        agents.push(agent);
    }
    Ok(agents)
}

/// Read a `rows x cols` field matrix, row-major.
pub fn read_field<R: BufRead>(
    reader: R,
    file: &str,
    rows: u32,
    cols: u32,
) -> Result<Vec<f64>, SnapshotError> {
    let mut values = Vec::new();
    let mut seen = 0u32;
    let mut last_line = 0;
    for entry in numbered_lines(reader) {
        let (n, line) = entry?;
        last_line = n;
        if seen == rows {
            return Err(SnapshotError::malformed(
                file,
                n,
                DecodeError::ExtraRows { expected: rows },
            ));
        }
        let row = decode_row(&line, cols as usize)
            .map_err(|d| SnapshotError::malformed(file, n, d))?;
        values.extend(row);
        seen += 1;
    }
    if seen != rows {
        return Err(SnapshotError::malformed(
            file,
            last_line,
            DecodeError::MissingRows {
                expected: rows,
                found: seen,
            },
        ));
    }
    Ok(values)
}

/// Read the single run parameter line.
pub fn read_params<R: BufRead>(reader: R, file: &str) -> Result<RunParameters, SnapshotError> {
    read_params_line(reader, file).map(|(_, params)| params)
}

/// The parameter line and its 1-based line number.
fn read_params_line<R: BufRead>(
    reader: R,
    file: &str,
) -> Result<(usize, RunParameters), SnapshotError> {
    let mut found = None;
    for entry in numbered_lines(reader) {
        let (n, line) = entry?;
        if found.is_some() {
            return Err(SnapshotError::malformed(file, n, DecodeError::ExtraLine));
        }
        let params = decode_params(&line).map_err(|e| SnapshotError::malformed(file, n, e))?;
        found = Some((n, params));
    }
    found.ok_or_else(|| SnapshotError::malformed(file, 1, DecodeError::MissingLine))
}

/// A fully decoded snapshot.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Run parameters.
    pub params: RunParameters,
    /// Agents, in roster order.
    pub agents: Vec<Agent>,
    /// Field values, row-major.
    pub values: Vec<f64>,
}

impl Snapshot {
    /// Read `{prefix}.playground`, `{prefix}.cells` and `{prefix}.camp`.
    pub fn load(prefix: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let paths = SnapshotPaths::from_prefix(prefix);

        let label = paths.params.display().to_string();
        let (n, params) = read_params_line(BufReader::new(File::open(&paths.params)?), &label)?;
        let shape = params.apply_to(ArenaConfig::default());
        shape
            .validate_model()
            .map_err(|e| SnapshotError::malformed(&label, n, e))?;

        let label = paths.roster.display().to_string();
        let agents = read_roster(BufReader::new(File::open(&paths.roster)?), &label)?;

        let label = paths.field.display().to_string();
        let values = read_field(
            BufReader::new(File::open(&paths.field)?),
            &label,
            shape.field_width(),
            shape.field_height(),
        )?;

        debug!(
            prefix = %paths.params.with_extension("").display(),
            agents = agents.len(),
            "snapshot read"
        );
        Ok(Self {
            params,
            agents,
            values,
        })
    }

    /// Rebuild an arena, taking unpersisted settings from `base`.
    pub fn into_arena(self, base: ArenaConfig) -> Result<Arena, SnapshotError> {
        let config = self.params.apply_to(base);
        Ok(Arena::restore(config, self.agents, self.values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicty_core::ParameterError;

    const LABEL: &str = "test.camp";

    #[test]
    fn field_reads_rows() {
        let text = "0 1 2\n3 4 5.5\n";
        let v = read_field(text.as_bytes(), LABEL, 2, 3).unwrap();
        assert_eq!(v, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.5]);
    }

    #[test]
    fn field_short_row_names_line() {
        let text = "0 1 2\n3 4\n";
        match read_field(text.as_bytes(), LABEL, 2, 3) {
            Err(SnapshotError::Malformed { file, line, .. }) => {
                assert_eq!(file, LABEL);
                assert_eq!(line, 2);
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn field_wrong_row_count() {
        assert!(matches!(
            read_field("0 1\n".as_bytes(), LABEL, 2, 2),
            Err(SnapshotError::Malformed {
                reason: DecodeError::MissingRows {
                    expected: 2,
                    found: 1
                },
                ..
            })
        ));
        assert!(matches!(
            read_field("0 1\n2 3\n4 5\n".as_bytes(), LABEL, 2, 2),
            Err(SnapshotError::Malformed {
                line: 3,
                reason: DecodeError::ExtraRows { expected: 2 },
                ..
            })
        ));
    }

    #[test]
    fn field_huge_shape_fails_on_first_short_row() {
        assert!(matches!(
            read_field("0 1\n".as_bytes(), LABEL, u32::MAX, u32::MAX),
            Err(SnapshotError::Malformed {
                line: 1,
                reason: DecodeError::FieldCount { .. },
                ..
            })
        ));
    }

    #[test]
    fn roster_skips_blank_lines() {
        let text = "\n1 20 6000 2 20 1 0 0 0 2 3 0 1 0\n\n2 20 6000 2 20 1 1 3000 0.5 4 4 0 1 1\n";
        let agents = read_roster(text.as_bytes(), "r.cells").unwrap();
        assert_eq!(agents.len(), 2);
        assert!(agents[1].moved_this_cycle());
    }

    #[test]
    fn roster_invalid_constants_rejected_with_line() {
        let text = "1 20 6000 0 20 1 0 0 0 2 3 0 1 0\n";
        match read_roster(text.as_bytes(), "r.cells") {
            Err(SnapshotError::Malformed { line, reason, .. }) => {
                assert_eq!(line, 1);
                assert!(matches!(
                    reason,
                    DecodeError::Parameter(ParameterError::NotPositive {
                        name: "excited_duration",
                        ..
                    })
                ));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn params_line_number_skips_blanks() {
        let text = "\n\nrun 20 6000 2 20 1 0.5 0.2 10 10\n";
        let (n, params) = read_params_line(text.as_bytes(), "p").unwrap();
        assert_eq!(n, 3);
        assert_eq!(params.width, 10);
    }

    #[test]
    fn params_exactly_one_line() {
        assert!(read_params("".as_bytes(), "p").is_err());
        let line = "run 20 6000 2 20 1 0.5 0.2 10 10\n";
        assert!(read_params(line.as_bytes(), "p").is_ok());
        let two = format!("{line}{line}");
        assert!(matches!(
            read_params(two.as_bytes(), "p"),
            Err(SnapshotError::Malformed {
                line: 2,
                reason: DecodeError::ExtraLine,
                ..
            })
        ));
    }
}
