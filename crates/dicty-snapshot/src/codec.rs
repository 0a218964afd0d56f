//! Line-level encoders and decoders.
//!
//! Decoders return a [`DecodeError`] describing the problem; the readers
//! attach file and line information when wrapping it into a
//! [`SnapshotError`](crate::SnapshotError).

use std::fmt::Write as _;
use std::str::FromStr;

use dicty_core::{AgentId, ModelParameters};
use dicty_engine::{AgentRecord, AgentState, ArenaConfig};
use dicty_space::Site;

use crate::error::DecodeError;

/// Number of whitespace-separated fields on a roster line.
pub const ROSTER_FIELDS: usize = 14;

/// Number of whitespace-separated fields on a parameter line.
pub const PARAMS_FIELDS: usize = 10;

// ── Run parameters ─────────────────────────────────────────────────

/// The persisted subset of an [`ArenaConfig`].
///
/// Enough to rebuild the field and arena around an imported roster.
/// Beacon multiplier, sync interval, seed and timestep are not persisted;
/// [`apply_to`](Self::apply_to) takes them from a base configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RunParameters {
    /// Output base the run was started with.
    pub output_base: String,
    /// Physical constants.
    pub model: ModelParameters,
    /// Agent density.
    pub density: f64,
    /// Arena width in agent-lattice units.
    pub width: u32,
    /// Arena height in agent-lattice units.
    pub height: u32,
}

impl RunParameters {
    /// Extract the persisted subset of `config`.
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self {
            output_base: config.output_base.clone(),
            model: config.model,
            density: config.density,
            width: config.width,
            height: config.height,
        }
    }

    /// Overlay these parameters onto `base`.
    pub fn apply_to(&self, base: ArenaConfig) -> ArenaConfig {
        ArenaConfig {
            output_base: self.output_base.clone(),
            model: self.model,
            density: self.density,
            width: self.width,
            height: self.height,
            ..base
        }
    }
}

/// Whether `base` can be written as a single parameter field.
pub fn is_valid_base(base: &str) -> bool {
    !base.is_empty() && !base.chars().any(char::is_whitespace)
}

/// Encode run parameters as one line (no trailing newline).
pub fn encode_params(params: &RunParameters) -> String {
    let m = &params.model;
    format!(
        "{} {} {} {} {} {} {} {} {} {}",
        params.output_base,
        m.excitation_threshold,
        m.release_amount,
        m.excited_duration,
        m.refractory_duration,
        m.lattice_spacing,
        m.decay_rate,
        params.density,
        params.width,
        params.height,
    )
}

/// Decode a parameter line.
pub fn decode_params(line: &str) -> Result<RunParameters, DecodeError> {
    let f = split_exact(line, PARAMS_FIELDS)?;
    Ok(RunParameters {
        output_base: f[0].to_string(),
        model: ModelParameters {
            excitation_threshold: parse_float(f[1], "excitation_threshold")?,
            release_amount: parse_float(f[2], "release_amount")?,
            excited_duration: parse_float(f[3], "excited_duration")?,
            refractory_duration: parse_float(f[4], "refractory_duration")?,
            lattice_spacing: parse_float(f[5], "lattice_spacing")?,
            decay_rate: parse_float(f[6], "decay_rate")?,
        },
        density: parse_float(f[7], "density")?,
        width: parse(f[8], "width")?,
        height: parse(f[9], "height")?,
    })
}

// ── Agent roster ───────────────────────────────────────────────────

/// Encode one agent as a roster line (no trailing newline).
pub fn encode_agent(r: &AgentRecord) -> String {
    format!(
        "{} {} {} {} {} {} {} {} {} {} {} {} {} {}",
        r.id,
        r.excitation_threshold,
        r.release_amount,
        r.excited_duration,
        r.refractory_duration,
        r.lattice_factor,
        r.state.code(),
        r.output,
        r.clock,
        r.position.x,
        r.position.y,
        u8::from(r.permanent_beacon),
        r.output_multiplier,
        u8::from(r.moved_this_cycle),
    )
}

/// Decode a roster line.
pub fn decode_agent(line: &str) -> Result<AgentRecord, DecodeError> {
    let f = split_exact(line, ROSTER_FIELDS)?;
    let code: u8 = parse(f[6], "state")?;
    let state = AgentState::from_code(code).ok_or(DecodeError::UnknownState { code })?;
    Ok(AgentRecord {
        id: AgentId(parse(f[0], "id")?),
        excitation_threshold: parse_float(f[1], "excitation_threshold")?,
        release_amount: parse_float(f[2], "release_amount")?,
        excited_duration: parse_float(f[3], "excited_duration")?,
        refractory_duration: parse_float(f[4], "refractory_duration")?,
        lattice_factor: parse(f[5], "lattice_factor")?,
        state,
        output: parse_float(f[7], "output")?,
        clock: parse_float(f[8], "clock")?,
        position: Site::new(parse(f[9], "x")?, parse(f[10], "y")?),
        permanent_beacon: parse_flag(f[11], "permanent_beacon")?,
        output_multiplier: parse_float(f[12], "output_multiplier")?,
        moved_this_cycle: parse_flag(f[13], "moved_this_cycle")?,
    })
}

// ── Field matrix ───────────────────────────────────────────────────

/// Encode one matrix row (no trailing newline).
pub fn encode_row(row: &[f64]) -> String {
    let mut out = String::with_capacity(row.len() * 8);
    for (i, v) in row.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{v}");
    }
    out
}

/// Decode one matrix row of exactly `len` values.
pub fn decode_row(line: &str, len: usize) -> Result<Vec<f64>, DecodeError> {
    split_exact(line, len)?
        .into_iter()
        .map(|s| parse_float(s, "field value"))
        .collect()
}

// ── Helpers ────────────────────────────────────────────────────────

fn split_exact(line: &str, expected: usize) -> Result<Vec<&str>, DecodeError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(DecodeError::FieldCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn parse<T: FromStr>(s: &str, name: &'static str) -> Result<T, DecodeError> {
    s.parse().map_err(|_| DecodeError::Unparsable {
        name,
        text: s.to_string(),
    })
}

fn parse_float(s: &str, name: &'static str) -> Result<f64, DecodeError> {
    let v: f64 = parse(s, name)?;
    if !v.is_finite() {
        return Err(DecodeError::NonFinite {
            name,
            text: s.to_string(),
        });
    }
    Ok(v)
}

fn parse_flag(s: &str, name: &'static str) -> Result<bool, DecodeError> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(DecodeError::InvalidFlag {
            name,
            text: s.to_string(),
        }),
    }
}
