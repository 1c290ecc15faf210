//! Request batches loaded from JSON.
//!
//! Entries are applied through the `Request` setters, so channel alignment
//! and effect validation behave exactly as for programmatic callers.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::effect::{EffectArgs, EffectKind};
use crate::intensity::{Channel, IntensityFn, Unit};
use crate::protocol::error::LorError;
use crate::request::Request;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read request file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request {index}: {reason}")]
    Entry { index: usize, reason: &'static str },
    #[error("request {index}: {source}")]
    Request {
        index: usize,
        #[source]
        source: LorError,
    },
}

/// Options applied while turning entries into requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceConfig {
    /// When set, `intensity`, `start` and `end` are byte-domain levels and
    /// are converted through this function.
    pub intensity_fn: Option<IntensityFn>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestEntry {
    unit: Unit,
    #[serde(default)]
    channel: Option<Channel>,
    #[serde(default)]
    channels: Option<ChannelRange>,
    effect: EffectKind,
    #[serde(default)]
    args: Option<EffectArgs>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChannelRange {
    first: Channel,
    bitmask: u16,
}

/// Parses a JSON array of request entries.
///
/// # Examples
/// ```
/// use lorwire_core::{SourceConfig, parse_requests};
///
/// let json = r#"[{"unit": 3, "effect": "set_off"}]"#;
/// let reqs = parse_requests(json, &SourceConfig::default())?;
/// assert_eq!(reqs[0].unit, 3);
/// # Ok::<(), lorwire_core::SourceError>(())
/// ```
pub fn parse_requests(json: &str, config: &SourceConfig) -> Result<Vec<Request>, SourceError> {
    let entries: Vec<RequestEntry> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| build_request(index, entry, config))
        .collect()
}

pub fn load_request_file(
    path: &Path,
    config: &SourceConfig,
) -> Result<Vec<Request>, SourceError> {
    let json = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let requests = parse_requests(&json, config)?;
    debug!(path = %path.display(), count = requests.len(), "loaded request file");
    Ok(requests)
}

fn build_request(
    index: usize,
    entry: RequestEntry,
    config: &SourceConfig,
) -> Result<Request, SourceError> {
    let mut req = Request::new();
    req.set_unit(entry.unit);

    match (entry.channel, entry.channels) {
        (Some(_), Some(_)) => {
            return Err(SourceError::Entry {
                index,
                reason: "`channel` and `channels` are mutually exclusive",
            });
        }
        (Some(channel), None) => req.set_single_channel(channel),
        (None, Some(range)) => req.set_channel_range(range.first, range.bitmask),
        (None, None) => {}
    }

    let args = match config.intensity_fn {
        Some(map) => entry.args.map(|args| map_levels(args, map)),
        None => entry.args,
    };
    req.set_effect(entry.effect, args)
        .map_err(|source| SourceError::Request { index, source })?;
    Ok(req)
}

fn map_levels(args: EffectArgs, map: IntensityFn) -> EffectArgs {
    match args {
        EffectArgs::SetIntensity { intensity } => EffectArgs::SetIntensity {
            intensity: map(intensity),
        },
        EffectArgs::Fade {
            start,
            end,
            duration,
        } => EffectArgs::Fade {
            start: map(start),
            end: map(end),
            duration,
        },
        other => other,
    }
}
