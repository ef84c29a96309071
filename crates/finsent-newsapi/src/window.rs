//! Incremental collection windows.
//!
//! Each run searches from the end of the previous successful run up to now.
//! The boundary is kept in a one-line text file; when it is missing or
//! unreadable the window falls back to a fixed look-back.

use std::path::Path;

use chrono::{NaiveDateTime, TimeDelta};

use crate::types::TIMESTAMP_FORMAT;

/// `[from, to]` search bounds, both UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl CollectionWindow {
    /// Window ending at `now`, starting at the recorded last run or
    /// `lookback_days` before `now`.
    ///
    /// A recorded timestamp in the future is ignored in favour of the
    /// look-back so the window is never inverted. A look-back too large to
    /// represent starts the window at the earliest representable time.
    #[must_use]
    pub fn resolve(last_run_path: &Path, now: NaiveDateTime, lookback_days: i64) -> Self {
        let fallback = TimeDelta::try_days(lookback_days)
            .and_then(|delta| now.checked_sub_signed(delta))
            .unwrap_or_else(|| {
                tracing::warn!(lookback_days, "look-back out of range; clamping window start");
                NaiveDateTime::MIN
            });
        let from = match read_last_run(last_run_path) {
            Some(ts) if ts <= now => ts,
            Some(ts) => {
                tracing::warn!(
                    last_run = %ts,
                    "last run timestamp is in the future; using look-back window"
                );
                fallback
            }
            None => fallback,
        };
        Self { from, to: now }
    }
}

/// Read the last-run timestamp, if the file exists and parses.
#[must_use]
pub fn read_last_run(path: &Path) -> Option<NaiveDateTime> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                value = trimmed,
                error = %e,
                "unparseable last run timestamp; starting fresh"
            );
            None
        }
    }
}

/// Persist `ts` as the last successful run, creating parent directories.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be written.
pub fn save_last_run(path: &Path, ts: NaiveDateTime) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, ts.format(TIMESTAMP_FORMAT).to_string())
}
