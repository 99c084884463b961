use crate::error::{AppError, AppResult};

/// Sequence indexes live in `[0, NAV_SEQ_MODULO)` and wrap in both
/// directions. The index only infers travel direction; it is not a
/// precise counter.
pub const NAV_SEQ_MODULO: i64 = 100;

/// Wrapped distances below this count as forward travel.
const FORWARD_WINDOW: i64 = 50;

pub fn wrap_idx(idx: i64) -> u8 {
    idx.rem_euclid(NAV_SEQ_MODULO) as u8
}

/// Direction heuristic for the circular sequence counter. A wrapped
/// difference of exactly 50 is ambiguous and resolves to backward; real
/// consecutive navigations move by 1, so the tie only matters for jumps
/// the application never produces.
pub fn is_forward_nav(old_idx: u8, new_idx: u8) -> bool {
    i64::from(wrap_idx(i64::from(new_idx) - i64::from(old_idx))) < FORWARD_WINDOW
}

/// One history entry: `INDEX` for safeguard entries, otherwise
/// `INDEX:COMPONENT:OLD:NEW`, colon-joined. Component ids and states are
/// opaque strings chosen by the recording component and passed back
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavToken {
    pub seq: u8,
    pub component: String,
    pub prev: String,
    pub next: String,
}

impl NavToken {
    pub fn event(
        seq: u8,
        component: impl Into<String>,
        prev: impl Into<String>,
        next: impl Into<String>,
    ) -> Self {
        Self {
            seq,
            component: component.into(),
            prev: prev.into(),
            next: next.into(),
        }
    }

    /// A synthetic entry carrying only the sequence index.
    pub fn guard(seq: u8) -> Self {
        Self {
            seq,
            component: String::new(),
            prev: String::new(),
            next: String::new(),
        }
    }

    pub fn is_guard(&self) -> bool {
        self.component.is_empty()
    }

    pub fn encode(&self) -> String {
        if self.is_guard() {
            self.seq.to_string()
        } else {
            format!("{}:{}:{}:{}", self.seq, self.component, self.prev, self.next)
        }
    }

    /// Missing fields decode as empty (the `INDEX:::` guard form is
    /// accepted alongside the bare `INDEX` form); a missing or
    /// non-numeric index is an error.
    pub fn decode(raw: &str) -> AppResult<Self> {
        let mut parts = raw.splitn(4, ':');
        let seq = parts
            .next()
            .unwrap_or("")
            .parse::<i64>()
            .map_err(|_| {
                AppError::invalid_argument(format!("history token has no sequence index: {raw:?}"))
            })?;
        Ok(Self {
            seq: wrap_idx(seq),
            component: parts.next().unwrap_or("").to_string(),
            prev: parts.next().unwrap_or("").to_string(),
            next: parts.next().unwrap_or("").to_string(),
        })
    }
}
