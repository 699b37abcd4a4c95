use serde::{Deserialize, Serialize};

/// Default page size when none (or an invalid one) is requested.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size served.
pub const MAX_LIMIT: u32 = 100;

/// Offset/limit window over the book list, ordered by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    /// Creates a page, clamping `limit` into `1..=MAX_LIMIT`.
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Builds a page from raw, possibly invalid, query values.
    ///
    /// A missing or negative offset becomes 0; a missing or non-positive
    /// limit becomes [`DEFAULT_LIMIT`]; a limit above [`MAX_LIMIT`] is capped.
    pub fn from_query(offset: Option<i64>, limit: Option<i64>) -> Self {
        let offset = offset
            .filter(|o| *o >= 0)
            .map(|o| u32::try_from(o).unwrap_or(u32::MAX))
            .unwrap_or(0);
        let limit = limit
            .filter(|l| *l >= 1)
            .map(|l| u32::try_from(l).unwrap_or(MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT);
        Self::new(offset, limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}
