use serde_json::Value;

use crate::api::stats::MetricInfo;

/// Page window size, constant across every metric.
pub const PAGE_SIZE: usize = 25;

/// Reads a numeric value at a dotted path inside a leaderboard row, e.g.
/// `votes.allTime`. An absent segment or non-numeric leaf yields 0 rather
/// than an error; absence is not distinguished from a legitimate zero.
pub fn value_at_path(row: &Value, path: &str) -> f64 {
    let mut cursor = row;
    for segment in path.split('.') {
        match cursor.get(segment) {
            Some(next) => cursor = next,
            None => return 0.0
        }
    }

    cursor.as_f64().unwrap_or(0.0)
}

pub fn row_username(row: &Value) -> &str {
    row.get("username").and_then(|v| v.as_str()).unwrap_or("")
}

/// Derived figures for a metric's detail view, recomputed from the latest
/// snapshot on every render. Rows arrive pre-ordered descending from the
/// upstream; the maximum trusts that order, the sum and mean do not need it.
pub struct LeaderboardView<'a> {
    rows: &'a [Value],
    info: &'static MetricInfo
}

impl<'a> LeaderboardView<'a> {
    pub fn new(rows: &'a [Value], info: &'static MetricInfo) -> Self {
        LeaderboardView { rows, info }
    }

    pub fn info(&self) -> &'static MetricInfo {
        self.info
    }

    pub fn total_players(&self) -> usize {
        self.rows.len()
    }

    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE)
    }

    /// One-based page window. A page beyond the current total comes back
    /// empty; a refresh that shrinks the collection does not pull the view
    /// back onto a valid page.
    pub fn page(&self, page: usize) -> &'a [Value] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1) * PAGE_SIZE;
        if start >= self.rows.len() {
            return &[];
        }
        let end = usize::min(start + PAGE_SIZE, self.rows.len());
        &self.rows[start..end]
    }

    pub fn top3(&self) -> &'a [Value] {
        &self.rows[..usize::min(3, self.rows.len())]
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| value_at_path(row, self.info.value_path)).sum()
    }

    pub fn average(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        (self.total() / self.rows.len() as f64).floor()
    }

    /// Highest single value, taken from the first row.
    pub fn max(&self) -> f64 {
        self.rows.first()
            .map(|row| value_at_path(row, self.info.value_path))
            .unwrap_or(0.0)
    }

    pub fn format(&self, value: f64) -> String {
        (self.info.format)(value)
    }
}
