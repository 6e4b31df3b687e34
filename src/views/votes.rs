use std::sync::{Arc, Mutex};

use chrono::{Datelike, Months, NaiveDate};
use itertools::Itertools;

use crate::api::votes::{LastMonthVote, MonthlyVote};
use crate::api::ApiClient;
use crate::error::HubError;

/// Calendar slot selected on the voting page. The trailing slot exists so
/// the month switcher can already render next month's tab; it has no data
/// source yet.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Period {
    PriorMonth,
    CurrentMonth,
    NextMonth
}

impl Period {
    pub fn all() -> [Period; 3] {
        [Period::PriorMonth, Period::CurrentMonth, Period::NextMonth]
    }

    /// Human label relative to `today`, e.g. "January 2026".
    pub fn label(&self, today: NaiveDate) -> String {
        let month = match self {
            Period::PriorMonth => today.checked_sub_months(Months::new(1)),
            Period::CurrentMonth => Some(today),
            Period::NextMonth => today.checked_add_months(Months::new(1))
        };

        match month {
            Some(date) => format!("{} {}", month_name(date.month()), date.year()),
            None => "Unknown".to_string()
        }
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Unknown"
    }
}

/// The two differently shaped vote collections normalized into one row the
/// table understands.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VoteRow {
    pub uuid: String,
    pub username: String,
    pub votes: u64,
    pub streak_current: u64,
    pub streak_best: u64
}

/// Current-month rows, re-sorted descending by count. The period counters
/// are derived fields, so upstream ordering is not trusted here.
pub fn normalize_monthly(entries: &[MonthlyVote]) -> Vec<VoteRow> {
    entries.iter()
        .map(|entry| VoteRow {
            uuid: entry.uuid.clone(),
            username: entry.username.clone(),
            votes: entry.month_votes,
            streak_current: entry.streak.current,
            streak_best: entry.streak.best
        })
        .sorted_by(|a, b| b.votes.cmp(&a.votes))
        .collect()
}

pub fn normalize_last_month(entries: &[LastMonthVote]) -> Vec<VoteRow> {
    entries.iter()
        .map(|entry| VoteRow {
            uuid: entry.uuid.clone(),
            username: entry.username.clone(),
            votes: entry.last_month_votes,
            streak_current: entry.streak.current,
            streak_best: entry.streak.best
        })
        .sorted_by(|a, b| b.votes.cmp(&a.votes))
        .collect()
}

pub fn total_votes(rows: &[VoteRow]) -> u64 {
    rows.iter().map(|row| row.votes).sum()
}

/// Process-scoped cache for the settled prior-month collection. Written at
/// most once, by whichever view first completes that retrieval; every later
/// reader for the session sees the cached rows without a network round.
/// Current-month data is still changing and is never cached here.
#[derive(Clone, Default)]
pub struct VoteArchive {
    prior: Arc<Mutex<Option<Arc<Vec<VoteRow>>>>>
}

impl VoteArchive {
    pub fn new() -> Self {
        VoteArchive::default()
    }

    /// Read-through accessor for the prior-month rows.
    pub async fn prior_month(&self, client: &ApiClient) -> Result<Arc<Vec<VoteRow>>, HubError> {
        if let Some(rows) = self.prior.lock().unwrap().clone() {
            return Ok(rows);
        }

        let fetched = Arc::new(normalize_last_month(&client.fetch_votes_last_month().await?));

        // Two views racing here both fetched; the first write sticks.
        let mut slot = self.prior.lock().unwrap();
        match slot.as_ref() {
            Some(existing) => Ok(Arc::clone(existing)),
            None => {
                *slot = Some(Arc::clone(&fetched));
                Ok(fetched)
            }
        }
    }

    pub fn cached(&self) -> Option<Arc<Vec<VoteRow>>> {
        self.prior.lock().unwrap().clone()
    }
}
