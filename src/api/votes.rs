use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct VoteCounts {
    #[serde(rename = "allTime")]
    pub all_time: u64,
    #[serde(rename = "thisMonth")]
    pub this_month: u64,
    #[serde(rename = "thisWeek")]
    pub this_week: u64,
    pub today: u64
}

#[derive(Deserialize, Debug, Clone)]
pub struct Streak {
    pub current: u64,
    pub best: u64
}

/// Row of the all-time and streak collections; counts for every period are
/// nested under `votes`.
#[derive(Deserialize, Debug, Clone)]
pub struct VoteEntry {
    pub uuid: String,
    pub username: String,
    pub votes: VoteCounts,
    pub streak: Streak,
    pub points: u64,
    #[serde(rename = "lastOnline")]
    pub last_online: Option<String>
}

/// Row of the current-month collection, keyed by a this-month counter.
#[derive(Deserialize, Debug, Clone)]
pub struct MonthlyVote {
    pub uuid: String,
    pub username: String,
    #[serde(rename = "monthVotes")]
    pub month_votes: u64,
    #[serde(rename = "allTime")]
    pub all_time: u64,
    pub streak: Streak,
    pub points: u64
}

/// Row of the settled last-month collection, keyed by a last-month counter.
#[derive(Deserialize, Debug, Clone)]
pub struct LastMonthVote {
    pub uuid: String,
    pub username: String,
    #[serde(rename = "lastMonthVotes")]
    pub last_month_votes: u64,
    #[serde(rename = "currentMonth")]
    pub current_month: u64,
    #[serde(rename = "allTime")]
    pub all_time: u64,
    pub streak: Streak,
    pub points: u64
}
