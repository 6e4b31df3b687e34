use std::collections::HashMap;

use serde_json::Value;

use crate::api::perms::{find_player_group, GroupsResponse};
use crate::api::players::{Player, PlayersResponse};
use crate::api::stats::Metric;
use crate::api::votes::VoteEntry;
use crate::views::leaderboard::{row_username, value_at_path};

/// Normalized display-name index over one collection, built once per
/// snapshot so the profile join is a hash lookup instead of repeated scans.
/// Best effort only: there is no referential integrity across collections.
pub struct NameIndex {
    positions: HashMap<String, usize>
}

impl NameIndex {
    pub fn build<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut positions = HashMap::new();
        for (i, name) in names.into_iter().enumerate() {
            // First occurrence wins, matching linear-scan semantics.
            positions.entry(name.to_lowercase()).or_insert(i);
        }
        NameIndex { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name.to_lowercase().as_str()).copied()
    }
}

/// One-based leaderboard standing. `Unranked` is a distinct sentinel, never
/// conflated with rank 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Rank {
    Ranked(usize),
    Unranked
}

impl Rank {
    pub fn display(&self) -> String {
        match self {
            Rank::Ranked(n) => format!("#{}", n),
            Rank::Unranked => "Unranked".to_string()
        }
    }
}

pub fn rank_in(index: &NameIndex, name: &str) -> Rank {
    match index.position(name) {
        Some(pos) => Rank::Ranked(pos + 1),
        None => Rank::Unranked
    }
}

/// Permission group to display tier. Unrecognized groups fall back to the
/// generic player tier.
pub fn tier_for_group(group: &str) -> &'static str {
    match group.to_lowercase().as_str() {
        "owner" => "OWNER",
        "admin" => "ADMIN",
        "shahi" => "SHAHI",
        "voter" => "VOTER",
        "vip" => "VIP",
        _ => "PLAYER"
    }
}

/// Kill/death ratio at two-decimal display precision. Zero deaths reads as
/// `0.00` rather than infinity.
pub fn kd_ratio(kills: f64, deaths: f64) -> String {
    if deaths <= 0.0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", kills / deaths)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct MetricStanding {
    pub value: f64,
    pub rank: Rank
}

/// Latest snapshots feeding one profile render. Each collection is polled
/// independently and may complete its first load at a different moment.
pub struct ProfileSources<'a> {
    pub roster: Option<&'a PlayersResponse>,
    pub kills: Option<&'a [Value]>,
    pub mob_kills: Option<&'a [Value]>,
    pub deaths: Option<&'a [Value]>,
    pub blocks_mined: Option<&'a [Value]>,
    pub votes: Option<&'a [VoteEntry]>,
    pub groups: Option<&'a GroupsResponse>,
    pub geolocation: Option<&'a str>
}

#[derive(Debug, Clone)]
pub struct PlayerProfile {
    pub player: Player,
    pub tier: &'static str,
    pub country: Option<String>,
    pub kills: MetricStanding,
    pub mob_kills: MetricStanding,
    pub deaths: MetricStanding,
    pub blocks_mined: MetricStanding,
    pub votes: MetricStanding,
    pub kd: String
}

pub enum ProfileOutcome {
    /// Roster has not finished its first successful load.
    Loading,
    /// Roster is loaded and the name is not in it. Terminal for the page.
    NotFound,
    Found(Box<PlayerProfile>)
}

fn board_standing(board: Option<&[Value]>, name: &str, metric: Metric) -> MetricStanding {
    let Some(rows) = board else {
        return MetricStanding { value: 0.0, rank: Rank::Unranked };
    };

    let index = NameIndex::build(rows.iter().map(row_username));
    let rank = rank_in(&index, name);
    let value = match index.position(name) {
        Some(pos) => value_at_path(&rows[pos], metric.info().value_path),
        None => 0.0
    };

    MetricStanding { value, rank }
}

/// Joins the independently polled collections into one profile by
/// case-insensitive display name. Metric collections that have not loaded
/// yet contribute zeroes and unranked standings; only the roster decides
/// between loading and not-found.
pub fn assemble(name: &str, sources: &ProfileSources) -> ProfileOutcome {
    let Some(roster) = sources.roster else {
        return ProfileOutcome::Loading;
    };

    let roster_index = NameIndex::build(roster.players.iter().map(|p| p.username.as_str()));
    let Some(pos) = roster_index.position(name) else {
        return ProfileOutcome::NotFound;
    };
    let player = roster.players[pos].clone();

    let tier = sources.groups
        .and_then(|listing| find_player_group(listing, name))
        .map(|assignment| tier_for_group(assignment.group))
        .unwrap_or("PLAYER");

    let kills = board_standing(sources.kills, name, Metric::PlayerKills);
    let mob_kills = board_standing(sources.mob_kills, name, Metric::MobKills);
    let deaths = board_standing(sources.deaths, name, Metric::Deaths);
    let blocks_mined = board_standing(sources.blocks_mined, name, Metric::BlocksMined);

    let votes = match sources.votes {
        Some(entries) => {
            let index = NameIndex::build(entries.iter().map(|e| e.username.as_str()));
            let value = index.position(name)
                .map(|pos| entries[pos].votes.all_time as f64)
                .unwrap_or(0.0);
            MetricStanding { value, rank: rank_in(&index, name) }
        }
        None => MetricStanding { value: 0.0, rank: Rank::Unranked }
    };

    let kd = kd_ratio(kills.value, deaths.value);

    ProfileOutcome::Found(Box::new(PlayerProfile {
        player,
        tier,
        country: sources.geolocation.map(|c| c.to_string()),
        kills,
        mob_kills,
        deaths,
        blocks_mined,
        votes,
        kd
    }))
}
