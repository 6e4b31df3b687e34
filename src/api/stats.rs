use crate::error::HubError;

/// The closed set of leaderboard metrics the hub knows how to display.
/// Anything outside this set is rejected at the boundary.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub enum Metric {
    PlayerKills,
    MobKills,
    Deaths,
    BlocksMined,
    Balance,
    Playtime,
    Votes
}

/// Everything a view needs to render one metric: where to fetch it, how to
/// label it, where its value lives inside a row, and how to print a value.
pub struct MetricInfo {
    pub key: &'static str,
    pub endpoint: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value_path: &'static str,
    pub format: fn(f64) -> String
}

static PLAYER_KILLS: MetricInfo = MetricInfo {
    key: "playerkills",
    endpoint: "/api/stats/playerkills",
    label: "Player Kills",
    unit: "kills",
    value_path: "kills",
    format: format_count
};

static MOB_KILLS: MetricInfo = MetricInfo {
    key: "mobkills",
    endpoint: "/api/stats/mobkills",
    label: "Mob Kills",
    unit: "kills",
    value_path: "mobKills",
    format: format_count
};

static DEATHS: MetricInfo = MetricInfo {
    key: "deaths",
    endpoint: "/api/stats/deaths",
    label: "Deaths",
    unit: "deaths",
    value_path: "deaths",
    format: format_count
};

static BLOCKS_MINED: MetricInfo = MetricInfo {
    key: "blocksmined",
    endpoint: "/api/stats/blocksmined",
    label: "Blocks Mined",
    unit: "blocks",
    value_path: "blocksMined",
    format: format_count
};

static BALANCE: MetricInfo = MetricInfo {
    key: "rich",
    endpoint: "/api/leaderboard/rich",
    label: "Balance",
    unit: "$",
    value_path: "balance",
    format: format_money
};

static PLAYTIME: MetricInfo = MetricInfo {
    key: "playtime",
    endpoint: "/api/leaderboard/playtime",
    label: "Playtime",
    unit: "hours",
    value_path: "playtimeHours",
    format: format_playtime
};

static VOTES: MetricInfo = MetricInfo {
    key: "votes",
    endpoint: "/api/votes/alltime",
    label: "Top Voters",
    unit: "votes",
    value_path: "votes.allTime",
    format: format_count
};

impl Metric {
    /// Resolves a route key to a catalog entry. Unknown keys are a local
    /// validation failure, surfaced before any network activity.
    pub fn from_key(key: &str) -> Result<Metric, HubError> {
        match key {
            "playerkills" => Ok(Metric::PlayerKills),
            "mobkills" => Ok(Metric::MobKills),
            "deaths" => Ok(Metric::Deaths),
            "blocksmined" => Ok(Metric::BlocksMined),
            "rich" | "economy-money" => Ok(Metric::Balance),
            "playtime" => Ok(Metric::Playtime),
            "votes" => Ok(Metric::Votes),
            unknown => Err(HubError::new(format!("Unknown leaderboard category: {}", unknown)))
        }
    }

    pub fn info(&self) -> &'static MetricInfo {
        match self {
            Metric::PlayerKills => &PLAYER_KILLS,
            Metric::MobKills => &MOB_KILLS,
            Metric::Deaths => &DEATHS,
            Metric::BlocksMined => &BLOCKS_MINED,
            Metric::Balance => &BALANCE,
            Metric::Playtime => &PLAYTIME,
            Metric::Votes => &VOTES
        }
    }

    pub fn all() -> [Metric; 7] {
        [
            Metric::PlayerKills,
            Metric::MobKills,
            Metric::Deaths,
            Metric::BlocksMined,
            Metric::Balance,
            Metric::Playtime,
            Metric::Votes
        ]
    }
}

/// Thousands-grouped integer display, e.g. `1,234,567`.
pub fn format_count(value: f64) -> String {
    let negative = value < 0.0;
    let digits = (value.abs().floor() as u64).to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Compact currency display: `$1.2M`, `$3.4K`, else grouped dollars.
pub fn format_money(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${}", format_count(value))
    }
}

pub fn format_playtime(hours: f64) -> String {
    format!("{}h", hours.floor() as u64)
}
