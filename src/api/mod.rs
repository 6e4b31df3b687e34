pub mod players;
pub mod stats;
pub mod votes;
pub mod status;
pub mod widget;
pub mod perms;
pub mod plan;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::config::Config;
use crate::error::HubError;
use crate::fetch::{Poller, Transport};
use crate::api::perms::GroupsResponse;
use crate::api::plan::PlanPlayer;
use crate::api::players::{Player, PlayersResponse};
use crate::api::stats::Metric;
use crate::api::status::ServerStatus;
use crate::api::votes::{LastMonthVote, MonthlyVote, VoteEntry};
use crate::api::widget::WidgetData;

/// The catalog of typed accessors: one method per remote resource, each
/// binding the fetch-and-poll primitive to a concrete locator, payload
/// shape, and refresh cadence.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<Transport>,
    config: Config
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        ApiClient {
            transport: Arc::new(Transport::new()),
            config
        }
    }

    pub fn transport(&self) -> Arc<Transport> {
        Arc::clone(&self.transport)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.poll_interval_secs)
    }

    fn stats_url(&self, path: &str) -> String {
        format!("{}{}", self.config.stats_api_base, path)
    }

    fn poll<T>(&self, locator: Option<String>, every: Duration) -> Poller<T>
    where
        T: serde::de::DeserializeOwned + Send + Sync + 'static
    {
        Poller::spawn(Arc::clone(&self.transport), locator, every)
    }

    pub fn players(&self) -> Poller<PlayersResponse> {
        self.poll(Some(self.stats_url("/api/players")), self.poll_interval())
    }

    pub fn player(&self, uuid: Option<&str>) -> Poller<Player> {
        let locator = uuid.map(|id| self.stats_url(format!("/api/player/{}", id).as_str()));
        self.poll(locator, self.poll_interval())
    }

    /// Per-metric leaderboard, pre-ordered by the upstream. Rows are kept as
    /// raw JSON objects so one code path serves every metric via the
    /// catalog's dotted value paths.
    pub fn leaderboard(&self, metric: Metric) -> Poller<Vec<Value>> {
        self.poll(Some(self.stats_url(metric.info().endpoint)), self.poll_interval())
    }

    /// Route-key variant of [`ApiClient::leaderboard`]. An unrecognized key
    /// is a local validation failure: the returned poller is already settled
    /// with the error and touches the network exactly never.
    pub fn leaderboard_by_key(&self, key: &str) -> Poller<Vec<Value>> {
        match Metric::from_key(key) {
            Ok(metric) => self.leaderboard(metric),
            Err(err) => Poller::failed(Arc::clone(&self.transport), err)
        }
    }

    pub fn votes_all_time(&self) -> Poller<Vec<VoteEntry>> {
        self.poll(Some(self.stats_url("/api/votes/alltime")), self.poll_interval())
    }

    pub fn votes_streaks(&self) -> Poller<Vec<VoteEntry>> {
        self.poll(Some(self.stats_url("/api/votes/streaks")), self.poll_interval())
    }

    pub fn votes_monthly(&self) -> Poller<Vec<MonthlyVote>> {
        self.poll(Some(self.stats_url("/api/votes/monthly")), self.poll_interval())
    }

    pub fn votes_last_month(&self) -> Poller<Vec<LastMonthVote>> {
        self.poll(Some(self.stats_url("/api/votes/lastmonth")), self.poll_interval())
    }

    /// One-shot retrieval of the settled last-month vote collection, for the
    /// session archive's read-through path.
    pub async fn fetch_votes_last_month(&self) -> Result<Vec<LastMonthVote>, HubError> {
        self.transport.get_json(self.stats_url("/api/votes/lastmonth").as_str()).await
    }

    pub fn server_status(&self) -> Poller<ServerStatus> {
        self.poll(
            Some(self.config.status_api_url.clone()),
            Duration::from_secs(self.config.status_interval_secs)
        )
    }

    pub fn widget(&self) -> Poller<WidgetData> {
        self.poll(Some(self.config.widget_url.clone()), self.poll_interval())
    }

    pub fn perms_players(&self) -> Poller<GroupsResponse> {
        self.poll(Some(self.stats_url("/api/luckperms/players")), self.poll_interval())
    }

    pub fn perms_group(&self, group: Option<&str>) -> Poller<perms::GroupResponse> {
        let locator = group.map(|name| self.stats_url(format!("/api/luckperms/group/{}", name).as_str()));
        self.poll(locator, self.poll_interval())
    }

    /// Plan analytics lookup by display name. The upstream is IP-allowlisted
    /// and frequently unreachable, which the poller absorbs as ordinary
    /// fetch failures.
    pub fn plan_player(&self, name: Option<&str>) -> Poller<PlanPlayer> {
        let locator = name.map(|n| {
            format!("{}/player?player={}", self.config.plan_api_base, urlencoding::encode(n))
        });
        self.poll(locator, Duration::from_secs(self.config.plan_interval_secs))
    }
}
