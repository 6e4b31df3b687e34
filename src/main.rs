use std::time::Duration;

use craft_hub::api::ApiClient;
use craft_hub::config;
use craft_hub::views::home;

#[tokio::main]
async fn main() {
    let config = config::load_config();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let status_interval = Duration::from_secs(config.status_interval_secs);
    let client = ApiClient::new(config);

    let status = client.server_status();
    let widget = client.widget();
    let players = client.players();

    tokio::task::spawn(async move {
        let mut interval = tokio::time::interval(status_interval);
        loop {
            interval.tick().await;

            let summary = home::summarize(
                status.snapshot().data.as_deref(),
                widget.snapshot().data.as_deref(),
                players.snapshot().data.as_deref()
            );

            tracing::info!(
                "Server {} | {}/{} playing | {} in chat | {} known players",
                if summary.online { "online" } else { "offline" },
                summary.players_online,
                summary.players_max,
                summary.chat_presence,
                summary.roster_count
            );
        }
    });

    tokio::signal::ctrl_c().await
        .expect("Failed to listen for shutdown signal");
    tracing::info!("Shutting down");
}
