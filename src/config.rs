use std::fs;

use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub stats_api_base: String,
    pub plan_api_base: String,
    pub status_api_url: String,
    pub widget_url: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_status_interval")]
    pub status_interval_secs: u64,
    #[serde(default = "default_plan_interval")]
    pub plan_interval_secs: u64
}

fn default_poll_interval() -> u64 { 30 }
fn default_status_interval() -> u64 { 10 }
fn default_plan_interval() -> u64 { 60 }

pub fn load_config() -> Config {
    let config_content = fs::read_to_string("config.toml").expect("No config.toml found.");

    toml::from_str(config_content.as_str()).expect("Failed to deserialize config.toml")
}
