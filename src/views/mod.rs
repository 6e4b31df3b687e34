pub mod leaderboard;
pub mod player;
pub mod votes;
pub mod home;
