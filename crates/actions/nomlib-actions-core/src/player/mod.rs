//! Action player: owns root action trees and drives them once per tick

pub mod action_player;
pub mod player_metrics;
pub mod player_state;
pub mod run_options;
pub mod spawner;

pub use action_player::*;
pub use player_metrics::*;
pub use player_state::*;
pub use run_options::*;
pub use spawner::*;
