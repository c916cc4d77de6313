pub mod connectivity;
pub mod constants;
pub mod membrane_model;
pub mod network;
pub mod params;
pub mod state_snapshot;
pub mod unit;

mod gating;
mod topology;
mod types;
mod util;
