use serde::{Deserialize, Serialize};

use crate::{membrane_model::Phase, unit::UnitKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub t: f64,
    pub unit_states: Vec<UnitState>,
}

/// Channel fields are `None` for input neurons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitState {
    pub id: String,
    pub kind: UnitKind,
    pub voltage: f64,
    pub m: Option<f64>,
    pub h: Option<f64>,
    pub n: Option<f64>,
    pub phase: Option<Phase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub units: Vec<UnitDescriptor>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDescriptor {
    pub id: String,
    pub kind: UnitKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}
