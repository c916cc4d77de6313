use serde::{Deserialize, Serialize};
use simple_error::SimpleError;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct NetworkParams {
    pub num_neurons: usize,
    pub unit_params: UnitParams,
    pub membrane_model_params: MembraneModelParams,
    pub connectivity_params: ConnectivityParams,
    pub technical_params: TechnicalParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitParams {
    pub resting_potential: f64,
    pub axial_resistance: f64,
    pub membrane_capacitance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MembraneModelParams {
    GatingVariables(GatingVariableParams),
    StateMachine(StateMachineParams),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatingVariableParams {
    pub sub_steps: usize,
    pub refractory_gating: bool,
    pub refractory_h_threshold: f64,
    pub refractory_n_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMachineParams {
    pub action_potential_threshold: f64,
    pub action_potential_peak: f64,
    pub refractory_period_duration: f64,
    pub m_half_activation: f64,
    pub m_slope: f64,
    pub n_mean: f64,
    pub n_std_dev: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityParams {
    pub min_connection_attempts: usize,
    pub max_connection_attempts: usize,
    pub fresh_dendrite_probability: f64,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalParams {
    pub seed_override: Option<u64>,
}

impl Default for UnitParams {
    fn default() -> Self {
        Self {
            resting_potential: -65.0,
            axial_resistance: 1.0,
            membrane_capacitance: 1.0,
        }
    }
}

impl Default for MembraneModelParams {
    fn default() -> Self {
        MembraneModelParams::GatingVariables(GatingVariableParams::default())
    }
}

impl Default for GatingVariableParams {
    fn default() -> Self {
        Self {
            sub_steps: 10,
            refractory_gating: false,
            refractory_h_threshold: 0.4,
            refractory_n_threshold: 0.6,
        }
    }
}

impl Default for StateMachineParams {
    fn default() -> Self {
        Self {
            action_potential_threshold: -55.0,
            action_potential_peak: 30.0,
            refractory_period_duration: 2.0,
            m_half_activation: -40.0,
            m_slope: 10.0,
            n_mean: -75.0,
            n_std_dev: 10.0,
        }
    }
}

impl Default for ConnectivityParams {
    fn default() -> Self {
        Self {
            min_connection_attempts: 1,
            max_connection_attempts: 2,
            fresh_dendrite_probability: 0.5,
        }
    }
}

pub fn validate_network_params(network_params: &NetworkParams) -> Result<(), SimpleError> {
    validate_unit_params(&network_params.unit_params)?;
    validate_membrane_model_params(&network_params.membrane_model_params)?;
    validate_connectivity_params(&network_params.connectivity_params)?;
    Ok(())
}

fn validate_unit_params(unit_params: &UnitParams) -> Result<(), SimpleError> {
    if !unit_params.resting_potential.is_finite() {
        return Err(SimpleError::new("resting_potential must be finite"));
    }

    if !(unit_params.axial_resistance > 0.0) {
        return Err(SimpleError::new(
            "axial_resistance must be strictly positive",
        ));
    }

    if !(unit_params.membrane_capacitance > 0.0) {
        return Err(SimpleError::new(
            "membrane_capacitance must be strictly positive",
        ));
    }

    Ok(())
}

fn validate_membrane_model_params(
    membrane_model_params: &MembraneModelParams,
) -> Result<(), SimpleError> {
    match membrane_model_params {
        MembraneModelParams::GatingVariables(params) => validate_gating_variable_params(params),
        MembraneModelParams::StateMachine(params) => validate_state_machine_params(params),
    }
}

fn validate_gating_variable_params(params: &GatingVariableParams) -> Result<(), SimpleError> {
    if params.sub_steps == 0 {
        return Err(SimpleError::new("sub_steps must be strictly positive"));
    }

    if !(0.0..=1.0).contains(&params.refractory_h_threshold) {
        return Err(SimpleError::new("refractory_h_threshold must be in [0, 1]"));
    }

    if !(0.0..=1.0).contains(&params.refractory_n_threshold) {
        return Err(SimpleError::new("refractory_n_threshold must be in [0, 1]"));
    }

    Ok(())
}

fn validate_state_machine_params(params: &StateMachineParams) -> Result<(), SimpleError> {
    if !(params.action_potential_threshold < params.action_potential_peak) {
        return Err(SimpleError::new(
            "action_potential_threshold must be less than action_potential_peak",
        ));
    }

    if !(params.refractory_period_duration > 0.0) {
        return Err(SimpleError::new(
            "refractory_period_duration must be strictly positive",
        ));
    }

    if !(params.m_slope > 0.0) {
        return Err(SimpleError::new("m_slope must be strictly positive"));
    }

    if !(params.n_std_dev > 0.0) {
        return Err(SimpleError::new("n_std_dev must be strictly positive"));
    }

    Ok(())
}

fn validate_connectivity_params(params: &ConnectivityParams) -> Result<(), SimpleError> {
    if params.min_connection_attempts > params.max_connection_attempts {
        return Err(SimpleError::new(
            "min_connection_attempts must not be greater than max_connection_attempts",
        ));
    }

    if !(0.0..=1.0).contains(&params.fresh_dendrite_probability) {
        return Err(SimpleError::new(
            "fresh_dendrite_probability must be in [0, 1]",
        ));
    }

    Ok(())
}
