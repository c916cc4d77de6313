/// Evaluates `x / (1 - exp(-x / scale))`, using the limit `scale` at its removable
/// singularity `x = 0`.
pub fn exp_ratio(x: f64, scale: f64) -> f64 {
    if x.abs() < 1e-6 {
        // first order expansion around the singularity
        scale + x / 2.0
    } else {
        x / -(-x / scale).exp_m1()
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub fn is_valid_time_step(dt: f64) -> bool {
    dt.is_finite() && dt > 0.0
}

#[cfg(test)]
pub mod test_util {
    use crate::params::{
        ConnectivityParams, MembraneModelParams, NetworkParams, StateMachineParams,
    };

    pub fn get_template_network_params() -> NetworkParams {
        let mut params = NetworkParams::default();
        params.num_neurons = 5;
        params.technical_params.seed_override = Some(0);
        params
    }

    pub fn get_unwired_params(num_neurons: usize) -> NetworkParams {
        let mut params = get_template_network_params();
        params.num_neurons = num_neurons;
        params.connectivity_params = ConnectivityParams {
            min_connection_attempts: 0,
            max_connection_attempts: 0,
            fresh_dendrite_probability: 0.5,
        };
        params
    }

    pub fn get_unwired_state_machine_params(num_neurons: usize) -> NetworkParams {
        let mut params = get_unwired_params(num_neurons);
        params.membrane_model_params =
            MembraneModelParams::StateMachine(StateMachineParams::default());
        params
    }
}
