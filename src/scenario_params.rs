use neurogen::params::NetworkParams;

pub fn get_scenario_params() -> NetworkParams {
    let params_yaml_str = r#"
num_neurons: 1000
unit_params:
  resting_potential: -65.0
  axial_resistance: 1.0
  membrane_capacitance: 1.0
membrane_model_params: !GatingVariables
  sub_steps: 10
  refractory_gating: false
  refractory_h_threshold: 0.4
  refractory_n_threshold: 0.6
connectivity_params:
  min_connection_attempts: 1
  max_connection_attempts: 2
  fresh_dendrite_probability: 0.5
technical_params:
  seed_override: 0
"#;

    serde_yaml::from_str(params_yaml_str).unwrap()
}
