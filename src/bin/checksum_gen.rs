use neurogen::{connectivity::DendriteSelection, network};

#[path = "../scenario_params.rs"]
mod scenario_params;

fn main() {
    let mut network = network::create_network(scenario_params::get_scenario_params()).unwrap();

    let input_id = network.add_input_neuron(10.0);
    let first_neuron = network.neuron_ids()[0];
    network
        .connect(input_id, first_neuron, DendriteSelection::Fresh)
        .unwrap();

    let topology = network.extract_topology_snapshot();

    let mut edge_checksum = 0usize;
    for edge in &topology.edges {
        let from_id = network.unit_id(&edge.from).unwrap();
        let to_id = network.unit_id(&edge.to).unwrap();
        edge_checksum += from_id.0 * to_id.0;
    }

    println!("topology result:");
    println!("...unit count: {}", topology.units.len());
    println!("...edge count: {}", topology.edges.len());
    println!("...edge checksum: {}", edge_checksum);

    let t_stop = 1000;
    network.run(0.01, t_stop).unwrap();

    let state_snapshot = network.extract_state_snapshot();

    let voltage_checksum: f64 = state_snapshot
        .unit_states
        .iter()
        .map(|unit_state| unit_state.voltage)
        .sum();

    let gating_checksum: f64 = state_snapshot
        .unit_states
        .iter()
        .filter_map(|unit_state| Some(unit_state.m? + unit_state.h? + unit_state.n?))
        .sum();

    println!("state result after {} steps:", t_stop);
    println!("...voltages checksum: {}", voltage_checksum);
    println!("...gating checksum: {}", gating_checksum);
}
