use std::time::Instant;

use neurogen::{connectivity::DendriteSelection, network};
use rand::{prelude::Distribution, rngs::StdRng, seq::SliceRandom, SeedableRng};
use statrs::distribution::Poisson;

#[path = "../scenario_params.rs"]
mod scenario_params;

const NUM_INPUTS: usize = 100;
const STIMULUS_CURRENT: f64 = 10.0;
const DT: f64 = 0.01;

fn main() {
    let mut network = network::create_network(scenario_params::get_scenario_params()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let neuron_ids = network.neuron_ids().to_vec();
    let input_ids: Vec<_> = (0..NUM_INPUTS)
        .map(|_| network.add_input_neuron(0.0))
        .collect();

    for input_id in &input_ids {
        let target = *neuron_ids.choose(&mut rng).unwrap();
        network
            .connect(*input_id, target, DendriteSelection::Fresh)
            .unwrap();
    }

    let num_reachable_units = network.reachable_units().len();
    let num_stimulus_inputs_dist = Poisson::new(5.0).unwrap();
    let t_stop = 10000;

    let wall_start = Instant::now();

    for _ in 0..t_stop {
        let num_stimulus_inputs = num_stimulus_inputs_dist.sample(&mut rng) as usize;

        for input_id in &input_ids {
            network.set_input_current(*input_id, 0.0).unwrap();
        }

        for input_id in input_ids.choose_multiple(&mut rng, num_stimulus_inputs) {
            network
                .set_input_current(*input_id, STIMULUS_CURRENT)
                .unwrap();
        }

        network.step(DT).unwrap();
    }

    let wall_time = wall_start.elapsed();
    let integration_throughput =
        (num_reachable_units * t_stop) as f64 / wall_time.as_secs_f64();

    eprintln!("Reachable units: {}", num_reachable_units);
    eprintln!(
        "Unit integration throughput: {:.3e} ({:.3} ns per unit integration)",
        integration_throughput,
        1e9 / integration_throughput
    );
    eprintln!("Simulated time: {:.1} ms", network.get_t());
}
