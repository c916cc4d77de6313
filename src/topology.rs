use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    connectivity::{Connectome, DendriteSelection},
    params::ConnectivityParams,
};

/// Wires every neuron to randomly chosen neurons after it in sequence, which
/// keeps the topology forward-only. Attempts are best effort: failures are
/// logged and skipped.
pub fn wire_randomly<R: Rng>(
    connectome: &mut Connectome,
    connectivity_params: &ConnectivityParams,
    rng: &mut R,
) {
    let neuron_ids = connectome.neuron_ids().to_vec();

    for (idx, source) in neuron_ids.iter().enumerate() {
        let num_attempts = rng.gen_range(
            connectivity_params.min_connection_attempts
                ..=connectivity_params.max_connection_attempts,
        );

        for _ in 0..num_attempts {
            let target = match neuron_ids[idx + 1..].choose(rng) {
                Some(target) => *target,
                None => {
                    debug!("no connection candidates after neuron {}", idx);
                    continue;
                }
            };

            let selection = match connectome.num_dendrites(target) {
                Ok(0) => DendriteSelection::Fresh,
                Ok(_) if rng.gen_bool(connectivity_params.fresh_dendrite_probability) => {
                    DendriteSelection::Fresh
                }
                Ok(num_dendrites) => DendriteSelection::Existing(rng.gen_range(0..num_dendrites)),
                Err(err) => {
                    debug!("discarding connection attempt: {}", err);
                    continue;
                }
            };

            if let Err(err) = connectome.connect(*source, target, selection) {
                debug!(
                    "discarding connection attempt from neuron {} with {:?}: {}",
                    idx, selection, err
                );
            }
        }
    }
}
