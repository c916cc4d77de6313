use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use simple_error::{try_with, SimpleError, SimpleResult};

use crate::{
    connectivity::{Connectome, DendriteSelection},
    membrane_model::{self, MembraneModel},
    params::{self, NetworkParams},
    state_snapshot::{Edge, StateSnapshot, TopologySnapshot, UnitDescriptor, UnitState},
    topology,
    unit::{AppliedCurrent, ElectricalProperties, ExcitableUnit, UnitId, UnitKind},
    util::is_valid_time_step,
};

pub fn create_network(params: NetworkParams) -> Result<Network, SimpleError> {
    let seed = params
        .technical_params
        .seed_override
        .unwrap_or_else(|| rand::thread_rng().gen());

    let mut rng = StdRng::seed_from_u64(seed);
    debug!("creating network with seed {}", seed);

    create_network_with_rng(params, &mut rng)
}

pub fn create_network_with_rng<R: Rng>(
    params: NetworkParams,
    rng: &mut R,
) -> Result<Network, SimpleError> {
    try_with!(
        params::validate_network_params(&params),
        "invalid network parameters"
    );

    let model = membrane_model::create(&params.membrane_model_params)?;
    let electrical = ElectricalProperties::from(&params.unit_params);

    let mut connectome = Connectome::new();
    for _ in 0..params.num_neurons {
        connectome.add_neuron(electrical);
    }

    topology::wire_randomly(&mut connectome, &params.connectivity_params, rng);

    debug!(
        "created network with {} neurons, {} units and {} connections",
        params.num_neurons,
        connectome.num_units(),
        connectome.num_edges()
    );

    Ok(Network {
        connectome,
        model,
        t: 0.0,
        step_count: 0,
    })
}

pub struct Network {
    connectome: Connectome,
    model: Box<dyn MembraneModel>,
    t: f64,
    step_count: usize,
}

impl Network {
    pub fn get_num_neurons(&self) -> usize {
        self.connectome.neuron_ids().len()
    }

    pub fn get_num_units(&self) -> usize {
        self.connectome.num_units()
    }

    pub fn neuron_ids(&self) -> &[UnitId] {
        self.connectome.neuron_ids()
    }

    pub fn input_ids(&self) -> &[UnitId] {
        self.connectome.input_ids()
    }

    pub fn unit(&self, id: UnitId) -> SimpleResult<&ExcitableUnit> {
        self.connectome.unit(id)
    }

    pub fn unit_id(&self, label: &str) -> Option<UnitId> {
        self.connectome.unit_id(label)
    }

    pub fn connectome(&self) -> &Connectome {
        &self.connectome
    }

    pub fn model(&self) -> &dyn MembraneModel {
        self.model.as_ref()
    }

    pub fn get_t(&self) -> f64 {
        self.t
    }

    pub fn get_step_count(&self) -> usize {
        self.step_count
    }

    pub fn connect(
        &mut self,
        source: UnitId,
        target: UnitId,
        selection: DendriteSelection,
    ) -> SimpleResult<()> {
        self.connectome.connect(source, target, selection)
    }

    pub fn spawn_dendrite(&mut self, owner: UnitId) -> SimpleResult<usize> {
        self.connectome.spawn_dendrite(owner)
    }

    pub fn is_connected_to(&self, source: UnitId, target: UnitId) -> SimpleResult<bool> {
        self.connectome.is_connected_to(source, target)
    }

    pub fn add_input_neuron(&mut self, i0: f64) -> UnitId {
        self.connectome.add_input_neuron(i0)
    }

    pub fn set_input_current(&mut self, id: UnitId, i0: f64) -> SimpleResult<()> {
        let unit = self.connectome.unit_mut(id)?;

        if !unit.set_input_current(i0) {
            return Err(SimpleError::new(format!(
                "Unit {} is not an input neuron",
                unit.label()
            )));
        }

        Ok(())
    }

    pub fn set_applied_current<F>(&mut self, id: UnitId, applied_current: F) -> SimpleResult<()>
    where
        F: Fn(&ExcitableUnit) -> f64 + 'static,
    {
        self.replace_applied_current(id, Some(Box::new(applied_current)))
    }

    pub fn clear_applied_current(&mut self, id: UnitId) -> SimpleResult<()> {
        self.replace_applied_current(id, None)
    }

    fn replace_applied_current(
        &mut self,
        id: UnitId,
        applied_current: Option<AppliedCurrent>,
    ) -> SimpleResult<()> {
        let unit = self.connectome.unit_mut(id)?;

        if !unit.set_applied_current(applied_current) {
            return Err(SimpleError::new(format!(
                "Unit {} is not a neuron",
                unit.label()
            )));
        }

        Ok(())
    }

    pub fn set_voltage(&mut self, id: UnitId, voltage: f64) -> SimpleResult<()> {
        self.connectome.unit_mut(id)?.set_voltage(voltage);
        Ok(())
    }

    pub fn reachable_units(&self) -> Vec<UnitId> {
        self.connectome.reachable_units()
    }

    /// Advances every reachable unit by `dt`. All units integrate against the
    /// voltages committed by the previous step before any of them commits.
    pub fn step(&mut self, dt: f64) -> SimpleResult<()> {
        if !is_valid_time_step(dt) {
            return Err(SimpleError::new("dt must be finite and strictly positive"));
        }

        let reachable = self.connectome.reachable_units();

        for id in &reachable {
            let synaptic_input = self.connectome.synaptic_input_current(*id)?;
            self.connectome
                .unit_mut(*id)?
                .integrate(self.model.as_ref(), synaptic_input, dt);
        }

        for id in &reachable {
            self.connectome.unit_mut(*id)?.commit();
        }

        self.t += dt;
        self.step_count += 1;

        trace!("step {} done, t = {}", self.step_count, self.t);

        Ok(())
    }

    pub fn run(&mut self, dt: f64, num_steps: usize) -> SimpleResult<()> {
        for _ in 0..num_steps {
            self.step(dt)?;
        }
        Ok(())
    }

    pub fn extract_topology_snapshot(&self) -> TopologySnapshot {
        let label = |id: UnitId| self.connectome.units()[id.0].label().to_string();

        TopologySnapshot {
            units: self
                .connectome
                .units()
                .iter()
                .map(|unit| UnitDescriptor {
                    id: unit.label().to_string(),
                    kind: unit.kind(),
                })
                .collect(),
            edges: self
                .connectome
                .edges()
                .into_iter()
                .map(|(from, to)| Edge {
                    from: label(from),
                    to: label(to),
                })
                .collect(),
        }
    }

    /// Voltages and channel states of all reachable units, followed by inputs.
    pub fn extract_state_snapshot(&self) -> StateSnapshot {
        let unit_states = self
            .connectome
            .reachable_units()
            .into_iter()
            .chain(self.connectome.input_ids().iter().copied())
            .map(|id| {
                let unit = &self.connectome.units()[id.0];
                let channels = unit.channels();
                let has_channels = unit.kind() != UnitKind::Input;

                UnitState {
                    id: unit.label().to_string(),
                    kind: unit.kind(),
                    voltage: unit.voltage(),
                    m: has_channels.then_some(channels.m),
                    h: has_channels.then_some(channels.h),
                    n: has_channels.then_some(channels.n),
                    phase: has_channels.then_some(channels.phase),
                }
            })
            .collect();

        StateSnapshot {
            t: self.t,
            unit_states,
        }
    }
}
