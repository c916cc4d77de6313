use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    membrane_model::{ChannelState, IonicCurrents, MembraneModel, UpdateOrder},
    params::UnitParams,
};

/// Stable index of a unit inside its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Neuron,
    Dendrite,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricalProperties {
    /// mV
    pub resting_potential: f64,
    /// kΩ·cm²
    pub axial_resistance: f64,
    /// µF/cm²
    pub membrane_capacitance: f64,
}

impl From<&UnitParams> for ElectricalProperties {
    fn from(params: &UnitParams) -> Self {
        Self {
            resting_potential: params.resting_potential,
            axial_resistance: params.axial_resistance,
            membrane_capacitance: params.membrane_capacitance,
        }
    }
}

/// External current applied to a neuron, in µA/cm².
pub type AppliedCurrent = Box<dyn Fn(&ExcitableUnit) -> f64>;

enum Role {
    Neuron {
        electrical: ElectricalProperties,
        applied_current: Option<AppliedCurrent>,
    },
    Dendrite {
        electrical: ElectricalProperties,
        owner: UnitId,
    },
    Input {
        current: f64,
    },
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Neuron {
                electrical,
                applied_current,
            } => f
                .debug_struct("Neuron")
                .field("electrical", electrical)
                .field("has_applied_current", &applied_current.is_some())
                .finish(),
            Role::Dendrite { electrical, owner } => f
                .debug_struct("Dendrite")
                .field("electrical", electrical)
                .field("owner", owner)
                .finish(),
            Role::Input { current } => f.debug_struct("Input").field("current", current).finish(),
        }
    }
}

#[derive(Debug)]
pub struct ExcitableUnit {
    id: UnitId,
    label: String,
    role: Role,
    voltage: f64,
    channels: ChannelState,
    pending_dv: f64,
    pub(crate) dendrites: Vec<UnitId>,
    pub(crate) connected_to: Vec<UnitId>,
}

impl ExcitableUnit {
    pub fn new_neuron(id: UnitId, label: String, electrical: ElectricalProperties) -> Self {
        Self::new(
            id,
            label,
            electrical.resting_potential,
            Role::Neuron {
                electrical,
                applied_current: None,
            },
        )
    }

    pub fn new_dendrite(
        id: UnitId,
        label: String,
        electrical: ElectricalProperties,
        owner: UnitId,
    ) -> Self {
        Self::new(
            id,
            label,
            electrical.resting_potential,
            Role::Dendrite { electrical, owner },
        )
    }

    pub fn new_input(id: UnitId, label: String, current: f64) -> Self {
        Self::new(id, label, 0.0, Role::Input { current })
    }

    fn new(id: UnitId, label: String, voltage: f64, role: Role) -> Self {
        Self {
            id,
            label,
            role,
            voltage,
            channels: ChannelState::default(),
            pending_dv: 0.0,
            dendrites: Vec::new(),
            connected_to: Vec::new(),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> UnitKind {
        match self.role {
            Role::Neuron { .. } => UnitKind::Neuron,
            Role::Dendrite { .. } => UnitKind::Dendrite,
            Role::Input { .. } => UnitKind::Input,
        }
    }

    /// `None` for input neurons, which carry no membrane.
    pub fn electrical(&self) -> Option<&ElectricalProperties> {
        match &self.role {
            Role::Neuron { electrical, .. } | Role::Dendrite { electrical, .. } => Some(electrical),
            Role::Input { .. } => None,
        }
    }

    pub fn owner(&self) -> Option<UnitId> {
        match self.role {
            Role::Dendrite { owner, .. } => Some(owner),
            _ => None,
        }
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn channels(&self) -> &ChannelState {
        &self.channels
    }

    pub fn pending_dv(&self) -> f64 {
        self.pending_dv
    }

    /// Units feeding synaptic current into this one, spawned dendrites first in
    /// creation order.
    pub fn dendrites(&self) -> &[UnitId] {
        &self.dendrites
    }

    pub fn num_dendrites(&self) -> usize {
        self.dendrites.len()
    }

    pub fn connected_to(&self) -> &[UnitId] {
        &self.connected_to
    }

    pub fn input_current(&self) -> Option<f64> {
        match self.role {
            Role::Input { current } => Some(current),
            _ => None,
        }
    }

    pub(crate) fn set_voltage(&mut self, voltage: f64) {
        self.voltage = voltage;
    }

    /// Returns false if this unit is not an input neuron.
    pub(crate) fn set_input_current(&mut self, i0: f64) -> bool {
        match &mut self.role {
            Role::Input { current } => {
                *current = i0;
                true
            }
            _ => false,
        }
    }

    /// Returns false if this unit is not a neuron.
    pub(crate) fn set_applied_current(&mut self, applied: Option<AppliedCurrent>) -> bool {
        match &mut self.role {
            Role::Neuron {
                applied_current, ..
            } => {
                *applied_current = applied;
                true
            }
            _ => false,
        }
    }

    pub fn applied_current(&self) -> f64 {
        match &self.role {
            Role::Neuron {
                applied_current: Some(applied_current),
                ..
            } => applied_current(self),
            _ => 0.0,
        }
    }

    pub fn synaptic_output_current(&self) -> f64 {
        match &self.role {
            Role::Neuron { electrical, .. } | Role::Dendrite { electrical, .. } => {
                ((self.voltage - electrical.resting_potential) / electrical.axial_resistance)
                    .max(0.0)
            }
            Role::Input { current } => *current,
        }
    }

    pub fn ionic_currents(&self, model: &dyn MembraneModel) -> IonicCurrents {
        match self.role {
            Role::Input { .. } => IonicCurrents::default(),
            _ => model.ionic_currents(&self.channels, self.voltage),
        }
    }

    pub fn is_refractory(&self, model: &dyn MembraneModel) -> bool {
        match self.role {
            Role::Input { .. } => false,
            _ => model.is_refractory(&self.channels),
        }
    }

    /// Computes the voltage change for this step into the pending buffer without
    /// touching `voltage`. Only neurons advance their channel state; dendrites
    /// relay current with frozen channels.
    pub fn integrate(&mut self, model: &dyn MembraneModel, synaptic_input: f64, dt: f64) {
        let (membrane_capacitance, advances_channels) = match &self.role {
            Role::Neuron { electrical, .. } => (electrical.membrane_capacitance, true),
            Role::Dendrite { electrical, .. } => (electrical.membrane_capacitance, false),
            Role::Input { .. } => return,
        };

        let update_order = model.update_order();

        if advances_channels && update_order == UpdateOrder::StateFirst {
            model.advance_internal_state(&mut self.channels, self.voltage, dt);
        }

        let mut input_current = -self.ionic_currents(model).total();

        if !self.is_refractory(model) {
            input_current += self.applied_current() + synaptic_input;
        }

        self.pending_dv = input_current / membrane_capacitance * dt;

        if advances_channels && update_order == UpdateOrder::CurrentsFirst {
            model.advance_internal_state(&mut self.channels, self.voltage, dt);
        }
    }

    pub fn commit(&mut self) {
        if let Role::Input { .. } = self.role {
            return;
        }

        self.voltage += self.pending_dv;
        self.pending_dv = 0.0;
    }
}
