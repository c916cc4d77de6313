use serde::{Deserialize, Serialize};
use simple_error::SimpleError;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{
    constants::{E_K, E_LEAK, E_NA, G_K, G_LEAK, G_NA, INITIAL_H, INITIAL_M, INITIAL_N},
    gating,
    params::{GatingVariableParams, MembraneModelParams, StateMachineParams},
    util::sigmoid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Resting,
    Depolarizing,
    Repolarizing,
    Redepolarizing,
}

/// Channel state of a unit. The gating variable model evolves `m`, `h` and `n`
/// continuously and never leaves `Phase::Resting`; the state machine model
/// walks through the phases and recomputes `m` and `n` from the voltage.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelState {
    pub m: f64,
    pub h: f64,
    pub n: f64,
    pub phase: Phase,
    pub refractory_time: f64,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            m: INITIAL_M,
            h: INITIAL_H,
            n: INITIAL_N,
            phase: Phase::Resting,
            refractory_time: 0.0,
        }
    }
}

/// Membrane currents in µA/cm², positive when flowing out of the unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IonicCurrents {
    pub sodium: f64,
    pub potassium: f64,
    pub leak: f64,
}

impl IonicCurrents {
    pub fn total(&self) -> f64 {
        self.sodium + self.potassium + self.leak
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrder {
    /// currents are read from the channel state before it advances
    CurrentsFirst,
    /// the channel state advances before currents are read
    StateFirst,
}

pub trait MembraneModel {
    fn ionic_currents(&self, channels: &ChannelState, voltage: f64) -> IonicCurrents;

    fn advance_internal_state(&self, channels: &mut ChannelState, voltage: f64, dt: f64);

    fn is_refractory(&self, channels: &ChannelState) -> bool;

    fn update_order(&self) -> UpdateOrder;
}

pub fn create(params: &MembraneModelParams) -> Result<Box<dyn MembraneModel>, SimpleError> {
    match params {
        MembraneModelParams::GatingVariables(params) => {
            Ok(Box::new(GatingVariableModel::new(params.clone())))
        }
        MembraneModelParams::StateMachine(params) => {
            Ok(Box::new(StateMachineModel::new(params.clone())?))
        }
    }
}

fn leak_current(voltage: f64) -> f64 {
    G_LEAK * (voltage - E_LEAK)
}

fn sodium_current(channels: &ChannelState, voltage: f64) -> f64 {
    G_NA * channels.m.powi(3) * channels.h * (voltage - E_NA)
}

fn potassium_current(channels: &ChannelState, voltage: f64) -> f64 {
    G_K * channels.n.powi(4) * (voltage - E_K)
}

pub struct GatingVariableModel {
    params: GatingVariableParams,
}

impl GatingVariableModel {
    pub fn new(params: GatingVariableParams) -> Self {
        Self { params }
    }
}

impl MembraneModel for GatingVariableModel {
    fn ionic_currents(&self, channels: &ChannelState, voltage: f64) -> IonicCurrents {
        IonicCurrents {
            sodium: sodium_current(channels, voltage),
            potassium: potassium_current(channels, voltage),
            leak: leak_current(voltage),
        }
    }

    fn advance_internal_state(&self, channels: &mut ChannelState, voltage: f64, dt: f64) {
        let (alpha_m, beta_m) = (gating::alpha_m(voltage), gating::beta_m(voltage));
        let (alpha_h, beta_h) = (gating::alpha_h(voltage), gating::beta_h(voltage));
        let (alpha_n, beta_n) = (gating::alpha_n(voltage), gating::beta_n(voltage));

        // each sub-step advances by the full dt
        for _ in 0..self.params.sub_steps {
            channels.m = gating::euler_step(channels.m, alpha_m, beta_m, dt);
            channels.h = gating::euler_step(channels.h, alpha_h, beta_h, dt);
            channels.n = gating::euler_step(channels.n, alpha_n, beta_n, dt);
        }
    }

    fn is_refractory(&self, channels: &ChannelState) -> bool {
        self.params.refractory_gating
            && channels.h < self.params.refractory_h_threshold
            && channels.n > self.params.refractory_n_threshold
    }

    fn update_order(&self) -> UpdateOrder {
        UpdateOrder::CurrentsFirst
    }
}

pub struct StateMachineModel {
    params: StateMachineParams,
    n_activation: Normal,
}

impl StateMachineModel {
    pub fn new(params: StateMachineParams) -> Result<Self, SimpleError> {
        let n_activation =
            Normal::new(params.n_mean, params.n_std_dev).map_err(SimpleError::from)?;

        Ok(Self {
            params,
            n_activation,
        })
    }

    fn next_phase(&self, channels: &ChannelState, voltage: f64) -> Phase {
        match channels.phase {
            Phase::Resting if voltage > self.params.action_potential_threshold => {
                Phase::Depolarizing
            }
            Phase::Resting => Phase::Resting,
            _ if channels.refractory_time >= self.params.refractory_period_duration => {
                Phase::Resting
            }
            Phase::Depolarizing if voltage > self.params.action_potential_peak => {
                Phase::Repolarizing
            }
            Phase::Repolarizing if voltage < 0.95 * E_K => Phase::Redepolarizing,
            phase => phase,
        }
    }
}

impl MembraneModel for StateMachineModel {
    fn ionic_currents(&self, channels: &ChannelState, voltage: f64) -> IonicCurrents {
        let sodium = if channels.phase == Phase::Depolarizing {
            sodium_current(channels, voltage)
        } else {
            0.0
        };

        let potassium = if channels.phase == Phase::Repolarizing {
            potassium_current(channels, voltage)
        } else {
            0.0
        };

        IonicCurrents {
            sodium,
            potassium,
            leak: leak_current(voltage),
        }
    }

    fn advance_internal_state(&self, channels: &mut ChannelState, voltage: f64, dt: f64) {
        channels.phase = self.next_phase(channels, voltage);

        if channels.phase == Phase::Resting {
            channels.refractory_time = 0.0;
        } else {
            channels.refractory_time += dt;
        }

        match channels.phase {
            Phase::Depolarizing => {
                channels.m =
                    sigmoid((voltage - self.params.m_half_activation) / self.params.m_slope);
            }
            Phase::Repolarizing => {
                channels.n = self.n_activation.cdf(voltage);
            }
            Phase::Resting | Phase::Redepolarizing => {}
        }
    }

    fn is_refractory(&self, channels: &ChannelState) -> bool {
        channels.phase != Phase::Resting
    }

    fn update_order(&self) -> UpdateOrder {
        UpdateOrder::StateFirst
    }
}
