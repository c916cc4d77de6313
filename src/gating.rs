//! Voltage-dependent opening and closing rates of the sodium (`m`, `h`) and
//! potassium (`n`) channel gates, in 1/ms, for a membrane potential in mV.

use crate::util::exp_ratio;

pub fn alpha_m(v: f64) -> f64 {
    0.1 * exp_ratio(v + 40.0, 10.0)
}

pub fn beta_m(v: f64) -> f64 {
    4.0 * (-(v + 65.0) / 18.0).exp()
}

pub fn alpha_h(v: f64) -> f64 {
    0.07 * (-(v + 65.0) / 20.0).exp()
}

pub fn beta_h(v: f64) -> f64 {
    1.0 / (1.0 + (-(v + 35.0) / 10.0).exp())
}

pub fn alpha_n(v: f64) -> f64 {
    0.01 * exp_ratio(v + 55.0, 10.0)
}

pub fn beta_n(v: f64) -> f64 {
    0.125 * (-(v + 65.0) / 80.0).exp()
}

/// One forward Euler step of `dx/dt = alpha * (1 - x) - beta * x`, kept in [0, 1].
pub fn euler_step(x: f64, alpha: f64, beta: f64, dt: f64) -> f64 {
    (x + (alpha * (1.0 - x) - beta * x) * dt).clamp(0.0, 1.0)
}
