/// Sodium maximum conductance, in mS/cm^2
pub const G_NA: f64 = 120.0;
/// Sodium Nernst reversal potential, in mV
pub const E_NA: f64 = 50.0;

/// Potassium maximum conductance, in mS/cm^2
pub const G_K: f64 = 36.0;
/// Potassium Nernst reversal potential, in mV
pub const E_K: f64 = -77.0;

/// Leak maximum conductance, in mS/cm^2
pub const G_LEAK: f64 = 0.3;
/// Leak Nernst reversal potential, in mV
pub const E_LEAK: f64 = -54.387;

// steady-state channel gating at -65 mV
pub const INITIAL_M: f64 = 0.0530;
pub const INITIAL_H: f64 = 0.5960;
pub const INITIAL_N: f64 = 0.3176;
