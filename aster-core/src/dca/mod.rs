//! Dollar-cost-average projection engine.
//!
//! A pure function of its parameter set and an injected RNG: the backtest
//! segment replays a stochastic price path, the future segment compounds a
//! target annual yield, and the optional smart-accumulation rule scales the
//! per-period contribution against a simulated moving average.

pub mod engine;
pub mod params;

pub use engine::{project, Projection, ProjectionPoint, ProjectionSummary};
pub use params::{AccumulationTuning, DcaParams, Frequency, VolatilityProfile};
