//! DCA projection engine.
//!
//! Maps a parameter set and an injected RNG to an ordered series of
//! projection points: a simulated-past backtest segment (`period <= 0`) and
//! a compounding future segment (`period > 0`). The series is regenerated
//! wholesale on every input change — points are never mutated in place.

use crate::dca::params::{AccumulationTuning, DcaParams};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Amplitude of the cosmetic noise on future chart values (±0.5%).
///
/// Applied only to the plotted value of each point; summary figures read the
/// un-noised accumulator.
const DISPLAY_NOISE: f64 = 0.01;

/// Regime-draw probabilities for smart accumulation in the future segment,
/// where no simulated price path exists to compare against an SMA.
const REGIME_BOOST_P: f64 = 0.25;
const REGIME_CUT_P: f64 = 0.08;

/// One projection sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Signed period index; negative = past, 0 = today, positive = future.
    pub period: i64,
    pub label: String,
    /// Cumulative contributions. Non-decreasing across the series.
    pub total_invested: f64,
    /// Mark-to-model value. Future points carry the display noise.
    pub portfolio_value: f64,
    pub is_past: bool,
    /// Discrete purchase marker for the chart, when this period buys.
    pub buy_point: Option<f64>,
    /// Simulated SMA level, present when smart accumulation is on.
    pub sma_level: Option<f64>,
}

/// Headline figures derived from the final (un-noised) state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_invested: f64,
    pub final_value: f64,
    /// Zero when nothing was invested.
    pub total_return_pct: f64,
}

/// A complete projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<ProjectionPoint>,
    pub summary: ProjectionSummary,
}

/// Contribution multiplier under the smart-accumulation rule.
fn accumulation_scale(price: f64, sma: f64, tuning: &AccumulationTuning) -> f64 {
    if price < sma {
        tuning.below_sma_boost
    } else if sma > 0.0 && (price - sma) / sma * 100.0 > tuning.overextension_threshold_pct {
        tuning.overextended_cut
    } else {
        1.0
    }
}

/// Run a full projection. Never panics; invalid inputs are clamped first.
pub fn project(params: &DcaParams, rng: &mut StdRng) -> Projection {
    let p = params.clone().sanitized();
    let ppy = i64::from(p.frequency.periods_per_year());
    let past_periods = i64::from(p.backtest_years) * ppy;
    let future_periods = i64::from(p.projection_years) * ppy;

    let mut points = Vec::with_capacity((past_periods + future_periods + 1) as usize);
    let mut invested = 0.0_f64;
    let mut value = 0.0_f64;

    // Simulated market state driving the accumulation rule. The SMA follows
    // the same stochastic process as the price, drifting more slowly.
    let mut sim_price = p.current_price;
    let mut sim_sma = p.current_sma;

    let trend_per_period = p.volatility.monthly_drift * (12.0 / ppy as f64);

    // ── Backtest segment: -past_periods ..= 0 ─────────────────────────
    for period in -past_periods..=0 {
        let scale = if p.smart_accumulation {
            accumulation_scale(sim_price, sim_sma, &p.tuning)
        } else {
            1.0
        };
        let contribution = p.contribution * scale;

        if period == -past_periods {
            // Seed: the first buy is both the invested total and the value.
            invested = contribution;
            value = contribution;
        } else {
            let noise = (rng.gen::<f64>() - 0.5) * p.volatility.per_period_volatility;
            let period_return = 1.0 + noise + trend_per_period;
            value = value * period_return + contribution;
            invested += contribution;
        }

        if p.smart_accumulation {
            let price_noise = (rng.gen::<f64>() - 0.5) * p.volatility.per_period_volatility;
            sim_price *= 1.0 + price_noise + trend_per_period;
            sim_sma += (sim_price - sim_sma) * p.tuning.sma_drift_factor;
        }

        points.push(ProjectionPoint {
            period,
            label: if period == 0 {
                "TODAY".into()
            } else {
                String::new()
            },
            total_invested: invested,
            portfolio_value: value,
            is_past: true,
            buy_point: Some(value),
            sma_level: p.smart_accumulation.then_some(sim_sma),
        });
    }

    // ── Future segment: 1 ..= future_periods ──────────────────────────
    let rate_per_period =
        (1.0 + p.target_apy_pct / 100.0).powf(1.0 / ppy as f64) - 1.0;
    let buy_marker_stride: i64 = match p.frequency.periods_per_year() {
        52 => 8,
        _ => 1,
    };

    for period in 1..=future_periods {
        let scale = if p.smart_accumulation {
            let regime = rng.gen::<f64>();
            if regime < REGIME_BOOST_P {
                p.tuning.below_sma_boost
            } else if regime > 1.0 - REGIME_CUT_P {
                p.tuning.overextended_cut
            } else {
                1.0
            }
        } else {
            1.0
        };
        let contribution = p.contribution * scale;

        invested += contribution;
        value = value * (1.0 + rate_per_period) + contribution;

        let noise = 1.0 + (rng.gen::<f64>() - 0.5) * DISPLAY_NOISE;
        let chart_value = value * noise;

        points.push(ProjectionPoint {
            period,
            label: if period == future_periods {
                "TARGET".into()
            } else {
                String::new()
            },
            total_invested: invested,
            portfolio_value: chart_value,
            is_past: false,
            buy_point: (period % buy_marker_stride == 0).then_some(chart_value),
            sma_level: None,
        });
    }

    let summary = ProjectionSummary {
        total_invested: invested,
        final_value: value,
        total_return_pct: if invested > 0.0 {
            (value - invested) / invested * 100.0
        } else {
            0.0
        },
    };

    Projection { points, summary }
}
