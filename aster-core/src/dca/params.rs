//! DCA projection inputs and their sanitization.

use serde::{Deserialize, Serialize};

/// Contribution cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Weekly => 52,
            Frequency::Biweekly => 26,
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Frequency::Weekly => Frequency::Biweekly,
            Frequency::Biweekly => Frequency::Monthly,
            Frequency::Monthly => Frequency::Quarterly,
            Frequency::Quarterly => Frequency::Weekly,
        }
    }
}

/// Stochastic profile of the simulated asset in the backtest segment.
///
/// `per_period_volatility` bounds the uniform noise term; `monthly_drift` is
/// the trend component, rescaled to the chosen period length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityProfile {
    pub per_period_volatility: f64,
    pub monthly_drift: f64,
}

impl VolatilityProfile {
    /// Large-cap profile (BTC-like).
    pub fn major() -> Self {
        Self {
            per_period_volatility: 0.04,
            monthly_drift: 0.008,
        }
    }

    /// Altcoin profile — noisier, stronger drift.
    pub fn altcoin() -> Self {
        Self {
            per_period_volatility: 0.08,
            monthly_drift: 0.012,
        }
    }

    pub fn for_symbol(symbol: &str) -> Self {
        if symbol.eq_ignore_ascii_case("BTC") {
            Self::major()
        } else {
            Self::altcoin()
        }
    }
}

/// Tunables of the smart-accumulation rule.
///
/// These were magic constants in the first cut; they live here so scenarios
/// can vary them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulationTuning {
    /// Contribution multiplier while price sits below the simulated SMA.
    pub below_sma_boost: f64,
    /// Contribution multiplier once price is overextended above the SMA.
    pub overextended_cut: f64,
    /// How far above the SMA (percent) counts as overextended.
    pub overextension_threshold_pct: f64,
    /// Per-period fraction the simulated SMA closes toward price.
    pub sma_drift_factor: f64,
}

impl Default for AccumulationTuning {
    fn default() -> Self {
        Self {
            below_sma_boost: 1.5,
            overextended_cut: 0.5,
            overextension_threshold_pct: 30.0,
            sma_drift_factor: 0.25,
        }
    }
}

/// Full input set for one projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcaParams {
    pub contribution: f64,
    pub frequency: Frequency,
    pub projection_years: u32,
    pub backtest_years: u32,
    pub target_apy_pct: f64,
    pub smart_accumulation: bool,
    pub current_price: f64,
    pub current_sma: f64,
    pub volatility: VolatilityProfile,
    pub tuning: AccumulationTuning,
}

impl Default for DcaParams {
    fn default() -> Self {
        Self {
            contribution: 500.0,
            frequency: Frequency::Monthly,
            projection_years: 5,
            backtest_years: 1,
            target_apy_pct: 45.0,
            smart_accumulation: false,
            current_price: 96_420.50,
            current_sma: 92_100.0,
            volatility: VolatilityProfile::major(),
            tuning: AccumulationTuning::default(),
        }
    }
}

impl DcaParams {
    /// Clamp every numeric input to a recognized range.
    ///
    /// The projection engine never errors: NaN, infinite, or negative inputs
    /// are substituted here before any arithmetic runs.
    pub fn sanitized(mut self) -> Self {
        if !self.contribution.is_finite() || self.contribution < 0.0 {
            self.contribution = 0.0;
        }
        if !self.target_apy_pct.is_finite() {
            self.target_apy_pct = 0.0;
        }
        // Keep (1 + apy) positive so the per-period root is defined.
        self.target_apy_pct = self.target_apy_pct.clamp(-95.0, 10_000.0);

        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            self.current_price = 1.0;
        }
        if !self.current_sma.is_finite() || self.current_sma <= 0.0 {
            self.current_sma = self.current_price;
        }
        if !self.volatility.per_period_volatility.is_finite()
            || self.volatility.per_period_volatility < 0.0
        {
            self.volatility.per_period_volatility = 0.0;
        }
        if !self.volatility.monthly_drift.is_finite() {
            self.volatility.monthly_drift = 0.0;
        }
        self.projection_years = self.projection_years.min(50);
        self.backtest_years = self.backtest_years.min(10);
        self
    }
}
