//! Bot configuration — the sole input governing the bot engine's behavior.
//!
//! Loaded once at startup from the store, mutated by user controls, and
//! persisted on every change.

use serde::{Deserialize, Serialize};

/// Coarse risk label shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Per-strategy enable flags feeding the scan diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyToggles {
    pub sma_8w: bool,
    pub stock_to_flow: bool,
    pub dca: bool,
    pub fibonacci: bool,
}

impl Default for StrategyToggles {
    fn default() -> Self {
        Self {
            sma_8w: true,
            stock_to_flow: true,
            dca: true,
            fibonacci: false,
        }
    }
}

/// Named risk presets. Selecting one overwrites leverage and allocation
/// atomically — the two are never updated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskPreset {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskPreset {
    pub fn leverage(self) -> u32 {
        match self {
            RiskPreset::Conservative => 2,
            RiskPreset::Balanced => 10,
            RiskPreset::Aggressive => 50,
        }
    }

    pub fn max_allocation(self) -> f64 {
        match self {
            RiskPreset::Conservative => 500.0,
            RiskPreset::Balanced => 2_000.0,
            RiskPreset::Aggressive => 5_000.0,
        }
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            RiskPreset::Conservative => RiskLevel::Low,
            RiskPreset::Balanced => RiskLevel::Medium,
            RiskPreset::Aggressive => RiskLevel::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskPreset::Conservative => "CONSERVATIVE",
            RiskPreset::Balanced => "BALANCED",
            RiskPreset::Aggressive => "AGGRESSIVE",
        }
    }

    pub fn next(self) -> Self {
        match self {
            RiskPreset::Conservative => RiskPreset::Balanced,
            RiskPreset::Balanced => RiskPreset::Aggressive,
            RiskPreset::Aggressive => RiskPreset::Conservative,
        }
    }
}

/// Persisted bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    pub active: bool,
    pub risk_level: RiskLevel,
    pub leverage: u32,
    pub max_allocation_per_trade: f64,
    /// Orders fire without confirmation when set; otherwise the engine waits
    /// for an explicit authorize/reject.
    pub auto_execute: bool,
    pub strategies: StrategyToggles,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            active: false,
            risk_level: RiskLevel::Medium,
            leverage: 5,
            max_allocation_per_trade: 1_000.0,
            auto_execute: false,
            strategies: StrategyToggles::default(),
        }
    }
}

impl BotConfig {
    /// Apply a risk preset, overwriting leverage and allocation together.
    pub fn apply_preset(&mut self, preset: RiskPreset) {
        self.leverage = preset.leverage();
        self.max_allocation_per_trade = preset.max_allocation();
        self.risk_level = preset.risk_level();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run() {
        let config = BotConfig::default();
        assert!(!config.active);
        assert_eq!(config.leverage, 5);
        assert_eq!(config.max_allocation_per_trade, 1_000.0);
        assert!(!config.auto_execute);
        assert!(config.strategies.sma_8w);
        assert!(!config.strategies.fibonacci);
    }

    #[test]
    fn preset_overwrites_both_fields() {
        let mut config = BotConfig::default();
        config.apply_preset(RiskPreset::Aggressive);
        assert_eq!(config.leverage, 50);
        assert_eq!(config.max_allocation_per_trade, 5_000.0);
        assert_eq!(config.risk_level, RiskLevel::High);

        config.apply_preset(RiskPreset::Conservative);
        assert_eq!(config.leverage, 2);
        assert_eq!(config.max_allocation_per_trade, 500.0);
    }

    #[test]
    fn preset_cycle_covers_all_three() {
        let start = RiskPreset::Conservative;
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let mut config = BotConfig::default();
        config.apply_preset(RiskPreset::Balanced);
        config.auto_execute = true;
        let json = serde_json::to_string(&config).unwrap();
        let back: BotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
