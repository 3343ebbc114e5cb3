//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use aster_core::dca::DcaParams;

use crate::app::{AppState, View};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub view: View,
    pub dca_params: DcaParams,
    pub detail_symbol: Option<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            view: View::Dashboard,
            dca_params: DcaParams::default(),
            detail_symbol: None,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        view: app.view,
        dca_params: app.dca_params.clone(),
        detail_symbol: app.detail_symbol.clone(),
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.view = state.view;
    app.dca_params = state.dca_params;
    app.detail_symbol = state.detail_symbol;
    if app.detail_symbol.is_some() {
        app.recompute_dca();
    }
}
