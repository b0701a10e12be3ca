//! JSON persistence for the full collection state under ~/.mathic/.
//!
//! Save files are hand-editable, so loading never trusts them: every module
//! is re-validated against the catalog and repaired before use.

use crate::catalog::Catalog;
use crate::module::{Module, DEFAULT_MAX_ENHANCEMENTS, MAX_SUBSTATS, MAX_SUBSTAT_ROLLS};
use crate::state::MathicState;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const STATE_FILENAME: &str = "mathic.json";

/// Get the ~/.mathic/ directory path, creating it if needed.
pub fn mathic_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".mathic");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn state_path() -> io::Result<PathBuf> {
    Ok(mathic_dir()?.join(STATE_FILENAME))
}

/// Save the collection as pretty-printed JSON to ~/.mathic/mathic.json.
pub fn save_state(state: &MathicState) -> io::Result<()> {
    save_state_to(state, &state_path()?)
}

pub fn save_state_to(state: &MathicState, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the collection from ~/.mathic/mathic.json, returning an empty state
/// if the file is missing or unreadable. Loaded data is sanitized.
pub fn load_state(catalog: &Catalog) -> MathicState {
    match state_path() {
        Ok(path) => load_state_from(catalog, &path),
        Err(_) => MathicState::new(),
    }
}

pub fn load_state_from(catalog: &Catalog, path: &Path) -> MathicState {
    let mut state = match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => MathicState::new(),
    };
    sanitize_state(catalog, &mut state);
    state
}

/// Repair a deserialized state in place so every invariant holds again:
/// out-of-range substat rolls and values are clamped, substats that violate
/// the module's restrictions are dropped, enhancement tracking is recomputed,
/// and loadout references to missing modules are cleared.
pub fn sanitize_state(catalog: &Catalog, state: &mut MathicState) {
    for module in state.modules.values_mut() {
        sanitize_module(catalog, module);
    }

    let module_ids: Vec<_> = state.modules.keys().copied().collect();
    for loadout in state.loadouts.values_mut() {
        let dangling: Vec<_> = loadout
            .assigned()
            .map(|(_, id)| id)
            .filter(|id| !module_ids.contains(id))
            .collect();
        for id in dangling {
            loadout.clear_module(id);
        }
    }
}

fn sanitize_module(catalog: &Catalog, module: &mut Module) {
    module.max_enhancements = module.max_enhancements.min(DEFAULT_MAX_ENHANCEMENTS);

    if let Some(cap) = catalog.main_stat_max(module.module_type, module.main_stat) {
        module.main_stat_value = module.main_stat_value.clamp(0.0, cap);
    }

    // Drop substats the module could never legally hold, keeping the first
    // occurrence of any duplicated stat.
    let substats = std::mem::take(&mut module.substats);
    for mut substat in substats {
        if module.substats.len() == MAX_SUBSTATS || module.substat_allowed(substat.stat).is_err() {
            continue;
        }
        substat.rolls_used = substat.rolls_used.clamp(1, MAX_SUBSTAT_ROLLS);
        let range = catalog.roll_range(substat.stat);
        let min = (range.min * substat.rolls_used as u32) as f64;
        let max = (range.max * substat.rolls_used as u32) as f64;
        substat.value = substat.value.clamp(min, max);
        module.substats.push(substat);
    }

    // Over-budget roll counts on individual lines are kept as-is; only the
    // tracking counter is capped at the budget.
    module.sync_enhancement_tracking();

    if module.matrix.is_none() {
        module.matrix_count = 0;
    } else {
        let valid = module
            .matrix
            .as_deref()
            .and_then(|name| catalog.matrix(name))
            .is_some_and(|matrix| matrix.allowed_types.contains(&module.module_type));
        if valid {
            module.matrix_count = module.matrix_count.clamp(1, crate::catalog::MAX_MATRIX_COUNT);
        } else {
            module.matrix = None;
            module.matrix_count = 0;
        }
    }
}
