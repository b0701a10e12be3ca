//! Owning registry of modules and named loadouts. This is the surface the
//! GUI and storage layers talk to; every operation runs to completion and
//! returns synchronously.

use crate::catalog::{Catalog, ModuleType, Stat, MAX_MATRIX_COUNT};
use crate::error::MathicError;
use crate::loadout::{assign_module, loadout_totals, remove_module, Loadout};
use crate::module::Module;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MathicState {
    pub modules: HashMap<Uuid, Module>,
    pub loadouts: HashMap<String, Loadout>,
}

impl MathicState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a new module. Fails if the main stat is not a
    /// catalog option for the type.
    pub fn create_module(
        &mut self,
        catalog: &Catalog,
        module_type: ModuleType,
        slot: u8,
        main_stat: Stat,
    ) -> Result<Uuid, MathicError> {
        let module = Module::create(catalog, module_type, slot, main_stat)?;
        let id = module.id;
        self.modules.insert(id, module);
        Ok(id)
    }

    pub fn module(&self, id: Uuid) -> Option<&Module> {
        self.modules.get(&id)
    }

    pub fn module_mut(&mut self, id: Uuid) -> Option<&mut Module> {
        self.modules.get_mut(&id)
    }

    /// Delete a module and clear it from every loadout slot referencing it.
    pub fn delete_module(&mut self, id: Uuid) -> Result<(), MathicError> {
        if self.modules.remove(&id).is_none() {
            return Err(MathicError::ModuleNotFound);
        }
        for loadout in self.loadouts.values_mut() {
            loadout.clear_module(id);
        }
        Ok(())
    }

    /// Register an empty loadout under a name. Existing loadouts are left
    /// alone; returns whether a new one was created.
    pub fn create_loadout(&mut self, name: &str) -> bool {
        if self.loadouts.contains_key(name) {
            return false;
        }
        self.loadouts.insert(name.to_string(), Loadout::new());
        true
    }

    pub fn delete_loadout(&mut self, name: &str) -> bool {
        self.loadouts.remove(name).is_some()
    }

    pub fn loadout(&self, name: &str) -> Option<&Loadout> {
        self.loadouts.get(name)
    }

    /// Assign a module into a loadout slot, enforcing slot-type
    /// compatibility. Nothing is changed on failure.
    pub fn assign_module_to_loadout(
        &mut self,
        name: &str,
        slot: u8,
        module_id: Uuid,
    ) -> Result<(), MathicError> {
        let module = self
            .modules
            .get(&module_id)
            .ok_or(MathicError::ModuleNotFound)?;
        let loadout = self
            .loadouts
            .get_mut(name)
            .ok_or(MathicError::LoadoutNotFound)?;
        assign_module(loadout, slot, module)
    }

    pub fn remove_module_from_loadout(
        &mut self,
        name: &str,
        slot: u8,
    ) -> Result<Option<Uuid>, MathicError> {
        let loadout = self
            .loadouts
            .get_mut(name)
            .ok_or(MathicError::LoadoutNotFound)?;
        Ok(remove_module(loadout, slot))
    }

    /// Total stats across every module assigned to the named loadout.
    pub fn loadout_stats(&self, name: &str) -> Result<HashMap<Stat, f64>, MathicError> {
        let loadout = self.loadouts.get(name).ok_or(MathicError::LoadoutNotFound)?;
        Ok(loadout_totals(loadout, &self.modules))
    }

    /// Assign a set-bonus matrix to a module. The matrix must exist, allow
    /// the module's type, and the stack count must be 1-3.
    pub fn set_module_matrix(
        &mut self,
        catalog: &Catalog,
        module_id: Uuid,
        matrix_name: &str,
        count: u8,
    ) -> Result<(), MathicError> {
        if count == 0 || count > MAX_MATRIX_COUNT {
            return Err(MathicError::InvalidCount(count));
        }
        let module = self
            .modules
            .get_mut(&module_id)
            .ok_or(MathicError::ModuleNotFound)?;
        let matrix = catalog
            .matrix(matrix_name)
            .ok_or_else(|| MathicError::InvalidMatrixForType(matrix_name.to_string()))?;
        if !matrix.allowed_types.contains(&module.module_type) {
            return Err(MathicError::InvalidMatrixForType(matrix_name.to_string()));
        }
        module.matrix = Some(matrix.name.clone());
        module.matrix_count = count;
        Ok(())
    }

    pub fn clear_module_matrix(&mut self, module_id: Uuid) -> Result<(), MathicError> {
        let module = self
            .modules
            .get_mut(&module_id)
            .ok_or(MathicError::ModuleNotFound)?;
        module.matrix = None;
        module.matrix_count = 0;
        Ok(())
    }
}
