use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const NUM_LOADOUT_SLOTS: usize = 6;

/// Six equipment slots holding module ids. Slot numbering is 1-based to
/// match the game: 1 mask, 2 transistor, 3 wristwheel, 4-6 cores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    slots: [Option<Uuid>; NUM_LOADOUT_SLOTS],
}

impl Loadout {
    pub fn new() -> Self {
        Self {
            slots: [None; NUM_LOADOUT_SLOTS],
        }
    }

    pub fn is_valid_slot(slot: u8) -> bool {
        (1..=NUM_LOADOUT_SLOTS as u8).contains(&slot)
    }

    pub fn get(&self, slot: u8) -> Option<Uuid> {
        if !Self::is_valid_slot(slot) {
            return None;
        }
        self.slots[slot as usize - 1]
    }

    pub(crate) fn set(&mut self, slot: u8, module_id: Option<Uuid>) {
        if Self::is_valid_slot(slot) {
            self.slots[slot as usize - 1] = module_id;
        }
    }

    /// Occupied slots as `(slot, module_id)` pairs, in slot order.
    pub fn assigned(&self) -> impl Iterator<Item = (u8, Uuid)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, id)| id.map(|id| (i as u8 + 1, id)))
    }

    /// Remove every reference to a module, wherever it is slotted.
    pub fn clear_module(&mut self, module_id: Uuid) {
        for slot in self.slots.iter_mut() {
            if *slot == Some(module_id) {
                *slot = None;
            }
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self::new()
    }
}
