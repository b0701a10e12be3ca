//! Demo binary: builds a full six-slot loadout, enhances every module a few
//! times, and prints the value analysis plus the aggregated stat totals.

use mathic::catalog::{Catalog, ModuleType, Stat};
use mathic::enhancement::{enhance_module_multiple, generate_random_substats};
use mathic::persistence::save_state;
use mathic::scoring::calculate_module_value;
use mathic::state::MathicState;
use rand::thread_rng;

fn main() {
    let catalog = Catalog::standard();
    let mut state = MathicState::new();
    let mut rng = thread_rng();

    state.create_loadout("Demo");

    let plan = [
        (ModuleType::Mask, 1, Stat::Atk),
        (ModuleType::Transistor, 2, Stat::Hp),
        (ModuleType::Wristwheel, 3, Stat::Def),
        (ModuleType::Core, 4, Stat::CritRate),
        (ModuleType::Core, 5, Stat::CritDmg),
        (ModuleType::Core, 6, Stat::AtkPct),
    ];

    println!("=== Building demo loadout ===");
    for (module_type, slot, main_stat) in plan {
        let id = state
            .create_module(&catalog, module_type, slot, main_stat)
            .expect("plan uses valid main stats");

        let module = state.module_mut(id).expect("just created");
        generate_random_substats(&catalog, module, 3, &mut rng);
        let outcomes = enhance_module_multiple(&catalog, module, 3, &mut rng);

        let module = state.module(id).expect("just created");
        let value = calculate_module_value(&catalog, module);
        println!(
            "slot {}: {:?} [{}] - {} enhancements, value {:.1}, efficiency {:.1}%",
            slot,
            module_type,
            main_stat,
            outcomes.len(),
            value.total_value,
            value.efficiency,
        );
        for substat in &module.substats {
            println!(
                "    {} {:.1} ({}/5 rolls)",
                substat.stat, substat.value, substat.rolls_used
            );
        }

        state
            .assign_module_to_loadout("Demo", slot, id)
            .expect("plan matches slot types");
    }

    println!("\n=== Loadout totals ===");
    let totals = state.loadout_stats("Demo").expect("loadout exists");
    let mut flat: Vec<_> = totals.iter().filter(|(s, _)| !s.is_percent()).collect();
    let mut percent: Vec<_> = totals.iter().filter(|(s, _)| s.is_percent()).collect();
    flat.sort_by_key(|(stat, _)| stat.index());
    percent.sort_by_key(|(stat, _)| stat.index());
    for (stat, value) in flat {
        println!("  {}: {:.1}", stat, value);
    }
    for (stat, value) in percent {
        println!("  {}: {:.1}%", stat, value);
    }

    match save_state(&state) {
        Ok(()) => println!("\nSaved collection to ~/.mathic/mathic.json"),
        Err(e) => eprintln!("\nFailed to save collection: {}", e),
    }
}
