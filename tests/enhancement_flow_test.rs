//! Enhancement engine tests: probability regimes, roll budget, determinism.

use mathic::catalog::{Catalog, ModuleType, Stat};
use mathic::enhancement::{
    available_substats, enhance_module_multiple, enhance_module_random, enhance_module_substat,
    generate_random_substats, substat_probabilities, EnhanceOutcome,
};
use mathic::error::MathicError;
use mathic::module::{Module, Substat, MAX_SUBSTATS, MAX_SUBSTAT_ROLLS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn mask(catalog: &Catalog) -> Module {
    Module::create(catalog, ModuleType::Mask, 1, Stat::Atk).unwrap()
}

// =========================================================================
// Slot-filling regime: fewer than four substat lines
// =========================================================================

#[test]
fn test_fresh_module_probabilities_are_uniform() {
    let catalog = Catalog::standard();
    let module = mask(&catalog);

    let probs = substat_probabilities(&catalog, &module);
    // Masks bar ATK, EffectRes, HP%, and DEF%, leaving 7 of the 11 stats.
    let eligible = available_substats(&catalog, &module);
    assert_eq!(eligible.len(), 7);
    assert_eq!(probs.len(), eligible.len());

    let share = 1.0 / eligible.len() as f64;
    for (_, p) in &probs {
        assert!((p - share).abs() < 1e-9);
    }
    let sum: f64 = probs.iter().map(|(_, p)| p).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn test_eligible_pool_excludes_main_restricted_and_duplicates() {
    let catalog = Catalog::standard();
    let mut module = mask(&catalog);
    module.substats.push(Substat::new(Stat::Spd, 3.0, 1));

    let eligible = available_substats(&catalog, &module);
    assert!(!eligible.contains(&Stat::Atk)); // main stat
    assert!(!eligible.contains(&Stat::HpPct)); // restricted on masks
    assert!(!eligible.contains(&Stat::DefPct)); // restricted on masks
    assert!(!eligible.contains(&Stat::EffectRes)); // restricted on masks
    assert!(!eligible.contains(&Stat::Spd)); // already present
    assert!(eligible.contains(&Stat::Hp));
    assert!(eligible.contains(&Stat::CritRate));
}

#[test]
fn test_slot_filling_adds_one_roll_line_without_spending_budget() {
    let catalog = Catalog::standard();
    let mut module = mask(&catalog);

    let outcome = enhance_module_random(&catalog, &mut module, &mut rng(42)).unwrap();
    let stat = outcome.stat();
    assert!(outcome.is_new());

    let substat = module.substat(stat).unwrap();
    assert_eq!(substat.rolls_used, 1);
    let range = catalog.roll_range(stat);
    assert!(substat.value >= range.min as f64 && substat.value <= range.max as f64);

    // New lines consume no enhancement budget and do not raise the level.
    assert_eq!(module.total_enhancement_rolls, 0);
    assert_eq!(module.level, 0);
}

#[test]
fn test_slot_filling_until_four_lines() {
    let catalog = Catalog::standard();
    let mut module = mask(&catalog);
    let mut rng = rng(7);

    for _ in 0..MAX_SUBSTATS {
        let outcome = enhance_module_random(&catalog, &mut module, &mut rng).unwrap();
        assert!(outcome.is_new());
    }
    assert_eq!(module.substats.len(), MAX_SUBSTATS);
    assert_eq!(module.total_enhancement_rolls, 0);

    // No duplicate stats were drawn.
    let mut stats: Vec<Stat> = module.substats.iter().map(|s| s.stat).collect();
    stats.sort_by_key(|s| s.index());
    stats.dedup();
    assert_eq!(stats.len(), MAX_SUBSTATS);
}

// =========================================================================
// Reinforcement regime: four lines, weighted by remaining headroom
// =========================================================================

fn full_mask(catalog: &Catalog, rolls: [u8; 4]) -> Module {
    let mut module = mask(catalog);
    let stats = [Stat::Hp, Stat::CritRate, Stat::CritDmg, Stat::Spd];
    for (stat, rolls_used) in stats.into_iter().zip(rolls) {
        let min = catalog.roll_range(stat).min;
        let value = (min * rolls_used as u32) as f64;
        module.substats.push(Substat::new(stat, value, rolls_used));
    }
    module.sync_enhancement_tracking();
    module
}

#[test]
fn test_reinforcement_weights_favor_low_roll_lines() {
    let catalog = Catalog::standard();
    let module = full_mask(&catalog, [1, 1, 1, 1]);
    assert_eq!(module.total_enhancement_rolls, 0);

    let probs = substat_probabilities(&catalog, &module);
    assert_eq!(probs.len(), 4);
    // All lines at 1 roll: weight 4 each, uniform.
    for (_, p) in &probs {
        assert!((p - 0.25).abs() < 1e-9);
    }
}

#[test]
fn test_reinforcement_weights_5_minus_rolls() {
    let catalog = Catalog::standard();
    let module = full_mask(&catalog, [1, 2, 3, 4]);

    let probs = substat_probabilities(&catalog, &module);
    // Weights 4, 3, 2, 1 over total 10.
    let expected = [0.4, 0.3, 0.2, 0.1];
    for ((_, p), want) in probs.iter().zip(expected) {
        assert!((p - want).abs() < 1e-9);
    }
}

#[test]
fn test_maxed_line_gets_zero_probability() {
    let catalog = Catalog::standard();
    let module = full_mask(&catalog, [5, 5, 1, 1]);
    // 5+5+1+1 = 12 rolls, 8 past the initial four; budget is 9, one left.
    assert_eq!(module.total_enhancement_rolls, 8);
    assert_eq!(module.max_total_rolls(), 9);

    let probs = substat_probabilities(&catalog, &module);
    assert_eq!(probs[0].1, 0.0);
    assert_eq!(probs[1].1, 0.0);
    assert!((probs[2].1 - 0.5).abs() < 1e-9);
    assert!((probs[3].1 - 0.5).abs() < 1e-9);
}

#[test]
fn test_exhausted_budget_zeroes_all_probabilities() {
    let catalog = Catalog::standard();
    let mut module = full_mask(&catalog, [5, 5, 1, 1]);
    let mut rng = rng(3);

    // Spend the last budgeted roll.
    let outcome = enhance_module_random(&catalog, &mut module, &mut rng).unwrap();
    assert!(!outcome.is_new());
    assert_eq!(module.total_enhancement_rolls, 9);

    let probs = substat_probabilities(&catalog, &module);
    assert!(probs.iter().all(|(_, p)| *p == 0.0));
    assert!(module.is_enhancement_capped());
    assert_eq!(
        enhance_module_random(&catalog, &mut module, &mut rng),
        Err(MathicError::CannotEnhance)
    );
}

#[test]
fn test_reinforcement_adds_achievable_increment() {
    let catalog = Catalog::standard();
    let mut module = full_mask(&catalog, [1, 1, 1, 1]);
    let mut rng = rng(11);

    let before: Vec<(Stat, f64, u8)> = module
        .substats
        .iter()
        .map(|s| (s.stat, s.value, s.rolls_used))
        .collect();

    let outcome = enhance_module_random(&catalog, &mut module, &mut rng).unwrap();
    let stat = outcome.stat();

    let (_, old_value, old_rolls) = before.iter().find(|(s, _, _)| *s == stat).unwrap();
    let substat = module.substat(stat).unwrap();
    assert_eq!(substat.rolls_used, old_rolls + 1);

    let range = catalog.roll_range(stat);
    let delta = substat.value - old_value;
    assert!(delta >= range.min as f64 && delta <= range.max as f64);
    assert_eq!(module.total_enhancement_rolls, 1);
}

// =========================================================================
// Full walk: fresh module to cap
// =========================================================================

#[test]
fn test_enhance_to_cap_respects_budget_invariants() {
    let catalog = Catalog::standard();
    let mut module = mask(&catalog);
    let mut rng = rng(99);

    let mut steps = 0;
    while !module.is_enhancement_capped() {
        enhance_module_random(&catalog, &mut module, &mut rng).unwrap();
        assert!(module.total_enhancement_rolls <= module.max_total_rolls());
        for substat in &module.substats {
            assert!(substat.rolls_used >= 1 && substat.rolls_used <= MAX_SUBSTAT_ROLLS);
            assert!(catalog.is_achievable(substat.stat, substat.rolls_used, substat.value));
        }
        steps += 1;
        assert!(steps <= 13, "cap never reached");
    }

    // 4 slot-filling draws plus 9 budgeted reinforcements; only the latter
    // count toward the level.
    assert_eq!(steps, 13);
    assert_eq!(module.substats.len(), MAX_SUBSTATS);
    assert_eq!(module.total_enhancement_rolls, 9);
    assert_eq!(module.level, 9);
}

#[test]
fn test_shrunk_budget_caps_earlier() {
    let catalog = Catalog::standard();
    let mut module = mask(&catalog);
    module.max_enhancements = 2;
    let mut rng = rng(5);

    let outcomes = enhance_module_multiple(&catalog, &mut module, 50, &mut rng);
    // 4 new lines + 2 reinforcements.
    assert_eq!(outcomes.len(), 6);
    assert_eq!(module.total_enhancement_rolls, 2);
    assert_eq!(module.max_total_rolls(), 6);
}

// =========================================================================
// Determinism and targeted enhancement
// =========================================================================

#[test]
fn test_same_seed_same_history() {
    let catalog = Catalog::standard();

    let run = |seed: u64| {
        let mut module = mask(&catalog);
        let mut rng = rng(seed);
        let outcomes = enhance_module_multiple(&catalog, &mut module, 13, &mut rng);
        (outcomes, module)
    };

    let (outcomes_a, module_a) = run(1234);
    let (outcomes_b, module_b) = run(1234);
    assert_eq!(outcomes_a, outcomes_b);
    assert_eq!(module_a.substats, module_b.substats);
    assert_eq!(module_a.total_enhancement_rolls, module_b.total_enhancement_rolls);
}

#[test]
fn test_targeted_enhancement_new_line() {
    let catalog = Catalog::standard();
    let mut module = mask(&catalog);
    let mut rng = rng(8);

    let outcome = enhance_module_substat(&catalog, &mut module, Stat::Spd, &mut rng).unwrap();
    assert_eq!(outcome, EnhanceOutcome::NewSubstat(Stat::Spd));
    assert!(module.has_substat(Stat::Spd));

    // Restricted stats stay rejected even when targeted.
    assert_eq!(
        enhance_module_substat(&catalog, &mut module, Stat::HpPct, &mut rng),
        Err(MathicError::RestrictionViolation(Stat::HpPct))
    );
}

#[test]
fn test_targeted_enhancement_reinforces_at_four_lines() {
    let catalog = Catalog::standard();
    let mut module = full_mask(&catalog, [1, 1, 1, 1]);
    let mut rng = rng(8);

    let outcome = enhance_module_substat(&catalog, &mut module, Stat::Spd, &mut rng).unwrap();
    assert_eq!(outcome, EnhanceOutcome::Reinforced(Stat::Spd));
    assert_eq!(module.substat(Stat::Spd).unwrap().rolls_used, 2);
    assert_eq!(module.total_enhancement_rolls, 1);
}

#[test]
fn test_generate_random_substats_bounded() {
    let catalog = Catalog::standard();
    let mut module = mask(&catalog);
    let mut rng = rng(21);

    let added = generate_random_substats(&catalog, &mut module, 10, &mut rng);
    assert_eq!(added, MAX_SUBSTATS);
    assert_eq!(module.substats.len(), MAX_SUBSTATS);
    // Pre-seeding lines is free; the budget and level are untouched.
    assert_eq!(module.total_enhancement_rolls, 0);
    assert_eq!(module.level, 0);
}
