//! Combat service - Turn resolution for a single attack
//!
//! The elemental kind of an attack selects a flavor profile: a verb set, a
//! hit probability, and a crit probability, fixed per flavor. Kinds without
//! a dedicated profile fall back to the unaugmented one; the fallback is a
//! first-class match arm, not a lookup miss.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::entities::Enemy;
use crate::domain::value_objects::{ElementalKind, HeroId};

/// Chance the enemy lands a counter-hit when the hero had no opportunity
const COUNTER_CHANCE: f64 = 1.0 / 3.0;

/// Verb set and roll probabilities for one attack flavor
#[derive(Debug)]
pub struct FlavorProfile {
    pub verbs: &'static [&'static str],
    pub hit_chance: f64,
    /// Chance of a crit given a registered hit
    pub crit_chance: f64,
}

static UNAUGMENTED: FlavorProfile = FlavorProfile {
    verbs: &["swings at", "stabs", "smashes", "gouges", "stomps"],
    hit_chance: 0.5,
    crit_chance: 0.25,
};

static FIRE: FlavorProfile = FlavorProfile {
    verbs: &["scorches", "torches", "carbonizes"],
    hit_chance: 1.0,
    crit_chance: 1.0 / 7.0,
};

static ICE: FlavorProfile = FlavorProfile {
    verbs: &["freezes", "ices", "chills"],
    hit_chance: 1.0 / 3.0,
    crit_chance: 0.5,
};

static WATER: FlavorProfile = FlavorProfile {
    verbs: &["drowns", "submerges"],
    hit_chance: 0.5,
    crit_chance: 0.25,
};

static LIGHTNING: FlavorProfile = FlavorProfile {
    verbs: &["zaps", "electrocutes"],
    hit_chance: 0.5,
    crit_chance: 0.25,
};

static EARTH: FlavorProfile = FlavorProfile {
    verbs: &["throws a boulder at", "chucks a sharp rock at"],
    hit_chance: 0.5,
    crit_chance: 0.25,
};

static WIND: FlavorProfile = FlavorProfile {
    verbs: &["channels a gust of wind at", "summons a tornado on top of"],
    hit_chance: 0.5,
    crit_chance: 0.25,
};

impl FlavorProfile {
    /// Profile for an attack of the given kind.
    pub fn for_kind(kind: Option<ElementalKind>) -> &'static FlavorProfile {
        match kind {
            Some(ElementalKind::Fire) => &FIRE,
            Some(ElementalKind::Ice) => &ICE,
            Some(ElementalKind::Water) => &WATER,
            Some(ElementalKind::Lightning) => &LIGHTNING,
            Some(ElementalKind::Earth) => &EARTH,
            Some(ElementalKind::Wind) => &WIND,
            // Holy, necrotic, and anything added later fight unaugmented.
            Some(_) | None => &UNAUGMENTED,
        }
    }
}

/// The raw dice outcome of one attack
#[derive(Debug, Clone, Copy)]
pub struct AttackRoll {
    pub verb: &'static str,
    pub hit: bool,
    /// Only ever set together with `hit`
    pub crit: bool,
}

/// Roll verb, hit, and crit for an attack of the given kind.
pub fn roll_attack<R: Rng + ?Sized>(kind: Option<ElementalKind>, rng: &mut R) -> AttackRoll {
    let profile = FlavorProfile::for_kind(kind);
    let verb = profile.verbs.choose(rng).copied().unwrap_or("strikes");
    let hit = rng.gen_bool(profile.hit_chance);
    let crit = hit && rng.gen_bool(profile.crit_chance);
    AttackRoll { verb, hit, crit }
}

/// Caller-side switches for a fight resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct FightOptions {
    /// Land the wound regardless of the hit roll (scripted scenarios)
    pub force_hit: bool,
    /// Land the crit wound regardless of the crit roll
    pub force_crit: bool,
    /// First strike on discovery: the enemy gets no counter-attack roll
    pub opportunity: bool,
}

impl FightOptions {
    pub fn opportunity() -> Self {
        Self {
            opportunity: true,
            ..Self::default()
        }
    }
}

/// Everything that happened in one exchange
#[derive(Debug, Clone, Copy)]
pub struct FightReport {
    pub verb: &'static str,
    pub hit: bool,
    pub crit: bool,
    /// The attack matched the enemy's declared weakness
    pub weak: bool,
    /// The attack matched the enemy's own kind and was resisted
    pub strong: bool,
    /// The enemy landed its counter-hit
    pub counter_hit: bool,
}

/// Resolves single attacks against the current enemy
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Resolve one hero attack: roll the flavor, apply the wound (and the
    /// crit's second, independent wound), then roll the counter-attack.
    /// Hero-side damage from the counter is the caller's to apply, since the
    /// hero has to be persisted afterwards.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        attacker: HeroId,
        enemy: &mut Enemy,
        kind: Option<ElementalKind>,
        options: &FightOptions,
        rng: &mut R,
    ) -> FightReport {
        let roll = roll_attack(kind, rng);

        let mut weak = false;
        let mut strong = false;
        if roll.hit || options.force_hit {
            let wound = enemy.wound(Some(attacker), kind);
            weak = wound.weak;
            strong = wound.strong;
            if roll.crit || options.force_crit {
                // Second wound; only the weakness flag accumulates.
                weak = weak || enemy.wound(Some(attacker), kind).weak;
            }
        }

        let counter_hit = !options.opportunity && rng.gen_bool(COUNTER_CHANCE);

        FightReport {
            verb: roll.verb,
            hit: roll.hit,
            crit: roll.crit,
            weak,
            strong,
            counter_hit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EnemySpecies;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_crit_is_gated_by_hit_for_every_flavor() {
        let kinds = std::iter::once(None).chain(ElementalKind::ALL.into_iter().map(Some));
        for kind in kinds {
            for seed in 0..200 {
                let mut rng = StdRng::seed_from_u64(seed);
                let roll = roll_attack(kind, &mut rng);
                assert!(roll.hit || !roll.crit, "crit without hit for {kind:?}");
            }
        }
    }

    #[test]
    fn test_fire_always_hits() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(roll_attack(Some(ElementalKind::Fire), &mut rng).hit);
        }
    }

    #[test]
    fn test_unprofiled_kinds_fall_back_to_unaugmented() {
        for kind in [ElementalKind::Holy, ElementalKind::Necrotic] {
            let profile = FlavorProfile::for_kind(Some(kind));
            assert!(std::ptr::eq(profile, FlavorProfile::for_kind(None)));
        }
        assert_eq!(FlavorProfile::for_kind(None).hit_chance, 0.5);
    }

    #[test]
    fn test_force_hit_always_wounds() {
        let species = EnemySpecies::new("Target", 50, 10);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut enemy = species.spawn();
            CombatResolver.resolve(
                HeroId::new(),
                &mut enemy,
                None,
                &FightOptions {
                    force_hit: true,
                    ..FightOptions::default()
                },
                &mut rng,
            );
            assert!(enemy.health() < 50);
        }
    }

    #[test]
    fn test_opportunity_never_draws_a_counter() {
        let species = EnemySpecies::new("Target", 50, 10);
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut enemy = species.spawn();
            let report = CombatResolver.resolve(
                HeroId::new(),
                &mut enemy,
                None,
                &FightOptions::opportunity(),
                &mut rng,
            );
            assert!(!report.counter_hit);
        }
    }

    #[test]
    fn test_counter_lands_for_some_seed() {
        let species = EnemySpecies::new("Target", 50, 10);
        let countered = (0..100).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut enemy = species.spawn();
            CombatResolver
                .resolve(
                    HeroId::new(),
                    &mut enemy,
                    None,
                    &FightOptions::default(),
                    &mut rng,
                )
                .counter_hit
        });
        assert!(countered);
    }

    #[test]
    fn test_elemental_flags_follow_the_enemy_kind() {
        let species = EnemySpecies::new("Ember Imp", 10, 3).with_kind(ElementalKind::Fire);
        let mut rng = StdRng::seed_from_u64(9);

        let mut enemy = species.spawn();
        let report = CombatResolver.resolve(
            HeroId::new(),
            &mut enemy,
            // Fire is weak to water.
            Some(ElementalKind::Water),
            &FightOptions {
                force_hit: true,
                ..FightOptions::default()
            },
            &mut rng,
        );
        assert!(report.weak);
        assert!(!report.strong);

        let mut enemy = species.spawn();
        let report = CombatResolver.resolve(
            HeroId::new(),
            &mut enemy,
            Some(ElementalKind::Fire),
            &FightOptions {
                force_hit: true,
                ..FightOptions::default()
            },
            &mut rng,
        );
        assert!(report.strong);
    }
}
