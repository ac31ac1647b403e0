//! Default campaign content - The Mirefen Marches
//!
//! Species prototypes and the quest catalog the engine is booted with. Every
//! area is validated here so broken content is refused at startup instead of
//! blowing up mid-quest.

use anyhow::Result;

use crate::domain::entities::{Area, EnemySpecies, Quest};
use crate::domain::value_objects::ElementalKind;

fn bog_wretch() -> EnemySpecies {
    EnemySpecies::new("Bog Wretch", 1, 3)
}

fn mire_leech() -> EnemySpecies {
    EnemySpecies::new("Mire Leech", 2, 4)
}

fn drowned_thrall() -> EnemySpecies {
    EnemySpecies::new("Drowned Thrall", 3, 7).with_kind(ElementalKind::Necrotic)
}

fn fen_lurker() -> EnemySpecies {
    EnemySpecies::new("Fen Lurker", 3, 6)
}

fn ember_imp() -> EnemySpecies {
    EnemySpecies::new("Ember Imp", 1, 3).with_kind(ElementalKind::Fire)
}

fn cinder_acolyte() -> EnemySpecies {
    EnemySpecies::new("Cinder Acolyte", 2, 5).with_kind(ElementalKind::Fire)
}

fn ash_revenant() -> EnemySpecies {
    EnemySpecies::new("Ash Revenant", 4, 8).with_kind(ElementalKind::Fire)
}

fn frost_shade() -> EnemySpecies {
    EnemySpecies::new("Frost Shade", 2, 7).with_kind(ElementalKind::Ice)
}

fn rime_stalker() -> EnemySpecies {
    EnemySpecies::new("Rime Stalker", 5, 8).with_kind(ElementalKind::Ice)
}

fn barrow_wight() -> EnemySpecies {
    EnemySpecies::new("Barrow Wight", 3, 6).with_kind(ElementalKind::Necrotic)
}

fn storm_touched_husk() -> EnemySpecies {
    EnemySpecies::new("Storm-Touched Husk", 6, 12).with_kind(ElementalKind::Lightning)
}

fn hollow_knight() -> EnemySpecies {
    EnemySpecies::new("Hollow Knight", 8, 16).with_kind(ElementalKind::Lightning)
}

fn the_mire_king() -> EnemySpecies {
    EnemySpecies::new("The Mire King", 8, 80).with_kind(ElementalKind::Water)
}

fn pyre_warden() -> EnemySpecies {
    EnemySpecies::new("The Pyre Warden", 12, 100).with_kind(ElementalKind::Fire)
}

fn barrow_queen() -> EnemySpecies {
    EnemySpecies::new("The Barrow Queen", 25, 300).with_kind(ElementalKind::Necrotic)
}

fn sunken_causeway() -> Quest {
    Quest::new(
        "Drain the Sunken Causeway",
        Area::new(
            "The Sunken Causeway",
            12,
            vec![
                (bog_wretch(), 50),
                (mire_leech(), 25),
                (drowned_thrall(), 20),
                (fen_lurker(), 5),
            ],
            &the_mire_king(),
        )
        .with_prologue(
            "Rotten planks sink underfoot as the party wades onto the old trade road. \
             Something large moves beneath the black water.",
        )
        .with_epilogue(
            "With the causeway quiet, the first carts in a decade dare the crossing.",
        ),
        300,
    )
    .with_prologue(
        "The ferryman at Graywater Landing will not take passengers anymore. \
         \"The old causeway drowned years back,\" she says, \"and what drowned with it \
         has started climbing out at night. Clear it, and every trader in the Marches \
         will know your names.\"",
    )
    .with_epilogue(
        "Word travels fast in the Marches. At Graywater Landing the ferryman sets down \
         her pole and, for the first time anyone can remember, smiles.",
    )
}

fn burned_watchtower() -> Quest {
    Quest::new(
        "Embers of the Watchtower",
        Area::new(
            "The Burned Watchtower",
            18,
            vec![
                (ember_imp(), 55),
                (cinder_acolyte(), 30),
                (ash_revenant(), 15),
            ],
            &pyre_warden(),
        )
        .with_prologue(
            "The tower has burned for three winters without being consumed. Heat rolls \
             down the stairwell in waves.",
        )
        .with_epilogue("The flames gutter out at last, and cold rain claims the stones."),
        450,
    )
    .with_prologue(
        "A rider from the border garrison finds the party at their camp. \"The beacon \
         tower on Cinder Hill was meant to warn us of raids. Now it burns day and night, \
         and things made of fire walk its stairs. Put out whatever feeds it.\"",
    )
    .with_epilogue(
        "The garrison commander turns the Warden's scorched mask over in his hands. \
         \"Then the beacon is ours again. The border owes you a debt it cannot pay.\"",
    )
}

fn barrow_court() -> Quest {
    Quest::new(
        "Silence the Barrow Court",
        Area::new(
            "The Barrow Deeps",
            30,
            vec![
                (barrow_wight(), 35),
                (frost_shade(), 25),
                (rime_stalker(), 15),
                (storm_touched_husk(), 15),
                (hollow_knight(), 10),
            ],
            &barrow_queen(),
        )
        .with_prologue(
            "Below the oldest mounds the air turns still and bitterly cold. Somewhere \
             deeper, a court that should have stayed buried is holding session.",
        )
        .with_epilogue("The deep halls are silent. Nothing in them will hold court again."),
        550,
    )
    .with_prologue(
        "The hedge-priest of Wyrmsfall has stopped ringing his bell for funerals. \"The \
         dead do not stay where we put them. Their old queen calls them down into the \
         barrows, and her court grows by the night. End her reign, whatever it takes.\"",
    )
    .with_epilogue(
        "Wyrmsfall buries its dead again without fear. The hedge-priest rings the bell \
         once for the queen, out of an old habit of mercy, and then never again.",
    )
}

/// The default quest catalog, validated so a malformed area is never offered.
pub fn default_quests() -> Result<Vec<Quest>> {
    let quests = vec![sunken_causeway(), burned_watchtower(), barrow_court()];
    for quest in &quests {
        quest.area().validate()?;
    }
    Ok(quests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_catalog_is_valid_and_playable() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut quests = default_quests().unwrap();
        assert_eq!(quests.len(), 3);
        for quest in &mut quests {
            quest.area_mut().populate(&mut rng).unwrap();
            assert!(quest.area().has_pending_enemies());
            assert!(!quest.is_complete());
        }
    }
}
