//! Game engine service - The stateful coordinator for one game session
//!
//! Holds the single active quest and the single engaged enemy, exposes the
//! three player actions (start quest, search, fight) plus a flat command
//! dispatcher, and reports every outcome as an ordered event sequence.
//!
//! One engine instance is one session: there is no global state, and running
//! several sessions means constructing several engines. All randomness flows
//! through the engine-owned RNG, so a seeded engine replays identically.

use std::collections::HashMap;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::ports::outbound::HeroStorePort;
use crate::application::services::combat_service::{CombatResolver, FightOptions};
use crate::domain::entities::{Enemy, Hero, Quest};
use crate::domain::errors::GameError;
use crate::domain::events::{CombatantReport, EventMetadata, GameEvent};
use crate::domain::value_objects::{ElementalKind, HeroId, SessionId};

/// Flat experience for a search action, whatever it turns up
const SEARCH_EXPERIENCE: u32 = 1;

/// Chance a search turns something up while un-cleared content remains
const ENCOUNTER_CHANCE: f64 = 2.0 / 3.0;

/// Rows shown on the scoreboard
const SCOREBOARD_LIMIT: u32 = 10;

/// Inbound player actions from the transport layer
#[derive(Debug, Clone)]
pub enum PlayerAction {
    StartQuest,
    Search {
        hero: HeroId,
    },
    Fight {
        hero: HeroId,
        kind: Option<ElementalKind>,
    },
    Command {
        hero: HeroId,
        text: String,
    },
}

/// The engaged enemy: either popped off the spawn list and owned here, or
/// the area's boss, which stays in the area so quest completion can see its
/// health.
#[derive(Debug)]
enum Encounter {
    Spawned(Enemy),
    Boss,
}

/// One game session's engine
pub struct GameEngine<S: HeroStorePort> {
    session_id: SessionId,
    store: S,
    /// Immutable quest templates; starting clones a fresh instance
    quests: Vec<Quest>,
    /// Heroes seen this session, mutated here and persisted via the store
    roster: HashMap<HeroId, Hero>,
    current_quest: Option<Quest>,
    current_encounter: Option<Encounter>,
    resolver: CombatResolver,
    rng: StdRng,
}

impl<S: HeroStorePort> GameEngine<S> {
    pub fn new(store: S, quests: Vec<Quest>) -> Self {
        Self::with_rng(store, quests, StdRng::from_entropy())
    }

    /// Engine with a caller-supplied RNG, for deterministic sessions.
    pub fn with_rng(store: S, quests: Vec<Quest>, rng: StdRng) -> Self {
        let session_id = SessionId::new();
        tracing::info!(session = %session_id, quests = quests.len(), "session created");
        Self {
            session_id,
            store,
            quests,
            roster: HashMap::new(),
            current_quest: None,
            current_encounter: None,
            resolver: CombatResolver,
            rng,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn current_quest(&self) -> Option<&Quest> {
        self.current_quest.as_ref()
    }

    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.roster.get(&id)
    }

    /// The enemy currently being fought, if any.
    pub fn engaged_enemy(&self) -> Option<&Enemy> {
        match &self.current_encounter {
            Some(Encounter::Spawned(enemy)) => Some(enemy),
            Some(Encounter::Boss) => self.current_quest.as_ref().map(|q| q.area().boss()),
            None => None,
        }
    }

    pub fn in_combat(&self) -> bool {
        self.current_encounter.is_some()
    }

    /// No quest and no engaged enemy.
    pub fn is_idle(&self) -> bool {
        self.current_quest.is_none() && self.current_encounter.is_none()
    }

    /// Bring a hero into the session, creating it in the store on first
    /// sight. Fetching resets health to the baseline.
    pub async fn get_hero(&mut self, name: &str, external_id: Option<&str>) -> Result<HeroId> {
        let hero = self.store.fetch_or_create(name, external_id).await?;
        let id = hero.id;
        if self.roster.insert(id, hero).is_none() {
            tracing::info!(session = %self.session_id, hero = name, "hero joined session");
        } else {
            tracing::debug!(hero = name, "hero refreshed");
        }
        Ok(id)
    }

    /// Start a quest: the given catalog entry, or a uniformly random one.
    /// Fails with [`GameError::AlreadyOnQuest`] without touching the active
    /// quest's state.
    pub fn start_quest(&mut self, index: Option<usize>) -> Result<GameEvent, GameError> {
        if let Some(active) = &self.current_quest {
            return Err(GameError::AlreadyOnQuest {
                quest: active.name().to_string(),
            });
        }
        if self.quests.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "the quest catalog is empty".to_string(),
            ));
        }

        let index = match index {
            Some(i) if i < self.quests.len() => i,
            Some(i) => {
                return Err(GameError::InvalidConfiguration(format!(
                    "no quest at index {i}"
                )))
            }
            None => self.rng.gen_range(0..self.quests.len()),
        };

        let mut quest = self.quests[index].clone();
        quest.area_mut().populate(&mut self.rng)?;
        tracing::info!(session = %self.session_id, quest = quest.name(), "quest started");
        tracing::debug!(
            enemies = quest.area().pending_count(),
            census = ?quest.area().census(),
            "area populated"
        );

        let event = GameEvent::QuestStarted {
            metadata: EventMetadata::default(),
            quest: quest.name().to_string(),
            area: quest.area().name().to_string(),
            prologue: quest.prologue().to_string(),
            area_prologue: quest.area().prologue().to_string(),
        };
        self.current_quest = Some(quest);
        Ok(event)
    }

    /// Search the area. While un-cleared content remains there is a roughly
    /// 2-in-3 chance something turns up: the next pending enemy (popped from
    /// the end of the spawn list), the boss once the list is empty, or the
    /// already-engaged enemy announced again. Discovery grants a free
    /// opportunity attack. The searcher earns a flat experience point either
    /// way, quest or no quest.
    pub async fn search(&mut self, hero_id: HeroId) -> Result<GameEvent> {
        anyhow::ensure!(
            self.roster.contains_key(&hero_id),
            "hero {hero_id} has not joined this session"
        );

        let content_left = self.current_quest.as_ref().is_some_and(|quest| {
            quest.area().has_pending_enemies() || !quest.area().boss().is_dead()
        });

        let mut appearance = None;
        if content_left && self.rng.gen_bool(ENCOUNTER_CHANCE) {
            if self.current_encounter.is_none() {
                if let Some(quest) = self.current_quest.as_mut() {
                    if let Some(enemy) = quest.area_mut().pop_enemy() {
                        self.current_encounter = Some(Encounter::Spawned(enemy));
                    } else if !quest.area().boss().is_dead() {
                        self.current_encounter = Some(Encounter::Boss);
                    }
                }
            }
            appearance = match &self.current_encounter {
                Some(Encounter::Spawned(enemy)) => {
                    tracing::debug!(enemy = enemy.name(), kind = ?enemy.kind(), "enemy engaged");
                    Some(GameEvent::EnemyAppeared {
                        metadata: EventMetadata::default(),
                        enemy: enemy.name().to_string(),
                        health: enemy.health(),
                    })
                }
                Some(Encounter::Boss) => self.engaged_enemy().map(|boss| GameEvent::BossAppeared {
                    metadata: EventMetadata::default(),
                    boss: boss.name().to_string(),
                    health: boss.health(),
                }),
                None => None,
            };
        }

        let found_enemy = appearance.is_some();
        let opportunity_fight = if found_enemy {
            Some(
                self.fight(hero_id, None, FightOptions::opportunity())
                    .await?,
            )
        } else {
            None
        };

        let hero = self
            .roster
            .get_mut(&hero_id)
            .context("searching hero left the roster")?;
        hero.gain_experience(SEARCH_EXPERIENCE);
        let snapshot = hero.clone();
        self.store.save(&snapshot).await?;

        let mut events = vec![GameEvent::SearchResult {
            metadata: EventMetadata::default(),
            hero: snapshot.name,
            found_enemy,
        }];
        events.extend(appearance);
        events.extend(opportunity_fight);
        Ok(GameEvent::multi(events))
    }

    /// Fight the engaged enemy. With nothing engaged this is a no-op event:
    /// swinging at shadows is not an error. After the exchange the engine
    /// always checks, in order, for a slain enemy (experience split) and a
    /// completed quest (completion awards).
    pub async fn fight(
        &mut self,
        hero_id: HeroId,
        kind: Option<ElementalKind>,
        options: FightOptions,
    ) -> Result<GameEvent> {
        anyhow::ensure!(
            self.roster.contains_key(&hero_id),
            "hero {hero_id} has not joined this session"
        );

        let Self {
            current_encounter,
            current_quest,
            resolver,
            rng,
            ..
        } = self;
        let target = match current_encounter {
            Some(Encounter::Spawned(enemy)) => Some(enemy),
            Some(Encounter::Boss) => current_quest.as_mut().map(|q| q.area_mut().boss_mut()),
            None => None,
        };
        let Some(enemy) = target else {
            return Ok(GameEvent::no_op());
        };

        let report = resolver.resolve(hero_id, enemy, kind, &options, rng);
        let enemy_name = enemy.name().to_string();
        let enemy_health = enemy.health();
        tracing::debug!(
            hero = %hero_id,
            enemy = %enemy_name,
            hit = report.hit,
            crit = report.crit,
            countered = report.counter_hit,
            "fight resolved"
        );

        if report.counter_hit {
            let hero = self
                .roster
                .get_mut(&hero_id)
                .context("fighting hero left the roster")?;
            hero.take_hit();
            if hero.is_defeated() {
                tracing::warn!(hero = %hero.name, health = hero.health, "hero defeated");
            }
            let snapshot = hero.clone();
            self.store.save(&snapshot).await?;
        }

        let hero = self
            .roster
            .get(&hero_id)
            .context("fighting hero left the roster")?;
        let fight_event = GameEvent::FightResult {
            metadata: EventMetadata::default(),
            hero: hero.name.clone(),
            enemy: enemy_name,
            verb: report.verb.to_string(),
            hero_result: CombatantReport {
                health: hero.health,
                hit: report.hit,
                crit: report.crit,
                weak: report.weak,
                strong: report.strong,
            },
            enemy_result: CombatantReport {
                health: enemy_health,
                hit: report.counter_hit,
                ..CombatantReport::default()
            },
        };

        let mut events = vec![fight_event];
        events.extend(self.check_game_state().await?);
        Ok(GameEvent::multi(events))
    }

    /// Drop the active quest and anything engaged, unconditionally. The area
    /// keeps no partial-completion memory.
    pub fn abandon_quest(&mut self) -> GameEvent {
        let quest = self.current_quest.take();
        self.current_encounter = None;
        if let Some(quest) = &quest {
            tracing::info!(session = %self.session_id, quest = quest.name(), "quest abandoned");
        }
        GameEvent::QuestAbandoned {
            metadata: EventMetadata::default(),
            quest: quest.map(|q| q.name().to_string()),
        }
    }

    /// Heroes ranked by experience, straight from the store.
    pub async fn score(&self) -> Result<GameEvent> {
        let entries = self.store.list_by_score(SCOREBOARD_LIMIT).await?;
        Ok(GameEvent::Score {
            metadata: EventMetadata::default(),
            entries,
        })
    }

    /// Dispatch an inbound action to the matching operation. Unrecognized
    /// command text degrades to a no-op event, never an error.
    pub async fn process(&mut self, action: PlayerAction) -> Result<GameEvent> {
        match action {
            PlayerAction::StartQuest => self.start_quest_or_report(),
            PlayerAction::Search { hero } => self.search(hero).await,
            PlayerAction::Fight { hero, kind } => {
                self.fight(hero, kind, FightOptions::default()).await
            }
            PlayerAction::Command { hero: _, text } => match text.trim() {
                "quest start" => self.start_quest_or_report(),
                "quest" => Ok(self.current_quest_event()),
                "quest abandon" => Ok(self.abandon_quest()),
                "score" => self.score().await,
                _ => Ok(GameEvent::no_op()),
            },
        }
    }

    /// Starting while already questing reports the current quest instead of
    /// failing; anything else propagates.
    fn start_quest_or_report(&mut self) -> Result<GameEvent> {
        match self.start_quest(None) {
            Ok(event) => Ok(event),
            Err(GameError::AlreadyOnQuest { .. }) => Ok(self.current_quest_event()),
            Err(error) => Err(error.into()),
        }
    }

    fn current_quest_event(&self) -> GameEvent {
        GameEvent::CurrentQuest {
            metadata: EventMetadata::default(),
            quest: self.current_quest.as_ref().map(|q| q.name().to_string()),
        }
    }

    /// Post-fight cleanup: a dead enemy frees the encounter slot and splits
    /// its experience; a completed quest pays every participant and frees
    /// the quest slot. Enemy death is always checked before completion.
    async fn check_game_state(&mut self) -> Result<Vec<GameEvent>> {
        let mut events = Vec::new();

        let slain = self.engaged_enemy().filter(|enemy| enemy.is_dead()).map(|enemy| {
            (
                enemy.name().to_string(),
                enemy.experience_value(),
                enemy.experience_shares(),
            )
        });
        if let Some((enemy_name, experience, shares)) = slain {
            self.current_encounter = None;
            for (hero_id, amount) in shares {
                let hero = self
                    .roster
                    .get_mut(&hero_id)
                    .context("credited hero left the roster")?;
                hero.gain_experience(amount);
                let snapshot = hero.clone();
                self.store.save(&snapshot).await?;
                if let Some(quest) = self.current_quest.as_mut() {
                    quest.mark_participant(hero_id);
                }
                events.push(GameEvent::EnemyExperienceAwarded {
                    metadata: EventMetadata::default(),
                    hero: snapshot.name,
                    amount,
                    enemy: enemy_name.clone(),
                });
            }
            tracing::info!(
                session = %self.session_id,
                enemy = %enemy_name,
                experience,
                "enemy slain"
            );
        }

        if self.current_quest.as_ref().is_some_and(|q| q.is_complete()) {
            if let Some(quest) = self.current_quest.take() {
                tracing::info!(session = %self.session_id, quest = quest.name(), "quest complete");
                events.push(GameEvent::QuestCompleted {
                    metadata: EventMetadata::default(),
                    quest: quest.name().to_string(),
                    epilogue: quest.epilogue().to_string(),
                    area_epilogue: quest.area().epilogue().to_string(),
                });
                for &hero_id in quest.participants() {
                    let hero = self
                        .roster
                        .get_mut(&hero_id)
                        .context("participant left the roster")?;
                    hero.gain_experience(quest.completion_experience());
                    let snapshot = hero.clone();
                    self.store.save(&snapshot).await?;
                    events.push(GameEvent::QuestExperienceAwarded {
                        metadata: EventMetadata::default(),
                        hero: snapshot.name,
                        amount: quest.completion_experience(),
                        quest: quest.name().to_string(),
                    });
                }
            }
        }

        Ok(events)
    }
}
