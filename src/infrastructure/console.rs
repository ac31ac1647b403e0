//! Console transport client
//!
//! The thinnest possible transport: one hero at a keyboard. Lines are parsed
//! into inbound actions, the resulting event stream is flattened and printed.
//! Chat-platform adapters replace this module wholesale; nothing in here is
//! engine logic.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::ports::outbound::HeroStorePort;
use crate::application::services::{GameEngine, PlayerAction};
use crate::domain::events::GameEvent;
use crate::domain::value_objects::{ElementalKind, HeroId};

pub struct ConsoleClient<S: HeroStorePort> {
    engine: GameEngine<S>,
    hero: HeroId,
}

impl<S: HeroStorePort> ConsoleClient<S> {
    pub async fn new(mut engine: GameEngine<S>, player_name: &str) -> Result<Self> {
        let hero = engine.get_hero(player_name, None).await?;
        Ok(Self { engine, hero })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("Welcome to the Mirefen Marches.");
        println!(
            "Commands: quest start | quest | quest abandon | search | fight [kind] | score | quit"
        );
        let kinds: Vec<&str> = ElementalKind::ALL
            .iter()
            .map(|kind| kind.display_name())
            .collect();
        println!("Attack kinds: {}", kinds.join(", "));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "quit" || line == "exit" {
                break;
            }

            let action = Self::parse(line, self.hero);
            let event = self.engine.process(action).await?;
            self.emit(&event);
        }
        Ok(())
    }

    fn parse(line: &str, hero: HeroId) -> PlayerAction {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("search") => PlayerAction::Search { hero },
            Some("fight") => PlayerAction::Fight {
                hero,
                kind: parts.next().and_then(ElementalKind::parse),
            },
            _ => PlayerAction::Command {
                hero,
                text: line.to_string(),
            },
        }
    }

    /// Render a (possibly composite) event in timeline order.
    fn emit(&self, event: &GameEvent) {
        tracing::debug!(
            event = event.event_type(),
            at = %event.metadata().timestamp,
            payload = %serde_json::to_string(event).unwrap_or_default(),
            "engine event"
        );
        for event in event.clone().flatten() {
            self.render(&event);
        }
    }

    fn render(&self, event: &GameEvent) {
        match event {
            GameEvent::QuestStarted {
                quest,
                area,
                prologue,
                area_prologue,
                ..
            } => {
                println!("\n=== Quest started: {quest} ===");
                println!("{prologue}\n");
                println!("[{area}] {area_prologue}");
            }
            GameEvent::QuestCompleted {
                quest,
                epilogue,
                area_epilogue,
                ..
            } => {
                println!("\n=== Quest complete: {quest} ===");
                println!("{area_epilogue}");
                println!("{epilogue}");
            }
            GameEvent::QuestAbandoned { quest, .. } => match quest {
                Some(name) => println!("The party abandons {name}."),
                None => println!("There is no quest to abandon."),
            },
            GameEvent::CurrentQuest { quest, .. } => match quest {
                Some(name) => println!("You are on: {name}"),
                None => println!("No active quest. Try 'quest start'."),
            },
            GameEvent::EnemyAppeared { enemy, health, .. } => {
                println!("A {enemy} appears! [{health} hp]");
            }
            GameEvent::BossAppeared { boss, health, .. } => {
                println!("{boss} looms before you! [{health} hp]");
            }
            GameEvent::FightResult {
                hero,
                enemy,
                verb,
                hero_result,
                enemy_result,
                ..
            } => {
                let mut line = format!("{hero} {verb} the {enemy}");
                if hero_result.hit {
                    if hero_result.crit {
                        line.push_str(" - a critical hit!");
                    } else {
                        line.push_str(" - a hit!");
                    }
                } else {
                    line.push_str(" - a miss.");
                }
                if hero_result.weak {
                    line.push_str(" It winces hard.");
                }
                if hero_result.strong {
                    line.push_str(" It barely notices.");
                }
                println!("{line}");
                if enemy_result.hit {
                    println!("The {enemy} strikes back at {hero}!");
                }
                println!(
                    "  [{hero}: {} hp | {enemy}: {} hp]",
                    hero_result.health,
                    enemy_result.health.max(0)
                );
            }
            GameEvent::EnemyExperienceAwarded {
                hero,
                amount,
                enemy,
                ..
            } => {
                println!("{hero} gains {amount} xp for the {enemy}.");
            }
            GameEvent::QuestExperienceAwarded {
                hero,
                amount,
                quest,
                ..
            } => {
                println!("{hero} gains {amount} xp for completing {quest}.");
            }
            GameEvent::SearchResult {
                hero, found_enemy, ..
            } => {
                if *found_enemy {
                    println!("{hero} searches the area...");
                } else {
                    println!("{hero} searches the area but finds nothing.");
                }
            }
            GameEvent::Score { entries, .. } => {
                if entries.is_empty() {
                    println!("Nobody has earned any experience yet.");
                }
                for (rank, entry) in entries.iter().enumerate() {
                    println!("{:>2}. {} - {} xp", rank + 1, entry.name, entry.experience);
                }
            }
            GameEvent::NoOp { .. } => {}
            GameEvent::Multi { events, .. } => {
                for event in events {
                    self.render(event);
                }
            }
        }
    }
}
