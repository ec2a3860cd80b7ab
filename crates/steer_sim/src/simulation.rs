//! Fixed-step host loop driving every bot controller

use crate::agent::NavAgent;
use crate::config::SimConfig;
use crate::error::Result;
use crate::markers::MarkerBoard;
use crate::player::ScriptedPlayer;
use crate::world::SimWorld;
use std::collections::BTreeMap;
use std::fmt;
use steer_ai::{Controller, StateKind};
use steer_core::{EntityId, Tag};

/// A bot and the host-side handles to its collaborators
pub struct SimBot {
    pub controller: Controller,
    pub agent: NavAgent,
    ticks_in: BTreeMap<StateKind, u64>,
}

impl SimBot {
    pub fn entity(&self) -> EntityId {
        self.controller.entity()
    }

    pub fn ticks_in(&self, kind: StateKind) -> u64 {
        self.ticks_in.get(&kind).copied().unwrap_or(0)
    }
}

pub struct Simulation {
    world: SimWorld,
    player: Option<ScriptedPlayer>,
    bots: Vec<SimBot>,
    markers: MarkerBoard,
    dt: f32,
    bot_speed: f32,
    ticks: u64,
}

impl Simulation {
    /// Spawn the player and every bot, and initialize their controllers
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;

        let mut world = SimWorld::new();
        let markers = MarkerBoard::new();

        let player = match config.player.waypoints.first() {
            Some(&start) if config.player.enabled => {
                let entity = world.spawn(start, [Tag::new(&config.ai.player_tag)]);
                log::info!("Spawned player {} at {:?}", entity, start);
                Some(ScriptedPlayer::new(
                    entity,
                    config.player.waypoints.clone(),
                    config.player.speed,
                ))
            }
            _ => None,
        };

        let mut bots = Vec::with_capacity(config.bots.len());
        for (index, spawn) in config.bots.iter().enumerate() {
            let entity = world.spawn(spawn.position, [Tag::new("bot")]);
            let agent = NavAgent::new();
            let mut controller = Controller::new(entity, &config.ai)?
                .with_position(spawn.position)
                .with_movement(agent.clone())
                .with_renderer(markers.clone());
            if let Some(seed) = spawn
                .seed
                .or_else(|| config.sim.seed.map(|seed| seed.wrapping_add(index as u64)))
            {
                controller = controller.with_seed(seed);
            }
            controller.initialize()?;
            log::info!("Spawned bot {} at {:?}", entity, spawn.position);

            bots.push(SimBot {
                controller,
                agent,
                ticks_in: BTreeMap::new(),
            });
        }

        Ok(Self {
            world,
            player,
            bots,
            markers,
            dt: config.sim.dt,
            bot_speed: config.sim.bot_speed,
            ticks: 0,
        })
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    /// Hosts may destroy or disable entities between steps
    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    pub fn bots(&self) -> &[SimBot] {
        &self.bots
    }

    pub fn bots_mut(&mut self) -> &mut [SimBot] {
        &mut self.bots
    }

    pub fn markers(&self) -> &MarkerBoard {
        &self.markers
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player.as_ref().map(ScriptedPlayer::entity)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One frame: player moves, every bot thinks, then nav agents move bots
    pub fn step(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.step(&mut self.world, self.dt);
        }

        for bot in &mut self.bots {
            bot.controller.tick(self.dt, &self.world);
            if let Some(state) = bot.controller.current_state() {
                *bot.ticks_in.entry(state).or_insert(0) += 1;
            }
        }

        for bot in &self.bots {
            let entity = bot.entity();
            if let Some(position) = self.world.position(entity) {
                let next = bot.agent.step(position, self.bot_speed, self.dt);
                self.world.set_position(entity, next);
            }
        }

        self.ticks += 1;
    }

    pub fn run(&mut self, ticks: u64) -> RunSummary {
        for _ in 0..ticks {
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.ticks,
            seconds: self.ticks as f64 * self.dt as f64,
            bots: self
                .bots
                .iter()
                .map(|bot| BotSummary {
                    entity: bot.entity(),
                    final_state: bot.controller.current_state(),
                    ticks_in: bot.ticks_in.clone(),
                    transitions: bot.controller.transition_count(),
                    destinations: bot.agent.requests(),
                })
                .collect(),
        }
    }
}

/// Per-bot outcome of a run
#[derive(Debug, Clone)]
pub struct BotSummary {
    pub entity: EntityId,
    pub final_state: Option<StateKind>,
    pub ticks_in: BTreeMap<StateKind, u64>,
    pub transitions: u64,
    pub destinations: u64,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub seconds: f64,
    pub bots: Vec<BotSummary>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ticks ({:.1}s simulated)", self.ticks, self.seconds)?;
        for bot in &self.bots {
            let state = bot.final_state.map(|s| s.name()).unwrap_or("none");
            write!(
                f,
                "  bot {}: {} after {} transitions, {} destinations |",
                bot.entity, state, bot.transitions, bot.destinations
            )?;
            for kind in StateKind::ALL {
                write!(f, " {}={}", kind, bot.ticks_in.get(&kind).copied().unwrap_or(0))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
