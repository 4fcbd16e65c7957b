//! Headless demo scene: a crowd of moveable entities carrying riders,
//! integrated once per frame and despawned when they leave the world.

use glam::Vec2;
use legends_ecs::{
    Archetype, Component, ComponentCollection, EntityCollection, EntityId, RegistryConfig,
    TagComponent,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::settings::DemoSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position(pub Vec2);
impl Component for Position {}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);
impl Component for Velocity {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Name(pub String);
impl Component for Name {}

/// Marks entities the frame loop is allowed to move.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveableTag;
impl Component for MoveableTag {}
impl TagComponent for MoveableTag {}

pub type Moveable = Archetype<(MoveableTag, Position, Velocity)>;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u32,
    pub moved: usize,
    pub despawned: usize,
    pub alive: usize,
}

pub struct Scene {
    registry: EntityCollection,
    settings: DemoSettings,
    rng: StdRng,
    frame: u32,
}

impl Scene {
    pub fn new(settings: DemoSettings, registry_config: RegistryConfig) -> Self {
        Self {
            registry: EntityCollection::with_config(registry_config),
            rng: StdRng::seed_from_u64(settings.seed),
            settings,
            frame: 0,
        }
    }

    pub fn registry(&self) -> &EntityCollection {
        &self.registry
    }

    /// Spawn the crowd. Every other mount starts as a bare position and is
    /// completed through the archetype, the rest are created whole.
    pub fn populate(&mut self) {
        for index in 0..self.settings.crowd_size {
            let mut components = if index % 2 == 0 {
                Moveable::create_instance()
            } else {
                let mut partial = ComponentCollection::new();
                partial.try_emplace(Position::default());
                Moveable::supplement(&mut partial);
                partial
            };

            let (extent, max_speed) = (self.settings.world_half_extent, self.settings.max_speed);
            let position = self.random_point(extent);
            let velocity = self.random_point(max_speed);
            components.insert_or_assign(Position(position));
            components.insert_or_assign(Velocity(velocity));
            components.try_emplace(Name(format!("mount-{index}")));

            let mount = self.registry.insert_root(components);
            for rider in 0..self.settings.riders_per_mount {
                let mut rider_components = ComponentCollection::new();
                rider_components.try_emplace(Name(format!("rider-{index}-{rider}")));
                self.registry.insert(rider_components, mount);
            }
        }

        info!(
            "Spawned {} entities ({} moveable)",
            self.registry.len(),
            self.registry.count_if(Moveable::is_presented_in)
        );
    }

    /// Advance one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        self.frame += 1;

        let movers = self.registry.filter(Moveable::is_presented_in);
        for id in &movers {
            let Ok(components) = self.registry.at_mut(*id) else {
                continue;
            };
            let velocity = components.get::<Velocity>().map(|v| v.0).unwrap_or_default();
            if let Some(position) = components.get_mut::<Position>() {
                position.0 += velocity * dt;
            }
        }

        let extent = self.settings.world_half_extent;
        let before = self.registry.len();
        // Riders have no position of their own and leave with their mount.
        self.registry.erase_if(|c| {
            c.get::<Position>()
                .is_some_and(|p| p.0.abs().max_element() > extent)
        });
        let despawned = before - self.registry.len();
        if despawned > 0 {
            debug!("Frame {}: despawned {} entities", self.frame, despawned);
        }

        FrameReport {
            frame: self.frame,
            moved: movers.len(),
            despawned,
            alive: self.registry.len(),
        }
    }

    /// Top-level entities still in the world.
    pub fn mounts(&self) -> Vec<EntityId> {
        self.registry.roots()
    }

    fn random_point(&mut self, extent: f32) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(-extent..=extent),
            self.rng.gen_range(-extent..=extent),
        )
    }
}
