//! Idle: wander around the spawn area and watch for a player

use crate::collaborator::Marker;
use crate::config::AiConfig;
use crate::perception;
use crate::range;
use crate::schedule::{Cadence, TaskId, TaskScheduler};
use crate::state::{Lifecycle, Senses, StateKind, Transition};
use glam::Vec3;
use rand::Rng;

#[derive(Debug)]
pub struct IdleState {
    marker: Marker,
    detect_range: f32,
    wander_radius: f32,
    wander_cadence: Cadence,
    propagate_detect_range: bool,
    wander_task: Option<TaskId>,
    wander_target: Option<Vec3>,
    pub(crate) lifecycle: Lifecycle,
}

impl IdleState {
    /// Build from the idle section; radii are clamped to be non-negative
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            marker: config.markers.idle.clone(),
            detect_range: range::radius(config.idle.detect_range),
            wander_radius: range::radius(config.idle.wander_radius),
            wander_cadence: config.idle.wander_cadence(),
            propagate_detect_range: config.idle.propagate_detect_range,
            wander_task: None,
            wander_target: None,
            lifecycle: Lifecycle::default(),
        }
    }

    /// Marker applied when idle starts
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Start/stop bookkeeping
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Radius of the player detection query
    pub fn detect_range(&self) -> f32 {
        self.detect_range
    }

    /// Negative or NaN ranges become zero
    pub fn set_detect_range(&mut self, range: f32) {
        self.detect_range = range::radius(range);
    }

    /// Radius of the disk wander points are drawn from
    pub fn wander_radius(&self) -> f32 {
        self.wander_radius
    }

    /// Negative or NaN radii become zero
    pub fn set_wander_radius(&mut self, radius: f32) {
        self.wander_radius = range::radius(radius);
    }

    /// Last destination picked by the wander task
    pub fn wander_target(&self) -> Option<Vec3> {
        self.wander_target
    }

    pub(crate) fn start(&mut self, tasks: &mut TaskScheduler<StateKind>) {
        self.lifecycle.enter();
        self.wander_task = Some(tasks.spawn(StateKind::Idle, self.wander_cadence));
    }

    pub(crate) fn stop(&mut self, tasks: &mut TaskScheduler<StateKind>) {
        if let Some(task) = self.wander_task.take() {
            tasks.cancel(task);
        }
        self.lifecycle.exit();
    }

    pub(crate) fn update(&mut self, senses: &Senses<'_>) -> Option<Transition> {
        let found = perception::detect(
            senses.perception,
            senses.entity,
            senses.position,
            self.detect_range,
            senses.player_tag,
        )?;

        log::info!(
            "Bot {} detected player {} at distance {:.2}",
            senses.entity,
            found.entity,
            found.distance_squared.sqrt()
        );

        Some(Transition::Chase {
            target: found.entity,
            range: self.propagate_detect_range.then_some(self.detect_range),
        })
    }

    /// Wander task action: pick the next destination around `origin`
    pub(crate) fn wander<R: Rng + ?Sized>(&mut self, origin: Vec3, rng: &mut R) -> Vec3 {
        let target = wander_point(origin, self.wander_radius, rng);
        self.wander_target = Some(target);
        target
    }
}

/// Uniform random point on the disk of `radius` around `origin`, in the
/// ground plane (`y` unchanged).
pub fn wander_point<R: Rng + ?Sized>(origin: Vec3, radius: f32, rng: &mut R) -> Vec3 {
    // Rejection sampling keeps the distribution uniform over the disk.
    let (x, z) = loop {
        let x: f32 = rng.gen_range(-1.0..1.0);
        let z: f32 = rng.gen_range(-1.0..1.0);
        if x * x + z * z < 1.0 {
            break (x, z);
        }
    };
    let radius = range::radius(radius);
    Vec3::new(origin.x + x * radius, origin.y, origin.z + z * radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wander_points_stay_on_disk() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = wander_point(Vec3::ZERO, 4.0, &mut rng);
            assert!((p.x * p.x + p.z * p.z).sqrt() <= 4.0);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_wander_keeps_ground_height() {
        let mut rng = StdRng::seed_from_u64(1);
        let origin = Vec3::new(10.0, 2.5, -3.0);
        for _ in 0..100 {
            let p = wander_point(origin, 4.0, &mut rng);
            assert_eq!(p.y, 2.5);
            assert!(Vec3::new(p.x - origin.x, 0.0, p.z - origin.z).length() <= 4.0 + 1e-4);
        }
    }

    #[test]
    fn test_zero_radius_wander_stays_put() {
        let mut rng = StdRng::seed_from_u64(3);
        let origin = Vec3::new(1.0, 0.0, 1.0);
        assert_eq!(wander_point(origin, 0.0, &mut rng), origin);
        assert_eq!(wander_point(origin, -2.0, &mut rng), origin);
    }

    #[test]
    fn test_wander_records_target() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut idle = IdleState::from_config(&AiConfig::default());
        assert!(idle.wander_target().is_none());
        let picked = idle.wander(Vec3::ZERO, &mut rng);
        assert_eq!(idle.wander_target(), Some(picked));
    }

    #[test]
    fn test_start_and_stop_manage_wander_task() {
        let mut tasks = TaskScheduler::new();
        let mut idle = IdleState::from_config(&AiConfig::default());

        idle.start(&mut tasks);
        assert_eq!(tasks.len(), 1);
        assert!(idle.lifecycle().is_active());

        idle.stop(&mut tasks);
        assert!(tasks.is_empty());
        assert!(!idle.lifecycle().is_active());
    }

    #[test]
    fn test_negative_ranges_are_clamped() {
        let mut idle = IdleState::from_config(&AiConfig::default());
        idle.set_detect_range(-1.0);
        idle.set_wander_radius(-1.0);
        assert_eq!(idle.detect_range(), 0.0);
        assert_eq!(idle.wander_radius(), 0.0);
    }
}
