//! Periodic background tasks
//!
//! States that keep doing something while they are current (re-wandering,
//! re-issuing a chase destination) register a task here instead of running
//! their own loop. The scheduler is driven by the controller's tick, so tasks
//! are cooperative: nothing runs between ticks and a cancelled task is gone
//! before `cancel` returns.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How long a task sleeps between actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cadence {
    /// Same interval every cycle
    Fixed(f32),
    /// Interval re-rolled uniformly in `[min, max]` every cycle
    Uniform { min: f32, max: f32 },
}

impl Cadence {
    /// Roll the next sleep interval
    pub fn next_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            Cadence::Fixed(secs) => secs,
            Cadence::Uniform { min, max } => {
                if max > min {
                    rng.gen_range(min..=max)
                } else {
                    min
                }
            }
        }
    }
}

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct ScheduledTask<K> {
    id: TaskId,
    owner: K,
    cadence: Cadence,
    due: f64,
}

/// Cooperative timer wheel keyed by owner
///
/// `K` identifies who a fired task belongs to; the caller decides what the
/// action is.
#[derive(Debug)]
pub struct TaskScheduler<K> {
    now: f64,
    next_id: u64,
    tasks: Vec<ScheduledTask<K>>,
}

impl<K: Copy> TaskScheduler<K> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Register a task. Its first action is due immediately, i.e. on the
    /// next `advance`.
    pub fn spawn(&mut self, owner: K, cadence: Cadence) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            owner,
            cadence,
            due: self.now,
        });
        id
    }

    /// Remove a task. Returns `false` if it was not scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Still scheduled, i.e. neither cancelled nor never spawned
    pub fn is_active(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Number of scheduled tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance the clock by `dt` and collect the tasks that are due.
    ///
    /// Each due task fires at most once per call and sleeps a fresh interval
    /// counted from the new `now`, like a coroutine resuming after a wait.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Vec<(TaskId, K)> {
        self.now += dt.max(0.0) as f64;

        let mut fired = Vec::new();
        for task in &mut self.tasks {
            if task.due <= self.now {
                fired.push((task.id, task.owner));
                task.due = self.now + task.cadence.next_interval(rng) as f64;
            }
        }
        fired
    }
}

impl<K: Copy> Default for TaskScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_first_action_is_immediate() {
        let mut rng = rng();
        let mut tasks = TaskScheduler::new();
        let id = tasks.spawn("wander", Cadence::Fixed(1.5));

        let fired = tasks.advance(0.016, &mut rng);
        assert_eq!(fired, vec![(id, "wander")]);
    }

    #[test]
    fn test_fixed_cadence() {
        let mut rng = rng();
        let mut tasks = TaskScheduler::new();
        tasks.spawn(0u8, Cadence::Fixed(1.5));

        assert_eq!(tasks.advance(0.0, &mut rng).len(), 1);
        assert_eq!(tasks.advance(1.0, &mut rng).len(), 0);
        assert_eq!(tasks.advance(0.5, &mut rng).len(), 1);
        assert_eq!(tasks.advance(1.4, &mut rng).len(), 0);
        assert_eq!(tasks.advance(0.2, &mut rng).len(), 1);
    }

    #[test]
    fn test_fires_once_per_advance() {
        let mut rng = rng();
        let mut tasks = TaskScheduler::new();
        tasks.spawn(0u8, Cadence::Fixed(1.0));

        assert_eq!(tasks.advance(10.0, &mut rng).len(), 1);
        assert_eq!(tasks.advance(0.5, &mut rng).len(), 0);
    }

    #[test]
    fn test_cancel_is_synchronous() {
        let mut rng = rng();
        let mut tasks = TaskScheduler::new();
        let id = tasks.spawn(0u8, Cadence::Fixed(1.0));

        assert!(tasks.cancel(id));
        assert!(!tasks.is_active(id));
        assert!(tasks.advance(5.0, &mut rng).is_empty());
        assert!(!tasks.cancel(id));
    }

    #[test]
    fn test_uniform_interval_bounds() {
        let mut rng = rng();
        let cadence = Cadence::Uniform { min: 1.0, max: 6.0 };
        for _ in 0..1000 {
            let interval = cadence.next_interval(&mut rng);
            assert!((1.0..=6.0).contains(&interval));
        }
    }

    #[test]
    fn test_degenerate_uniform_interval() {
        let mut rng = rng();
        let cadence = Cadence::Uniform { min: 2.0, max: 2.0 };
        assert_eq!(cadence.next_interval(&mut rng), 2.0);
    }

    #[test]
    fn test_task_ids_are_unique() {
        let mut tasks = TaskScheduler::new();
        let a = tasks.spawn(0u8, Cadence::Fixed(1.0));
        tasks.cancel(a);
        let b = tasks.spawn(0u8, Cadence::Fixed(1.0));
        assert_ne!(a, b);
        assert_eq!(tasks.len(), 1);
    }
}
