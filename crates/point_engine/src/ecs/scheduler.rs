//! Host scheduler binding
//!
//! The scene graph never runs its own loop. It hands periodic work to a
//! [`HostScheduler`] and the host advances that scheduler once per tick
//! through [`SceneGraph::tick`](crate::scene::SceneGraph::tick).
//!
//! Every task carries a [`TaskGuard`]. The graph checks the guard before each
//! run, which is the continuation predicate: a task keeps running while the
//! node it belongs to is alive and still in the same spawn it was submitted
//! from.

use std::fmt;

use crate::ecs::system::System;
use crate::foundation::collections::NodeId;

/// Continuation predicate for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskGuard {
    /// Node the task runs against
    pub node: NodeId,
    /// Spawn epoch the task was submitted from
    pub epoch: u64,
}

/// What a scheduled task does when it runs
pub enum TaskAction<W> {
    /// Render the node's subtree
    Render,
    /// Run a periodic system
    System(System<W>),
}

impl<W> Clone for TaskAction<W> {
    fn clone(&self) -> Self {
        match self {
            Self::Render => Self::Render,
            Self::System(system) => Self::System(System::clone(system)),
        }
    }
}

impl<W> fmt::Debug for TaskAction<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render => f.write_str("Render"),
            Self::System(_) => f.write_str("System(..)"),
        }
    }
}

/// A unit of periodic work submitted to the host
pub struct ScheduledTask<W> {
    /// Continuation predicate
    pub guard: TaskGuard,
    /// Work to perform
    pub action: TaskAction<W>,
    /// Ticks before the first run (zero behaves like one)
    pub delay: u32,
    /// Ticks between runs; zero means run once
    pub period: u32,
}

impl<W> fmt::Debug for ScheduledTask<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("guard", &self.guard)
            .field("action", &self.action)
            .field("delay", &self.delay)
            .field("period", &self.period)
            .finish()
    }
}

impl<W> ScheduledTask<W> {
    /// Whether the task should be put back after it runs
    pub fn repeats(&self) -> bool {
        self.period > 0
    }
}

/// Periodic-task runner provided by the host
///
/// Implementations only keep time; they never evaluate guards or run
/// actions. That stays with the graph, which owns the state both need.
pub trait HostScheduler<W> {
    /// Submit a task to run after `task.delay` ticks
    fn run_while(&mut self, task: ScheduledTask<W>);

    /// Put a repeating task back, due `task.period` ticks from now
    fn reschedule(&mut self, task: ScheduledTask<W>);

    /// Move one tick forward and hand back every task now due, in submission order
    fn advance(&mut self) -> Vec<ScheduledTask<W>>;

    /// Ticks elapsed since the scheduler was created
    fn current_tick(&self) -> u64;

    /// Tasks waiting to run
    fn pending(&self) -> usize;
}

struct Entry<W> {
    due_at: u64,
    task: ScheduledTask<W>,
}

/// Tick-counting scheduler, the default host binding
pub struct TickScheduler<W> {
    now: u64,
    entries: Vec<Entry<W>>,
}

impl<W> TickScheduler<W> {
    /// Create a scheduler at tick zero
    pub fn new() -> Self {
        Self {
            now: 0,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, ticks: u32, task: ScheduledTask<W>) {
        let due_at = self.now + u64::from(ticks.max(1));
        self.entries.push(Entry { due_at, task });
    }
}

impl<W> Default for TickScheduler<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> HostScheduler<W> for TickScheduler<W> {
    fn run_while(&mut self, task: ScheduledTask<W>) {
        let delay = task.delay;
        self.push(delay, task);
    }

    fn reschedule(&mut self, task: ScheduledTask<W>) {
        debug_assert!(task.repeats(), "one-shot task rescheduled");
        let period = task.period;
        self.push(period, task);
    }

    fn advance(&mut self) -> Vec<ScheduledTask<W>> {
        self.now += 1;
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due_at <= now);
        self.entries = pending;
        due.into_iter().map(|entry| entry.task).collect()
    }

    fn current_tick(&self) -> u64 {
        self.now
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }
}
