//! Node lifecycle: spawn, render, despawn
//!
//! A node is either unspawned or spawned under an epoch. Every task submitted
//! while spawning is guarded on that epoch, so a despawn (which clears the
//! state) or a respawn (which starts a new epoch) stops the old tasks on
//! their next run.
//!
//! Ordering guarantees:
//! - children spawn before the parent's own points
//! - children render before the parent checks its own visibility
//! - every spawned point is despawned exactly once

use log::{debug, info, trace};

use crate::ecs::trigger::{DESPAWN_EVENT, SCALE_CHANGED_EVENT, SPAWN_EVENT};
use crate::ecs::{ScheduledTask, TaskAction, TaskGuard};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Mat4Ext;
use crate::scene::error::SceneError;
use crate::scene::graph::SceneGraph;
use crate::scene::node::LifecycleState;

impl<W: 'static> SceneGraph<W> {
    /// Whether the node is spawned
    pub fn is_spawned(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.is_spawned())
    }

    /// Spawn the node and its subtree, then start rendering it
    ///
    /// Rejected with [`SceneError::AlreadySpawned`] if any node in the
    /// subtree is already spawned. The render task runs every
    /// `render_interval` ticks (at least one), starting on the next tick.
    pub fn spawn(&mut self, id: NodeId, render_interval: u32) -> Result<(), SceneError> {
        self.node(id)?;
        if let Some(spawned) = self.first_spawned_in(id) {
            return Err(SceneError::AlreadySpawned(spawned));
        }

        self.next_epoch += 1;
        let guard = TaskGuard {
            node: id,
            epoch: self.next_epoch,
        };
        self.spawn_subtree(id, guard.epoch, true);

        // Spawn listeners may already have torn the node down again
        if self.guard_holds(guard) {
            let period = render_interval.max(1);
            self.scheduler.run_while(ScheduledTask {
                guard,
                action: TaskAction::Render,
                delay: 1,
                period,
            });
            info!("Spawned {:?} (epoch {}, render every {} tick(s))", id, guard.epoch, period);
        }
        Ok(())
    }

    /// Despawn the node and every spawned node below it
    ///
    /// Idempotent: unspawned nodes are skipped, so despawning twice is a
    /// no-op.
    pub fn despawn(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.node(id)?;
        if self.first_spawned_in(id).is_none() {
            debug!("Despawn of {:?} ignored, nothing spawned", id);
            return Ok(());
        }
        self.despawn_subtree(id);
        info!("Despawned {:?}", id);
        Ok(())
    }

    /// Full teardown followed by a fresh spawn
    pub fn respawn(&mut self, id: NodeId, render_interval: u32) -> Result<(), SceneError> {
        self.despawn(id)?;
        self.spawn(id, render_interval)
    }

    /// Despawn the subtree and remove it from the graph
    pub fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.node(id)?;
        self.despawn_subtree(id);
        if !self.contains(id) {
            return Ok(());
        }

        if let Some(parent) = self.parent(id).and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|_, child| *child != id);
        }
        let removed = self.remove_subtree(id);
        debug!("Destroyed {:?} ({} node(s))", id, removed);
        Ok(())
    }

    /// Advance the scheduler one tick and run every due task
    ///
    /// Returns how many tasks ran. Tasks whose guard no longer holds are
    /// dropped without running.
    pub fn tick(&mut self) -> usize {
        let due = self.scheduler.advance();
        let mut ran = 0;

        for task in due {
            if !self.guard_holds(task.guard) {
                trace!("Dropping cancelled task {:?}", task);
                continue;
            }

            match &task.action {
                TaskAction::Render => self.render(task.guard.node),
                TaskAction::System(system) => system(self, task.guard.node),
            }
            ran += 1;

            if task.repeats() && self.guard_holds(task.guard) {
                self.scheduler.reschedule(task);
            }
        }
        ran
    }

    /// Render the node: children first, then its own points if visible
    ///
    /// Children that drive their own render task are left to it.
    pub(crate) fn render(&mut self, id: NodeId) {
        for child in self.child_ids(id) {
            let inherits_render = matches!(
                self.nodes.get(child).map(|node| node.lifecycle),
                Some(LifecycleState::Spawned { owns_render_task: false, .. })
            );
            if inherits_render {
                self.render(child);
            }
        }

        if !self.is_visible(id) {
            return;
        }
        let Some(world_transform) = self.world_transform(id) else {
            return;
        };
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        for point in &mut node.points {
            let position = world_transform.apply_to_point(&point.position);
            point.renderable.render(&mut self.world, position);
        }
    }

    pub(crate) fn guard_holds(&self, guard: TaskGuard) -> bool {
        matches!(
            self.nodes.get(guard.node).map(|node| node.lifecycle),
            Some(LifecycleState::Spawned { epoch, .. }) if epoch == guard.epoch
        )
    }

    fn first_spawned_in(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if node.is_spawned() {
            return Some(id);
        }
        node.children
            .values()
            .find_map(|&child| self.first_spawned_in(child))
    }

    fn spawn_subtree(&mut self, id: NodeId, epoch: u64, owns_render_task: bool) {
        for child in self.child_ids(id) {
            self.spawn_subtree(child, epoch, false);
        }

        let Some(world_transform) = self.world_transform(id) else {
            return;
        };
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.lifecycle = LifecycleState::Spawned {
            epoch,
            owns_render_task,
        };
        for point in &mut node.points {
            let position = world_transform.apply_to_point(&point.position);
            point.renderable.spawn(&mut self.world, position);
        }

        self.notify(id, SPAWN_EVENT);
        // No previous scale to compare against, so every spawn counts as a change
        self.notify(id, SCALE_CHANGED_EVENT);

        let guard = TaskGuard { node: id, epoch };
        if !self.guard_holds(guard) {
            return;
        }
        let tasks: Vec<_> = self.nodes[id]
            .tasks
            .iter()
            .filter_map(|(trigger, system)| {
                debug_assert!(!trigger.is_event(), "event trigger in task list");
                trigger
                    .schedule()
                    .map(|(delay, period)| (delay, period, system.clone()))
            })
            .collect();
        for (delay, period, system) in tasks {
            self.scheduler.run_while(ScheduledTask {
                guard,
                action: TaskAction::System(system),
                delay,
                period,
            });
        }
    }

    pub(crate) fn despawn_subtree(&mut self, id: NodeId) {
        let Some(world_transform) = self.world_transform(id) else {
            return;
        };
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };

        let was_spawned = node.is_spawned();
        if was_spawned {
            node.lifecycle = LifecycleState::Unspawned;
            for point in &mut node.points {
                let position = world_transform.apply_to_point(&point.position);
                point.renderable.despawn(&mut self.world, position);
            }
        }

        for child in self.child_ids(id) {
            self.despawn_subtree(child);
        }

        if was_spawned {
            self.notify(id, DESPAWN_EVENT);
        }
    }

    fn notify(&mut self, id: NodeId, event: &str) {
        if let Err(err) = self.trigger_event(id, event) {
            debug!("Skipped '{}' event: {}", event, err);
        }
    }

    fn remove_subtree(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.remove(id) else {
            return 0;
        };
        1 + node
            .children
            .values()
            .map(|&child| self.remove_subtree(child))
            .sum::<usize>()
    }
}
