//! Timed task scheduling
//!
//! Replaces "wait N seconds then continue" chains with explicit timers
//! advanced by the frame loop. A task is a tag plus a due time; advancing the
//! scheduler returns the tags that came due so the owner can act on them.
//! Cancellation is a flag on the task, checked when it would fire.

use std::collections::HashMap;

/// Identifier for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    tag: T,
    due_at: f64,
    /// `Some` for repeating tasks
    interval: Option<f64>,
    cancelled: bool,
}

/// Single-threaded scheduler of one-shot and repeating tasks
#[derive(Debug, Clone)]
pub struct TaskScheduler<T> {
    tasks: HashMap<TaskId, ScheduledTask<T>>,
    next_id: u64,
    current_time: f64,
}

impl<T: Clone> TaskScheduler<T> {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 0,
            current_time: 0.0,
        }
    }

    /// Seconds advanced since creation
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Fire `tag` once after `delay` seconds
    pub fn schedule_once(&mut self, delay: f32, tag: T) -> TaskId {
        self.insert(tag, f64::from(delay.max(0.0)), None)
    }

    /// Fire `tag` every `interval` seconds, first after one interval
    ///
    /// Intervals below one millisecond are clamped so a bad setting cannot
    /// stall the frame loop.
    pub fn schedule_repeating(&mut self, interval: f32, tag: T) -> TaskId {
        let interval = f64::from(interval.max(0.001));
        self.insert(tag, interval, Some(interval))
    }

    fn insert(&mut self, tag: T, delay: f64, interval: Option<f64>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            ScheduledTask {
                tag,
                due_at: self.current_time + delay,
                interval,
                cancelled: false,
            },
        );
        id
    }

    /// Cancel a task; returns false if it already finished or never existed
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.get_mut(&id) {
            Some(task) if !task.cancelled => {
                task.cancelled = true;
                true
            }
            _ => false,
        }
    }

    /// Cancel every pending task
    pub fn cancel_all(&mut self) {
        for task in self.tasks.values_mut() {
            task.cancelled = true;
        }
    }

    /// Whether a task is still waiting to fire
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.get(&id).is_some_and(|task| !task.cancelled)
    }

    /// Number of live tasks
    pub fn pending_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.cancelled).count()
    }

    /// Advance time by `delta_time` seconds and collect the tags that came due
    ///
    /// Tags are returned in due-time order (ties broken by scheduling order).
    /// A repeating task fires once per elapsed interval, so a long step may
    /// yield the same tag several times.
    pub fn advance(&mut self, delta_time: f32) -> Vec<T> {
        self.current_time += f64::from(delta_time.max(0.0));
        let now = self.current_time;

        let mut fired: Vec<(f64, TaskId, T)> = Vec::new();
        for (id, task) in &mut self.tasks {
            if task.cancelled {
                continue;
            }
            while task.due_at <= now {
                fired.push((task.due_at, *id, task.tag.clone()));
                match task.interval {
                    Some(interval) => task.due_at += interval,
                    None => {
                        task.cancelled = true;
                        break;
                    }
                }
            }
        }

        self.tasks.retain(|_, task| !task.cancelled);

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, tag)| tag).collect()
    }
}

impl<T: Clone> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
