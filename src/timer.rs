//! Delayed tasks owned by the UI loop.

use crate::view::ViewId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Identifies a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Work that can be deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// The view has been held down long enough to count as a long press.
    LongPress(ViewId),
}

impl Task {
    pub fn view(&self) -> ViewId {
        match self {
            Task::LongPress(view) => *view,
        }
    }
}

#[derive(Debug)]
struct Entry {
    deadline: Instant,
    id: TimerId,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// reversed so the heap pops the earliest deadline first; ties go to the older timer
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// A min-heap of tasks keyed by deadline.
#[derive(Debug, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Entry>,
    next_id: u64,
}

impl TaskQueue {
    pub fn new() -> TaskQueue {
        TaskQueue::default()
    }

    pub fn schedule(&mut self, deadline: Instant, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Entry { deadline, id, task });
        id
    }

    /// Cancels a task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.heap.len();
        self.heap.retain(|entry| entry.id != id);
        self.heap.len() != before
    }

    /// Cancels every task that targets the given view.
    pub fn cancel_view(&mut self, view: ViewId) {
        self.heap.retain(|entry| entry.task.view() != view);
    }

    /// Removes and returns all tasks due at `now`, earliest first.
    pub fn collect(&mut self, now: Instant) -> Vec<(TimerId, Task)> {
        let mut due = Vec::new();
        while let Some(entry) = self.heap.peek() {
            if entry.deadline > now {
                break;
            }
            if let Some(entry) = self.heap.pop() {
                due.push((entry.id, entry.task));
            }
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.deadline)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn tasks_come_out_in_deadline_order() {
        let start = Instant::now();
        let a = ViewId::new();
        let b = ViewId::new();
        let mut queue = TaskQueue::new();
        queue.schedule(start + Duration::from_millis(300), Task::LongPress(a));
        queue.schedule(start + Duration::from_millis(100), Task::LongPress(b));

        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(100)));
        assert!(queue.collect(start).is_empty());

        let due = queue.collect(start + Duration::from_millis(500));
        let views: Vec<_> = due.iter().map(|(_, task)| task.view()).collect();
        assert_eq!(views, vec![b, a]);
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let start = Instant::now();
        let a = ViewId::new();
        let b = ViewId::new();
        let mut queue = TaskQueue::new();
        let id = queue.schedule(start, Task::LongPress(a));
        queue.schedule(start, Task::LongPress(b));
        queue.schedule(start, Task::LongPress(b));

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        queue.cancel_view(b);
        assert!(queue.collect(start + Duration::from_secs(1)).is_empty());
    }
}
