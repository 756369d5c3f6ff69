use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, info};

use wardsync_api::models::{Action, ScheduledTask};

use crate::services::ActionService;

/// Heap entry ordered by fire time, earliest first through `Reverse`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTask(ScheduledTask);

impl Ord for PendingTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .fire_at
            .cmp(&other.0.fire_at)
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

impl PartialOrd for PendingTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Holds registered tasks until they are due, then executes each exactly once
/// through the action applier on its own timeline. A task fires even if no
/// further command traffic ever arrives; teardown abandons whatever is left.
pub struct SchedulerService {
    pending: Arc<Mutex<BinaryHeap<Reverse<PendingTask>>>>,
    wakeup: Arc<Notify>,
    actions: Arc<ActionService>,
}

impl SchedulerService {
    pub fn new(actions: Arc<ActionService>) -> Self {
        let service = Self {
            pending: Arc::new(Mutex::new(BinaryHeap::new())),
            wakeup: Arc::new(Notify::new()),
            actions,
        };

        service.start_firing_task();

        service
    }

    /// Register a task. Holds the heap lock only for the insertion, so
    /// registration never waits on an in-flight firing.
    pub async fn schedule(&self, task: ScheduledTask) {
        debug!(
            task_id = %task.id,
            label = %task.label,
            fire_at = %task.fire_at,
            "scheduled task registered"
        );

        self.pending.lock().await.push(Reverse(PendingTask(task)));
        self.wakeup.notify_one();
    }

    /// Pending tasks ordered by fire time.
    pub async fn pending(&self) -> Vec<ScheduledTask> {
        let heap = self.pending.lock().await;

        let mut tasks: Vec<ScheduledTask> =
            heap.iter().map(|Reverse(entry)| entry.0.clone()).collect();
        tasks.sort_by_key(|task| task.fire_at);

        tasks
    }

    fn start_firing_task(&self) {
        let pending = self.pending.clone();
        let wakeup = self.wakeup.clone();
        let actions = self.actions.clone();

        tokio::spawn(async move {
            loop {
                let next_due = pending
                    .lock()
                    .await
                    .peek()
                    .map(|Reverse(entry)| entry.0.fire_at);

                let Some(fire_at) = next_due else {
                    wakeup.notified().await;
                    continue;
                };

                let now = OffsetDateTime::now_utc();
                if fire_at > now {
                    let wait = std::time::Duration::try_from(fire_at - now)
                        .unwrap_or(std::time::Duration::ZERO);

                    // Wake early if a registration moves the deadline up.
                    tokio::select! {
                        _ = tokio::time::sleep(wait) => {}
                        _ = wakeup.notified() => {}
                    }
                    continue;
                }

                let due = {
                    let mut heap = pending.lock().await;
                    let mut due = Vec::new();
                    while heap
                        .peek()
                        .is_some_and(|Reverse(entry)| entry.0.fire_at <= now)
                    {
                        if let Some(Reverse(entry)) = heap.pop() {
                            due.push(entry.0);
                        }
                    }
                    due
                };

                for task in due {
                    let reply = actions
                        .apply_one(Action::SetPower {
                            device: task.device,
                            on: task.on,
                        })
                        .await;

                    info!(
                        task_id = %task.id,
                        label = %task.label,
                        "scheduled task fired: {reply}"
                    );
                }
            }
        });
    }
}
