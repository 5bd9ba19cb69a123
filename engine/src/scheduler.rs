use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type OnceCallback = Box<dyn FnOnce() + Send>;
pub type RepeatingCallback = Box<dyn FnMut() + Send>;

// Implementations must queue the callback and return; firing a callback
// synchronously from schedule_once/schedule_repeating would re-enter the
// caller while it still holds its own locks.
pub trait Scheduler: Send + Sync {
    fn schedule_once(&self, delay: Duration, callback: OnceCallback) -> TaskHandle;
    fn schedule_repeating(&self, interval: Duration, callback: RepeatingCallback) -> TaskHandle;
}

#[derive(Clone, Debug)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    // Panics outside a tokio runtime; use with_handle to pass one in.
    pub fn new() -> Self {
        Self {
            handle: tokio::runtime::Handle::current(),
        }
    }

    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, callback: OnceCallback) -> TaskHandle {
        let handle = TaskHandle::new();
        let task_handle = handle.clone();
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if task_handle.is_cancelled() {
                return;
            }
            callback();
        });
        handle
    }

    fn schedule_repeating(&self, interval: Duration, mut callback: RepeatingCallback) -> TaskHandle {
        let handle = TaskHandle::new();
        let task_handle = handle.clone();
        self.handle.spawn(async move {
            let mut timer = tokio::time::interval(interval);
            // the first tick of tokio's interval completes immediately
            timer.tick().await;
            loop {
                timer.tick().await;
                if task_handle.is_cancelled() {
                    break;
                }
                callback();
            }
        });
        handle
    }
}

enum TaskKind {
    Once(OnceCallback),
    Repeating {
        every: Duration,
        callback: RepeatingCallback,
    },
}

struct ManualTask {
    due: Duration,
    seq: u64,
    handle: TaskHandle,
    kind: TaskKind,
}

struct ManualQueue {
    now: Duration,
    next_seq: u64,
    tasks: Vec<ManualTask>,
}

// Virtual-time scheduler: nothing fires until advance() moves the clock.
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(ManualQueue {
                now: Duration::ZERO,
                next_seq: 0,
                tasks: Vec::new(),
            }),
        }
    }

    pub fn now(&self) -> Duration {
        self.queue.lock().unwrap().now
    }

    pub fn pending_tasks(&self) -> usize {
        let queue = self.queue.lock().unwrap();
        queue
            .tasks
            .iter()
            .filter(|task| !task.handle.is_cancelled())
            .count()
    }

    pub fn advance(&self, step: Duration) {
        let target = self.queue.lock().unwrap().now + step;

        loop {
            let next = {
                let mut queue = self.queue.lock().unwrap();
                queue.tasks.retain(|task| !task.handle.is_cancelled());

                let due_index = queue
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(_, task)| (task.due, task.seq))
                    .map(|(index, _)| index);

                match due_index {
                    Some(index) => {
                        let task = queue.tasks.remove(index);
                        queue.now = queue.now.max(task.due);
                        Some(task)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };

            let Some(task) = next else {
                break;
            };
            let ManualTask {
                due,
                seq: _,
                handle,
                kind,
            } = task;

            match kind {
                TaskKind::Once(callback) => callback(),
                TaskKind::Repeating { every, mut callback } => {
                    callback();
                    if !handle.is_cancelled() {
                        let mut queue = self.queue.lock().unwrap();
                        let seq = queue.next_seq;
                        queue.next_seq += 1;
                        queue.tasks.push(ManualTask {
                            due: due + every,
                            seq,
                            handle,
                            kind: TaskKind::Repeating { every, callback },
                        });
                    }
                }
            }
        }
    }

    fn push(&self, delay: Duration, kind: TaskKind) -> TaskHandle {
        let handle = TaskHandle::new();
        let mut queue = self.queue.lock().unwrap();
        let due = queue.now + delay;
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.tasks.push(ManualTask {
            due,
            seq,
            handle: handle.clone(),
            kind,
        });
        handle
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, callback: OnceCallback) -> TaskHandle {
        self.push(delay, TaskKind::Once(callback))
    }

    fn schedule_repeating(&self, interval: Duration, callback: RepeatingCallback) -> TaskHandle {
        self.push(
            interval,
            TaskKind::Repeating {
                every: interval,
                callback,
            },
        )
    }
}
