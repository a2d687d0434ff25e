use std::{cell::RefCell, rc::Rc, time::Duration};

/// Pending one-shot task. Cancels on [`TimerHandle::cancel`] or drop.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub trait Timer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle;
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTimer;

#[cfg(target_arch = "wasm32")]
impl Timer for BrowserTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = gloo_timers::callback::Timeout::new(millis, task);
        TimerHandle::new(move || drop(timeout))
    }
}

/// Timer for the current platform.
///
/// Host builds have no event loop, so they get a [`ManualTimer`] that only
/// fires when advanced.
pub fn platform_timer() -> Rc<dyn Timer> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(BrowserTimer)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(ManualTimer::new())
    }
}

struct Scheduled {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    queue: Vec<Scheduled>,
}

/// Virtual clock; tasks run from [`ManualTimer::advance`].
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Moves the clock forward, running due tasks in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due <= target)
                    .min_by_key(|(_, s)| (s.due, s.id))
                    .map(|(idx, _)| idx);
                due.map(|idx| {
                    let scheduled = clock.queue.remove(idx);
                    clock.now = scheduled.due;
                    scheduled
                })
            };
            match next {
                Some(scheduled) => (scheduled.task)(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        let id = {
            let mut clock = self.clock.borrow_mut();
            clock.next_id += 1;
            let id = clock.next_id;
            let due = clock.now + delay;
            clock.queue.push(Scheduled { id, due, task });
            id
        };
        let clock = Rc::downgrade(&self.clock);
        TimerHandle::new(move || {
            if let Some(clock) = clock.upgrade() {
                if let Ok(mut clock) = clock.try_borrow_mut() {
                    clock.queue.retain(|s| s.id != id);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter_task(counter: &Rc<Cell<u32>>) -> Box<dyn FnOnce()> {
        let counter = counter.clone();
        Box::new(move || counter.set(counter.get() + 1))
    }

    #[test]
    fn fires_only_after_delay_elapses() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(0));
        let _handle = timer.schedule(Duration::from_millis(300), counter_task(&fired));

        timer.advance(Duration::from_millis(299));
        assert_eq!(fired.get(), 0);
        timer.advance(Duration::from_millis(1));
        assert_eq!(fired.get(), 1);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn cancel_and_drop_prevent_firing() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(0));
        let handle = timer.schedule(Duration::from_millis(10), counter_task(&fired));
        handle.cancel();
        drop(timer.schedule(Duration::from_millis(10), counter_task(&fired)));

        timer.advance(Duration::from_secs(1));
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn tasks_may_schedule_follow_up_tasks() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

        let inner_timer = timer.clone();
        let inner_fired = fired.clone();
        let inner_slot = slot.clone();
        let first = timer.schedule(
            Duration::from_millis(5),
            Box::new(move || {
                let handle = inner_timer.schedule(Duration::from_millis(5), counter_task(&inner_fired));
                *inner_slot.borrow_mut() = Some(handle);
            }),
        );

        timer.advance(Duration::from_millis(10));
        assert_eq!(fired.get(), 1);
        assert_eq!(timer.now(), Duration::from_millis(10));
        drop(first);
    }
}
