use futures::future::LocalBoxFuture;
use std::{fmt, rc::Rc};

/// Handle for running detached local futures.
///
/// Browser builds hand futures to `leptos::spawn_local`; tests drive them
/// through a `futures::executor::LocalPool`.
#[derive(Clone)]
pub struct Spawner {
    spawn: Rc<dyn Fn(LocalBoxFuture<'static, ()>)>,
}

impl Spawner {
    pub fn new(spawn: impl Fn(LocalBoxFuture<'static, ()>) + 'static) -> Self {
        Self {
            spawn: Rc::new(spawn),
        }
    }

    pub fn leptos() -> Self {
        Self::new(|future| leptos::spawn_local(future))
    }

    pub fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        (self.spawn)(future);
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::leptos()
    }
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Spawner")
    }
}

#[cfg(test)]
pub mod testing {
    use super::Spawner;
    use futures::{executor::LocalPool, task::LocalSpawnExt};

    pub fn pool_spawner(pool: &LocalPool) -> Spawner {
        let spawner = pool.spawner();
        // Tasks spawned after the pool is dropped never run.
        Spawner::new(move |future| {
            if let Err(err) = spawner.spawn_local(future) {
                log::debug!("local pool is gone: {}", err);
            }
        })
    }
}
