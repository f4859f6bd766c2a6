//! Periodic animation loop
//!
//! [`Ticker`] is a fixed-period runner with a cooperative stop flag: the flag
//! is checked at the top of every iteration, so a stop request never cuts a
//! tick short. [`Animator`] drives a [`SharedScene`] from a background thread,
//! holding the scene lock once for the move phase and once for the frame
//! callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::scene::Scene;

/// A scene shared between the animation thread and the host's draw thread
pub type SharedScene = Arc<Mutex<Scene>>;

/// Lock a shared scene; a panic in another holder does not wedge the canvas
pub fn lock_scene(scene: &SharedScene) -> MutexGuard<'_, Scene> {
    scene.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Requests that a [`Ticker`] stop before its next iteration
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        !self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    running: Arc<AtomicBool>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    /// Call `tick` every period until stopped; returns the number of ticks run
    pub fn run(&self, tick: impl FnMut()) -> u64 {
        self.run_with_sleeper(tick, thread::sleep)
    }

    /// Like [`Ticker::run`] with a caller-supplied sleep
    pub fn run_with_sleeper(&self, mut tick: impl FnMut(), mut sleep: impl FnMut(Duration)) -> u64 {
        let mut ticks = 0;
        while self.running.load(Ordering::Acquire) {
            tick();
            ticks += 1;
            sleep(self.period);
        }
        ticks
    }
}

/// Background thread ticking a [`SharedScene`]
#[derive(Debug)]
pub struct Animator {
    stop: StopHandle,
    thread: Option<JoinHandle<u64>>,
}

impl Animator {
    /// Start ticking `scene` at its configured period.
    ///
    /// After each tick `on_frame` sees the scene under the lock; hosts use it
    /// to schedule a redraw.
    pub fn spawn(scene: SharedScene, mut on_frame: impl FnMut(&Scene) + Send + 'static) -> Self {
        let period = lock_scene(&scene).tick_period();
        let ticker = Ticker::new(period);
        let stop = ticker.stop_handle();

        crate::log::debug!(?period, "animation started");
        let thread = thread::spawn(move || {
            let ticks = ticker.run(|| {
                lock_scene(&scene).tick();
                let frame = lock_scene(&scene);
                on_frame(&*frame);
            });
            crate::log::debug!(ticks, "animation stopped");
            ticks
        });

        Self {
            stop,
            thread: Some(thread),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Ask the loop to finish after the tick in flight
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Stop and wait for the loop, returning how many ticks it ran
    pub fn join(mut self) -> thread::Result<u64> {
        self.stop();
        match self.thread.take() {
            Some(thread) => thread.join(),
            None => Ok(0),
        }
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
