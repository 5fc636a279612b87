use crate::scheduler::{build_plan, SweepEngine, SweepStep};
use crate::{SharedActiveZone, SharedElapsed, SharedStateFlag, ZonePanel};
use std::{thread, time::Duration};

// Everything the sweep thread needs, cloned out of the app so the UI keeps
// its own handles.
struct WorkerData {
    run_state: SharedStateFlag,
    plan: Vec<SweepStep>,
    active_zone: SharedActiveZone,
    elapsed_seconds: SharedElapsed,
    tick: Duration,
    generation: u64,
}

impl ZonePanel {
    /// Snapshots the registry into a visitation plan and spawns the sweep
    /// thread for the given run generation. Returns false if there is
    /// nothing to sweep.
    pub(crate) fn spawn_worker(&mut self, generation: u64) -> bool {
        let plan = build_plan(&self.registry);
        if plan.is_empty() {
            log::warn!("Refusing to start sweep: visitation plan is empty.");
            return false;
        }

        spawn_sweep_loop(
            self.thread_state.clone(),
            plan,
            self.active_zone.clone(),
            self.elapsed_seconds.clone(),
            self.tick,
            generation,
        );
        log::info!(
            "Sweep worker thread spawn initiated (generation {}).",
            generation
        );
        true
    }

    /// Cleanup actions when the sweep is stopped from the UI: deassert the
    /// indicators immediately. The power path additionally rewinds the
    /// clock to zero.
    pub(crate) fn stop_worker_cleanup(&mut self, reset_timer: bool) {
        if let Ok(mut active) = self.active_zone.lock() {
            *active = None;
        }
        if reset_timer {
            if let Ok(mut elapsed) = self.elapsed_seconds.lock() {
                *elapsed = 0;
            }
        }
        log::info!(
            "Sweep stop cleanup finished (timer {}).",
            if reset_timer { "reset" } else { "kept" }
        );
    }
}

/// Spawns the sweep thread for one run-mode enablement. The UI lets the
/// handle detach; the generation check retires a superseded thread on its
/// next wakeup, so a rapid stop/start can never leave two loops ticking.
pub fn spawn_sweep_loop(
    run_state: SharedStateFlag,
    plan: Vec<SweepStep>,
    active_zone: SharedActiveZone,
    elapsed_seconds: SharedElapsed,
    tick: Duration,
    generation: u64,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        run_sweep_loop(WorkerData {
            run_state,
            plan,
            active_zone,
            elapsed_seconds,
            tick,
            generation,
        })
    })
}

// The core sweep loop. One tick per base unit drives both the clock and the
// zone dwell, so there is no second timer to drift against. Every publish
// happens inside the same critical section as the run-state check: after
// the UI clears the flag (or a newer generation starts), this thread can
// never light an indicator again.
fn run_sweep_loop(data: WorkerData) {
    let WorkerData {
        run_state,
        plan,
        active_zone,
        elapsed_seconds,
        tick,
        generation,
    } = data;

    let start_elapsed = match elapsed_seconds.lock() {
        Ok(guard) => *guard,
        Err(_) => {
            log::error!("Elapsed clock mutex poisoned at sweep start!");
            0
        }
    };

    let mut engine = SweepEngine::new(plan, start_elapsed);
    engine.start();

    let &(ref run_lock, ref _run_cvar) = &*run_state;

    match run_lock.lock() {
        Ok(guard) => {
            if !guard.running || guard.generation != generation {
                log::info!("Sweep generation {} superseded before first tick.", generation);
                return;
            }
            publish(&active_zone, &elapsed_seconds, &engine);
        }
        Err(_) => {
            log::error!("Run state mutex poisoned in sweep loop!");
            return;
        }
    }

    loop {
        thread::sleep(tick);

        let guard = match run_lock.lock() {
            Ok(guard) => guard,
            Err(_) => {
                log::error!("Run state mutex poisoned in sweep loop!");
                break;
            }
        };
        if !guard.running {
            log::info!("Stop signal received, exiting sweep loop.");
            break;
        }
        if guard.generation != generation {
            log::info!(
                "Sweep generation {} superseded by {}, exiting sweep loop.",
                generation,
                guard.generation
            );
            break;
        }

        engine.tick();
        publish(&active_zone, &elapsed_seconds, &engine);
    }

    // Deassert on the way out, but only while still the current generation;
    // a replacement sweep owns the indicators by now.
    if let Ok(guard) = run_lock.lock() {
        if guard.generation == generation {
            if let Ok(mut active) = active_zone.lock() {
                *active = None;
            }
        }
    }
    log::info!("Sweep worker thread (generation {}) exiting.", generation);
}

fn publish(active_zone: &SharedActiveZone, elapsed_seconds: &SharedElapsed, engine: &SweepEngine) {
    if let Ok(mut active) = active_zone.lock() {
        *active = engine.active_zone();
    }
    if let Ok(mut elapsed) = elapsed_seconds.lock() {
        *elapsed = engine.elapsed_seconds();
    }
}
