use crate::registry::{ZoneId, ZoneRegistry};
use log::{debug, info, warn};

/// Length of one base time unit at real speed. One engine tick covers one
/// base unit: the elapsed-seconds clock advances by one and the active
/// zone's dwell shrinks by one, so the display clock and the sweep can
/// never drift apart.
pub const BASE_UNIT_MS: u64 = 1000;

/// Seconds between forced resyncs of the sweep cycle.
pub const RESYNC_PERIOD_SECS: u64 = 60;

/// One entry of the visitation plan: a zone and how many ticks it stays lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepStep {
    pub zone: ZoneId,
    pub dwell: u16,
}

/// Builds the visitation plan from the registry: all four zones, stably
/// sorted ascending by `order`. A zero `time` would stall the sweep, so
/// dwell is floored at one tick.
pub fn build_plan(registry: &ZoneRegistry) -> Vec<SweepStep> {
    let mut plan: Vec<SweepStep> = ZoneId::ALL
        .iter()
        .map(|&zone| SweepStep {
            zone,
            dwell: registry.get(zone).time.max(1),
        })
        .collect();
    plan.sort_by_key(|step| registry.get(step.zone).order);
    plan
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,     // no sweep in progress
    Sweeping, // cyclic passes over the plan
    Resync,   // the single clean pass forced by a minute boundary
}

/// Tick-driven sweep state machine. The worker thread calls `tick()` once
/// per base unit; everything here is deterministic so tests can drive it
/// directly. Exactly one engine drives a sweep at any time: the minute
/// boundary restarts the cycle *inside* this machine instead of spawning a
/// second loop.
pub struct SweepEngine {
    plan: Vec<SweepStep>,
    phase: Phase,
    cursor: usize,
    remaining: u16,
    elapsed_seconds: u64,
    stop_requested: bool,
}

impl SweepEngine {
    /// `elapsed_seconds` seeds the clock so a stopped-and-restarted sweep
    /// continues the timer rather than rewinding it.
    pub fn new(plan: Vec<SweepStep>, elapsed_seconds: u64) -> Self {
        Self {
            plan,
            phase: Phase::Idle,
            cursor: 0,
            remaining: 0,
            elapsed_seconds,
            stop_requested: false,
        }
    }

    /// Begins a sweep cycle, asserting the first zone of the plan.
    pub fn start(&mut self) {
        if self.plan.is_empty() {
            warn!("Sweep start requested with an empty plan; staying idle.");
            return;
        }
        self.phase = Phase::Sweeping;
        self.cursor = 0;
        self.remaining = self.plan[0].dwell;
        self.stop_requested = false;
        info!("Sweep started: {:?}", self.plan);
    }

    /// Advances the machine by one base unit.
    ///
    /// The elapsed clock always moves first. On a minute boundary the
    /// in-flight pass is abandoned mid-dwell (the only place a zone can
    /// lose its slot early) and a clean pass starts from the lowest order.
    /// Otherwise the current zone's dwell burns down; when it completes,
    /// the cooperative stop flag is polled before the next zone is
    /// asserted, so cancellation never cuts a zone short but also never
    /// lights another one.
    pub fn tick(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }

        self.elapsed_seconds += 1;

        if self.elapsed_seconds % RESYNC_PERIOD_SECS == 0 {
            debug!(
                "Minute boundary at {}s: interrupting sweep for a clean pass.",
                self.elapsed_seconds
            );
            self.stop_requested = false;
            self.phase = Phase::Resync;
            self.cursor = 0;
            self.remaining = self.plan[0].dwell;
            return;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return;
        }

        // Zone dwell complete; this is the cancellation point.
        if self.stop_requested {
            debug!("Stop flag observed at zone boundary; sweep ends early.");
            self.halt();
            return;
        }

        self.cursor += 1;
        if self.cursor == self.plan.len() {
            self.cursor = 0;
            if self.phase == Phase::Resync {
                debug!("Clean pass complete; resuming cyclic sweeping.");
                self.phase = Phase::Sweeping;
            }
        }
        self.remaining = self.plan[self.cursor].dwell;
    }

    /// Requests cooperative cancellation. Honored at the next zone
    /// boundary; the zone currently lit keeps its full dwell.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Immediate stop: deasserts whatever is lit and returns to idle. The
    /// elapsed clock is kept (only `reset_timer` rewinds it).
    pub fn halt(&mut self) {
        self.phase = Phase::Idle;
        self.cursor = 0;
        self.remaining = 0;
        self.stop_requested = false;
    }

    pub fn reset_timer(&mut self) {
        self.elapsed_seconds = 0;
    }

    /// The zone currently lit, if any.
    pub fn active_zone(&self) -> Option<ZoneId> {
        match self.phase {
            Phase::Idle => None,
            _ => self.plan.get(self.cursor).map(|step| step.zone),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
