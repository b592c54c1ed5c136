//! Deterministic kinematics cycle: inputs → forward (with handshake) → inverse.
//!
//! Stands in for the host servo thread. Each cycle:
//! 1. The [`CycleSource`] writes joint feedback, the commanded pose and the
//!    host-driven signal inputs.
//! 2. `forward()` runs the mode-switch handshake and maps feedback joints to
//!    the actual pose.
//! 3. `inverse()` maps the commanded pose to joint targets.
//!
//! ## RT Setup
//! `mlockall`, stack prefault, CPU affinity and `SCHED_FIFO` behind the `rt`
//! feature; no-ops otherwise.
//!
//! ## Runtime State
//! Everything the loop touches is owned by [`CycleRunner`] and sized at
//! construction; the loop body does not allocate.

use std::sync::atomic::{AtomicBool, Ordering};

use fivax_common::consts::COMMIT_HISTORY_DEPTH;
use fivax_common::kinematics::config::KinsConfig;
use fivax_common::kinematics::error::KinematicsError;
use fivax_common::kinematics::flags::{Capabilities, KinematicsFlags};
use fivax_common::kinematics::signals::SignalBank;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, Pose};
use heapless::Deque;
use thiserror::Error;

use crate::module::{self, KinematicsModule};

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Last cycle duration [ns].
    pub last_cycle_ns: i64,
    /// Minimum cycle duration [ns].
    pub min_cycle_ns: i64,
    /// Maximum cycle duration [ns].
    pub max_cycle_ns: i64,
    /// Running sum for average computation.
    pub sum_cycle_ns: i64,
    /// Number of overruns detected.
    pub overruns: u64,
    /// Maximum wake-up latency [ns].
    pub max_latency_ns: i64,
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: i64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
            max_latency_ns: 0,
        }
    }

    /// Record a cycle duration. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_ns: i64, latency_ns: i64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns += duration_ns;
        self.max_latency_ns = self.max_latency_ns.max(latency_ns);
    }

    /// Average cycle time [ns] (0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> i64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count as i64
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors during RT setup or cycle execution.
#[derive(Debug, Error)]
pub enum CycleError {
    /// RT system call failed.
    #[error("RT setup error: {0}")]
    RtSetup(String),

    /// Module lookup or entry point failed.
    #[error("kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    /// Cycle took longer than its budget.
    #[error("cycle overrun: {actual_ns}ns > {budget_ns}ns budget")]
    CycleOverrun {
        /// Actual cycle duration [ns].
        actual_ns: i64,
        /// Configured cycle budget [ns].
        budget_ns: i64,
    },
}

// ─── Cycle I/O ──────────────────────────────────────────────────────

/// Per-cycle values supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleInput {
    /// Measured joint positions.
    pub feedback: JointVector,
    /// Commanded cartesian pose.
    pub command: Pose,
}

/// Host side of the cycle: produces inputs and drives the signal inputs.
pub trait CycleSource {
    fn sample(&mut self, cycle: u64, signals: &mut SignalBank) -> CycleInput;
}

impl<F> CycleSource for F
where
    F: FnMut(u64, &mut SignalBank) -> CycleInput,
{
    fn sample(&mut self, cycle: u64, signals: &mut SignalBank) -> CycleInput {
        self(cycle, signals)
    }
}

/// Result of one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    /// Pose for the feedback joints.
    pub actual: Pose,
    /// Joint targets for the commanded pose.
    pub targets: JointVector,
    /// `change_pending` output after the cycle.
    pub change_pending: bool,
    /// The active config moved by more than the drift tolerance this cycle.
    pub committed: bool,
}

/// One applied config change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitRecord {
    pub cycle: u64,
    pub previous: KinematicsConfig,
    pub active: KinematicsConfig,
}

// ─── Wake Schedule ──────────────────────────────────────────────────

/// Absolute wake times on a fixed period, in monotonic nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeSchedule {
    next_wake_ns: i64,
    period_ns: i64,
}

impl WakeSchedule {
    pub const fn new(start_ns: i64, period_ns: i64) -> Self {
        Self {
            next_wake_ns: start_ns,
            period_ns,
        }
    }

    /// Wake time the loop should sleep until.
    #[inline]
    pub const fn next_wake_ns(&self) -> i64 {
        self.next_wake_ns
    }

    /// Record a wake at `now_ns`: returns the latency against the scheduled
    /// wake, then advances the schedule by one period.
    #[inline]
    pub fn on_wake(&mut self, now_ns: i64) -> i64 {
        let latency = (now_ns - self.next_wake_ns).abs();
        self.next_wake_ns += self.period_ns;
        latency
    }
}

// ─── RT Setup ───────────────────────────────────────────────────────

#[cfg(feature = "rt")]
fn rt_mlockall() -> Result<(), CycleError> {
    use nix::sys::mman::{MlockallFlags, mlockall};
    mlockall(MlockallFlags::MCL_CURRENT | MlockallFlags::MCL_FUTURE)
        .map_err(|e| CycleError::RtSetup(format!("mlockall failed: {e}")))
}

#[cfg(not(feature = "rt"))]
fn rt_mlockall() -> Result<(), CycleError> {
    Ok(())
}

/// Touch 256 KiB of stack so the loop never page-faults on it.
fn prefault_stack() {
    let mut buf = [0u8; 256 * 1024];
    for byte in buf.iter_mut() {
        unsafe { core::ptr::write_volatile(byte, 0xFF) };
    }
    core::hint::black_box(&buf);
}

#[cfg(feature = "rt")]
fn rt_set_affinity(cpu: usize) -> Result<(), CycleError> {
    use nix::sched::{CpuSet, sched_setaffinity};
    use nix::unistd::Pid;

    let mut cpuset = CpuSet::new();
    cpuset
        .set(cpu)
        .map_err(|e| CycleError::RtSetup(format!("CpuSet::set({cpu}) failed: {e}")))?;
    sched_setaffinity(Pid::from_raw(0), &cpuset)
        .map_err(|e| CycleError::RtSetup(format!("sched_setaffinity failed: {e}")))
}

#[cfg(not(feature = "rt"))]
fn rt_set_affinity(_cpu: usize) -> Result<(), CycleError> {
    Ok(())
}

#[cfg(feature = "rt")]
fn rt_set_scheduler(priority: i32) -> Result<(), CycleError> {
    let param = libc::sched_param {
        sched_priority: priority,
    };
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        return Err(CycleError::RtSetup(format!(
            "sched_setscheduler(SCHED_FIFO, {priority}) failed: {err}"
        )));
    }
    Ok(())
}

#[cfg(not(feature = "rt"))]
fn rt_set_scheduler(_priority: i32) -> Result<(), CycleError> {
    Ok(())
}

/// Full RT setup sequence. Call once before entering the cycle loop.
pub fn rt_setup(cpu_core: usize, rt_priority: i32) -> Result<(), CycleError> {
    rt_mlockall()?;
    prefault_stack();
    rt_set_affinity(cpu_core)?;
    rt_set_scheduler(rt_priority)?;
    Ok(())
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Owns the module, the signal bank and all per-cycle bookkeeping.
pub struct CycleRunner {
    module: Box<dyn KinematicsModule>,
    /// Signal bank shared with the host side.
    pub signals: SignalBank,
    flags: KinematicsFlags,
    /// Cycle statistics.
    pub stats: CycleStats,
    history: Deque<CommitRecord, COMMIT_HISTORY_DEPTH>,
    cycle: u64,
    cycle_time_ns: i64,
}

impl CycleRunner {
    /// Build the runner from a validated configuration. The module starts in
    /// its default (trivial) config; the configured request is only applied
    /// once the host opens the gate.
    pub fn new(config: &KinsConfig) -> Result<Self, CycleError> {
        let module = module::create(&config.kinematics.module)?;
        module::require(module.as_ref(), Capabilities::BOTH)?;
        let signals = SignalBank::requesting(config.kinematics.requested());
        Ok(Self::with_module(
            module,
            signals,
            config.cycle.cycle_time_us,
        ))
    }

    pub fn with_module(
        module: Box<dyn KinematicsModule>,
        signals: SignalBank,
        cycle_time_us: u32,
    ) -> Self {
        Self {
            module,
            signals,
            flags: KinematicsFlags::default(),
            stats: CycleStats::new(),
            history: Deque::new(),
            cycle: 0,
            cycle_time_ns: cycle_time_us as i64 * 1000,
        }
    }

    pub fn module(&self) -> &dyn KinematicsModule {
        self.module.as_ref()
    }

    /// Cycles executed so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Most recent commits, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &CommitRecord> {
        self.history.iter()
    }

    /// Run the module's home entry point with all joints at zero.
    pub fn home(&mut self) -> Result<Pose, CycleError> {
        let pose = self
            .module
            .home(&mut self.signals, &JointVector::ZERO, &mut self.flags)?;
        Ok(pose)
    }

    /// Execute one cycle with the given inputs. Signal inputs must already be
    /// written to [`CycleRunner::signals`].
    pub fn step(&mut self, input: &CycleInput) -> Result<CycleReport, CycleError> {
        let before = self.module.active_config();

        let actual = self
            .module
            .forward(&mut self.signals, &input.feedback, &mut self.flags)?;
        let after = self.module.active_config();
        let targets = self.module.inverse(&input.command, &mut self.flags)?;

        let committed = after.differs_from(&before);
        if committed {
            self.record_commit(before, after);
        }

        let report = CycleReport {
            cycle: self.cycle,
            actual,
            targets,
            change_pending: self.signals.change_pending,
            committed,
        };
        self.cycle += 1;
        Ok(report)
    }

    fn record_commit(&mut self, previous: KinematicsConfig, active: KinematicsConfig) {
        if self.history.is_full() {
            self.history.pop_front();
        }
        let _ = self.history.push_back(CommitRecord {
            cycle: self.cycle,
            previous,
            active,
        });
    }

    /// Run cycles until `running` clears or `max_cycles` have executed.
    ///
    /// Both loops pace on a [`WakeSchedule`]. With the `rt` feature the loop
    /// sleeps on `CLOCK_MONOTONIC` absolute time and returns `CycleOverrun` on
    /// the first late cycle; otherwise it uses `std::thread::sleep` and only
    /// counts overruns.
    pub fn run<S: CycleSource>(
        &mut self,
        source: &mut S,
        running: &AtomicBool,
        max_cycles: Option<u64>,
    ) -> Result<(), CycleError> {
        #[cfg(feature = "rt")]
        {
            self.run_rt_loop(source, running, max_cycles)
        }

        #[cfg(not(feature = "rt"))]
        {
            self.run_sim_loop(source, running, max_cycles)
        }
    }

    fn cycle_body<S: CycleSource>(&mut self, source: &mut S) -> Result<(), CycleError> {
        let input = source.sample(self.cycle, &mut self.signals);
        self.step(&input)?;
        Ok(())
    }

    fn done(&self, running: &AtomicBool, max_cycles: Option<u64>) -> bool {
        !running.load(Ordering::Relaxed) || max_cycles.is_some_and(|max| self.cycle >= max)
    }

    #[cfg(not(feature = "rt"))]
    fn run_sim_loop<S: CycleSource>(
        &mut self,
        source: &mut S,
        running: &AtomicBool,
        max_cycles: Option<u64>,
    ) -> Result<(), CycleError> {
        use std::time::{Duration, Instant};

        let origin = Instant::now();
        let elapsed_ns = || origin.elapsed().as_nanos() as i64;
        let mut schedule = WakeSchedule::new(0, self.cycle_time_ns);

        while !self.done(running, max_cycles) {
            let cycle_start = elapsed_ns();
            let wake_latency_ns = schedule.on_wake(cycle_start);

            self.cycle_body(source)?;

            let cycle_end = elapsed_ns();
            let duration_ns = cycle_end - cycle_start;
            self.stats.record(duration_ns, wake_latency_ns);
            if duration_ns > self.cycle_time_ns {
                self.stats.overruns += 1;
            }

            let remaining = schedule.next_wake_ns() - cycle_end;
            if remaining > 0 {
                std::thread::sleep(Duration::from_nanos(remaining as u64));
            }
        }
        Ok(())
    }

    #[cfg(feature = "rt")]
    fn run_rt_loop<S: CycleSource>(
        &mut self,
        source: &mut S,
        running: &AtomicBool,
        max_cycles: Option<u64>,
    ) -> Result<(), CycleError> {
        use nix::time::{ClockId, ClockNanosleepFlags, clock_gettime, clock_nanosleep};

        let clock = ClockId::CLOCK_MONOTONIC;
        let now = || {
            clock_gettime(clock)
                .map(|ts| timespec_to_ns(&ts))
                .map_err(|e| CycleError::RtSetup(format!("clock_gettime: {e}")))
        };
        let mut schedule = WakeSchedule::new(now()?, self.cycle_time_ns);

        while !self.done(running, max_cycles) {
            let cycle_start = now()?;
            let wake_latency_ns = schedule.on_wake(cycle_start);

            self.cycle_body(source)?;
            let duration_ns = now()? - cycle_start;
            self.stats.record(duration_ns, wake_latency_ns);

            if duration_ns > self.cycle_time_ns {
                self.stats.overruns += 1;
                return Err(CycleError::CycleOverrun {
                    actual_ns: duration_ns,
                    budget_ns: self.cycle_time_ns,
                });
            }

            let _ = clock_nanosleep(
                clock,
                ClockNanosleepFlags::TIMER_ABSTIME,
                &timespec_from_ns(schedule.next_wake_ns()),
            );
        }
        Ok(())
    }
}

// ─── Time Helpers ───────────────────────────────────────────────────

#[cfg(feature = "rt")]
fn timespec_to_ns(ts: &nix::sys::time::TimeSpec) -> i64 {
    ts.tv_sec() * 1_000_000_000 + ts.tv_nsec()
}

#[cfg(feature = "rt")]
fn timespec_from_ns(ns: i64) -> nix::sys::time::TimeSpec {
    nix::sys::time::TimeSpec::new(ns.div_euclid(1_000_000_000), ns.rem_euclid(1_000_000_000))
}

// ─── Tests ──────────────────────────────────────────────────────────
