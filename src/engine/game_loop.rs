/// Fixed timestep scheduler
///
/// Converts wall-clock time into a whole number of fixed-size logic updates
/// per rendered frame, then renders exactly once. Leftover time stays in an
/// accumulator and carries into the next frame, so the simulation advances
/// deterministically regardless of the display rate.
use log::{info, warn};
use std::collections::VecDeque;
use std::time::Instant;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Scheduler tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Logic updates per simulated second
    pub steps_per_second: f64,
    /// Upper bound on updates per frame; excess time is dropped.
    /// `None` runs every owed step.
    pub max_steps_per_frame: Option<u32>,
}

/// 60 updates per second; every owed step runs and the remainder carries
pub const DEFAULT_SCHEDULER: SchedulerConfig = SchedulerConfig {
    steps_per_second: 60.0,
    max_steps_per_frame: None,
};

/// 60 updates per second, at most 5 per frame to prevent a spiral of death
pub const CAPPED_SCHEDULER: SchedulerConfig = SchedulerConfig {
    max_steps_per_frame: Some(5),
    ..DEFAULT_SCHEDULER
};

impl Default for SchedulerConfig {
    fn default() -> Self {
        DEFAULT_SCHEDULER
    }
}

/// Something the scheduler can drive
pub trait FixedStep {
    /// Advance the simulation by one fixed step of `step_ms` milliseconds
    fn update(&mut self, step_ms: f32);

    /// Draw the current state
    fn render(&mut self);
}

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock backed by `Instant`, counting from its creation
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// What happened during one call to [`FixedStepScheduler::frame`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Logic updates executed
    pub updates: u32,
    /// Whether the render ran
    pub rendered: bool,
}

impl FrameReport {
    const SKIPPED: Self = Self {
        updates: 0,
        rendered: false,
    };
}

/// Fixed-step update/render scheduler
#[derive(Debug)]
pub struct FixedStepScheduler {
    config: SchedulerConfig,

    /// Duration of one logic step in milliseconds
    step_ms: f64,

    /// Accumulated time not yet consumed by updates
    accumulator_ms: f64,

    /// Timestamp of the previous frame
    last_frame_ms: f64,

    /// Whether frames are still being scheduled
    running: bool,

    /// Whether the simulation is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<f64>,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f64,
}

impl FixedStepScheduler {
    /// Create a stopped scheduler
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            step_ms: 1000.0 / config.steps_per_second,
            config,
            accumulator_ms: 0.0,
            last_frame_ms: 0.0,
            running: false,
            paused: false,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin scheduling frames, measuring time from `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.last_frame_ms = now_ms;
        self.accumulator_ms = 0.0;
        self.running = true;
        info!(
            "Scheduler started at {:.0} updates/s ({:.3} ms per step)",
            self.config.steps_per_second, self.step_ms
        );
    }

    /// Stop scheduling further frames. A frame already running completes.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!(
                "Scheduler stopped after {} frames, {} updates",
                self.frame_count, self.update_count
            );
        }
    }

    /// Whether the host should schedule another frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one real frame: zero or more fixed updates, then one render.
    ///
    /// Does nothing once the scheduler is stopped.
    pub fn frame<S: FixedStep + ?Sized>(&mut self, now_ms: f64, sim: &mut S) -> FrameReport {
        if !self.running {
            return FrameReport::SKIPPED;
        }

        let delta_ms = (now_ms - self.last_frame_ms).max(0.0);
        self.last_frame_ms = now_ms;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push_back(delta_ms);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        let updates = if self.paused {
            0
        } else {
            self.run_updates(delta_ms, sim)
        };

        sim.render();

        FrameReport {
            updates,
            rendered: true,
        }
    }

    /// Same as [`frame`](Self::frame), reading the time from `clock`
    pub fn frame_with<S: FixedStep + ?Sized>(
        &mut self,
        clock: &impl Clock,
        sim: &mut S,
    ) -> FrameReport {
        self.frame(clock.now_ms(), sim)
    }

    fn run_updates<S: FixedStep + ?Sized>(&mut self, delta_ms: f64, sim: &mut S) -> u32 {
        self.accumulator_ms += delta_ms;

        let mut updates = 0;
        while self.accumulator_ms >= self.step_ms {
            if self
                .config
                .max_steps_per_frame
                .is_some_and(|max| updates >= max)
            {
                let dropped = self.accumulator_ms - self.accumulator_ms % self.step_ms;
                warn!(
                    "Frame owed more than {} updates, dropping {:.1} ms",
                    updates, dropped
                );
                self.accumulator_ms %= self.step_ms;
                break;
            }

            sim.update(self.step_ms as f32);
            self.accumulator_ms -= self.step_ms;
            updates += 1;
        }

        self.update_count += updates as u64;
        updates
    }

    /// Duration of one logic step in milliseconds
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Time carried over to the next frame
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Get the interpolation alpha for smooth rendering between steps
    /// Alpha = accumulated_time / step
    pub fn alpha(&self) -> f64 {
        self.accumulator_ms / self.step_ms
    }

    /// Get current FPS
    pub fn fps(&self) -> f64 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation; frames keep rendering
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("Game paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator_ms = 0.0;
            info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: f64 = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as f64;

        self.current_fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };
    }
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEDULER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Records the order of calls it receives
    #[derive(Default)]
    struct Trace {
        events: Vec<&'static str>,
        steps: Vec<f32>,
    }

    impl FixedStep for Trace {
        fn update(&mut self, step_ms: f32) {
            self.events.push("update");
            self.steps.push(step_ms);
        }

        fn render(&mut self) {
            self.events.push("render");
        }
    }

    fn started(config: SchedulerConfig) -> FixedStepScheduler {
        let mut scheduler = FixedStepScheduler::new(config);
        scheduler.start(0.0);
        scheduler
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler = FixedStepScheduler::default();
        assert_eq!(scheduler.frame_count(), 0);
        assert_eq!(scheduler.update_count(), 0);
        assert!(!scheduler.is_running());
        assert!(!scheduler.is_paused());
        assert_abs_diff_eq!(scheduler.step_ms(), 1000.0 / 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_long_frame_runs_one_update_and_carries_remainder() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();

        let report = scheduler.frame(33.0, &mut trace);

        assert_eq!(report.updates, 1);
        assert!(report.rendered);
        assert_eq!(trace.events, vec!["update", "render"]);
        assert_abs_diff_eq!(scheduler.accumulator_ms(), 33.0 - 1000.0 / 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_remainder_feeds_next_frame() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();

        scheduler.frame(33.0, &mut trace);
        // 16.33 carried + 1 ms = 17.33 >= one step
        let report = scheduler.frame(34.0, &mut trace);
        assert_eq!(report.updates, 1);
        assert_eq!(scheduler.update_count(), 2);
    }

    #[test]
    fn test_short_frame_only_renders() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();

        let report = scheduler.frame(5.0, &mut trace);
        assert_eq!(report.updates, 0);
        assert_eq!(trace.events, vec!["render"]);
    }

    #[test]
    fn test_updates_precede_single_render() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();

        scheduler.frame(55.0, &mut trace);
        assert_eq!(trace.events, vec!["update", "update", "update", "render"]);
        assert!(trace
            .steps
            .iter()
            .all(|&step| (step - 1000.0 / 60.0).abs() < 1e-4));
    }

    #[test]
    fn test_max_steps_limit() {
        let mut scheduler = started(CAPPED_SCHEDULER);
        let mut trace = Trace::default();

        // 300 ms would owe 18 updates
        let report = scheduler.frame(300.0, &mut trace);
        assert_eq!(report.updates, 5);
        assert!(scheduler.accumulator_ms() < scheduler.step_ms());
    }

    #[test]
    fn test_default_runs_every_owed_step() {
        let mut scheduler = started(SchedulerConfig::default());
        let mut trace = Trace::default();

        // 310 ms owes 18 steps with ~10 ms left over
        let report = scheduler.frame(310.0, &mut trace);
        assert_eq!(report.updates, 18);
        assert_abs_diff_eq!(
            scheduler.accumulator_ms(),
            310.0 - 18.0 * 1000.0 / 60.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_stopped_scheduler_does_nothing() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();

        scheduler.stop();
        assert!(!scheduler.is_running());

        let report = scheduler.frame(100.0, &mut trace);
        assert_eq!(report, FrameReport::SKIPPED);
        assert!(trace.events.is_empty());
    }

    #[test]
    fn test_unstarted_scheduler_does_nothing() {
        let mut scheduler = FixedStepScheduler::default();
        let mut trace = Trace::default();
        assert!(!scheduler.frame(100.0, &mut trace).rendered);
    }

    #[test]
    fn test_paused_no_updates() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();
        scheduler.pause();

        let report = scheduler.frame(50.0, &mut trace);
        assert_eq!(report.updates, 0);
        assert_eq!(trace.events, vec!["render"]);
    }

    #[test]
    fn test_toggle_pause() {
        let mut scheduler = FixedStepScheduler::default();
        scheduler.toggle_pause();
        assert!(scheduler.is_paused());

        scheduler.toggle_pause();
        assert!(!scheduler.is_paused());
    }

    #[test]
    fn test_resume_clears_accumulator() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();

        scheduler.frame(10.0, &mut trace);
        assert!(scheduler.accumulator_ms() > 0.0);

        scheduler.pause();
        scheduler.resume();
        assert_eq!(scheduler.accumulator_ms(), 0.0);
    }

    #[test]
    fn test_frame_counting_and_fps() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();

        for frame in 1..=10 {
            scheduler.frame(frame as f64 * 20.0, &mut trace);
        }
        assert_eq!(scheduler.frame_count(), 10);
        assert_abs_diff_eq!(scheduler.fps(), 50.0, epsilon = 1e-6);
    }

    #[test]
    fn test_alpha_range() {
        let mut scheduler = started(DEFAULT_SCHEDULER);
        let mut trace = Trace::default();
        scheduler.frame(25.0, &mut trace);
        let alpha = scheduler.alpha();
        assert!((0.0..1.0).contains(&alpha));
    }

    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let first = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(clock.now_ms() >= first + 1.0);
    }
}
