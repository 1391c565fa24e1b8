/// Frame clock for the fixed-tick simulation
///
/// Wall-clock time accumulates between frames and is paid out as a whole
/// number of fixed ticks. Gameplay constants are expressed per tick, so the
/// simulation never sees a variable delta.
use std::time::{Duration, Instant};

/// Default simulation rate
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame timing state
pub struct FrameClock {
    /// Length of one tick
    tick_duration: Duration,

    /// Accumulated time not yet paid out as ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    /// Create a clock running `tick_rate` ticks per second (at least 1)
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_duration: Duration::from_secs(1) / tick_rate.max(1),
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of wall-clock time and return the ticks due
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.tick_duration && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_duration;
            ticks += 1;
        }

        // Time beyond the cap is dropped so a long stall does not snowball
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= self.tick_duration {
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Length of one tick
    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
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

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::default();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.tick_count(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.tick_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_whole_ticks_accumulate() {
        let mut clock = FrameClock::new(60);
        let tick = clock.tick_duration();

        assert_eq!(clock.advance(tick / 2), 0);
        assert_eq!(clock.advance(tick / 2), 1);
        assert_eq!(clock.advance(tick * 3), 3);
        assert_eq!(clock.tick_count(), 4);
    }

    #[test]
    fn test_ticks_capped_and_backlog_dropped() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.advance(Duration::from_millis(300)), MAX_TICKS_PER_FRAME);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut clock = FrameClock::new(60);
        clock.pause();
        assert_eq!(clock.advance(Duration::from_millis(50)), 0);
        assert_eq!(clock.frame_count(), 1);

        clock.resume();
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = FrameClock::default();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_zero_tick_rate_clamped() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.tick_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = FrameClock::new(60);
        for _ in 0..20 {
            clock.advance(Duration::from_millis(20));
        }
        assert!((clock.fps() - 50.0).abs() < 0.5);
    }
}
