use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use crate::systems::FrameReport;

/// Rolling window over recent frames: wall-clock frame rate, time spent in
/// the simulation barrier, and respawn counts.
pub struct FrameStats {
    frame_times: VecDeque<Duration>,
    compute_times: VecDeque<Duration>,
    last_frame_time: Instant,
    max_frames: usize,
    total_frames: u64,
    total_respawned: u64,
}

impl FrameStats {
    pub fn new(max_frames: usize) -> Self {
        let max_frames = max_frames.max(1);
        FrameStats {
            frame_times: VecDeque::with_capacity(max_frames),
            compute_times: VecDeque::with_capacity(max_frames),
            last_frame_time: Instant::now(),
            max_frames,
            total_frames: 0,
            total_respawned: 0,
        }
    }

    pub fn record(&mut self, report: &FrameReport) {
        let now = Instant::now();
        self.push(now - self.last_frame_time, report);
        self.last_frame_time = now;
    }

    fn push(&mut self, frame_time: Duration, report: &FrameReport) {
        self.frame_times.push_back(frame_time);
        self.compute_times.push_back(report.elapsed);
        if self.frame_times.len() > self.max_frames {
            self.frame_times.pop_front();
            self.compute_times.pop_front();
        }
        self.total_frames += 1;
        self.total_respawned += report.respawned as u64;
    }

    pub fn fps(&self) -> f32 {
        match average(&self.frame_times) {
            Some(average) if !average.is_zero() => 1.0 / average.as_secs_f32(),
            _ => 0.0,
        }
    }

    /// Mean time from dispatch to barrier over the window.
    pub fn average_compute(&self) -> Duration {
        average(&self.compute_times).unwrap_or_default()
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn total_respawned(&self) -> u64 {
        self.total_respawned
    }
}

fn average(times: &VecDeque<Duration>) -> Option<Duration> {
    if times.is_empty() {
        return None;
    }
    let total: Duration = times.iter().sum();
    Some(total / times.len() as u32)
}
