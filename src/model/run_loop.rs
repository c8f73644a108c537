use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::info;

/// Shared stop switch for a [`RunLoop`]. Clones all refer to the same switch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Hands out one timestamp per frame until cancelled.
///
/// Timestamps are milliseconds since the first frame, so the first frame is always at 0.
pub struct RunLoop {
    token: CancelToken,
    started: Option<Instant>,
    frames: u64,
    frame_limit: Option<u64>,
}

impl RunLoop {
    pub fn new(token: CancelToken) -> Self {
        RunLoop {
            token,
            started: None,
            frames: 0,
            frame_limit: None,
        }
    }

    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn next_frame(&mut self) -> Option<f64> {
        if let Some(limit) = self.frame_limit {
            if self.frames >= limit && !self.token.is_cancelled() {
                info!("Reached frame limit of {}", limit);
                self.token.cancel();
            }
        }
        if self.token.is_cancelled() {
            return None;
        }

        self.frames += 1;
        let started = *self.started.get_or_insert_with(Instant::now);
        Some(started.elapsed().as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_at_zero() {
        let mut run_loop = RunLoop::new(CancelToken::new());
        let first = run_loop.next_frame().unwrap();
        assert!(first < 1.0);
    }

    #[test]
    fn test_time_is_monotonic() {
        let mut run_loop = RunLoop::new(CancelToken::new());
        let mut last = run_loop.next_frame().unwrap();
        for _ in 0..100 {
            let time = run_loop.next_frame().unwrap();
            assert!(time >= last);
            last = time;
        }
        assert_eq!(run_loop.frames(), 101);
    }

    #[test]
    fn test_cancel_stops_loop() {
        let token = CancelToken::new();
        let mut run_loop = RunLoop::new(token.clone());
        assert!(run_loop.next_frame().is_some());

        token.cancel();
        assert_eq!(run_loop.next_frame(), None);
        assert_eq!(run_loop.next_frame(), None);
        assert_eq!(run_loop.frames(), 1);
    }

    #[test]
    fn test_frame_limit() {
        let mut run_loop = RunLoop::new(CancelToken::new()).with_frame_limit(Some(3));
        let mut count = 0;
        while run_loop.next_frame().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
        assert!(run_loop.token().is_cancelled());
    }
}
