// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Splash carousel
//
// The splash page advances its slide on a fixed interval. The timer runs
// as a tokio task owned by a handle; dropping the handle stops it.

use async_channel::Receiver;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Position within a fixed number of slides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideCursor {
    index: usize,
    len: usize,
}

impl SlideCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move to the next slide, wrapping to the first, and return the new index
    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Jump to a slide; out-of-range indices clamp to the last slide
    pub fn select(&mut self, index: usize) -> usize {
        self.index = index.min(self.len.saturating_sub(1));
        self.index
    }
}

/// Handle to a running carousel timer
pub struct CarouselTimer {
    task: JoinHandle<()>,
}

impl CarouselTimer {
    /// Start ticking every `interval`. Each tick sends the new slide index.
    ///
    /// Must be called inside a tokio runtime. The first tick arrives one
    /// full interval after start.
    pub fn start(interval: Duration, slide_count: usize) -> (Self, Receiver<usize>) {
        Self::start_from(interval, slide_count, 0)
    }

    /// Like `start`, but the first tick advances from `current` instead of
    /// the first slide
    pub fn start_from(
        interval: Duration,
        slide_count: usize,
        current: usize,
    ) -> (Self, Receiver<usize>) {
        let (tx, rx) = async_channel::bounded(1);
        let interval = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            if slide_count == 0 {
                return;
            }

            let mut cursor = SlideCursor::new(slide_count);
            cursor.select(current);
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let index = cursor.advance();
                if tx.send(index).await.is_err() {
                    tracing::debug!("Carousel receiver dropped, stopping timer");
                    break;
                }
            }
        });

        (Self { task }, rx)
    }

    /// Stop the timer. No further indices are sent.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for CarouselTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = SlideCursor::new(3);
        assert_eq!(cursor.advance(), 1);
        assert_eq!(cursor.advance(), 2);
        assert_eq!(cursor.advance(), 0);
    }

    #[test]
    fn test_cursor_select_clamps() {
        let mut cursor = SlideCursor::new(3);
        assert_eq!(cursor.select(7), 2);

        let mut empty = SlideCursor::new(0);
        assert_eq!(empty.advance(), 0);
        assert_eq!(empty.select(4), 0);
        assert!(empty.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_advances_slides() {
        let (timer, rx) = CarouselTimer::start(Duration::from_millis(3000), 3);
        assert!(timer.is_running());

        let start = Instant::now();
        assert_eq!(rx.recv().await.unwrap(), 1);
        assert!(start.elapsed() >= Duration::from_millis(3000));
        assert_eq!(rx.recv().await.unwrap(), 2);
        assert_eq!(rx.recv().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_from_resumes_position() {
        let (_timer, rx) = CarouselTimer::start_from(Duration::from_millis(100), 3, 1);
        assert_eq!(rx.recv().await.unwrap(), 2);
        assert_eq!(rx.recv().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_closes_channel() {
        let (timer, rx) = CarouselTimer::start(Duration::from_millis(100), 3);
        assert_eq!(rx.recv().await.unwrap(), 1);

        timer.cancel();
        assert!(rx.recv().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let (timer, rx) = CarouselTimer::start(Duration::from_millis(100), 2);
        drop(timer);
        assert!(rx.recv().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ends_when_receiver_dropped() {
        let interval = Duration::from_millis(100);
        let (timer, rx) = CarouselTimer::start(interval, 3);
        drop(rx);

        tokio::time::sleep(interval * 2).await;
        tokio::task::yield_now().await;
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_carousel_never_ticks() {
        let (_timer, rx) = CarouselTimer::start(Duration::from_millis(100), 0);
        assert!(rx.recv().await.is_err());
    }
}
