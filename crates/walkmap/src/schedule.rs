//! Timed rendering of walk segments.
//!
//! Every segment is due the same fixed delay after rendering starts, so
//! the whole drawing appears at once after a pause. The schedule is an
//! explicit task list drained by one loop, which can be stopped between
//! tasks through a cancel channel.
//!
//! ## Rust Lesson #26: Channels as Cancellation
//!
//! `std::sync::mpsc` channels are Rust's built-in message queues. Waiting
//! with `recv_timeout` doubles as a sleep that wakes up early when someone
//! sends a message, which makes it a cheap way to interrupt a timer.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{Level, event};

use crate::surface::Surface;
use crate::walk::Segment;

/// Pause before segments are drawn.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// One segment waiting to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTask {
    /// Offset from the start of rendering
    pub due: Duration,
    pub segment: Segment,
}

/// Turns segment lists into schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    delay: Duration,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Scheduler {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Give every segment the same due time, keeping walk order.
    pub fn schedule<I>(&self, segments: I) -> Schedule
    where
        I: IntoIterator<Item = Segment>,
    {
        let tasks = segments
            .into_iter()
            .map(|segment| DrawTask { due: self.delay, segment })
            .collect();
        Schedule { tasks }
    }
}

/// What a schedule run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Segments appended to the surface
    pub drawn: usize,
    /// Segments that fired but were filtered out
    pub dropped: usize,
    /// Segments that never fired because the run was cancelled
    pub pending: usize,
    pub cancelled: bool,
}

/// Draw tasks in the order they will fire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    tasks: Vec<DrawTask>,
}

impl Schedule {
    pub fn tasks(&self) -> &[DrawTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fire every task on `surface`, stopping early if `cancel` receives a
    /// message.
    ///
    /// A disconnected `cancel` channel just means nobody can cancel.
    pub fn run<S: Surface + ?Sized>(self, surface: &mut S, cancel: &Receiver<()>) -> RenderSummary {
        self.drain(surface, Some(cancel))
    }

    /// Fire every task with no way to cancel.
    pub fn run_to_end<S: Surface + ?Sized>(self, surface: &mut S) -> RenderSummary {
        self.drain(surface, None)
    }

    fn drain<S: Surface + ?Sized>(self, surface: &mut S, cancel: Option<&Receiver<()>>) -> RenderSummary {
        let start = Instant::now();
        let total = self.tasks.len();
        let mut summary = RenderSummary::default();

        for (fired, task) in self.tasks.into_iter().enumerate() {
            if wait_until(start + task.due, cancel) {
                summary.cancelled = true;
                summary.pending = total - fired;
                break;
            }

            let segment = task.segment;
            if segment.is_drawable() {
                surface.append_line(segment.line(), segment.stroke);
                summary.drawn += 1;
            } else {
                summary.dropped += 1;
            }
        }

        if summary.cancelled {
            event!(
                Level::INFO,
                "Rendering cancelled with [{}] segments pending",
                summary.pending
            );
        }
        event!(
            Level::DEBUG,
            "Rendered [{}] segments, dropped [{}]",
            summary.drawn,
            summary.dropped
        );

        summary
    }
}

/// Block until `deadline`. Returns true if cancelled first.
fn wait_until(deadline: Instant, cancel: Option<&Receiver<()>>) -> bool {
    let remaining = deadline.saturating_duration_since(Instant::now());

    match cancel {
        Some(rx) => match rx.recv_timeout(remaining) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(deadline.saturating_duration_since(Instant::now()));
                false
            }
        },
        None => {
            thread::sleep(remaining);
            false
        }
    }
}

/// Draw `segments` onto `surface` after [`DEFAULT_DELAY`].
///
/// Only seeds and steps that stayed inside their polygon are drawn.
pub fn render<S: Surface + ?Sized>(segments: &[Segment], surface: &mut S) {
    Scheduler::default()
        .schedule(segments.iter().copied())
        .run_to_end(surface);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Line, Point};
    use std::sync::mpsc;

    fn mixed_segments() -> Vec<Segment> {
        let stroke = "#109618";
        let p = |x: f64| Point::new(x, 0.0);
        vec![
            Segment::seed_at(p(0.0), stroke),
            Segment::step(p(0.0), p(1.0), true, stroke),
            Segment::step(p(1.0), p(2.0), false, stroke),
            Segment::step(p(2.0), p(1.0), true, stroke),
            Segment::step(p(1.0), p(2.0), false, stroke),
            Segment::step(p(2.0), p(3.0), false, stroke),
            Segment::step(p(3.0), p(2.0), true, stroke),
        ]
    }

    #[test]
    fn all_tasks_share_one_delay() {
        let scheduler = Scheduler::new(Duration::from_millis(250));
        let schedule = scheduler.schedule(mixed_segments());
        assert_eq!(schedule.len(), 7);
        assert!(schedule.tasks().iter().all(|t| t.due == Duration::from_millis(250)));
        assert_eq!(schedule.tasks()[2].segment, mixed_segments()[2]);
    }

    #[test]
    fn only_inside_and_seed_segments_are_drawn() {
        let segments = mixed_segments();
        let expected = segments.iter().filter(|s| s.inside || s.seed).count();

        let mut surface: Vec<(Line, String)> = Vec::new();
        let summary = Scheduler::new(Duration::ZERO)
            .schedule(segments.clone())
            .run_to_end(&mut surface);

        assert_eq!(surface.len(), expected);
        assert_eq!(summary.drawn, 4);
        assert_eq!(summary.dropped, 3);
        assert!(!summary.cancelled);
        assert_eq!(surface[0].0, Line::new(0.0, 0.0, 0.0, 0.0));
        assert!(surface.iter().all(|(_, stroke)| stroke == "#109618"));
    }

    #[test]
    fn seeds_are_drawn_even_when_outside() {
        let mut seed = Segment::seed_at(Point::new(4.0, 4.0), "#990099");
        seed.inside = false;

        let mut surface: Vec<(Line, String)> = Vec::new();
        Scheduler::new(Duration::ZERO).schedule([seed]).run_to_end(&mut surface);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn render_waits_for_the_delay() {
        let started = Instant::now();
        let mut surface: Vec<(Line, String)> = Vec::new();
        render(&mixed_segments(), &mut surface);

        assert!(started.elapsed() >= DEFAULT_DELAY);
        assert_eq!(surface.len(), 4);
    }

    #[test]
    fn cancel_before_start_draws_nothing() {
        let (tx, rx) = mpsc::channel();
        tx.send(()).unwrap();

        let mut surface: Vec<(Line, String)> = Vec::new();
        let summary = Scheduler::new(Duration::ZERO)
            .schedule(mixed_segments())
            .run(&mut surface, &rx);

        assert!(summary.cancelled);
        assert_eq!(summary.pending, 7);
        assert!(surface.is_empty());
    }

    #[test]
    fn cancel_interrupts_the_wait() {
        let (tx, rx) = mpsc::channel();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            let _ = tx.send(());
        });

        let started = Instant::now();
        let mut surface: Vec<(Line, String)> = Vec::new();
        let summary = Scheduler::new(Duration::from_secs(30))
            .schedule(mixed_segments())
            .run(&mut surface, &rx);
        canceller.join().unwrap();

        assert!(summary.cancelled);
        assert!(started.elapsed() < Duration::from_secs(30));
        assert!(surface.is_empty());
    }

    #[test]
    fn dropped_sender_means_no_cancel() {
        let (tx, rx) = mpsc::channel::<()>();
        drop(tx);

        let mut surface: Vec<(Line, String)> = Vec::new();
        let summary = Scheduler::new(Duration::from_millis(5))
            .schedule(mixed_segments())
            .run(&mut surface, &rx);

        assert!(!summary.cancelled);
        assert_eq!(summary.drawn, 4);
    }
}
