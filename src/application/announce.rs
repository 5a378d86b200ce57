//! Announcement playback use case
//!
//! Fetches speech audio for a text and plays it until the decoder runs dry
//! or the playback deadline elapses. The playback handle is owned by a
//! guard that stops it on every exit path.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::timing::Duration;

use super::ports::{
    Announcer, AudioOutput, Clock, Playback, PlaybackOutcome, SpeechError, SpeechSynthesizer,
};

/// Pause between decoder polls
pub const DEFAULT_POLL_INTERVAL: StdDuration = StdDuration::from_millis(10);

/// Stops the wrapped playback when dropped
struct PlaybackGuard {
    handle: Box<dyn Playback>,
}

impl PlaybackGuard {
    fn new(handle: Box<dyn Playback>) -> Self {
        Self { handle }
    }

    fn is_running(&self) -> bool {
        self.handle.is_running()
    }
}

impl Drop for PlaybackGuard {
    fn drop(&mut self) {
        self.handle.stop();
    }
}

/// Poll a playback until it finishes or `deadline` has elapsed since `started`.
pub fn play_until_done<C>(
    handle: Box<dyn Playback>,
    clock: &C,
    started: u64,
    deadline: Duration,
    poll_interval: StdDuration,
) -> PlaybackOutcome
where
    C: Clock + ?Sized,
{
    let guard = PlaybackGuard::new(handle);

    loop {
        if !guard.is_running() {
            debug!("Announcement playback finished");
            return PlaybackOutcome::Finished;
        }
        let elapsed = clock.now_ms().saturating_sub(started);
        if elapsed > deadline.as_millis() {
            warn!(elapsed_ms = elapsed, "Announcement playback timeout reached");
            return PlaybackOutcome::TimedOut;
        }
        if !poll_interval.is_zero() {
            std::thread::sleep(poll_interval);
        }
    }
}

/// Speaks texts through a speech service and a local audio output
pub struct AnnouncementPlayer<S, O, C>
where
    S: SpeechSynthesizer,
    O: AudioOutput,
    C: Clock,
{
    synthesizer: S,
    output: Arc<O>,
    clock: Arc<C>,
    deadline: Duration,
    poll_interval: StdDuration,
}

impl<S, O, C> AnnouncementPlayer<S, O, C>
where
    S: SpeechSynthesizer,
    O: AudioOutput,
    C: Clock,
{
    pub fn new(synthesizer: S, output: O, clock: C, deadline: Duration) -> Self {
        Self {
            synthesizer,
            output: Arc::new(output),
            clock: Arc::new(clock),
            deadline,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: StdDuration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[async_trait]
impl<S, O, C> Announcer for AnnouncementPlayer<S, O, C>
where
    S: SpeechSynthesizer,
    O: AudioOutput + 'static,
    C: Clock + 'static,
{
    async fn announce(&self, text: &str) -> Result<PlaybackOutcome, SpeechError> {
        // The deadline covers fetching the audio as well as playing it
        let started = self.clock.now_ms();
        let fetch = self.synthesizer.synthesize(text);
        let audio = match tokio::time::timeout(self.deadline.as_std(), fetch).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Announcement audio not fetched before playback timeout");
                return Ok(PlaybackOutcome::TimedOut);
            }
        };
        debug!(bytes = audio.len(), "Fetched announcement audio");

        let elapsed = self.clock.now_ms().saturating_sub(started);
        if elapsed > self.deadline.as_millis() {
            warn!(elapsed_ms = elapsed, "Announcement playback timeout reached");
            return Ok(PlaybackOutcome::TimedOut);
        }

        let output = Arc::clone(&self.output);
        let clock = Arc::clone(&self.clock);
        let deadline = self.deadline;
        let poll_interval = self.poll_interval;

        // The decoder and device handle stay on the blocking thread
        tokio::task::spawn_blocking(move || {
            let handle = output.start(audio)?;
            Ok(play_until_done(
                handle,
                &*clock,
                started,
                deadline,
                poll_interval,
            ))
        })
        .await
        .map_err(|e| SpeechError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::infrastructure::ManualClock;

    struct FakePlayback {
        remaining_polls: Cell<u32>,
        clock: Arc<ManualClock>,
        tick_ms: u64,
        stopped: Arc<AtomicBool>,
    }

    impl Playback for FakePlayback {
        fn is_running(&self) -> bool {
            self.clock.advance(self.tick_ms);
            let remaining = self.remaining_polls.get();
            if remaining == 0 {
                return false;
            }
            self.remaining_polls.set(remaining - 1);
            true
        }

        fn stop(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
    }

    struct FakeOutput {
        polls: u32,
        clock: Arc<ManualClock>,
        tick_ms: u64,
        stopped: Arc<AtomicBool>,
        started: AtomicUsize,
        received: Mutex<Vec<u8>>,
        unavailable: bool,
    }

    impl FakeOutput {
        fn new(polls: u32, clock: Arc<ManualClock>, tick_ms: u64) -> Self {
            Self {
                polls,
                clock,
                tick_ms,
                stopped: Arc::new(AtomicBool::new(false)),
                started: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
                unavailable: false,
            }
        }
    }

    impl AudioOutput for FakeOutput {
        fn start(&self, audio: Vec<u8>) -> Result<Box<dyn Playback>, SpeechError> {
            if self.unavailable {
                return Err(SpeechError::DeviceNotAvailable("no sound card".to_string()));
            }
            self.started.fetch_add(1, Ordering::SeqCst);
            *self.received.lock().unwrap() = audio;
            Ok(Box::new(FakePlayback {
                remaining_polls: Cell::new(self.polls),
                clock: Arc::clone(&self.clock),
                tick_ms: self.tick_ms,
                stopped: Arc::clone(&self.stopped),
            }))
        }
    }

    impl AudioOutput for Arc<FakeOutput> {
        fn start(&self, audio: Vec<u8>) -> Result<Box<dyn Playback>, SpeechError> {
            (**self).start(audio)
        }
    }

    struct FakeSynthesizer {
        fail: bool,
        clock: Arc<ManualClock>,
        fetch_ms: u64,
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSynthesizer {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
            self.clock.advance(self.fetch_ms);
            if self.fail {
                return Err(SpeechError::HttpStatus(503));
            }
            Ok(text.as_bytes().to_vec())
        }
    }

    fn player(
        fail: bool,
        output: Arc<FakeOutput>,
        clock: Arc<ManualClock>,
    ) -> AnnouncementPlayer<FakeSynthesizer, Arc<FakeOutput>, Arc<ManualClock>> {
        slow_player(fail, 0, output, clock)
    }

    fn slow_player(
        fail: bool,
        fetch_ms: u64,
        output: Arc<FakeOutput>,
        clock: Arc<ManualClock>,
    ) -> AnnouncementPlayer<FakeSynthesizer, Arc<FakeOutput>, Arc<ManualClock>> {
        AnnouncementPlayer::new(
            FakeSynthesizer {
                fail,
                clock: Arc::clone(&clock),
                fetch_ms,
            },
            output,
            clock,
            Duration::from_secs(30),
        )
        .with_poll_interval(StdDuration::ZERO)
    }

    #[tokio::test]
    async fn short_announcement_finishes_and_releases() {
        let clock = Arc::new(ManualClock::new());
        let output = Arc::new(FakeOutput::new(5, Arc::clone(&clock), 100));
        let player = player(false, Arc::clone(&output), Arc::clone(&clock));

        let outcome = player.announce("Milk was put into the fridge").await.unwrap();

        assert_eq!(outcome, PlaybackOutcome::Finished);
        assert!(output.stopped.load(Ordering::SeqCst));
        assert_eq!(
            output.received.lock().unwrap().as_slice(),
            b"Milk was put into the fridge"
        );
    }

    #[tokio::test]
    async fn endless_announcement_is_cut_at_deadline() {
        let clock = Arc::new(ManualClock::new());
        let output = Arc::new(FakeOutput::new(u32::MAX, Arc::clone(&clock), 1000));
        let player = player(false, Arc::clone(&output), Arc::clone(&clock));

        let outcome = player.announce("hello").await.unwrap();

        assert_eq!(outcome, PlaybackOutcome::TimedOut);
        assert!(clock.now_ms() > 30_000);
        assert!(output.stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn slow_fetch_shortens_playback() {
        let clock = Arc::new(ManualClock::new());
        let output = Arc::new(FakeOutput::new(u32::MAX, Arc::clone(&clock), 1000));
        let player = slow_player(false, 25_000, Arc::clone(&output), Arc::clone(&clock));

        let outcome = player.announce("hello").await.unwrap();

        assert_eq!(outcome, PlaybackOutcome::TimedOut);
        assert_eq!(output.started.load(Ordering::SeqCst), 1);
        assert!(clock.now_ms() <= 31_000);
        assert!(output.stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn fetch_past_deadline_skips_playback() {
        let clock = Arc::new(ManualClock::new());
        let output = Arc::new(FakeOutput::new(1, Arc::clone(&clock), 1));
        let player = slow_player(false, 31_000, Arc::clone(&output), Arc::clone(&clock));

        let outcome = player.announce("hello").await.unwrap();

        assert_eq!(outcome, PlaybackOutcome::TimedOut);
        assert_eq!(output.started.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn synthesis_failure_skips_playback() {
        let clock = Arc::new(ManualClock::new());
        let output = Arc::new(FakeOutput::new(1, Arc::clone(&clock), 1));
        let player = player(true, Arc::clone(&output), Arc::clone(&clock));

        let err = player.announce("hello").await.unwrap_err();

        assert!(matches!(err, SpeechError::HttpStatus(503)));
        assert_eq!(output.started.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_device_is_reported() {
        let clock = Arc::new(ManualClock::new());
        let mut output = FakeOutput::new(1, Arc::clone(&clock), 1);
        output.unavailable = true;
        let player = player(false, Arc::new(output), Arc::clone(&clock));

        let err = player.announce("hello").await.unwrap_err();
        assert!(matches!(err, SpeechError::DeviceNotAvailable(_)));
    }

    #[test]
    fn guard_stops_playback_that_already_finished() {
        let clock = ManualClock::new();
        let stopped = Arc::new(AtomicBool::new(false));
        let handle = Box::new(FakePlayback {
            remaining_polls: Cell::new(0),
            clock: Arc::new(ManualClock::new()),
            tick_ms: 0,
            stopped: Arc::clone(&stopped),
        });

        let outcome =
            play_until_done(handle, &clock, 0, Duration::from_secs(1), StdDuration::ZERO);

        assert_eq!(outcome, PlaybackOutcome::Finished);
        assert!(stopped.load(Ordering::SeqCst));
    }
}
