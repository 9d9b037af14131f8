//! Background visualization mirror.
//!
//! Mirrors simulator body poses into a visualization sink at a fixed
//! cadence on its own thread, without ever blocking the trial loop. The
//! loop pauses the mirror around mutation-sensitive windows (object
//! insertion/removal, pose resets) so the sink never observes a torn
//! intermediate state.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use placement_types::RigidPose;
use tracing::debug;

use crate::body::BodyId;

/// Snapshot source the mirror polls. Implemented over the simulator's
/// read-only state view.
pub trait PoseSource: Send {
    /// Current poses of the bodies worth visualizing.
    fn body_poses(&self) -> Vec<(BodyId, RigidPose)>;
}

/// Destination for mirrored state (a remote viewer, a recording, ...).
pub trait VisualizationSink: Send {
    /// Publishes one snapshot.
    fn publish(&mut self, poses: &[(BodyId, RigidPose)]);
}

#[derive(Debug)]
struct MirrorFlags {
    paused: bool,
    stopped: bool,
}

#[derive(Debug)]
struct MirrorShared {
    flags: Mutex<MirrorFlags>,
    signal: Condvar,
}

/// Handle to the mirror thread.
///
/// Dropping the handle stops the thread and joins it.
#[derive(Debug)]
pub struct StateMirror {
    shared: Arc<MirrorShared>,
    handle: Option<JoinHandle<()>>,
}

impl StateMirror {
    /// Spawns the mirror thread, publishing every `period`.
    ///
    /// The mirror starts running; call [`StateMirror::pause`] before the
    /// first mutation-sensitive window.
    pub fn spawn<S, V>(source: S, mut sink: V, period: Duration) -> Self
    where
        S: PoseSource + 'static,
        V: VisualizationSink + 'static,
    {
        let shared = Arc::new(MirrorShared {
            flags: Mutex::new(MirrorFlags {
                paused: false,
                stopped: false,
            }),
            signal: Condvar::new(),
        });
        let thread_shared = Arc::clone(&shared);
        let handle = std::thread::spawn(move || {
            loop {
                {
                    let mut flags = lock_flags(&thread_shared.flags);
                    while flags.paused && !flags.stopped {
                        flags = thread_shared
                            .signal
                            .wait(flags)
                            .unwrap_or_else(PoisonError::into_inner);
                    }
                    if flags.stopped {
                        break;
                    }
                }
                sink.publish(&source.body_poses());
                // Sleep on the condvar so stop/pause interrupts the wait.
                let flags = lock_flags(&thread_shared.flags);
                let (flags, _timeout) = thread_shared
                    .signal
                    .wait_timeout(flags, period)
                    .unwrap_or_else(PoisonError::into_inner);
                if flags.stopped {
                    break;
                }
            }
            debug!("visualization mirror stopped");
        });
        Self {
            shared,
            handle: Some(handle),
        }
    }

    /// Pauses publishing until [`StateMirror::resume`].
    pub fn pause(&self) {
        let mut flags = lock_flags(&self.shared.flags);
        flags.paused = true;
        self.shared.signal.notify_all();
    }

    /// Resumes publishing.
    pub fn resume(&self) {
        let mut flags = lock_flags(&self.shared.flags);
        flags.paused = false;
        self.shared.signal.notify_all();
    }

    /// Pauses for the lifetime of the returned guard.
    #[must_use]
    pub fn pause_scope(&self) -> PauseGuard<'_> {
        self.pause();
        PauseGuard { mirror: self }
    }
}

impl Drop for StateMirror {
    fn drop(&mut self) {
        {
            let mut flags = lock_flags(&self.shared.flags);
            flags.stopped = true;
            self.shared.signal.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Keeps the mirror paused while alive; resumes on drop.
#[derive(Debug)]
pub struct PauseGuard<'a> {
    mirror: &'a StateMirror,
}

impl Drop for PauseGuard<'_> {
    fn drop(&mut self) {
        self.mirror.resume();
    }
}

fn lock_flags(mutex: &Mutex<MirrorFlags>) -> std::sync::MutexGuard<'_, MirrorFlags> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource;

    impl PoseSource for FixedSource {
        fn body_poses(&self) -> Vec<(BodyId, RigidPose)> {
            vec![(BodyId::new(1), RigidPose::identity())]
        }
    }

    struct CountingSink {
        count: Arc<AtomicUsize>,
    }

    impl VisualizationSink for CountingSink {
        fn publish(&mut self, poses: &[(BodyId, RigidPose)]) {
            assert_eq!(poses.len(), 1);
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_mirror_publishes_at_cadence() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = CountingSink {
            count: Arc::clone(&count),
        };
        let mirror = StateMirror::spawn(FixedSource, sink, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(80));
        drop(mirror);
        assert!(count.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_pause_blocks_publishing() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = CountingSink {
            count: Arc::clone(&count),
        };
        let mirror = StateMirror::spawn(FixedSource, sink, Duration::from_millis(1));

        mirror.pause();
        // Drain any in-flight iteration, then the count must hold still.
        std::thread::sleep(Duration::from_millis(50));
        let frozen = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(80));
        assert_eq!(count.load(Ordering::SeqCst), frozen);

        mirror.resume();
        std::thread::sleep(Duration::from_millis(50));
        assert!(count.load(Ordering::SeqCst) > frozen);
    }

    #[test]
    fn test_pause_scope_resumes_on_drop() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = CountingSink {
            count: Arc::clone(&count),
        };
        let mirror = StateMirror::spawn(FixedSource, sink, Duration::from_millis(1));
        {
            let _guard = mirror.pause_scope();
            std::thread::sleep(Duration::from_millis(30));
        }
        std::thread::sleep(Duration::from_millis(50));
        let after_resume = count.load(Ordering::SeqCst);
        assert!(after_resume > 0);
    }

    #[test]
    fn test_drop_stops_promptly() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = CountingSink {
            count: Arc::clone(&count),
        };
        let mirror = StateMirror::spawn(FixedSource, sink, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(20));
        drop(mirror); // joins; must not hang
    }
}
