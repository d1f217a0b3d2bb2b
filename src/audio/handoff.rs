//! Latest-value handoff of spectrum frames from the audio thread to the UI.
//!
//! A single shared slot: every publish overwrites whatever the UI has not
//! picked up yet, so a stalled UI resumes on the newest frame.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use log::warn;

use crate::spectrum::SILENCE_DB;

type Slot = Mutex<Option<Vec<f32>>>;

/// Counters shared by both ends of the handoff
#[derive(Debug, Default)]
pub struct HandoffStats {
    published: AtomicU64,
    overwritten: AtomicU64,
    dropped: AtomicU64,
}

impl HandoffStats {
    /// Frames stored in the slot
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Published frames replaced by a newer one before the UI read them
    pub fn overwritten(&self) -> u64 {
        self.overwritten.load(Ordering::Relaxed)
    }

    /// Frames discarded because the UI was holding the slot
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Audio-thread end. Publishing never blocks.
pub struct FrameSender {
    slot: Arc<Slot>,
    stats: Arc<HandoffStats>,
}

impl FrameSender {
    /// Offer a frame to the UI, replacing any unread one. Returns `false`
    /// only if the UI was reading the slot at that instant.
    pub fn publish(&self, frame: Vec<f32>) -> bool {
        let mut slot = match self.slot.try_lock() {
            Ok(guard) => guard,
            // A panic elsewhere cannot leave an Option half-written
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
        };

        if slot.replace(frame).is_some() {
            self.stats.overwritten.fetch_add(1, Ordering::Relaxed);
        }
        self.stats.published.fetch_add(1, Ordering::Relaxed);
        true
    }
}

/// UI-thread end holding the most recent frame
pub struct LatestFrame {
    slot: Arc<Slot>,
    current: Vec<f32>,
    stats: Arc<HandoffStats>,
    connected: bool,
}

impl LatestFrame {
    fn lock_slot(&self) -> MutexGuard<'_, Option<Vec<f32>>> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Take the newest unread frame, if any.
    ///
    /// Returns `true` if a new frame arrived since the last call.
    pub fn refresh(&mut self) -> bool {
        let fresh = self.lock_slot().take();
        let updated = match fresh {
            Some(frame) => {
                self.current = frame;
                true
            }
            None => false,
        };

        // Only this end left: the capture stream is gone
        if self.connected && Arc::strong_count(&self.slot) == 1 {
            warn!("Audio capture stopped; keeping last spectrum frame");
            self.connected = false;
        }
        updated
    }

    /// Current frame (silence until the first block arrives)
    pub fn frame(&self) -> &[f32] {
        &self.current
    }

    pub fn stats(&self) -> &HandoffStats {
        &self.stats
    }

    /// Whether a sender still exists
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Create a handoff for frames of `bins` values
pub fn frame_slot(bins: usize) -> (FrameSender, LatestFrame) {
    let slot = Arc::new(Mutex::new(None));
    let stats = Arc::new(HandoffStats::default());

    (
        FrameSender {
            slot: Arc::clone(&slot),
            stats: Arc::clone(&stats),
        },
        LatestFrame {
            slot,
            current: vec![SILENCE_DB; bins],
            stats,
            connected: true,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_with_silence() {
        let (_tx, latest) = frame_slot(8);
        assert_eq!(latest.frame(), &[SILENCE_DB; 8]);
        assert!(latest.is_connected());
    }

    #[test]
    fn test_reader_sees_newest_frame() {
        let (tx, mut latest) = frame_slot(2);

        assert!(tx.publish(vec![1.0, 1.0]));
        assert!(tx.publish(vec![2.0, 2.0]));
        assert!(tx.publish(vec![3.0, 3.0]));

        assert!(latest.refresh());
        assert_eq!(latest.frame(), &[3.0, 3.0]);

        // Nothing new: frame is kept
        assert!(!latest.refresh());
        assert_eq!(latest.frame(), &[3.0, 3.0]);
        assert_eq!(latest.stats().published(), 3);
        assert_eq!(latest.stats().overwritten(), 2);
    }

    #[test]
    fn test_stalled_reader_resumes_on_newest_frame() {
        let (tx, mut latest) = frame_slot(1);

        for i in 0..=9 {
            assert!(tx.publish(vec![i as f32]));
        }

        assert!(latest.refresh());
        assert_eq!(latest.frame(), &[9.0]);
        assert_eq!(latest.stats().dropped(), 0);
    }

    #[test]
    fn test_publish_while_reader_holds_slot_drops_without_blocking() {
        let (tx, latest) = frame_slot(1);

        let guard = latest.lock_slot();
        assert!(!tx.publish(vec![1.0]));
        drop(guard);

        assert_eq!(latest.stats().dropped(), 1);
        assert!(tx.publish(vec![2.0]));
    }

    #[test]
    fn test_disconnect_keeps_stale_frame() {
        let (tx, mut latest) = frame_slot(1);
        tx.publish(vec![-42.0]);
        drop(tx);

        assert!(latest.refresh());
        assert!(!latest.is_connected());
        assert_eq!(latest.frame(), &[-42.0]);
        assert!(!latest.refresh());
    }

    #[test]
    fn test_publish_from_another_thread() {
        let (tx, mut latest) = frame_slot(1);

        let producer = thread::spawn(move || {
            for i in 0..100 {
                tx.publish(vec![i as f32]);
            }
        });
        producer.join().expect("producer thread panicked");

        assert!(latest.refresh());
        let stats = latest.stats();
        assert_eq!(stats.published() + stats.dropped(), 100);
        // Reader idle while producing: nothing contended, newest wins
        assert_eq!(stats.published(), 100);
        assert_eq!(latest.frame(), &[99.0]);
        assert!(!latest.is_connected());
    }
}
