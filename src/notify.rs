//! Interrupt-to-task wakeup signalling.
//!
//! Each periodic timer wakes exactly one consumer through a single-slot
//! signal.  A wakeup posted while the consumer is still busy is coalesced
//! with any already-pending one — at-most-one-pending, never a queue.
//! Bursts of timer fires faster than the consumer can process silently
//! collapse into a single observed wakeup; that is the intended
//! backpressure, not a dropped-event bug.
//!
//! ```text
//! ┌──────────────┐  signal   ┌─────────────┐  take   ┌───────────────┐
//! │ esp_timer cb │──────────▶│ TaskWakeup  │────────▶│ monitor loop  │
//! │ (distance)   │           │ (1 slot)    │         │ (consumer)    │
//! └──────────────┘           └─────────────┘         └───────────────┘
//! ```
//!
//! Built on `embassy_sync::signal::Signal`, which is allocation-free and
//! safe to signal from interrupt/timer-task context.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// One coalescing wakeup slot, shared between a timer callback (producer)
/// and a monitor loop (consumer).
pub struct TaskWakeup {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl TaskWakeup {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Post a wakeup.  Safe to call from ISR / timer-task context; O(1),
    /// allocation-free.  Signalling an already-signalled slot is a no-op
    /// (coalescing).
    pub fn notify_from_isr(&self) {
        self.signal.signal(());
    }

    /// Consume the pending wakeup, if any.  Returns `true` at most once per
    /// posted burst.
    pub fn take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    /// Whether a wakeup is pending without consuming it.
    pub fn pending(&self) -> bool {
        self.signal.signaled()
    }
}

/// Wakeup slot for the distance monitor (fed by the 500 ms timer).
pub static DISTANCE_WAKEUP: TaskWakeup = TaskWakeup::new();

/// Wakeup slot for the motion monitor (fed by the 5 ms timer).
pub static MOTION_WAKEUP: TaskWakeup = TaskWakeup::new();
