//! Storage for per-transmission decode outcomes within a burst.

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use crate::consts::RECORDS_PER_BURST;

/// Outcome of one completed transmission.
///
/// Written exactly once when the postfix window closes, whether or not the
/// frame validated; the confirmation flags carry the validity information
/// into reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmissionRecord {
    /// The 7-bit payload value, parity bit already stripped.
    pub payload: u8,

    /// Whether the transmitted parity bit matched the payload.
    pub parity_ok: bool,

    /// Whether the trailer matched the postfix pattern.
    pub postfix_ok: bool,
}

impl TransmissionRecord {
    /// True if the record is confirmed on both the parity and postfix axes.
    pub fn confirmed(&self) -> bool {
        self.parity_ok && self.postfix_ok
    }
}

/// Fixed-capacity store for the transmissions of one burst.
///
/// Append-only within a burst: slots are reused only through [`clear`],
/// which runs after reconciliation or after a timed-out burst. Unset slots
/// are simply absent rather than holding a sentinel value.
///
/// [`clear`]: RecordStore::clear
#[derive(Debug, Default)]
pub struct RecordStore {
    #[cfg(not(feature = "std"))]
    slots: Vec<TransmissionRecord, RECORDS_PER_BURST>,
    #[cfg(feature = "std")]
    slots: Vec<TransmissionRecord>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the next free slot.
    ///
    /// Returns false if all slots of the burst are already occupied; the
    /// record is dropped in that case (the protocol does not allow a fourth
    /// transmission per burst, so the caller counts this as an overrun).
    pub fn record(&mut self, record: TransmissionRecord) -> bool {
        if self.slots.len() >= RECORDS_PER_BURST {
            return false;
        }
        #[cfg(not(feature = "std"))]
        let _ = self.slots.push(record);
        #[cfg(feature = "std")]
        self.slots.push(record);
        true
    }

    /// Resets every slot. The only way slots become reusable.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// The records collected so far this burst, in arrival order.
    pub fn records(&self) -> &[TransmissionRecord] {
        &self.slots
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no transmission has completed this burst.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True if every slot of the burst is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= RECORDS_PER_BURST
    }
}
