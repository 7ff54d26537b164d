//! Best-effort diagnostic serial channel.
//!
//! Two fixed 64-byte rings sit between the control loop and the UART:
//!
//! ```text
//!   enqueue_bytes ──▶ [ TX ring ] ──▶ drain_tx ──▶ UART
//!   dequeue_byte  ◀── [ RX ring ] ◀── push_received ◀── UART
//! ```
//!
//! Neither side ever blocks. A full TX ring accepts what fits and drops the
//! rest; a full RX ring drops its *oldest* byte to make room, so a reader
//! that falls behind sees the most recent input. Both losses are counted.

use heapless::Deque;

pub const RING_CAPACITY: usize = 64;

#[derive(Debug, Default)]
pub struct SerialChannel {
    tx: Deque<u8, RING_CAPACITY>,
    rx: Deque<u8, RING_CAPACITY>,
    tx_dropped: u32,
    rx_overwritten: u32,
}

impl SerialChannel {
    pub fn new() -> Self {
        Self::default()
    }

    // ── TX ────────────────────────────────────────────────────

    /// Queue bytes for transmission. Returns how many were accepted; the
    /// tail that does not fit is dropped.
    pub fn enqueue_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut accepted = 0;
        for &b in bytes {
            if self.tx.push_back(b).is_err() {
                break;
            }
            accepted += 1;
        }
        let dropped = bytes.len() - accepted;
        self.tx_dropped = self.tx_dropped.saturating_add(dropped as u32);
        accepted
    }

    /// Hand queued bytes to `write` in contiguous chunks until it accepts
    /// nothing more or the ring is empty. `write` returns how many bytes of
    /// the chunk it took. Returns the total moved.
    pub fn drain_tx(&mut self, mut write: impl FnMut(&[u8]) -> usize) -> usize {
        let mut total = 0;
        loop {
            let (chunk, _) = self.tx.as_slices();
            if chunk.is_empty() {
                break;
            }
            let n = write(chunk).min(chunk.len());
            if n == 0 {
                break;
            }
            for _ in 0..n {
                self.tx.pop_front();
            }
            total += n;
        }
        total
    }

    pub fn tx_pending(&self) -> usize {
        self.tx.len()
    }

    pub fn tx_dropped(&self) -> u32 {
        self.tx_dropped
    }

    // ── RX ────────────────────────────────────────────────────

    /// Store one received byte, evicting the oldest if the ring is full.
    pub fn push_received(&mut self, byte: u8) {
        if self.rx.is_full() {
            self.rx.pop_front();
            self.rx_overwritten = self.rx_overwritten.saturating_add(1);
        }
        // Cannot fail: a slot was just freed if the ring was full.
        let _ = self.rx.push_back(byte);
    }

    pub fn dequeue_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    pub fn rx_available(&self) -> usize {
        self.rx.len()
    }

    pub fn rx_overwritten(&self) -> u32 {
        self.rx_overwritten
    }
}
