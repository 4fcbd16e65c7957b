//! Entity identity
//!
//! An [`EntityId`] is minted from three parts: the wall-clock timestamp in
//! nanoseconds, a key unique to the generating thread, and a per-thread
//! sequence number. The thread key is handed out once per thread from a
//! process-wide counter, so generation never takes a lock.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Next thread key to hand out. Zero is reserved for the root id.
static NEXT_THREAD_KEY: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_KEY: u64 = NEXT_THREAD_KEY.fetch_add(1, Ordering::Relaxed);
    static SEQUENCE: Cell<u64> = const { Cell::new(0) };
}

/// Unique identifier for entities in the ECS.
///
/// Ordering is by timestamp first, which keeps ids roughly in creation order,
/// but the order carries no meaning beyond determinism.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    timestamp: u64,
    thread: u64,
    sequence: u64,
}

impl EntityId {
    /// The "no parent" sentinel. Generated ids never have a zero sequence,
    /// so no generated id compares equal to it.
    pub const ROOT: EntityId = EntityId {
        timestamp: 0,
        thread: 0,
        sequence: 0,
    };

    /// Mint a fresh id, unique among all ids generated by this process.
    pub fn new() -> Self {
        let thread = THREAD_KEY.with(|key| *key);
        let sequence = SEQUENCE.with(|seq| {
            let next = seq.get() + 1;
            seq.set(next);
            next
        });
        // A clock set before the epoch only loses the timestamp; the
        // (thread, sequence) pair alone is still unique.
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        Self {
            timestamp,
            thread,
            sequence,
        }
    }

    /// The root sentinel id.
    pub const fn root() -> Self {
        Self::ROOT
    }

    /// Whether this is the root sentinel.
    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    /// Key of the thread that generated this id.
    pub fn thread_key(&self) -> u64 {
        self.thread
    }

    /// Nanoseconds since the Unix epoch at generation time.
    pub fn timestamp_nanos(&self) -> u64 {
        self.timestamp
    }

    /// Position of this id among the ids generated by its thread.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({self})")
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("root");
        }
        write!(f, "{:x}.{}.{}", self.thread, self.timestamp, self.sequence)
    }
}
