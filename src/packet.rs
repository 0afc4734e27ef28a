/// Packet identifiers for gossip dissemination.
///
/// A packet carries no payload; its identity is all that matters. Ids
/// are minted by a single `PacketIdGen` owned by the experiment context,
/// so every trial of every experiment sees a packet id nobody has seen
/// before.

// ── Packet ID ─────────────────────────────────────────────────────────

/// A process-unique, strictly-increasing packet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketId(u64);

impl PacketId {
    /// Wrap a raw u64 into a `PacketId`.
    #[inline]
    pub fn new(raw: u64) -> Self {
        PacketId(raw)
    }

    /// Return the raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PacketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P#{}", self.0)
    }
}

// ── Packet ID Generator ──────────────────────────────────────────────

/// Monotonic packet-id generator.
///
/// The counter is incremented before use, so a fresh generator mints
/// `P#1` first. Parallel workers each get a generator started at the
/// beginning of their own segment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketIdGen {
    last: u64,
}

impl PacketIdGen {
    /// Create a generator whose first id is 1.
    pub fn new() -> Self {
        PacketIdGen { last: 0 }
    }

    /// Create a generator whose first id is `start + 1`.
    pub fn starting_at(start: u64) -> Self {
        PacketIdGen { last: start }
    }

    /// Mint the next packet id.
    pub fn next_id(&mut self) -> PacketId {
        self.last += 1;
        PacketId(self.last)
    }

    /// The most recently minted id, or the segment start if none was minted.
    pub fn last(&self) -> PacketId {
        PacketId(self.last)
    }
}

impl Default for PacketIdGen {
    fn default() -> Self {
        Self::new()
    }
}
