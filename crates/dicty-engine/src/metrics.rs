//! Per-synchronization counters.
//!
//! [`SyncMetrics`] is returned by every
//! [`Arena::synchronize`](crate::Arena::synchronize) call and logged at
//! debug level.

/// What happened during one synchronization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncMetrics {
    /// Dormant agents that became Active.
    pub activated: u32,
    /// Active agents that became Refractory.
    pub deactivated: u32,
    /// Refractory agents that became Dormant.
    pub recovered: u32,
    /// Agents that committed a move.
    pub moves_committed: u32,
    /// Agents with at least one candidate whose candidates were all taken.
    pub moves_blocked: u32,
    /// Duplicate positions found at the start of the pass.
    pub occupancy_violations: u32,
    /// Wall-clock time for the pass, in microseconds.
    pub total_us: u64,
}

/// Agent tallies by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Dormant agents.
    pub dormant: usize,
    /// Active agents, including the beacon.
    pub active: usize,
    /// Refractory agents.
    pub refractory: usize,
}

impl StateCounts {
    /// Total number of agents.
    pub fn total(&self) -> usize {
        self.dormant + self.active + self.refractory
    }
}
