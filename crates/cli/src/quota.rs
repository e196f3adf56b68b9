//! Per-run limits on how many files may be cleaned.

/// Decides whether another file may be cleaned and records successful runs.
pub trait QuotaGate {
    /// Files still allowed, or `None` when there is no limit.
    fn remaining(&self) -> Option<usize>;

    /// Count one successfully cleaned file against the quota.
    fn record_use(&mut self);

    fn has_quota(&self) -> bool {
        !matches!(self.remaining(), Some(0))
    }
}

/// No limit at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlimited;

impl QuotaGate for Unlimited {
    fn remaining(&self) -> Option<usize> {
        None
    }

    fn record_use(&mut self) {}
}

/// A fixed number of cleanings for this run.
#[derive(Debug, Clone, Copy)]
pub struct DailyAllowance {
    limit: usize,
    used: usize,
}

impl DailyAllowance {
    pub const DEFAULT_LIMIT: usize = 5;

    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }
}

impl Default for DailyAllowance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

impl QuotaGate for DailyAllowance {
    fn remaining(&self) -> Option<usize> {
        Some(self.limit.saturating_sub(self.used))
    }

    fn record_use(&mut self) {
        self.used = self.used.saturating_add(1);
    }
}
