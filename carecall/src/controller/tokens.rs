use std::sync::atomic::{AtomicU64, Ordering};

/// A region of the dashboard that one action writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Stats tiles and the patient list.
    Dashboard,
    /// The visits modal with its analytics and charts.
    Visits,
    /// The patient profile modal.
    Profile,
}

impl Target {
    fn index(self) -> usize {
        match self {
            Target::Dashboard => 0,
            Target::Visits => 1,
            Target::Profile => 2,
        }
    }
}

/// Monotonic request tokens, one counter per [`Target`].
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: [AtomicU64; 3],
}

impl RequestTokens {
    pub fn issue(&self, target: Target) -> u64 {
        self.latest[target.index()].fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, target: Target, token: u64) -> bool {
        self.latest[target.index()].load(Ordering::SeqCst) == token
    }

    pub fn latest(&self, target: Target) -> u64 {
        self.latest[target.index()].load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_token_is_current() {
        let tokens = RequestTokens::default();
        let first = tokens.issue(Target::Visits);
        let second = tokens.issue(Target::Visits);
        assert!(second > first);
        assert!(!tokens.is_current(Target::Visits, first));
        assert!(tokens.is_current(Target::Visits, second));
    }

    #[test]
    fn targets_count_independently() {
        let tokens = RequestTokens::default();
        let visits = tokens.issue(Target::Visits);
        let profile = tokens.issue(Target::Profile);
        assert!(tokens.is_current(Target::Visits, visits));
        assert!(tokens.is_current(Target::Profile, profile));
        assert_eq!(tokens.latest(Target::Dashboard), 0);
    }
}
