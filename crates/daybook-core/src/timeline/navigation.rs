//! Navigation lock: suppresses scroll-driven anchor updates while a
//! programmatic scroll is in flight.
//!
//! Each navigation bumps a generation counter and hands out a ticket. A
//! settle callback only returns the lock to `Idle` if its ticket is still the
//! newest, so a timer left over from an earlier navigation cannot end a newer
//! one early.

/// Lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Idle,
    Navigating,
}

/// Proof of one `begin()` call; pass it back to [`NavigationLock::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTicket {
    generation: u64,
}

impl NavigationTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct NavigationLock {
    generation: u64,
    state: NavigationState,
}

impl NavigationLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Navigating`, superseding any navigation already in flight.
    pub fn begin(&mut self) -> NavigationTicket {
        self.generation += 1;
        self.state = NavigationState::Navigating;
        NavigationTicket {
            generation: self.generation,
        }
    }

    /// Return to `Idle` if `ticket` belongs to the latest navigation.
    /// Stale tickets are ignored and `false` is returned.
    pub fn settle(&mut self, ticket: NavigationTicket) -> bool {
        if ticket.generation != self.generation || self.state == NavigationState::Idle {
            return false;
        }
        self.state = NavigationState::Idle;
        true
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn is_navigating(&self) -> bool {
        self.state == NavigationState::Navigating
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
