use log::debug;
use std::{
    ops::{Deref, DerefMut},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::error::PaxosError;
use crate::paxos::{Accepted, AcceptorTrait, Promise, ProposalNumber};

/// A single-decree Paxos acceptor.
///
/// `None` in either field means nothing has been promised or accepted yet,
/// and loses to every real proposal number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAcceptor<V> {
    promised: Option<ProposalNumber>,
    accepted: Option<Accepted<V>>,
}

impl<V> BasicAcceptor<V> {
    pub fn new() -> Self {
        BasicAcceptor {
            promised: None,
            accepted: None,
        }
    }
}

impl<V> Default for BasicAcceptor<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> AcceptorTrait for BasicAcceptor<V> {
    type Value = V;

    fn prepare(&mut self, number: ProposalNumber) -> Promise<V> {
        if self.promised.is_none_or(|promised| number > promised) {
            debug!(
                "Acceptor: Promised proposal {} (was {:?})",
                number, self.promised
            );
            self.promised = Some(number);
            Promise::Granted(self.accepted.clone())
        } else {
            debug!(
                "Acceptor: Rejected prepare for proposal {} (already promised {:?})",
                number, self.promised
            );
            Promise::Rejected
        }
    }

    fn accept(&mut self, number: ProposalNumber, value: V) -> bool {
        // Compared against the promise only, never the previously accepted
        // number. The fast path accepts without a Prepare through this rule.
        if self.promised.is_none_or(|promised| number >= promised) {
            debug!("Acceptor: Accepted proposal {}", number);
            self.accepted = Some(Accepted { number, value });
            true
        } else {
            debug!(
                "Acceptor: Rejected accept for proposal {} (promised {:?})",
                number, self.promised
            );
            false
        }
    }

    fn accepted(&self) -> Option<Accepted<V>> {
        self.accepted.clone()
    }

    fn promised(&self) -> Option<ProposalNumber> {
        self.promised
    }

    fn reset(&mut self) {
        self.promised = None;
        self.accepted = None;
    }
}

/// A [`BasicAcceptor`] behind a per-acceptor lock, so proposers on different
/// threads can share one collection. Clones share the same acceptor.
///
/// Each `prepare`/`accept` holds the lock for its whole compare-and-set.
#[derive(Debug)]
pub struct SharedAcceptor<V> {
    inner: Arc<Mutex<BasicAcceptor<V>>>,
}

impl<V> SharedAcceptor<V> {
    pub fn new() -> Self {
        BasicAcceptor::new().into()
    }

    // The acceptor is never left half-updated, so a lock poisoned by a
    // panicking proposer thread is still safe to use.
    fn lock(&self) -> MutexGuard<'_, BasicAcceptor<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copies out the current acceptor state.
    pub fn snapshot(&self) -> BasicAcceptor<V>
    where
        V: Clone,
    {
        self.lock().clone()
    }
}

impl<V> Clone for SharedAcceptor<V> {
    fn clone(&self) -> Self {
        SharedAcceptor {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for SharedAcceptor<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<BasicAcceptor<V>> for SharedAcceptor<V> {
    fn from(acceptor: BasicAcceptor<V>) -> Self {
        SharedAcceptor {
            inner: Arc::new(Mutex::new(acceptor)),
        }
    }
}

impl<V: Clone> AcceptorTrait for SharedAcceptor<V> {
    type Value = V;

    fn prepare(&mut self, number: ProposalNumber) -> Promise<V> {
        self.lock().prepare(number)
    }

    fn accept(&mut self, number: ProposalNumber, value: V) -> bool {
        self.lock().accept(number, value)
    }

    fn accepted(&self) -> Option<Accepted<V>> {
        self.lock().accepted()
    }

    fn promised(&self) -> Option<ProposalNumber> {
        self.lock().promised()
    }

    fn reset(&mut self) {
        self.lock().reset()
    }
}

/// An ordered, non-empty acceptor collection scoped to one decree.
///
/// Order matters: every phase contacts acceptors front to back and stops at
/// quorum, so the first members see every round.
#[derive(Debug, Clone)]
pub struct AcceptorSet<A> {
    acceptors: Vec<A>,
}

impl<A: Default> AcceptorSet<A> {
    /// Builds `size` fresh acceptors.
    pub fn new(size: usize) -> Result<Self, PaxosError> {
        Self::from_acceptors((0..size).map(|_| A::default()).collect())
    }
}

impl<A> AcceptorSet<A> {
    pub fn from_acceptors(acceptors: Vec<A>) -> Result<Self, PaxosError> {
        if acceptors.is_empty() {
            return Err(PaxosError::NoAcceptors);
        }
        Ok(AcceptorSet { acceptors })
    }
}

impl<A: AcceptorTrait> AcceptorSet<A> {
    /// Resets every member. Reusing a collection for a second decree without
    /// this lets the fast path overwrite values chosen in the first one.
    pub fn reset(&mut self) {
        self.acceptors.iter_mut().for_each(|acceptor| acceptor.reset());
    }
}

impl<A> Deref for AcceptorSet<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.acceptors
    }
}

impl<A> DerefMut for AcceptorSet<A> {
    fn deref_mut(&mut self) -> &mut [A] {
        &mut self.acceptors
    }
}
