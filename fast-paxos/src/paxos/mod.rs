use serde::Serialize;

use crate::error::PaxosError;

pub mod acceptor;
pub mod learner;
pub mod proposer;
pub mod quorum;
pub mod round;

/// Caller-assigned number identifying one proposer's round.
pub type ProposalNumber = u64;

/// A proposal an acceptor has accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted<V> {
    pub number: ProposalNumber,
    pub value: V,
}

/// An acceptor's answer to a Prepare request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promise<V> {
    /// The promise was made. Carries whatever the acceptor had accepted so far.
    Granted(Option<Accepted<V>>),
    /// The acceptor already promised an equal or higher number.
    Rejected,
}

impl<V> Promise<V> {
    pub fn is_granted(&self) -> bool {
        matches!(self, Promise::Granted(_))
    }
}

/// Result of a single proposer round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome<V> {
    Decided(V),
    NoConsensus,
}

impl<V> Outcome<V> {
    pub fn is_decided(&self) -> bool {
        matches!(self, Outcome::Decided(_))
    }

    pub fn decided(&self) -> Option<&V> {
        match self {
            Outcome::Decided(value) => Some(value),
            Outcome::NoConsensus => None,
        }
    }
}

pub trait AcceptorTrait {
    type Value;

    /// In the Prepare phase the acceptor promises to ignore proposals numbered
    /// at or below `number`, provided it has not promised `number` or higher yet.
    fn prepare(&mut self, number: ProposalNumber) -> Promise<Self::Value>;
    /// In the Accept phase the acceptor records `(number, value)` unless it has
    /// promised a higher number.
    fn accept(&mut self, number: ProposalNumber, value: Self::Value) -> bool;
    /// Returns the most recently accepted proposal (if any).
    fn accepted(&self) -> Option<Accepted<Self::Value>>;
    /// Returns the highest number promised so far (if any).
    fn promised(&self) -> Option<ProposalNumber>;
    /// Forgets all promises and acceptances, readying the acceptor for a new decree.
    fn reset(&mut self);
}

impl<A: AcceptorTrait + ?Sized> AcceptorTrait for Box<A> {
    type Value = A::Value;

    fn prepare(&mut self, number: ProposalNumber) -> Promise<Self::Value> {
        (**self).prepare(number)
    }

    fn accept(&mut self, number: ProposalNumber, value: Self::Value) -> bool {
        (**self).accept(number, value)
    }

    fn accepted(&self) -> Option<Accepted<Self::Value>> {
        (**self).accepted()
    }

    fn promised(&self) -> Option<ProposalNumber> {
        (**self).promised()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

pub trait ProposerTrait<V> {
    /// Runs one full round against `acceptors`, contacting them in order.
    ///
    /// Fails only when `acceptors` is empty; every protocol-level rejection is
    /// reported as [`Outcome::NoConsensus`].
    fn propose<A>(&mut self, acceptors: &mut [A]) -> Result<Outcome<V>, PaxosError>
    where
        A: AcceptorTrait<Value = V>;
}
