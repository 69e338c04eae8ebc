use log::{debug, info};
use rand::Rng;
use serde::Serialize;
use std::{fmt::Debug, ops::RangeInclusive, thread, time::Duration};

use crate::error::PaxosError;
use crate::paxos::{
    acceptor::SharedAcceptor,
    proposer::{FastProposer, Proposer},
    quorum::QuorumPolicy,
    Accepted, AcceptorTrait, Outcome, Promise, ProposalNumber, ProposerTrait,
};

/// What one proposer asked for and what it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport<V> {
    pub number: ProposalNumber,
    pub mode: QuorumPolicy,
    pub proposed: V,
    pub outcome: Outcome<V>,
}

/// Runs a single proposer of the given kind against `acceptors`.
pub fn run_round<A>(
    mode: QuorumPolicy,
    number: ProposalNumber,
    value: A::Value,
    acceptors: &mut [A],
) -> Result<RoundReport<A::Value>, PaxosError>
where
    A: AcceptorTrait,
    A::Value: Clone + Debug,
{
    let outcome = match mode {
        QuorumPolicy::Classic => Proposer::new(number, value.clone()).propose(acceptors)?,
        QuorumPolicy::Fast => FastProposer::new(number, value.clone()).propose(acceptors)?,
    };
    Ok(RoundReport {
        number,
        mode,
        proposed: value,
        outcome,
    })
}

/// Runs the proposals one after another, each to completion, against the
/// same acceptors.
pub fn run_sequential<A>(
    mode: QuorumPolicy,
    proposals: &[(ProposalNumber, A::Value)],
    acceptors: &mut [A],
) -> Result<Vec<RoundReport<A::Value>>, PaxosError>
where
    A: AcceptorTrait,
    A::Value: Clone + Debug,
{
    let mut reports = Vec::with_capacity(proposals.len());
    for (number, value) in proposals {
        reports.push(run_round(mode, *number, value.clone(), &mut *acceptors)?);
    }
    Ok(reports)
}

/// An acceptor handle that sleeps a random delay before each Prepare and
/// Accept, standing in for network latency so concurrent proposers interleave.
#[derive(Debug, Clone)]
pub struct Jittered<A> {
    inner: A,
    delay_ms: Option<RangeInclusive<u64>>,
}

impl<A> Jittered<A> {
    pub fn new(inner: A, delay_ms: Option<RangeInclusive<u64>>) -> Self {
        Jittered { inner, delay_ms }
    }

    fn pause(&self) {
        let Some(range) = &self.delay_ms else {
            return;
        };
        if range.is_empty() {
            return;
        }
        let delay = rand::rng().random_range(range.clone());
        thread::sleep(Duration::from_millis(delay));
    }
}

impl<A: AcceptorTrait> AcceptorTrait for Jittered<A> {
    type Value = A::Value;

    fn prepare(&mut self, number: ProposalNumber) -> Promise<Self::Value> {
        self.pause();
        self.inner.prepare(number)
    }

    fn accept(&mut self, number: ProposalNumber, value: Self::Value) -> bool {
        self.pause();
        self.inner.accept(number, value)
    }

    fn accepted(&self) -> Option<Accepted<Self::Value>> {
        self.inner.accepted()
    }

    fn promised(&self) -> Option<ProposalNumber> {
        self.inner.promised()
    }

    fn reset(&mut self) {
        self.inner.reset()
    }
}

/// Runs every proposal on its own thread against one shared collection.
///
/// Reports come back in the order of `proposals`, not completion order.
pub fn run_concurrent<V>(
    mode: QuorumPolicy,
    proposals: Vec<(ProposalNumber, V)>,
    acceptors: &[SharedAcceptor<V>],
    delay_ms: Option<RangeInclusive<u64>>,
) -> Result<Vec<RoundReport<V>>, PaxosError>
where
    V: Clone + Debug + Send + 'static,
{
    if acceptors.is_empty() {
        return Err(PaxosError::NoAcceptors);
    }
    info!(
        "Simulation: Starting {} {} proposers against {} shared acceptors",
        proposals.len(),
        mode,
        acceptors.len()
    );

    let handles: Vec<_> = proposals
        .into_iter()
        .map(|(number, value)| {
            let mut contacts: Vec<Jittered<SharedAcceptor<V>>> = acceptors
                .iter()
                .map(|acceptor| Jittered::new(acceptor.clone(), delay_ms.clone()))
                .collect();
            let worker = thread::spawn(move || {
                debug!("Simulation: Proposer {} started", number);
                run_round(mode, number, value, &mut contacts)
            });
            (number, worker)
        })
        .collect();

    // Join every worker before reporting, so no proposer outlives this call.
    let joined: Vec<_> = handles
        .into_iter()
        .map(|(number, worker)| (number, worker.join()))
        .collect();

    joined
        .into_iter()
        .map(|(number, result)| result.map_err(|_| PaxosError::ProposerPanicked(number))?)
        .collect()
}
