//! Phase execution shared by the classic and fast proposers.
//!
//! Acceptors are contacted strictly in collection order and a phase stops as
//! soon as it has `quorum` affirmative answers; later acceptors never see that
//! phase. This is first-K-in-order, not broadcast-and-take-the-first-K.

use log::debug;

use crate::paxos::{Accepted, AcceptorTrait, Promise, ProposalNumber};

/// What a single phase did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseReport {
    pub quorum: usize,
    /// Acceptors called, counted from the front of the collection.
    pub contacted: usize,
    pub affirmative: usize,
}

impl PhaseReport {
    fn new(quorum: usize) -> Self {
        PhaseReport {
            quorum,
            contacted: 0,
            affirmative: 0,
        }
    }

    pub fn reached(&self) -> bool {
        self.affirmative >= self.quorum
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOutcome<V> {
    pub report: PhaseReport,
    /// The highest-numbered acceptance reported by any promising acceptor.
    pub highest: Option<Accepted<V>>,
}

pub fn prepare_phase<A: AcceptorTrait>(
    acceptors: &mut [A],
    number: ProposalNumber,
    quorum: usize,
) -> PrepareOutcome<A::Value> {
    let mut report = PhaseReport::new(quorum);
    let mut highest: Option<Accepted<A::Value>> = None;

    for acceptor in acceptors.iter_mut() {
        report.contacted += 1;
        if let Promise::Granted(prior) = acceptor.prepare(number) {
            report.affirmative += 1;
            if let Some(prior) = prior {
                // Strictly greater: the first report of a number wins ties.
                if highest.as_ref().is_none_or(|h| prior.number > h.number) {
                    highest = Some(prior);
                }
            }
        }
        if report.reached() {
            break;
        }
    }

    debug!(
        "Prepare {}: {} promises from {} contacted (quorum {})",
        number, report.affirmative, report.contacted, quorum
    );
    PrepareOutcome { report, highest }
}

pub fn accept_phase<A>(
    acceptors: &mut [A],
    number: ProposalNumber,
    value: &A::Value,
    quorum: usize,
) -> PhaseReport
where
    A: AcceptorTrait,
    A::Value: Clone,
{
    let mut report = PhaseReport::new(quorum);

    for acceptor in acceptors.iter_mut() {
        report.contacted += 1;
        if acceptor.accept(number, value.clone()) {
            report.affirmative += 1;
        }
        if report.reached() {
            break;
        }
    }

    debug!(
        "Accept {}: {} acceptances from {} contacted (quorum {})",
        number, report.affirmative, report.contacted, quorum
    );
    report
}

/// Picks the value for the Accept phase: the highest-numbered prior
/// acceptance if any promise reported one, otherwise `candidate`.
pub fn resolve_value<V>(candidate: V, highest: Option<Accepted<V>>) -> V {
    highest.map_or(candidate, |prior| prior.value)
}
