use log::{info, warn};
use std::fmt::Debug;

use crate::error::PaxosError;
use crate::paxos::{
    quorum::QuorumPolicy,
    round::{accept_phase, prepare_phase, resolve_value},
    AcceptorTrait, Outcome, ProposalNumber, ProposerTrait,
};

/// A classic two-phase (Prepare/Accept) proposer.
#[derive(Debug, Clone)]
pub struct Proposer<V> {
    number: ProposalNumber,
    value: V,
}

impl<V> Proposer<V> {
    pub fn new(number: ProposalNumber, value: V) -> Self {
        Proposer { number, value }
    }

    /// The candidate value. After a round this is the value that was sent in
    /// the Accept phase, which may have been adopted from an earlier round.
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: Clone + Debug> ProposerTrait<V> for Proposer<V> {
    fn propose<A>(&mut self, acceptors: &mut [A]) -> Result<Outcome<V>, PaxosError>
    where
        A: AcceptorTrait<Value = V>,
    {
        let quorum = QuorumPolicy::Classic.size(acceptors.len())?;
        info!(
            "Proposer: Initiating proposal {} with value {:?} (quorum {} of {})",
            self.number,
            self.value,
            quorum,
            acceptors.len()
        );
        Ok(two_phase(self.number, &mut self.value, acceptors, quorum))
    }
}

/// A proposer that first tries a direct Accept round with the fast quorum and
/// falls back to Prepare/Accept, still with the fast quorum, if that fails.
#[derive(Debug, Clone)]
pub struct FastProposer<V> {
    number: ProposalNumber,
    value: V,
}

impl<V> FastProposer<V> {
    pub fn new(number: ProposalNumber, value: V) -> Self {
        FastProposer { number, value }
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: Clone + Debug> ProposerTrait<V> for FastProposer<V> {
    fn propose<A>(&mut self, acceptors: &mut [A]) -> Result<Outcome<V>, PaxosError>
    where
        A: AcceptorTrait<Value = V>,
    {
        let quorum = QuorumPolicy::Fast.size(acceptors.len())?;
        info!(
            "Fast proposer: Initiating proposal {} with value {:?} (fast quorum {} of {})",
            self.number,
            self.value,
            quorum,
            acceptors.len()
        );

        let report = accept_phase(acceptors, self.number, &self.value, quorum);
        if report.reached() {
            info!(
                "Fast proposer: Proposal {} decided {:?} on the fast path",
                self.number, self.value
            );
            return Ok(Outcome::Decided(self.value.clone()));
        }

        warn!(
            "Fast proposer: Only {} of {} fast acceptances for proposal {}, falling back to Prepare",
            report.affirmative, quorum, self.number
        );
        Ok(two_phase(self.number, &mut self.value, acceptors, quorum))
    }
}

fn two_phase<A>(
    number: ProposalNumber,
    value: &mut A::Value,
    acceptors: &mut [A],
    quorum: usize,
) -> Outcome<A::Value>
where
    A: AcceptorTrait,
    A::Value: Clone + Debug,
{
    let prepared = prepare_phase(acceptors, number, quorum);
    if !prepared.report.reached() {
        warn!(
            "Proposer: Proposal {} got {} promises (needed {})",
            number, prepared.report.affirmative, quorum
        );
        return Outcome::NoConsensus;
    }

    if let Some(prior) = &prepared.highest {
        info!(
            "Proposer: Proposal {} adopts {:?} accepted under proposal {}",
            number, prior.value, prior.number
        );
    }
    *value = resolve_value(value.clone(), prepared.highest);

    let report = accept_phase(acceptors, number, value, quorum);
    if report.reached() {
        info!("Proposer: Proposal {} decided {:?}", number, value);
        Outcome::Decided(value.clone())
    } else {
        warn!(
            "Proposer: Proposal {} got {} acceptances (needed {})",
            number, report.affirmative, quorum
        );
        Outcome::NoConsensus
    }
}
