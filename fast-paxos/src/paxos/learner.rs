use log::{info, warn};
use std::fmt::Debug;

use crate::paxos::{quorum::QuorumPolicy, Accepted, AcceptorTrait};

/// Reads acceptor state to find out whether a value has been chosen.
pub struct BasicLearner;

impl BasicLearner {
    /// Returns the proposal accepted by at least a `policy` quorum of
    /// `acceptors`, if there is one. Every acceptor is inspected; none is
    /// modified.
    ///
    /// If several proposals each reach a quorum (possible only when the fast
    /// path overwrote an earlier decision), the highest-numbered one is
    /// returned.
    pub fn learn<A>(acceptors: &[A], policy: QuorumPolicy) -> Option<Accepted<A::Value>>
    where
        A: AcceptorTrait,
        A::Value: PartialEq + Debug,
    {
        let Ok(quorum) = policy.size(acceptors.len()) else {
            warn!("Learner: No acceptors to learn from.");
            return None;
        };

        let mut tally: Vec<(Accepted<A::Value>, usize)> = Vec::new();
        for accepted in acceptors.iter().filter_map(|acceptor| acceptor.accepted()) {
            match tally.iter_mut().find(|(seen, _)| *seen == accepted) {
                Some((_, count)) => *count += 1,
                None => tally.push((accepted, 1)),
            }
        }

        let chosen = tally
            .into_iter()
            .filter(|(_, count)| *count >= quorum)
            .map(|(accepted, _)| accepted)
            .max_by_key(|accepted| accepted.number);

        match &chosen {
            Some(accepted) => info!(
                "Learner: Proposal {} with value {:?} was accepted by a quorum",
                accepted.number, accepted.value
            ),
            None => warn!("Learner: No proposal reached a quorum of {}.", quorum),
        }
        chosen
    }
}
