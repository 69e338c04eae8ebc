pub mod config;
pub mod error;
pub mod paxos;
pub mod simulation;

pub use error::{ConfigError, PaxosError};
pub use paxos::{
    acceptor::{AcceptorSet, BasicAcceptor, SharedAcceptor},
    learner::BasicLearner,
    proposer::{FastProposer, Proposer},
    quorum::QuorumPolicy,
    Accepted, AcceptorTrait, Outcome, Promise, ProposalNumber, ProposerTrait,
};
