use std::{io, path::PathBuf};

use thiserror::Error;

use crate::paxos::ProposalNumber;

/// Errors raised by the consensus engine itself.
///
/// Protocol-level rejections (a stale proposal number, a missed quorum) are
/// not errors; they surface as [`Outcome::NoConsensus`](crate::Outcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaxosError {
    #[error("an acceptor collection needs at least one acceptor")]
    NoAcceptors,

    #[error("proposer {0} panicked before finishing its round")]
    ProposerPanicked(ProposalNumber),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] yaml_rust::ScanError),

    #[error("config file contains no YAML document")]
    Empty,

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("unknown mode `{0}` (expected `classic` or `fast`)")]
    UnknownMode(String),

    #[error("acceptor count must be at least 1")]
    NoAcceptors,

    #[error("proposal number {0} is used more than once")]
    DuplicateProposal(ProposalNumber),
}
