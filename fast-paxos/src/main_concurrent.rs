use fast_paxos::{
    config::RunConfig,
    simulation::{run_concurrent, RoundReport},
    Accepted, AcceptorSet, BasicLearner, PaxosError, SharedAcceptor,
};

/// Every proposer on its own thread, racing over acceptors behind
/// per-acceptor locks.
pub fn run(
    config: &RunConfig,
) -> Result<(Vec<RoundReport<i64>>, Option<Accepted<i64>>), PaxosError> {
    let acceptors = AcceptorSet::<SharedAcceptor<i64>>::new(config.acceptors)?;
    let rounds = run_concurrent(
        config.mode,
        config.proposal_pairs(),
        &acceptors,
        config.jitter_range(),
    )?;
    let learned = BasicLearner::learn(&acceptors, config.mode);
    Ok((rounds, learned))
}
