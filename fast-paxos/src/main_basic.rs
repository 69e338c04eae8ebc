use fast_paxos::{
    config::RunConfig,
    simulation::{run_sequential, RoundReport},
    Accepted, AcceptorSet, BasicAcceptor, BasicLearner, PaxosError,
};

/// One proposer at a time, each finishing all its phases before the next starts.
pub fn run(
    config: &RunConfig,
) -> Result<(Vec<RoundReport<i64>>, Option<Accepted<i64>>), PaxosError> {
    let mut acceptors = AcceptorSet::<BasicAcceptor<i64>>::new(config.acceptors)?;
    let rounds = run_sequential(config.mode, &config.proposal_pairs(), &mut acceptors)?;
    let learned = BasicLearner::learn(&acceptors, config.mode);
    Ok((rounds, learned))
}
