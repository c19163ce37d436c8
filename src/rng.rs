//! Injectable randomness shared by all agents.
//!
//! Every stochastic decision (candidate down-sampling, score jitter,
//! tie-breaks, rollouts, exploration) draws from an agent-owned [`GameRng`],
//! so a fixed seed replays a game exactly.

use rand::SeedableRng as _;
use rand_pcg::Pcg32;

/// Random number generator owned by each agent
pub type GameRng = Pcg32;

/// Seeded generator when `seed` is given, otherwise seeded from the OS.
pub fn make_rng(seed: Option<u64>) -> GameRng {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_rng(),
    }
}
