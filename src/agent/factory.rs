//! Declarative agent construction
//!
//! An [`AgentSpec`] names a strategy and optionally overrides its
//! parameters; everything omitted takes the strategy's default.
//!
//! | kind | defaults |
//! |---|---|
//! | `random` | |
//! | `minimax` | depth 1 |
//! | `alphabeta` | depth 4 |
//! | `expectimax` | depth 2 |
//! | `multiastar` | expansion budget 4 |
//! | `mcts` | 100 simulations, 10 rollout steps, c = 1.41 |
//! | `qlearning` | alpha 0.2, gamma 0.9, epsilon 0.3 (learning only), initial value 0.1 |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Agent, AgentKind, RandomAgent};
use crate::error::ConfigError;
use crate::learning::{TdParams, ValueTableAgent, ValueTableConfig};
use crate::rng::make_rng;
use crate::search::{MctsAgent, MctsConfig, MultiHeuristicAgent, SearchKind, TreeSearchAgent};

/// One agent's kind and parameter overrides, as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentSpec {
    /// Strategy name, matched case-insensitively
    pub kind: String,
    /// Search depth (expansion budget for `multiastar`)
    pub depth: Option<u8>,
    pub n_simulations: Option<u32>,
    pub m_steps: Option<u32>,
    pub exploration_weight: Option<f64>,
    pub alpha: Option<f64>,
    pub gamma: Option<f64>,
    pub epsilon: Option<f64>,
    pub initial_value: Option<f64>,
    /// Enables exploration and table updates meant to be saved
    pub learning: Option<bool>,
    pub table_path: Option<PathBuf>,
    /// Overrides the match seed for this agent
    pub seed: Option<u64>,
}

impl AgentSpec {
    /// Spec with only the kind set
    pub fn of(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn agent_kind(&self) -> Result<AgentKind, ConfigError> {
        self.kind.parse()
    }

    /// Check the kind and every parameter that is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent_kind()?;
        for (param, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::InvalidParam {
                        param,
                        reason: format!("{v} is not in [0, 1]"),
                    });
                }
            }
        }
        if let Some(c) = self.exploration_weight {
            if !c.is_finite() || c < 0.0 {
                return Err(ConfigError::InvalidParam {
                    param: "exploration_weight",
                    reason: format!("{c} must be a finite value >= 0"),
                });
            }
        }
        if self.n_simulations == Some(0) {
            return Err(ConfigError::InvalidParam {
                param: "n_simulations",
                reason: "must be >= 1".into(),
            });
        }
        if let Some(v) = self.initial_value.filter(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidParam {
                param: "initial_value",
                reason: format!("{v} is not finite"),
            });
        }
        Ok(())
    }
}

/// Build the agent described by `spec` for `board_size` boards.
///
/// The agent's randomness is seeded from `spec.seed`, else `fallback_seed`,
/// else OS entropy.
pub fn build_agent(
    spec: &AgentSpec,
    board_size: usize,
    fallback_seed: Option<u64>,
) -> Result<Box<dyn Agent>, ConfigError> {
    spec.validate()?;
    let kind = spec.agent_kind()?;
    let rng = make_rng(spec.seed.or(fallback_seed));

    let agent: Box<dyn Agent> = match kind {
        AgentKind::Random => Box::new(RandomAgent::new(rng)),
        AgentKind::Minimax => Box::new(TreeSearchAgent::new(
            SearchKind::Minimax,
            spec.depth.unwrap_or(1),
        )),
        AgentKind::AlphaBeta => Box::new(TreeSearchAgent::new(
            SearchKind::AlphaBeta,
            spec.depth.unwrap_or(4),
        )),
        AgentKind::Expectimax => Box::new(TreeSearchAgent::new(
            SearchKind::Expectimax,
            spec.depth.unwrap_or(2),
        )),
        AgentKind::MultiAStar => Box::new(MultiHeuristicAgent::new(
            u32::from(spec.depth.unwrap_or(4)),
            rng,
        )),
        AgentKind::Mcts => {
            let defaults = MctsConfig::default();
            let config = MctsConfig {
                n_simulations: spec.n_simulations.unwrap_or(defaults.n_simulations),
                m_steps: spec.m_steps.unwrap_or(defaults.m_steps),
                exploration_weight: spec.exploration_weight.unwrap_or(defaults.exploration_weight),
                ..defaults
            };
            Box::new(MctsAgent::new(config, rng))
        }
        AgentKind::QLearning => {
            let defaults = ValueTableConfig::default();
            let td = TdParams {
                alpha: spec.alpha.unwrap_or(defaults.td.alpha),
                gamma: spec.gamma.unwrap_or(defaults.td.gamma),
                initial_value: spec.initial_value.unwrap_or(defaults.td.initial_value),
            };
            let config = ValueTableConfig {
                td,
                epsilon: spec.epsilon.unwrap_or(defaults.epsilon),
                learning: spec.learning.unwrap_or(defaults.learning),
                table_path: spec.table_path.clone().or(defaults.table_path),
            };
            Box::new(ValueTableAgent::new(config, board_size, rng))
        }
    };
    Ok(agent)
}
