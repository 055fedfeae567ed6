//! Error type shared by the simulation core.

use crate::types::WalkerId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalkError>;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("no {0} data found, call compute_vectrices() first")]
    MissingData(&'static str),
    #[error("unable to plot {requested} out of {available} iterations")]
    OutOfRange { requested: usize, available: usize },
    #[error("{0} is not a supported render engine")]
    UnknownBackend(String),
    #[error("walker {0} cannot relate to itself")]
    SelfRelation(WalkerId),
    #[error("walker {id} does not exist in a system of {len} walkers")]
    UnknownWalker { id: WalkerId, len: usize },
    #[error("relation graph covers {graph} walkers but the system has {walkers}")]
    GraphSizeMismatch { graph: usize, walkers: usize },
    #[error("walker {walker} has a non-finite position and cannot be saved")]
    NonFinite { walker: WalkerId },
    #[error("relation {from} -> {to} is not finite and cannot be saved")]
    NonFiniteRelation { from: WalkerId, to: WalkerId },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid system record: {0}")]
    Serde(#[from] serde_json::Error),
}
