use ta_core::TaError;
use ta_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssignError {
    #[error("assignment configuration error: {0}")]
    Config(String),

    #[error("network has {network} zones but the OD matrix has {matrix}")]
    ZoneCountMismatch { network: usize, matrix: usize },

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[cfg(feature = "parallel")]
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("worker panicked during {0}")]
    WorkerPanicked(String),

    #[error("{0} worker threads requested, but ta-assign was built without the `parallel` feature")]
    ParallelUnavailable(usize),
}

impl From<TaError> for AssignError {
    fn from(e: TaError) -> Self {
        match e {
            TaError::Config(msg) => AssignError::Config(msg),
        }
    }
}

pub type AssignResult<T> = Result<T, AssignError>;
