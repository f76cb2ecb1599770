//! Error types for clusterctl

use opencluster::ClusterError;
use thiserror::Error;

/// Exit status for success.
pub const EXIT_OK: u8 = 0;
/// Exit status for anything not covered below.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for an invalid configuration.
pub const EXIT_INVALID_CONFIG: u8 = 2;
/// Exit status for an unknown mode or scenario name.
pub const EXIT_UNKNOWN_NAME: u8 = 3;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Cluster(err) => cluster_exit_code(err),
            CliError::InvalidArgument(_) | CliError::JsonError(_) => EXIT_FAILURE,
        }
    }
}

fn cluster_exit_code(err: &ClusterError) -> u8 {
    if err.is_invalid_config() {
        EXIT_INVALID_CONFIG
    } else if err.is_unknown_name() {
        EXIT_UNKNOWN_NAME
    } else {
        EXIT_FAILURE
    }
}

/// Exit status for any error reaching `main`.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    if let Some(err) = error.downcast_ref::<CliError>() {
        return err.exit_code();
    }
    if let Some(err) = error.downcast_ref::<ClusterError>() {
        return cluster_exit_code(err);
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencluster::modes::ModeError;

    #[test]
    fn test_exit_codes() {
        let unknown: anyhow::Error = CliError::from(ClusterError::Mode(ModeError::UnknownMode {
            name: "sand".into(),
            available: "Road".into(),
        }))
        .into();
        assert_eq!(exit_code(&unknown), EXIT_UNKNOWN_NAME);

        let invalid: anyhow::Error = ClusterError::InvalidConfig("bad".into()).into();
        assert_eq!(exit_code(&invalid), EXIT_INVALID_CONFIG);

        let other = anyhow::anyhow!("boom");
        assert_eq!(exit_code(&other), EXIT_FAILURE);

        let arg: anyhow::Error = CliError::InvalidArgument("dt".into()).into();
        assert_eq!(exit_code(&arg), EXIT_FAILURE);
    }
}
