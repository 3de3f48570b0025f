use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not running inside a GRASS session (GISBASE is not set)")]
    MissingGrassEnvironment,
    #[error("{module} failed with exit code {status}: {stderr}")]
    ModuleFailure {
        module: String,
        status: i32,
        stderr: String,
    },
    #[error("Malformed estimation report: {0}")]
    MalformedReport(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::InvalidNumber(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::InvalidNumber(err.to_string())
    }
}
