use lifeprep::error::LifeprepError;
use polars::error::PolarsError;

#[derive(thiserror::Error, Debug)]
pub enum LifeprepCliError {
    #[error("Anyhow error")]
    Anyhow(#[from] anyhow::Error),
    #[error("polars error")]
    PolarsError(#[from] PolarsError),
    #[error("lifeprep error")]
    LifeprepError(#[from] LifeprepError),
    #[error("std IO error")]
    IOError(#[from] std::io::Error),
}

pub type LifeprepCliResult<T> = Result<T, LifeprepCliError>;
