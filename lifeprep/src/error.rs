//! Error types.

#[derive(thiserror::Error, Debug)]
pub enum LifeprepError {
    #[error("Wrapped anyhow error: {0}")]
    AnyhowError(#[from] anyhow::Error),
    #[error("Year column is not integral: {0}")]
    NonIntegralYear(String),
    #[error("Year filtering failed: {0}")]
    YearOutOfRange(String),
    #[error("{0} contains missing values after cleaning")]
    CriticalFieldMissing(String),
    #[error("Wrapped polars error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_anyhow() {
        let anyhow_error = anyhow!("An anyhow error");
        let lifeprep_error: LifeprepError = anyhow_error.into();
        println!("{}", lifeprep_error);
    }

    #[test]
    fn validation_errors_describe_the_violated_invariant() {
        let err = LifeprepError::CriticalFieldMissing("life_expectancy".to_string());
        assert_eq!(
            err.to_string(),
            "life_expectancy contains missing values after cleaning"
        );
    }
}
