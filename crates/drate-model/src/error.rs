use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrateError {
    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("death rate {0} is outside [0, 1]")]
    InvalidDeathRate(f64),
}

pub type Result<T> = std::result::Result<T, DrateError>;
