use thiserror::Error;

/// All the ways things can go wrong in ChillCheck
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid time values: hour {hour}, minute {minute}")]
    InvalidTime { hour: u32, minute: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
