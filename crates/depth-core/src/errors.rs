//! # Core Error Types
//!
//! Errors raised while simulating tradable liquidity. Simulators return them
//! unchanged; callers decide whether to degrade or abort.

use thiserror::Error;

/// Errors produced by the depth simulators and their collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepthError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math error in '{operation}': {details}")]
    Math { operation: &'static str, details: String },

    #[error("Liquidity overflow crossing tick {0}")]
    LiquidityOverflow(i32),

    #[error("Liquidity underflow crossing tick {0}")]
    LiquidityUnderflow(i32),

    #[error("Token amount overflow")]
    AmountOverflow,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Tick {0} out of range")]
    TickOutOfRange(i32),

    #[error("Invalid tick spacing: {0}")]
    InvalidTickSpacing(u16),

    #[error("Invalid tick array window: {0}")]
    InvalidWindow(String),

    #[error("Tick array starting at {0} is not part of the window")]
    CurrentArrayNotInWindow(i32),

    #[error("Invalid tick bounds: min {min}, max {max}")]
    InvalidBounds { min: i32, max: i32 },

    // ========================================================================
    // Account Errors
    // ========================================================================

    #[error("Invalid {account} account data: {reason}")]
    InvalidAccountData { account: &'static str, reason: String },
}

/// Result type using depth errors
pub type DepthResult<T> = Result<T, DepthError>;

impl DepthError {
    /// Create a math error tagged with the failing operation
    pub fn math(operation: &'static str, details: impl std::fmt::Debug) -> Self {
        Self::Math {
            operation,
            details: format!("{:?}", details),
        }
    }

    /// Create an invalid window error with reason
    pub fn invalid_window(reason: impl Into<String>) -> Self {
        Self::InvalidWindow(reason.into())
    }

    /// Create an account decoding error
    pub fn invalid_account(account: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAccountData {
            account,
            reason: reason.into(),
        }
    }
}
