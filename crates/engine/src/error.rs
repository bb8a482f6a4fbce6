//! The module contains the errors the engine can return.
//!
//! Only constructors and parsers return errors; the balance and debt
//! computations are total over their inputs and never fail.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] returned when an amount is not a positive, finite
//!   number of cents.
//! - [`InvalidSplit`] returned when split details are malformed.
//! - [`InvalidMember`] returned when a member id is empty.
//! - [`InvalidSettlement`] returned when a settlement pays oneself.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidSplit`]: EngineError::InvalidSplit
//!  [`InvalidMember`]: EngineError::InvalidMember
//!  [`InvalidSettlement`]: EngineError::InvalidSettlement
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("Invalid member: {0}")]
    InvalidMember(String),
    #[error("Invalid settlement: {0}")]
    InvalidSettlement(String),
}
