//! Validation utilities for curve primitives

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a maximum length
#[inline(always)]
pub fn max_length(context: &'static str, actual: usize, max: usize) -> Result<()> {
    if actual > max {
        return Err(Error::Length {
            context,
            expected: max,
            actual,
        });
    }
    Ok(())
}

/// Validate that two paired inputs have the same length
#[inline(always)]
pub fn same_length(context: &'static str, left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::LengthMismatch { context, left, right });
    }
    Ok(())
}

/// Validate that a required input is not empty
#[inline(always)]
pub fn non_empty(context: &'static str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::NilInput { context });
    }
    Ok(())
}

/// Validate that a value was canonical
#[inline(always)]
pub fn range(condition: bool, context: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::Range { context });
    }
    Ok(())
}
