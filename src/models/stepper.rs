// Per-segment stepper state

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected stepper operations. The state is never modified when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("segment {index} does not exist (version has {len} segments)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("segment {index} is already 0 and cannot be decremented")]
    BelowZero { index: usize },
    #[error("segment {index} is at its maximum value and cannot be incremented")]
    Overflow { index: usize },
}

/// One integer per version segment, most significant first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepperState {
    values: Vec<u64>,
}

impl StepperState {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied()
    }

    pub fn can_increment(&self, index: usize) -> bool {
        self.get(index).is_some_and(|v| v < u64::MAX)
    }

    /// Decrement controls must be disabled when this is false
    pub fn can_decrement(&self, index: usize) -> bool {
        self.get(index).is_some_and(|v| v > 0)
    }

    /// Bump `index` by one and zero every lower-order segment
    pub fn increment(&mut self, index: usize) -> Result<u64, StepError> {
        let current = self.checked_get(index)?;
        let next = current
            .checked_add(1)
            .ok_or(StepError::Overflow { index })?;
        self.values[index] = next;
        self.reset_below(index);
        Ok(next)
    }

    /// Lower `index` by one and zero every lower-order segment
    pub fn decrement(&mut self, index: usize) -> Result<u64, StepError> {
        let current = self.checked_get(index)?;
        let next = current
            .checked_sub(1)
            .ok_or(StepError::BelowZero { index })?;
        self.values[index] = next;
        self.reset_below(index);
        Ok(next)
    }

    /// Overwrite a single segment. Lower-order segments keep their values.
    pub fn set(&mut self, index: usize, value: u64) -> Result<(), StepError> {
        self.checked_get(index)?;
        self.values[index] = value;
        Ok(())
    }

    fn checked_get(&self, index: usize) -> Result<u64, StepError> {
        self.get(index).ok_or(StepError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    fn reset_below(&mut self, index: usize) {
        for value in self.values.iter_mut().skip(index + 1) {
            *value = 0;
        }
    }
}
