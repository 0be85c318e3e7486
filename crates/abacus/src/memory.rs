//! Memory register (M+, M-, MC, MR)

use serde::{Deserialize, Serialize};

/// A single numeric accumulator, independent of the evaluator.
///
/// Non-finite operands are ignored so the register always holds a finite value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    /// Creates an empty register
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0.0 }
    }

    /// M+
    pub fn add(&mut self, x: f64) {
        if x.is_finite() {
            self.value += x;
        }
    }

    /// M-
    pub fn subtract(&mut self, x: f64) {
        if x.is_finite() {
            self.value -= x;
        }
    }

    /// MC
    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    /// MR
    #[must_use]
    pub const fn recall(&self) -> f64 {
        self.value
    }
}
