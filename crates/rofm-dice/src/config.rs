//! Roll limits that bound the size of every parsed expression.

use serde::{Deserialize, Serialize};

/// Upper bounds applied while parsing dice expressions.
///
/// Limits are copied into each parse call, so changing them never affects
/// rolls that were already constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollLimits {
    /// Maximum number of dice in a single term (`N` in `NdK`).
    pub max_dice_count: u32,
    /// Maximum number of faces on a die (`K` in `NdK`).
    pub max_face_count: u32,
    /// Maximum number of `+ - * /` operators in one expression.
    pub max_operator_count: usize,
}

impl Default for RollLimits {
    fn default() -> Self {
        Self {
            max_dice_count: 100,
            max_face_count: 1000,
            max_operator_count: 20,
        }
    }
}

impl RollLimits {
    /// Set the maximum dice count.
    pub fn with_max_dice_count(mut self, max: u32) -> Self {
        self.max_dice_count = max;
        self
    }

    /// Set the maximum face count.
    pub fn with_max_face_count(mut self, max: u32) -> Self {
        self.max_face_count = max;
        self
    }

    /// Set the maximum operator count.
    pub fn with_max_operator_count(mut self, max: usize) -> Self {
        self.max_operator_count = max;
        self
    }
}
