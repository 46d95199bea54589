//! Harmonic order type.

use std::fmt;

use crate::error::{MainsError, Result};

/// Integer multiple of the fundamental frequency.
///
/// Always at least 1. Order 1 is the fundamental and is evaluated with
/// its own closed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HarmonicOrder(u32);

impl HarmonicOrder {
    /// The fundamental.
    pub const FUNDAMENTAL: HarmonicOrder = HarmonicOrder(1);

    /// Create an order, rejecting zero.
    pub fn new(order: u32) -> Result<Self> {
        if order == 0 {
            return Err(MainsError::InvalidHarmonicOrder { order });
        }
        Ok(Self(order))
    }

    /// Validate a list of raw orders, keeping the requested sequence.
    pub fn from_list(orders: &[u32]) -> Result<Vec<Self>> {
        orders.iter().map(|&n| Self::new(n)).collect()
    }

    /// The first `count` odd orders (1, 3, 5, ...).
    pub fn odd(count: usize) -> Vec<Self> {
        (0..count as u32).map(|k| Self(2 * k + 1)).collect()
    }

    /// Raw order value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Whether this is the fundamental.
    pub fn is_fundamental(&self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for HarmonicOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}
