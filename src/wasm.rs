//! WASM bindings for Mains Core.
//!
//! This module provides JavaScript-friendly bindings for browser front ends
//! that chart the results.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmNetwork, harmonic_amplitudes } from 'mains_core';
//!
//! await init();
//!
//! const net = new WasmNetwork(`
//!   .voltage 127
//!   A tv 332.56
//!   B airfryer 10.75
//!   C computer 21.51
//! `);
//! const [re, im] = net.neutral_current();
//!
//! // Row-major: one row of `points` amplitudes per order
//! const table = harmonic_amplitudes([1, 3, 5], 100, 221.11);
//! ```

use num_complex::Complex64;
use wasm_bindgen::prelude::*;

use crate::harmonics::HarmonicConfig;
use crate::scenario::{self, Scenario};
use crate::solver::NetworkSolution;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn pair(value: Complex64) -> Vec<f64> {
    vec![value.re, value.im]
}

/// A solved installation exposed to JavaScript.
///
/// Complex results are returned as `[re, im]` arrays.
#[wasm_bindgen]
pub struct WasmNetwork {
    solution: NetworkSolution,
}

#[wasm_bindgen]
impl WasmNetwork {
    /// Parse a scenario description and solve it.
    ///
    /// # Returns
    /// A solved network or an error string if the scenario is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(scenario_text: &str) -> Result<WasmNetwork, JsValue> {
        let scenario =
            scenario::parse(scenario_text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::solve(&scenario)
    }

    /// Solve the built-in reference installation.
    #[wasm_bindgen]
    pub fn reference() -> Result<WasmNetwork, JsValue> {
        Self::solve(&Scenario::reference())
    }

    fn solve(scenario: &Scenario) -> Result<WasmNetwork, JsValue> {
        let solution = scenario
            .solve()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmNetwork { solution })
    }

    /// Phase currents and load current, flattened as `[re, im]` × 4.
    #[wasm_bindgen]
    pub fn currents(&self) -> Vec<f64> {
        self.solution
            .currents
            .as_array()
            .iter()
            .flat_map(|c| [c.re, c.im])
            .collect()
    }

    /// Neutral current as `[re, im]`.
    #[wasm_bindgen]
    pub fn neutral_current(&self) -> Vec<f64> {
        pair(self.solution.derived.neutral_current)
    }

    /// Neutral voltage drop as `[re, im]`.
    #[wasm_bindgen]
    pub fn neutral_voltage_drop(&self) -> Vec<f64> {
        pair(self.solution.derived.neutral_voltage_drop)
    }

    /// Load voltage as `[re, im]`.
    #[wasm_bindgen]
    pub fn load_voltage(&self) -> Vec<f64> {
        pair(self.solution.derived.load_voltage)
    }
}

/// Harmonic amplitudes over a 0 to 90 degree sweep, row-major by order.
#[wasm_bindgen]
pub fn harmonic_amplitudes(
    orders: Vec<u32>,
    points: usize,
    base_voltage: f64,
) -> Result<Vec<f64>, JsValue> {
    let table = HarmonicConfig::new()
        .with_orders(orders)
        .with_points(points)
        .with_base_voltage(base_voltage)
        .evaluate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(table.curves.into_iter().flat_map(|c| c.amplitudes).collect())
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
