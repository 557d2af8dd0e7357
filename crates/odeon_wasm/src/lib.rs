//! WASM bridge for the Odeon core library.
//!
//! Exposes the solve pipeline to JavaScript behind a single solver handle.
//! Results cross the boundary as serialized JS objects; errors become JS
//! string values ready for direct display.

use odeon_core::roots::DurandKernerSettings;
use wasm_bindgen::prelude::*;

mod solve;

/// Browser-facing solver handle carrying the iteration settings picked by
/// the UI.
#[wasm_bindgen]
pub struct WasmOdeSolver {
    settings: DurandKernerSettings,
}

#[wasm_bindgen]
impl WasmOdeSolver {
    #[wasm_bindgen(constructor)]
    pub fn new(max_iterations: u32, tolerance: f64) -> WasmOdeSolver {
        console_error_panic_hook::set_once();
        WasmOdeSolver {
            settings: DurandKernerSettings {
                max_iterations: max_iterations as usize,
                tolerance,
            },
        }
    }

    /// Solver with the default iteration budget and tolerance.
    pub fn with_defaults() -> WasmOdeSolver {
        console_error_panic_hook::set_once();
        WasmOdeSolver {
            settings: DurandKernerSettings::default(),
        }
    }
}
