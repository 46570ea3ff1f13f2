use js_sys::Float64Array;
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::console;

use crate::array::{ArrayDescriptor, ArrayError, MultiDimArray};
use crate::ops::elementwise::multiply_buffers;

#[cfg(target_arch = "wasm32")]
fn log_console(message: &str) {
    console::log_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn log_console(_message: &str) {}

fn to_js(e: ArrayError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_usize(values: &[u32]) -> Vec<usize> {
    values.iter().map(|&v| v as usize).collect()
}

/// Element-wise product of two equally long arrays.
#[wasm_bindgen]
pub fn elementwise_combine(a: &[f64], b: &[f64]) -> Result<Vec<f64>, JsValue> {
    if a.len() != b.len() {
        return Err(JsValue::from_str(&format!(
            "Operands differ in length: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    let mut result = vec![0.0; a.len()];
    multiply_buffers(a, b, &mut result);
    Ok(result)
}

#[wasm_bindgen]
pub struct WasmMultiDimArray {
    inner: MultiDimArray<f64>,
}

#[wasm_bindgen]
impl WasmMultiDimArray {
    #[wasm_bindgen(constructor)]
    pub fn new(shape: Vec<u32>) -> Result<WasmMultiDimArray, JsValue> {
        let inner = MultiDimArray::new(&to_usize(&shape)).map_err(|e| {
            log_console(&format!("Failed to allocate array {:?}: {}", shape, e));
            to_js(e)
        })?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = fromDescriptor)]
    pub fn from_descriptor(json: &str) -> Result<WasmMultiDimArray, JsValue> {
        let descriptor = ArrayDescriptor::from_json(json).map_err(to_js)?;
        let inner = MultiDimArray::from_descriptor(&descriptor).map_err(to_js)?;
        log_console(&format!(
            "Loaded array descriptor: shape {:?}, {:?}",
            inner.shape(),
            inner.order()
        ));
        Ok(Self { inner })
    }

    pub fn get(&self, indices: Vec<u32>) -> Result<f64, JsValue> {
        self.inner.get(&to_usize(&indices)).map_err(to_js)
    }

    pub fn set(&mut self, indices: Vec<u32>, value: f64) -> Result<(), JsValue> {
        self.inner.set(&to_usize(&indices), value).map_err(to_js)
    }

    pub fn shape(&self) -> Vec<u32> {
        self.inner.shape().iter().map(|&d| d as u32).collect()
    }

    pub fn data(&self) -> Float64Array {
        Float64Array::from(self.inner.as_slice())
    }

    pub fn combine(&self, rhs: &WasmMultiDimArray) -> Result<WasmMultiDimArray, JsValue> {
        let inner = self.inner.combine(&rhs.inner).map_err(to_js)?;
        Ok(Self { inner })
    }

    pub fn descriptor(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.to_descriptor())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize descriptor: {}", e)))
    }
}
