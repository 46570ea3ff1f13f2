use serde::{Deserialize, Serialize};

use super::error::{ArrayError, Result};
use super::layout::MemoryOrder;
use super::multi_dim::MultiDimArray;

/// JSON form of an `f64` array.
///
/// ```json
/// { "shape": [2, 2], "order": "rowMajor", "data": [1.0, 2.0, 3.0, 4.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayDescriptor {
    pub shape: Vec<usize>,
    #[serde(default)]
    pub order: MemoryOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<f64>>,
}

impl ArrayDescriptor {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl MultiDimArray<f64> {
    /// Builds an array from `descriptor`. Explicit `data` wins over
    /// `init_value`; with neither the array is zero-filled.
    pub fn from_descriptor(descriptor: &ArrayDescriptor) -> Result<Self> {
        let mut array = match &descriptor.data {
            Some(data) => MultiDimArray::from_vec(data.clone(), &descriptor.shape)?,
            None => {
                let mut array = MultiDimArray::new(&descriptor.shape)?;
                if let Some(value) = descriptor.init_value {
                    if array.is_empty() {
                        return Err(ArrayError::Descriptor(
                            "initValue given for an empty shape".to_string(),
                        ));
                    }
                    array.init_value(value)?;
                }
                array
            }
        };
        array.set_order(descriptor.order);
        Ok(array)
    }

    pub fn to_descriptor(&self) -> ArrayDescriptor {
        ArrayDescriptor {
            shape: self.shape().to_vec(),
            order: self.order(),
            init_value: None,
            data: Some(self.as_slice().to_vec()),
        }
    }
}
