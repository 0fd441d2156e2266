//! The page-side helper RPC surface and the simulated input channel
//!
//! Everything the synchronization engine knows about the live UI goes through two traits:
//! [`UiOracle`] for calling the injected helper procedures, and [`InputDevice`] for
//! emitting user input. The Chrome-backed implementation lives in [`crate::browser`].

pub mod call;
pub mod input;

pub use call::{HELPER_NAMESPACE, HELPER_PROTOCOL_VERSION, HelperCall, HelperCatalog, HelperSignature, ReturnKind};
pub use input::{InputDevice, Key};

use crate::error::{BrowserError, Result};
use crate::query::ElementHandle;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Synchronous access to the page-side helper procedures
///
/// Each call blocks until the page answers. "Not found" is reported through null or
/// false sentinels rather than errors.
pub trait UiOracle {
    /// Invoke a helper and return its raw JSON result
    fn call(&self, call: &HelperCall) -> Result<Value>;

    fn call_bool(&self, call: &HelperCall) -> Result<bool> {
        match self.call(call)? {
            Value::Null => Ok(false),
            Value::Bool(flag) => Ok(flag),
            other => Err(unexpected(call, "a boolean", &other)),
        }
    }

    fn call_count(&self, call: &HelperCall) -> Result<u64> {
        match self.call(call)? {
            Value::Null => Ok(0),
            Value::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
                .ok_or_else(|| unexpected(call, "a non-negative count", &Value::Number(number))),
            other => Err(unexpected(call, "a count", &other)),
        }
    }

    fn call_handle(&self, call: &HelperCall) -> Result<Option<ElementHandle>> {
        match self.call(call)? {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::String(id) if id.is_empty() => Ok(None),
            Value::String(id) => Ok(Some(ElementHandle::new(id))),
            other => Err(unexpected(call, "an element id", &other)),
        }
    }

    fn call_handles(&self, call: &HelperCall) -> Result<Vec<ElementHandle>> {
        match self.call(call)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(ids) => ids
                .into_iter()
                .map(|id| match id {
                    Value::String(id) => Ok(ElementHandle::new(id)),
                    other => Err(unexpected(call, "an element id", &other)),
                })
                .collect(),
            other => Err(unexpected(call, "an array of element ids", &other)),
        }
    }

    fn call_unit(&self, call: &HelperCall) -> Result<()> {
        self.call(call).map(|_| ())
    }
}

/// Deserialize a helper result, treating null as `None`
pub fn decode<T: DeserializeOwned>(call: &HelperCall, value: Value) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| BrowserError::helper_protocol(call.name(), format!("Failed to decode result: {}", e)))
}

fn unexpected(call: &HelperCall, expected: &str, got: &Value) -> BrowserError {
    BrowserError::helper_protocol(call.name(), format!("Expected {}, got {}", expected, got))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Value);

    impl UiOracle for Fixed {
        fn call(&self, _call: &HelperCall) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_null_sentinels() {
        let oracle = Fixed(Value::Null);
        assert!(!oracle.call_bool(&HelperCall::IsAjaxInProgress).unwrap());
        assert_eq!(oracle.call_count(&HelperCall::IsAjaxInProgress).unwrap(), 0);
        assert!(oracle.call_handle(&HelperCall::IsAjaxInProgress).unwrap().is_none());
        assert!(oracle.call_handles(&HelperCall::IsAjaxInProgress).unwrap().is_empty());
    }

    #[test]
    fn test_count_accepts_integral_floats() {
        let oracle = Fixed(json!(3.0));
        assert_eq!(oracle.call_count(&HelperCall::IsAjaxInProgress).unwrap(), 3);
    }

    #[test]
    fn test_handles_decode() {
        let oracle = Fixed(json!(["button-1", "button-2"]));
        let handles = oracle.call_handles(&HelperCall::IsAjaxInProgress).unwrap();
        assert_eq!(handles, vec![ElementHandle::new("button-1"), ElementHandle::new("button-2")]);
    }

    #[test]
    fn test_wrong_shape_is_protocol_error() {
        let oracle = Fixed(json!({"oops": true}));
        let err = oracle.call_bool(&HelperCall::IsAjaxInProgress).unwrap_err();
        assert!(matches!(err, BrowserError::HelperProtocol { ref helper, .. } if helper == "isAjaxInProgress"));
    }

    #[test]
    fn test_decode_null_is_none() {
        let decoded: Option<Vec<u32>> = decode(&HelperCall::IsAjaxInProgress, Value::Null).unwrap();
        assert!(decoded.is_none());
    }
}
