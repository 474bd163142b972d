use handlebars::Helper;
use serde_json::Value as Json;

use crate::error::HelperError;
use crate::values;

/// Positional and named arguments of one helper invocation.
///
/// A parameter that was not supplied and a parameter whose path did not
/// resolve are both reported as absent, mirroring `undefined`.
pub struct Params<'h, 'rc> {
    name: &'static str,
    helper: &'h Helper<'rc>,
}

impl<'h, 'rc> Params<'h, 'rc> {
    pub fn new(name: &'static str, helper: &'h Helper<'rc>) -> Self {
        Self { name, helper }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, index: usize) -> Option<&'h Json> {
        self.helper
            .param(index)
            .filter(|param| !param.is_value_missing())
            .map(|param| param.value())
    }

    pub fn required(&self, index: usize) -> Result<&'h Json, HelperError> {
        self.get(index).ok_or(HelperError::MissingParam {
            helper: self.name,
            index,
        })
    }

    pub fn string(&self, index: usize) -> Result<String, HelperError> {
        self.required(index).map(values::to_js_string)
    }

    pub fn opt_string(&self, index: usize) -> Option<String> {
        self.get(index).map(values::to_js_string)
    }

    pub fn number(&self, index: usize) -> Result<f64, HelperError> {
        self.required(index).map(values::to_number)
    }

    pub fn opt_number(&self, index: usize) -> Option<f64> {
        self.get(index).map(values::to_number)
    }

    pub fn array(&self, index: usize) -> Result<&'h [Json], HelperError> {
        match self.required(index)? {
            Json::Array(items) => Ok(items),
            other => Err(self.invalid(index, "an array", other)),
        }
    }

    pub fn hash(&self, key: &str) -> Option<&'h Json> {
        self.helper
            .hash_get(key)
            .filter(|param| !param.is_value_missing())
            .map(|param| param.value())
    }

    /// Named arguments in key order.
    pub fn hash_entries(&self) -> Vec<(&'h str, &'h Json)> {
        self.helper
            .hash()
            .iter()
            .map(|(key, param)| (*key, param.value()))
            .collect()
    }

    pub fn invalid(&self, index: usize, expected: &'static str, found: &Json) -> HelperError {
        HelperError::InvalidParam {
            helper: self.name,
            index,
            expected,
            found: values::type_name(found),
        }
    }
}
