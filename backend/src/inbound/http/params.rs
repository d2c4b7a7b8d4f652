//! Trigger parameter extraction.
//!
//! Both triggers accept their parameters either as a query string (`GET`) or as
//! a flat JSON object (`POST`). Keys are matched case-insensitively; JSON
//! scalars are taken as their textual form and `null` counts as absent.

use std::collections::HashMap;

use actix_web::HttpRequest;
use actix_web::http::Method;
use serde_json::{Map, Value};

use super::error::ApiError;

/// Case-folded parameter bag for one trigger invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerParams {
    values: HashMap<String, String>,
}

impl TriggerParams {
    /// Collect parameters from the query string and, for `POST`, the body.
    ///
    /// Body values override query values with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with `invalid_request` when a non-empty `POST`
    /// body is not a JSON object.
    pub fn extract(req: &HttpRequest, body: &[u8]) -> Result<Self, ApiError> {
        let mut params = Self::from_query(req.query_string());
        if req.method() == Method::POST {
            params.values.extend(Self::from_json(body)?.values);
        }
        Ok(params)
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    pub fn from_query(query: &str) -> Self {
        let values = url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.to_lowercase(), value.into_owned()))
            .collect();
        Self { values }
    }

    /// Parse a JSON object body; an empty body yields no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the body is not a JSON object.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let object: Map<String, Value> = serde_json::from_slice(body).map_err(|err| {
            ApiError::invalid_request(format!("request body must be a JSON object: {err}"))
        })?;
        let values = object
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                Some((key.to_lowercase(), text))
            })
            .collect();
        Ok(Self { values })
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of `name`, or `default` when absent.
    pub fn text_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or(default).to_owned()
    }

    /// Boolean parameter spelled `true` or `false` in any case.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the value is present but not a boolean.
    pub fn flag(&self, name: &str, default: bool) -> Result<bool, ApiError> {
        match self.get(name) {
            None => Ok(default),
            Some(value) => parse_flag(value).ok_or_else(|| {
                ApiError::invalid_request(format!("{name} must be true or false, got {value:?}"))
            }),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
