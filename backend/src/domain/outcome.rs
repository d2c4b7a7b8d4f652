//! Tagged result of one upstream call.
//!
//! An [`Outcome`] is built once the branch is known: `Success` holds the
//! decoded success payload, `Failure` the decoded upstream error payload.
//! Both carry the status of the response that ended the redirect chain.

use serde::{Serialize, Serializer};

/// HTTP status code and reason text of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    code: u16,
    text: String,
}

impl ResponseStatus {
    /// Create a status from a code and its reason text.
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    /// Numeric status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Reason text, possibly empty.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// `true` only for `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

/// Upstream result: a success payload or an upstream error payload.
///
/// ## Invariants
/// - [`Outcome::is_success`] is derived from the status code alone.
///
/// # Examples
/// ```
/// use dp_gateway::domain::{Outcome, ResponseStatus};
///
/// let outcome: Outcome<&str, ()> = Outcome::Success {
///     status: ResponseStatus::new(200, "OK"),
///     payload: "token",
/// };
/// assert!(outcome.is_success());
/// assert_eq!(outcome.success(), Some(&"token"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<S, E> {
    /// The upstream answered `200` with a well-formed success payload.
    Success {
        /// Final response status.
        status: ResponseStatus,
        /// Decoded success payload.
        payload: S,
    },
    /// The upstream answered with any other status.
    Failure {
        /// Final response status.
        status: ResponseStatus,
        /// Decoded upstream error payload.
        payload: E,
    },
}

impl<S, E> Outcome<S, E> {
    /// Status of the response that produced this outcome.
    pub fn status(&self) -> &ResponseStatus {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => status,
        }
    }

    /// `true` iff the final status code is 200.
    pub fn is_success(&self) -> bool {
        self.status().is_ok()
    }

    /// Success payload, if this is the success branch.
    pub fn success(&self) -> Option<&S> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Mutable success payload, if this is the success branch.
    pub fn success_mut(&mut self) -> Option<&mut S> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Upstream error payload, if this is the failure branch.
    pub fn failure(&self) -> Option<&E> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { payload, .. } => Some(payload),
        }
    }
}

/// Wire shape: the payload's fields flattened next to the status fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeEnvelope<'a, T> {
    #[serde(flatten)]
    payload: &'a T,
    http_status_code: u16,
    http_status_text: &'a str,
    is_success: bool,
}

impl<S: Serialize, E: Serialize> Serialize for Outcome<S, E> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let status = self.status();
        let is_success = self.is_success();
        match self {
            Self::Success { payload, .. } => OutcomeEnvelope {
                payload,
                http_status_code: status.code(),
                http_status_text: status.text(),
                is_success,
            }
            .serialize(serializer),
            Self::Failure { payload, .. } => OutcomeEnvelope {
                payload,
                http_status_code: status.code(),
                http_status_text: status.text(),
                is_success,
            }
            .serialize(serializer),
        }
    }
}
