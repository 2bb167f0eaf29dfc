use crate::error::{Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// A body is a failure when it carries a non-zero numeric `status` and no `data`.
pub fn is_failure(body: &Value) -> bool {
    if body.get("data").is_some() {
        return false;
    }
    body.get("status")
        .and_then(Value::as_u64)
        .is_some_and(|status| status != 0)
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Links {
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: T,
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug)]
pub enum Envelope<T> {
    Success(Page<T>),
    Failure { status: u16 },
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Classify a decoded body received with the given HTTP status.
    ///
    /// Anything other than 200 is a failure regardless of the body.
    pub fn classify(status: StatusCode, body: Value) -> Result<Self> {
        if status != StatusCode::OK {
            return Ok(Envelope::Failure {
                status: status.as_u16(),
            });
        }
        if is_failure(&body) {
            let status = body
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(status.as_u16());
            return Ok(Envelope::Failure { status });
        }
        Ok(Envelope::Success(serde_json::from_value(body)?))
    }
}

impl<T> Envelope<T> {
    /// Unwrap the payload, or turn a failure into a provider error for `call`
    pub fn into_data(self, call: &Call) -> Result<T> {
        match self {
            Envelope::Success(page) => Ok(page.data),
            Envelope::Failure { status } => {
                warn!(operation = call.operation, status, "Investec returned a failure");
                Err(call.failed(status))
            }
        }
    }
}

/// Identifies an API call in errors and logs
#[derive(Debug, Clone)]
pub struct Call {
    pub operation: &'static str,
    params: Vec<(&'static str, String)>,
}

impl Call {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            params: Vec::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    fn context(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" ({})", pairs)
    }

    pub fn failed(&self, status: u16) -> Error {
        Error::Provider {
            operation: self.operation,
            context: self.context(),
            status,
        }
    }

    /// The provider accepted the request but refused to act on it
    pub fn rejected(&self, message: impl Into<String>) -> Error {
        Error::Rejected {
            operation: self.operation,
            context: self.context(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_only_is_failure() {
        assert!(is_failure(&json!({ "status": 404 })));
    }

    #[test]
    fn test_data_is_success() {
        let body = json!({
            "data": { "accounts": [] },
            "links": { "self": "https://openapi.investec.com/za/pb/v1/accounts" },
            "meta": { "totalPages": 1 }
        });
        assert!(!is_failure(&body));
    }

    #[test]
    fn test_zero_status_is_not_failure() {
        assert!(!is_failure(&json!({ "status": 0 })));
    }

    #[test]
    fn test_classify_non_200() {
        let envelope: Envelope<Value> =
            Envelope::classify(StatusCode::INTERNAL_SERVER_ERROR, json!({})).unwrap();
        assert!(matches!(envelope, Envelope::Failure { status: 500 }));
    }

    #[test]
    fn test_classify_status_body_with_200() {
        let envelope: Envelope<Value> =
            Envelope::classify(StatusCode::OK, json!({ "status": 401 })).unwrap();
        assert!(matches!(envelope, Envelope::Failure { status: 401 }));
    }

    #[test]
    fn test_classify_success_keeps_metadata() {
        let body = json!({
            "data": { "currency": "ZAR" },
            "links": { "self": null },
            "meta": { "totalPages": 3 }
        });
        let envelope: Envelope<Value> = Envelope::classify(StatusCode::OK, body).unwrap();
        let Envelope::Success(page) = envelope else {
            panic!("expected success");
        };
        assert_eq!(page.meta.total_pages, Some(3));
        assert_eq!(page.links.self_link, None);
        assert_eq!(page.data["currency"], "ZAR");
    }

    #[test]
    fn test_failure_carries_call_context() {
        let call = Call::new("get balance").with("account_id", "A1");
        let envelope: Envelope<Value> = Envelope::Failure { status: 404 };
        let err = envelope.into_data(&call).unwrap_err();
        match err {
            Error::Provider {
                operation,
                context,
                status,
            } => {
                assert_eq!(operation, "get balance");
                assert_eq!(context, " (account_id=A1)");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
