//! Two-factor test call: result status and response payload.

use serde::{Deserialize, Serialize};

use super::attachment::truthy;

/// Outcome of a remote call, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageResultType {
    Success,
    Abort,
    Error,
    Unload,
}

impl std::fmt::Display for StorageResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Abort => "abort",
            Self::Error => "error",
            Self::Unload => "unload",
        };
        f.write_str(s)
    }
}

/// Response payload of the `TestTwoFactor` action.
///
/// `{"Action": "TestTwoFactor", "Result": true}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoFactorResponse {
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Result", deserialize_with = "truthy_field")]
    pub result: bool,
    #[serde(rename = "ErrorCode", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
}

fn truthy_field<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(truthy(&serde_json::Value::deserialize(d)?))
}

/// What the transport hands back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReply {
    pub status: StorageResultType,
    pub data: Option<TwoFactorResponse>,
}

impl RemoteReply {
    pub fn success(result: bool) -> Self {
        Self {
            status: StorageResultType::Success,
            data: Some(TwoFactorResponse {
                action: "TestTwoFactor".to_string(),
                result,
                error_code: None,
            }),
        }
    }

    pub fn failed(status: StorageResultType) -> Self {
        Self { status, data: None }
    }

    /// The test passed only on a successful call whose payload says so.
    pub fn passed(&self) -> bool {
        self.status == StorageResultType::Success
            && self.data.as_ref().is_some_and(|d| d.result)
    }
}
