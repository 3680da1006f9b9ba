//! Blocking HTTP transport for the webmail ajax endpoint.

use std::time::Duration;

use url::Url;

use crate::config::ServerConfig;
use crate::error::{Result, ViewError};
use crate::links::ServerLinks;
use crate::model::two_factor::{RemoteReply, StorageResultType, TwoFactorResponse};

use super::TwoFactorRemote;

/// Ajax action name of the two-factor test.
const TEST_TWO_FACTOR: &str = "TestTwoFactor";

/// Posts ajax actions to `<page_url>/?/Ajax/&q[]=/<hash>/`.
#[derive(Debug, Clone)]
pub struct AjaxRemote {
    client: reqwest::blocking::Client,
    endpoint: Url,
    token: Option<String>,
}

impl AjaxRemote {
    pub fn from_config(server: &ServerConfig) -> Result<Self> {
        let page = Url::parse(&server.page_url)?;
        let endpoint = page.join(&ServerLinks::from_config(server).ajax())?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs.max(1)))
            .build()
            .map_err(|e| ViewError::Remote(e.to_string()))?;

        tracing::debug!(endpoint = %endpoint, "Ajax remote configured");
        Ok(Self {
            client,
            endpoint,
            token: server.token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl TwoFactorRemote for AjaxRemote {
    fn test_two_factor(&self, code: &str) -> RemoteReply {
        let mut form = vec![("Action", TEST_TWO_FACTOR), ("Code", code)];
        if let Some(token) = &self.token {
            form.push(("XToken", token.as_str()));
        }

        let response = match self.client.post(self.endpoint.clone()).form(&form).send() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Two-factor request failed");
                return RemoteReply::failed(transport_status(&e));
            }
        };

        let http_ok = response.status().is_success();
        match response.text() {
            Ok(body) => decode_reply(http_ok, &body),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read two-factor response");
                RemoteReply::failed(transport_status(&e))
            }
        }
    }
}

fn transport_status(e: &reqwest::Error) -> StorageResultType {
    if e.is_timeout() {
        StorageResultType::Abort
    } else {
        StorageResultType::Error
    }
}

/// Turn an HTTP answer into a reply. Non-2xx answers and bodies that are not
/// a JSON object are errors.
pub fn decode_reply(http_ok: bool, body: &str) -> RemoteReply {
    if !http_ok {
        return RemoteReply::failed(StorageResultType::Error);
    }
    match serde_json::from_str::<TwoFactorResponse>(body) {
        Ok(data) => RemoteReply {
            status: StorageResultType::Success,
            data: Some(data),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Undecodable two-factor response");
            RemoteReply::failed(StorageResultType::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolution() {
        let server = ServerConfig {
            page_url: "https://mail.example.com/webmail/index.php".to_string(),
            ..ServerConfig::default()
        };
        let remote = AjaxRemote::from_config(&server).unwrap();
        assert_eq!(
            remote.endpoint().as_str(),
            "https://mail.example.com/webmail/?/Ajax/&q[]=/0/"
        );
    }

    #[test]
    fn test_invalid_page_url() {
        let server = ServerConfig {
            page_url: "::".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            AjaxRemote::from_config(&server),
            Err(ViewError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_decode_reply() {
        assert!(decode_reply(true, r#"{"Action":"TestTwoFactor","Result":true}"#).passed());
        let r = decode_reply(true, r#"{"Action":"TestTwoFactor","Result":false}"#);
        assert_eq!(r.status, StorageResultType::Success);
        assert!(!r.passed());
        let r = decode_reply(false, r#"{"Result":true}"#);
        assert_eq!(r.status, StorageResultType::Error);
        let r = decode_reply(true, "<html>oops</html>");
        assert_eq!(r.status, StorageResultType::Error);
        assert!(r.data.is_none());
    }
}
