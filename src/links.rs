//! Server link construction.
//!
//! Attachment links are keyed by the opaque download token the server sends
//! with every attachment record. The layout mirrors the webmail server's
//! query-string router:
//!
//! `./?/Raw/&q[]=/0/Download/&q[]=/<token>`

use url::Url;

use crate::config::ServerConfig;
use crate::error::Result;

/// Query-string segment separator understood by the server router.
const SUB_QUERY: &str = "&q[]=";

/// Builds the URLs attachment views link to.
pub trait LinkBuilder: Send + Sync {
    fn attachment_download(&self, download: &str) -> String;
    fn attachment_preview(&self, download: &str) -> String;
    fn attachment_thumbnail_preview(&self, download: &str) -> String;
    fn attachment_framed(&self, download: &str) -> String;
    fn attachment_preview_as_plain(&self, download: &str) -> String;
}

/// Links relative to the webmail server, e.g. `./?/Raw/&q[]=/0/View/&q[]=/<token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLinks {
    server: String,
    account_hash: String,
}

impl Default for ServerLinks {
    fn default() -> Self {
        Self::new("./?", "0")
    }
}

impl ServerLinks {
    pub fn new(server: impl Into<String>, account_hash: impl Into<String>) -> Self {
        let account_hash = account_hash.into();
        Self {
            server: server.into(),
            account_hash: if account_hash.is_empty() {
                "0".to_string()
            } else {
                account_hash
            },
        }
    }

    pub fn from_config(server: &ServerConfig) -> Self {
        Self::new(&server.server_prefix, &server.account_hash)
    }

    /// Endpoint for ajax actions (POST).
    pub fn ajax(&self) -> String {
        format!("{}/Ajax/{SUB_QUERY}/{}/", self.server, self.account_hash)
    }

    fn raw(&self, action: &str, download: &str) -> String {
        format!(
            "{}/Raw/{SUB_QUERY}/{}/{action}/{SUB_QUERY}/{download}",
            self.server, self.account_hash
        )
    }
}

impl LinkBuilder for ServerLinks {
    fn attachment_download(&self, download: &str) -> String {
        self.raw("Download", download)
    }

    fn attachment_preview(&self, download: &str) -> String {
        self.raw("View", download)
    }

    fn attachment_thumbnail_preview(&self, download: &str) -> String {
        self.raw("ViewThumbnail", download)
    }

    fn attachment_framed(&self, download: &str) -> String {
        self.raw("FramedView", download)
    }

    fn attachment_preview_as_plain(&self, download: &str) -> String {
        self.raw("ViewAsPlain", download)
    }
}

/// The location of the page hosting the client (`protocol`, `host`, `pathname`
/// as a browser reports them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme including the trailing colon, e.g. `"https:"`.
    pub protocol: String,
    /// Host name with the port when it is not the scheme default.
    pub host: String,
    /// Path starting with `/`.
    pub pathname: String,
}

impl PageLocation {
    /// Parse a page URL such as `https://mail.example.com:8443/webmail/`.
    pub fn parse(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url)?;
        let host = match (url.host_str(), url.port()) {
            (Some(h), Some(port)) => format!("{h}:{port}"),
            (Some(h), None) => h.to_string(),
            (None, _) => String::new(),
        };
        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            host,
            pathname: url.path().to_string(),
        })
    }

    /// `protocol//host/pathname`, the prefix relative links are appended to.
    pub fn prefix(&self) -> String {
        format!("{}//{}{}", self.protocol, self.host, self.pathname)
    }

    /// Make `link` absolute unless it already starts with `http`.
    pub fn absolutize(&self, link: &str) -> String {
        if link.starts_with("http") {
            link.to_string()
        } else {
            format!("{}{link}", self.prefix())
        }
    }
}
