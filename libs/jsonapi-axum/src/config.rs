//! Gateway configuration, fixed at startup.

use serde::{Deserialize, Serialize};

/// Immutable gateway settings, built once at process start and injected into
/// the middleware pipeline at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Program name stamped on every logged error document.
    #[serde(default = "default_progname")]
    pub progname: String,
}

impl GatewayConfig {
    /// Static-file serving stays off: the gateway speaks JSON:API only and a
    /// file response could never satisfy the negotiated media type.
    pub const STATIC_FILES: bool = false;

    /// Session/CSRF request protections stay off: they rewrite requests and
    /// responses in ways that break the media-type contract.
    pub const REQUEST_PROTECTION: bool = false;

    pub fn new(progname: impl Into<String>) -> Self {
        Self {
            progname: progname.into(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            progname: default_progname(),
        }
    }
}

fn default_progname() -> String {
    "jsonapi".to_owned()
}
