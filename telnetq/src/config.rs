//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Connection context configuration
//!
//! ```
//! use telnetq::ContextConfig;
//!
//! let config = ContextConfig::default()
//!     .with_peek_size(64)
//!     .with_ayt_reply("[Yes]\r\n")
//!     .with_span(tracing::info_span!("telnet", peer = "127.0.0.1:50123"));
//! ```

use tracing::Span;

/// Raw bytes pulled by an empty-buffer read
pub const DEFAULT_PEEK_SIZE: usize = 16;

/// Subnegotiation payload limit
pub const DEFAULT_MAX_SUBNEGOTIATION_LEN: usize = 8192;

/// Reply written when the peer sends `IAC AYT`
pub const DEFAULT_AYT_REPLY: &[u8] = b"I am here";

/// Settings for a [`Context`](crate::Context).
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Number of raw bytes a peek (empty-buffer read) pulls from the transport
    pub peek_size: usize,

    /// Literal bytes written back in answer to `IAC AYT`
    pub ayt_reply: Vec<u8>,

    /// Longest subnegotiation payload delivered to an option; longer ones are dropped
    pub max_subnegotiation_len: usize,

    /// Span entered by every context operation. Events from the engine are recorded
    /// inside it, so this is where a connection's log output gets routed and labelled.
    pub span: Span,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            peek_size: DEFAULT_PEEK_SIZE,
            ayt_reply: DEFAULT_AYT_REPLY.to_vec(),
            max_subnegotiation_len: DEFAULT_MAX_SUBNEGOTIATION_LEN,
            span: Span::none(),
        }
    }
}

impl ContextConfig {
    /// Set the peek size, at least one byte
    pub fn with_peek_size(mut self, size: usize) -> Self {
        self.peek_size = size.max(1);
        self
    }

    /// Set the reply to `IAC AYT`
    pub fn with_ayt_reply(mut self, reply: impl Into<Vec<u8>>) -> Self {
        self.ayt_reply = reply.into();
        self
    }

    /// Set the subnegotiation payload limit
    pub fn with_max_subnegotiation_len(mut self, limit: usize) -> Self {
        self.max_subnegotiation_len = limit;
        self
    }

    /// Set the span the context logs under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ContextConfig::default();
        assert_eq!(config.peek_size, 16);
        assert_eq!(config.ayt_reply, b"I am here");
        assert_eq!(config.max_subnegotiation_len, 8192);
        assert!(config.span.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ContextConfig::default()
            .with_peek_size(0)
            .with_ayt_reply("yes")
            .with_max_subnegotiation_len(32);
        assert_eq!(config.peek_size, 1);
        assert_eq!(config.ayt_reply, b"yes");
        assert_eq!(config.max_subnegotiation_len, 32);
    }
}
