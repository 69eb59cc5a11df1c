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

//! Error types for the Telnet engine

use crate::command::Verb;
use thiserror::Error;

/// Result type for engine operations
pub type TelnetResult<T> = Result<T, TelnetError>;

/// Errors raised by the Telnet engine.
///
/// Only [`TelnetError::Io`], [`TelnetError::PolicyDenied`] and [`TelnetError::AlreadyRegistered`]
/// are ever returned from public calls. Protocol violations and unexpected bytes are peer
/// misbehaviour the engine recovers from; they are built so they can be logged with full context.
#[derive(Debug, Error)]
pub enum TelnetError {
    /// The underlying transport failed. Timeouts set on the transport arrive here too.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A local request tried to enable an option its policy does not allow.
    #[error("{verb} {option} denied by option policy")]
    PolicyDenied {
        /// Debug name of the option
        option: String,
        /// Option code
        code: u8,
        /// The request that was refused
        verb: Verb,
    },

    /// The peer answered an outstanding request with the wrong command.
    #[error("{request} {option} answered by {received}")]
    ProtocolViolation {
        /// Debug name of the option
        option: String,
        /// Option code
        code: u8,
        /// The request still outstanding
        request: Verb,
        /// What the peer actually sent
        received: Verb,
    },

    /// A byte other than `IAC` or `SE` followed an `IAC` inside a subnegotiation.
    #[error("unexpected byte {byte:#04X} after IAC in subnegotiation")]
    UnexpectedByte {
        /// The offending byte
        byte: u8,
    },

    /// An option is already bound to this code.
    #[error("option code {code} already registered to {name}")]
    AlreadyRegistered {
        /// Option code
        code: u8,
        /// Debug name of the option holding the code
        name: String,
    },
}

impl TelnetError {
    /// Check if the error came from the transport
    pub fn is_transport_error(&self) -> bool {
        matches!(self, TelnetError::Io(_))
    }

    /// Check if the error is a negotiation error
    pub fn is_negotiation_error(&self) -> bool {
        matches!(
            self,
            TelnetError::PolicyDenied { .. } | TelnetError::ProtocolViolation { .. }
        )
    }
}

impl From<TelnetError> for std::io::Error {
    fn from(err: TelnetError) -> Self {
        match err {
            TelnetError::Io(err) => err,
            other => std::io::Error::other(other),
        }
    }
}
