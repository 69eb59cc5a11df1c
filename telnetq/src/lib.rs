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

//! # Telnet with Q-method Option Negotiation
//!
//! This crate speaks the Telnet protocol (RFC 854) over any duplex byte stream and negotiates
//! options per RFC 855 using the RFC 1143 "Q method", which keeps negotiation deterministic and
//! free of loops no matter how requests from both ends interleave.
//!
//! ## Core Components
//!
//! ### [`Context`]
//!
//! The connection. Wraps a [`Transport`], hands application data to [`Context::read`], escapes
//! [`Context::write`], answers the peer's negotiation and sends our own
//! ([`Context::ask_him`], [`Context::ask_us`]).
//!
//! ### [`TelnetOption`]
//!
//! The capability contract an option implements: its code, a policy for which side may enable
//! it, and callbacks for confirmed state changes and subnegotiation parameters. Codes without a
//! registered option politely refuse every negotiation.
//!
//! ### [`FrameCodec`]
//!
//! The sans-IO framing layer, a `tokio_util` [`Decoder`](tokio_util::codec::Decoder) /
//! [`Encoder`](tokio_util::codec::Encoder) over [`Frame`]s. [`Context`] drives it from blocking
//! reads; it works equally well under `Framed` on an async stream.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::net::TcpListener;
//! use std::sync::Arc;
//! use telnetq::{Context, TelnetOption, TelnetResult, consts};
//!
//! struct SuppressGoAhead;
//!
//! impl TelnetOption for SuppressGoAhead {
//!     fn code(&self) -> u8 { consts::option::SGA }
//!     fn name(&self) -> &str { "Suppress Go Ahead" }
//!     fn may_enable_him(&self) -> bool { true }
//!     fn may_enable_us(&self) -> bool { true }
//! }
//!
//! # fn main() -> TelnetResult<()> {
//! let listener = TcpListener::bind("127.0.0.1:8023")?;
//! let (stream, _) = listener.accept()?;
//! let ctx = Context::new(Arc::new(stream), vec![Arc::new(SuppressGoAhead)]);
//! ctx.ask_us(consts::option::SGA, true)?;
//!
//! let mut buf = [0; 1024];
//! let n = ctx.read(&mut buf)?;
//! ctx.write(&buf[..n])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Protocol Details
//!
//! - 2-byte commands: `IAC <command>` (e.g., `IAC NOP`)
//! - 3-byte negotiation: `IAC <DO|DONT|WILL|WONT> <option>`
//! - Subnegotiation: `IAC SB <option> <data...> IAC SE`
//! - A literal 0xFF in data or subnegotiation parameters is sent as `IAC IAC`
//!
//! ## Logging
//!
//! Diagnostics are emitted through `tracing` inside the span set with
//! [`ContextConfig::with_span`]. Nothing is printed unless the application installs a
//! subscriber.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 1143: The Q Method of Implementing TELNET Option Negotiation

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

mod codec;
mod command;
mod config;
pub mod consts;
mod context;
mod frame;
mod negotiation;
mod option;
mod registry;
mod result;
mod transport;

pub use self::codec::{FrameCodec, ReaderState};
pub use self::command::{Command, Verb};
pub use self::config::{
    ContextConfig, DEFAULT_AYT_REPLY, DEFAULT_MAX_SUBNEGOTIATION_LEN, DEFAULT_PEEK_SIZE,
};
pub use self::context::Context;
pub use self::frame::Frame;
pub use self::negotiation::{NegotiationState, Party};
pub use self::option::TelnetOption;
pub use self::result::{TelnetError, TelnetResult};
pub use self::transport::Transport;
