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

//! Terminal Type (RFC 1091)

use std::sync::{PoisonError, RwLock};
use telnetq::consts::option;
use telnetq::{Context, TelnetOption, TelnetResult};
use tracing::debug;

/// Subnegotiation code carrying a terminal name
const IS: u8 = 0;
/// Subnegotiation code requesting a terminal name
const SEND: u8 = 1;

/// The Terminal-Type option, server side.
///
/// The peer may enable it; we never offer it. Once the peer agrees, `SEND` is requested and
/// the name from its `IS` reply becomes available through [`terminal`](TerminalType::terminal).
#[derive(Debug, Default)]
pub struct TerminalType {
    terminal: RwLock<Option<String>>,
}

impl TerminalType {
    /// Option code
    pub const CODE: u8 = option::TTYPE;

    /// Creates the option with no terminal reported.
    pub fn new() -> TerminalType {
        TerminalType::default()
    }

    /// The terminal name the peer last reported, if any.
    pub fn terminal(&self) -> Option<String> {
        self.terminal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TelnetOption for TerminalType {
    fn code(&self) -> u8 {
        TerminalType::CODE
    }

    fn name(&self) -> &str {
        "Terminal-Type"
    }

    fn may_enable_him(&self) -> bool {
        true
    }

    fn may_enable_us(&self) -> bool {
        false
    }

    fn on_subnegotiation(&self, _ctx: &Context, params: &[u8]) -> TelnetResult<()> {
        match params {
            [IS, name @ ..] if !name.is_empty() => {
                let name = String::from_utf8_lossy(name).into_owned();
                debug!(terminal = %name, "Terminal type reported");
                *self
                    .terminal
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(name);
            }
            _ => debug!(?params, "Ignoring terminal type parameters"),
        }
        Ok(())
    }

    fn on_him_changed(&self, ctx: &Context, enabled: bool) -> TelnetResult<()> {
        if enabled {
            ctx.send_subnegotiation(TerminalType::CODE, &[SEND])?;
        }
        Ok(())
    }
}
