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

use crate::{Context, TelnetResult};

///
/// Capability contract for a negotiable Telnet option.
///
/// The engine stores options and calls them, it never constructs them. Each callback runs
/// with the engine lock released, so an implementation may call back into the [`Context`]
/// (`ask_*`, `write`, `send_subnegotiation`). It must not call [`Context::read`], which is
/// the operation delivering the callback.
///
/// Methods take `&self`; options that track state keep it behind atomics or locks and are
/// shared with the application through an `Arc`.
///
pub trait TelnetOption: Send + Sync {
    /// RFC855 option code.
    fn code(&self) -> u8;

    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether the peer may enable the option on its side.
    ///
    /// Consulted when a `No` state is about to move towards `Yes` for him.
    fn may_enable_him(&self) -> bool;

    /// Whether we are willing to enable the option on our side.
    fn may_enable_us(&self) -> bool;

    /// The option's parameters arrived in a subnegotiation.
    fn on_subnegotiation(&self, _ctx: &Context, _params: &[u8]) -> TelnetResult<()> {
        Ok(())
    }

    /// The peer's side of the option was confirmed enabled or disabled.
    fn on_him_changed(&self, _ctx: &Context, _enabled: bool) -> TelnetResult<()> {
        Ok(())
    }

    /// Our side of the option was confirmed enabled or disabled.
    fn on_us_changed(&self, _ctx: &Context, _enabled: bool) -> TelnetResult<()> {
        Ok(())
    }
}

impl std::fmt::Debug for dyn TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

/// Stand-in for option codes nobody registered: refuses every negotiation and ignores
/// subnegotiations.
#[derive(Clone, Debug)]
pub(crate) struct NoOption {
    code: u8,
    name: String,
}

impl NoOption {
    pub(crate) fn new(code: u8) -> NoOption {
        NoOption {
            code,
            name: format!("Unknown-{code}"),
        }
    }
}

impl TelnetOption for NoOption {
    fn code(&self) -> u8 {
        self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn may_enable_him(&self) -> bool {
        false
    }

    fn may_enable_us(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_option_refuses_everything() {
        let option = NoOption::new(42);
        assert_eq!(option.code(), 42);
        assert_eq!(option.name(), "Unknown-42");
        assert!(!option.may_enable_him());
        assert!(!option.may_enable_us());
    }
}
