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

//! Echo (RFC 857)

use std::sync::atomic::{AtomicBool, Ordering};
use telnetq::consts::option;
use telnetq::{Context, TelnetOption, TelnetResult};

/// The Echo option.
///
/// Either side may echo, but never both at once: with both enabled every character would
/// bounce between the two ends forever. The policy therefore refuses to enable one direction
/// while the other is enabled.
#[derive(Debug, Default)]
pub struct Echo {
    us: AtomicBool,
    him: AtomicBool,
}

impl Echo {
    /// Option code
    pub const CODE: u8 = option::ECHO;

    /// Creates the option with both directions off.
    pub fn new() -> Echo {
        Echo::default()
    }

    /// Whether we echo the peer's input.
    pub fn us(&self) -> bool {
        self.us.load(Ordering::SeqCst)
    }

    /// Whether the peer echoes our output.
    pub fn him(&self) -> bool {
        self.him.load(Ordering::SeqCst)
    }
}

impl TelnetOption for Echo {
    fn code(&self) -> u8 {
        Echo::CODE
    }

    fn name(&self) -> &str {
        "Echo"
    }

    fn may_enable_him(&self) -> bool {
        !self.us()
    }

    fn may_enable_us(&self) -> bool {
        !self.him()
    }

    fn on_him_changed(&self, _ctx: &Context, enabled: bool) -> TelnetResult<()> {
        self.him.store(enabled, Ordering::SeqCst);
        Ok(())
    }

    fn on_us_changed(&self, _ctx: &Context, enabled: bool) -> TelnetResult<()> {
        self.us.store(enabled, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_identity() {
        let echo = Echo::new();
        assert_eq!(echo.code(), 1);
        assert_eq!(echo.name(), "Echo");
    }

    #[test]
    fn test_echo_directions_exclusive() {
        let echo = Echo::new();
        assert!(echo.may_enable_him());
        assert!(echo.may_enable_us());

        echo.us.store(true, Ordering::SeqCst);
        assert!(!echo.may_enable_him());
        assert!(echo.may_enable_us());

        echo.us.store(false, Ordering::SeqCst);
        echo.him.store(true, Ordering::SeqCst);
        assert!(echo.may_enable_him());
        assert!(!echo.may_enable_us());
    }
}
