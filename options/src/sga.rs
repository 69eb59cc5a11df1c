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

//! Suppress Go Ahead (RFC 858)

use telnetq::TelnetOption;
use telnetq::consts::option;

/// The Suppress-Go-Ahead option. Both sides may enable it and no state is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuppressGoAhead;

impl SuppressGoAhead {
    /// Option code
    pub const CODE: u8 = option::SGA;
}

impl TelnetOption for SuppressGoAhead {
    fn code(&self) -> u8 {
        SuppressGoAhead::CODE
    }

    fn name(&self) -> &str {
        "Suppress Go Ahead"
    }

    fn may_enable_him(&self) -> bool {
        true
    }

    fn may_enable_us(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sga_permits_both() {
        assert_eq!(SuppressGoAhead.code(), 3);
        assert!(SuppressGoAhead.may_enable_him());
        assert!(SuppressGoAhead.may_enable_us());
    }
}
