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

//! Raw protocol byte values from RFC854 and the option codes used by this workspace.

/// Interpret As Command
pub const IAC: u8 = 255;
/// Demand other party stop or confirm no longer expecting
pub const DONT: u8 = 254;
/// Request other party perform or confirm expecting
pub const DO: u8 = 253;
/// Refusal to perform or continue to perform
pub const WONT: u8 = 252;
/// Desire to begin performing or confirmation now performing
pub const WILL: u8 = 251;
/// Subnegotiation Begin
pub const SB: u8 = 250;
/// Go Ahead
pub const GA: u8 = 249;
/// Erase Line
pub const EL: u8 = 248;
/// Erase Character
pub const EC: u8 = 247;
/// Are You There
pub const AYT: u8 = 246;
/// Abort Output
pub const AO: u8 = 245;
/// Interrupt Process
pub const IP: u8 = 244;
/// Break
pub const BRK: u8 = 243;
/// Data Mark
pub const DM: u8 = 242;
/// No Operation
pub const NOP: u8 = 241;
/// Subnegotiation End
pub const SE: u8 = 240;
/// End Of Record
pub const EOR: u8 = 239;
/// Abort Process
pub const AP: u8 = 238;
/// Suspend Process
pub const SP: u8 = 237;
/// End of File
pub const EOF: u8 = 236;

/// Carriage Return
pub const CR: u8 = 13;
/// Line Feed
pub const LF: u8 = 10;
/// Null
pub const NUL: u8 = 0;

/// Option codes assigned by IANA that this workspace ships an implementation of.
pub mod option {
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SGA: u8 = 3;
    /// Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    pub const TTYPE: u8 = 24;
}
