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

use crate::command::{Command, Verb};
use bytes::Bytes;

///
/// `Frame` is one unit of the Telnet byte stream after IAC interpretation.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Frame {
    /// A run of application data with any `IAC IAC` escapes already collapsed
    Data(Bytes),
    /// A bare two-byte command such as `IAC NOP` or `IAC AYT`
    Command(Command),
    /// `IAC <WILL|WONT|DO|DONT> <option>`
    Negotiate(Verb, u8),
    /// `IAC SB <option> <parameters> IAC SE`, parameters unescaped
    Subnegotiate(u8, Bytes),
}

impl Frame {
    /// Creates a data frame from anything convertible into [`Bytes`].
    pub fn data(bytes: impl Into<Bytes>) -> Frame {
        Frame::Data(bytes.into())
    }

    /// Upper bound on the encoded size of this frame.
    pub fn encoded_len(&self) -> usize {
        match self {
            Frame::Data(data) => data.len() * 2,
            Frame::Command(_) => 2,
            Frame::Negotiate(_, _) => 3,
            Frame::Subnegotiate(_, params) => 7 + params.len() * 2,
        }
    }
}
