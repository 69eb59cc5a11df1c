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
use crate::config::DEFAULT_MAX_SUBNEGOTIATION_LEN;
use crate::{Frame, TelnetError, consts};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

/// Position of the decoder within the Telnet byte stream.
///
/// Every transition consumes exactly one byte. There is no terminal state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReaderState {
    /// Passing application data through
    #[default]
    Data,
    /// An `IAC` was consumed
    CommandSeen,
    /// `IAC` plus a negotiation verb was consumed, the option code is next
    IndicatorSeen(Verb),
    /// Collecting subnegotiation bytes
    SubnegotiationData,
    /// An `IAC` was consumed while collecting subnegotiation bytes
    SubnegotiationCommandSeen,
}

/// The Telnet framing codec.
///
/// Decoding classifies raw transport bytes into [`Frame`]s, reassembling commands and
/// subnegotiations that arrive split across any number of reads. Encoding applies the `IAC`
/// doubling rule to data and subnegotiation payloads.
///
/// The codec performs no I/O and holds no negotiation state, so it composes with
/// `tokio_util::codec::Framed` as readily as with the blocking [`Context`](crate::Context).
#[derive(Debug)]
pub struct FrameCodec {
    state: ReaderState,
    buffer: BytesMut,
    max_subnegotiation_len: usize,
    overflowed: bool,
}

impl FrameCodec {
    /// Creates a codec with the default subnegotiation limit.
    pub fn new() -> FrameCodec {
        FrameCodec::default()
    }

    /// Creates a codec that discards subnegotiation payloads longer than `limit` bytes.
    pub fn with_max_subnegotiation_len(limit: usize) -> FrameCodec {
        FrameCodec {
            max_subnegotiation_len: limit,
            ..FrameCodec::default()
        }
    }

    /// Current reader state.
    pub fn state(&self) -> ReaderState {
        self.state
    }

    fn push_subnegotiation_byte(&mut self, byte: u8) {
        // The first byte is the option code and does not count against the limit.
        if self.buffer.len() > self.max_subnegotiation_len {
            self.overflowed = true;
        } else {
            self.buffer.put_u8(byte);
        }
    }

    fn finish_subnegotiation(&mut self) -> Option<Frame> {
        let mut buffer = self.buffer.split();
        if std::mem::take(&mut self.overflowed) {
            warn!(
                "Discarding subnegotiation longer than {} bytes",
                self.max_subnegotiation_len
            );
            return None;
        }
        if buffer.is_empty() {
            warn!("Discarding subnegotiation without an option code");
            return None;
        }
        let code = buffer.get_u8();
        Some(Frame::Subnegotiate(code, buffer.freeze()))
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        FrameCodec {
            state: ReaderState::Data,
            buffer: BytesMut::new(),
            max_subnegotiation_len: DEFAULT_MAX_SUBNEGOTIATION_LEN,
            overflowed: false,
        }
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = TelnetError;

    /// Decodes the next frame from `src`.
    ///
    /// Runs of plain data are returned without copying. A frame that is still incomplete when
    /// `src` runs dry stays buffered inside the codec, and `src` is always left empty when
    /// `Ok(None)` is returned.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, Self::Error> {
        while src.has_remaining() {
            if self.state == ReaderState::Data {
                let run = src
                    .iter()
                    .position(|&byte| byte == consts::IAC)
                    .unwrap_or(src.len());
                if run > 0 {
                    return Ok(Some(Frame::Data(src.split_to(run).freeze())));
                }
            }
            let byte = src.get_u8();
            match (self.state, byte) {
                (ReaderState::Data, _) => {
                    // Only reached for IAC, plain runs are split off above.
                    self.state = ReaderState::CommandSeen;
                }
                (ReaderState::CommandSeen, consts::IAC) => {
                    self.state = ReaderState::Data;
                    return Ok(Some(Frame::Data(Bytes::from_static(&[consts::IAC]))));
                }
                (ReaderState::CommandSeen, consts::SB) => {
                    self.buffer.clear();
                    self.overflowed = false;
                    self.state = ReaderState::SubnegotiationData;
                }
                (ReaderState::CommandSeen, _) => match Command::try_from(byte) {
                    Ok(command) => match Verb::try_from(command) {
                        Ok(verb) => self.state = ReaderState::IndicatorSeen(verb),
                        Err(command) => {
                            self.state = ReaderState::Data;
                            return Ok(Some(Frame::Command(command)));
                        }
                    },
                    Err(byte) => {
                        debug!("Ignoring unhandled command {:#04X}", byte);
                        self.state = ReaderState::Data;
                    }
                },
                (ReaderState::IndicatorSeen(verb), code) => {
                    self.state = ReaderState::Data;
                    return Ok(Some(Frame::Negotiate(verb, code)));
                }
                (ReaderState::SubnegotiationData, consts::IAC) => {
                    self.state = ReaderState::SubnegotiationCommandSeen;
                }
                (ReaderState::SubnegotiationData, _) => {
                    self.push_subnegotiation_byte(byte);
                }
                (ReaderState::SubnegotiationCommandSeen, consts::IAC) => {
                    self.push_subnegotiation_byte(consts::IAC);
                    self.state = ReaderState::SubnegotiationData;
                }
                (ReaderState::SubnegotiationCommandSeen, consts::SE) => {
                    self.state = ReaderState::Data;
                    if let Some(frame) = self.finish_subnegotiation() {
                        return Ok(Some(frame));
                    }
                }
                (ReaderState::SubnegotiationCommandSeen, _) => {
                    warn!("{}", TelnetError::UnexpectedByte { byte });
                    self.buffer.clear();
                    self.overflowed = false;
                    self.state = ReaderState::CommandSeen;
                }
            }
        }
        Ok(None)
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = TelnetError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.encoded_len());
        match item {
            Frame::Data(data) => escape_into(&data, dst),
            Frame::Command(command) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(command.into());
            }
            Frame::Negotiate(verb, code) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(verb.into());
                dst.put_u8(code);
            }
            Frame::Subnegotiate(code, params) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                escape_into(&[code], dst);
                escape_into(&params, dst);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

impl Encoder<&[u8]> for FrameCodec {
    type Error = TelnetError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len() * 2);
        escape_into(item, dst);
        Ok(())
    }
}

/// Appends `src` to `dst`, doubling every `IAC`.
pub(crate) fn escape_into(src: &[u8], dst: &mut BytesMut) {
    for chunk in src.split_inclusive(|&byte| byte == consts::IAC) {
        dst.put_slice(chunk);
        if chunk.last() == Some(&consts::IAC) {
            dst.put_u8(consts::IAC);
        }
    }
}
