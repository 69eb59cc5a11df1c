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

use crate::codec::FrameCodec;
use crate::negotiation::{self, NegotiationState, Party};
use crate::registry::OptionRegistry;
use crate::{
    Command, ContextConfig, Frame, TelnetError, TelnetOption, TelnetResult, Transport, Verb,
};
use bytes::{Bytes, BytesMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace, warn};

/// A Telnet connection over a caller-supplied [`Transport`].
///
/// `Context` interprets the incoming byte stream, answers option negotiation according to
/// RFC1143, and escapes outgoing data. It is used like a socket: [`read`](Context::read)
/// yields application data only and [`write`](Context::write) takes application data only.
///
/// # Concurrency
///
/// All methods take `&self` and may be called from several threads. Decoder state and the
/// option registry sit behind one lock, which is also held for every write so escaped sequences
/// reach the wire whole. The lock is *not* held while blocking on the transport for input, nor
/// while an option callback runs, so callbacks are free to write, ask or subnegotiate.
///
/// # Lifecycle
///
/// The transport is shared, not owned: the caller keeps its own handle to set timeouts or shut
/// it down. Dropping the context releases nothing but memory.
pub struct Context {
    transport: Arc<dyn Transport>,
    config: ContextConfig,
    /// Serializes readers; holds data produced by peeking
    pending: Mutex<BytesMut>,
    inner: Mutex<Inner>,
}

struct Inner {
    codec: FrameCodec,
    registry: OptionRegistry,
}

impl Context {
    /// Creates a context with default configuration. Each option is registered at its code
    /// with both directions disabled.
    pub fn new(transport: Arc<dyn Transport>, options: Vec<Arc<dyn TelnetOption>>) -> Context {
        Context::with_config(transport, ContextConfig::default(), options)
    }

    /// Creates a context with explicit configuration.
    pub fn with_config(
        transport: Arc<dyn Transport>,
        config: ContextConfig,
        options: Vec<Arc<dyn TelnetOption>>,
    ) -> Context {
        let registry = config.span.in_scope(|| OptionRegistry::new(options));
        let codec = FrameCodec::with_max_subnegotiation_len(config.max_subnegotiation_len);
        Context {
            transport,
            config,
            pending: Mutex::new(BytesMut::new()),
            inner: Mutex::new(Inner { codec, registry }),
        }
    }

    /// Binds another option after construction.
    ///
    /// Fails if an option already holds the code; a code's option never changes once bound.
    pub fn register(&self, option: Arc<dyn TelnetOption>) -> TelnetResult<()> {
        let _entered = self.config.span.enter();
        self.inner().registry.register(option)
    }

    /// The configuration this context was built with.
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Reads application data.
    ///
    /// With a non-empty `buf` this blocks, decoding and answering protocol traffic as it
    /// arrives, until at least one data byte is available or the transport reaches end of stream
    /// (`Ok(0)`).
    ///
    /// With an empty `buf` it performs a single bounded read of the transport and processes it,
    /// keeping any data for the next non-empty read. This lets a caller pump negotiation without
    /// consuming application input. A peek at end of stream fails with
    /// [`std::io::ErrorKind::UnexpectedEof`].
    ///
    /// Option callbacks run on the calling thread before this returns.
    pub fn read(&self, buf: &mut [u8]) -> TelnetResult<usize> {
        let _entered = self.config.span.enter();
        let mut pending = lock(&self.pending);

        if buf.is_empty() {
            let mut raw = vec![0; self.config.peek_size.max(1)];
            let n = self.transport.read(&mut raw)?;
            if n == 0 {
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
            }
            let (data, outcome) = self.process(&raw[..n]);
            pending.extend_from_slice(&data);
            return outcome.map(|()| 0);
        }

        if !pending.is_empty() {
            let n = pending.len().min(buf.len());
            buf[..n].copy_from_slice(&pending.split_to(n));
            return Ok(n);
        }

        // Decoding never grows the stream, so a raw read of buf.len() always fits.
        let mut raw = vec![0; buf.len()];
        loop {
            let n = self.transport.read(&mut raw)?;
            if n == 0 {
                return Ok(0);
            }
            let (data, outcome) = self.process(&raw[..n]);
            if let Err(err) = outcome {
                pending.extend_from_slice(&data);
                return Err(err);
            }
            if !data.is_empty() {
                buf[..data.len()].copy_from_slice(&data);
                return Ok(data.len());
            }
        }
    }

    /// Writes application data, doubling every `IAC`. Returns `buf.len()`.
    pub fn write(&self, buf: &[u8]) -> TelnetResult<usize> {
        let _entered = self.config.span.enter();
        let mut inner = self.inner();
        self.send(&mut inner, Frame::Data(Bytes::copy_from_slice(buf)))?;
        Ok(buf.len())
    }

    /// Flushes the transport.
    pub fn flush(&self) -> TelnetResult<()> {
        Ok(self.transport.flush()?)
    }

    /// Asks the peer to enable (`DO`) or disable (`DONT`) an option.
    ///
    /// Fails with [`TelnetError::PolicyDenied`] if enabling is not permitted by the option
    /// registered at `code`, or nothing is registered there.
    pub fn ask_him(&self, code: u8, enable: bool) -> TelnetResult<()> {
        self.ask(if enable { Verb::Do } else { Verb::Dont }, code)
    }

    /// Offers to enable (`WILL`) or announces disabling (`WONT`) an option on our side.
    ///
    /// Fails with [`TelnetError::PolicyDenied`] under the same conditions as
    /// [`ask_him`](Context::ask_him).
    pub fn ask_us(&self, code: u8, enable: bool) -> TelnetResult<()> {
        self.ask(if enable { Verb::Will } else { Verb::Wont }, code)
    }

    /// Sends a bare `IAC <command>`.
    pub fn send_command(&self, command: Command) -> TelnetResult<()> {
        let _entered = self.config.span.enter();
        debug!(%command, "Sending command");
        let mut inner = self.inner();
        self.send(&mut inner, Frame::Command(command))
    }

    /// Sends `IAC SB <code> <params> IAC SE`, escaping the parameters.
    pub fn send_subnegotiation(&self, code: u8, params: &[u8]) -> TelnetResult<()> {
        let _entered = self.config.span.enter();
        debug!(code, len = params.len(), "Sending subnegotiation");
        let mut inner = self.inner();
        self.send(
            &mut inner,
            Frame::Subnegotiate(code, Bytes::copy_from_slice(params)),
        )
    }

    /// Whether a real option is bound to `code`.
    pub fn is_registered(&self, code: u8) -> bool {
        self.inner().registry.is_registered(code)
    }

    /// The peer's negotiation state for `code`.
    pub fn him_state(&self, code: u8) -> NegotiationState {
        self.inner().registry.state(code, Party::Him)
    }

    /// Our negotiation state for `code`.
    pub fn us_state(&self, code: u8) -> NegotiationState {
        self.inner().registry.state(code, Party::Us)
    }

    /// Whether the peer is performing the option.
    pub fn is_enabled_him(&self, code: u8) -> bool {
        self.him_state(code).is_enabled()
    }

    /// Whether we are performing the option.
    pub fn is_enabled_us(&self, code: u8) -> bool {
        self.us_state(code).is_enabled()
    }

    fn ask(&self, verb: Verb, code: u8) -> TelnetResult<()> {
        let _entered = self.config.span.enter();
        let mut inner = self.inner();
        if let Some(reply) = negotiation::ask(&mut inner.registry, verb, code)? {
            self.send(&mut inner, Frame::Negotiate(reply, code))?;
        }
        Ok(())
    }

    /// Decodes one raw chunk, acting on every protocol frame in it, and returns the
    /// application data it carried.
    ///
    /// A failing callback or write does not stop the chunk: the remaining frames are still
    /// answered and their data still collected. The first failure is returned alongside.
    fn process(&self, raw: &[u8]) -> (BytesMut, TelnetResult<()>) {
        trace!(len = raw.len(), "Processing raw input");
        let mut src = BytesMut::from(raw);
        let mut data = BytesMut::with_capacity(raw.len());
        let mut failure = None;
        let mut inner = self.inner();
        loop {
            let frame = match inner.codec.decode(&mut src) {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(err) => {
                    failure.get_or_insert(err);
                    break;
                }
            };
            let result = match frame {
                Frame::Data(bytes) => {
                    data.extend_from_slice(&bytes);
                    Ok(())
                }
                Frame::Command(Command::AreYouThere) => {
                    debug!("Answering AYT");
                    self.transport
                        .write_all(&self.config.ayt_reply)
                        .map_err(TelnetError::from)
                }
                Frame::Command(Command::NoOperation) => Ok(()),
                Frame::Command(command) => {
                    debug!(%command, "Ignoring unhandled command");
                    Ok(())
                }
                Frame::Negotiate(verb, code) => {
                    let outcome = negotiation::negotiate(&mut inner.registry, verb, code);
                    if let Some(violation) = outcome.violation {
                        warn!("{}", violation);
                    }
                    let sent = match outcome.reply {
                        Some(reply) => self.send(&mut inner, Frame::Negotiate(reply, code)),
                        None => Ok(()),
                    };
                    let delivered = match outcome.notify {
                        Some(notification) => {
                            drop(inner);
                            let delivered = notification.deliver(self);
                            inner = self.inner();
                            delivered
                        }
                        None => Ok(()),
                    };
                    sent.and(delivered)
                }
                Frame::Subnegotiate(code, params) => {
                    let option = inner.registry.option(code);
                    debug!(option = option.name(), params = ?params, "Subnegotiation");
                    drop(inner);
                    let delivered = option.on_subnegotiation(self, &params);
                    inner = self.inner();
                    delivered
                }
            };
            if let Err(err) = result {
                if failure.is_some() {
                    warn!(error = %err, "Dropping error after an earlier failure");
                } else {
                    failure = Some(err);
                }
            }
        }
        (data, failure.map_or(Ok(()), Err))
    }

    /// Encodes and writes a frame. Taking the guard proves the lock is held.
    fn send(&self, inner: &mut MutexGuard<'_, Inner>, frame: Frame) -> TelnetResult<()> {
        let mut dst = BytesMut::with_capacity(frame.encoded_len());
        inner.codec.encode(frame, &mut dst)?;
        self.transport.write_all(&dst)?;
        Ok(())
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }
}

/// Locks a mutex. A panicking callback cannot leave the tables half-updated because they are
/// never mutated while a callback runs, so poisoning is ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl std::io::Read for &Context {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(Context::read(*self, buf)?)
    }
}

impl std::io::Write for &Context {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Context::write(*self, buf)?)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(Context::flush(*self)?)
    }
}

impl std::io::Read for Context {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(Context::read(self, buf)?)
    }
}

impl std::io::Write for Context {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Context::write(self, buf)?)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(Context::flush(self)?)
    }
}
