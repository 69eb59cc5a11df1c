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

//! Shared fixtures for telnetq integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::sync::Mutex;
use telnetq::{Context, TelnetOption, TelnetResult};

// ============================================================================
// In-memory transport
// ============================================================================

enum Inbound {
    Data(Vec<u8>),
    Error(ErrorKind),
}

/// Scripted transport: each read returns the next queued chunk (split if the caller's buffer
/// is smaller), an empty queue reads as end of stream, and writes are captured.
#[derive(Default)]
pub struct MockTransport {
    inbound: Mutex<VecDeque<Inbound>>,
    outbound: Mutex<Vec<u8>>,
}

impl MockTransport {
    pub fn new() -> MockTransport {
        MockTransport::default()
    }

    /// Queues a chunk to be returned by one read.
    pub fn push(&self, bytes: &[u8]) {
        self.inbound
            .lock()
            .unwrap()
            .push_back(Inbound::Data(bytes.to_vec()));
    }

    /// Queues a read failure.
    pub fn push_error(&self, kind: ErrorKind) {
        self.inbound.lock().unwrap().push_back(Inbound::Error(kind));
    }

    /// Number of chunks not yet read.
    pub fn queued(&self) -> usize {
        self.inbound.lock().unwrap().len()
    }

    /// Drains everything written so far.
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut *self.outbound.lock().unwrap())
    }
}

impl Read for &MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut inbound = self.inbound.lock().unwrap();
        match inbound.pop_front() {
            None => Ok(0),
            Some(Inbound::Error(kind)) => Err(kind.into()),
            Some(Inbound::Data(mut chunk)) => {
                if chunk.len() > buf.len() {
                    let rest = chunk.split_off(buf.len());
                    inbound.push_front(Inbound::Data(rest));
                }
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
        }
    }
}

impl Write for &MockTransport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.outbound.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Recording option
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Him(bool),
    Us(bool),
    Params(Vec<u8>),
}

/// Option with fixed policies that records every callback.
pub struct Recorder {
    code: u8,
    let_him: bool,
    let_us: bool,
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn new(code: u8, let_him: bool, let_us: bool) -> Recorder {
        Recorder {
            code,
            let_him,
            let_us,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl TelnetOption for Recorder {
    fn code(&self) -> u8 {
        self.code
    }

    fn name(&self) -> &str {
        "Recorder"
    }

    fn may_enable_him(&self) -> bool {
        self.let_him
    }

    fn may_enable_us(&self) -> bool {
        self.let_us
    }

    fn on_subnegotiation(&self, _ctx: &Context, params: &[u8]) -> TelnetResult<()> {
        self.events.lock().unwrap().push(Event::Params(params.to_vec()));
        Ok(())
    }

    fn on_him_changed(&self, _ctx: &Context, enabled: bool) -> TelnetResult<()> {
        self.events.lock().unwrap().push(Event::Him(enabled));
        Ok(())
    }

    fn on_us_changed(&self, _ctx: &Context, enabled: bool) -> TelnetResult<()> {
        self.events.lock().unwrap().push(Event::Us(enabled));
        Ok(())
    }
}
