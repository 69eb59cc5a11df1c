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

//! Shared fixtures for telnetq-options integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::sync::Mutex;

/// Scripted transport: each read returns the next queued chunk, an empty queue reads as end
/// of stream, and writes are captured.
#[derive(Default)]
pub struct MockTransport {
    inbound: Mutex<VecDeque<Vec<u8>>>,
    outbound: Mutex<Vec<u8>>,
}

impl MockTransport {
    pub fn new() -> MockTransport {
        MockTransport::default()
    }

    pub fn push(&self, bytes: &[u8]) {
        self.inbound.lock().unwrap().push_back(bytes.to_vec());
    }

    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut *self.outbound.lock().unwrap())
    }
}

impl Read for &MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut inbound = self.inbound.lock().unwrap();
        let Some(mut chunk) = inbound.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            inbound.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
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
