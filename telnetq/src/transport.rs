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

use std::io::{Read, Write};

/// A duplex byte channel the engine runs over.
///
/// Both halves are driven through `&self` so that one thread can block in a read while others
/// write. Anything whose shared reference is a reader and writer, such as
/// [`std::net::TcpStream`], gets this for free.
pub trait Transport: Send + Sync {
    /// Pulls raw bytes, returning `0` at end of stream.
    fn read(&self, buf: &mut [u8]) -> std::io::Result<usize>;

    /// Pushes all of `buf` to the peer.
    fn write_all(&self, buf: &[u8]) -> std::io::Result<()>;

    /// Flushes any buffered output.
    fn flush(&self) -> std::io::Result<()>;
}

impl<T> Transport for T
where
    T: Send + Sync,
    for<'a> &'a T: Read + Write,
{
    fn read(&self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut this = self;
        Read::read(&mut this, buf)
    }

    fn write_all(&self, buf: &[u8]) -> std::io::Result<()> {
        let mut this = self;
        Write::write_all(&mut this, buf)
    }

    fn flush(&self) -> std::io::Result<()> {
        let mut this = self;
        Write::flush(&mut this)
    }
}
