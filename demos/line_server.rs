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

//! Character-mode line server
//!
//! Listens on 127.0.0.1:8023 (override with `TELNETQ_ADDR`), negotiates Echo and
//! Suppress-Go-Ahead with every client, asks for its terminal type and then runs a tiny line
//! editor: typed characters are echoed, backspace erases, and end of line prints a new prompt.
//!
//! ```text
//! RUST_LOG=debug cargo run -p telnetq-options --example line_server
//! telnet 127.0.0.1 8023
//! ```

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use telnetq::{Context, ContextConfig, TelnetError, TelnetOption, TelnetResult};
use telnetq_options::{Echo, SuppressGoAhead, TerminalType};
use tracing::{debug, info, info_span, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:8023";
const NEGOTIATION_WAIT: Duration = Duration::from_secs(2);
const PROMPT: &[u8] = b"\r\n> ";

fn main() -> TelnetResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = std::env::var("TELNETQ_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr)?;
    info!(%addr, "Listening");

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "Accept failed");
                continue;
            }
        };
        let peer = match stream.peer_addr() {
            Ok(peer) => peer,
            Err(err) => {
                warn!(error = %err, "Connection lost before setup");
                continue;
            }
        };
        info!(%peer, "Accepted connection");
        thread::spawn(move || {
            if let Err(err) = serve(stream, peer) {
                warn!(%peer, error = %err, "Connection failed");
            }
            info!(%peer, "Connection closed");
        });
    }
    Ok(())
}

/// Offers character mode and pumps negotiation until our echo is confirmed or `wait` passes.
fn negotiate(
    stream: &Arc<TcpStream>,
    peer: SocketAddr,
    wait: Duration,
    mut options: Vec<Arc<dyn TelnetOption>>,
) -> TelnetResult<(Context, bool)> {
    let echo = Arc::new(Echo::new());
    options.push(echo.clone());
    options.push(Arc::new(SuppressGoAhead));
    let config = ContextConfig::default().with_span(info_span!("telnet", %peer));
    let ctx = Context::with_config(stream.clone(), config, options);

    ctx.ask_us(SuppressGoAhead::CODE, true)?;
    ctx.ask_us(Echo::CODE, true)?;

    stream.set_read_timeout(Some(wait))?;
    let deadline = Instant::now() + wait;
    while !echo.us() && Instant::now() < deadline {
        match ctx.read(&mut []) {
            Ok(_) => {}
            Err(TelnetError::Io(err))
                if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                debug!(%peer, "Negotiation timed out");
                break;
            }
            Err(err) => {
                debug!(%peer, error = %err, "Negotiation interrupted");
                break;
            }
        }
    }
    stream.set_read_timeout(None)?;

    Ok((ctx, echo.us()))
}

fn serve(stream: TcpStream, peer: SocketAddr) -> TelnetResult<()> {
    let stream = Arc::new(stream);
    let term = Arc::new(TerminalType::new());
    let (ctx, ok) = negotiate(&stream, peer, NEGOTIATION_WAIT, vec![term.clone()])?;
    if !ok {
        ctx.write(b"Protocol negotiation failed.\r\n")?;
        return Ok(());
    }
    ctx.ask_him(TerminalType::CODE, true)?;

    ctx.write(b"Welcome to a test telnet server!\r\n")?;
    ctx.write(PROMPT)?;

    let mut buf = [0; 1024];
    let mut line = Vec::new();
    let mut terminal_logged = false;
    loop {
        let n = ctx.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        debug!(%peer, input = ?String::from_utf8_lossy(&buf[..n]), n, "Read");

        if !terminal_logged {
            if let Some(terminal) = term.terminal() {
                info!(%peer, %terminal, "Terminal type");
                terminal_logged = true;
            }
        }

        let mut echo = Vec::with_capacity(n);
        for &byte in &buf[..n] {
            match byte {
                // NUL or LF ends the line
                0x00 | 0x0A => {
                    info!(%peer, line = %String::from_utf8_lossy(&line), "Line");
                    line.clear();
                    echo.extend_from_slice(PROMPT);
                }
                0x0D => {}
                // ^H or ^?
                0x08 | 0x7F => {
                    if line.pop().is_some() {
                        echo.extend_from_slice(&[0x08, b' ', 0x08]);
                    }
                }
                _ => {
                    line.push(byte);
                    echo.push(byte);
                }
            }
        }
        if !echo.is_empty() {
            ctx.write(&echo)?;
        }
    }
}
