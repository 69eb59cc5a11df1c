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

//! # Standard Options for telnetq
//!
//! Ready-made [`TelnetOption`](telnetq::TelnetOption) implementations for the options a
//! character-mode server typically negotiates.
//!
//! | Option | Code | RFC | Him | Us |
//! |--------|------|-----|-----|----|
//! | [`Echo`] | 1 | RFC 857 | unless we echo | unless he echoes |
//! | [`SuppressGoAhead`] | 3 | RFC 858 | yes | yes |
//! | [`TerminalType`] | 24 | RFC 1091 | yes | no |
//!
//! Options hold their observed state in interior-mutable fields, so share each one as an
//! `Arc` between the [`Context`](telnetq::Context) and the application:
//!
//! ```rust
//! use std::sync::Arc;
//! use telnetq::TelnetOption;
//! use telnetq_options::{Echo, SuppressGoAhead, TerminalType};
//!
//! let echo = Arc::new(Echo::new());
//! let term = Arc::new(TerminalType::new());
//! let options: Vec<Arc<dyn TelnetOption>> = vec![echo.clone(), Arc::new(SuppressGoAhead), term.clone()];
//! assert_eq!(options.len(), 3);
//! assert!(!echo.us());
//! assert_eq!(term.terminal(), None);
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod echo;
mod sga;
mod term;

pub use self::echo::Echo;
pub use self::sga::SuppressGoAhead;
pub use self::term::TerminalType;
