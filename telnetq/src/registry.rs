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

use crate::TelnetOption;
use crate::negotiation::{NegotiationState, Party};
use crate::option::NoOption;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Negotiation state of one option code in both directions, plus the option bound to it.
#[derive(Clone, Debug)]
pub(crate) struct OptionState {
    pub option: Arc<dyn TelnetOption>,
    pub him: NegotiationState,
    pub us: NegotiationState,
}

impl OptionState {
    fn new(option: Arc<dyn TelnetOption>) -> OptionState {
        OptionState {
            option,
            him: NegotiationState::No,
            us: NegotiationState::No,
        }
    }

    pub fn get(&self, party: Party) -> NegotiationState {
        match party {
            Party::Him => self.him,
            Party::Us => self.us,
        }
    }

    pub fn set(&mut self, party: Party, state: NegotiationState) {
        match party {
            Party::Him => self.him = state,
            Party::Us => self.us = state,
        }
    }

    /// Evaluates the option's policy gate for `party`.
    pub fn permits(&self, party: Party) -> bool {
        match party {
            Party::Him => self.option.may_enable_him(),
            Party::Us => self.option.may_enable_us(),
        }
    }
}

/// Per-connection map from option code to [`OptionState`].
///
/// Codes nobody registered resolve to a fallback that refuses all negotiation. That fallback
/// can never leave `No`/`No`, so only registered codes are ever stored.
#[derive(Debug, Default)]
pub(crate) struct OptionRegistry {
    states: HashMap<u8, OptionState>,
}

impl OptionRegistry {
    pub fn new(options: Vec<Arc<dyn TelnetOption>>) -> OptionRegistry {
        let mut registry = OptionRegistry::default();
        for option in options {
            if let Err(err) = registry.register(option) {
                warn!("Ignoring duplicate option: {}", err);
            }
        }
        registry
    }

    /// Binds `option` to its code with both directions disabled.
    pub fn register(&mut self, option: Arc<dyn TelnetOption>) -> crate::TelnetResult<()> {
        let code = option.code();
        if let Some(existing) = self.states.get(&code) {
            return Err(crate::TelnetError::AlreadyRegistered {
                code,
                name: existing.option.name().to_string(),
            });
        }
        self.states.insert(code, OptionState::new(option));
        Ok(())
    }

    pub fn is_registered(&self, code: u8) -> bool {
        self.states.contains_key(&code)
    }

    /// Current state for `code`, the fallback if unregistered.
    pub fn load(&self, code: u8) -> OptionState {
        match self.states.get(&code) {
            Some(state) => state.clone(),
            None => OptionState::new(Arc::new(NoOption::new(code))),
        }
    }

    /// Writes `state` back under its option's code.
    pub fn store(&mut self, state: OptionState) {
        let code = state.option.code();
        if let Some(slot) = self.states.get_mut(&code) {
            *slot = state;
        } else {
            debug_assert!(
                state.him == NegotiationState::No && state.us == NegotiationState::No,
                "fallback option left the No state"
            );
        }
    }

    pub fn option(&self, code: u8) -> Arc<dyn TelnetOption> {
        self.load(code).option
    }

    pub fn state(&self, code: u8, party: Party) -> NegotiationState {
        self.states
            .get(&code)
            .map_or(NegotiationState::No, |state| state.get(party))
    }

    /// Overrides a state directly, bypassing the transition tables.
    #[cfg(test)]
    pub fn force(&mut self, code: u8, party: Party, state: NegotiationState) {
        if let Some(slot) = self.states.get_mut(&code) {
            slot.set(party, state);
        }
    }
}
