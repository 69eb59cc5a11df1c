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

//! RFC1143 "Q method" option negotiation.
//!
//! Each option has two independent state machines, one for the peer's side ("him") and one for
//! ours ("us"). Both follow the same table, so the table is written once here in terms of a
//! [`Party`] and the verbs that request, confirm or refuse enablement for that party.
//!
//! Cases that RFC1143 describes as "do X, then as for state Y" are expressed by calling the
//! shared [`confirm_enable`] / [`confirm_disable`] tails rather than by repeating them.

use crate::registry::OptionRegistry;
use crate::{TelnetError, TelnetOption, TelnetResult, Verb};
use std::sync::Arc;
use tracing::debug;

/// RFC1143 negotiation state for one option in one direction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum NegotiationState {
    /// Disabled
    #[default]
    No,
    /// Enabled
    Yes,
    /// Negotiating to disable
    WantNo,
    /// Want to enable, but the disable negotiation in flight has not completed
    WantNoOpposite,
    /// Negotiating to enable
    WantYes,
    /// Want to disable, but the enable negotiation in flight has not completed
    WantYesOpposite,
}

impl NegotiationState {
    /// Every state, in declaration order.
    pub const ALL: [NegotiationState; 6] = [
        NegotiationState::No,
        NegotiationState::Yes,
        NegotiationState::WantNo,
        NegotiationState::WantNoOpposite,
        NegotiationState::WantYes,
        NegotiationState::WantYesOpposite,
    ];

    /// Whether the option is currently in effect. It stays in effect while a disable is being
    /// negotiated and only takes effect once an enable is confirmed.
    pub fn is_enabled(self) -> bool {
        matches!(
            self,
            NegotiationState::Yes | NegotiationState::WantNo | NegotiationState::WantNoOpposite
        )
    }
}

impl std::fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NegotiationState::No => write!(f, "No"),
            NegotiationState::Yes => write!(f, "Yes"),
            NegotiationState::WantNo => write!(f, "WantNo"),
            NegotiationState::WantNoOpposite => write!(f, "WantNoOpposite"),
            NegotiationState::WantYes => write!(f, "WantYes"),
            NegotiationState::WantYesOpposite => write!(f, "WantYesOpposite"),
        }
    }
}

/// Which side of the connection an option state belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Party {
    /// The remote party performing the option. We send DO/DONT, the peer answers WILL/WONT.
    Him,
    /// Ourselves performing the option. We send WILL/WONT, the peer answers DO/DONT.
    Us,
}

impl Party {
    /// The verb we send to request or accept enablement for this party.
    pub fn enable_verb(self) -> Verb {
        match self {
            Party::Him => Verb::Do,
            Party::Us => Verb::Will,
        }
    }

    /// The verb we send to request or accept disablement for this party.
    pub fn disable_verb(self) -> Verb {
        match self {
            Party::Him => Verb::Dont,
            Party::Us => Verb::Wont,
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Party::Him => write!(f, "him"),
            Party::Us => write!(f, "us"),
        }
    }
}

/// The party and direction a locally issued verb asks for.
fn requested(verb: Verb) -> (Party, bool) {
    match verb {
        Verb::Will => (Party::Us, true),
        Verb::Wont => (Party::Us, false),
        Verb::Do => (Party::Him, true),
        Verb::Dont => (Party::Him, false),
    }
}

/// The party and direction a verb received from the peer announces.
fn announced(verb: Verb) -> (Party, bool) {
    match verb {
        Verb::Will => (Party::Him, true),
        Verb::Wont => (Party::Him, false),
        Verb::Do => (Party::Us, true),
        Verb::Dont => (Party::Us, false),
    }
}

/// Result of one step of the table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Transition {
    /// State after the step
    pub state: NegotiationState,
    /// Verb to send for the option, if any
    pub reply: Option<Verb>,
    /// Confirmed change to report to the option
    pub notify: Option<bool>,
    /// Request the peer answered incorrectly
    pub violation: Option<Verb>,
}

impl Transition {
    fn to(state: NegotiationState) -> Transition {
        Transition {
            state,
            reply: None,
            notify: None,
            violation: None,
        }
    }

    fn reply(mut self, verb: Verb) -> Transition {
        self.reply = Some(verb);
        self
    }

    fn violation(mut self, request: Verb) -> Transition {
        self.violation = Some(request);
        self
    }
}

fn confirm_enable() -> Transition {
    Transition {
        notify: Some(true),
        ..Transition::to(NegotiationState::Yes)
    }
}

fn confirm_disable() -> Transition {
    Transition {
        notify: Some(false),
        ..Transition::to(NegotiationState::No)
    }
}

/// We want `party` to enable the option. `None` means the policy gate refused.
pub(crate) fn request_enable(
    party: Party,
    state: NegotiationState,
    permitted: impl FnOnce() -> bool,
) -> Option<Transition> {
    use NegotiationState::*;
    Some(match state {
        No => {
            if !permitted() {
                return None;
            }
            Transition::to(WantYes).reply(party.enable_verb())
        }
        WantNo => Transition::to(WantNoOpposite),
        WantYesOpposite => Transition::to(WantYes),
        Yes | WantNoOpposite | WantYes => Transition::to(state),
    })
}

/// We want `party` to disable the option.
pub(crate) fn request_disable(party: Party, state: NegotiationState) -> Transition {
    use NegotiationState::*;
    match state {
        Yes => Transition::to(WantNo).reply(party.disable_verb()),
        WantNoOpposite => Transition::to(WantNo),
        WantYes => Transition::to(WantYesOpposite),
        No | WantNo | WantYesOpposite => Transition::to(state),
    }
}

/// The peer announced enablement for `party` (WILL for him, DO for us).
pub(crate) fn receive_enable(
    party: Party,
    state: NegotiationState,
    permitted: impl FnOnce() -> bool,
) -> Transition {
    use NegotiationState::*;
    match state {
        No => {
            if permitted() {
                confirm_enable().reply(party.enable_verb())
            } else {
                Transition::to(No).reply(party.disable_verb())
            }
        }
        Yes => Transition::to(Yes),
        WantNo => confirm_disable().violation(party.disable_verb()),
        WantNoOpposite => confirm_enable().violation(party.disable_verb()),
        WantYes => confirm_enable(),
        WantYesOpposite => Transition::to(WantNo).reply(party.disable_verb()),
    }
}

/// The peer announced disablement for `party` (WONT for him, DONT for us).
pub(crate) fn receive_disable(party: Party, state: NegotiationState) -> Transition {
    use NegotiationState::*;
    match state {
        No => Transition::to(No),
        Yes => confirm_disable().reply(party.disable_verb()),
        WantNo | WantYes | WantYesOpposite => confirm_disable(),
        WantNoOpposite => Transition::to(WantYes).reply(party.enable_verb()),
    }
}

/// A confirmed state change awaiting delivery to its option, outside the engine lock.
pub(crate) struct Notification {
    pub option: Arc<dyn TelnetOption>,
    pub party: Party,
    pub enabled: bool,
}

impl Notification {
    pub fn deliver(self, ctx: &crate::Context) -> TelnetResult<()> {
        match self.party {
            Party::Him => self.option.on_him_changed(ctx, self.enabled),
            Party::Us => self.option.on_us_changed(ctx, self.enabled),
        }
    }
}

/// What the caller must do after [`negotiate`] updated the registry.
pub(crate) struct Negotiated {
    /// Verb to send for the option code
    pub reply: Option<Verb>,
    /// Callback to fire once the lock is released
    pub notify: Option<Notification>,
    /// Protocol violation to log
    pub violation: Option<TelnetError>,
}

/// Applies a locally issued `verb` for `code`, returning the verb to transmit, if any.
pub(crate) fn ask(registry: &mut OptionRegistry, verb: Verb, code: u8) -> TelnetResult<Option<Verb>> {
    let mut entry = registry.load(code);
    let (party, enable) = requested(verb);
    let state = entry.get(party);
    debug!(%verb, option = entry.option.name(), %party, %state, "Asking option");
    let transition = if enable {
        request_enable(party, state, || entry.permits(party)).ok_or_else(|| {
            TelnetError::PolicyDenied {
                option: entry.option.name().to_string(),
                code,
                verb,
            }
        })?
    } else {
        request_disable(party, state)
    };
    entry.set(party, transition.state);
    registry.store(entry);
    Ok(transition.reply)
}

/// Applies a `verb` received from the peer for `code`.
pub(crate) fn negotiate(registry: &mut OptionRegistry, verb: Verb, code: u8) -> Negotiated {
    let mut entry = registry.load(code);
    let (party, enable) = announced(verb);
    let state = entry.get(party);
    debug!(%verb, option = entry.option.name(), %party, %state, "Received option");
    let transition = if enable {
        receive_enable(party, state, || entry.permits(party))
    } else {
        receive_disable(party, state)
    };
    entry.set(party, transition.state);
    let violation = transition
        .violation
        .map(|request| TelnetError::ProtocolViolation {
            option: entry.option.name().to_string(),
            code,
            request,
            received: verb,
        });
    let notify = transition.notify.map(|enabled| {
        debug!(
            option = entry.option.name(),
            %party,
            enabled,
            "Option {}",
            if enabled { "enabled" } else { "disabled" }
        );
        Notification {
            option: entry.option.clone(),
            party,
            enabled,
        }
    });
    registry.store(entry);
    Negotiated {
        reply: transition.reply,
        notify,
        violation,
    }
}
