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

use crate::consts;

///
/// RFC854 command codes, i.e. the byte following an `IAC`.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Command {
    /// End of File
    EndOfFile = consts::EOF,
    /// Suspend Process
    SuspendProcess = consts::SP,
    /// Abort Process
    AbortProcess = consts::AP,
    /// End Of Record
    EndOfRecord = consts::EOR,
    /// Subnegotiation End
    SubnegotiationEnd = consts::SE,
    /// No Operation
    NoOperation = consts::NOP,
    /// Data Mark
    DataMark = consts::DM,
    /// Break
    Break = consts::BRK,
    /// Interrupt Process
    InterruptProcess = consts::IP,
    /// Abort Output
    AbortOutput = consts::AO,
    /// Are You There
    AreYouThere = consts::AYT,
    /// Erase Character
    EraseCharacter = consts::EC,
    /// Erase Line
    EraseLine = consts::EL,
    /// Go Ahead
    GoAhead = consts::GA,
    /// Subnegotiation Begin
    Subnegotiation = consts::SB,
    /// Desire to begin performing, or confirmation of now performing
    Will = consts::WILL,
    /// Refusal to perform or continue performing
    Wont = consts::WONT,
    /// Request the other party perform, or confirm expecting it
    Do = consts::DO,
    /// Demand the other party stop, or confirm no longer expecting it
    Dont = consts::DONT,
    /// Interpret As Command
    InterpretAsCommand = consts::IAC,
}

impl Command {
    /// Short RFC854 mnemonic for the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::EndOfFile => "EOF",
            Command::SuspendProcess => "SUSP",
            Command::AbortProcess => "ABORT",
            Command::EndOfRecord => "EOR",
            Command::SubnegotiationEnd => "SE",
            Command::NoOperation => "NOP",
            Command::DataMark => "DM",
            Command::Break => "BRK",
            Command::InterruptProcess => "IP",
            Command::AbortOutput => "AO",
            Command::AreYouThere => "AYT",
            Command::EraseCharacter => "EC",
            Command::EraseLine => "EL",
            Command::GoAhead => "GA",
            Command::Subnegotiation => "SB",
            Command::Will => "WILL",
            Command::Wont => "WONT",
            Command::Do => "DO",
            Command::Dont => "DONT",
            Command::InterpretAsCommand => "IAC",
        }
    }

    /// The wire value of the command.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = u8;

    /// Fails with the original byte when it is not an RFC854 command code.
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            consts::EOF => Command::EndOfFile,
            consts::SP => Command::SuspendProcess,
            consts::AP => Command::AbortProcess,
            consts::EOR => Command::EndOfRecord,
            consts::SE => Command::SubnegotiationEnd,
            consts::NOP => Command::NoOperation,
            consts::DM => Command::DataMark,
            consts::BRK => Command::Break,
            consts::IP => Command::InterruptProcess,
            consts::AO => Command::AbortOutput,
            consts::AYT => Command::AreYouThere,
            consts::EC => Command::EraseCharacter,
            consts::EL => Command::EraseLine,
            consts::GA => Command::GoAhead,
            consts::SB => Command::Subnegotiation,
            consts::WILL => Command::Will,
            consts::WONT => Command::Wont,
            consts::DO => Command::Do,
            consts::DONT => Command::Dont,
            consts::IAC => Command::InterpretAsCommand,
            other => return Err(other),
        })
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.to_u8()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

///
/// The four option negotiation commands of RFC855.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Verb {
    /// `WILL`
    Will,
    /// `WONT`
    Wont,
    /// `DO`
    Do,
    /// `DONT`
    Dont,
}

impl Verb {
    /// The command this verb is transmitted as.
    pub fn command(self) -> Command {
        match self {
            Verb::Will => Command::Will,
            Verb::Wont => Command::Wont,
            Verb::Do => Command::Do,
            Verb::Dont => Command::Dont,
        }
    }
}

impl TryFrom<Command> for Verb {
    type Error = Command;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        match command {
            Command::Will => Ok(Verb::Will),
            Command::Wont => Ok(Verb::Wont),
            Command::Do => Ok(Verb::Do),
            Command::Dont => Ok(Verb::Dont),
            other => Err(other),
        }
    }
}

impl From<Verb> for u8 {
    fn from(verb: Verb) -> Self {
        verb.command().to_u8()
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.command().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_codes_match_rfc854() {
        assert_eq!(Command::EndOfFile.to_u8(), 236);
        assert_eq!(Command::SubnegotiationEnd.to_u8(), 240);
        assert_eq!(Command::AreYouThere.to_u8(), 246);
        assert_eq!(Command::Subnegotiation.to_u8(), 250);
        assert_eq!(Command::InterpretAsCommand.to_u8(), 255);
    }

    #[test]
    fn command_from_every_valid_byte() {
        for byte in 236..=255u8 {
            let command = Command::try_from(byte).unwrap();
            assert_eq!(command.to_u8(), byte);
        }
    }

    #[test]
    fn command_rejects_data_bytes() {
        assert_eq!(Command::try_from(b'A'), Err(b'A'));
        assert_eq!(Command::try_from(235), Err(235));
    }

    #[test]
    fn verb_conversion() {
        assert_eq!(Verb::try_from(Command::Do), Ok(Verb::Do));
        assert_eq!(Verb::try_from(Command::GoAhead), Err(Command::GoAhead));
        assert_eq!(u8::from(Verb::Wont), consts::WONT);
        assert_eq!(Verb::Dont.to_string(), "DONT");
    }
}
