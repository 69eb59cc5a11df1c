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

//! Codec tests for telnetq
//!
//! Property tests over the IAC escaping rules, and the codec driven by `tokio_util` framing
//! over an async duplex stream.

use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use proptest::collection::vec;
use proptest::prelude::*;
use telnetq::consts::{self, option};
use telnetq::{Command, Frame, FrameCodec, ReaderState, Verb};
use tokio_util::codec::{Decoder, Encoder, FramedRead, FramedWrite};

// ============================================================================
// Helper Functions
// ============================================================================

fn encode(frame: Frame) -> BytesMut {
    let mut wire = BytesMut::new();
    FrameCodec::new().encode(frame, &mut wire).unwrap();
    wire
}

fn decode_all(codec: &mut FrameCodec, input: &[u8]) -> Vec<Frame> {
    let mut src = BytesMut::from(input);
    let mut frames = Vec::new();
    while let Some(frame) = codec.decode(&mut src).unwrap() {
        frames.push(frame);
    }
    assert!(src.is_empty());
    frames
}

/// Merges adjacent data frames, which the decoder may split at read boundaries.
fn coalesce(frames: Vec<Frame>) -> Vec<Frame> {
    let mut merged = Vec::new();
    let mut data = BytesMut::new();
    for frame in frames {
        match frame {
            Frame::Data(bytes) => data.extend_from_slice(&bytes),
            other => {
                if !data.is_empty() {
                    merged.push(Frame::Data(data.split().freeze()));
                }
                merged.push(other);
            }
        }
    }
    if !data.is_empty() {
        merged.push(Frame::Data(data.freeze()));
    }
    merged
}

fn data_of(frames: &[Frame]) -> Vec<u8> {
    frames
        .iter()
        .filter_map(|frame| match frame {
            Frame::Data(data) => Some(&data[..]),
            _ => None,
        })
        .flatten()
        .copied()
        .collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn data_survives_escaping(payload in vec(any::<u8>(), 0..512)) {
        let wire = encode(Frame::data(payload.clone()));
        let iacs = payload.iter().filter(|&&byte| byte == consts::IAC).count();
        prop_assert_eq!(wire.len(), payload.len() + iacs);

        let frames = decode_all(&mut FrameCodec::new(), &wire);
        prop_assert!(frames.iter().all(|frame| matches!(frame, Frame::Data(_))));
        prop_assert_eq!(data_of(&frames), payload);
    }

    #[test]
    fn data_survives_any_split(payload in vec(any::<u8>(), 1..256), split in any::<prop::sample::Index>()) {
        let wire = encode(Frame::data(payload.clone()));
        let (head, tail) = wire.split_at(split.index(wire.len()));

        let mut codec = FrameCodec::new();
        let mut frames = decode_all(&mut codec, head);
        frames.extend(decode_all(&mut codec, tail));
        prop_assert_eq!(codec.state(), ReaderState::Data);
        prop_assert_eq!(data_of(&frames), payload);
    }

    #[test]
    fn subnegotiation_survives_escaping(code in any::<u8>(), params in vec(any::<u8>(), 0..64)) {
        let frame = Frame::Subnegotiate(code, Bytes::from(params.clone()));
        let bound = frame.encoded_len();
        let wire = encode(frame);
        prop_assert!(wire.len() <= bound);
        let frames = decode_all(&mut FrameCodec::new(), &wire);
        prop_assert_eq!(frames, vec![Frame::Subnegotiate(code, Bytes::from(params))]);
    }

    #[test]
    fn arbitrary_input_never_fails(input in vec(any::<u8>(), 0..512)) {
        let mut codec = FrameCodec::new();
        let frames = decode_all(&mut codec, &input);
        let data = data_of(&frames);
        prop_assert!(data.len() <= input.len());
    }
}

// ============================================================================
// Framed Tests
// ============================================================================

#[tokio::test]
async fn framed_round_trip_over_duplex() {
    let (client, server) = tokio::io::duplex(64);
    let mut writer = FramedWrite::new(client, FrameCodec::new());
    let reader = FramedRead::new(server, FrameCodec::new());

    let frames = vec![
        Frame::data("hello"),
        Frame::Negotiate(Verb::Will, option::SGA),
        Frame::Subnegotiate(option::TTYPE, Bytes::from_static(&[0, 0xFF])),
        Frame::Command(Command::GoAhead),
        Frame::data(vec![0xFF, b'!']),
    ];

    let sender = tokio::spawn(async move {
        for frame in frames {
            writer.send(frame).await.unwrap();
        }
        writer.send(&b"raw"[..]).await.unwrap();
    });

    let received: Vec<Frame> = reader.map(|frame| frame.unwrap()).collect().await;
    sender.await.unwrap();

    assert_eq!(
        coalesce(received),
        vec![
            Frame::data("hello"),
            Frame::Negotiate(Verb::Will, option::SGA),
            Frame::Subnegotiate(option::TTYPE, Bytes::from_static(&[0, 0xFF])),
            Frame::Command(Command::GoAhead),
            Frame::data(vec![0xFF, b'!', b'r', b'a', b'w']),
        ]
    );
}

#[tokio::test]
async fn framed_reader_answers_nothing_on_its_own() {
    let (mut client, server) = tokio::io::duplex(64);
    let mut reader = FramedRead::new(server, FrameCodec::new());

    tokio::io::AsyncWriteExt::write_all(&mut client, &[consts::IAC, consts::DO, option::ECHO])
        .await
        .unwrap();
    drop(client);

    assert_eq!(
        reader.next().await.unwrap().unwrap(),
        Frame::Negotiate(Verb::Do, option::ECHO)
    );
    assert!(reader.next().await.is_none());
}
