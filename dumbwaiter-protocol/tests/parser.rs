//! Panel frame parser behaviour on noisy links

use dumbwaiter_protocol::{Frame, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
use proptest::prelude::*;

fn frame_strategy() -> impl Strategy<Value = Frame> {
    (
        any::<u8>(),
        prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
    )
        .prop_map(|(msg_type, payload)| Frame::new(msg_type, &payload).unwrap())
}

proptest! {
    #[test]
    fn parser_never_panics_on_garbage(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut parser = FrameParser::new();
        for byte in bytes {
            if let Ok(Some(frame)) = parser.feed(byte) {
                prop_assert!(frame.payload.len() <= MAX_PAYLOAD_SIZE);
            }
        }
    }

    #[test]
    fn frame_after_line_noise_is_recovered(
        noise in prop::collection::vec(any::<u8>().prop_filter("not START", |b| *b != FRAME_START), 0..64),
        frame in frame_strategy(),
    ) {
        let mut bytes = noise;
        bytes.extend_from_slice(&frame.encode_to_vec().unwrap());

        let mut parser = FrameParser::new();
        prop_assert_eq!(parser.feed_bytes(&bytes), Ok(Some(frame)));
    }

    #[test]
    fn single_bit_errors_do_not_pass(frame in frame_strategy(), pick in any::<prop::sample::Index>(), bit in 0u8..8) {
        let mut bytes = frame.encode_to_vec().unwrap();
        // Leave the START byte alone; corrupt type, length, payload or CRC
        let at = 1 + pick.index(bytes.len() - 1);
        bytes[at] ^= 1 << bit;

        let mut parser = FrameParser::new();
        prop_assert_ne!(parser.feed_bytes(&bytes), Ok(Some(frame)));
    }
}
