//! Chunk boundaries must never change what the decoder emits.

use portfolio_engine::SseDecoder;
use proptest::prelude::*;

fn encode(payloads: &[String]) -> Vec<u8> {
    payloads
        .iter()
        .map(|p| format!("data: {p}\n\n"))
        .collect::<String>()
        .into_bytes()
}

/// Split `bytes` at the given (unsorted, possibly repeated) offsets.
fn split_at(bytes: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (bytes.len() + 1)).collect();
    cuts.sort_unstable();
    let mut chunks = Vec::new();
    let mut start = 0;
    for cut in cuts {
        chunks.push(bytes[start..cut].to_vec());
        start = cut;
    }
    chunks.push(bytes[start..].to_vec());
    chunks
}

fn decode_all(chunks: &[Vec<u8>]) -> Vec<String> {
    let mut decoder = SseDecoder::new();
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.decode(chunk));
    }
    decoder.finish();
    out
}

/// Payload text: anything without a blank line, multi-byte characters included.
fn arb_payload() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.ñáéü€😀\n]{0,24}".prop_filter("no frame delimiter inside", |s| {
        !s.contains("\n\n") && !s.ends_with('\n')
    })
}

proptest! {
    #[test]
    fn one_payload_survives_any_split(
        payload in arb_payload(),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        let bytes = encode(std::slice::from_ref(&payload));
        let out = decode_all(&split_at(&bytes, &cuts));
        prop_assert_eq!(out, vec![payload]);
    }

    #[test]
    fn k_payloads_arrive_in_order(
        payloads in proptest::collection::vec(arb_payload(), 0..6),
        cuts in proptest::collection::vec(any::<usize>(), 0..12),
    ) {
        let bytes = encode(&payloads);
        let out = decode_all(&split_at(&bytes, &cuts));
        prop_assert_eq!(out, payloads);
    }

    #[test]
    fn foreign_frames_do_not_disturb_payloads(
        payloads in proptest::collection::vec(arb_payload(), 1..4),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        let mut text = String::from("event: ping\n\n");
        for p in &payloads {
            text.push_str(&format!("data: {p}\n\n: comment\n\n"));
        }
        let out = decode_all(&split_at(text.as_bytes(), &cuts));
        prop_assert_eq!(out, payloads);
    }

    #[test]
    fn trailing_partial_frame_is_never_emitted(
        payload in arb_payload(),
        tail in "[a-z ]{1,12}",
    ) {
        let mut bytes = encode(std::slice::from_ref(&payload));
        bytes.extend_from_slice(format!("data: {tail}").as_bytes());
        let out = decode_all(&[bytes]);
        prop_assert_eq!(out, vec![payload]);
    }
}
