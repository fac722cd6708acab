use pixel_smuggler::common::config::FrameConfig;
use pixel_smuggler::processing::framer::checksum;
use pixel_smuggler::processing::raster::{decode_samples, OFF, ON};
use pixel_smuggler::processing::{Framer, RasterCodec};
use pixel_smuggler::{Frame, FrameLimits, HeaderVariant, SmuggleError, Smuggler};
use rand::Rng;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; len];
    rand::thread_rng().fill(buffer.as_mut_slice());
    buffer
}

fn smuggler(min_side: usize, max_side: usize, header: HeaderVariant) -> Smuggler {
    Smuggler::new(FrameConfig {
        min_side,
        max_side,
        header,
    })
    .unwrap()
}

#[test]
fn test_round_trip_random_payloads() {
    let mut rng = rand::thread_rng();
    for header in [HeaderVariant::LengthOnly, HeaderVariant::Checksummed] {
        for min_side in [0, 64] {
            let s = smuggler(min_side, 4096, header);
            for _ in 0..20 {
                let payload = random_bytes(rng.gen_range(0..2000));
                let frame = s.conceal(&payload).unwrap();
                assert_eq!(s.reveal(&frame).unwrap(), payload);
            }
        }
    }
}

#[test]
fn test_empty_payload() {
    let s = Smuggler::default();
    let frame = s.conceal(&[]).unwrap();

    // Only the 64 header bits can be set: length 0 plus the CRC of nothing (0).
    assert!(frame.samples().iter().all(|&sample| sample == OFF));
    assert!(s.reveal(&frame).unwrap().is_empty());
}

#[test]
fn test_thousand_byte_payload_header() {
    let payload = random_bytes(1000);
    let frame = Smuggler::default().conceal(&payload).unwrap();
    let bytes = RasterCodec::default().decode(&frame);

    assert_eq!(u32::from_le_bytes(bytes[..4].try_into().unwrap()), 1000);
    assert_eq!(
        u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
        checksum(&bytes[8..1008])
    );
    assert_eq!(&bytes[8..1008], payload.as_slice());
    assert!(bytes[1008..].iter().all(|&b| b == 0), "slack must be zero-filled");
}

#[test]
fn test_size_boundary() {
    // 32x32 frame: 1024 bits = 128 bytes, 8 of them header.
    let s = smuggler(0, 32, HeaderVariant::Checksummed);
    assert_eq!(s.max_payload_len(), 120);

    let fits = random_bytes(120);
    let frame = s.conceal(&fits).unwrap();
    assert_eq!(frame.side(), 32);
    assert_eq!(s.reveal(&frame).unwrap(), fits);

    match s.conceal(&random_bytes(121)) {
        Err(SmuggleError::PayloadTooLarge { bits, max_bits }) => {
            assert_eq!(bits, 1032);
            assert_eq!(max_bits, 1024);
        }
        other => panic!("expected PayloadTooLarge, got {:?}", other),
    }
}

#[test]
fn test_one_bit_over_is_rejected_by_framer() {
    // 9x9 = 81 bits; the v1 header plus 6 bytes is 80 bits, 7 bytes is 88.
    let framer = Framer::new(HeaderVariant::LengthOnly, FrameLimits::new(0, 9).unwrap());
    assert!(framer.build(&[0xFF; 6]).is_ok());
    assert!(matches!(
        framer.build(&[0xFF; 7]),
        Err(SmuggleError::PayloadTooLarge { .. })
    ));
}

#[test]
fn test_slack_noise_is_ignored() {
    let s = Smuggler::default();
    let payload = b"slack does not matter".to_vec();
    let frame = s.conceal(&payload).unwrap();
    let used = (8 + payload.len()) * 8;

    let mut samples = frame.clone().into_samples();
    for sample in &mut samples[used..] {
        *sample = if rand::random() { ON } else { OFF };
    }
    let noisy = Frame::from_samples(frame.side(), frame.side(), samples).unwrap();

    assert_eq!(s.reveal(&noisy).unwrap(), payload);
}

#[test]
fn test_bounded_drift_is_absorbed() {
    let s = Smuggler::default();
    let payload = random_bytes(300);
    let frame = s.conceal(&payload).unwrap();

    let mut rng = rand::thread_rng();
    let drifted: Vec<u8> = frame
        .samples()
        .iter()
        .map(|&sample| {
            let drift = rng.gen_range(0..100u8);
            if sample == ON {
                sample - drift
            } else {
                sample + drift
            }
        })
        .collect();
    let drifted = Frame::from_samples(frame.side(), frame.side(), drifted).unwrap();

    assert_eq!(s.reveal(&drifted).unwrap(), payload);
}

#[test]
fn test_corrupted_payload_bit_detected() {
    let s = Smuggler::default();
    let frame = s.conceal(b"integrity matters").unwrap();

    let mut samples = frame.clone().into_samples();
    let target = 8 * 8 + 3; // a bit inside the first payload byte
    samples[target] = if samples[target] == ON { OFF } else { ON };
    let damaged = Frame::from_samples(frame.side(), frame.side(), samples).unwrap();

    assert!(matches!(
        s.reveal(&damaged),
        Err(SmuggleError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_truncated_frame_is_malformed() {
    let framer = Framer::default();
    // Decoding a 2x2 frame yields no full byte at all.
    let bytes = decode_samples(&[ON; 4]);
    assert!(bytes.is_empty());
    assert!(matches!(
        framer.parse(&bytes),
        Err(SmuggleError::MalformedHeader { .. })
    ));
}

#[test]
fn test_frames_are_square_and_minimal_without_floor() {
    let s = smuggler(0, 4096, HeaderVariant::LengthOnly);
    for len in [0usize, 1, 7, 100, 511] {
        let frame = s.conceal(&random_bytes(len)).unwrap();
        let bits = (4 + len) * 8;
        let side = frame.side();
        assert_eq!(frame.samples().len(), side * side);
        assert!(side * side >= bits);
        assert!((side - 1) * (side - 1) < bits);
    }
}
