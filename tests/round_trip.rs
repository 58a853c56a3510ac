use cmpr::lzw_coding::lzw;
use cmpr::{decode, encode, Algorithm, CmprError};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use test_case::test_case;

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut data = vec![0_u8; len];
    ChaCha8Rng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

/// Random bytes drawn from a small alphabet, so runs and repeats actually occur.
fn skewed_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| b"aab c"[rng.next_u32() as usize % 5]).collect()
}

#[test_case(b""; "empty")]
#[test_case(b"A"; "single byte")]
#[test_case(&[0xaa; 300]; "identical bytes")]
#[test_case(b"aaaabbbccd"; "huffman example")]
#[test_case(b"TOBEORNOTTOBEORTOBEORNOT"; "lzw example")]
#[test_case(&[0, 255, 0, 255, 1]; "extreme byte values")]
fn fixed_round_trip(input: &[u8]) {
    for alg in Algorithm::ALL {
        let packed = encode(input, alg).unwrap();
        assert_eq!(decode(&packed).unwrap(), input, "{}", alg);
    }
}

#[test_case(Algorithm::Rle)]
#[test_case(Algorithm::Huffman)]
#[test_case(Algorithm::Lzw)]
fn random_round_trip(alg: Algorithm) {
    for (seed, len) in [(1, 1), (2, 17), (3, 1_000), (4, 70_000)] {
        let data = random_bytes(seed, len);
        assert_eq!(decode(&encode(&data, alg).unwrap()).unwrap(), data);
        let data = skewed_bytes(seed, len);
        assert_eq!(decode(&encode(&data, alg).unwrap()).unwrap(), data);
    }
}

#[test_case(Algorithm::Rle)]
#[test_case(Algorithm::Huffman)]
#[test_case(Algorithm::Lzw)]
fn deterministic(alg: Algorithm) {
    let data = skewed_bytes(9, 10_000);
    assert_eq!(encode(&data, alg).unwrap(), encode(&data, alg).unwrap());
}

#[test]
fn lzw_fills_and_freezes_dictionary() {
    // Enough distinct material to fill a 9 bit dictionary many times over.
    let data = random_bytes(11, 20_000);
    for width in [9, 12, 16] {
        let payload = lzw::encode_with_limit(&data, width);
        assert_eq!(lzw::decode_with_limit(&payload, data.len(), width).unwrap(), data);
    }
}

#[test]
fn truncated_huffman_fails() {
    let data = skewed_bytes(5, 500);
    let mut packed = encode(&data, Algorithm::Huffman).unwrap();
    packed.pop();
    assert!(matches!(
        decode(&packed),
        Err(CmprError::OutOfData { .. }) | Err(CmprError::SizeMismatch { .. })
    ));
}

#[test]
fn bad_containers_fail() {
    assert!(matches!(decode(&[]), Err(CmprError::TruncatedHeader { .. })));

    let mut packed = encode(b"hello", Algorithm::Huffman).unwrap();
    packed[0] = 255;
    assert!(matches!(
        decode(&packed),
        Err(CmprError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn rle_expands_random_data() {
    let data = random_bytes(7, 4_096);
    assert!(encode(&data, Algorithm::Rle).unwrap().len() > data.len());
}
