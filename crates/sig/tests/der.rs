use txkit_sig::der::{
    encode_signature, is_valid_signature_encoding, is_valid_signature_encoding_hex,
    parse_signature, DerError,
};

fn valid_signature() -> Vec<u8> {
    encode_signature(&[0x7f; 32], &[0x33; 32], 0x01)
}

#[test]
fn well_formed_signature_round_trips() {
    let sig = valid_signature();
    assert!(is_valid_signature_encoding(&sig));
    let (r, s) = parse_signature(&sig).expect("parse");
    assert_eq!(r, vec![0x7f; 32]);
    assert_eq!(s, vec![0x33; 32]);
    assert_eq!(encode_signature(&r, &s, 0x01), sig);
}

#[test]
fn maximum_length_components_are_accepted() {
    // 33-byte integers whose leading zero is required by the sign bit.
    let mut r = vec![0x00];
    r.extend_from_slice(&[0x80; 32]);
    let sig = encode_signature(&r, &r, 0x01);
    assert_eq!(sig.len(), 73);
    assert!(is_valid_signature_encoding(&sig));
}

#[test]
fn length_bounds_are_enforced() {
    assert_eq!(parse_signature(&[0x30; 8]), Err(DerError::TotalLength));
    assert_eq!(parse_signature(&[0x30; 74]), Err(DerError::TotalLength));
    assert!(!is_valid_signature_encoding(&[]));
}

#[test]
fn compound_tag_is_required() {
    let mut sig = valid_signature();
    sig[0] = 0x31;
    assert_eq!(parse_signature(&sig), Err(DerError::CompoundTag));
}

#[test]
fn declared_length_must_cover_the_signature() {
    let mut sig = valid_signature();
    sig[1] += 1;
    assert_eq!(parse_signature(&sig), Err(DerError::EnvelopeLength));
}

#[test]
fn r_length_must_leave_room_for_s() {
    let mut sig = valid_signature();
    sig[3] = 0x44;
    assert_eq!(parse_signature(&sig), Err(DerError::RLength));
}

#[test]
fn component_lengths_must_add_up() {
    let mut sig = valid_signature();
    sig[3] -= 1;
    assert_eq!(parse_signature(&sig), Err(DerError::ComponentLengths));
}

#[test]
fn r_must_be_tagged_as_integer() {
    let mut sig = valid_signature();
    sig[2] = 0x03;
    assert_eq!(parse_signature(&sig), Err(DerError::RIntegerTag));
}

#[test]
fn r_must_not_be_empty() {
    let sig = vec![0x30, 0x06, 0x02, 0x00, 0x02, 0x02, 0x01, 0x01, 0x01];
    assert_eq!(parse_signature(&sig), Err(DerError::REmpty));
}

#[test]
fn r_must_not_be_negative() {
    let sig = encode_signature(&[0x80; 32], &[0x33; 32], 0x01);
    assert_eq!(parse_signature(&sig), Err(DerError::RNegative));
}

#[test]
fn redundant_leading_zero_in_r_is_rejected() {
    let mut r = vec![0x00];
    r.extend_from_slice(&[0x7f; 32]);
    let sig = encode_signature(&r, &[0x33; 32], 0x01);
    assert_eq!(parse_signature(&sig), Err(DerError::RPadding));
}

#[test]
fn s_must_be_tagged_as_integer() {
    let mut sig = valid_signature();
    sig[36] = 0x03;
    assert_eq!(parse_signature(&sig), Err(DerError::SIntegerTag));
}

#[test]
fn s_must_not_be_empty() {
    let sig = vec![0x30, 0x06, 0x02, 0x02, 0x01, 0x01, 0x02, 0x00, 0x01];
    assert_eq!(parse_signature(&sig), Err(DerError::SEmpty));
}

#[test]
fn s_must_not_be_negative() {
    let sig = encode_signature(&[0x7f; 32], &[0x80; 32], 0x01);
    assert_eq!(parse_signature(&sig), Err(DerError::SNegative));
}

#[test]
fn redundant_leading_zero_in_s_is_rejected() {
    let mut s = vec![0x00];
    s.extend_from_slice(&[0x7f; 32]);
    let sig = encode_signature(&[0x7f; 32], &s, 0x01);
    assert_eq!(parse_signature(&sig), Err(DerError::SPadding));
}

#[test]
fn hex_form_validates_the_same_bytes() {
    let sig = valid_signature();
    let hex: String = sig.iter().map(|b| format!("{b:02x}")).collect();
    assert!(is_valid_signature_encoding_hex(&hex));
    assert!(!is_valid_signature_encoding_hex("30zz"));
    assert!(!is_valid_signature_encoding_hex("300"));
}
