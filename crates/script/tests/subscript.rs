use txkit_script::subscript::{delete_from_script, delete_from_script_hex};

#[test]
fn empty_subscript_is_a_no_op() {
    let script = vec![0x02, 0xaa, 0xbb, 0xac];
    assert_eq!(delete_from_script(&script, &[]), script);
}

#[test]
fn removes_a_unit_aligned_occurrence() {
    // <push aa bb> <push cc> OP_CHECKSIG, removing <push cc>.
    let script = vec![0x02, 0xaa, 0xbb, 0x01, 0xcc, 0xac];
    assert_eq!(
        delete_from_script(&script, &[0x01, 0xcc]),
        vec![0x02, 0xaa, 0xbb, 0xac]
    );
}

#[test]
fn byte_aligned_match_inside_a_push_is_kept() {
    // The bytes 01 cc appear inside the push payload, not on a unit
    // boundary, so nothing is removed.
    let script = vec![0x02, 0x01, 0xcc, 0xac];
    assert_eq!(delete_from_script(&script, &[0x01, 0xcc]), script);
}

#[test]
fn trailing_occurrence_is_removed() {
    let script = vec![0xac, 0x01, 0xcc];
    assert_eq!(delete_from_script(&script, &[0x01, 0xcc]), vec![0xac]);
}

#[test]
fn every_occurrence_is_removed() {
    let script = vec![0x01, 0xcc, 0x02, 0xaa, 0xbb, 0x01, 0xcc];
    assert_eq!(
        delete_from_script(&script, &[0x01, 0xcc]),
        vec![0x02, 0xaa, 0xbb]
    );
}

#[test]
fn match_covering_part_of_a_unit_keeps_the_tail() {
    // The subscript matches the first three bytes of a five-byte push; the
    // unit's remaining bytes stay in the output.
    let script = vec![0x05, 0x01, 0x02, 0x03, 0x04, 0x05];
    assert_eq!(
        delete_from_script(&script, &[0x05, 0x01, 0x02]),
        vec![0x03, 0x04, 0x05]
    );
}

#[test]
fn single_opcode_subscript_removal() {
    // Stripping OP_CODESEPARATOR markers.
    let script = vec![0xab, 0xac, 0xab, 0xad];
    assert_eq!(delete_from_script(&script, &[0xab]), vec![0xac, 0xad]);
}

#[test]
fn subscript_longer_than_script_is_kept() {
    let script = vec![0xac];
    assert_eq!(delete_from_script(&script, &[0xac, 0xac]), script);
}

#[test]
fn hex_representation_is_preserved() {
    assert_eq!(
        delete_from_script_hex("02aabb01ccac", "01cc").expect("hex"),
        "02aabbac"
    );
    assert!(delete_from_script_hex("0", "01").is_err());
}
