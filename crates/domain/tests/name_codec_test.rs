mod helpers;

use helpers::PacketBuilder;
use relay_dns_domain::wire::name::{decode_name, MAX_NAME_STEPS};
use relay_dns_domain::{DomainError, Name};

fn google_with_pointer() -> (Vec<u8>, usize) {
    let builder = PacketBuilder::new(0x0001, 0x0100).name("www.google.com");
    let pointer_at = builder.offset();
    (builder.pointer(12).build(), pointer_at)
}

#[test]
fn test_pointer_expands_to_same_name() {
    let (buf, pointer_at) = google_with_pointer();

    let (direct, direct_len) = decode_name(&buf, 12).unwrap();
    let (via_pointer, pointer_len) = decode_name(&buf, pointer_at).unwrap();

    assert_eq!(direct, via_pointer);
    assert_eq!(
        direct.as_bytes(),
        b"\x03www\x06google\x03com\x00".as_slice()
    );
    assert_eq!(direct_len, 16);
    assert_eq!(pointer_len, 2);
}

#[test]
fn test_suffix_pointer_counts_prefix_plus_two() {
    let builder = PacketBuilder::new(0x0001, 0x0100).name("google.com");
    let at = builder.offset();
    let buf = builder.name_with_pointer(&["mail"], 12).build();

    let (name, consumed) = decode_name(&buf, at).unwrap();

    assert_eq!(name, Name::from_dotted("mail.google.com").unwrap());
    assert_eq!(consumed, 5 + 2);
}

#[test]
fn test_label_past_end_is_malformed() {
    let buf = PacketBuilder::new(1, 0).raw(&[0x05, b'a', b'b']).build();
    let result = decode_name(&buf, 12);
    assert!(
        matches!(result, Err(DomainError::MalformedName { .. })),
        "got {:?}",
        result
    );
}

#[test]
fn test_missing_terminator_is_malformed() {
    let buf = PacketBuilder::new(1, 0).raw(&[0x03, b'c', b'o', b'm']).build();
    assert!(matches!(
        decode_name(&buf, 12),
        Err(DomainError::MalformedName { .. })
    ));
}

#[test]
fn test_pointer_out_of_bounds_is_malformed() {
    let buf = PacketBuilder::new(1, 0).pointer(0x0400).build();
    assert!(matches!(
        decode_name(&buf, 12),
        Err(DomainError::MalformedName { .. })
    ));
}

#[test]
fn test_self_referencing_pointer_terminates() {
    let buf = PacketBuilder::new(1, 0).pointer(12).build();
    let result = decode_name(&buf, 12);
    match result {
        Err(DomainError::MalformedName { reason, .. }) => {
            assert!(reason.contains(&MAX_NAME_STEPS.to_string()), "{}", reason)
        }
        other => panic!("expected MalformedName, got {:?}", other),
    }
}

#[test]
fn test_pointer_cycle_between_two_offsets_terminates() {
    // 12 -> 14 -> 12 -> ...
    let buf = PacketBuilder::new(1, 0).pointer(14).pointer(12).build();
    assert!(matches!(
        decode_name(&buf, 12),
        Err(DomainError::MalformedName { .. })
    ));
}

#[test]
fn test_long_label_is_accepted_when_decoding() {
    // 64-byte labels are tolerated on decode; only from_dotted enforces 63.
    let mut raw = vec![64u8];
    raw.extend(std::iter::repeat(b'x').take(64));
    raw.push(0);
    let buf = PacketBuilder::new(1, 0).raw(&raw).build();

    let (name, consumed) = decode_name(&buf, 12).unwrap();
    assert_eq!(consumed, 66);
    assert_eq!(name.wire_len(), 66);
}

#[test]
fn test_encode_writes_expanded_bytes() {
    let (buf, pointer_at) = google_with_pointer();
    let (name, _) = decode_name(&buf, pointer_at).unwrap();

    let mut out = Vec::new();
    name.encode(&mut out);

    assert_eq!(out, buf[12..28].to_vec());
}
