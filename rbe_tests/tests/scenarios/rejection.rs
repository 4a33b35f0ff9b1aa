use super::project::gen_project;
use anyhow::Result;
use rbe_types::serde::{Element, ElementType, MAX_DEPTH};
use rbe_types::streams;
use rbe_types::types::Dictionary;
use rbe_types::RbeError;

pub fn test_malformed_input() -> Result<()> {
    test_unknown_tags();
    test_bad_lengths();
    test_truncations()?;
    test_bad_key_table();
    test_deep_nesting();
    test_unwritable_trees();
    Ok(())
}

fn test_unknown_tags() {
    for tag in [0u8, 20, 99, 0xFF] {
        let res = streams::read_plain(&[tag, 0, 0][..]);
        assert!(
            matches!(res, Err(RbeError::UnknownElementType(t)) if t == tag),
            "{res:?}"
        );
    }
}

fn test_bad_lengths() {
    // Dictionary whose entry count carries the reserved width tag.
    let buf = [ElementType::Dictionary as u8, 0b0000_0011];
    assert!(matches!(
        streams::read_plain(&buf[..]),
        Err(RbeError::InvalidLengthTag(0b0000_0011))
    ));

    // String declaring 1000 bytes with 3 present.
    let mut buf = vec![ElementType::String as u8];
    buf.extend_from_slice(&((1000u16 << 2) | 0b01).to_le_bytes());
    buf.extend_from_slice(b"abc");
    assert!(matches!(
        streams::read_plain(&buf[..]),
        Err(RbeError::Truncated { .. })
    ));
}

fn test_truncations() -> Result<()> {
    let project = gen_project(3);

    let mut plain: Vec<u8> = vec![];
    streams::write_plain(&mut plain, &project)?;
    for cut in 0..plain.len() {
        assert!(streams::read_plain(&plain[..cut]).is_err(), "cut at {cut}");
    }

    let mut packed: Vec<u8> = vec![];
    streams::write_packed(&mut packed, &project)?;
    for cut in 0..packed.len() {
        assert!(streams::read_packed(&packed[..cut]).is_err(), "cut at {cut}");
    }

    assert_eq!(streams::read_packed(&packed[..])?, project);
    Ok(())
}

fn test_bad_key_table() {
    // Table of one key; the root dictionary refers to index 5.
    let buf = [1 << 2, 1, b'k', ElementType::Dictionary as u8, 1 << 2, 5 << 2];
    assert!(matches!(
        streams::read_packed(&buf[..]),
        Err(RbeError::KeyIndexOutOfRange {
            index: 5,
            table_len: 1
        })
    ));

    // The same key listed twice.
    let buf = [2 << 2, 1, b'k', 1, b'k', ElementType::Byte as u8, 0];
    assert!(matches!(
        streams::read_packed(&buf[..]),
        Err(RbeError::DuplicateKey(k)) if k == "k"
    ));
}

fn test_deep_nesting() {
    let mut buf: Vec<u8> = [ElementType::List as u8, 1 << 2].repeat(20_000);
    buf.extend_from_slice(&[ElementType::Byte as u8, 0]);
    assert!(matches!(
        streams::read_plain(&buf[..]),
        Err(RbeError::TooDeep { depth }) if depth == MAX_DEPTH + 1
    ));
}

fn test_unwritable_trees() {
    let mut inner = Dictionary::new();
    inner.set_int("x".repeat(300), 1);
    let mut root = Dictionary::new();
    root.set_dictionary("Inner", inner);
    let root = Element::Dictionary(root);

    let mut buf: Vec<u8> = vec![];
    let res = streams::write_packed(&mut buf, &root);
    assert!(
        matches!(res, Err(RbeError::KeyTooLong { key_len: 300 })),
        "{res:?}"
    );
    assert!(buf.is_empty());
}
