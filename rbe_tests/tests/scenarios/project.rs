use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};
use rbe_types::config::{CodecConfig, Format};
use rbe_types::serde::{Element, KeyTable, ReadResult};
use rbe_types::streams::{self, ElementReader};
use rbe_types::types::{Dictionary, List};
use uuid::Uuid;

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Pod, Zeroable)]
pub struct FrameSpan {
    pub begin: i64,
    pub len: i64,
}

/// A project-file-shaped tree with `clips` sibling dictionaries sharing one vocabulary.
pub fn gen_project(clips: usize) -> Element {
    let mut root = Dictionary::new();
    root.set_int("Version", 3);
    root.set_guid("Id", Uuid::from_u128(0x5eed));

    let meta = root.get_or_create_dictionary("Meta");
    meta.set_string("FilePath", "C:/projects/demo.png");
    meta.set_bool("IsRawBitmapMode", false);
    meta.set_double("Zoom", 1.25);

    let list = root.get_or_create_list("Clips");
    for i in 0..clips {
        let clip = list.push_dictionary();
        clip.set_struct(
            "FrameSpan",
            &FrameSpan {
                begin: i as i64 * 30,
                len: 30,
            },
        );
        clip.set_string("DisplayName", format!("Clip {i}"));
        clip.set_guid("Resource", Uuid::from_u128(i as u128));
    }

    Element::Dictionary(root)
}

pub fn test_flat_dictionary() -> Result<()> {
    let mut dict = Dictionary::new();
    dict.set_string("FilePath", "C:/x.png");
    dict.set_bool("IsRawBitmapMode", false);

    let mut buf: Vec<u8> = vec![];
    streams::write_plain(&mut buf, &Element::Dictionary(dict))?;
    let back = streams::read_plain(&buf[..])?;

    let back = back
        .as_dictionary()
        .ok_or_else(|| anyhow!("Root is {back}, not a dictionary"))?;
    assert_eq!(back.get_string("FilePath")?, "C:/x.png");
    assert_eq!(back.get_bool("IsRawBitmapMode")?, false);
    assert_eq!(back.len(), 2);

    Ok(())
}

pub fn test_nested_array() -> Result<()> {
    let mut root = Dictionary::new();
    root.create_dictionary("Inner")?
        .set_byte_array("Bytes", vec![0u8, 1, 2, 3, 4]);

    let mut buf: Vec<u8> = vec![];
    streams::write_packed(&mut buf, &Element::Dictionary(root))?;
    let back = streams::read_packed(&buf[..])?;

    let bytes = back
        .as_dictionary()
        .ok_or_else(|| anyhow!("Root is {back}, not a dictionary"))?
        .get_dictionary("Inner")?
        .get_byte_array("Bytes")?;
    assert_eq!(bytes, [0, 1, 2, 3, 4]);

    Ok(())
}

pub fn test_repeated_keys() -> Result<()> {
    let mut list = List::new();
    for i in 0..100 {
        let dict = list.push_dictionary();
        dict.set_struct(
            "FrameSpan",
            &FrameSpan {
                begin: i,
                len: 1,
            },
        );
        dict.set_string("DisplayName", format!("#{i}"));
        dict.set_string("Resource", "res://shared");
    }
    let root = Element::List(list);

    let table = KeyTable::collect(&root)?;
    assert_eq!(
        table.iter().collect::<Vec<_>>(),
        ["FrameSpan", "DisplayName", "Resource"]
    );

    let mut packed: Vec<u8> = vec![];
    let mut plain: Vec<u8> = vec![];
    streams::write_packed(&mut packed, &root)?;
    streams::write_plain(&mut plain, &root)?;
    assert!(packed.len() < plain.len(), "{} {}", packed.len(), plain.len());

    let mut reader = ElementReader::new(&packed[..], &CodecConfig::default());
    match reader.read_packed()? {
        ReadResult::EOF => return Err(anyhow!("Premature EOF")),
        ReadResult::Some(r_len, (table, back)) => {
            assert_eq!(r_len, packed.len());
            assert_eq!(table.len(), 3);
            assert_eq!(back, root);

            let spans = back
                .as_list()
                .ok_or_else(|| anyhow!("Root is {back}, not a list"))?
                .iter()
                .filter_map(Element::as_dictionary)
                .map(|dict| dict.get_struct::<FrameSpan>("FrameSpan"))
                .collect::<rbe_types::Result<Vec<_>>>()?;
            assert_eq!(spans.len(), 100);
            assert_eq!(spans[99], FrameSpan { begin: 99, len: 1 });
        }
    }
    assert!(matches!(reader.read(Format::Packed)?, ReadResult::EOF));

    Ok(())
}
