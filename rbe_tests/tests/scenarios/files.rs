use super::project::gen_project;
use anyhow::Result;
use rbe_types::config::{CodecConfig, Format};
use rbe_types::streams;
use rbe_types::RbeError;
use std::fs;

pub fn test_file_round_trips() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let project = gen_project(20);

    let plain_path = dir.path().join("project.plain.rbe");
    let w_len = streams::write_file_plain(&plain_path, &project)?;
    assert_eq!(fs::metadata(&plain_path)?.len(), *w_len as u64);
    assert_eq!(streams::read_file_plain(&plain_path)?, project);

    let packed_path = dir.path().join("project.rbe");
    let w_len = streams::write_file_packed(&packed_path, &project)?;
    assert_eq!(fs::metadata(&packed_path)?.len(), *w_len as u64);
    assert_eq!(streams::read_file_packed(&packed_path)?, project);

    // Overwriting truncates the old contents.
    let small = gen_project(1);
    let config = CodecConfig::default().with_format(Format::Packed);
    streams::write_to_file(&packed_path, &small, &config)?;
    assert_eq!(streams::read_from_file(&packed_path, &config)?, small);

    test_file_errors(dir.path())?;

    Ok(())
}

fn test_file_errors(dir: &std::path::Path) -> Result<()> {
    let missing = dir.join("missing.rbe");
    let err = streams::read_file_packed(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("missing.rbe"), "{err:#}");

    // A file cut short keeps the codec error reachable under the path context.
    let cut_path = dir.join("cut.rbe");
    let mut buf: Vec<u8> = vec![];
    streams::write_packed(&mut buf, &gen_project(3))?;
    fs::write(&cut_path, &buf[..buf.len() / 2])?;
    let err = streams::read_file_packed(&cut_path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RbeError>(),
        Some(RbeError::Truncated { .. })
    ));
    assert!(format!("{err:#}").contains("cut.rbe"), "{err:#}");

    // The same bytes read in the wrong format fail rather than produce a tree.
    assert!(streams::read_file_plain(&cut_path).is_err());

    Ok(())
}
