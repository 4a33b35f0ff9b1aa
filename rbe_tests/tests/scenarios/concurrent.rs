use super::project::gen_project;
use anyhow::{anyhow, Result};
use rand::Rng;
use rbe_types::config::{CodecConfig, Format};
use rbe_types::streams;
use std::thread;

const THREADS: usize = 8;

/// Independent encodes share nothing, so each thread's bytes must match a
/// single-threaded encode of the same tree.
pub fn test_concurrent_encodes() -> Result<()> {
    let mut rng = rand::thread_rng();
    let projects = (0..THREADS)
        .map(|_| gen_project(rng.gen_range(1..200)))
        .collect::<Vec<_>>();

    let mut expected = vec![];
    for project in projects.iter() {
        let mut buf: Vec<u8> = vec![];
        streams::write_packed(&mut buf, project)?;
        expected.push(buf);
    }

    let encoded = thread::scope(|s| {
        let handles = projects
            .iter()
            .map(|project| {
                s.spawn(move || -> Result<Vec<u8>> {
                    let config = CodecConfig::default().with_format(Format::Packed);
                    let mut buf: Vec<u8> = vec![];
                    for _ in 0..10 {
                        buf.clear();
                        streams::write_to(&mut buf, project, &config)?;
                        assert_eq!(&streams::read_from(&buf[..], &config)?, project);
                    }
                    Ok(buf)
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| anyhow!("Encoder thread panicked"))
                    .and_then(|res| res)
            })
            .collect::<Result<Vec<_>>>()
    })?;

    assert_eq!(encoded, expected);
    Ok(())
}
