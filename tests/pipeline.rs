use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use png2wad::cli::Cli;
use png2wad::model::{DoomMap, LinedefFlags};
use png2wad::wad::{WadFile, WadKind};

/// `#` wall, `.` room, `D` door, `E` entrance, `X` exit.
fn write_png(path: &Path, rows: &[&str]) {
    let mut img = image::RgbImage::new(rows[0].len() as u32, rows.len() as u32);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let rgb = match c {
                '#' => [255, 255, 255],
                'D' => [128, 128, 0],
                'E' => [255, 255, 0],
                'X' => [0, 255, 0],
                _ => [0, 0, 0],
            };
            img.put_pixel(x as u32, y as u32, image::Rgb(rgb));
        }
    }
    img.save(path).unwrap();
}

fn cli(dir: &Path, inputs: &[PathBuf], extra: &[&str]) -> Cli {
    let config = dir.join("prefs.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }
    let mut argv: Vec<String> = vec!["png2wad".into()];
    argv.extend(inputs.iter().map(|p| p.display().to_string()));
    argv.extend(["-c".into(), config.display().to_string()]);
    argv.extend(["-o".into(), dir.join("out.wad").display().to_string()]);
    argv.extend(["--seed".into(), "1234".into()]);
    argv.extend(extra.iter().map(|s| s.to_string()));
    Cli::try_parse_from(argv).unwrap()
}

const LEVEL: [&str; 5] = ["#######", "#E....#", "###D###", "#....X#", "#######"];

#[test]
fn converts_images_into_playable_maps() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_png(&a, &LEVEL);
    write_png(&b, &["###", "#.#", "###"]);

    let out = png2wad::convert(&cli(dir.path(), &[a, b], &[])).unwrap();
    let wad = WadFile::load_from_file(&out).unwrap();

    assert_eq!(wad.kind, WadKind::Pwad);
    assert_eq!(wad.len(), 12, "two maps × six lumps");

    let map = DoomMap::from_wad(&wad, "MAP01").unwrap();
    assert!(!map.sectors.is_empty());
    assert!(map.linedefs.iter().any(|l| l.special == 1), "door line");
    assert!(map.linedefs.iter().any(|l| l.special == 52), "exit line");
    assert!(map.things.iter().any(|t| t.kind == 1), "player start");
    for line in &map.linedefs {
        assert!(line.v1 < map.vertices().len() && line.v2 < map.vertices().len());
        assert!(line.right < map.sidedefs.len());
        assert_eq!(line.left.is_some(), line.flags.contains(LinedefFlags::TWO_SIDED));
    }
    for side in &map.sidedefs {
        assert!(side.sector < map.sectors.len());
    }

    // an 8×8-cell room: one sector, four merged walls
    let small = DoomMap::from_wad(&wad, "MAP02").unwrap();
    assert_eq!(small.sectors.len(), 1);
    assert_eq!(small.linedefs.len(), 4);
}

#[test]
fn same_seed_same_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    write_png(&a, &LEVEL);

    let args = cli(dir.path(), &[a], &["--iwad"]);
    let first = fs::read(png2wad::convert(&args).unwrap()).unwrap();
    let second = fs::read(png2wad::convert(&args).unwrap()).unwrap();
    assert_eq!(&first[0..4], b"IWAD");
    assert_eq!(first, second);
}

#[test]
fn broken_image_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    let bad = dir.path().join("bad.png");
    write_png(&good, &LEVEL);
    fs::write(&bad, b"not an image").unwrap();

    let out = png2wad::convert(&cli(dir.path(), &[bad, good], &[])).unwrap();
    let wad = WadFile::load_from_file(&out).unwrap();

    assert!(wad.indices_of("MAP01").is_empty());
    assert_eq!(wad.indices_of("MAP02"), vec![0]);
}

#[test]
fn doom1_names_and_limit() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("prefs.json"),
        r#"{ "doom1_format": true, "episode": 2, "generate_things": false }"#,
    )
    .unwrap();

    let inputs: Vec<PathBuf> = (0..10)
        .map(|i| {
            let p = dir.path().join(format!("m{i}.png"));
            write_png(&p, &["###", "#.#", "###"]);
            p
        })
        .collect();

    let out = png2wad::convert(&cli(dir.path(), &inputs, &[])).unwrap();
    let wad = WadFile::load_from_file(&out).unwrap();

    assert_eq!(wad.len(), 9 * 6, "the tenth input does not fit E2M1..E2M9");
    assert_eq!(wad.indices_of("E2M1"), vec![0]);
    assert_eq!(wad.indices_of("E2M9").len(), 1);
}

#[test]
fn no_valid_inputs_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("notes.txt");
    fs::write(&txt, "hello").unwrap();

    assert!(png2wad::convert(&cli(dir.path(), &[txt], &[])).is_err());
    assert!(!dir.path().join("out.wad").exists());
}
