use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const BIN: &str = env!("CARGO_BIN_EXE_cineonheader");

/// Big-endian header with one element and everything else undefined.
fn undefined_header() -> Vec<u8> {
    let mut data = vec![0xffu8; 2048];
    data[..4].copy_from_slice(&0x802A5FD7u32.to_be_bytes());
    data[193] = 1;
    // text fields are empty
    for &(offset, len) in &[
        (24, 8),
        (32, 100),
        (132, 12),
        (144, 12),
        (452, 200),
        (720, 100),
        (820, 12),
        (832, 12),
        (844, 64),
        (908, 32),
        (940, 32),
        (1036, 32),
        (1076, 32),
        (1108, 200),
    ] {
        data[offset..offset + len].iter_mut().for_each(|b| *b = 0);
    }
    data
}

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn text_mode() {
    let file = write_temp(&undefined_header());
    let output = run(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    let swap = cfg!(target_endian = "little");
    assert!(out.starts_with("Version: \nMagic Number: 802a5fd7\n"));
    assert!(out.contains(&format!("\nEndian Swap: {}\n", swap)));
    assert!(out.contains("\nFile Size: 0xffffffff\n"));
    assert!(out.contains("\nNumber of Elements: 1\nImage Element# 1\n  Metric: 0xff\n"));
    assert!(out.contains("\n  High Quantity: 0xffffffff\nWhite Point X: 0xffffffff\n"));
    assert!(out.contains("\nX Offset: 0xffffffff\n"));
    assert!(out.ends_with("Slate Info: \n"));
}

#[test]
fn xml_with_declaration() {
    let file = write_temp(&undefined_header());
    let output = run(&["-x", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.starts_with(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<cineon>\n"
    ));
    assert!(out.contains("  <image_element id=\"1\">\n"));
    assert!(out.ends_with("</cineon>\n"));
}

#[test]
fn xml_without_declaration() {
    let file = write_temp(&undefined_header());
    let output = run(&["-X", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.starts_with("<cineon>\n  <version></version>\n"));
    assert!(out.contains("    <low_quantity>0xffffffff</low_quantity>\n"));
    assert!(out.ends_with("</cineon>\n"));
    assert!(!out.contains("<?xml"));
}

#[test]
fn trailing_image_data_ignored() {
    let mut bytes = undefined_header();
    bytes.extend(std::iter::repeat(0x55).take(10_000));
    let file = write_temp(&bytes);
    let output = run(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn usage_errors() {
    let file = write_temp(&undefined_header());
    let path = file.path().to_str().unwrap();
    for args in &[
        vec![],
        vec![path, path],
        vec!["-q", path],
        vec!["-x", "-X", path],
        vec!["-x"],
        vec![path, "-x"],
        vec!["--", path],
        vec!["-X", "--", path],
    ] {
        let output = run(args);
        assert_eq!(output.status.code(), Some(1), "{:?}", args);
        assert!(stdout(&output).starts_with("usage: "), "{:?}", args);
    }
}

#[test]
fn missing_file() {
    let output = run(&["/nonexistent/frame.cin"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Unable to open file /nonexistent/frame.cin\n");
}

#[test]
fn unreadable_header() {
    let truncated = write_temp(&undefined_header()[..600]);
    let output = run(&[truncated.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Unable to read header\n");

    let not_cineon = write_temp(b"SDPX and more bytes");
    let output = run(&["-x", not_cineon.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Unable to read header\n");
}
