mod common;

use common::{
	GARBAGE,
	bmp24,
};
use gmbridge_core::{
	ColorModel,
	GmError,
	ImageConfig,
	ImgVec,
	Limits,
	RGBA8,
	decode,
	decode_any,
	decode_config,
	decode_config_any,
	decode_config_slice,
	decode_slice,
	decode_with_limits,
	encode_rgba,
	encode_to_vec,
	formats,
	init,
};
use std::io::BufReader;

#[test]
fn bmp_1x1_probe_and_decode() {
	let raw = bmp24(1, 1, |_, _| [200, 100, 50]);

	let config = decode_config(BufReader::new(raw.as_slice())).unwrap();
	assert_eq!(config, ImageConfig::new(1, 1));
	assert_eq!(config.color(), ColorModel::Rgba);

	let img = decode(raw.as_slice()).unwrap();
	assert_eq!((img.width(), img.height()), (1, 1));
	assert_eq!(img.buf().as_slice(), &[RGBA8::new(200, 100, 50, 255)]);
}

#[test]
fn decode_matches_probe() {
	let raw = bmp24(7, 3, |x, y| [(x * 30) as u8, (y * 80) as u8, 255]);

	let config = decode_config_slice(&raw).unwrap();
	let img = decode_slice(&raw).unwrap();
	assert_eq!(config.width(), img.width());
	assert_eq!(config.height(), img.height());
	assert_eq!(img.buf().len(), 7 * 3);

	// Top-left origin; the BMP rows were stored bottom-up.
	assert_eq!(img[(2_usize, 0_usize)], RGBA8::new(60, 0, 255, 255));
	assert_eq!(img[(6_usize, 2_usize)], RGBA8::new(180, 160, 255, 255));
}

#[test]
fn probe_leaves_reader_intact() {
	let raw = bmp24(4, 2, |_, _| [1, 2, 3]);
	let mut reader = BufReader::new(raw.as_slice());

	let config = decode_config(&mut reader).unwrap();
	let img = decode(reader).unwrap();
	assert_eq!((config.width(), config.height()), (img.width(), img.height()));
}

#[test]
fn garbage_is_decode_error() {
	assert!(matches!(decode(GARBAGE), Err(GmError::Decode)));
	assert!(matches!(decode_config(GARBAGE), Err(GmError::Decode)));
}

#[test]
fn empty_is_error() {
	assert!(matches!(decode(b"".as_slice()), Err(GmError::Decode)));
	assert!(matches!(decode_config(b"".as_slice()), Err(GmError::Decode)));
}

#[test]
fn truncated_is_error() {
	let raw = bmp24(16, 16, |_, _| [9, 9, 9]);
	let res = decode_slice(&raw[..40]);
	assert!(res.is_err(), "A truncated header should not decode.");
}

#[test]
fn limits() {
	let raw = bmp24(8, 4, |_, _| [0, 0, 0]);
	assert!(decode_with_limits(raw.as_slice(), &Limits::default().with_max_width(8)).is_ok());
	assert!(matches!(
		decode_with_limits(raw.as_slice(), &Limits::default().with_max_height(3)),
		Err(GmError::TooBig)
	));
}

#[test]
fn encode_white_bmp() {
	let img = ImgVec::new(vec![RGBA8::new(255, 255, 255, 255); 4], 2, 2);
	let mut out = Vec::new();
	encode_rgba(&mut out, img.as_ref(), "bmp").unwrap();
	assert!(out.starts_with(b"BM"), "Missing BMP signature.");

	// Uppercase is fine too.
	let out2 = encode_to_vec(img.as_ref(), "BMP").unwrap();
	assert!(out2.starts_with(b"BM"));
}

#[test]
fn encode_roundtrip_dimensions() {
	let raw = bmp24(5, 3, |x, y| [(x * 50) as u8, (y * 100) as u8, 7]);
	let img = decode_slice(&raw).unwrap();

	let encoded = encode_to_vec(img.as_ref(), "bmp").unwrap();
	let again = decode_slice(&encoded).unwrap();
	assert_eq!((again.width(), again.height()), (5, 3));
}

#[test]
fn encode_sub_image() {
	let buf: Vec<RGBA8> = (0..16_u8).map(|v| RGBA8::new(v * 10, v, 0, 255)).collect();
	let img = ImgVec::new(buf, 4, 4);
	let sub = img.sub_image(1, 1, 2, 3);

	let encoded = encode_to_vec(sub, "bmp").unwrap();
	let again = decode_slice(&encoded).unwrap();
	assert_eq!((again.width(), again.height()), (2, 3));
	assert_eq!(again[(0_usize, 0_usize)], RGBA8::new(50, 5, 0, 255));
}

#[test]
fn encode_errors() {
	let img = ImgVec::new(vec![RGBA8::new(0, 0, 0, 255); 4], 2, 2);

	assert!(matches!(encode_to_vec(img.as_ref(), ""), Err(GmError::Format)));
	assert!(matches!(encode_to_vec(img.as_ref(), "b\0mp"), Err(GmError::Format)));

	let long = "x".repeat(1 << 16);
	assert!(matches!(encode_to_vec(img.as_ref(), &long), Err(GmError::Format)));

	let empty: ImgVec<RGBA8> = ImgVec::new(Vec::new(), 1, 0);
	assert!(matches!(encode_to_vec(empty.as_ref(), "bmp"), Err(GmError::Constitute)));

	// Zero-height crop of a wider buffer.
	let big = ImgVec::new(vec![RGBA8::new(0, 0, 0, 255); 16], 4, 4);
	assert!(matches!(encode_to_vec(big.sub_image(0, 0, 2, 0), "bmp"), Err(GmError::Constitute)));
	let mut out = Vec::new();
	assert!(matches!(encode_rgba(&mut out, big.sub_image(0, 0, 2, 0), "bmp"), Err(GmError::Constitute)));
	assert!(out.is_empty());
}

#[test]
fn dispatcher() {
	init();
	assert!(formats().contains(&"bmp"));

	let raw = bmp24(3, 2, |_, _| [10, 20, 30]);

	let (config, tag) = decode_config_any(raw.as_slice()).unwrap();
	assert_eq!(tag, "bmp");
	assert_eq!(config, ImageConfig::new(3, 2));

	let (img, tag) = decode_any(raw.as_slice()).unwrap();
	assert_eq!(tag, "bmp");
	assert_eq!((img.width(), img.height()), (3, 2));

	assert!(matches!(decode_any(GARBAGE), Err(GmError::UnknownFormat)));
	assert!(matches!(decode_config_any(GARBAGE), Err(GmError::UnknownFormat)));

	// The signature matched, but the rest is junk.
	let mut bad = b"BM".to_vec();
	bad.extend_from_slice(GARBAGE);
	assert!(matches!(decode_any(bad.as_slice()), Err(GmError::Decode)));
}
