/*!
# `GM Bridge` - Format Registry

A process-wide table of format tags, their signatures, and the functions
that handle them, plus a dispatcher that sniffs an input against the table.
*/

use crate::{
	decode,
	decode_config,
	engine,
	GmError,
	ImageConfig,
	ImgVec,
	RGBA8,
};
use std::{
	io::{
		BufRead,
		BufReader,
		Chain,
		Cursor,
		Read,
	},
	sync::{
		Once,
		PoisonError,
		RwLock,
	},
};



/// # Built-In Formats.
///
/// Tag and signature pairs registered by [`init`].
const BUILTIN: [(&str, &str); 4] = [
	("dpx", "SDPX"),
	("psd", "8BPS"),
	("xcf", "gimp xcf"),
	("bmp", "BM"),
];

/// # Sniff Length.
///
/// The most bytes collected up front by [`decode_config_any`]. Every
/// signature has to fit, and the probe sees all of it.
const SNIFF_LEN: u64 = 8192;

/// # Registration Gate.
static INIT: Once = Once::new();

/// # Registered Formats.
static FORMATS: RwLock<Vec<Format>> = RwLock::new(Vec::new());



/// # Decode Callback.
pub type DecodeFn = fn(&mut dyn Read) -> Result<ImgVec<RGBA8>, GmError>;

/// # Decode Config Callback.
pub type DecodeConfigFn = fn(&mut dyn BufRead) -> Result<ImageConfig, GmError>;



#[derive(Debug, Clone, Copy)]
/// # Format.
///
/// A single registry entry.
pub struct Format {
	/// # Tag.
	name: &'static str,

	/// # Signature.
	///
	/// A `?` matches any byte.
	magic: &'static str,

	/// # Decode.
	decode: DecodeFn,

	/// # Decode Config.
	decode_config: DecodeConfigFn,
}

impl Format {
	#[must_use]
	/// # Tag.
	pub const fn name(&self) -> &'static str { self.name }

	#[must_use]
	/// # Signature.
	pub const fn magic(&self) -> &'static str { self.magic }

	#[must_use]
	/// # Matches?
	///
	/// Returns `true` if `src` begins with this format's signature.
	pub fn matches(&self, src: &[u8]) -> bool {
		let magic = self.magic.as_bytes();
		src.len() >= magic.len() &&
		magic.iter().zip(src).all(|(m, s)| *m == b'?' || m == s)
	}
}



/// # Initialize.
///
/// Bootstrap GraphicsMagick and register the built-in formats: `dpx`, `psd`,
/// `xcf`, and `bmp`. This only does anything the first time it is called.
///
/// The dispatch functions call this automatically, but long-running
/// programs should call it once at startup anyway.
pub fn init() {
	INIT.call_once(|| {
		engine::genesis();
		for (name, magic) in BUILTIN {
			let _res = register_format(name, magic, decode_dyn, decode_config_dyn);
		}
		log::debug!("Registered {} image formats.", BUILTIN.len());
	});
}

/// # Register Format.
///
/// Add an entry to the registry. This is meant for startup code; entries
/// are tried in the order they were added, and are never removed.
///
/// Tags are unique. Returns `false`, leaving the existing entry alone, if
/// `name` is already taken.
pub fn register_format(
	name: &'static str,
	magic: &'static str,
	decode: DecodeFn,
	decode_config: DecodeConfigFn,
) -> bool {
	let mut list = FORMATS.write().unwrap_or_else(PoisonError::into_inner);
	if list.iter().any(|f| f.name == name) {
		log::warn!("The {name} format is already registered.");
		return false;
	}

	list.push(Format { name, magic, decode, decode_config });
	true
}

#[must_use]
/// # Registered Formats.
///
/// Return the tags of every registered format, in registration order.
pub fn formats() -> Vec<&'static str> {
	init();
	FORMATS.read()
		.unwrap_or_else(PoisonError::into_inner)
		.iter()
		.map(|f| f.name)
		.collect()
}

/// # Decode Any.
///
/// Sniff the input against the registry and decode it with the first
/// format whose signature matches, returning the image and that format's
/// tag.
///
/// ## Errors
///
/// Returns [`GmError::UnknownFormat`] if no signature matches, otherwise
/// whatever the matched decoder returns.
pub fn decode_any<R: Read>(mut src: R) -> Result<(ImgVec<RGBA8>, &'static str), GmError> {
	init();

	let mut raw = Vec::new();
	src.read_to_end(&mut raw)?;
	let format = sniff(&raw).ok_or(GmError::UnknownFormat)?;

	log::trace!("Decoding as {}.", format.name);
	(format.decode)(&mut raw.as_slice()).map(|img| (img, format.name))
}

/// # Decode Config Any.
///
/// Sniff the start of the input against the registry and probe it with the
/// first format whose signature matches, returning the config and that
/// format's tag. Short reads are retried until [`SNIFF_LEN`] bytes or EOF,
/// so slow pipes sniff the same as files.
///
/// ## Errors
///
/// Returns [`GmError::UnknownFormat`] if no signature matches, otherwise
/// whatever the matched prober returns.
pub fn decode_config_any<R: Read>(src: R) -> Result<(ImageConfig, &'static str), GmError> {
	init();

	let (prefix, mut reader) = peek(src)?;
	let format = sniff(&prefix).ok_or(GmError::UnknownFormat)?;

	log::trace!("Probing as {}.", format.name);
	(format.decode_config)(&mut reader).map(|cfg| (cfg, format.name))
}



/// # Peek.
///
/// Collect up to [`SNIFF_LEN`] bytes, then stitch them back in front of the
/// rest of the stream. The copy is the first thing the reader returns.
fn peek<R: Read>(mut src: R)
-> Result<(Vec<u8>, BufReader<Chain<Cursor<Vec<u8>>, R>>), GmError> {
	let mut prefix = Vec::new();
	src.by_ref().take(SNIFF_LEN).read_to_end(&mut prefix)?;
	let reader = BufReader::new(Cursor::new(prefix.clone()).chain(src));
	Ok((prefix, reader))
}

/// # Sniff.
///
/// Find the first registered format matching the start of `src`. The entry
/// is copied out so the lock isn't held while decoding.
fn sniff(src: &[u8]) -> Option<Format> {
	FORMATS.read()
		.unwrap_or_else(PoisonError::into_inner)
		.iter()
		.find(|f| f.matches(src))
		.copied()
}

/// # Decode (Callback).
fn decode_dyn(src: &mut dyn Read) -> Result<ImgVec<RGBA8>, GmError> { decode(src) }

/// # Decode Config (Callback).
fn decode_config_dyn(src: &mut dyn BufRead) -> Result<ImageConfig, GmError> {
	decode_config(src)
}
