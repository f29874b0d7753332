/*!
# `GM Bridge` - Decoding
*/

use crate::{
	engine::{
		self,
		Exception,
		Info,
		Picture,
	},
	GmError,
	ImageConfig,
	ImgVec,
	Limits,
	RGBA8,
};
use std::io::{
	BufRead,
	Read,
};



/// # Decode.
///
/// Read the source to the end and decode it into RGBA pixels. There is no
/// streaming; the whole file is held in memory for the engine.
///
/// ## Errors
///
/// I/O errors from the reader are returned as-is. Otherwise this returns
/// [`GmError::Decode`] if the data isn't an image the engine understands, or
/// [`GmError::Dispatch`] if the engine can't produce RGBA pixels for it.
pub fn decode<R: Read>(src: R) -> Result<ImgVec<RGBA8>, GmError> {
	decode_with_limits(src, &Limits::default())
}

/// # Decode (With Limits).
///
/// Same as [`decode`], but the reported dimensions are checked against
/// `limits` before the pixel buffer is allocated.
///
/// ## Errors
///
/// In addition to the [`decode`] errors, this returns [`GmError::TooBig`]
/// when a limit is exceeded.
pub fn decode_with_limits<R: Read>(mut src: R, limits: &Limits)
-> Result<ImgVec<RGBA8>, GmError> {
	let mut raw = Vec::new();
	src.read_to_end(&mut raw)?;
	decode_raw(&raw, limits)
}

/// # Decode Slice.
///
/// Decode an image that's already in memory.
///
/// ## Errors
///
/// See [`decode`].
pub fn decode_slice(raw: &[u8]) -> Result<ImgVec<RGBA8>, GmError> {
	decode_raw(raw, &Limits::default())
}

/// # Decode Config.
///
/// Read the dimensions from the image header without decoding any pixels.
///
/// Only the reader's buffered prefix is examined; if nothing has been
/// buffered yet, the buffer is filled once. Nothing is consumed, so the same
/// reader can be handed to [`decode`] afterwards.
///
/// ## Errors
///
/// I/O errors from the reader are returned as-is; anything the engine can't
/// parse is [`GmError::Decode`].
pub fn decode_config<R: BufRead>(mut src: R) -> Result<ImageConfig, GmError> {
	let prefix = src.fill_buf()?;
	decode_config_slice(prefix)
}

/// # Decode Config (Slice).
///
/// Same as [`decode_config`], for bytes already in memory.
///
/// ## Errors
///
/// Returns [`GmError::Decode`] if the engine can't parse the header.
pub fn decode_config_slice(raw: &[u8]) -> Result<ImageConfig, GmError> {
	engine::genesis();

	let mut exception = Exception::new();
	let info = Info::new().ok_or(GmError::Decode)?;
	let image = Picture::ping(&info, raw, &mut exception)?;
	let (width, height) = image.dimensions()?;

	log::trace!("Pinged {width}x{height} image.");
	Ok(ImageConfig::new(width, height))
}



/// # Decode Raw.
///
/// The pixel buffer is allocated here, up front, and the engine writes
/// straight into it; the same `Vec` becomes the returned image.
fn decode_raw(raw: &[u8], limits: &Limits) -> Result<ImgVec<RGBA8>, GmError> {
	engine::genesis();

	let mut exception = Exception::new();
	let info = Info::new().ok_or(GmError::Decode)?;
	let image = Picture::from_blob(&info, raw, &mut exception)?;

	let (width, height) = image.dimensions()?;
	if width == 0 || height == 0 { return Err(GmError::Decode); }
	limits.check(width, height)?;

	let pixels = width.checked_mul(height).ok_or(GmError::Overflow)?;
	let size = ImageConfig::new(width, height).buffer_len().ok_or(GmError::Overflow)?;
	let mut buf = vec![RGBA8::default(); pixels];
	debug_assert_eq!(std::mem::size_of_val(buf.as_slice()), size, "BUG: pixel buffer size mismatch.");

	// If this fails, the half-written buffer is dropped with the error.
	image.dispatch_rgba(&mut buf, &mut exception)?;

	log::trace!("Decoded {width}x{height} image.");
	Ok(ImgVec::new(buf, width, height))
}



#[cfg(test)]
mod tests {
	use super::*;
	use std::io::{
		self,
		BufReader,
	};

	/// # Failing Reader.
	struct Broken;

	impl Read for Broken {
		fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken"))
		}
	}

	#[test]
	fn t_io_passthrough() {
		let Err(GmError::Io(e)) = decode(Broken) else { panic!("Expected an I/O error.") };
		assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);

		let Err(GmError::Io(e)) = decode_config(BufReader::new(Broken)) else {
			panic!("Expected an I/O error.")
		};
		assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
	}

	#[test]
	fn t_empty() {
		assert!(matches!(decode(io::empty()), Err(GmError::Decode)));
		assert!(matches!(decode_config(io::empty()), Err(GmError::Decode)));
	}
}
