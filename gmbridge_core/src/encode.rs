/*!
# `GM Bridge` - Encoding
*/

use crate::{
	engine::{
		self,
		Blob,
		Exception,
		Info,
		Picture,
	},
	GmError,
	ImgRef,
	RGBA8,
};
use std::{
	borrow::Cow,
	io::Write,
};



/// # Encode RGBA.
///
/// Encode the image as `tag` — any format name GraphicsMagick can write,
/// e.g. `"bmp"` — and write the result to `dst` in full.
///
/// ## Errors
///
/// Returns [`GmError::Format`] for an unusable tag, [`GmError::Constitute`]
/// if the engine won't accept the pixels (including empty images),
/// [`GmError::Encode`] if it produces no output, or the writer's own I/O
/// error.
pub fn encode_rgba<W: Write>(mut dst: W, img: ImgRef<'_, RGBA8>, tag: &str)
-> Result<(), GmError> {
	let blob = encode_blob(img, tag)?;
	dst.write_all(&blob)?;
	dst.flush()?;
	Ok(())
}

/// # Encode to Vec.
///
/// Same as [`encode_rgba`], but returns the bytes.
///
/// ## Errors
///
/// See [`encode_rgba`].
pub fn encode_to_vec(img: ImgRef<'_, RGBA8>, tag: &str) -> Result<Vec<u8>, GmError> {
	encode_blob(img, tag).map(|blob| blob.to_vec())
}



/// # Encode Blob.
///
/// The constituted image is dropped (destroyed) before the blob is handed
/// back, whether or not serialization worked.
fn encode_blob(img: ImgRef<'_, RGBA8>, tag: &str) -> Result<Blob, GmError> {
	// Nothing to constitute; zero-height strided views can't be walked either.
	let (width, height) = (img.width(), img.height());
	if width == 0 || height == 0 { return Err(GmError::Constitute); }

	engine::genesis();
	let pixels = contiguous(&img)?;

	let mut exception = Exception::new();
	let mut image = Picture::constitute(&pixels, width, height, &mut exception)?;
	image.set_format(tag)?;

	let info = Info::new().ok_or(GmError::Encode)?;
	let blob = image.to_blob(&info, &mut exception)?;

	log::trace!("Encoded {width}x{height} image as {tag} ({} bytes).", blob.len());
	Ok(blob)
}

/// # Contiguous Pixels.
///
/// The engine wants a packed buffer. Borrow it when the stride already
/// matches the width, otherwise copy the rows out.
fn contiguous<'a>(img: &'a ImgRef<'_, RGBA8>) -> Result<Cow<'a, [RGBA8]>, GmError> {
	let width = img.width();
	let len = width.checked_mul(img.height()).ok_or(GmError::Overflow)?;

	if img.stride() == width {
		img.buf().get(..len).map(Cow::Borrowed).ok_or(GmError::Overflow)
	}
	else {
		let mut out = Vec::with_capacity(len);
		for row in img.rows() { out.extend_from_slice(row); }
		Ok(Cow::Owned(out))
	}
}
