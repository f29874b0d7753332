/*!
# `GM Bridge` - Engine

This uses [`graphicsmagick-sys`](https://crates.io/crates/graphicsmagick-sys)
bindings to GraphicsMagick's core API.

Every handle the library hands us gets its own Rust wrapper whose `Drop`
releases it, so early returns can't leak anything.
*/

use crate::{
	GmError,
	RGBA8,
};
use graphicsmagick_sys::{
	BlobToImage,
	CloneImageInfo,
	ConstituteImage,
	DestroyExceptionInfo,
	DestroyImage,
	DestroyImageInfo,
	DispatchImage,
	ExceptionInfo,
	GetExceptionInfo,
	Image,
	ImageInfo,
	ImageToBlob,
	InitializeMagick,
	MagickFree,
	PingBlob,
	StorageType_CharPixel,
};
use std::{
	borrow::Cow,
	ffi::{
		CStr,
		c_char,
		c_ulong,
		c_void,
	},
	ops::Deref,
	ptr::NonNull,
	sync::Once,
};



/// # Pixel Map.
///
/// The channel order used for both dispatch and constitution.
const MAP_RGBA: &CStr = c"RGBA";

/// # Engine Bootstrap.
static GENESIS: Once = Once::new();



#[allow(unsafe_code)]
/// # Genesis.
///
/// Initialize GraphicsMagick. This runs once per process; subsequent calls
/// are no-ops. Every public entry point calls it before touching the engine.
///
/// GraphicsMagick aborts the process itself if its initialization fails, so
/// there is nothing to recover from here.
pub(crate) fn genesis() {
	GENESIS.call_once(|| {
		log::trace!("Initializing GraphicsMagick.");
		unsafe { InitializeMagick(std::ptr::null()); }
	});
}



/// # Exception Wrapper.
///
/// The struct is boxed so its address stays put between initialization and
/// destruction.
pub(crate) struct Exception(Box<ExceptionInfo>);

impl Drop for Exception {
	#[allow(unsafe_code)]
	#[inline]
	fn drop(&mut self) { unsafe { DestroyExceptionInfo(&raw mut *self.0); } }
}

impl Exception {
	#[allow(unsafe_code)]
	/// # New.
	pub(crate) fn new() -> Self {
		let mut raw = Box::<ExceptionInfo>::new_uninit();
		unsafe {
			GetExceptionInfo(raw.as_mut_ptr());
			Self(raw.assume_init())
		}
	}

	/// # Raw Pointer.
	fn as_mut_ptr(&mut self) -> *mut ExceptionInfo { &raw mut *self.0 }

	#[allow(unsafe_code)]
	/// # Reason.
	///
	/// Return the engine's explanation for the last failure, if it left one.
	fn reason(&self) -> Option<Cow<'_, str>> {
		let ptr = self.0.reason;
		if ptr.is_null() { None }
		else { Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy()) }
	}

	/// # Fail.
	///
	/// Log whatever the engine had to say and return `err`. The exception's
	/// contents are informational only; they never change the outcome.
	pub(crate) fn fail(&self, err: GmError) -> GmError {
		match self.reason() {
			Some(reason) => log::debug!("{} GraphicsMagick: {reason}", err.as_str()),
			None => log::debug!("{}", err.as_str()),
		}
		err
	}
}



/// # Image Info Wrapper.
///
/// A fresh default context is cloned for each operation.
pub(crate) struct Info(NonNull<ImageInfo>);

impl Drop for Info {
	#[allow(unsafe_code)]
	#[inline]
	fn drop(&mut self) { unsafe { DestroyImageInfo(self.0.as_ptr()); } }
}

impl Info {
	#[allow(unsafe_code)]
	/// # New.
	pub(crate) fn new() -> Option<Self> {
		NonNull::new(unsafe { CloneImageInfo(std::ptr::null()) }).map(Self)
	}
}



/// # Image Wrapper.
pub(crate) struct Picture(NonNull<Image>);

impl Drop for Picture {
	#[allow(unsafe_code)]
	#[inline]
	fn drop(&mut self) {
		log::trace!("Destroying image handle.");
		unsafe { DestroyImage(self.0.as_ptr()); }
	}
}

/// ## Construction.
impl Picture {
	#[allow(unsafe_code)]
	/// # From Blob.
	///
	/// Fully decode an encoded image.
	///
	/// ## Errors
	///
	/// Returns [`GmError::Decode`] if the engine can't make sense of it.
	pub(crate) fn from_blob(info: &Info, raw: &[u8], exception: &mut Exception)
	-> Result<Self, GmError> {
		if raw.is_empty() { return Err(GmError::Decode); }
		let len = raw.len().try_into().map_err(|_| GmError::Overflow)?;
		NonNull::new(unsafe {
			BlobToImage(
				info.0.as_ptr(),
				raw.as_ptr().cast::<c_void>(),
				len,
				exception.as_mut_ptr(),
			)
		})
			.map(Self)
			.ok_or_else(|| exception.fail(GmError::Decode))
	}

	#[allow(unsafe_code)]
	/// # Ping Blob.
	///
	/// Read just enough of an encoded image to learn its dimensions. The
	/// resulting handle has no pixels.
	///
	/// ## Errors
	///
	/// Returns [`GmError::Decode`] if the engine can't make sense of it.
	pub(crate) fn ping(info: &Info, raw: &[u8], exception: &mut Exception)
	-> Result<Self, GmError> {
		if raw.is_empty() { return Err(GmError::Decode); }
		let len = raw.len().try_into().map_err(|_| GmError::Overflow)?;
		NonNull::new(unsafe {
			PingBlob(
				info.0.as_ptr(),
				raw.as_ptr().cast::<c_void>(),
				len,
				exception.as_mut_ptr(),
			)
		})
			.map(Self)
			.ok_or_else(|| exception.fail(GmError::Decode))
	}

	#[allow(unsafe_code)]
	/// # Constitute.
	///
	/// Wrap a packed RGBA buffer as an engine image. The engine copies the
	/// pixels, so the slice only needs to outlive the call.
	///
	/// ## Errors
	///
	/// Returns [`GmError::Overflow`] if the dimensions don't fit the engine's
	/// types or don't match the buffer, or [`GmError::Constitute`] if the
	/// engine rejects the data.
	pub(crate) fn constitute(
		pixels: &[RGBA8],
		width: usize,
		height: usize,
		exception: &mut Exception,
	) -> Result<Self, GmError> {
		if width == 0 || height == 0 { return Err(GmError::Constitute); }
		if width.checked_mul(height) != Some(pixels.len()) {
			return Err(GmError::Overflow);
		}

		let columns = c_ulong::try_from(width).map_err(|_| GmError::Overflow)?;
		let rows = c_ulong::try_from(height).map_err(|_| GmError::Overflow)?;

		NonNull::new(unsafe {
			ConstituteImage(
				columns,
				rows,
				MAP_RGBA.as_ptr(),
				StorageType_CharPixel,
				pixels.as_ptr().cast::<c_void>(),
				exception.as_mut_ptr(),
			)
		})
			.map(Self)
			.ok_or_else(|| exception.fail(GmError::Constitute))
	}
}

/// ## Getters and Setters.
impl Picture {
	#[allow(unsafe_code)]
	/// # Dimensions.
	///
	/// ## Errors
	///
	/// Returns [`GmError::Overflow`] if the engine's values don't fit a
	/// `usize`.
	pub(crate) fn dimensions(&self) -> Result<(usize, usize), GmError> {
		let image = unsafe { self.0.as_ref() };
		let width = usize::try_from(image.columns).map_err(|_| GmError::Overflow)?;
		let height = usize::try_from(image.rows).map_err(|_| GmError::Overflow)?;
		Ok((width, height))
	}

	#[allow(unsafe_code)]
	/// # Set Format.
	///
	/// Write the target format tag into the image's fixed-size `magick`
	/// slot.
	///
	/// ## Errors
	///
	/// Returns [`GmError::Format`] if the tag is empty, contains a NUL, or
	/// would not fit (terminator included).
	pub(crate) fn set_format(&mut self, tag: &str) -> Result<(), GmError> {
		let image = unsafe { self.0.as_mut() };
		write_tag(&mut image.magick, tag)
	}
}

/// ## Conversion.
impl Picture {
	#[allow(unsafe_code)]
	/// # Dispatch RGBA.
	///
	/// Have the engine write the image's pixels straight into `buf`, which
	/// must hold exactly `width × height` pixels.
	///
	/// ## Errors
	///
	/// Returns [`GmError::Overflow`] if the buffer size is wrong, or
	/// [`GmError::Dispatch`] if the engine fails.
	pub(crate) fn dispatch_rgba(&self, buf: &mut [RGBA8], exception: &mut Exception)
	-> Result<(), GmError> {
		let (width, height) = self.dimensions()?;
		if buf.is_empty() || width.checked_mul(height) != Some(buf.len()) {
			return Err(GmError::Overflow);
		}

		let image = unsafe { self.0.as_ref() };
		let res = unsafe {
			DispatchImage(
				self.0.as_ptr(),
				0,
				0,
				image.columns,
				image.rows,
				MAP_RGBA.as_ptr(),
				StorageType_CharPixel,
				buf.as_mut_ptr().cast::<c_void>(),
				exception.as_mut_ptr(),
			)
		};

		if res == 0 { Err(exception.fail(GmError::Dispatch)) }
		else { Ok(()) }
	}

	#[allow(unsafe_code)]
	/// # To Blob.
	///
	/// Serialize the image using whatever format its `magick` slot names.
	///
	/// ## Errors
	///
	/// Returns [`GmError::Encode`] if the engine produces nothing.
	pub(crate) fn to_blob(&mut self, info: &Info, exception: &mut Exception)
	-> Result<Blob, GmError> {
		let mut len = 0;
		let ptr = unsafe {
			ImageToBlob(
				info.0.as_ptr(),
				self.0.as_ptr(),
				&raw mut len,
				exception.as_mut_ptr(),
			)
		};

		let Some(ptr) = NonNull::new(ptr.cast::<u8>()) else {
			return Err(exception.fail(GmError::Encode));
		};

		// Take ownership before looking at the length so the memory is freed
		// either way.
		let blob = Blob { ptr, len: usize::try_from(len).unwrap_or(0) };
		if blob.len == 0 { Err(exception.fail(GmError::Encode)) }
		else { Ok(blob) }
	}
}



/// # Encoded Blob.
///
/// Engine-allocated output bytes, freed with `MagickFree`.
pub(crate) struct Blob {
	/// # Pointer.
	ptr: NonNull<u8>,

	/// # Length.
	len: usize,
}

impl Deref for Blob {
	type Target = [u8];

	#[allow(unsafe_code)]
	#[inline]
	fn deref(&self) -> &Self::Target {
		unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
	}
}

impl Drop for Blob {
	#[allow(unsafe_code)]
	#[inline]
	fn drop(&mut self) { unsafe { MagickFree(self.ptr.as_ptr().cast::<c_void>()); } }
}



/// # Write Format Tag.
///
/// Copy `tag` into a fixed-capacity C string field, zeroing the remainder.
/// The field is left untouched if the tag is rejected.
///
/// ## Errors
///
/// Returns [`GmError::Format`] if the tag is empty, contains a NUL byte, or
/// needs more than `slot.len() - 1` bytes.
fn write_tag(slot: &mut [c_char], tag: &str) -> Result<(), GmError> {
	let bytes = tag.as_bytes();
	if bytes.is_empty() || bytes.len() >= slot.len() || bytes.contains(&0) {
		return Err(GmError::Format);
	}

	let (head, tail) = slot.split_at_mut(bytes.len());
	for (dst, src) in head.iter_mut().zip(bytes) {
		*dst = c_char::from_ne_bytes([*src]);
	}
	tail.fill(0);

	Ok(())
}
