/*!
# `GM Bridge` - Error
*/

use std::{
	error::Error,
	fmt,
	io,
};



#[derive(Debug)]
/// # Errors.
///
/// The first three variants are the only failure signals GraphicsMagick
/// itself can produce here. Everything else is bookkeeping on our side, except
/// for [`GmError::Io`], which passes reader/writer errors through untouched.
pub enum GmError {
	/// # The blob could not be parsed as an image.
	Decode,

	/// # The decoded image could not be copied out as RGBA.
	Dispatch,

	/// # The RGBA pixels could not be wrapped as an image.
	Constitute,

	/// # The image could not be serialized.
	Encode,

	/// # Invalid format tag.
	Format,

	/// # No registered format matched the input.
	UnknownFormat,

	/// # Image dimensions are out of range.
	Overflow,

	/// # Image dimensions exceed the configured limits.
	TooBig,

	/// # I/O error from the source or destination.
	Io(io::Error),
}

impl Error for GmError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		if let Self::Io(e) = self { Some(e) }
		else { None }
	}
}

impl fmt::Display for GmError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Self::Io(e) = self { fmt::Display::fmt(e, f) }
		else { f.write_str(self.as_str()) }
	}
}

impl From<io::Error> for GmError {
	#[inline]
	fn from(err: io::Error) -> Self { Self::Io(err) }
}

impl GmError {
	#[must_use]
	/// # As Str.
	///
	/// Return the error as an English string slice. I/O errors carry their
	/// own messages, so only get a generic label here; use `Display` to see
	/// the real thing.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Decode => "Unable to decode image.",
			Self::Dispatch => "Unable to dispatch image.",
			Self::Constitute => "Unable to constitute image.",
			Self::Encode => "Unable to encode image.",
			Self::Format => "Invalid image format tag.",
			Self::UnknownFormat => "The image format was not recognized.",
			Self::Overflow => "The image dimensions are out of range.",
			Self::TooBig => "The image dimensions exceed the configured limits.",
			Self::Io(_) => "I/O error.",
		}
	}

	#[must_use]
	/// # Is Engine Failure?
	///
	/// Returns `true` for the kinds GraphicsMagick reports by handing back
	/// nothing: [`GmError::Decode`], [`GmError::Dispatch`],
	/// [`GmError::Constitute`], and [`GmError::Encode`].
	pub const fn is_engine(&self) -> bool {
		matches!(self, Self::Decode | Self::Dispatch | Self::Constitute | Self::Encode)
	}
}
