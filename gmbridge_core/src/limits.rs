/*!
# `GM Bridge` - Limits
*/

use crate::GmError;



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Decode Limits.
///
/// Caps checked against the dimensions GraphicsMagick reports, before the
/// RGBA buffer is allocated. All fields default to `None` (no limit).
pub struct Limits {
	/// # Maximum Width.
	pub max_width: Option<usize>,

	/// # Maximum Height.
	pub max_height: Option<usize>,

	/// # Maximum Pixel Count (Width × Height).
	pub max_pixels: Option<usize>,
}

impl Limits {
	#[must_use]
	/// # With Maximum Width.
	pub const fn with_max_width(mut self, width: usize) -> Self {
		self.max_width = Some(width);
		self
	}

	#[must_use]
	/// # With Maximum Height.
	pub const fn with_max_height(mut self, height: usize) -> Self {
		self.max_height = Some(height);
		self
	}

	#[must_use]
	/// # With Maximum Pixels.
	pub const fn with_max_pixels(mut self, pixels: usize) -> Self {
		self.max_pixels = Some(pixels);
		self
	}

	/// # Check Dimensions.
	///
	/// ## Errors
	///
	/// Returns [`GmError::TooBig`] if any limit is exceeded, or
	/// [`GmError::Overflow`] if the pixel count cannot be computed.
	pub(crate) fn check(&self, width: usize, height: usize) -> Result<(), GmError> {
		if self.max_width.is_some_and(|max| width > max) {
			log::debug!("Width {width} exceeds the limit.");
			return Err(GmError::TooBig);
		}
		if self.max_height.is_some_and(|max| height > max) {
			log::debug!("Height {height} exceeds the limit.");
			return Err(GmError::TooBig);
		}
		if let Some(max) = self.max_pixels {
			let pixels = width.checked_mul(height).ok_or(GmError::Overflow)?;
			if pixels > max {
				log::debug!("Pixel count {pixels} exceeds the limit.");
				return Err(GmError::TooBig);
			}
		}

		Ok(())
	}
}
