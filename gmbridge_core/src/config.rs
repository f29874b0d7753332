/*!
# `GM Bridge` - Image Config
*/

use std::fmt;



#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
/// # Color Model.
///
/// Everything coming out of (or going into) the engine is 8-bit RGBA, so
/// there is only the one.
pub enum ColorModel {
	/// # RGBA (4 bytes per pixel).
	Rgba,
}

impl fmt::Display for ColorModel {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl ColorModel {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Rgba => "RGBA",
		}
	}

	#[must_use]
	/// # Bytes Per Pixel.
	pub const fn bytes_per_pixel(self) -> usize {
		match self {
			Self::Rgba => 4,
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
/// # Image Config.
///
/// The result of a header-only probe: dimensions and color model, no pixels.
pub struct ImageConfig {
	/// # Width.
	width: usize,

	/// # Height.
	height: usize,

	/// # Color Model.
	color: ColorModel,
}

impl fmt::Display for ImageConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{} {}", self.width, self.height, self.color)
	}
}

impl ImageConfig {
	#[must_use]
	/// # New (RGBA).
	pub const fn new(width: usize, height: usize) -> Self {
		Self { width, height, color: ColorModel::Rgba }
	}

	#[must_use]
	/// # Width.
	pub const fn width(&self) -> usize { self.width }

	#[must_use]
	/// # Height.
	pub const fn height(&self) -> usize { self.height }

	#[must_use]
	/// # Color Model.
	pub const fn color(&self) -> ColorModel { self.color }

	#[must_use]
	/// # Buffer Size.
	///
	/// Return the number of bytes a fully-decoded pixel buffer would occupy,
	/// or `None` if that overflows.
	pub const fn buffer_len(&self) -> Option<usize> {
		match self.width.checked_mul(self.height) {
			Some(px) => px.checked_mul(self.color.bytes_per_pixel()),
			None => None,
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_config() {
		let cfg = ImageConfig::new(3, 2);
		assert_eq!(cfg.width(), 3);
		assert_eq!(cfg.height(), 2);
		assert_eq!(cfg.color(), ColorModel::Rgba);
		assert_eq!(cfg.buffer_len(), Some(24));
		assert_eq!(cfg.to_string(), "3x2 RGBA");

		assert_eq!(ImageConfig::new(usize::MAX, 2).buffer_len(), None);
	}
}
