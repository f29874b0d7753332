/*!
# Shared Test Helpers
*/

/// # Build a 24-bit BMP.
///
/// Rows are bottom-up, BGR, padded to four bytes.
pub(crate) fn bmp24(width: u32, height: u32, px: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
	let row = (width * 3).div_ceil(4) * 4;
	let data = row * height;
	let mut out = Vec::new();

	// File header.
	out.extend_from_slice(b"BM");
	out.extend_from_slice(&(54 + data).to_le_bytes());
	out.extend_from_slice(&0_u32.to_le_bytes());
	out.extend_from_slice(&54_u32.to_le_bytes());

	// BITMAPINFOHEADER.
	out.extend_from_slice(&40_u32.to_le_bytes());
	out.extend_from_slice(&width.to_le_bytes());
	out.extend_from_slice(&height.to_le_bytes());
	out.extend_from_slice(&1_u16.to_le_bytes());
	out.extend_from_slice(&24_u16.to_le_bytes());
	out.extend_from_slice(&0_u32.to_le_bytes());
	out.extend_from_slice(&data.to_le_bytes());
	out.extend_from_slice(&2835_u32.to_le_bytes());
	out.extend_from_slice(&2835_u32.to_le_bytes());
	out.extend_from_slice(&0_u32.to_le_bytes());
	out.extend_from_slice(&0_u32.to_le_bytes());

	for y in (0..height).rev() {
		let start = out.len();
		for x in 0..width {
			let [r, g, b] = px(x, y);
			out.extend_from_slice(&[b, g, r]);
		}
		out.resize(start + row as usize, 0);
	}

	out
}

/// # Not an Image.
pub(crate) const GARBAGE: &[u8] = b"This is plain text; no image format should want anything to do with it.\n";
