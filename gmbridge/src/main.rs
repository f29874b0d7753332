/*!
# `GM Bridge`
*/

#![deny(unsafe_code)]

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_crate_dependencies)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]



mod error;

use argyle::Argument;
use error::AppError;
use fyi_msg::Msg;
use gmbridge_core::{
	GmError,
	decode,
	decode_config,
	decode_config_any,
	encode_to_vec,
	formats,
	init,
};
use std::{
	fs::File,
	io::BufReader,
	path::{
		Path,
		PathBuf,
	},
};



/// # Main.
///
/// This lets us bubble up errors so they can be pretty-printed.
fn main() {
	match _main() {
		Ok(()) => {},
		Err(e @ (AppError::PrintHelp | AppError::PrintVersion)) => {
			println!("{}", e.as_str());
		},
		Err(e) => {
			Msg::error(e.to_string()).eprint();
			std::process::exit(1);
		},
	}
}

#[inline]
/// # Actual Main.
fn _main() -> Result<(), AppError> {
	let mut info = false;
	let mut list = false;
	let mut verbose = false;
	let mut tag: Option<String> = None;
	let mut output: Option<PathBuf> = None;
	let mut src: Option<PathBuf> = None;

	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));
	for arg in args {
		match arg {
			Argument::Key("-h" | "--help") => return Err(AppError::PrintHelp),
			Argument::Key("-i" | "--info") => { info = true; },
			Argument::Key("-l" | "--list") => { list = true; },
			Argument::Key("-v" | "--verbose") => { verbose = true; },
			Argument::Key("-V" | "--version") => return Err(AppError::PrintVersion),

			Argument::KeyWithValue("-f" | "--format", s) => { tag = Some(s); },
			Argument::KeyWithValue("-o" | "--output", s) => { output = Some(PathBuf::from(s)); },

			// Assume the source.
			Argument::Other(s) => { src = Some(PathBuf::from(s)); },
			Argument::InvalidUtf8(s) => { src = Some(PathBuf::from(s)); },

			// Nothing else is relevant.
			_ => {},
		}
	}

	let _res = simple_logger::init_with_level(
		if verbose { log::Level::Debug } else { log::Level::Warn }
	);

	// Engine and formats, once, up front.
	init();

	if list {
		for name in formats() { println!("{name}"); }
		return Ok(());
	}

	let src = src.ok_or(AppError::NoFile)?;
	if info { return print_info(&src); }

	let output = output.ok_or(AppError::NoOutput)?;
	let tag = tag.or_else(|| tag_from_path(&output)).ok_or(AppError::NoFormat)?;
	convert(&src, &output, &tag)
}

/// # Print Info.
///
/// Probe the source and print its dimensions, along with the registered
/// format it matched, if any.
fn print_info(src: &Path) -> Result<(), AppError> {
	let file = File::open(src).map_err(|_| AppError::Read)?;
	let (config, tag) = match decode_config_any(file) {
		Ok((config, tag)) => (config, tag),
		// GraphicsMagick may still know what it is.
		Err(GmError::UnknownFormat) => {
			let file = File::open(src).map_err(|_| AppError::Read)?;
			(decode_config(BufReader::new(file))?, "unregistered")
		},
		Err(e) => return Err(e.into()),
	};

	Msg::plain(format!(
		"{}: {}x{} ({tag})",
		src.to_string_lossy(),
		config.width(),
		config.height(),
	)).print();

	Ok(())
}

/// # Convert.
///
/// Decode the source and re-encode it as `tag`.
fn convert(src: &Path, dst: &Path, tag: &str) -> Result<(), AppError> {
	let file = File::open(src).map_err(|_| AppError::Read)?;
	let img = decode(file)?;
	let out = encode_to_vec(img.as_ref(), tag)?;

	write_atomic::write_file(dst, &out).map_err(|_| AppError::Write)?;

	Msg::success(format!(
		"Saved {} ({}x{} {tag}, {} bytes).",
		dst.to_string_lossy(),
		img.width(),
		img.height(),
		out.len(),
	)).print();

	Ok(())
}

/// # Tag From Path.
///
/// Use the (lowercase) file extension as the format tag.
fn tag_from_path(path: &Path) -> Option<String> {
	path.extension()
		.and_then(|e| e.to_str())
		.filter(|e| ! e.is_empty())
		.map(str::to_ascii_lowercase)
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_tag_from_path() {
		assert_eq!(tag_from_path(Path::new("/tmp/out.BMP")), Some("bmp".to_owned()));
		assert_eq!(tag_from_path(Path::new("out.psd")), Some("psd".to_owned()));
		assert_eq!(tag_from_path(Path::new("/tmp/out")), None);
		assert_eq!(tag_from_path(Path::new("/tmp/out.")), None);
	}
}
