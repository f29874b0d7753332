/*!
# `GM Bridge` - Error
*/

use gmbridge_core::GmError;
use std::{
	error::Error,
	fmt,
};



/// # Help Text.
pub(super) const HELP: &str = concat!("GM Bridge v", env!("CARGO_PKG_VERSION"), r#"
Inspect and convert images through GraphicsMagick.

USAGE:
    gmbridge [FLAGS] [OPTIONS] <FILE>

FLAGS:
    -h, --help        Print help information and exit.
    -i, --info        Print the image dimensions and format, then exit.
    -l, --list        Print the registered format tags, then exit.
    -v, --verbose     Log GraphicsMagick failures to STDERR.
    -V, --version     Print version information and exit.

OPTIONS:
    -f, --format <TAG>  Encode the image as this format, e.g. "bmp". If
                        omitted, the output file's extension is used.
    -o, --output <FILE> Save the converted image to this path.

TRAILING ARGS:
    <FILE>            The source image.
"#);



#[derive(Debug)]
/// # Errors.
pub(super) enum AppError {
	/// # Library Error.
	Gm(GmError),

	/// # No Source.
	NoFile,

	/// # No Format.
	NoFormat,

	/// # No Output.
	NoOutput,

	/// # Read Error.
	Read,

	/// # Write Error.
	Write,

	/// # Print Help (Not an Error).
	PrintHelp,

	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for AppError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		if let Self::Gm(e) = self { Some(e) }
		else { None }
	}
}

impl From<GmError> for AppError {
	#[inline]
	fn from(err: GmError) -> Self { Self::Gm(err) }
}

impl fmt::Display for AppError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Self::Gm(e) = self { fmt::Display::fmt(e, f) }
		else { f.write_str(self.as_str()) }
	}
}

impl AppError {
	/// # As Str.
	pub(super) const fn as_str(&self) -> &'static str {
		match self {
			Self::Gm(e) => e.as_str(),
			Self::NoFile => "A source image is required.",
			Self::NoFormat => "The output format could not be determined; use -f/--format.",
			Self::NoOutput => "An output path is required; use -o/--output.",
			Self::Read => "Unable to read the source file.",
			Self::Write => "Unable to save the file.",
			Self::PrintHelp => HELP,
			Self::PrintVersion => concat!("GM Bridge v", env!("CARGO_PKG_VERSION")),
		}
	}
}
