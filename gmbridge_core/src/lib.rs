/*!
# `GM Bridge` - Library

This crate decodes and encodes images by handing the actual format work off
to [GraphicsMagick](http://www.graphicsmagick.org/). All it really does is
move bytes in, move RGBA pixels out (or back in), and make sure every native
handle gets cleaned up on the way.

Decoded images are returned as [`ImgVec`]s of [`RGBA8`] pixels.

## Examples

```no_run
use gmbridge_core::{ColorModel, decode, decode_config, encode_rgba};
use std::io::BufReader;

let raw = std::fs::read("/path/to/image.bmp").unwrap();

// Header-only probe.
let config = decode_config(BufReader::new(raw.as_slice())).unwrap();
assert_eq!(config.color(), ColorModel::Rgba);

// Full decode.
let img = decode(raw.as_slice()).unwrap();
assert_eq!(img.width(), config.width());

// And back again.
let mut out = Vec::new();
encode_rgba(&mut out, img.as_ref(), "bmp").unwrap();
```
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



mod config;
mod decode;
mod encode;
mod engine;
mod error;
mod limits;
mod registry;

pub use config::{
	ColorModel,
	ImageConfig,
};
pub use decode::{
	decode,
	decode_config,
	decode_config_slice,
	decode_slice,
	decode_with_limits,
};
pub use encode::{
	encode_rgba,
	encode_to_vec,
};
pub use error::GmError;
pub use imgref::{
	ImgRef,
	ImgVec,
};
pub use limits::Limits;
pub use registry::{
	DecodeConfigFn,
	DecodeFn,
	Format,
	decode_any,
	decode_config_any,
	formats,
	init,
	register_format,
};
pub use rgb::RGBA8;
