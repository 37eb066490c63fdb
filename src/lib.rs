//! # qrcnv
//!
//! Image converters for QR Code module matrices.
//!
//! This crate takes an already-computed matrix of dark and light modules and
//! renders it as a bilevel image, writing every container format itself.
//!
//! ## Features
//!
//! - Render a symbol as a 1-bit grayscale PNG, a bilevel TIFF, an SVG
//!   document, or a GIF.
//! - Lay structured-append sets out on a grid (PNG, TIFF, SVG) or as an
//!   animated GIF with one symbol per frame.
//! - Control the quiet zone width, pixel magnification, grid shape, and
//!   animation delay through [`RenderOptions`].
//! - Write to memory, files, or writers.
//!
//! ## Getting Started
//!
//! Add `qrcnv` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrcnv = "0.1.0" # Replace with the latest version
//! ```
//!
//! ## Examples
//!
//! ### Rendering a symbol to a PNG file
//!
//! ```no_run
//! use qrcnv::{encode_to_file, EcLevel, Error, Format, ModuleMatrix, RenderOptions};
//!
//! fn main() -> Result<(), Error> {
//!     // A version 1 symbol: 21x21 modules, dark where the closure is true.
//!     let symbol = ModuleMatrix::from_fn(21, EcLevel::M, |row, col| {
//!         (row + col) % 2 == 0
//!     })?;
//!
//!     let options = RenderOptions {
//!         magnify: 4,
//!         ..Default::default()
//!     };
//!
//!     let encoded = encode_to_file(&symbol, Format::Png, &options, "output.png")?;
//!     println!("Wrote {} bytes", encoded.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Rendering a structured-append set as an animated GIF
//!
//! ```no_run
//! use qrcnv::{encode_set_to_file, EcLevel, Error, Format, ModuleMatrix, SymbolSet, RenderOptions};
//!
//! fn main() -> Result<(), Error> {
//!     let mut set = SymbolSet::new(3)?;
//!     for part in 0..3 {
//!         let symbol = ModuleMatrix::from_fn(21, EcLevel::M, |row, col| {
//!             (row * col + part) % 3 == 0
//!         })?;
//!         set.append(symbol)?;
//!     }
//!     set.finalize()?;
//!
//!     let options = RenderOptions {
//!         delay: 50, // centiseconds per frame
//!         ..Default::default()
//!     };
//!
//!     encode_set_to_file(&set, Format::Gif, &options, "output.gif")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! For more detailed examples, see the documentation for the specific
//! functions and structs.

mod bits;
mod deflate;

mod types;
pub use types::*;

mod matrix;
pub use matrix::*;

mod geometry;
pub use geometry::Geometry;

pub mod raster;

pub mod gif;
pub mod png;
pub mod svg;
pub mod tiff;

mod encode;
pub use encode::*;
