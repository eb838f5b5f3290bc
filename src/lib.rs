//! # qrmatrix
//!
//! A Rust library for encoding text into QR code symbols with Reed-Solomon error correction.
//! The output is a square matrix of dark & light modules; drawing it is up to the caller.
//!
//! ## Features
//!
//! - **Byte Mode Encoding**: Text and raw bytes as 8 bit segments, versions 1 to 40
//! - **Reed-Solomon Error Correction**: GF(256) arithmetic with levels L, M, Q and H
//! - **Automatic Version Selection**: Smallest version whose capacity fits the data
//! - **Mask Selection**: All 8 masks scored with the standard penalty rules, lowest wins
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrmatrix::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Version and mask are chosen automatically, error correction defaults to M
//! let qr = QRBuilder::new("Hello, World!").build()?;
//! assert_eq!(qr.module_count(), 21);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrmatrix::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!")
//!     .version(Version::new(2)?)        // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)             // if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)       // if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! let dark = qr.is_dark(0, 0)?;         // top left finder corner
//! assert!(dark);
//! # Ok(())
//! # }
//! ```
//!
//! ### Low Level Encoder
//!
//! ```rust
//! use qrmatrix::{ECLevel, QRCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 0 selects the version automatically
//! let mut qr = QRCode::new(0, ECLevel::L)?;
//! qr.add_data("https://");
//! qr.add_data("example.com");
//! qr.make()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Text
//! [`QRCode::add_data`] keeps the low byte of each UTF-16 code unit, which is
//! exact for Latin-1 text. Use [`QRCode::add_bytes`] for anything else.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod common;
pub mod error;

pub use builder::{QRBuilder, QRCode};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use error::{QRError, QRResult};
