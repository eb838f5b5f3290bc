pub mod bch;
pub mod bitstream;
pub mod block;
pub mod codec;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod poly;

pub use bitstream::*;
pub use block::*;
pub use codec::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
pub use poly::*;
