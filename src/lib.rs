pub mod demux;
pub mod ecc;
pub mod error;

pub use ecc::{Decoded, GolayDecoder};
pub use error::{Error, Result};
