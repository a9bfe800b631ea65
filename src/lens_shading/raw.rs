//! Packed raw capture decoding module
//!
//! This module turns the bytes of a BRCM raw capture into four channel planes.

pub mod container;
pub mod header;
pub mod unpack;
mod reader;
mod brcm_reader;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use reader::RawDecoder;
pub use brcm_reader::BrcmRawDecoder;
pub use types::{BayerOrder, ChannelPlane, DecodedRaw, RawGeometry, RawHeader};
pub use unpack::{Bayer10Unpacker, BlackLevel};
