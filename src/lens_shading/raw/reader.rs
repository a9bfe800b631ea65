use crate::lens_shading::common::error::Result;
use crate::lens_shading::raw::types::DecodedRaw;

pub trait RawDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedRaw>;
}
