use lens_shading_rs::lens_shading::raw::container::RAW_MARKER;
use lens_shading_rs::lens_shading::raw::header::{BAYER_FORMAT_RAW10, FORMAT_BAYER, HEADER_OFFSET};
use lens_shading_rs::lens_shading::raw::unpack::PIXEL_DATA_OFFSET;

/// Bare BRCM capture whose every 10-bit sample is `value`.
///
/// `width` must be a multiple of 4.
pub fn uniform_capture(width: u16, height: u16, format: u16, value: u16) -> Vec<u8> {
    let stride = (width as usize * 5 / 4).next_multiple_of(32);
    let mut data = vec![0u8; PIXEL_DATA_OFFSET + stride * height as usize];

    data[..4].copy_from_slice(RAW_MARKER);
    let record = &mut data[HEADER_OFFSET..];
    record[..8].copy_from_slice(b"it-mode\0");
    record[32..34].copy_from_slice(&width.to_le_bytes());
    record[34..36].copy_from_slice(&height.to_le_bytes());
    record[64..66].copy_from_slice(&2u16.to_le_bytes());
    record[66..68].copy_from_slice(&format.to_le_bytes());
    record[68] = 0;
    record[69] = BAYER_FORMAT_RAW10;

    let msb = (value >> 2) as u8;
    let low = (value & 0b11) as u8;
    let lsbs = low << 6 | low << 4 | low << 2 | low;
    for y in 0..height as usize {
        let row = &mut data[PIXEL_DATA_OFFSET + y * stride..][..width as usize * 5 / 4];
        for group in row.chunks_exact_mut(5) {
            group.copy_from_slice(&[msb, msb, msb, msb, lsbs]);
        }
    }
    data
}

pub fn bayer_capture(width: u16, height: u16, value: u16) -> Vec<u8> {
    uniform_capture(width, height, FORMAT_BAYER, value)
}
