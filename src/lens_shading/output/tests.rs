use std::io::Cursor;

use crate::lens_shading::config::TiffCompression;
use crate::lens_shading::grid::types::{GainGrid, GridPoint, OutputChannel, ShadingAnalysis};
use crate::lens_shading::output::{FlatFileWriter, ShadingWriter, channel_file_name};
use crate::lens_shading::raw::types::{BayerOrder, ChannelPlane, RawGeometry, RawHeader};

fn small_analysis() -> ShadingAnalysis {
    let header = RawHeader {
        name: "test".to_string(),
        width: 128,
        height: 80,
        padding_right: 0,
        padding_down: 0,
        transform: 5,
        format: 33,
        bayer_order: BayerOrder::Gbrg,
        bayer_format: 3,
    };
    let geometry = RawGeometry::from_header(&header);
    let planes = std::array::from_fn(|_| ChannelPlane::new(64, 40));
    let grids = OutputChannel::ALL.map(|channel| {
        let index = channel.index();
        let gain = |n: usize| (32 + 10 * index + n) as u8;
        GainGrid {
            channel,
            plane_index: header.bayer_order.plane_for(index),
            reference_value: 1000,
            points: vec![
                GridPoint { x: 16, y: 16, gain: gain(0), channel: index },
                GridPoint { x: 63, y: 16, gain: gain(1), channel: index },
                GridPoint { x: 16, y: 39, gain: gain(2), channel: index },
                GridPoint { x: 63, y: 39, gain: gain(3), channel: index },
            ],
        }
    });

    ShadingAnalysis {
        header,
        geometry,
        planes,
        grids,
    }
}

#[test]
fn test_channel_file_names() {
    assert_eq!(channel_file_name(0, "bin"), "ch1.bin");
    assert_eq!(channel_file_name(3, "tiff"), "ch4.tiff");
}

#[test]
fn test_write_plane_little_endian() {
    let plane = ChannelPlane {
        width: 2,
        height: 2,
        data: vec![0x0102, 0x03FF, 0, 1023],
    };
    let mut output = Vec::new();
    FlatFileWriter.write_plane(&plane, &mut output).unwrap();

    assert_eq!(output, vec![0x02, 0x01, 0xFF, 0x03, 0x00, 0x00, 0xFF, 0x03]);
}

#[test]
fn test_write_header_table() {
    let mut output = Vec::new();
    FlatFileWriter.write_header_table(&small_analysis(), &mut output).unwrap();

    let expected = "\
uint8_t ls_grid[] = {
//R - Ch 2
32, 33,
34, 35,
//Gr - Ch 3
42, 43,
44, 45,
//Gb - Ch 0
52, 53,
54, 55,
//B - Ch 1
62, 63,
64, 65,
};
uint32_t ref_transform = 5;
uint32_t grid_width = 2;
uint32_t grid_height = 2;
";
    assert_eq!(String::from_utf8(output).unwrap(), expected);
}

#[test]
fn test_write_text_table() {
    let mut output = Vec::new();
    FlatFileWriter.write_text_table(&small_analysis(), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "16 16 32 0");
    assert_eq!(lines[1], "63 16 33 0");
    assert_eq!(lines[3], "63 39 35 0");
    assert_eq!(lines[4], "16 16 42 1");
    assert_eq!(lines[15], "63 39 65 3");
}

#[test]
fn test_tiff_preview_round_trip() {
    let plane = ChannelPlane {
        width: 4,
        height: 3,
        data: (0..12).map(|v| v * 80).collect(),
    };

    for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::Deflate] {
        let mut output = Vec::new();
        FlatFileWriter
            .write_preview(&plane, &mut output, compression)
            .unwrap();

        let mut decoder = tiff::decoder::Decoder::new(Cursor::new(output)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (4, 3));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U16(data) => assert_eq!(data, plane.data),
            other => panic!("unexpected TIFF sample type: {:?}", std::mem::discriminant(&other)),
        }
    }
}
