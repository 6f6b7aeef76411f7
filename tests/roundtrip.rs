extern crate rla;

use std::io::Cursor;
use std::path::PathBuf;
use rla::prelude::*;
use rla::prelude::attributes::names;
use rla::error::Error;
use rla::io::Data;

fn fixed_time() -> Timestamp {
    Timestamp { year: 2011, month: 3, day: 17, hour: 14, minute: 5 }
}

fn options() -> WriteOptions<Timestamp> {
    WriteOptions::default().with_clock(fixed_time())
}

fn temporary_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rla-test-{}-{}", std::process::id(), name))
}

fn gradient_rgba(width: usize, y: usize) -> Vec<u8> {
    (0 .. width).flat_map(|x| vec![x as u8, y as u8, 0, 255]).collect()
}


#[test]
fn write_file_and_read_header_back() {
    let path = temporary_file("gradient.rla");
    let (width, height) = (16, 8);

    let image = ImageDescription::new((width, height), 4, SampleType::U8)
        .with_attribute(names::DESCRIPTION, "gradient")
        .with_attribute(names::USER_NAME, "tester")
        .with_attribute(names::FRAME_NUMBER, 7);

    let mut writer = RlaWriter::create(&path, image, options()).unwrap();
    for y in 0 .. height {
        writer.write_scan_line(y as i32, &gradient_rgba(width, y)).unwrap();
    }

    writer.finish().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let header = RlaHeader::read(&mut bytes.as_slice()).unwrap();
    assert_eq!(header.channel_counts(), (3, 1, 0));
    assert_eq!(header.color_channel_bits, 8);
    assert_eq!(header.frame_number, 7);
    assert_eq!(header.description.content(), b"gradient");
    assert_eq!(header.user_name.content(), b"tester");
    assert_eq!(header.file_name.content(), path.to_string_lossy().as_bytes());
    assert_eq!(header.date_created.content(), b"MAR 17 14:05 2011");
    assert_eq!(header.program_name.content(), rla::write::DEFAULT_PROGRAM_NAME.as_bytes());

    let table_start = RlaHeader::byte_size();
    let data_start = table_start + height * 4;
    let scan_line_size = width * 4;
    assert_eq!(bytes.len(), data_start + height * scan_line_size);

    for index in 0 .. height {
        let offset = i32::read(&mut &bytes[table_start + index * 4 ..]).unwrap() as usize;

        // the first table entry is the bottom scan line
        let y = height - 1 - index;
        assert_eq!(offset, data_start + y * scan_line_size);
        assert_eq!(&bytes[offset .. offset + scan_line_size], gradient_rgba(width, y).as_slice());
    }
}

#[test]
fn invalid_image_does_not_create_file() {
    let path = temporary_file("empty.rla");

    let image = ImageDescription::new((0, 8), 3, SampleType::U8);
    let error = RlaWriter::create(&path, image, options()).unwrap_err();

    assert!(matches!(error, Error::InvalidResolution { width: 0, height: 8 }));
    assert!(!path.exists());

    let volume = ImageDescription::new((8, 8), 3, SampleType::U8).with_depth(4);
    let error = RlaWriter::create(&path, volume, options()).unwrap_err();

    assert!(matches!(error, Error::UnsupportedDimensionality(4)));
    assert!(!path.exists());
}

#[test]
fn unwritable_path_fails_with_sink_error() {
    let path = temporary_file("missing-directory").join("image.rla");
    let image = ImageDescription::new((8, 8), 3, SampleType::U8);

    let error = RlaWriter::create(&path, image, options()).unwrap_err();
    assert!(matches!(error, Error::SinkCreation { .. }));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn mixed_channel_types_in_memory() {
    let image = ImageDescription::new((3, 2), 0, SampleType::U8)
        .with_channel_sample_types(vec![
            SampleType::F16, SampleType::F16, SampleType::F16,
            SampleType::F32, SampleType::U8,
        ])
        .with_attribute(names::COLOR_SPACE, "Linear");

    let mut writer = RlaWriter::new(Cursor::new(Vec::new()), "mixed.rla", image, options()).unwrap();

    let header = writer.header().clone();
    assert_eq!(header.channel_counts(), (3, 1, 1));
    assert_eq!((header.color_channel_type, header.color_channel_bits), (0, 16));
    assert_eq!((header.matte_channel_type, header.matte_channel_bits), (4, 32));
    assert_eq!((header.aux_channel_type, header.aux_channel_bits), (0, 8));
    assert_eq!(header.gamma.content(), b"1.0");

    let pixel_size = 3 * 2 + 4 + 1;
    writer.write_scan_line(0, &vec![0; 3 * pixel_size]).unwrap();
    assert!(writer.write_scan_line(1, &vec![0; 3 * pixel_size - 1]).is_err());
    writer.write_scan_line(1, &vec![0; 3 * pixel_size]).unwrap();

    let bytes = writer.finish().unwrap().into_inner();
    assert_eq!(bytes.len(), RlaHeader::byte_size() + 2 * 4 + 2 * 3 * pixel_size);
    assert_eq!(RlaHeader::read(&mut bytes.as_slice()).unwrap(), header);
}

#[test]
fn offset_data_window_inside_display_window() {
    let image = ImageDescription::new((4, 4), 3, SampleType::U16)
        .with_data_position((2, 2))
        .with_display_window(IntegerBounds::new((0, 0), (8, 8)));

    let mut writer = RlaWriter::new(Cursor::new(Vec::new()), "crop.rla", image, options()).unwrap();

    let header = writer.header();
    assert_eq!((header.window_left, header.window_right, header.window_bottom, header.window_top), (0, 7, 0, 7));
    assert_eq!((header.active_left, header.active_right, header.active_bottom, header.active_top), (2, 5, -2, 1));

    assert!(writer.write_scan_line(0, &[0; 4 * 6]).is_err(), "above the data window");
    assert!(writer.write_scan_line(6, &[0; 4 * 6]).is_err(), "below the data window");
    writer.write_scan_line(5, &[0; 4 * 6]).unwrap();

    let bytes = writer.finish().unwrap().into_inner();
    let first_offset = i32::read(&mut &bytes[RlaHeader::byte_size() ..]).unwrap();
    assert_eq!(first_offset as usize, RlaHeader::byte_size() + 4 * 4, "bottom row was written first");
}

#[test]
fn append_is_rejected() {
    let image = ImageDescription::new((4, 4), 3, SampleType::U8);
    let options = options().with_mode(OpenMode::AppendSubImage);

    let error = RlaWriter::new(Cursor::new(Vec::new()), "append.rla", image, options).unwrap_err();
    assert!(matches!(error, Error::NotSupported(_)));
}
