mod common;

use common::{test_matrix, test_set};
use miniz_oxide::inflate::decompress_to_vec_zlib;
use qrcnv::{Error, ModuleMatrix, RenderOptions, tiff};

const TAG_IMAGE_WIDTH: u16 = 0x0100;
const TAG_IMAGE_LENGTH: u16 = 0x0101;
const TAG_BITS_PER_SAMPLE: u16 = 0x0102;
const TAG_COMPRESSION: u16 = 0x0103;
const TAG_PHOTOMETRIC: u16 = 0x0106;
const TAG_STRIP_OFFSETS: u16 = 0x0111;
const TAG_ROWS_PER_STRIP: u16 = 0x0116;
const TAG_STRIP_BYTE_COUNTS: u16 = 0x0117;
const TAG_RESOLUTION_UNIT: u16 = 0x0128;

const TYPE_SHORT: u16 = 3;

fn options(magnify: u32) -> RenderOptions {
    RenderOptions {
        magnify,
        ..Default::default()
    }
}

fn u16be(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes(data[offset..offset + 2].try_into().unwrap())
}

fn u32be(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(data[offset..offset + 4].try_into().unwrap())
}

/// Returns `(field type, count, value)` for `tag`, decoding SHORT values
/// from the leading half of the value field.
fn ifd_entry(data: &[u8], tag: u16) -> (u16, u32, u32) {
    let entries = u16be(data, 8) as usize;
    for i in 0..entries {
        let offset = 10 + 12 * i;
        if u16be(data, offset) == tag {
            let field_type = u16be(data, offset + 2);
            let count = u32be(data, offset + 4);
            let value = if field_type == TYPE_SHORT {
                u16be(data, offset + 8) as u32
            } else {
                u32be(data, offset + 8)
            };
            return (field_type, count, value);
        }
    }
    panic!("tag {:#06x} not present", tag);
}

/// Packs the reference image as rows of MSB-first bits, set bits dark, the
/// way PhotometricInterpretation 0 stores them.
fn packed_image(xdim: usize, ydim: usize, dark: impl Fn(usize, usize) -> bool) -> Vec<u8> {
    let rowbytes = xdim.div_ceil(8);
    let mut out = vec![0u8; rowbytes * ydim];
    for y in 0..ydim {
        for x in 0..xdim {
            if dark(x, y) {
                out[y * rowbytes + (x >> 3)] |= 0x80 >> (x & 7);
            }
        }
    }
    out
}

/// Reference pixel predicate for one symbol with the default separator.
fn symbol_dark(matrix: &ModuleMatrix, magnify: usize) -> impl Fn(usize, usize) -> bool + '_ {
    move |x, y| {
        let (mx, my) = (x / magnify, y / magnify);
        let span = 4..4 + matrix.dim();
        span.contains(&mx) && span.contains(&my) && matrix.is_black(my - 4, mx - 4)
    }
}

#[test]
fn test_header_and_ifd_fields() {
    let data = tiff::encode_symbol(&test_matrix(21), &options(1)).unwrap();

    assert_eq!(&data[0..2], b"MM");
    assert_eq!(u16be(&data, 2), 42);
    assert_eq!(u32be(&data, 4), 8, "IFD offset");
    assert_eq!(u16be(&data, 8), 12, "IFD entry count");

    assert_eq!(ifd_entry(&data, TAG_IMAGE_WIDTH).2, 29);
    assert_eq!(ifd_entry(&data, TAG_IMAGE_LENGTH).2, 29);
    assert_eq!(ifd_entry(&data, TAG_BITS_PER_SAMPLE).2, 1);
    assert_eq!(ifd_entry(&data, TAG_PHOTOMETRIC).2, 0, "white is zero");
    assert_eq!(ifd_entry(&data, TAG_ROWS_PER_STRIP).2, 29);
    assert_eq!(ifd_entry(&data, TAG_RESOLUTION_UNIT).2, 2);
}

#[test]
fn test_uncompressed_single_strip_payload() {
    let matrix = test_matrix(21);
    let data = tiff::encode_symbol(&matrix, &options(1)).unwrap();

    // 1x output is stored raw
    assert_eq!(ifd_entry(&data, TAG_COMPRESSION).2, 1);

    let (_, count, offset) = ifd_entry(&data, TAG_STRIP_OFFSETS);
    assert_eq!(count, 1);
    let (_, _, bytes) = ifd_entry(&data, TAG_STRIP_BYTE_COUNTS);

    let expected = packed_image(29, 29, symbol_dark(&matrix, 1));
    assert_eq!(bytes as usize, expected.len());
    assert_eq!(offset as usize + expected.len(), data.len(), "strip should end the file");
    assert_eq!(&data[offset as usize..], &expected[..]);
}

#[test]
fn test_magnified_output_is_zip_compressed() {
    let matrix = test_matrix(21);
    let data = tiff::encode_symbol(&matrix, &options(2)).unwrap();

    assert_eq!(ifd_entry(&data, TAG_COMPRESSION).2, 8, "ZIP compression above 1x");

    let (_, count, offset) = ifd_entry(&data, TAG_STRIP_OFFSETS);
    assert_eq!(count, 1);
    let (_, _, bytes) = ifd_entry(&data, TAG_STRIP_BYTE_COUNTS);
    let strip = &data[offset as usize..offset as usize + bytes as usize];

    let payload = decompress_to_vec_zlib(strip).expect("strip should be a zlib stream");
    assert_eq!(payload, packed_image(58, 58, symbol_dark(&matrix, 2)));
}

#[test]
fn test_multiple_strips_are_contiguous_and_reassemble() {
    let matrix = test_matrix(21);
    // 928 pixels a side, 116 bytes a row: 70 rows per 8 KiB strip
    let data = tiff::encode_symbol(&matrix, &options(32)).unwrap();

    assert_eq!(ifd_entry(&data, TAG_ROWS_PER_STRIP).2, 70);
    let (_, strips, offsets_at) = ifd_entry(&data, TAG_STRIP_OFFSETS);
    let (_, counts_len, counts_at) = ifd_entry(&data, TAG_STRIP_BYTE_COUNTS);
    assert_eq!(strips, 14);
    assert_eq!(counts_len, strips);

    let mut payload = Vec::new();
    let mut expected_offset = counts_at as usize + 4 * strips as usize;
    for i in 0..strips as usize {
        let offset = u32be(&data, offsets_at as usize + 4 * i) as usize;
        let bytes = u32be(&data, counts_at as usize + 4 * i) as usize;
        assert_eq!(offset, expected_offset, "strip {} should follow its predecessor", i);
        expected_offset = offset + bytes;

        let strip = &data[offset..offset + bytes];
        payload.extend(decompress_to_vec_zlib(strip).expect("strip should be a zlib stream"));
    }
    assert_eq!(expected_offset, data.len());
    assert_eq!(payload, packed_image(928, 928, symbol_dark(&matrix, 32)));
}

#[test]
fn test_one_symbol_set_encodes_like_a_single_symbol() {
    let set = test_set(21, 1);
    let single = tiff::encode_symbol(set.get(0), &options(2)).unwrap();
    let grid = tiff::encode_set(&set, &options(2)).unwrap();
    assert_eq!(single, grid);
}

#[test]
fn test_oversized_row_is_rejected() {
    // a row wider than one strip leaves no room for even a single row
    let result = tiff::encode_symbol(&test_matrix(21), &options(4000));
    assert!(matches!(result, Err(Error::WidthTooLarge(_))), "got {:?}", result);
}
