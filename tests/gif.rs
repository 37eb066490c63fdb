mod common;

use std::io::Cursor;

use common::{test_matrix, test_set};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Frame, ImageDecoder};
use qrcnv::{RenderOptions, gif};

fn decode_frames(data: &[u8]) -> Vec<Frame> {
    let decoder = GifDecoder::new(Cursor::new(data)).expect("output should decode as GIF");
    decoder
        .into_frames()
        .collect_frames()
        .expect("frames should decode")
}

fn is_black(frame: &Frame, x: u32, y: u32) -> bool {
    frame.buffer().get_pixel(x, y).0[..3] == [0, 0, 0]
}

#[test]
fn test_single_symbol_is_one_frame() {
    let data = gif::encode_symbol(&test_matrix(21), &RenderOptions::default()).unwrap();

    let decoder = GifDecoder::new(Cursor::new(&data)).unwrap();
    assert_eq!(decoder.dimensions(), (29, 29));

    let frames = decode_frames(&data);
    assert_eq!(frames.len(), 1);
    // separator corner is white, finder corner is black
    assert!(!is_black(&frames[0], 0, 0));
    assert!(is_black(&frames[0], 4, 4));
}

#[test]
fn test_animation_has_one_frame_per_symbol() {
    let set = test_set(21, 3);
    let options = RenderOptions {
        delay: 50,
        ..Default::default()
    };
    let data = gif::encode_set_animation(&set, &options).unwrap();

    let frames = decode_frames(&data);
    assert_eq!(frames.len(), 3);
    for frame in &frames {
        assert_eq!(frame.buffer().dimensions(), (29, 29));
        // every symbol carries its finder patterns
        assert!(is_black(frame, 4, 4));
        assert!(is_black(frame, 24, 4));
        assert!(is_black(frame, 4, 24));
    }

    // the fill pattern differs between symbols: module (8, 8) is dark in the
    // first frame only
    assert!(is_black(&frames[0], 12, 12));
    assert!(!is_black(&frames[1], 12, 12));
}

#[test]
fn test_static_set_renders_a_grid() {
    let set = test_set(21, 3);
    let data = gif::encode_set(&set, &RenderOptions::default()).unwrap();

    let decoder = GifDecoder::new(Cursor::new(&data)).unwrap();
    assert_eq!(decoder.dimensions(), (58, 58));

    let frames = decode_frames(&data);
    assert_eq!(frames.len(), 1);
    let frame = &frames[0];
    // finder corners of the three populated cells, at a pitch of 25
    assert!(is_black(frame, 4, 4));
    assert!(is_black(frame, 29, 4));
    assert!(is_black(frame, 4, 29));
    // the fourth cell and the trailing margin stay white
    assert!(!is_black(frame, 29, 29));
    assert!(!is_black(frame, 43, 43));
    assert!(!is_black(frame, 55, 55));
}

#[test]
fn test_one_symbol_set_is_a_single_frame() {
    let set = test_set(21, 1);
    let data = gif::encode_set_animation(&set, &RenderOptions::default()).unwrap();
    assert_eq!(decode_frames(&data).len(), 1);
}
