use plainmap::{
    canvas_size, rotate_forward, rotate_inverse, CanvasSize, ImageVariant, Mapping, PixelBuffer,
    PlainMapError,
};

fn make_image(width: usize, height: usize, channels: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let value = ((x * 13) ^ (y * 7) ^ (x * y) ^ (c * 5)) & 0xFF;
                data.push(value.max(1) as u8);
            }
        }
    }
    PixelBuffer::new(data, width, height, channels, 255).unwrap()
}

#[test]
fn inverse_zero_degrees_reproduces_source() {
    for (w, h, c) in [(5, 3, 1), (4, 4, 3), (1, 1, 1), (7, 2, 3)] {
        let src = make_image(w, h, c);
        let result = rotate_inverse(&src, 0.0).unwrap();
        assert_eq!(result.image, src);
        assert_eq!(result.mapping, Mapping::Inverse);
        assert_eq!(result.mapped, w * h);
    }
}

#[test]
fn inverse_full_turn_reproduces_source() {
    for angle in [360.0, -360.0, 720.0] {
        let src = make_image(9, 6, 3);
        let result = rotate_inverse(&src, angle).unwrap();
        assert_eq!(result.canvas, CanvasSize { width: 9, height: 6 });
        assert_eq!(result.image, src);
    }
}

#[test]
fn forward_and_inverse_agree_at_zero_degrees() {
    let src = make_image(6, 5, 1);
    let forward = rotate_forward(&src, 0.0).unwrap();
    let inverse = rotate_inverse(&src, 0.0).unwrap();
    assert_eq!(forward.image, inverse.image);
    assert_eq!(forward.mapping, Mapping::Forward);
}

#[test]
fn right_angle_swaps_canvas() {
    let src = make_image(2, 1, 1);
    let expected = CanvasSize {
        width: 1,
        height: 2,
    };
    assert_eq!(canvas_size(2, 1, 90.0).unwrap(), expected);
    for result in [
        rotate_inverse(&src, 90.0).unwrap(),
        rotate_forward(&src, 90.0).unwrap(),
    ] {
        assert_eq!(result.canvas, expected);
        assert_eq!(result.image.width(), 1);
        assert_eq!(result.image.height(), 2);
    }
}

#[test]
fn forty_five_degrees_grows_canvas() {
    let expected = ((10.0f64 + 6.0) / 2.0f64.sqrt()).round() as usize;
    let canvas = canvas_size(10, 6, 45.0).unwrap();
    assert_eq!(canvas.width, expected);
    assert_eq!(canvas.height, expected);
    assert_eq!(canvas, canvas_size(6, 10, 135.0).unwrap());
}

#[test]
fn inverse_quarter_turn_samples_expected_pixels() {
    // 4x4 pivots at (2, 2); destination (x, y) reads source (y, 4 - x).
    let src = make_image(4, 4, 1);
    let result = rotate_inverse(&src, 90.0).unwrap();
    assert_eq!(result.canvas, CanvasSize { width: 4, height: 4 });
    for y in 0..4 {
        for x in 0..4 {
            let got = result.image.get(x, y).unwrap();
            if x == 0 {
                assert_eq!(got, &[0]);
            } else {
                assert_eq!(got, src.get(y, 4 - x).unwrap());
            }
        }
    }
    assert_eq!(result.mapped, 12);
}

#[test]
fn forward_mapping_only_writes_source_values() {
    let src = make_image(17, 11, 1);
    let result = rotate_forward(&src, 55.0).unwrap();
    assert!(result.mapped <= src.pixel_count());
    let written = result.image.samples().iter().filter(|&&v| v != 0).count();
    assert!(written <= result.mapped);
    for &value in result.image.samples() {
        assert!(value == 0 || src.samples().contains(&value));
    }
}

#[test]
fn rotation_preserves_variant_and_max_intensity() {
    let src = PixelBuffer::new(vec![3; 4 * 3 * 3], 4, 3, 3, 15).unwrap();
    for result in [
        rotate_forward(&src, 33.0).unwrap(),
        rotate_inverse(&src, 33.0).unwrap(),
    ] {
        assert_eq!(result.image.variant(), ImageVariant::Color);
        assert_eq!(result.image.max_intensity(), 15);
    }
}

#[test]
fn huge_and_negative_angles_terminate_with_folded_canvas() {
    let src = make_image(12, 7, 1);
    let huge = rotate_inverse(&src, 1.0e9 + 90.0).unwrap();
    assert_eq!(huge.canvas, canvas_size(12, 7, 10.0).unwrap());
    assert_eq!(
        canvas_size(12, 7, -90.0).unwrap(),
        canvas_size(12, 7, 270.0).unwrap()
    );
}

#[test]
fn non_finite_angles_are_rejected() {
    let src = make_image(3, 3, 1);
    assert!(matches!(
        rotate_inverse(&src, f64::NAN),
        Err(PlainMapError::InvalidAngle { .. })
    ));
    assert!(matches!(
        rotate_forward(&src, f64::NEG_INFINITY),
        Err(PlainMapError::InvalidAngle { .. })
    ));
}
