use plainmap::{
    read_file, Pipeline, PipelineConfig, PlainMapError, RecordingSink, Stage,
};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("plainmap-e2e-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn color_fixture() -> String {
    let mut text = String::from("P3\n# synthetic gradient\n6 4\n255\n");
    for y in 0..4u32 {
        for x in 0..6u32 {
            text.push_str(&format!("{} {} {}\n", x * 40, y * 60, 200 - x * 10));
        }
    }
    text
}

#[test]
fn pipeline_writes_every_stage_for_gray_input() {
    let dir = scratch_dir("gray");
    let input = dir.join("input.pgm");
    fs::write(&input, "P2\n2 2\n255\n10 20\n30 40\n").unwrap();

    let pipeline = Pipeline::new(PipelineConfig {
        output_dir: dir.join("out"),
        angle_deg: 90.0,
        save_input_copy: true,
    });
    let mut sink = RecordingSink::default();
    let report = pipeline.run(&input, Some(&mut sink)).unwrap();

    assert_eq!(report.threshold, 25.0);
    assert_eq!((report.input_width, report.input_height), (2, 2));
    assert_eq!(report.written.len(), 5);
    for path in &report.written {
        assert!(path.exists(), "{} missing", path.display());
    }

    let binary = read_file(dir.join("out/binary_image.pgm")).unwrap();
    assert_eq!(binary.samples(), &[0, 0, 255, 255]);
    let gray = read_file(dir.join("out/gray_image.pgm")).unwrap();
    assert_eq!(gray.samples(), &[10, 20, 30, 40]);

    let labels: Vec<&str> = sink.shown().iter().map(|(l, _, _)| l.as_str()).collect();
    assert_eq!(
        labels,
        [
            "input_image",
            "gray_image",
            "binary_image",
            "rotated_image",
            "rotated_image_inv"
        ]
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn pipeline_keeps_color_for_rotations() {
    let dir = scratch_dir("color");
    let input = dir.join("input.ppm");
    fs::write(&input, color_fixture()).unwrap();

    let pipeline = Pipeline::new(PipelineConfig {
        output_dir: dir.clone(),
        ..PipelineConfig::default()
    });
    let report = pipeline.run(&input, None).unwrap();
    assert_eq!(report.input_channels, 3);

    let rotated = read_file(dir.join("rotated_image_inv.ppm")).unwrap();
    assert_eq!(rotated.channels(), 3);
    assert_eq!(rotated.width(), report.inverse_canvas.width);
    assert!(dir.join("input_image.ppm").exists());
    assert!(dir.join("gray_image.pgm").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn pipeline_reports_failing_stage() {
    let dir = scratch_dir("fail");
    let pipeline = Pipeline::new(PipelineConfig {
        output_dir: dir.clone(),
        ..PipelineConfig::default()
    });

    let err = pipeline.run(&dir.join("missing.pgm"), None).unwrap_err();
    assert_eq!(err.stage, Stage::Load);
    assert!(matches!(err.source, PlainMapError::Io { .. }));

    let bad = dir.join("bad.pnm");
    fs::write(&bad, "P6\n1 1\n255\n0\n").unwrap();
    let err = pipeline.run(&bad, None).unwrap_err();
    assert_eq!(err.stage, Stage::Load);
    assert_eq!(
        err.source,
        PlainMapError::UnsupportedFormat {
            tag: "P6".to_owned()
        }
    );
    assert!(err.to_string().starts_with("image loading failed"));
    fs::remove_dir_all(&dir).unwrap();
}
