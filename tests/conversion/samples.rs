use std::fs;
use tempfile::TempDir;
use urdraw::{
    convert_svg_file, read_trajectory, write_samples, ConversionStatus, Config, Converter, Sample,
};
use urdraw_settings::CalibrationFile;

fn converter() -> Converter {
    Converter::from_calibration(&CalibrationFile::default(), Config::default()).unwrap()
}

#[test]
fn test_every_sample_converts_completely() {
    let converter = converter();
    for sample in Sample::ALL {
        let conversion = converter
            .convert_svg(&sample.svg())
            .unwrap_or_else(|e| panic!("{}: {}", sample.name(), e));
        assert_eq!(
            conversion.status,
            ConversionStatus::Complete,
            "{}",
            sample.name()
        );
        assert!(
            conversion.trajectory.iter().any(|s| !s.is_move()),
            "{} draws nothing",
            sample.name()
        );
    }
}

#[test]
fn test_koch_sample_is_one_closed_stroke() {
    let conversion = converter().convert_svg(&Sample::Koch.svg()).unwrap();
    // 6 edges of 4^4 segments after the initial move
    assert_eq!(conversion.source_commands, 1 + 6 * 256);
    assert_eq!(conversion.stats.lowers, 1);
    assert_eq!(conversion.stats.lifts, 1);
}

#[test]
fn test_written_samples_convert_from_disk() {
    let dir = TempDir::new().unwrap();
    let written = write_samples(dir.path(), false).unwrap();
    assert_eq!(written.len(), Sample::ALL.len());

    let square = dir.path().join("square.svg");
    let converted =
        convert_svg_file(&square, None, &CalibrationFile::default(), Config::default()).unwrap();
    assert_eq!(converted.conversion.status, ConversionStatus::Complete);
    assert!(!read_trajectory(&converted.output).unwrap().is_empty());
}

#[test]
fn test_existing_samples_kept_without_overwrite() {
    let dir = TempDir::new().unwrap();
    let square = dir.path().join("square.svg");
    fs::write(&square, "mine").unwrap();

    let written = write_samples(dir.path(), false).unwrap();
    assert_eq!(written.len(), Sample::ALL.len() - 1);
    assert_eq!(fs::read_to_string(&square).unwrap(), "mine");

    let written = write_samples(dir.path(), true).unwrap();
    assert_eq!(written.len(), Sample::ALL.len());
    assert!(fs::read_to_string(&square).unwrap().contains("<svg"));
}
