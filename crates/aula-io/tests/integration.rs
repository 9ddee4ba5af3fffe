//! Integration tests for aula-io.
//!
//! WAV round trips and exported files are checked on disk via `tempfile`.

use aula_analysis::{AcousticParameterEstimator, BandParameterAggregator};
use aula_core::Signal;
use aula_io::{
    BandRecord, Error, WavFormat, export_curves_csv, export_table_csv, export_table_json,
    read_signal, read_wav_info, write_signal,
};
use tempfile::tempdir;

fn decay(sample_rate: u32, secs: f64) -> Signal {
    let n = (secs * f64::from(sample_rate)) as usize;
    Signal::new(
        (0..n)
            .map(|i| {
                let t = i as f64 / f64::from(sample_rate);
                (-t / 0.08).exp() * (2.0 * std::f64::consts::PI * 500.0 * t).cos()
            })
            .collect(),
        sample_rate,
    )
    .unwrap()
}

#[test]
fn wav_round_trip_preserves_samples() {
    let dir = tempdir().unwrap();
    let signal = decay(8000, 0.5);

    for (bits, tolerance) in [(16u16, 1.0 / 32768.0), (24, 1.0 / 8388608.0), (32, 1e-7)] {
        let path = dir.path().join(format!("ir_{}.wav", bits));
        write_signal(&path, &signal, bits).unwrap();

        let loaded = read_signal(&path).unwrap();
        assert_eq!(loaded.sample_rate(), 8000);
        assert_eq!(loaded.len(), signal.len());
        for (a, b) in signal.samples().iter().zip(loaded.samples()) {
            assert!((a - b).abs() <= tolerance, "{}-bit: {} vs {}", bits, a, b);
        }

        let info = read_wav_info(&path).unwrap();
        assert_eq!(info.num_frames, signal.len() as u64);
        assert_eq!(info.bits_per_sample, bits);
        let expected = if bits == 32 { WavFormat::IeeeFloat } else { WavFormat::Pcm };
        assert_eq!(info.format, expected);
    }
}

#[test]
fn stereo_files_are_mixed_to_mono() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stereo.wav");
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for (l, r) in [(1.0f32, 0.0f32), (0.5, 0.5), (-1.0, 0.0)] {
        writer.write_sample(l).unwrap();
        writer.write_sample(r).unwrap();
    }
    writer.finalize().unwrap();

    let signal = read_signal(&path).unwrap();
    assert_eq!(signal.samples(), &[0.5, 0.5, -0.5]);
}

#[test]
fn empty_wav_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    hound::WavWriter::create(&path, spec).unwrap().finalize().unwrap();

    assert!(matches!(read_signal(&path), Err(Error::EmptyFile)));
}

#[test]
fn unsupported_bit_depth_is_rejected() {
    let dir = tempdir().unwrap();
    let err = write_signal(dir.path().join("x.wav"), &decay(8000, 0.1), 12).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn table_exports_to_csv_and_json() {
    let dir = tempdir().unwrap();
    let table = BandParameterAggregator::default()
        .analyze_signal(&decay(8000, 1.0), 1.0, true)
        .unwrap();

    let csv_path = dir.path().join("params.csv");
    export_table_csv(&table, &csv_path).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("parameter,broadband,31.5 Hz,63 Hz"));
    assert!(lines[7].starts_with("status,"));
    for line in &lines {
        assert_eq!(line.split(',').count(), table.len() + 1, "{}", line);
    }

    let json_path = dir.path().join("params.json");
    export_table_json(&table, &json_path).unwrap();
    let records: Vec<BandRecord> =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(records.len(), table.len());
    // 8 kHz and 16 kHz bands cannot exist at an 8 kHz sample rate
    assert!(records[9].error.is_some());
    assert!(records[10].error.is_some());
}

#[test]
fn curves_export_one_row_per_sample() {
    let dir = tempdir().unwrap();
    let signal = decay(8000, 1.0);
    let analysis = AcousticParameterEstimator::default()
        .analyze(&signal, 0.5)
        .unwrap();

    let path = dir.path().join("curves.csv");
    export_curves_csv(&analysis, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "time_s,signal_db,smoothed_db,edc_time_s,edc_db,fit_overall_db,fit_edt_db,fit_t10_db,fit_t20_db,fit_t30_db"
    );
    assert_eq!(lines.len(), signal.len() + 1);

    let first: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first.len(), 10);
    assert_eq!(first[4], "0.000000");

    // past the 0.5 s limit only the signal columns remain
    let late: Vec<&str> = lines[signal.len()].split(',').collect();
    assert!(late[3..].iter().all(|c| c.is_empty()));
}
