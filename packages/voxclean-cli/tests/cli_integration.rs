use assert_cmd::Command;
use predicates::prelude::*;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

fn voxclean() -> Command {
    let mut cmd = Command::cargo_bin("voxclean").unwrap();
    cmd.env_remove("VOXCLEAN_FFMPEG");
    cmd
}

/// One second of a 1 kHz stereo tone as 16-bit WAV
fn write_tone_wav(path: &Path) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..44100 {
        let v = (8000.0 * (2.0 * PI * 1000.0 * i as f64 / 44100.0).sin()) as i16;
        writer.write_sample(v).unwrap();
        writer.write_sample(v).unwrap();
    }
    writer.finalize().unwrap();
}

fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_no_args_shows_help() {
    voxclean()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    voxclean()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("voxclean"));
}

#[test]
fn test_help_flag() {
    voxclean()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bandpass"));
}

// =============================================================================
// DESIGN SUBCOMMAND
// =============================================================================

#[test]
fn test_design_json_lengths() {
    let output = voxclean()
        .args(["design", "--sample-rate", "44100", "--order", "6", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["b"].as_array().unwrap().len(), 13);
    assert_eq!(parsed["a"].as_array().unwrap().len(), 13);
    assert_eq!(parsed["a"][0].as_f64().unwrap(), 1.0);
    assert_eq!(parsed["order"].as_u64().unwrap(), 6);
}

#[test]
fn test_design_default_order_table() {
    voxclean()
        .args(["design", "--sample-rate", "16000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("order 5"))
        .stdout(predicate::str::contains("11 taps"));
}

#[test]
fn test_design_rejects_highcut_above_nyquist() {
    voxclean()
        .args(["design", "--sample-rate", "8000", "--highcut", "4000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Nyquist"));
}

// =============================================================================
// INFO SUBCOMMAND
// =============================================================================

#[test]
fn test_info_json() {
    let output = voxclean().args(["info", "--json"]).assert().success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("cli_version").is_some());
    assert!(parsed.get("ffmpeg_found").is_some());
    assert_eq!(parsed["defaults"]["order"].as_u64().unwrap(), 6);
}

#[test]
fn test_info_text() {
    voxclean()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("voxclean CLI v"))
        .stdout(predicate::str::contains("Platform:"));
}

// =============================================================================
// BATCH SUBCOMMAND
// =============================================================================

#[test]
fn test_batch_wav_codec_processes_matching_files() {
    let tmp = tempfile::tempdir().unwrap();
    let input_dir = tmp.path().join("raw");
    let output_dir = tmp.path().join("filtered");
    fs::create_dir(&input_dir).unwrap();
    write_tone_wav(&input_dir.join("a.mp3"));
    write_tone_wav(&input_dir.join("b.mp3"));
    fs::write(input_dir.join("notes.txt"), "meeting notes").unwrap();

    voxclean()
        .arg("batch")
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--output-dir")
        .arg(&output_dir)
        .args(["--codec", "wav"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing a.mp3..."))
        .stderr(predicate::str::contains("Saved cleaned file to"))
        .stderr(predicate::str::contains("All files processed."))
        .stderr(predicate::str::contains("notes.txt").not());

    assert_eq!(list_dir(&output_dir), vec!["a.mp3", "b.mp3"]);
}

#[test]
fn test_batch_json_summary_with_partial_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let input_dir = tmp.path().join("raw");
    fs::create_dir(&input_dir).unwrap();
    write_tone_wav(&input_dir.join("good.wav"));
    fs::write(input_dir.join("bad.wav"), "truncated").unwrap();

    let output = voxclean()
        .arg("batch")
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--output-dir")
        .arg(tmp.path().join("out"))
        .args(["--codec", "wav", "--extension", "wav", "--json", "--quiet"])
        .assert()
        .code(3);

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["succeeded"].as_u64().unwrap(), 1);
    assert_eq!(parsed["failed"].as_u64().unwrap(), 1);
    assert_eq!(parsed["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_batch_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input_dir = tmp.path().join("raw");
    let output_dir = tmp.path().join("clean");
    fs::create_dir(&input_dir).unwrap();
    write_tone_wav(&input_dir.join("take1.wav"));

    let config = serde_json::json!({
        "input_dir": input_dir,
        "output_dir": output_dir,
        "extension": "wav",
        "filter": {"lowcut": 250.0, "highcut": 3400.0, "order": 4}
    });
    let config_path = tmp.path().join("voxclean.json");
    fs::write(&config_path, config.to_string()).unwrap();

    voxclean()
        .arg("batch")
        .arg("--config")
        .arg(&config_path)
        .args(["--codec", "wav", "--quiet"])
        .assert()
        .success();

    assert_eq!(list_dir(&output_dir), vec!["take1.wav"]);
}

#[test]
fn test_batch_missing_input_dir() {
    let tmp = tempfile::tempdir().unwrap();
    voxclean()
        .arg("batch")
        .arg("--input-dir")
        .arg(tmp.path().join("nope"))
        .arg("--output-dir")
        .arg(tmp.path().join("out"))
        .args(["--codec", "wav"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("input directory not found"));
}

#[test]
fn test_batch_invalid_band() {
    let tmp = tempfile::tempdir().unwrap();
    voxclean()
        .arg("batch")
        .arg("--input-dir")
        .arg(tmp.path())
        .arg("--output-dir")
        .arg(tmp.path().join("out"))
        .args(["--codec", "wav", "--lowcut", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("low cutoff"));
}

#[test]
fn test_batch_missing_ffmpeg() {
    let tmp = tempfile::tempdir().unwrap();
    voxclean()
        .arg("batch")
        .arg("--input-dir")
        .arg(tmp.path())
        .arg("--output-dir")
        .arg(tmp.path().join("out"))
        .args(["--ffmpeg", "/nonexistent_dir_12345/ffmpeg"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ffmpeg not found"));
}

#[test]
fn test_batch_mp3_through_ffmpeg() {
    if !ffmpeg_available() {
        eprintln!("Skipping test: ffmpeg not found on PATH");
        return;
    }

    let tmp = tempfile::tempdir().unwrap();
    let input_dir = tmp.path().join("raw");
    let output_dir = tmp.path().join("filtered");
    fs::create_dir(&input_dir).unwrap();

    let wav = tmp.path().join("tone.wav");
    write_tone_wav(&wav);
    let encoded = std::process::Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
        .arg(&wav)
        .args(["-f", "mp3"])
        .arg(input_dir.join("a.mp3"))
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if !encoded {
        eprintln!("Skipping test: ffmpeg cannot encode MP3 here");
        return;
    }
    fs::write(input_dir.join("notes.txt"), "not audio").unwrap();

    voxclean()
        .arg("batch")
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success();

    assert_eq!(list_dir(&output_dir), vec!["a.mp3"]);
    assert!(fs::metadata(output_dir.join("a.mp3")).unwrap().len() > 0);
}

#[cfg(unix)]
#[test]
fn test_batch_ffmpeg_codec_keeps_wav_container() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let input_dir = tmp.path().join("raw");
    let output_dir = tmp.path().join("filtered");
    fs::create_dir(&input_dir).unwrap();
    write_tone_wav(&input_dir.join("take.wav"));

    // Logs its arguments and copies the -i input to the output path
    let fake = tmp.path().join("ffmpeg");
    fs::write(
        &fake,
        "#!/bin/sh\n\
         echo \"$@\" >> \"$(dirname \"$0\")/calls.log\"\n\
         prev=\"\"; input=\"\"; last=\"\"\n\
         for arg in \"$@\"; do\n\
           [ \"$prev\" = \"-i\" ] && input=\"$arg\"\n\
           prev=\"$arg\"; last=\"$arg\"\n\
         done\n\
         cp \"$input\" \"$last\"\n",
    )
    .unwrap();
    fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

    voxclean()
        .arg("batch")
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--ffmpeg")
        .arg(&fake)
        .args(["--extension", "wav", "--quiet"])
        .assert()
        .success();

    assert_eq!(list_dir(&output_dir), vec!["take.wav"]);
    let calls = fs::read_to_string(tmp.path().join("calls.log")).unwrap();
    assert!(!calls.contains("-f mp3"), "unexpected container flag: {}", calls);

    // The output really is WAV, filtered down to mono
    let reader = hound::WavReader::open(output_dir.join("take.wav")).unwrap();
    assert_eq!(reader.spec().channels, 1);
}

// =============================================================================
// CLEAN SUBCOMMAND
// =============================================================================

#[test]
fn test_clean_single_wav_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in.wav");
    let output = tmp.path().join("nested").join("out.wav");
    write_tone_wav(&input);

    let assert = voxclean()
        .arg("clean")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--codec", "wav", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["source_channels"].as_u64().unwrap(), 2);
    assert_eq!(parsed["samples"].as_u64().unwrap(), 44100);

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len(), 44100);
}

#[test]
fn test_clean_missing_input() {
    let tmp = tempfile::tempdir().unwrap();
    voxclean()
        .arg("clean")
        .arg("--input")
        .arg(tmp.path().join("missing.mp3"))
        .arg("--output")
        .arg(tmp.path().join("out.mp3"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Input file not found"));
}
