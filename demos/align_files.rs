//! Example: Align pairs of audio files and write trimmed WAVs
//!
//! Usage:
//!   cargo run --release --example align_files -- [--jobs N] [--json] [--seconds S]
//!       [--feature energy|spectral] [--mix average|dominant|first] [--out DIR]
//!       <a1> <b1> [<a2> <b2> ...]
//!
//! Notes:
//! - Arguments after the options are taken two at a time as (A, B) pairs.
//! - Pairs are aligned in parallel; each alignment is single-threaded.
//! - Outputs go to `DIR/trimmed_A.wav` and `DIR/trimmed_B.wav`, with a
//!   `_<n>` suffix when more than one pair is given.

use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;
use stratum_align::io::{decode_audio_file, write_wav, ChannelMixMode, WavEncoding};
use stratum_align::{
    AlignConfig, AlignError, Aligner, AlignmentReport, FeatureStrategy, DEFAULT_TRIM_SECONDS,
};

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

#[derive(Serialize)]
struct PairOut {
    a: String,
    b: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    trimmed_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trimmed_b: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<AlignmentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn output_paths(out_dir: &Path, index: usize, pairs: usize) -> (PathBuf, PathBuf) {
    if pairs == 1 {
        (out_dir.join("trimmed_A.wav"), out_dir.join("trimmed_B.wav"))
    } else {
        (
            out_dir.join(format!("trimmed_A_{}.wav", index + 1)),
            out_dir.join(format!("trimmed_B_{}.wav", index + 1)),
        )
    }
}

fn align_pair(
    aligner: &Aligner,
    a_path: &str,
    b_path: &str,
    trim_seconds: f32,
    mix: ChannelMixMode,
    out_a: &Path,
    out_b: &Path,
) -> Result<AlignmentReport, AlignError> {
    let a = decode_audio_file(a_path, mix)?;
    let b = decode_audio_file(b_path, mix)?;
    let outcome = aligner.align_and_trim_with_report(&a, &b, trim_seconds)?;
    write_wav(out_a, &outcome.trimmed_a, WavEncoding::Pcm16)?;
    write_wav(out_b, &outcome.trimmed_b, WavEncoding::Pcm16)?;
    Ok(outcome.report)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut trim_seconds = DEFAULT_TRIM_SECONDS;
    let mut feature = FeatureStrategy::default();
    let mut mix = ChannelMixMode::default();
    let mut out_dir = PathBuf::from(".");
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--seconds" => {
                trim_seconds = args
                    .first()
                    .ok_or("--seconds requires a value")?
                    .parse::<f32>()?;
                args.remove(0);
            }
            "--feature" => {
                feature = args
                    .first()
                    .ok_or("--feature requires a value")?
                    .parse::<FeatureStrategy>()?;
                args.remove(0);
            }
            "--mix" => {
                mix = args
                    .first()
                    .ok_or("--mix requires a value")?
                    .parse::<ChannelMixMode>()?;
                args.remove(0);
            }
            "--out" => {
                out_dir = PathBuf::from(args.first().ok_or("--out requires a value")?);
                args.remove(0);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: align_files [options] <a1> <b1> [<a2> <b2> ...]\n\
                     \n\
                     --jobs N         Parallel workers (default: CPU-1)\n\
                     --json           Emit one JSON object per pair (JSONL)\n\
                     --seconds S      Trim duration, 5-120 (default: 30)\n\
                     --feature NAME   energy | spectral (default: spectral)\n\
                     --mix MODE       average | dominant | first (default: average)\n\
                     --out DIR        Output directory (default: .)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() || paths.len() % 2 != 0 {
        eprintln!("ERROR: Provide audio files in (A, B) pairs. Use --help for usage.");
        std::process::exit(2);
    }

    let config = AlignConfig {
        feature,
        ..Default::default()
    };
    let aligner = Aligner::new(config)?;
    std::fs::create_dir_all(&out_dir)?;

    let pairs: Vec<(String, String)> = paths
        .chunks(2)
        .map(|p| (p[0].clone(), p[1].clone()))
        .collect();
    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!(
        "Aligning {} pair(s), jobs={}, seconds={}, feature={}",
        pairs.len(),
        jobs,
        trim_seconds,
        feature
    );

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<PairOut> = pool.install(|| {
        pairs
            .par_iter()
            .enumerate()
            .map(|(index, (a_path, b_path))| {
                let (out_a, out_b) = output_paths(&out_dir, index, pairs.len());
                match align_pair(&aligner, a_path, b_path, trim_seconds, mix, &out_a, &out_b) {
                    Ok(report) => PairOut {
                        a: a_path.clone(),
                        b: b_path.clone(),
                        ok: true,
                        trimmed_a: Some(out_a.display().to_string()),
                        trimmed_b: Some(out_b.display().to_string()),
                        report: Some(report),
                        error: None,
                    },
                    Err(e) => PairOut {
                        a: a_path.clone(),
                        b: b_path.clone(),
                        ok: false,
                        trimmed_a: None,
                        trimmed_b: None,
                        report: None,
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
        } else if let Some(report) = &o.report {
            println!(
                "[{}/{}] {} <> {}: A@{:.3}s B@{:.3}s lag={:+.3}s cost/step={:.4} time={:.2}ms",
                idx + 1,
                outs.len(),
                o.a,
                o.b,
                report.start_seconds_a(),
                report.start_seconds_b(),
                report.lag_seconds(),
                report.normalized_cost,
                report.metadata.processing_time_ms
            );
        } else {
            println!(
                "[{}/{}] {} <> {}: ERROR: {}",
                idx + 1,
                outs.len(),
                o.a,
                o.b,
                o.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let ok = outs.iter().filter(|o| o.ok).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
