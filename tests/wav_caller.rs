//! The pipeline only sees in-memory buffers; this drives it the way a batch driver would,
//! decoding a mono 16-bit WAV into normalized `f32` samples and writing the result back.

use std::io::Cursor;

use energy_vad::{Dataset, Vad, VadOpts};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

const RATE: u32 = 16_000;

fn spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn encode(samples: &[f32]) -> anyhow::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut buf, spec())?;
        for &s in samples {
            writer.write_sample((s.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16)?;
        }
        writer.finalize()?;
    }
    Ok(buf.into_inner())
}

fn decode(bytes: Vec<u8>) -> anyhow::Result<(Vec<f32>, WavSpec)> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    anyhow::ensure!(
        spec.channels == 1,
        "expected mono, got {} channels",
        spec.channels
    );

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(|pcm| f32::from(pcm) / f32::from(i16::MAX)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((samples, spec))
}

fn utterance() -> Vec<f32> {
    // 0.5 s of a 220 Hz tone, then 0.5 s of faint hiss.
    let tone = (0..8_000).map(|i| {
        let t = i as f32 / RATE as f32;
        0.6 * (2.0 * std::f32::consts::PI * 220.0 * t).sin()
    });
    let hiss = (0..8_000).map(|i| if i % 2 == 0 { 0.0005 } else { -0.0005 });
    tone.chain(hiss).collect()
}

#[test]
fn trims_hiss_from_decoded_wav() -> anyhow::Result<()> {
    let (samples, spec) = decode(encode(&utterance())?)?;
    assert_eq!(samples.len(), 16_000);

    let vad = Vad::new(VadOpts::for_dataset(Dataset::Ravdess))?;
    let voiced = vad.run(&samples, spec.sample_rate)?;
    assert!(voiced.len() >= 7_600 && voiced.len() < 9_000, "got {}", voiced.len());

    let (round_tripped, _) = decode(encode(&voiced)?)?;
    assert_eq!(round_tripped.len(), voiced.len());
    Ok(())
}

#[test]
fn silent_wav_yields_nothing() -> anyhow::Result<()> {
    let (samples, spec) = decode(encode(&[0.0; 4_000])?)?;
    let voiced = Vad::new(VadOpts::default())?.run(&samples, spec.sample_rate)?;
    assert!(voiced.is_empty());
    Ok(())
}
