// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fingerprint reducer.
//!
//! Capture widgets feed numeric samples (audio peak magnitudes, pixel
//! values) through [`reduce`] and format the result into a credential
//! string. The engine treats that string exactly like typed text.
//!
//! These are simple rolling hashes. They provide no biometric security.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Fold samples into one value with `h = h * 31 + x` in wrapping `i32`.
pub fn reduce<I>(samples: I) -> i32
where
    I: IntoIterator,
    I::Item: Into<i32>,
{
    samples
        .into_iter()
        .fold(0i32, |h, x| (h << 5).wrapping_sub(h).wrapping_add(x.into()))
}

/// Loudest magnitude in one frame of frequency bins.
pub fn frame_peak(bins: &[u8]) -> u8 {
    bins.iter().copied().max().unwrap_or(0)
}

/// Voice credential from per-frame peak magnitudes.
///
/// With no samples the recording is treated as silence and a random tag is
/// used instead of a hash.
pub fn voice_fingerprint<R: Rng + ?Sized>(peaks: &[u8], rng: &mut R) -> String {
    if peaks.is_empty() {
        return format!("VOICE-AUTH-SILENCE-{}", rng.gen_range(1000..=9999));
    }
    let h = reduce(peaks.iter().copied());
    let marker = peaks.get(10).copied().unwrap_or(0);
    format!(
        "VOICE-AUTH-{:X}-{}Smp-HZ{marker}",
        h.unsigned_abs(),
        peaks.len()
    )
}

/// Retina credential from an RGBA pixel buffer. Only the red channel is folded.
pub fn retina_fingerprint(rgba: &[u8], at: DateTime<Utc>) -> String {
    let h = reduce(rgba.iter().step_by(4).copied());
    format!(
        "RETINA-ID:{:x}-{}",
        h.unsigned_abs(),
        base36_upper(at.timestamp_millis().unsigned_abs())
    )
}

/// Simulated fingerprint token for hosts without an authenticator.
pub fn bio_fingerprint<R: Rng + ?Sized>(rng: &mut R, at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().unsigned_abs();
    format!("BIO-PRNT-SIM-X{}-{:06}", rng.gen_range(0..9999), millis % 1_000_000)
}

/// Token derived from a platform authenticator's raw credential id.
pub fn bio_device_fingerprint(raw_id: &str) -> String {
    let head: String = raw_id.chars().take(32).collect();
    format!("BIO-AUTH-DEVICE-{}", head.to_uppercase())
}

fn base36_upper(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
