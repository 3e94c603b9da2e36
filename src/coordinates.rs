//! Decoder for the fixed-width UN/LOCODE coordinate column.
//!
//! The column looks like `5052N 00548E`: two digits of latitude degrees, two
//! of minutes and a hemisphere letter, one separator, then three digits of
//! longitude degrees, two of minutes and a hemisphere letter. Decoded values
//! are decimal degrees scaled by 10 000 and rounded to the nearest integer.

use crate::error::{ConvertError, Result};

const SCALE: i32 = 10_000;

/// Latitude and longitude, both in 1/10 000 of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    pub lat: i32,
    pub lng: i32,
}

/// Decode a coordinate string such as `5052N 00548E`.
pub fn decode(coords: &str) -> Result<Coordinates> {
    let bytes = coords.as_bytes();
    if bytes.len() < 12 {
        return Err(ConvertError::malformed(
            coords,
            format!("expected 12 characters, found {}", bytes.len()),
        ));
    }

    let lat = decode_axis(coords, &bytes[0..2], &bytes[2..4], bytes[4], b'N', b'S')?;
    let lng = decode_axis(coords, &bytes[6..9], &bytes[9..11], bytes[11], b'E', b'W')?;

    Ok(Coordinates { lat, lng })
}

fn decode_axis(
    coords: &str,
    degrees: &[u8],
    minutes: &[u8],
    hemisphere: u8,
    positive: u8,
    negative: u8,
) -> Result<i32> {
    let degrees = parse_digits(coords, degrees)?;
    let minutes = parse_digits(coords, minutes)?;

    let sign = match hemisphere {
        h if h == positive => 1,
        h if h == negative => -1,
        other => {
            return Err(ConvertError::malformed(
                coords,
                format!(
                    "hemisphere must be '{}' or '{}', found '{}'",
                    positive as char, negative as char, other as char
                ),
            ))
        }
    };

    // minutes * 10000 is never an odd multiple of 30, so the half-way case
    // cannot arise and rounding up on .5 agrees with round-half-to-even.
    let fraction = (minutes * SCALE + 30) / 60;
    Ok((degrees * SCALE + fraction) * sign)
}

fn parse_digits(coords: &str, digits: &[u8]) -> Result<i32> {
    digits.iter().try_fold(0i32, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + i32::from(b - b'0'))
        } else {
            Err(ConvertError::malformed(
                coords,
                format!("expected a digit, found '{}'", b as char),
            ))
        }
    })
}
