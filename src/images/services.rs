use image::imageops::FilterType;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::AppResult;

/// Keywords recognised in upload filenames, checked in this order.
const FILENAME_KEYWORDS: [&str; 6] = ["banana", "apple", "rice", "chicken", "egg", "bread"];

const ALLOWED_EXT: [&str; 3] = ["jpg", "jpeg", "png"];

/// Side of the square the image is downsampled to before averaging.
const SAMPLE_SIDE: u32 = 60;
const BRIGHT_THRESHOLD: f64 = 200.0;

/// Coarse food guess for an upload.
///
/// The filename is checked for a known keyword first; only when none is
/// present is the image decoded and its mean red/green levels compared.
pub fn classify(bytes: &[u8], filename: &str) -> AppResult<String> {
    if let Some(keyword) = guess_from_filename(filename) {
        debug!(filename, keyword, "guessed from filename");
        return Ok(keyword.to_string());
    }

    let (red, green) = mean_red_green(bytes)?;
    let guess = guess_from_colour(red, green);
    debug!(filename, red, green, guess, "guessed from colour");
    Ok(guess.to_string())
}

fn guess_from_filename(filename: &str) -> Option<&'static str> {
    let name = filename.to_lowercase();
    FILENAME_KEYWORDS.into_iter().find(|k| name.contains(k))
}

fn guess_from_colour(red: f64, green: f64) -> &'static str {
    if red > BRIGHT_THRESHOLD && green > BRIGHT_THRESHOLD {
        "banana"
    } else if red > green {
        "apple"
    } else {
        "rice"
    }
}

fn mean_red_green(bytes: &[u8]) -> AppResult<(f64, f64)> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let small = image::imageops::resize(&rgb, SAMPLE_SIDE, SAMPLE_SIDE, FilterType::CatmullRom);

    let (mut red, mut green) = (0u64, 0u64);
    for px in small.pixels() {
        red += u64::from(px[0]);
        green += u64::from(px[1]);
    }
    let n = f64::from(SAMPLE_SIDE * SAMPLE_SIDE);
    Ok((red as f64 / n, green as f64 / n))
}

/// True when the filename has one of the accepted image extensions.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXT.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to something safe to store on disk.
/// Accented letters are folded to ASCII (NFKD) before anything is stripped.
/// Returns `None` when nothing usable is left.
pub fn secure_filename(filename: &str) -> Option<String> {
    lazy_static! {
        static ref UNSAFE_RE: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
    }
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let base = ascii.rsplit(['/', '\\']).next().unwrap_or("");
    let spaced = base.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_RE.replace_all(&spaced, "");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

pub fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, e)| e.to_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
