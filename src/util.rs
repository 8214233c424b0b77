//! Small utility helpers used across modules.

/// Round to 2 decimal places and render as answer text.
/// Float-derived answers keep at least one decimal ("6.0", "0.0") and drop a
/// trailing zero in the hundredths place ("7.50" -> "7.5", "12.57" stays).
pub fn fmt_rounded(value: f64) -> String {
  let rounded = (value * 100.0).round() / 100.0;
  if rounded == rounded.trunc() {
    format!("{:.1}", rounded)
  } else {
    let s = format!("{:.2}", rounded);
    match s.strip_suffix('0') {
      Some(t) => t.to_string(),
      None => s,
    }
  }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max { s.to_string() } else { format!("{}… ({} bytes total)", &s[..max], s.len()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn whole_values_keep_one_decimal() {
    assert_eq!(fmt_rounded(6.0), "6.0");
    assert_eq!(fmt_rounded(0.0), "0.0");
    assert_eq!(fmt_rounded(1.0), "1.0");
    assert_eq!(fmt_rounded(-1.0), "-1.0");
  }

  #[test]
  fn fractional_values_trim_trailing_hundredths_zero() {
    assert_eq!(fmt_rounded(7.5), "7.5");
    assert_eq!(fmt_rounded(0.5), "0.5");
    assert_eq!(fmt_rounded(12.566370614359172), "12.57");
    assert_eq!(fmt_rounded(0.8660254037844386), "0.87");
  }

  #[test]
  fn near_zero_rounds_to_zero() {
    // cos(90°) in f64 is ~6.1e-17, which must surface as "0.0".
    assert_eq!(fmt_rounded(6.123233995736766e-17), "0.0");
  }

  #[test]
  fn trunc_for_log_bounds_output() {
    assert_eq!(trunc_for_log("short", 32), "short");
    let long = "a".repeat(40);
    let out = trunc_for_log(&long, 8);
    assert!(out.starts_with("aaaaaaaa"));
    assert!(out.contains("40 bytes total"));
  }
}
