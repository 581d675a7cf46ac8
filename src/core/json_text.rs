use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};
use serde_json::Value;
use std::io;

/// Compact formatter that writes floating point numbers the way JavaScript's
/// `JSON.stringify` does: `250000.0` becomes `250000`, `1e21` becomes `1e+21`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsFormatter;

impl Formatter for JsFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match js_number(value) {
            Some(text) => writer.write_all(text.as_bytes()),
            None => CompactFormatter.write_f64(writer, value),
        }
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }
}

/// Serializes `value` as compact JSON with JavaScript number rendering.
pub fn to_compact_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, JsFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Text of a scalar as JavaScript's `String(value)` would produce it for
/// numbers; other values fall back to their compact JSON.
pub fn scalar_text(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => Ok(i.to_string()),
            (None, Some(u), _) => Ok(u.to_string()),
            (None, None, Some(f)) => Ok(js_number(f).unwrap_or_else(|| n.to_string())),
            _ => Ok(n.to_string()),
        },
        other => to_compact_json(other),
    }
}

/// JavaScript `Number.prototype.toString()` for a finite `f64`.
///
/// Digits come from Rust's shortest round-trip `{:e}` rendering, then the
/// decimal point is placed per the ECMAScript rules: plain digits up to
/// 21 integer places, `0.000ddd` down to 1e-7, exponent form otherwise.
pub fn js_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some("0".to_string());
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let k = digits.len() as i32;
    let n = exponent + 1;
    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }

    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if n >= 1 { '+' } else { '-' });
        out.push_str(&(n - 1).abs().to_string());
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_js_number_integral_floats() {
        assert_eq!(js_number(250000.0).as_deref(), Some("250000"));
        assert_eq!(js_number(100.0).as_deref(), Some("100"));
        assert_eq!(js_number(-3.0).as_deref(), Some("-3"));
        assert_eq!(js_number(-0.0).as_deref(), Some("0"));
        assert_eq!(js_number(1e20).as_deref(), Some("100000000000000000000"));
    }

    #[test]
    fn test_js_number_fractions_and_exponents() {
        assert_eq!(js_number(0.1).as_deref(), Some("0.1"));
        assert_eq!(js_number(123.456).as_deref(), Some("123.456"));
        assert_eq!(js_number(0.000001).as_deref(), Some("0.000001"));
        assert_eq!(js_number(1e-7).as_deref(), Some("1e-7"));
        assert_eq!(js_number(1.5e-7).as_deref(), Some("1.5e-7"));
        assert_eq!(js_number(1e21).as_deref(), Some("1e+21"));
        assert_eq!(js_number(2.5e22).as_deref(), Some("2.5e+22"));
    }

    #[test]
    fn test_compact_json_matches_stringify() {
        let value: Value =
            serde_json::from_str(r#"{"price":250000.00,"area":1e2,"rate":0.5,"rooms":3}"#)
                .unwrap();
        assert_eq!(
            to_compact_json(&value).unwrap(),
            r#"{"price":250000,"area":100,"rate":0.5,"rooms":3}"#
        );
        assert_eq!(
            to_compact_json(&json!({"name": "Villa \"A\"", "tags": [1.0, null]})).unwrap(),
            r#"{"name":"Villa \"A\"","tags":[1,null]}"#
        );
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!(1042)).unwrap(), "1042");
        assert_eq!(scalar_text(&json!(12.0)).unwrap(), "12");
        assert_eq!(scalar_text(&json!("BK-1")).unwrap(), "BK-1");
        assert_eq!(scalar_text(&json!([1.0, 2])).unwrap(), "[1,2]");
    }
}
