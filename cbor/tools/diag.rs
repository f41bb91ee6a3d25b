/*!
CBOR Diagnostic Notation (RFC 8949 section 8) and lossy JSON renderings of
decoded items.
*/

use base64::prelude::*;
use cborwire::Value;
use std::fmt::Write;

/// Render an item in diagnostic notation.
pub fn to_diag(value: &Value) -> String {
    let mut out = String::new();
    write_diag(&mut out, value);
    out
}

fn write_diag(out: &mut String, value: &Value) {
    match value {
        Value::Unsigned(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Negative(n) => {
            let _ = write!(out, "{}", -1 - *n as i128);
        }
        Value::Bytes(b) => {
            let _ = write!(out, "h'{}'", hex::encode(b));
        }
        Value::Text(s) => out.push_str(&quote(s)),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_diag(out, item);
            }
            out.push(']');
        }
        Value::Map(pairs) => {
            out.push('{');
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_diag(out, k);
                out.push_str(": ");
                write_diag(out, v);
            }
            out.push('}');
        }
        Value::Tag(tag, item) => {
            let _ = write!(out, "{tag}(");
            write_diag(out, item);
            out.push(')');
        }
        Value::False => out.push_str("false"),
        Value::True => out.push_str("true"),
        Value::Null => out.push_str("null"),
        Value::Undefined => out.push_str("undefined"),
        Value::Simple(v) => {
            let _ = write!(out, "simple({v})");
        }
        Value::Float(f) => out.push_str(&format_float(*f)),
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        // Keep a decimal point so floats stay distinguishable from integers
        format!("{f:.1}")
    } else {
        format!("{f:?}")
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Convert an item to JSON, losing tags, the byte/text distinction and
/// non-finite floats. Byte strings become unpadded base64url.
pub fn to_json(value: &Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        Value::Unsigned(n) => Json::from(*n),
        Value::Negative(n) => match i64::try_from(-1 - *n as i128) {
            Ok(n) => Json::from(n),
            Err(_) => Json::from(-1.0 - *n as f64),
        },
        Value::Bytes(b) => Json::String(BASE64_URL_SAFE_NO_PAD.encode(b)),
        Value::Text(s) => Json::String(s.clone()),
        Value::Array(items) => Json::Array(items.iter().map(to_json).collect()),
        Value::Map(pairs) => Json::Object(
            pairs
                .iter()
                .map(|(k, v)| {
                    // JSON object keys must be strings
                    let key = match k {
                        Value::Text(s) => s.clone(),
                        k => to_json(k).to_string(),
                    };
                    (key, to_json(v))
                })
                .collect(),
        ),
        Value::Tag(_, item) => to_json(item),
        Value::False => Json::Bool(false),
        Value::True => Json::Bool(true),
        Value::Null | Value::Undefined | Value::Simple(_) => Json::Null,
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cborwire::decode::parse;
    use hex_literal::hex;

    fn diag(data: &[u8]) -> String {
        to_diag(&parse(data).unwrap())
    }

    #[test]
    fn diagnostic_notation() {
        assert_eq!(diag(&hex!("3bffffffffffffffff")), "-18446744073709551616");
        assert_eq!(diag(&hex!("f93e00")), "1.5");
        assert_eq!(diag(&hex!("f93c00")), "1.0");
        assert_eq!(diag(&hex!("f97e00")), "NaN");
        assert_eq!(diag(&hex!("f9fc00")), "-Infinity");
        assert_eq!(diag(&hex!("4401020304")), "h'01020304'");
        assert_eq!(diag(&hex!("62225c")), r#""\"\\""#);
        assert_eq!(diag(&hex!("f0")), "simple(16)");
        assert_eq!(diag(&hex!("f7")), "undefined");
        assert_eq!(
            diag(&hex!("c074323031332d30332d32315432303a30343a30305a")),
            r#"0("2013-03-21T20:04:00Z")"#
        );
        assert_eq!(
            diag(&hex!("bf61610161629f0203ffff")),
            r#"{"a": 1, "b": [2, 3]}"#
        );
    }

    #[test]
    fn json() {
        let json = to_json(&parse(&hex!("a3616101014140f6c14101")).unwrap());
        assert_eq!(json.to_string(), r#"{"1":"QA","a":1,"null":"AQ"}"#);
        assert_eq!(to_json(&parse(&hex!("f97c00")).unwrap()), serde_json::Value::Null);
        assert_eq!(to_json(&parse(&hex!("3863")).unwrap()), serde_json::json!(-100));
    }
}
