//! Text to typed scalar coercion for formats without a type system.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. `true` / `false`, any letter case → [`Value::Bool`]
//! 2. ASCII digits only, no sign or point → [`Value::Integer`]
//! 3. Anything `f64` can parse, ignoring surrounding whitespace → [`Value::Float`].
//!    Underscores are accepted as digit-group separators (`1_000`) when each
//!    one sits between two digits.
//! 4. Otherwise → [`Value::String`], verbatim
//!
//! Rule 2 deliberately rejects a leading sign, so `"-10"` is a Float while
//! `"10"` is an Integer.

use crate::record::Value;

/// Coerce one raw cell into a typed scalar.
pub fn coerce(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if is_unsigned_digits(raw) {
        // Too many digits for i64: fall through to the float rule.
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Integer(n);
        }
    }
    if let Some(x) = parse_float(raw.trim()) {
        return Value::Float(x);
    }
    Value::String(raw.to_string())
}

/// Render a scalar back to cell text. Returns `None` for nested values.
pub fn to_cell(value: &Value) -> Option<String> {
    match value {
        Value::Nested(_) => None,
        Value::Null
        | Value::Bool(_)
        | Value::Integer(_)
        | Value::Float(_)
        | Value::String(_) => Some(value.to_string()),
    }
}

fn is_unsigned_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

fn parse_float(text: &str) -> Option<f64> {
    if !text.contains('_') {
        return text.parse().ok();
    }
    let bytes = text.as_bytes();
    let grouped = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !grouped {
        return None;
    }
    text.replace('_', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans_any_case() {
        assert_eq!(coerce("true"), Value::Bool(true));
        assert_eq!(coerce("TRUE"), Value::Bool(true));
        assert_eq!(coerce("False"), Value::Bool(false));
    }

    #[test]
    fn test_unsigned_digits_are_integers() {
        assert_eq!(coerce("10"), Value::Integer(10));
        assert_eq!(coerce("007"), Value::Integer(7));
        assert_eq!(coerce("0"), Value::Integer(0));
    }

    #[test]
    fn test_signed_numbers_are_floats() {
        assert_eq!(coerce("-10"), Value::Float(-10.0));
        assert_eq!(coerce("+3"), Value::Float(3.0));
    }

    #[test]
    fn test_decimals_are_floats() {
        assert_eq!(coerce("1.5"), Value::Float(1.5));
        assert_eq!(coerce("1e3"), Value::Float(1000.0));
        assert_eq!(coerce(" 10 "), Value::Float(10.0));
    }

    #[test]
    fn test_digit_group_underscores_are_floats() {
        assert_eq!(coerce("1_000"), Value::Float(1000.0));
        assert_eq!(coerce("-1_000.5"), Value::Float(-1000.5));
        assert_eq!(coerce("1e1_0"), Value::Float(1e10));
    }

    #[test]
    fn test_misplaced_underscores_stay_strings() {
        for raw in ["_1", "1_", "1__0", "1_.5", "in_f", "_"] {
            assert_eq!(coerce(raw), Value::from(raw), "coercing {}", raw);
        }
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert!(matches!(coerce("99999999999999999999"), Value::Float(_)));
    }

    #[test]
    fn test_everything_else_is_string() {
        assert_eq!(coerce("abc"), Value::from("abc"));
        assert_eq!(coerce("1988-12-12"), Value::from("1988-12-12"));
        assert_eq!(coerce(""), Value::from(""));
        assert_eq!(coerce("truey"), Value::from("truey"));
    }

    #[test]
    fn test_to_cell_scalars() {
        assert_eq!(to_cell(&Value::Integer(100)).as_deref(), Some("100"));
        assert_eq!(to_cell(&Value::Float(-10.0)).as_deref(), Some("-10.0"));
        assert_eq!(to_cell(&Value::Null).as_deref(), Some(""));
        assert_eq!(to_cell(&Value::Bool(false)).as_deref(), Some("false"));
    }

    #[test]
    fn test_to_cell_rejects_nested() {
        assert_eq!(to_cell(&Value::from(vec![Value::Integer(1)])), None);
    }

    #[test]
    fn test_cell_text_coerces_back() {
        for value in [
            Value::Bool(true),
            Value::Integer(42),
            Value::Float(42.0),
            Value::Float(-0.25),
            Value::from("plain"),
        ] {
            let cell = to_cell(&value).unwrap();
            assert_eq!(coerce(&cell), value);
        }
    }
}
