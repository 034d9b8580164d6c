#![deny(unsafe_code)]

use triptab_model::{RawValue, SemanticType, TypedValue};

/// A cell that cannot be converted to its declared type.
///
/// Coercion follows a fixed conversion table and never guesses intent beyond
/// it; anything ambiguous fails and is reported, it is not best-effort
/// converted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("cannot coerce {found} to {target}")]
pub struct CoercionError {
    pub found: String,
    pub target: SemanticType,
}

impl CoercionError {
    fn new(raw: &RawValue, target: SemanticType) -> Self {
        let found = match raw {
            RawValue::Missing => "missing value".to_string(),
            RawValue::Bool(b) => format!("boolean {b}"),
            RawValue::Int(i) => format!("integer {i}"),
            RawValue::Float(f) => format!("float {f}"),
            RawValue::Text(s) => format!("text {s:?}"),
            RawValue::List(_) => "list".to_string(),
        };
        Self { found, target }
    }
}

/// Converts a raw cell to the declared semantic type.
///
/// Absent cells stay absent for every target type. `list_separator` is only
/// consulted when a delimited string is coerced to a list.
pub fn coerce(
    raw: &RawValue,
    target: SemanticType,
    list_separator: &str,
) -> Result<TypedValue, CoercionError> {
    if raw.is_missing() {
        return Ok(TypedValue::Missing);
    }
    match target {
        SemanticType::Str => coerce_str(raw),
        SemanticType::Int => coerce_int(raw),
        SemanticType::Float => coerce_float(raw),
        SemanticType::Bool => coerce_bool(raw),
        SemanticType::List => coerce_list(raw, list_separator),
    }
}

fn coerce_str(raw: &RawValue) -> Result<TypedValue, CoercionError> {
    raw.scalar_text()
        .map(TypedValue::Text)
        .ok_or_else(|| CoercionError::new(raw, SemanticType::Str))
}

fn coerce_int(raw: &RawValue) -> Result<TypedValue, CoercionError> {
    match raw {
        RawValue::Int(i) => Ok(TypedValue::Int(*i)),
        // The upper bound is exclusive: i64::MAX as f64 rounds up to 2^63,
        // which is not representable and would saturate.
        RawValue::Float(f)
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
        {
            Ok(TypedValue::Int(*f as i64))
        }
        RawValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(TypedValue::Int)
            .map_err(|_| CoercionError::new(raw, SemanticType::Int)),
        _ => Err(CoercionError::new(raw, SemanticType::Int)),
    }
}

fn coerce_float(raw: &RawValue) -> Result<TypedValue, CoercionError> {
    match raw {
        RawValue::Float(f) => Ok(TypedValue::Float(*f)),
        RawValue::Int(i) => Ok(TypedValue::Float(*i as f64)),
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(TypedValue::Float)
            .map_err(|_| CoercionError::new(raw, SemanticType::Float)),
        _ => Err(CoercionError::new(raw, SemanticType::Float)),
    }
}

fn coerce_bool(raw: &RawValue) -> Result<TypedValue, CoercionError> {
    match raw {
        RawValue::Bool(b) => Ok(TypedValue::Bool(*b)),
        RawValue::Int(1) => Ok(TypedValue::Bool(true)),
        RawValue::Int(0) => Ok(TypedValue::Bool(false)),
        RawValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(TypedValue::Bool(true)),
            "false" | "no" | "0" => Ok(TypedValue::Bool(false)),
            _ => Err(CoercionError::new(raw, SemanticType::Bool)),
        },
        _ => Err(CoercionError::new(raw, SemanticType::Bool)),
    }
}

fn coerce_list(raw: &RawValue, separator: &str) -> Result<TypedValue, CoercionError> {
    match raw {
        RawValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item.scalar_text() {
                    Some(text) => out.push(text),
                    None => return Err(CoercionError::new(raw, SemanticType::List)),
                }
            }
            Ok(TypedValue::List(out))
        }
        RawValue::Text(s) => Ok(TypedValue::List(
            s.split(separator).map(str::to_string).collect(),
        )),
        _ => Err(CoercionError::new(raw, SemanticType::List)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEP: &str = ",";

    #[test]
    fn numeric_string_converts_to_int() {
        assert_eq!(
            coerce(&RawValue::Text("300".into()), SemanticType::Int, SEP).unwrap(),
            TypedValue::Int(300)
        );
        assert_eq!(
            coerce(&RawValue::Text(" 300 ".into()), SemanticType::Int, SEP).unwrap(),
            TypedValue::Int(300)
        );
    }

    #[test]
    fn non_numeric_string_fails_for_int() {
        assert!(coerce(&RawValue::Text("abc".into()), SemanticType::Int, SEP).is_err());
        assert!(coerce(&RawValue::Text("3.5".into()), SemanticType::Int, SEP).is_err());
    }

    #[test]
    fn integral_float_narrows_fractional_fails() {
        assert_eq!(
            coerce(&RawValue::Float(4.0), SemanticType::Int, SEP).unwrap(),
            TypedValue::Int(4)
        );
        assert!(coerce(&RawValue::Float(4.5), SemanticType::Int, SEP).is_err());
    }

    // A whole-valued float outside the i64 range must fail rather than
    // saturate to a wrong integer.
    #[test]
    fn out_of_range_float_fails_for_int() {
        assert!(coerce(&RawValue::Float(1e30), SemanticType::Int, SEP).is_err());
        assert!(coerce(&RawValue::Float(-1e30), SemanticType::Int, SEP).is_err());
        // 2^63 itself saturates under `as`, so it is rejected too
        assert!(coerce(&RawValue::Float(9.223372036854776e18), SemanticType::Int, SEP).is_err());
        assert!(coerce(&RawValue::Float(f64::INFINITY), SemanticType::Int, SEP).is_err());
        assert!(coerce(&RawValue::Float(f64::NAN), SemanticType::Int, SEP).is_err());
        // -2^63 is exactly representable and stays convertible
        assert_eq!(
            coerce(&RawValue::Float(i64::MIN as f64), SemanticType::Int, SEP).unwrap(),
            TypedValue::Int(i64::MIN)
        );
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(
            coerce(&RawValue::Int(7), SemanticType::Float, SEP).unwrap(),
            TypedValue::Float(7.0)
        );
    }

    // Booleans have a canonical textual form, so coercing one to str is a
    // success per policy, not a failure.
    #[test]
    fn bool_converts_to_canonical_text() {
        assert_eq!(
            coerce(&RawValue::Bool(true), SemanticType::Str, SEP).unwrap(),
            TypedValue::Text("true".to_string())
        );
    }

    #[test]
    fn bool_tokens_are_case_insensitive() {
        for token in ["true", "TRUE", "Yes", "1"] {
            assert_eq!(
                coerce(&RawValue::Text(token.into()), SemanticType::Bool, SEP).unwrap(),
                TypedValue::Bool(true),
                "token {token}"
            );
        }
        for token in ["false", "No", "0"] {
            assert_eq!(
                coerce(&RawValue::Text(token.into()), SemanticType::Bool, SEP).unwrap(),
                TypedValue::Bool(false),
                "token {token}"
            );
        }
        assert!(coerce(&RawValue::Text("maybe".into()), SemanticType::Bool, SEP).is_err());
        assert!(coerce(&RawValue::Int(2), SemanticType::Bool, SEP).is_err());
    }

    #[test]
    fn bool_never_converts_to_int() {
        assert!(coerce(&RawValue::Bool(true), SemanticType::Int, SEP).is_err());
    }

    #[test]
    fn delimited_string_splits_into_list() {
        assert_eq!(
            coerce(&RawValue::Text("walk,pt,walk".into()), SemanticType::List, SEP).unwrap(),
            TypedValue::List(vec!["walk".into(), "pt".into(), "walk".into()])
        );
    }

    #[test]
    fn structured_list_passes_scalars_fail_nested() {
        assert_eq!(
            coerce(
                &RawValue::List(vec![RawValue::Text("walk".into()), RawValue::Int(2)]),
                SemanticType::List,
                SEP
            )
            .unwrap(),
            TypedValue::List(vec!["walk".into(), "2".into()])
        );
        assert!(
            coerce(
                &RawValue::List(vec![RawValue::List(vec![])]),
                SemanticType::List,
                SEP
            )
            .is_err()
        );
    }

    #[test]
    fn list_never_converts_to_scalar() {
        let list = RawValue::List(vec![RawValue::Int(1)]);
        assert!(coerce(&list, SemanticType::Str, SEP).is_err());
        assert!(coerce(&list, SemanticType::Int, SEP).is_err());
    }

    #[test]
    fn missing_stays_missing_for_every_type() {
        for ty in [
            SemanticType::Str,
            SemanticType::Int,
            SemanticType::Float,
            SemanticType::Bool,
            SemanticType::List,
        ] {
            assert_eq!(
                coerce(&RawValue::Missing, ty, SEP).unwrap(),
                TypedValue::Missing
            );
        }
    }
}
