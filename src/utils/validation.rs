//! Request-boundary validation of raw text inputs

use crate::core::{FeatureVector, PipelineError, Result, FEATURE_NAMES, N_FEATURES};

/// Parse eight raw text fields into a feature vector
///
/// Fields are trimmed. Every field must be present and parse as a finite
/// number; the error names the first offending field. No value ranges are
/// enforced.
pub fn parse_inputs<S: AsRef<str>>(fields: &[S]) -> Result<FeatureVector> {
    if fields.len() != N_FEATURES {
        return Err(PipelineError::InvalidInput(format!(
            "expected {N_FEATURES} values, got {}",
            fields.len()
        )));
    }

    let mut values = [0.0; N_FEATURES];
    for (k, (value, raw)) in values.iter_mut().zip(fields).enumerate() {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(PipelineError::InvalidInput(format!(
                "field {} ({}) is empty",
                k + 1,
                FEATURE_NAMES[k]
            )));
        }
        *value = raw.parse::<f64>().map_err(|_| {
            PipelineError::InvalidInput(format!(
                "field {} ({}) is not a number: '{raw}'",
                k + 1,
                FEATURE_NAMES[k]
            ))
        })?;
    }

    FeatureVector::new(values)
}

/// Split one line of text into fields
///
/// A line containing a comma is split on commas only, so an empty slot stays
/// an empty field; otherwise the line is split on whitespace.
pub fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_inputs() {
        let fv = parse_inputs(&["1", "85", "66", "29", "0", "26.6", "0.351", "31"]).unwrap();
        assert_eq!(fv.as_slice(), &[1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.351, 31.0]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let fv = parse_inputs(&[" 1", "85 ", "66", "29", "0", "26.6", "0.351", "\t31"]).unwrap();
        assert_eq!(fv.get(7), 31.0);
    }

    #[test]
    fn test_parse_accepts_out_of_range_values() {
        let fv = parse_inputs(&["-1", "0", "0", "0", "0", "0", "0", "-30"]).unwrap();
        assert_eq!(fv.get(7), -30.0);
    }

    #[test]
    fn test_non_numeric_field() {
        let err = parse_inputs(&["1", "two", "3", "4", "5", "6", "0.3", "30"]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert!(err.to_string().contains("field 2 (Glucose)"));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_inputs(&["1", "2", "3", "4", "5", "6", "7"]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert!(parse_inputs::<&str>(&[]).is_err());
        assert!(parse_inputs(&["1"; 9]).is_err());
    }

    #[test]
    fn test_empty_field() {
        let err = parse_inputs(&["1", "2", "3", "", "5", "6", "7", "8"]).unwrap_err();
        assert!(err.to_string().contains("SkinThickness"));
    }

    #[test]
    fn test_non_finite_fields() {
        for bad in ["NaN", "inf", "-inf", "infinity"] {
            let fields = ["1", "2", "3", "4", "5", "6", "7", bad];
            assert!(
                matches!(parse_inputs(&fields), Err(PipelineError::InvalidInput(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("1, 85,66 ,29"), vec!["1", "85", "66", "29"]);
        assert_eq!(split_fields(" 1\t85  66 29"), vec!["1", "85", "66", "29"]);
        assert!(split_fields("   ").is_empty());
    }

    #[test]
    fn test_split_fields_keeps_empty_slots() {
        let fields = split_fields("1,,66,29,0,26.6,0.351,31,");
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[1], "");

        let fields = split_fields("1,,66,29,0,26.6,0.351,31");
        let err = parse_inputs(&fields).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert!(err.to_string().contains("field 2 (Glucose) is empty"));
    }
}
