//! CSV dataset loading
//!
//! The file must start with a header row. Feature columns are located by
//! name, so their position in the file does not matter; extra columns are
//! ignored. The `Outcome` column holds 0 or 1.

use crate::core::{
    Dataset, FeatureVector, Label, PipelineError, Result, Sample, FEATURE_NAMES, N_FEATURES,
    OUTCOME_COLUMN,
};
use log::info;
use std::fs;
use std::io::{BufRead, ErrorKind};
use std::path::Path;

/// Labeled records loaded from a CSV file
#[derive(Debug, Clone)]
pub struct CSVDataset {
    samples: Vec<Sample>,
}

/// Positions of the required columns within a row
#[derive(Debug)]
struct ColumnLayout {
    features: [usize; N_FEATURES],
    outcome: usize,
    width: usize,
}

impl CSVDataset {
    /// Load a dataset from a CSV file
    ///
    /// A missing or unreadable file (including a directory) is reported as
    /// `DatasetNotFound`; text that is not UTF-8 is an `InvalidDataset`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::InvalidData => {
                PipelineError::InvalidDataset(format!("{path:?} is not valid UTF-8 text"))
            }
            _ => PipelineError::DatasetNotFound {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let dataset = Self::from_reader(contents.as_bytes())?;
        info!("Loaded {} records from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    /// Load a dataset from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let layout = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line.map_err(read_error)?;
                    if !line.trim().is_empty() {
                        break ColumnLayout::from_header(&line)?;
                    }
                }
                None => {
                    return Err(PipelineError::InvalidDataset(
                        "file is empty".to_string(),
                    ))
                }
            }
        };

        let mut samples = Vec::new();
        for (idx, line) in lines {
            let line = line.map_err(read_error)?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            samples.push(layout.parse_row(line, idx + 1)?);
        }

        if samples.is_empty() {
            return Err(PipelineError::InvalidDataset(
                "no data rows after header".to_string(),
            ));
        }

        Ok(Self { samples })
    }

    /// Build a dataset directly from samples
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

fn read_error(err: std::io::Error) -> PipelineError {
    PipelineError::InvalidDataset(format!("read error: {err}"))
}

impl ColumnLayout {
    fn from_header(line: &str) -> Result<Self> {
        let names: Vec<&str> = line
            .split(',')
            .map(|f| f.trim().trim_matches('"'))
            .collect();

        let find = |wanted: &str| {
            names.iter().position(|&n| n == wanted).ok_or_else(|| {
                PipelineError::InvalidDataset(format!("missing required column '{wanted}'"))
            })
        };

        let mut features = [0; N_FEATURES];
        for (slot, name) in features.iter_mut().zip(FEATURE_NAMES) {
            *slot = find(name)?;
        }
        let outcome = find(OUTCOME_COLUMN)?;

        Ok(Self {
            features,
            outcome,
            width: names.len(),
        })
    }

    fn parse_row(&self, line: &str, line_no: usize) -> Result<Sample> {
        let fields: Vec<&str> = line
            .split(',')
            .map(|f| f.trim().trim_matches('"'))
            .collect();
        if fields.len() != self.width {
            return Err(PipelineError::InvalidDataset(format!(
                "line {line_no}: expected {} fields, found {}",
                self.width,
                fields.len()
            )));
        }

        let mut values = [0.0; N_FEATURES];
        for (k, (value, &col)) in values.iter_mut().zip(&self.features).enumerate() {
            *value = fields[col]
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    PipelineError::InvalidDataset(format!(
                        "line {line_no}: invalid {} value '{}'",
                        FEATURE_NAMES[k], fields[col]
                    ))
                })?;
        }

        let raw_outcome = fields[self.outcome];
        let label = raw_outcome
            .parse::<i64>()
            .ok()
            .and_then(Label::from_outcome)
            .ok_or_else(|| {
                PipelineError::InvalidDataset(format!(
                    "line {line_no}: {OUTCOME_COLUMN} must be 0 or 1, got '{raw_outcome}'"
                ))
            })?;

        let features = FeatureVector::new(values)
            .map_err(|e| PipelineError::InvalidDataset(format!("line {line_no}: {e}")))?;
        Ok(Sample::new(features, label))
    }
}

impl Dataset for CSVDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get_sample(&self, i: usize) -> &Sample {
        &self.samples[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome";

    fn load(body: &str) -> Result<CSVDataset> {
        CSVDataset::from_reader(Cursor::new(format!("{HEADER}\n{body}")))
    }

    #[test]
    fn test_csv_basic() {
        let dataset = load("1,85,66,29,0,26.6,0.351,31,0\n6,148,72,35,0,33.6,0.627,50,1\n").unwrap();

        assert_eq!(dataset.len(), 2);
        let first = dataset.get_sample(0);
        assert_eq!(first.label, Label::Negative);
        assert_eq!(
            first.features.as_slice(),
            &[1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.351, 31.0]
        );
        assert_eq!(dataset.get_sample(1).label, Label::Positive);
        assert_eq!(dataset.get_labels(), vec![Label::Negative, Label::Positive]);
    }

    #[test]
    fn test_columns_located_by_name() {
        let data = "Outcome,Age,Extra,DiabetesPedigreeFunction,BMI,Insulin,SkinThickness,BloodPressure,Glucose,Pregnancies\n\
                    1,50,x,0.627,33.6,0,35,72,148,6\n";
        let dataset = CSVDataset::from_reader(Cursor::new(data)).unwrap();

        let sample = dataset.get_sample(0);
        assert_eq!(sample.label, Label::Positive);
        assert_eq!(
            sample.features.as_slice(),
            &[6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0]
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dataset = load("\n1,85,66,29,0,26.6,0.351,31,0\n\n").unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let data = "Pregnancies,Glucose,Outcome\n1,85,0\n";
        let err = CSVDataset::from_reader(Cursor::new(data)).unwrap_err();
        match err {
            PipelineError::InvalidDataset(msg) => assert!(msg.contains("BloodPressure")),
            other => panic!("expected InvalidDataset, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_outcome_column() {
        let data = "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age\n1,2,3,4,5,6,7,8\n";
        let err = CSVDataset::from_reader(Cursor::new(data)).unwrap_err();
        assert!(err.to_string().contains("Outcome"));
    }

    #[test]
    fn test_invalid_cells() {
        assert!(matches!(
            load("1,abc,66,29,0,26.6,0.351,31,0\n"),
            Err(PipelineError::InvalidDataset(_))
        ));
        assert!(matches!(
            load("1,NaN,66,29,0,26.6,0.351,31,0\n"),
            Err(PipelineError::InvalidDataset(_))
        ));
        assert!(matches!(
            load("1,85,66,29,0,26.6,0.351,31,2\n"),
            Err(PipelineError::InvalidDataset(_))
        ));
        assert!(matches!(
            load("1,85,66,29,0,26.6,0.351,31\n"),
            Err(PipelineError::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_error_reports_line_number() {
        let err = load("1,85,66,29,0,26.6,0.351,31,0\n1,85,66,29,0,26.6,oops,31,0\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "{msg}");
        assert!(msg.contains("DiabetesPedigreeFunction"), "{msg}");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(
            CSVDataset::from_reader(Cursor::new("")),
            Err(PipelineError::InvalidDataset(_))
        ));
        assert!(matches!(
            load(""),
            Err(PipelineError::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = CSVDataset::from_file("definitely/not/here/diabetes.csv").unwrap_err();
        assert!(matches!(err, PipelineError::DatasetNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_unreadable_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = CSVDataset::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::DatasetNotFound { .. }));
    }

    #[test]
    fn test_non_utf8_file_is_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Outcome\n\xff\xfe\n").unwrap();
        let err = CSVDataset::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDataset(_)));
    }
}
