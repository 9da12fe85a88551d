/// Delimited-text spectrum files — two numeric columns (wavelength,
/// reflectance), no header, delimited by comma, tab, or runs of whitespace.
/// Covers the `.dpt` exports of FT-IR instruments and plain CSV tables.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read file: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: expected two numeric columns, got `{content}`")]
    Malformed { line: usize, content: String },
    #[error("no data rows found")]
    Empty,
}

/// Read and parse one spectrum file.
pub fn load_spectrum_file(path: &Path) -> Result<(Vec<f64>, Vec<f64>), LoadError> {
    let text = fs::read_to_string(path)?;
    parse_spectrum(&text)
}

/// Parse delimited two-column text into aligned wavelength/reflectance
/// columns with the wavelength axis ascending.
///
/// Blank lines are skipped. Any other line must yield exactly two numeric
/// fields. Instruments commonly export the axis in descending order; the
/// result is sorted ascending so downstream binary search holds.
pub fn parse_spectrum(text: &str) -> Result<(Vec<f64>, Vec<f64>), LoadError> {
    let mut wavelengths: Vec<f64> = Vec::new();
    let mut reflectances: Vec<f64> = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = || LoadError::Malformed {
            line: number + 1,
            content: raw.trim().to_string(),
        };

        let mut fields = if line.contains(',') {
            // comma-delimited; tolerate spaces around the separator
            Fields::Comma(line.split(','))
        } else {
            Fields::Whitespace(line.split_whitespace())
        };
        let wavelength: f64 = fields
            .next()
            .and_then(|f| f.trim().parse().ok())
            .ok_or_else(|| malformed())?;
        let reflectance: f64 = fields
            .next()
            .and_then(|f| f.trim().parse().ok())
            .ok_or_else(|| malformed())?;
        if fields.next().is_some() {
            return Err(malformed());
        }
        if !wavelength.is_finite() || !reflectance.is_finite() {
            return Err(malformed());
        }

        wavelengths.push(wavelength);
        reflectances.push(reflectance);
    }

    if wavelengths.is_empty() {
        return Err(LoadError::Empty);
    }

    if !is_ascending(&wavelengths) {
        log::debug!("wavelength axis not ascending, sorting {} samples", wavelengths.len());
        let mut pairs: Vec<(f64, f64)> = wavelengths
            .into_iter()
            .zip(reflectances)
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        wavelengths = pairs.iter().map(|p| p.0).collect();
        reflectances = pairs.iter().map(|p| p.1).collect();
    }

    Ok((wavelengths, reflectances))
}

enum Fields<'a> {
    Comma(std::str::Split<'a, char>),
    Whitespace(std::str::SplitWhitespace<'a>),
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match self {
            Fields::Comma(it) => it.next(),
            Fields::Whitespace(it) => it.next(),
        }
    }
}

fn is_ascending(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_delimited() {
        let (w, r) = parse_spectrum("2.5,0.31\n2.6,0.33\n2.7,0.29\n").unwrap();
        assert_eq!(w, vec![2.5, 2.6, 2.7]);
        assert_eq!(r, vec![0.31, 0.33, 0.29]);
    }

    #[test]
    fn test_parse_tab_and_whitespace_delimited() {
        let (w, r) = parse_spectrum("2.5\t0.31\n2.6   0.33\n").unwrap();
        assert_eq!(w, vec![2.5, 2.6]);
        assert_eq!(r, vec![0.31, 0.33]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let (w, _) = parse_spectrum("\n2.5, 0.31\n\n2.6, 0.33\n\n").unwrap();
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn test_descending_axis_is_sorted_ascending() {
        let (w, r) = parse_spectrum("14.0,0.1\n3.0,0.3\n2.5,0.2\n").unwrap();
        assert_eq!(w, vec![2.5, 3.0, 14.0]);
        assert_eq!(r, vec![0.2, 0.3, 0.1]);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse_spectrum("2.5,0.31\nnot-a-number,0.2\n").unwrap_err();
        match err {
            LoadError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_three_columns_rejected() {
        let err = parse_spectrum("2.5,0.31,0.9\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_single_column_rejected() {
        let err = parse_spectrum("2.5\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(parse_spectrum(""), Err(LoadError::Empty)));
        assert!(matches!(parse_spectrum("\n  \n"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(matches!(
            parse_spectrum("2.5,NaN\n"),
            Err(LoadError::Malformed { line: 1, .. })
        ));
        assert!(matches!(
            parse_spectrum("inf,0.3\n"),
            Err(LoadError::Malformed { line: 1, .. })
        ));
    }
}
