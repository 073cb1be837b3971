//! Rider pool file parsing.
//!
//! One rider per line, comma separated, no header. Games with categories use
//! `name,team,class,score,cost`; the others use `name,team,score,cost`.

use camino::Utf8Path;
use thiserror::Error;
use velogames_core::{Candidate, Category, CategoryParseError};

use crate::CliError;
use crate::fs::read_utf8_to_string;

const CLASSIFIED_FIELDS: usize = 5;
const UNCLASSIFIED_FIELDS: usize = 4;

/// Errors raised while decoding a rider file.
#[derive(Debug, Error)]
pub enum RiderFileError {
    /// A line has the wrong number of fields.
    #[error("line {line}: expected {expected} comma-separated fields, found {found}")]
    FieldCount {
        /// One-based line number.
        line: usize,
        /// Fields required by the game type.
        expected: usize,
        /// Fields present on the line.
        found: usize,
    },
    /// A score or cost is not a non-negative integer.
    #[error("line {line}: {field} '{value}' is not a non-negative integer")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Column name.
        field: &'static str,
        /// Offending text.
        value: String,
    },
    /// A class label does not name a rider category.
    #[error("line {line}: {source}")]
    InvalidCategory {
        /// One-based line number.
        line: usize,
        /// Parse failure.
        #[source]
        source: CategoryParseError,
    },
}

/// Decode rider lines; blank lines are skipped.
pub(crate) fn parse_riders(
    contents: &str,
    classified: bool,
) -> Result<Vec<Candidate>, RiderFileError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| parse_line(idx + 1, text, classified))
        .collect()
}

fn parse_line(line: usize, text: &str, classified: bool) -> Result<Candidate, RiderFileError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let expected = if classified {
        CLASSIFIED_FIELDS
    } else {
        UNCLASSIFIED_FIELDS
    };
    let (name, team, class, score, cost) = match (classified, fields.as_slice()) {
        (true, [name, team, class, score, cost]) => (*name, *team, Some(*class), *score, *cost),
        (false, [name, team, score, cost]) => (*name, *team, None, *score, *cost),
        _ => {
            return Err(RiderFileError::FieldCount {
                line,
                expected,
                found: fields.len(),
            });
        }
    };

    let candidate = Candidate::new(
        name,
        team,
        parse_number(line, "score", score)?,
        parse_number(line, "cost", cost)?,
    );
    match class {
        Some(label) => {
            let category: Category = label
                .parse()
                .map_err(|source| RiderFileError::InvalidCategory { line, source })?;
            Ok(candidate.with_category(category))
        }
        None => Ok(candidate),
    }
}

fn parse_number(line: usize, field: &'static str, value: &str) -> Result<u32, RiderFileError> {
    value.parse().map_err(|_| RiderFileError::InvalidNumber {
        line,
        field,
        value: value.to_owned(),
    })
}

/// Load the rider file at `path`.
pub(crate) fn load_riders(path: &Utf8Path, classified: bool) -> Result<Vec<Candidate>, CliError> {
    let contents = read_utf8_to_string(path).map_err(|source| CliError::ReadRiders {
        path: path.to_path_buf(),
        source,
    })?;
    let riders = parse_riders(&contents, classified).map_err(|source| CliError::ParseRiders {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} riders from {path}", riders.len());
    Ok(riders)
}
