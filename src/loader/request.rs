use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScatterError, ScatterResult};

/// Server-side score weights, in path order: word length, total count,
/// page density and book count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub length: i32,
    pub count: i32,
    pub pages: i32,
    pub books: i32,
}

impl Weights {
    #[must_use]
    pub const fn new(length: i32, count: i32, pages: i32, books: i32) -> Self {
        Self {
            length,
            count,
            pages,
            books,
        }
    }
}

impl FromStr for Weights {
    type Err = ScatterError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let components = input
            .split('/')
            .map(|part| {
                part.trim().parse::<i32>().map_err(|err| {
                    ScatterError::InvalidConfig(format!("invalid weight `{part}`: {err}"))
                })
            })
            .collect::<ScatterResult<Vec<i32>>>()?;

        match components.as_slice() {
            [length, count, pages, books] => Ok(Self::new(*length, *count, *pages, *books)),
            _ => Err(ScatterError::InvalidConfig(format!(
                "weights must have exactly 4 slash-delimited components, got {}",
                components.len()
            ))),
        }
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.length, self.count, self.pages, self.books
        )
    }
}

pub fn validate_year(year: &str) -> ScatterResult<()> {
    if year.len() == 4 && year.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ScatterError::InvalidConfig(format!(
            "year must be four digits, got `{year}`"
        )))
    }
}

/// Parameters of the one-off reweight call that precedes chunk loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReweightRequest {
    year: String,
    weights: Weights,
}

impl ReweightRequest {
    pub fn new(year: &str, weights: Weights) -> ScatterResult<Self> {
        validate_year(year)?;
        Ok(Self {
            year: year.to_owned(),
            weights,
        })
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Path relative to the service root: `data/reweight/{year}/{weights}`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("data/reweight/{}/{}", self.year, self.weights)
    }
}

/// One page `[offset, offset + count)` of the served record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkWindow {
    pub offset: usize,
    pub count: usize,
}

impl ChunkWindow {
    /// Path relative to the service root: `data/{offset}/{count}`.
    #[must_use]
    pub fn path(self) -> String {
        format!("data/{}/{}", self.offset, self.count)
    }

    #[must_use]
    pub fn end(self) -> usize {
        self.offset + self.count
    }
}

/// Splits `[start, start + total)` into consecutive windows of `chunk_size`.
///
/// The last window is shortened so no window reaches past the total.
pub fn chunk_windows(
    start: usize,
    total: usize,
    chunk_size: usize,
) -> ScatterResult<Vec<ChunkWindow>> {
    if chunk_size == 0 {
        return Err(ScatterError::InvalidConfig(
            "chunk size must be > 0".to_owned(),
        ));
    }
    let end = start.checked_add(total).ok_or_else(|| {
        ScatterError::InvalidConfig("window start + count overflows".to_owned())
    })?;

    Ok((start..end)
        .step_by(chunk_size)
        .map(|offset| ChunkWindow {
            offset,
            count: chunk_size.min(end - offset),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_round_trip_through_path_form() {
        let weights: Weights = "0/1/-1/-4".parse().expect("weights");
        assert_eq!(weights, Weights::new(0, 1, -1, -4));
        assert_eq!(weights.to_string(), "0/1/-1/-4");
    }

    #[test]
    fn weights_reject_wrong_arity_and_non_integers() {
        assert!("0/1/-1".parse::<Weights>().is_err());
        assert!("0/1/-1/-4/2".parse::<Weights>().is_err());
        assert!("0/1/x/-4".parse::<Weights>().is_err());
        assert!("".parse::<Weights>().is_err());
    }

    #[test]
    fn year_must_be_four_digits() {
        assert!(validate_year("2008").is_ok());
        assert!(validate_year("208").is_err());
        assert!(validate_year("20o8").is_err());
    }
}
