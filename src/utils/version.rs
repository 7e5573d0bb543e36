use std::fmt;
use std::str::FromStr;

use crate::models::CatalogError;

/// Pre-release tag such as `b12` or `rc1`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PreRelease {
    tag: String,
    number: Option<u32>,
}

/// A browser version string like `4.0b12pre` or `3.6.13`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    numbers: Vec<u32>,
    pre_release: Option<PreRelease>,
    nightly: bool,
}

impl Version {
    /// Drops the `pre` marker and trailing `.0` components past `MAJOR.MINOR`.
    pub fn simplified(&self) -> String {
        let mut numbers = self.numbers.as_slice();
        while numbers.len() > 2 && numbers.last() == Some(&0) {
            numbers = &numbers[..numbers.len() - 1];
        }

        let mut out = join_numbers(numbers);
        if let Some(pre) = &self.pre_release {
            push_pre_release(&mut out, pre);
        }
        out
    }
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

fn push_pre_release(out: &mut String, pre: &PreRelease) {
    out.push_str(&pre.tag);
    if let Some(n) = pre.number {
        out.push_str(&n.to_string());
    }
}

impl FromStr for Version {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidVersion(s.to_string());

        let trimmed = s.trim();
        let (rest, nightly) = match trimmed.strip_suffix("pre") {
            Some(stripped) => (stripped, true),
            None => (trimmed, false),
        };

        let split = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (numeric, suffix) = rest.split_at(split);

        let numbers = numeric
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        if !(2..=4).contains(&numbers.len()) {
            return Err(invalid());
        }

        let pre_release = if suffix.is_empty() {
            None
        } else {
            let digits_at = suffix
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(suffix.len());
            let (tag, digits) = suffix.split_at(digits_at);
            if !matches!(tag, "a" | "b" | "rc") {
                return Err(invalid());
            }
            let number = if digits.is_empty() {
                None
            } else {
                Some(digits.parse::<u32>().map_err(|_| invalid())?)
            };
            Some(PreRelease {
                tag: tag.to_string(),
                number,
            })
        };

        Ok(Version {
            numbers,
            pre_release,
            nightly,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = join_numbers(&self.numbers);
        if let Some(pre) = &self.pre_release {
            push_pre_release(&mut out, pre);
        }
        if self.nightly {
            out.push_str("pre");
        }
        f.write_str(&out)
    }
}

/// Parses `version` and returns its simplified form.
pub fn simplify(version: &str) -> Result<String, CatalogError> {
    Ok(version.parse::<Version>()?.simplified())
}
