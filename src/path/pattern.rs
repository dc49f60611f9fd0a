use regex::Regex;
use thiserror::Error;

/// A filename pattern failed to compile as a regular expression.
#[derive(Debug, Clone, Error)]
#[error("invalid filename pattern `{pattern}`")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl PatternError {
    /// The pattern, as it was given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Something that may hold a filename pattern.
///
/// Implemented for strings and for [`Option`]s of strings, so absent entries can be passed along
/// and get skipped.
pub trait MaybePattern {
    fn as_pattern(&self) -> Option<&str>;
}

impl MaybePattern for str {
    fn as_pattern(&self) -> Option<&str> {
        Some(self)
    }
}

impl MaybePattern for String {
    fn as_pattern(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: AsRef<str>> MaybePattern for Option<T> {
    fn as_pattern(&self) -> Option<&str> {
        self.as_ref().map(T::as_ref)
    }
}

impl<T: MaybePattern + ?Sized> MaybePattern for &T {
    fn as_pattern(&self) -> Option<&str> {
        (**self).as_pattern()
    }
}

/// A set of compiled filename patterns.
///
/// A filename matches when any pattern is found somewhere inside it. No patterns match nothing,
/// an empty pattern matches everything.
#[derive(Debug, Clone, Default)]
pub struct FilenameMatcher {
    patterns: Vec<Regex>,
}

impl FilenameMatcher {
    /// Compile `patterns`, skipping absent ones.
    ///
    /// # Returns
    /// [`Err(PatternError)`](PatternError) for the first pattern which isn't a valid regular
    /// expression.
    pub fn new<I>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator,
        I::Item: MaybePattern,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let Some(raw) = pattern.as_pattern() else {
                continue;
            };
            let regex = Regex::new(raw).map_err(|source| PatternError {
                pattern: raw.to_owned(),
                source,
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    /// Returns `true` if any pattern occurs in `filename`.
    pub fn is_match(&self, filename: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(filename))
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if there are no patterns, in which case nothing matches.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Check `filename` against one or more regular expressions.
///
/// A single pattern can be passed as `Some(pattern)` or `[pattern]`, and `None` stands for no
/// pattern at all.
///
/// # Examples
///
/// ```rust
/// # use pathkit::path::match_filename;
/// # fn main() -> Result<(), pathkit::path::PatternError> {
/// assert!(match_filename("docs/intro.md", ["\\.md$"])?);
/// assert!(!match_filename("docs/intro.md", None::<&str>)?);
/// assert!(match_filename("docs/intro.md", [None, Some("intro")])?);
/// # Ok(())
/// # }
/// ```
pub fn match_filename<I>(filename: &str, patterns: I) -> Result<bool, PatternError>
where
    I: IntoIterator,
    I::Item: MaybePattern,
{
    FilenameMatcher::new(patterns).map(|matcher| matcher.is_match(filename))
}
