use std::fmt::Display;

use crate::error::MockError;

/// One argument that did not satisfy its expectation.
#[derive(Clone, Debug)]
pub struct Mismatch {
    pub kind: MismatchKind,
    pub expected: String,
    pub actual: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MismatchKind {
    /// An exact value expectation.
    Eq,
    /// A type wildcard expectation.
    Wildcard,
}

/// The panic message of a failed verification: the error, followed by
/// a diff for exact value mismatches.
pub(crate) struct Report<'e>(pub &'e MockError);

impl<'e> Display for Report<'e> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;

        if let MockError::ArgumentMismatch {
            call,
            index,
            mismatch,
            ..
        } = self.0
        {
            match mismatch.kind {
                MismatchKind::Eq => {
                    writeln!(f)?;
                    writeln!(
                        f,
                        "Equality mismatch for call #{call}, input #{index} (actual / expected):"
                    )?;
                    Diff::new(&mismatch.actual, &mismatch.expected).fmt(f)?;
                }
                MismatchKind::Wildcard => {
                    writeln!(f)?;
                    write!(
                        f,
                        "Type mismatch for call #{call}, input #{index}: value is not assignable to the wildcard type."
                    )?;
                }
            }
        }

        Ok(())
    }
}

struct Diff<'s> {
    actual: &'s str,
    expected: &'s str,
}

impl<'s> Diff<'s> {
    fn new(actual: &'s impl AsRef<str>, expected: &'s impl AsRef<str>) -> Self {
        Self {
            actual: actual.as_ref(),
            expected: expected.as_ref(),
        }
    }
}

impl<'s> Display for Diff<'s> {
    #[cfg(feature = "pretty-print")]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let comparison = pretty_assertions::StrComparison::new(self.actual, self.expected);
        write!(f, "{comparison}")
    }

    #[cfg(not(feature = "pretty-print"))]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  actual: {}", self.actual)?;
        write!(f, "expected: {}", self.expected)?;
        Ok(())
    }
}
