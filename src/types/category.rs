//! Category labels forwarded alongside uploads.

use std::fmt;
use std::str::FromStr;

use crate::errors::SubmitError;

/// A caller-supplied category label.
///
/// The label must not be empty and is forwarded exactly as given, including
/// labels outside [`Category::known`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// Regular document category.
    pub const REGULAR: &'static str = "regular";
    /// Non-drug document category.
    pub const NONDRUGS: &'static str = "nondrugs";
    /// Senior document category.
    pub const SENIOR: &'static str = "senior";

    /// Creates a category from a label.
    pub fn new(label: impl AsRef<str>) -> Result<Self, SubmitError> {
        let label = label.as_ref();
        if label.is_empty() {
            return Err(SubmitError::validation_param(
                "Category cannot be empty",
                "category",
            ));
        }
        Ok(Self(label.to_string()))
    }

    /// Categories the processing server is known to handle.
    pub fn known() -> [&'static str; 3] {
        [Self::REGULAR, Self::NONDRUGS, Self::SENIOR]
    }

    /// Returns true if this is one of the known categories.
    pub fn is_known(&self) -> bool {
        Self::known().contains(&self.0.as_str())
    }

    /// Returns the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Category {
    type Err = SubmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
