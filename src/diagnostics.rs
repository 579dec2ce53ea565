//! Diagnostics - degradation reports for unrecognized syntax
//!
//! Any builder that meets a syntax-node kind it has no handler for records a
//! diagnostic and substitutes a placeholder node; translation of the rest of
//! the unit continues. Diagnostics travel with the finished
//! [`crate::TranslationUnit`], so callers can tell a degraded success from a
//! fatal error.

use crate::location::Region;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The builder category that hit the unrecognized kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderCategory {
    Declaration,
    Statement,
    Expression,
    Type,
}

impl BuilderCategory {
    /// String form used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderCategory::Declaration => "declaration",
            BuilderCategory::Statement => "statement",
            BuilderCategory::Expression => "expression",
            BuilderCategory::Type => "type",
        }
    }
}

impl fmt::Display for BuilderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One degradation report: which builder, which kind tag, where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: BuilderCategory,
    /// The unhandled syntax-node kind tag
    pub kind: String,
    /// Verbatim source of the offending node
    pub code: Option<String>,
    pub region: Option<Region>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not handling {} of kind `{}`", self.category, self.kind)?;
        if let Some(region) = &self.region {
            write!(f, " at {}", region)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic {
            category: BuilderCategory::Statement,
            kind: "goto_statement".to_string(),
            code: None,
            region: None,
        };
        assert_eq!(
            diagnostic.to_string(),
            "not handling statement of kind `goto_statement`"
        );
    }
}
