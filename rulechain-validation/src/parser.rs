// Rule-chain parsing

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separates directives within a chain.
pub const DIRECTIVE_SEPARATOR: char = '|';

/// Separates a rule name from its parameter blob.
pub const PARAMS_SEPARATOR: char = ':';

/// Separates parameters inside the blob.
pub const PARAM_SEPARATOR: char = ',';

/// A single parsed rule invocation, e.g. `between:3,5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDirective {
    name: String,
    params: Vec<String>,
}

impl RuleDirective {
    /// Create a directive from its name and parameters
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse one `name[:p1,p2,...]` segment.
    ///
    /// Only the first colon splits the name from its blob. A trailing colon
    /// with nothing after it keeps a single empty parameter so the segment
    /// serializes back unchanged.
    pub fn parse(segment: &str) -> Self {
        match segment.split_once(PARAMS_SEPARATOR) {
            Some((name, blob)) => Self {
                name: name.to_string(),
                params: blob.split(PARAM_SEPARATOR).map(str::to_string).collect(),
            },
            None => Self {
                name: segment.to_string(),
                params: Vec::new(),
            },
        }
    }

    /// Rule name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional parameters
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Parameter at `index`, if present
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

impl fmt::Display for RuleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            write!(f, "{}{}", PARAMS_SEPARATOR, self.params.join(","))?;
        }
        Ok(())
    }
}

/// The ordered directives of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleChain {
    directives: Vec<RuleDirective>,
}

impl RuleChain {
    /// Tokenize a rule-chain encoding. Never fails; an empty encoding gives
    /// an empty chain.
    pub fn parse(encoding: &str) -> Self {
        if encoding.is_empty() {
            return Self::default();
        }

        Self {
            directives: encoding
                .split(DIRECTIVE_SEPARATOR)
                .map(RuleDirective::parse)
                .collect(),
        }
    }

    pub fn directives(&self) -> &[RuleDirective] {
        &self.directives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleDirective> {
        self.directives.iter()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Whether any directive carries this rule name
    pub fn contains(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name == name)
    }
}

impl FromStr for RuleChain {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<Vec<RuleDirective>> for RuleChain {
    fn from(directives: Vec<RuleDirective>) -> Self {
        Self { directives }
    }
}

impl<'a> IntoIterator for &'a RuleChain {
    type Item = &'a RuleDirective;
    type IntoIter = std::slice::Iter<'a, RuleDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

impl fmt::Display for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DIRECTIVE_SEPARATOR)?;
            }
            write!(f, "{}", directive)?;
        }
        Ok(())
    }
}
