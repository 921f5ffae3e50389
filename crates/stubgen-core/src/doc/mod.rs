//! Documentation mini-language
//!
//! Reflected documentation may carry reStructuredText field lines:
//!
//! - `:type <name>: <type>[, optional]` declares a parameter type
//! - `:rtype: <type>` declares the return type
//! - `:return: <text>` describes the returned value
//!
//! [`DocComment::parse`] collects these annotations and produces the cleaned
//! text that is emitted as the stub docstring.

use std::sync::OnceLock;

use regex::Regex;

const OPTIONAL_SUFFIX: &str = ", optional";

/// Field-line prefixes removed from the emitted docstring
const FIELD_PREFIXES: [&str; 3] = [":type", ":rtype", ":return"];

/// A parameter type declared with `:type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamType {
    /// Parameter name
    pub name: String,
    /// Type string with any `, optional` suffix removed
    pub type_str: String,
    /// Whether the parameter was documented as optional
    pub optional: bool,
}

/// Parsed documentation of a single member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Documentation text without field lines, `None` if nothing is left
    pub text: Option<String>,
    /// `:type` declarations in order
    pub params: Vec<ParamType>,
    /// Every `:rtype:` value in order
    pub rtypes: Vec<String>,
    /// Every `:return:` text in order
    pub returns: Vec<String>,
}

impl DocComment {
    /// Parse a documentation string
    #[must_use]
    pub fn parse(doc: &str) -> Self {
        let params = type_line()
            .captures_iter(doc)
            .map(|caps| {
                let declared = caps[2].trim_end();
                let (type_str, optional) = match declared.strip_suffix(OPTIONAL_SUFFIX) {
                    Some(stripped) => (stripped, true),
                    None => (declared, false),
                };
                ParamType {
                    name: caps[1].to_string(),
                    type_str: type_str.trim().to_string(),
                    optional,
                }
            })
            .collect();

        let field = |re: &Regex| -> Vec<String> {
            re.captures_iter(doc)
                .map(|caps| caps[1].trim().to_string())
                .collect()
        };

        Self {
            text: clean_text(doc),
            params,
            rtypes: field(rtype_line()),
            returns: field(return_line()),
        }
    }
}

/// Strip field lines and surrounding whitespace from a documentation string
#[must_use]
pub fn clean_text(doc: &str) -> Option<String> {
    let lines: Vec<&str> = doc
        .lines()
        .map(str::trim)
        .filter(|line| !FIELD_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
        .collect();
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn type_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^ *:type *([a-zA-Z0-9_]+): ([^\n]*) *$").expect("static pattern")
    })
}

fn rtype_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^ *:rtype: *([^\n]*) *$").expect("static pattern"))
}

fn return_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^ *:return: *(.*) *$").expect("static pattern"))
}
