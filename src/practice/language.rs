use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Cpp,
    Java,
    C,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::Javascript,
        Language::Cpp,
        Language::Java,
        Language::C,
    ];

    /// Identifier used on the wire and in query strings.
    pub fn id(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::C => "c",
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Javascript => "JavaScript",
            Self::Cpp => "C++",
            Self::Java => "Java",
            Self::C => "C",
        }
    }
    pub fn extension(self) -> &'static str {
        match self {
            Self::Python => ".py",
            Self::Javascript => ".js",
            Self::Cpp => ".cpp",
            Self::Java => ".java",
            Self::C => ".c",
        }
    }
}
impl Default for Language {
    fn default() -> Self {
        Self::Python
    }
}
impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownLanguage(pub String);
impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown language \"{}\", expected one of python, javascript, cpp, java, c",
            self.0
        )
    }
}
impl StdError for UnknownLanguage {}
impl crate::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" => Ok(Self::Javascript),
            "cpp" | "c++" => Ok(Self::Cpp),
            "java" => Ok(Self::Java),
            "c" => Ok(Self::C),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("C++".parse::<Language>(), Ok(Language::Cpp));
        assert_eq!(" py ".parse::<Language>(), Ok(Language::Python));
        assert!("rust".parse::<Language>().is_err());
    }

    #[test]
    fn wire_name_matches_display() {
        for lang in Language::ALL.iter() {
            let json = serde_json::to_string(lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang));
        }
    }
}
