//! Text KeyValues (VDF) parser.
//!
//! Steam stores library locations in `libraryfolders.vdf` and per-app
//! install data in `appmanifest_<id>.acf`, both in the text KeyValues
//! format:
//!
//! ```text
//! "AppState"
//! {
//!     "appid"      "1574820"
//!     "installdir" "Until Then"
//! }
//! ```
//!
//! Key lookups are case-insensitive; Steam is not consistent about casing
//! (`LibraryFolders` vs `libraryfolders`).

use std::fs;
use std::path::Path;

use super::GameError;

/// A parsed KeyValues node.
#[derive(Debug, Clone, PartialEq)]
pub enum VdfValue {
    Str(String),
    Map(Vec<(String, VdfValue)>),
}

impl VdfValue {
    /// Look up a child by key.
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        match self {
            Self::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v),
            Self::Str(_) => None,
        }
    }

    /// Follow a path of keys.
    pub fn get_path(&self, keys: &[&str]) -> Option<&VdfValue> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Map(_) => None,
        }
    }

    pub fn entries(&self) -> &[(String, VdfValue)] {
        match self {
            Self::Map(entries) => entries,
            Self::Str(_) => &[],
        }
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Text(String),
    Open,
    Close,
}

/// Parse KeyValues text into a root map.
pub fn parse(input: &str) -> Result<VdfValue, String> {
    let tokens = tokenize(input)?;
    let mut iter = tokens.into_iter().peekable();
    let root = parse_entries(&mut iter, false)?;
    Ok(VdfValue::Map(root))
}

/// Read and parse a KeyValues file.
pub fn parse_file(path: &Path) -> Result<VdfValue, GameError> {
    let raw = fs::read_to_string(path).map_err(|e| GameError::Vdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse(&raw).map_err(|message| GameError::Vdf {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_entries<I>(
    tokens: &mut std::iter::Peekable<I>,
    nested: bool,
) -> Result<Vec<(String, VdfValue)>, String>
where
    I: Iterator<Item = Token>,
{
    let mut entries = Vec::new();

    loop {
        let key = match tokens.next() {
            Some(Token::Text(key)) => key,
            Some(Token::Close) if nested => return Ok(entries),
            Some(Token::Close) => return Err("unexpected '}'".to_string()),
            Some(Token::Open) => return Err("expected key, found '{'".to_string()),
            None if nested => return Err("unterminated block".to_string()),
            None => return Ok(entries),
        };

        let value = match tokens.next() {
            Some(Token::Text(value)) => VdfValue::Str(value),
            Some(Token::Open) => VdfValue::Map(parse_entries(tokens, true)?),
            Some(Token::Close) | None => return Err(format!("missing value for key '{key}'")),
        };

        // Platform conditionals like [$WIN32] trail the value; they carry no data we use.
        if let Some(Token::Text(t)) = tokens.peek() {
            if t.starts_with("[$") || t.starts_with("[!$") {
                tokens.next();
            }
        }

        entries.push((key, value));
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '{' => {
                chars.next();
                tokens.push(Token::Open);
            }
            '}' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '/' => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    for c in chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                } else {
                    return Err("stray '/'".to_string());
                }
            }
            '"' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('n') => text.push('\n'),
                            Some('t') => text.push('\t'),
                            Some(other) => text.push(other),
                            None => return Err("unterminated string".to_string()),
                        },
                        Some(other) => text.push(other),
                        None => return Err("unterminated string".to_string()),
                    }
                }
                tokens.push(Token::Text(text));
            }
            _ => {
                let mut text = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '{' || c == '}' || c == '"' {
                        break;
                    }
                    text.push(c);
                    chars.next();
                }
                tokens.push(Token::Text(text));
            }
        }
    }

    Ok(tokens)
}
