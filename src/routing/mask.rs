//! Route mask compilation and matching.
//!
//! # Responsibilities
//! - Parse route masks such as `<presenter>/<action>[/<id \d+>]`
//! - Compile them once into an anchored regex
//! - Extract named, percent-decoded parameter values from a request path
//!
//! # Mask Syntax
//! - Literal text matches itself (case-sensitive)
//! - `<name>` captures one path segment
//! - `<name=value>` declares a default for the parameter
//! - `<name pattern>` restricts the value with a custom regex
//! - `[...]` marks an optional, nestable section
//! - Trailing `/<name>` segments may be left out of the URL; the route then
//!   needs a default for them
//!
//! # Design Decisions
//! - Leading `/` is ignored on both the mask and the path
//! - Regex size is capped to keep hostile masks from exhausting memory
//! - Parameters are captured through generated group names so custom
//!   patterns may contain their own groups
//! - Values are decoded after matching, so `%2F` never splits a segment

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Maximum accepted mask length in bytes.
pub const MAX_MASK_LENGTH: usize = 1024;

const MAX_REGEX_SIZE: usize = 1 << 20;

const DEFAULT_PATTERN: &str = "[^/]+";

/// Errors produced while compiling a mask.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("Mask length {len} exceeds maximum of {max} bytes")]
    TooLong { len: usize, max: usize },

    #[error("Unbalanced optional section in mask '{mask}'")]
    Unbalanced { mask: String },

    #[error("Unterminated parameter in mask '{mask}'")]
    UnterminatedParameter { mask: String },

    #[error("Empty parameter name in mask '{mask}'")]
    EmptyParameterName { mask: String },

    #[error("Invalid mask pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// A parameter declared by a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskParam {
    pub name: String,
    pub default: Option<String>,

    /// Outside any `[...]` section: a match must capture it or default it.
    pub required: bool,
}

/// A mask compiled into an anchored regex.
#[derive(Debug, Clone)]
pub struct CompiledMask {
    mask: String,
    regex: Regex,
    params: Vec<MaskParam>,
}

impl CompiledMask {
    /// Compile a mask string.
    pub fn new(mask: &str) -> Result<Self, MaskError> {
        if mask.len() > MAX_MASK_LENGTH {
            return Err(MaskError::TooLong {
                len: mask.len(),
                max: MAX_MASK_LENGTH,
            });
        }

        let (source, params) = compile(mask)?;
        let regex = RegexBuilder::new(&source)
            .size_limit(MAX_REGEX_SIZE)
            .build()?;

        Ok(Self {
            mask: mask.to_string(),
            regex,
            params,
        })
    }

    /// The mask as written.
    pub fn as_str(&self) -> &str {
        &self.mask
    }

    pub fn params(&self) -> &[MaskParam] {
        &self.params
    }

    /// Match a request path, returning the non-empty captured values.
    ///
    /// Required parameters left out of a shortened URL are simply absent;
    /// callers decide whether a default covers them.
    pub fn captures(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let caps = self.regex.captures(path)?;

        let values = self
            .params
            .iter()
            .enumerate()
            .filter_map(|(i, param)| {
                caps.name(&group_name(i))
                    .map(|m| m.as_str())
                    .filter(|v| !v.is_empty())
                    .map(|v| {
                        let value = percent_decode_str(v).decode_utf8_lossy().into_owned();
                        (param.name.clone(), value)
                    })
            })
            .collect();
        Some(values)
    }
}

fn group_name(index: usize) -> String {
    format!("p{}", index)
}

/// Top-level building block of a mask.
enum Piece {
    Literal(String),
    Param { index: usize, pattern: String },
    Optional(String),
}

fn render(pieces: &[Piece]) -> String {
    pieces
        .iter()
        .map(|piece| match piece {
            Piece::Literal(text) => regex::escape(text),
            Piece::Param { index, pattern } => format!("(?P<{}>{})", group_name(*index), pattern),
            Piece::Optional(source) => source.clone(),
        })
        .collect()
}

fn compile(mask: &str) -> Result<(String, Vec<MaskParam>), MaskError> {
    let body = mask.strip_prefix('/').unwrap_or(mask);
    let mut params = Vec::new();
    // One piece list per open `[` section, the mask itself at the bottom.
    let mut sections: Vec<Vec<Piece>> = vec![Vec::new()];
    let mut literal = String::new();
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if !matches!(c, '<' | '[' | ']') {
            literal.push(c);
            continue;
        }

        let current = sections.len() - 1;
        if !literal.is_empty() {
            sections[current].push(Piece::Literal(std::mem::take(&mut literal)));
        }

        match c {
            '<' => {
                let mut declaration = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '>' {
                        closed = true;
                        break;
                    }
                    declaration.push(next);
                }
                if !closed {
                    return Err(MaskError::UnterminatedParameter {
                        mask: mask.to_string(),
                    });
                }

                let (name, default, pattern) =
                    parse_parameter(&declaration).ok_or_else(|| MaskError::EmptyParameterName {
                        mask: mask.to_string(),
                    })?;
                sections[current].push(Piece::Param {
                    index: params.len(),
                    pattern,
                });
                params.push(MaskParam {
                    name,
                    default,
                    required: current == 0,
                });
            }
            '[' => sections.push(Vec::new()),
            _ => {
                if current == 0 {
                    return Err(MaskError::Unbalanced {
                        mask: mask.to_string(),
                    });
                }
                let inner = sections.pop().unwrap_or_default();
                sections[current - 1].push(Piece::Optional(format!("(?:{})?", render(&inner))));
            }
        }
    }

    if sections.len() != 1 {
        return Err(MaskError::Unbalanced {
            mask: mask.to_string(),
        });
    }
    let mut pieces = sections.pop().unwrap_or_default();
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }

    let suffix = fold_trailing_params(&mut pieces);
    Ok((format!("^{}{}$", render(&pieces), suffix), params))
}

/// Turn the trailing `/<param>` run of the mask into nested optional groups.
///
/// Removes the folded pieces and returns their regex. Folding stops at the
/// first parameter not preceded by `/` or by the start of the mask.
fn fold_trailing_params(pieces: &mut Vec<Piece>) -> String {
    let mut suffix = String::new();
    let mut end = pieces.len();

    loop {
        let mut start = end;
        while start > 0 && matches!(pieces[start - 1], Piece::Optional(_)) {
            start -= 1;
        }
        if start == 0 || !matches!(pieces[start - 1], Piece::Param { .. }) {
            break;
        }

        let param = start - 1;
        let slash = if param == 0 {
            ""
        } else {
            match &mut pieces[param - 1] {
                Piece::Literal(text) if text.ends_with('/') => {
                    text.pop();
                    "/"
                }
                _ => break,
            }
        };

        suffix = format!("(?:{}{}{})?", slash, render(&pieces[param..end]), suffix);
        pieces.truncate(param);
        if matches!(pieces.last(), Some(Piece::Literal(text)) if text.is_empty()) {
            pieces.pop();
        }
        end = pieces.len();
    }

    suffix
}

/// Split `name[=default][ pattern]` into name, default and value pattern.
fn parse_parameter(declaration: &str) -> Option<(String, Option<String>, String)> {
    let declaration = declaration.trim();
    let (head, pattern) = match declaration.split_once(char::is_whitespace) {
        Some((head, pattern)) => (head, pattern.trim()),
        None => (declaration, ""),
    };

    let (name, default) = match head.split_once('=') {
        Some((name, default)) => (name, Some(default.to_string())),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }

    let pattern = if pattern.is_empty() {
        DEFAULT_PATTERN.to_string()
    } else {
        format!("(?:{})", pattern)
    };

    Some((name.to_string(), default, pattern))
}
