//! Command-line literals to tokens
//!
//! Literals are read against the type they will be encoded as:
//!
//! | type | literal |
//! |---|---|
//! | `uintN` | decimal or `0x` hex |
//! | `intN` | as `uintN`, optionally prefixed with `-` |
//! | `bool` | `true` / `false` |
//! | `address` | 40 hex digits, `0x` optional |
//! | `bytes`, `bytesN` | hex, `0x` optional |
//! | `string` | raw text, or `"quoted"` to include commas or brackets |
//! | `T[]`, `T[N]` | `[a,b,...]` |
//! | tuple | `(a,b,...)` |

use evmabi::{parse_type, Address, ParamType, Token, I256, U256};

use crate::CliError;

/// Parse `literal` as a value of type `ty`
pub fn tokenize(ty: &ParamType, literal: &str) -> Result<Token, CliError> {
    let literal = literal.trim();
    match ty {
        ParamType::Address => Address::from_hex(literal)
            .map(Token::Address)
            .map_err(|e| CliError::InvalidInput(format!("{}: {}", literal, e))),
        ParamType::Uint(_) => parse_unsigned(literal).map(Token::Uint),
        ParamType::Int(_) => {
            let (negative, magnitude) = match literal.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, literal),
            };
            Ok(Token::Int(I256::new(parse_unsigned(magnitude)?, negative)))
        }
        ParamType::Bool => match literal {
            "true" => Ok(Token::Bool(true)),
            "false" => Ok(Token::Bool(false)),
            _ => Err(CliError::InvalidInput(format!("{} is not a bool", literal))),
        },
        ParamType::Bytes => parse_hex(literal).map(Token::Bytes),
        ParamType::FixedBytes(_) => parse_hex(literal).map(Token::FixedBytes),
        ParamType::String => Ok(Token::String(unquote(literal).to_string())),
        ParamType::Array(inner) => {
            let items = list_items(literal, '[', ']')?;
            items
                .iter()
                .map(|item| tokenize(inner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Token::Array)
        }
        ParamType::FixedArray(inner, _) => {
            let items = list_items(literal, '[', ']')?;
            items
                .iter()
                .map(|item| tokenize(inner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Token::FixedArray)
        }
        ParamType::Tuple(types) => {
            let items = list_items(literal, '(', ')')?;
            if items.len() != types.len() {
                return Err(CliError::InvalidInput(format!(
                    "{} has {} fields, expected {}",
                    literal,
                    items.len(),
                    types.len()
                )));
            }
            types
                .iter()
                .zip(&items)
                .map(|(ty, item)| tokenize(ty, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Token::Tuple)
        }
    }
}

/// Parse a type list: `uint256,bool` or `(uint256,bool)`
///
/// Outer parentheses are taken as list delimiters, so a lone tuple type
/// needs a second pair: `((uint256,bool))`.
pub fn parse_type_list(s: &str) -> Result<Vec<ParamType>, CliError> {
    let s = s.trim();
    let inner = enclosed(s, '(', ')').unwrap_or(s);
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(inner)?
        .into_iter()
        .map(|ty| parse_type(ty).map_err(CliError::from))
        .collect()
}

fn parse_unsigned(literal: &str) -> Result<U256, CliError> {
    let invalid = || CliError::InvalidInput(format!("{} is not a number", literal));
    match literal.strip_prefix("0x").or_else(|| literal.strip_prefix("0X")) {
        Some("") => Err(invalid()),
        Some(digits) => U256::from_str_radix(digits, 16).map_err(|_| invalid()),
        None if !literal.is_empty() && literal.bytes().all(|b| b.is_ascii_digit()) => {
            U256::from_dec_str(literal).map_err(|_| invalid())
        }
        None => Err(invalid()),
    }
}

fn parse_hex(literal: &str) -> Result<Vec<u8>, CliError> {
    let digits = literal.strip_prefix("0x").unwrap_or(literal);
    hex::decode(digits).map_err(|e| CliError::InvalidHex(format!("{}: {}", literal, e)))
}

fn unquote(literal: &str) -> &str {
    literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal)
}

/// Contents of `s` when its first character opens a bracket closed by its
/// last character
fn enclosed(s: &str, open: char, close: char) -> Option<&str> {
    let inner = s.strip_prefix(open)?.strip_suffix(close)?;
    let mut depth = 0usize;
    let mut quoted = false;
    for c in inner.chars() {
        match c {
            '"' => quoted = !quoted,
            '[' | '(' if !quoted => depth += 1,
            ']' | ')' if !quoted => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

fn list_items(literal: &str, open: char, close: char) -> Result<Vec<&str>, CliError> {
    let inner = enclosed(literal, open, close).ok_or_else(|| {
        CliError::InvalidInput(format!("expected {}...{}, got {}", open, close, literal))
    })?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(inner)
}

/// Split on commas outside brackets and quotes
fn split_top_level(s: &str) -> Result<Vec<&str>, CliError> {
    let unbalanced = || CliError::InvalidInput(format!("unbalanced brackets or quotes in {}", s));
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '[' | '(' if !quoted => depth += 1,
            ']' | ')' if !quoted => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            ',' if !quoted && depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 || quoted {
        return Err(unbalanced());
    }
    parts.push(s[start..].trim());
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(s: &str) -> ParamType {
        parse_type(s).unwrap()
    }

    #[test]
    fn test_tokenize_integers() {
        assert_eq!(tokenize(&ty("uint256"), "42").unwrap(), Token::uint(42));
        assert_eq!(tokenize(&ty("uint256"), "0x2a").unwrap(), Token::uint(42));
        assert_eq!(tokenize(&ty("int8"), "-128").unwrap(), Token::int(-128));
        assert_eq!(tokenize(&ty("int256"), "-0x10").unwrap(), Token::int(-16));
        assert!(tokenize(&ty("uint8"), "-1").is_err());
        assert!(tokenize(&ty("uint8"), "0x").is_err());
        assert!(tokenize(&ty("uint8"), "1e3").is_err());
    }

    #[test]
    fn test_tokenize_scalars() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d";
        assert_eq!(
            tokenize(&ty("address"), addr).unwrap(),
            Token::Address(Address::from_hex(addr).unwrap())
        );
        assert_eq!(tokenize(&ty("bool"), "true").unwrap(), Token::Bool(true));
        assert!(tokenize(&ty("bool"), "yes").is_err());
        assert_eq!(tokenize(&ty("bytes"), "0xdead").unwrap(), Token::Bytes(vec![0xde, 0xad]));
        assert_eq!(tokenize(&ty("bytes2"), "beef").unwrap(), Token::FixedBytes(vec![0xbe, 0xef]));
        assert!(matches!(tokenize(&ty("bytes"), "0xzz"), Err(CliError::InvalidHex(_))));
        assert_eq!(tokenize(&ty("string"), "hello world").unwrap(), Token::string("hello world"));
    }

    #[test]
    fn test_tokenize_nested() {
        let token = tokenize(&ty("(string,uint8[])[]"), r#"[("a,b",[1,2]),("c",[])]"#).unwrap();
        assert_eq!(
            token,
            Token::Array(vec![
                Token::Tuple(vec![
                    Token::string("a,b"),
                    Token::Array(vec![Token::uint(1), Token::uint(2)]),
                ]),
                Token::Tuple(vec![Token::string("c"), Token::Array(vec![])]),
            ])
        );
    }

    #[test]
    fn test_tokenize_shape_errors() {
        assert!(tokenize(&ty("uint8[]"), "1,2").is_err());
        assert!(tokenize(&ty("uint8[2]"), "[1,2").is_err());
        assert!(tokenize(&ty("(uint8,bool)"), "(1)").is_err());
        // the outer pair must match each other, not just the ends
        assert!(tokenize(&ty("(uint8,uint8)"), "(1)(2)").is_err());
    }

    #[test]
    fn test_parse_type_list() {
        let expected = vec![ParamType::Uint(256), ParamType::Bool];
        assert_eq!(parse_type_list("uint256,bool").unwrap(), expected);
        assert_eq!(parse_type_list("(uint256, bool)").unwrap(), expected);
        assert_eq!(
            parse_type_list("(uint256,bool)[]").unwrap(),
            vec![ty("(uint256,bool)[]")]
        );
        assert_eq!(
            parse_type_list("((uint256,bool))").unwrap(),
            vec![ParamType::Tuple(expected)]
        );
        assert!(parse_type_list("()").unwrap().is_empty());
        assert!(parse_type_list("uint7").is_err());
    }
}
