pub mod crack;
pub mod lcg;
pub mod modular;
pub mod report;

use anyhow::{anyhow, Result};
use rug::Integer;

/// Parse one captured value: decimal, or hex with an `0x`/`0X` prefix,
/// optionally signed.
pub fn parse_integer(text: &str) -> Result<Integer> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.starts_with(['+', '-']) {
        return Err(anyhow!("not an integer: {:?}", text));
    }
    let parsed = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Integer::from_str_radix(hex, 16)
    } else {
        Integer::from_str_radix(body, 10)
    }
    .map_err(|_| anyhow!("not an integer: {:?}", text))?;
    Ok(if negative { -parsed } else { parsed })
}

/// Parse a capture line into an observation window. Values are separated by
/// whitespace or commas; empty tokens are skipped.
pub fn parse_sequence(line: &str) -> Result<Vec<Integer>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(parse_integer)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integer_decimal_and_hex() {
        assert_eq!(parse_integer("97").unwrap(), 97);
        assert_eq!(parse_integer("  42 ").unwrap(), 42);
        assert_eq!(parse_integer("0xff").unwrap(), 255);
        assert_eq!(parse_integer("0X10").unwrap(), 16);
        assert_eq!(parse_integer("-12").unwrap(), -12);
        assert_eq!(parse_integer("-0x10").unwrap(), -16);
    }

    #[test]
    fn parse_integer_handles_values_past_u64() {
        let big = parse_integer("340282366920938463463374607431768211456").unwrap();
        assert_eq!(big, Integer::from(1u32) << 128u32);
    }

    #[test]
    fn parse_integer_rejects_garbage() {
        assert!(parse_integer("").is_err());
        assert!(parse_integer("12three").is_err());
        assert!(parse_integer("0x").is_err());
        assert!(parse_integer("--5").is_err());
    }

    #[test]
    fn parse_sequence_splits_on_whitespace_and_commas() {
        let seq = parse_sequence("10 53,74\t82").unwrap();
        assert_eq!(seq, vec![10, 53, 74, 82]);
        assert!(parse_sequence("10 oops").is_err());
        assert!(parse_sequence("").unwrap().is_empty());
    }
}
