use anyhow::{Context, Result};

/// Parse hex text into bytes. Whitespace, commas and `0x` prefixes between
/// bytes are ignored, so both `ac02` and `0xAC, 0x02` are accepted.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let mut digits = String::with_capacity(text.len());
    for token in text.split(|c: char| c.is_whitespace() || c == ',') {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        digits.push_str(token);
    }
    hex::decode(&digits).with_context(|| format!("invalid hex input {:?}", text.trim()))
}

pub fn format_hex(bytes: &[u8], separator: &str) -> String {
    bytes
        .iter()
        .map(|byte| hex::encode([*byte]))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Split a batch of decimal values on whitespace and commas
pub fn split_values(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect()
}
