//! Bit range specs of ranged header columns: `[hi..0]` or `[width]`

fn parse_decimal(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Width declared by a range spec including its brackets
///
/// `[hi..0]` declares hi+1 bits and `[n]` declares n bits. Anything else,
/// including a zero width or a low bound other than 0, is rejected.
pub fn range_width(spec: &str) -> Option<usize> {
    let inner = spec.strip_prefix('[')?.strip_suffix(']')?;

    let width = match inner.split_once("..") {
        Some((high, low)) => {
            if parse_decimal(low)? != 0 {
                return None;
            }
            parse_decimal(high)?.checked_add(1)?
        }
        None => parse_decimal(inner)?,
    };

    (width > 0).then_some(width)
}
