use fragnet_core::{Error, Result};

/// Parse a neighbour-number list such as `"1,2,5-7"`.
///
/// Tokens are comma separated; each is a positive count or an inclusive
/// range `a-b` with `a <= b`. The result is sorted ascending without
/// duplicates.
pub fn parse_neighbor_numbers(s: &str) -> Result<Vec<usize>> {
    let mut out = Vec::new();
    for token in s.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::InvalidNeighborList(s.to_string()));
        }
        match token.split_once('-') {
            Some((lo, hi)) => {
                let lo = parse_count(lo, s)?;
                let hi = parse_count(hi, s)?;
                if lo > hi {
                    return Err(Error::InvalidNeighborList(s.to_string()));
                }
                out.extend(lo..=hi);
            }
            None => out.push(parse_count(token, s)?),
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

fn parse_count(token: &str, whole: &str) -> Result<usize> {
    match token.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidNeighborList(whole.to_string())),
    }
}
