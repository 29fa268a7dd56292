use core_types::Cell;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Parses a price or percentage cell.
///
/// Whitespace and percent signs are dropped, thousands separators are removed and a
/// decimal comma becomes a decimal point. Returns `None` when nothing numeric remains.
pub fn parse_decimal(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) => Decimal::from_f64(*n),
        _ => parse_text(&cell.as_text()?),
    }
}

/// Parses a volume cell. On top of `parse_decimal`, accepts a trailing
/// `K`/`M`/`B` multiplier ("1.2K" is 1200). Negative volumes are rejected.
pub fn parse_volume(cell: &Cell) -> Option<Decimal> {
    let volume = match cell {
        Cell::Number(n) => Decimal::from_f64(*n)?,
        _ => {
            let text = cell.as_text()?;
            let text = text.trim();
            let (digits, multiplier) = match text.chars().last()?.to_ascii_uppercase() {
                'K' => (&text[..text.len() - 1], Decimal::from(1_000)),
                'M' => (&text[..text.len() - 1], Decimal::from(1_000_000)),
                'B' => (&text[..text.len() - 1], Decimal::from(1_000_000_000)),
                _ => (text, Decimal::ONE),
            };
            parse_text(digits)?.checked_mul(multiplier)?
        }
    };
    (!volume.is_sign_negative() || volume.is_zero()).then_some(volume)
}

fn parse_text(text: &str) -> Option<Decimal> {
    let mut cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%')
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect();

    // Accounting notation: (1.5) is -1.5.
    if cleaned.starts_with('(') && cleaned.ends_with(')') && cleaned.len() > 2 {
        cleaned = format!("-{}", &cleaned[1..cleaned.len() - 1]);
    }
    if let Some(rest) = cleaned.strip_prefix('+') {
        cleaned = rest.to_string();
    }

    let normalized = resolve_separators(&cleaned);
    if normalized.is_empty() || normalized == "-" {
        return None;
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Decides which of ',' and '.' is the decimal separator and strips the other.
fn resolve_separators(text: &str) -> String {
    let last_comma = text.rfind(',');
    let last_dot = text.rfind('.');

    match (last_comma, last_dot) {
        // "1.234,56" or "1,234.56": whichever comes last is the decimal point.
        (Some(comma), Some(dot)) if comma > dot => text.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => text.replace(',', ""),
        (Some(comma), None) => {
            let decimals = text.len() - comma - 1;
            let integer_part = text[..comma].trim_start_matches('-');
            let single = text.matches(',').count() == 1;
            if single && (decimals != 3 || integer_part == "0" || integer_part.is_empty()) {
                text.replace(',', ".")
            } else {
                text.replace(',', "")
            }
        }
        (None, Some(_)) if text.matches('.').count() > 1 => text.replace('.', ""),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn num(text: &str) -> Option<Decimal> {
        parse_decimal(&Cell::from(text))
    }

    #[test]
    fn strips_percent_and_thousands() {
        assert_eq!(num("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(num("-0.52%"), Some(dec!(-0.52)));
        assert_eq!(num(" +1.25 % "), Some(dec!(1.25)));
        assert_eq!(num("12,345"), Some(dec!(12345)));
        assert_eq!(num("1.234.567"), Some(dec!(1234567)));
    }

    #[test]
    fn understands_decimal_comma() {
        assert_eq!(num("1,5"), Some(dec!(1.5)));
        assert_eq!(num("-0,52%"), Some(dec!(-0.52)));
        assert_eq!(num("0,500"), Some(dec!(0.5)));
        assert_eq!(num("1.234,56"), Some(dec!(1234.56)));
    }

    #[test]
    fn odd_notations() {
        assert_eq!(num("(2.5)"), Some(dec!(-2.5)));
        assert_eq!(num("\u{2212}3.1"), Some(dec!(-3.1)));
        assert_eq!(num("1e3"), Some(dec!(1000)));
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(parse_decimal(&Cell::Number(101.25)), Some(dec!(101.25)));
        assert_eq!(parse_decimal(&Cell::Number(f64::NAN)), None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(num("N/A"), None);
        assert_eq!(num("-"), None);
        assert_eq!(num("%"), None);
        assert_eq!(parse_decimal(&Cell::Empty), None);
    }

    #[test]
    fn volume_suffixes() {
        assert_eq!(parse_volume(&Cell::from("1.2K")), Some(dec!(1200)));
        assert_eq!(parse_volume(&Cell::from("3,5m")), Some(dec!(3500000)));
        assert_eq!(parse_volume(&Cell::from("2B")), Some(dec!(2000000000)));
        assert_eq!(parse_volume(&Cell::from("15,300")), Some(dec!(15300)));
        assert_eq!(parse_volume(&Cell::Number(42.0)), Some(dec!(42)));
        assert_eq!(parse_volume(&Cell::from("N/A")), None);
        assert_eq!(parse_volume(&Cell::from("-5K")), None);
    }

    #[test]
    fn only_volume_accepts_suffixes() {
        assert_eq!(num("1.2K"), None);
    }
}
