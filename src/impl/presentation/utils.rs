use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number of decimal places for the given currency (ex. JPY = 0,
/// USD = 2). Without a currency, two places are used.
pub(crate) fn decimal_places(currency: Option<Currency>) -> usize {
    currency.map_or(2, |c| c.exponent().unwrap_or(0) as usize)
}

/// Format an amount with thousands separators, the currency's number of
/// decimal places and, if given, the currency symbol.
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale or currency. Rounding happens here and only
/// here; aggregation works on unrounded values.
pub(crate) fn format_amount(amount: f64, currency: Option<Currency>) -> String {
    let decimal_places = decimal_places(currency);
    let scale = 10i128.pow(decimal_places as u32);
    let scaled = (amount.abs() * scale as f64).round() as i128;
    let sign = if amount < 0.0 && scaled != 0 { "-" } else { "" };
    let integer_part = (scaled / scale).to_formatted_string(&Locale::en);
    let number = if decimal_places == 0 {
        format!("{}{}", sign, integer_part)
    } else {
        format!(
            "{}{}.{:0decimal_places$}",
            sign,
            integer_part,
            scaled % scale,
        )
    };
    match currency {
        Some(c) => format!("{} {}", number, c.symbol()),
        None => number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234567.891, None), "1,234,567.89");
        assert_eq!(format_amount(-0.5, None), "-0.50");
        assert_eq!(format_amount(0.999, None), "1.00");
        assert_eq!(format_amount(-0.001, None), "0.00");
        assert_eq!(format_amount(1500.4, Some(Currency::JPY)), format!("1,500 {}", Currency::JPY.symbol()));
    }
}
