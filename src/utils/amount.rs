use crate::config::AmountFormat;

/// Base units per coin.
pub const COIN: u128 = 100_000_000;

const COIN_DECIMALS: usize = 8;

/// Render an amount of base units without grouping separators or locale
/// decimal marks, so the string parses back unambiguously.
pub fn format_amount(amount: u128, format: AmountFormat) -> String {
	match format {
		AmountFormat::BaseUnits => amount.to_string(),
		AmountFormat::Coin => {
			let whole = amount / COIN;
			let fraction = amount % COIN;
			if fraction == 0 {
				return whole.to_string();
			}
			let digits = format!("{:0width$}", fraction, width = COIN_DECIMALS);
			format!("{}.{}", whole, digits.trim_end_matches('0'))
		}
	}
}

/// Parse a decimal coin value (`"0.5"`, `"12"`, `".25"`) into base units.
///
/// Returns `None` for signs, exponents, more than eight decimals or overflow.
pub fn parse_coin_amount(text: &str) -> Option<u128> {
	let (whole, fraction) = match text.split_once('.') {
		Some((whole, fraction)) => (whole, fraction),
		None => (text, ""),
	};
	if whole.is_empty() && fraction.is_empty() {
		return None;
	}
	if fraction.len() > COIN_DECIMALS {
		return None;
	}
	let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
	if !all_digits(whole) || !all_digits(fraction) {
		return None;
	}

	let whole_units = if whole.is_empty() {
		0
	} else {
		whole.parse::<u128>().ok()?.checked_mul(COIN)?
	};
	let fraction_units = if fraction.is_empty() {
		0
	} else {
		let padded = format!("{:0<width$}", fraction, width = COIN_DECIMALS);
		padded.parse::<u128>().ok()?
	};
	whole_units.checked_add(fraction_units)
}
