// Input validation shared by the engine's loaders and config checks.

const MAX_PRICE: f64 = 1e10;

/// Normalizes a trading symbol (trimmed, upper-cased) and checks it is 2-20
/// characters of `A-Z`, `0-9` or `-`. Returns the normalized form when valid.
pub fn validate_symbol(symbol: &str) -> Option<String> {
    let normalized = symbol.trim().to_uppercase();
    let len = normalized.chars().count();
    if !(2..=20).contains(&len) {
        return None;
    }
    if !normalized.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-') {
        return None;
    }
    Some(normalized)
}

/// Accepts finite prices in `(0, 1e10]`.
pub fn validate_price(price: f64) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 || price > MAX_PRICE {
        return None;
    }
    Some(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_symbol_normalizes() {
        assert_eq!(validate_symbol(" btcusdt "), Some("BTCUSDT".to_string()));
        assert_eq!(validate_symbol("1000PEPE-USDT"), Some("1000PEPE-USDT".to_string()));
    }

    #[test]
    fn test_validate_symbol_rejects_bad_input() {
        assert_eq!(validate_symbol("B"), None);
        assert_eq!(validate_symbol("BTC/USDT"), None);
        assert_eq!(validate_symbol("ABCDEFGHIJKLMNOPQRSTU"), None);
        assert_eq!(validate_symbol(""), None);
    }

    #[test]
    fn test_validate_price_bounds() {
        assert_eq!(validate_price(1.5), Some(1.5));
        assert_eq!(validate_price(0.0), None);
        assert_eq!(validate_price(-3.0), None);
        assert_eq!(validate_price(f64::NAN), None);
        assert_eq!(validate_price(2e10), None);
    }
}
