//! Number formatting for metric cards and tables.

/// `1234567` → `"1,234,567"`.
pub fn thousands(n: impl Into<i128>) -> String {
    let n: i128 = n.into();
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Always carries a sign: `"+1,200"`, `"-3"`, `"+0"`.
pub fn signed_thousands(n: i64) -> String {
    if n >= 0 {
        format!("+{}", thousands(n))
    } else {
        thousands(n)
    }
}

/// Whole dollars: `"$12,900"`.
pub fn dollars(v: f64) -> String {
    format!("${}", thousands(v.round() as i64))
}

/// Signed whole dollars: `"$+150"`, `"$-1,020"`.
pub fn signed_dollars(v: f64) -> String {
    format!("${}", signed_thousands(v.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(-1_234_567), "-1,234,567");
        assert_eq!(thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn signs_and_dollars() {
        assert_eq!(signed_thousands(0), "+0");
        assert_eq!(signed_thousands(-42), "-42");
        assert_eq!(dollars(12_899.6), "$12,900");
        assert_eq!(signed_dollars(-1_020.4), "$-1,020");
        assert_eq!(signed_dollars(150.0), "$+150");
    }
}
