//! Numeric literal validation.
//!
//! The tokenizer scans numbers greedily; everything about grouping
//! underscores, base prefixes and exponents is checked here.

use anyhow::{Result, anyhow, bail};

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Digits with underscores and the base prefix removed.
    pub text: String,
    pub base: u32,
    pub is_float: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

fn split_base(lit: &str) -> (u32, &str) {
    let bytes = lit.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &lit[2..]),
            b'b' | b'B' => return (2, &lit[2..]),
            b'o' | b'O' => return (8, &lit[2..]),
            _ => {}
        }
    }
    (10, lit)
}

fn validate_digits(s: &str, base: u32) -> Result<()> {
    if s.is_empty() {
        bail!("digits required");
    }
    let mut prev_underscore = false;
    let mut seen_digit = false;
    for ch in s.chars() {
        if ch == '_' {
            if !seen_digit || prev_underscore {
                bail!("underscores must separate digits");
            }
            prev_underscore = true;
            continue;
        }
        if !ch.is_digit(base) {
            bail!("invalid digit {ch:?} for base {base}");
        }
        seen_digit = true;
        prev_underscore = false;
    }
    if prev_underscore {
        bail!("underscores must separate digits");
    }
    Ok(())
}

fn strip_underscores(s: &str) -> String {
    s.chars().filter(|&c| c != '_').collect()
}

fn normalize_mantissa(mantissa: &str) -> Result<String> {
    if mantissa.is_empty() {
        bail!("float literal requires digits");
    }
    match mantissa.split_once('.') {
        Some((int_part, frac_part)) => {
            if int_part.is_empty() || frac_part.is_empty() {
                bail!("float literal requires digits on both sides of decimal point");
            }
            validate_digits(int_part, 10)?;
            validate_digits(frac_part, 10)?;
            Ok(format!("{}.{}", strip_underscores(int_part), strip_underscores(frac_part)))
        }
        None => {
            validate_digits(mantissa, 10)?;
            Ok(strip_underscores(mantissa))
        }
    }
}

/// Validate `lit` and strip its grouping underscores.
///
/// `1_2.3_4` becomes `12.34`; `1__2`, `_1`, `1_`, `0x_FF` and `1e_3` are errors.
pub fn normalize(lit: &str) -> Result<Normalized> {
    let (base, digits) = split_base(lit);
    if base != 10 {
        if digits.contains('.') {
            bail!("float literal cannot use base prefix");
        }
        validate_digits(digits, base)?;
        return Ok(Normalized {
            text: strip_underscores(digits),
            base,
            is_float: false,
        });
    }

    let (mantissa, exponent) = match lit.find(['e', 'E']) {
        Some(idx) => (&lit[..idx], Some(&lit[idx + 1..])),
        None => (lit, None),
    };
    let is_float = mantissa.contains('.') || exponent.is_some();
    if !is_float {
        validate_digits(lit, 10)?;
        return Ok(Normalized {
            text: strip_underscores(lit),
            base,
            is_float,
        });
    }

    let mut text = normalize_mantissa(mantissa)?;
    if let Some(exp) = exponent {
        let (sign, exp_digits) = match exp.strip_prefix(['+', '-']) {
            Some(rest) => (&exp[..1], rest),
            None => ("", exp),
        };
        if exp_digits.is_empty() {
            bail!("exponent requires digits");
        }
        validate_digits(exp_digits, 10)?;
        text.push('e');
        text.push_str(sign);
        text.push_str(&strip_underscores(exp_digits));
    }
    Ok(Normalized { text, base, is_float })
}

/// Normalize and evaluate a numeric literal.
pub fn parse_number(lit: &str) -> Result<Number> {
    let norm = normalize(lit)?;
    if norm.is_float {
        let value: f64 = norm.text.parse().map_err(|_| anyhow!("invalid float literal"))?;
        if value.is_infinite() {
            bail!("float literal out of range");
        }
        return Ok(Number::Float(value));
    }
    i64::from_str_radix(&norm.text, norm.base)
        .map(Number::Int)
        .map_err(|_| anyhow!("integer literal out of range"))
}
