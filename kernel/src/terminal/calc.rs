//! Integer calculator
//!
//! Evaluates a single binary expression `a op b` where the operands are
//! signed decimal integers and `op` is one of `+ - * /`. Spaces around
//! the operator are optional, so `2+3` and `10 - 4` both parse.

use crate::error::CalcError;

/// A parsed `a op b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr {
    pub lhs: i32,
    pub op: char,
    pub rhs: i32,
}

impl Expr {
    pub fn parse(input: &str) -> Result<Expr, CalcError> {
        let mut rest = input.trim_start();
        let lhs = take_int(&mut rest)?;
        rest = rest.trim_start();

        let mut chars = rest.chars();
        let op = match chars.next() {
            Some(c @ ('+' | '-' | '*' | '/')) => c,
            _ => return Err(CalcError::InvalidExpression),
        };
        rest = chars.as_str().trim_start();

        let rhs = take_int(&mut rest)?;
        if !rest.trim().is_empty() {
            return Err(CalcError::InvalidExpression);
        }
        Ok(Expr { lhs, op, rhs })
    }

    pub fn eval(self) -> Result<i32, CalcError> {
        let Expr { lhs, op, rhs } = self;
        let result = match op {
            '+' => lhs.checked_add(rhs),
            '-' => lhs.checked_sub(rhs),
            '*' => lhs.checked_mul(rhs),
            '/' if rhs == 0 => return Err(CalcError::DivisionByZero),
            '/' => lhs.checked_div(rhs),
            _ => return Err(CalcError::InvalidExpression),
        };
        result.ok_or(CalcError::Overflow)
    }
}

/// Parse and evaluate in one go.
pub fn evaluate(input: &str) -> Result<i32, CalcError> {
    Expr::parse(input)?.eval()
}

/// Consume an optionally negative run of digits from the front of `s`.
fn take_int(s: &mut &str) -> Result<i32, CalcError> {
    let negative = s.starts_with('-');
    let digits_start = usize::from(negative);
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(CalcError::InvalidExpression);
    }
    let end = digits_start + digits_len;
    let value = s[..end].parse::<i32>().map_err(|_| CalcError::Overflow)?;
    *s = &s[end..];
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(evaluate("2+3"), Ok(5));
        assert_eq!(evaluate("10 - 4"), Ok(6));
        assert_eq!(evaluate("6 * 7"), Ok(42));
        assert_eq!(evaluate("7/2"), Ok(3));
    }

    #[test]
    fn test_negative_operands() {
        assert_eq!(evaluate("-3 + 5"), Ok(2));
        assert_eq!(evaluate("4 - -6"), Ok(10));
        assert_eq!(evaluate("-8/-2"), Ok(4));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("1 / 0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_invalid_input() {
        for input in ["", "2", "2 % 3", "abc", "2 +", "+ 3", "2 + 3 4"] {
            assert_eq!(evaluate(input), Err(CalcError::InvalidExpression), "{:?}", input);
        }
    }

    #[test]
    fn test_overflow() {
        assert_eq!(evaluate("2147483647 + 1"), Err(CalcError::Overflow));
        assert_eq!(evaluate("99999999999 + 1"), Err(CalcError::Overflow));
        assert_eq!(evaluate("-2147483648 / -1"), Err(CalcError::Overflow));
    }
}
