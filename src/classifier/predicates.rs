//! Pure numeric predicates used by the classifier.
//!
//! Every function is total over `i32`; arithmetic is widened so that
//! `i32::MIN` and `i32::MAX` never overflow.

use crate::NumberProperty;

/// Returns true if `n` has no divisor strictly between 1 and `n`.
pub fn is_prime(n: i32) -> bool {
    if n < 2 {
        return false;
    }
    let n = i64::from(n);
    let mut i = 2i64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Returns true if `n` equals the sum of its proper divisors.
pub fn is_perfect(n: i32) -> bool {
    // 1 has no proper divisors, but the sum below starts at 1
    if n <= 1 {
        return false;
    }
    let n = i64::from(n);
    let mut sum = 1i64;
    let mut i = 2i64;
    while i * i <= n {
        if n % i == 0 {
            sum += i;
            let cofactor = n / i;
            if cofactor != i {
                sum += cofactor;
            }
        }
        i += 1;
    }
    sum == n
}

/// Returns true if |n| equals the sum of its decimal digits, each raised to
/// the number of digits.
pub fn is_armstrong(n: i32) -> bool {
    let magnitude = n.unsigned_abs();
    let digits = digits_of(magnitude);
    let power = digits.len() as u32;

    let sum: u64 = digits.iter().map(|&d| u64::from(d).pow(power)).sum();
    sum == u64::from(magnitude)
}

/// Sum of the decimal digit values of |n|.
pub fn digit_sum(n: i32) -> u32 {
    digits_of(n.unsigned_abs()).iter().sum()
}

pub fn parity(n: i32) -> NumberProperty {
    if n % 2 == 0 {
        NumberProperty::Even
    } else {
        NumberProperty::Odd
    }
}

/// Decimal digits, most significant first. Zero yields a single digit.
fn digits_of(mut magnitude: u32) -> Vec<u32> {
    let mut digits = Vec::with_capacity(10);
    loop {
        digits.push(magnitude % 10);
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}
