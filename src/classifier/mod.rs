pub mod predicates;


use crate::{ClassificationResult, NumberProperty};

/// Classify a number by every supported predicate.
///
/// The returned result carries no fun fact; attach one with
/// [`ClassificationResult::with_fun_fact`].
pub fn classify(number: i32) -> ClassificationResult {
    let is_armstrong = predicates::is_armstrong(number);

    let mut properties = Vec::with_capacity(2);
    if is_armstrong {
        properties.push(NumberProperty::Armstrong);
    }
    properties.push(predicates::parity(number));

    ClassificationResult {
        number,
        is_prime: predicates::is_prime(number),
        is_perfect: predicates::is_perfect(number),
        is_armstrong,
        properties,
        digit_sum: predicates::digit_sum(number),
        fun_fact: None,
    }
}
