use rand::{distr::Alphanumeric, rng, Rng};

/// Length of generated confirmation codes.
const CONFIRMATION_CODE_LEN: usize = 24;

/// Generates a random confirmation code for the signup flow.
///
/// The code is an alphanumeric string compared with a case-sensitive exact
/// match at token exchange, so it never needs further encoding.
pub fn generate_confirmation_code() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(CONFIRMATION_CODE_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_format() {
        let code = generate_confirmation_code();
        assert_eq!(code.len(), CONFIRMATION_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_code_uniqueness() {
        let mut codes = HashSet::new();
        for _ in 0..1000 {
            assert!(codes.insert(generate_confirmation_code()), "Generated duplicate code");
        }
    }
}
