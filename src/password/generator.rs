use rand::Rng;
use rand::rngs::OsRng;
use rand::seq::index;

use crate::error::{Error, Result};

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Character classes to draw from. Selecting none means all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordOptions {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self { uppercase: true, lowercase: true, numbers: true, symbols: true }
    }
}

impl PasswordOptions {
    fn sets(self) -> Vec<&'static [u8]> {
        let selected: Vec<&'static [u8]> = [(self.uppercase, UPPERCASE), (self.lowercase, LOWERCASE), (self.numbers, NUMBERS), (self.symbols, SYMBOLS)]
            .into_iter()
            .filter_map(|(enabled, set)| enabled.then_some(set))
            .collect();

        if selected.is_empty() { vec![UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS] } else { selected }
    }
}

/// Generates a random password from the OS CSPRNG.
///
/// When `length` allows it, every selected class appears at least once, at
/// positions chosen uniformly without replacement.
///
/// # Errors
/// [`Error::InvalidLength`] if `length` is zero.
pub fn generate_password(length: usize, options: PasswordOptions) -> Result<String> {
    if length == 0 {
        return Err(Error::InvalidLength);
    }

    let sets = options.sets();
    let alphabet: Vec<u8> = sets.concat();
    let mut rng = OsRng;

    let mut password: Vec<u8> = (0..length).map(|_| pick(&mut rng, &alphabet)).collect();

    if length >= sets.len() {
        let positions = index::sample(&mut rng, length, sets.len());
        for (position, set) in positions.into_iter().zip(&sets) {
            password[position] = pick(&mut rng, set);
        }
    }

    Ok(password.into_iter().map(char::from).collect())
}

fn pick<R: Rng>(rng: &mut R, set: &[u8]) -> u8 {
    set[rng.gen_range(0..set.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_in(password: &str, set: &[u8]) -> usize {
        password.bytes().filter(|b| set.contains(b)).count()
    }

    #[test]
    fn test_default_contains_every_class() {
        for _ in 0..50 {
            let password = generate_password(16, PasswordOptions::default()).unwrap();
            assert_eq!(password.len(), 16);
            for set in [UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS] {
                assert!(count_in(&password, set) >= 1, "{password}");
            }
        }
    }

    #[test]
    fn test_restricted_sets() {
        let options = PasswordOptions { uppercase: false, lowercase: false, numbers: true, symbols: false };
        let password = generate_password(32, options).unwrap();
        assert!(password.bytes().all(|b| b.is_ascii_digit()));

        let options = PasswordOptions { uppercase: true, lowercase: false, numbers: false, symbols: true };
        let password = generate_password(20, options).unwrap();
        assert_eq!(count_in(&password, UPPERCASE) + count_in(&password, SYMBOLS), 20);
        assert!(count_in(&password, UPPERCASE) >= 1);
        assert!(count_in(&password, SYMBOLS) >= 1);
    }

    #[test]
    fn test_no_sets_means_all() {
        let options = PasswordOptions { uppercase: false, lowercase: false, numbers: false, symbols: false };
        let password = generate_password(24, options).unwrap();
        for set in [UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS] {
            assert!(count_in(&password, set) >= 1);
        }
    }

    #[test]
    fn test_short_length() {
        let password = generate_password(2, PasswordOptions::default()).unwrap();
        assert_eq!(password.len(), 2);
    }

    #[test]
    fn test_zero_length() {
        assert!(matches!(generate_password(0, PasswordOptions::default()), Err(Error::InvalidLength)));
    }

    #[test]
    fn test_passwords_differ() {
        let a = generate_password(16, PasswordOptions::default()).unwrap();
        let b = generate_password(16, PasswordOptions::default()).unwrap();
        assert_ne!(a, b);
    }
}
