//! EAN-13 barcode codec
//!
//! Pure checksum and formatting routines for the barcodes Biblion prints on
//! books and storage locations. Issued codes are `prefix (3 digits) +
//! sequence (9 digits, zero padded) + GS1 check digit`. Stateful issuance
//! (the per-category counters) lives in `services::barcode`; nothing here
//! touches storage.

use thiserror::Error;

/// Largest sequence value that fits the 9-digit body of an issued code.
/// Running past this is a categorical limit of EAN-13, not a transient
/// condition.
pub const SEQUENCE_CAPACITY: u64 = 999_999_999;

/// Largest value representable in the 3-digit prefix.
pub const PREFIX_CAPACITY: u16 = 999;

/// Errors from assembling an EAN-13 code.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("sequence {sequence} exceeds the 9-digit EAN-13 capacity")]
    SequenceOverflow { sequence: u64 },

    #[error("prefix {prefix} does not fit in 3 digits")]
    PrefixOverflow { prefix: u16 },
}

/// Computes the GS1 check digit over the first 12 digits of a code.
///
/// EAN-13 counts positions from 1: odd positions (0-based even indexes)
/// weigh 1, even positions weigh 3, and the check digit is
/// `(10 - (sum mod 10)) mod 10`.
///
/// Returns `None` unless the input is exactly 12 ASCII digits.
pub fn check_digit(first12: &str) -> Option<u8> {
    if first12.len() != 12 || !first12.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(check_digit_unchecked(first12))
}

/// Checksum core; callers must guarantee 12 ASCII digits.
fn check_digit_unchecked(digits: &str) -> u8 {
    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 {
                d
            } else {
                3 * d
            }
        })
        .sum();
    ((10 - (sum % 10)) % 10) as u8
}

/// Validates a full EAN-13 code: 13 ASCII digits whose last digit satisfies
/// the checksum relation.
pub fn validate(code: &str) -> bool {
    if code.len() != 13 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let expected = check_digit_unchecked(&code[..12]);
    code.as_bytes()[12] - b'0' == expected
}

/// Formats a prefix and sequence value into a full EAN-13 code.
///
/// Fails (never panics) when the sequence exceeds [`SEQUENCE_CAPACITY`] or
/// the prefix exceeds [`PREFIX_CAPACITY`].
pub fn assemble(prefix: u16, sequence: u64) -> Result<String, BarcodeError> {
    if prefix > PREFIX_CAPACITY {
        return Err(BarcodeError::PrefixOverflow { prefix });
    }
    if sequence > SEQUENCE_CAPACITY {
        return Err(BarcodeError::SequenceOverflow { sequence });
    }

    let mut code = format!("{:03}{:09}", prefix, sequence);
    code.push(char::from(b'0' + check_digit_unchecked(&code)));
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_gs1_vector() {
        // Standard GS1 example barcode.
        assert_eq!(check_digit("400638133393"), Some(1));
        assert!(validate("4006381333931"));
    }

    #[test]
    fn test_single_digit_flip_breaks_validation() {
        let code = "4006381333931";
        for pos in 0..13 {
            let mut bytes = code.as_bytes().to_vec();
            bytes[pos] = if bytes[pos] == b'9' { b'0' } else { bytes[pos] + 1 };
            let flipped = String::from_utf8(bytes).unwrap();
            assert!(!validate(&flipped), "flip at {} should invalidate", pos);
        }
    }

    #[test]
    fn test_check_digit_round_trip() {
        // Appending the computed check digit always yields a valid code.
        for seed in [0u64, 1, 42, 999, 123_456_789, 999_999_999, 31_415_926_535] {
            let first12 = format!("{:012}", seed % 1_000_000_000_000);
            let digit = check_digit(&first12).unwrap();
            assert!(digit <= 9);
            assert!(validate(&format!("{}{}", first12, digit)));
        }
    }

    #[test]
    fn test_check_digit_rejects_bad_input() {
        assert_eq!(check_digit("123"), None);
        assert_eq!(check_digit("12345678901a"), None);
        assert_eq!(check_digit("1234567890123"), None);
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(!validate(""));
        assert!(!validate("400638133393"));
        assert!(!validate("400638133393a"));
        assert!(!validate("40063813339311"));
    }

    #[test]
    fn test_assemble_pads_prefix_and_sequence() {
        let code = assemble(200, 1).unwrap();
        assert!(code.starts_with("200000000001"));
        assert_eq!(code.len(), 13);
        assert!(validate(&code));
    }

    #[test]
    fn test_assemble_at_capacity() {
        let code = assemble(299, SEQUENCE_CAPACITY).unwrap();
        assert!(code.starts_with("299999999999"));
        assert!(validate(&code));
    }

    #[test]
    fn test_assemble_sequence_overflow() {
        assert_eq!(
            assemble(200, SEQUENCE_CAPACITY + 1),
            Err(BarcodeError::SequenceOverflow { sequence: 1_000_000_000 })
        );
    }

    #[test]
    fn test_assemble_prefix_overflow() {
        assert_eq!(
            assemble(1000, 1),
            Err(BarcodeError::PrefixOverflow { prefix: 1000 })
        );
    }

    #[test]
    fn test_issue_prefix_210_sequence_42() {
        // End-to-end vector: prefix 210, sequence 42.
        let code = assemble(210, 42).unwrap();
        assert_eq!(&code[..12], "210000000042");
        assert_eq!(code, "2100000000425");
        assert!(validate(&code));
    }
}
