//! The pseudo-integer codec, which turns fixed-width fields of characters into integers.
//!
//! Each character contributes the low six bits of its character code. The groups are
//! concatenated in field order into one unsigned integer `u` of `6 * width` bits. Values in the
//! upper half of that range are folded onto the negatives as `2^(6 * width - 1) - u`. This is
//! *not* two's complement, and the transform must be kept as-is to read data that is already out
//! there.
//!
//! # Examples
//!
//! ```
//! use frame::codec;
//! assert_eq!(Some(0), codec::decode("@@@"));
//! assert_eq!(Some(131071), codec::decode("_??"));
//! assert_eq!(Some(0), codec::decode("`@@"));
//! assert_eq!(Some(-1), codec::decode("`@A"));
//! ```

use MAX_FIELD_WIDTH;

/// The number of bits carried by one character.
pub const BITS_PER_CHARACTER: usize = 6;

/// `?` is reserved by the firmware and stands in for code 127 (DEL).
const RESERVED: u32 = 63;
const RESERVED_SUBSTITUTE: u32 = 127;
const LOW_BITS: u32 = 0b11_1111;

/// Characters produced by `encode` start at `@`, whose low six bits are all zero.
const FIRST_CHARACTER: u32 = 64;

/// Decodes a field into an integer.
///
/// Returns `None` if the field is wider than `MAX_FIELD_WIDTH` characters. An empty field is
/// zero.
///
/// # Examples
///
/// ```
/// use frame::codec;
/// assert_eq!(Some(24001), codec::decode("EwA"));
/// assert_eq!(None, codec::decode("@@@@@@@@@@@"));
/// ```
pub fn decode(field: &str) -> Option<i64> {
    let characters: Vec<char> = field.chars().collect();
    decode_characters(&characters)
}

/// Decodes a field that has already been split into characters.
///
/// # Examples
///
/// ```
/// use frame::codec;
/// assert_eq!(Some(1002), codec::decode_characters(&['@', 'O', 'j']));
/// ```
pub fn decode_characters(characters: &[char]) -> Option<i64> {
    if characters.len() > MAX_FIELD_WIDTH {
        None
    } else {
        Some(decode_field(characters))
    }
}

/// Decodes a field whose width has already been checked against `MAX_FIELD_WIDTH`.
pub(crate) fn decode_field(characters: &[char]) -> i64 {
    debug_assert!(characters.len() <= MAX_FIELD_WIDTH);
    if characters.is_empty() {
        return 0;
    }
    let unsigned = characters.iter().fold(0u64, |n, &c| {
        (n << BITS_PER_CHARACTER) | u64::from(low_bits(c))
    });
    let half = 1u64 << (BITS_PER_CHARACTER * characters.len() - 1);
    if unsigned >= half {
        half as i64 - unsigned as i64
    } else {
        unsigned as i64
    }
}

/// Encodes an integer into a field `width` characters wide.
///
/// This is the inverse of `decode`, handy for building frames for tests and simulators. Six-bit
/// groups are written as `@` through `~`, with `?` for a group of all ones. Returns `None` if the
/// value does not fit in the field or the width is unsupported.
///
/// # Examples
///
/// ```
/// use frame::codec;
/// let field = codec::encode(-42, 3).unwrap();
/// assert_eq!(3, field.len());
/// assert_eq!(Some(-42), codec::decode(&field));
/// assert_eq!(None, codec::encode(131072, 3));
/// ```
pub fn encode(value: i64, width: usize) -> Option<String> {
    if width == 0 || width > MAX_FIELD_WIDTH {
        return None;
    }
    let half = 1i64 << (BITS_PER_CHARACTER * width - 1);
    if value >= half || value <= -half {
        return None;
    }
    let unsigned = (if value >= 0 { value } else { half - value }) as u64;
    Some(
        (0..width)
            .rev()
            .map(|i| {
                let group = (unsigned >> (BITS_PER_CHARACTER * i)) as u32 & LOW_BITS;
                if group == LOW_BITS {
                    '?'
                } else {
                    (FIRST_CHARACTER + group) as u8 as char
                }
            })
            .collect(),
    )
}

fn low_bits(c: char) -> u32 {
    let code = c as u32;
    let code = if code == RESERVED {
        RESERVED_SUBSTITUTE
    } else {
        code
    };
    code & LOW_BITS
}
