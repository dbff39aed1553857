//! Phone number obfuscation.
//!
//! The published `cv.json` stores the phone number with its digits shuffled by a
//! fixed permutation so the plain number never appears verbatim in the data
//! file. This is a deterrent against naive scraping, not encryption.
//!
//! Pattern: `ABC-DEF-GHIJ` is stored as `BCA-FED-GIHJ`.

use crate::utils::error::PhoneFormatError;

pub const PHONE_LENGTH: usize = 10;

/// A fixed reordering of `N` positions: `apply(src)[i] == src[indices[i]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutation<const N: usize> {
    indices: [usize; N],
}

impl<const N: usize> Permutation<N> {
    /// Panics if `indices` is not a permutation of `0..N`.
    pub const fn new(indices: [usize; N]) -> Self {
        let mut seen = [false; N];
        let mut i = 0;
        while i < N {
            assert!(indices[i] < N, "permutation index out of range");
            assert!(!seen[indices[i]], "permutation index repeated");
            seen[indices[i]] = true;
            i += 1;
        }
        Self { indices }
    }

    pub const fn invert(&self) -> Self {
        let mut inverse = [0; N];
        let mut i = 0;
        while i < N {
            inverse[self.indices[i]] = i;
            i += 1;
        }
        Self { indices: inverse }
    }

    pub fn apply<T: Clone>(&self, source: &[T; N]) -> [T; N] {
        std::array::from_fn(|i| source[self.indices[i]].clone())
    }

    pub fn indices(&self) -> &[usize; N] {
        &self.indices
    }
}

pub const ENCODE: Permutation<PHONE_LENGTH> = Permutation::new([1, 2, 0, 5, 4, 3, 6, 8, 7, 9]);
pub const DECODE: Permutation<PHONE_LENGTH> = ENCODE.invert();

/// Anything that can be read as an ordered list of phone digit elements:
/// a digit string, or a list of single-character strings.
pub trait PhoneDigits {
    fn elements(&self) -> Vec<&str>;
}

impl PhoneDigits for str {
    fn elements(&self) -> Vec<&str> {
        self.char_indices()
            .map(|(i, c)| &self[i..i + c.len_utf8()])
            .collect()
    }
}

impl PhoneDigits for String {
    fn elements(&self) -> Vec<&str> {
        self.as_str().elements()
    }
}

impl<S: AsRef<str>> PhoneDigits for [S] {
    fn elements(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>> PhoneDigits for Vec<S> {
    fn elements(&self) -> Vec<&str> {
        self.as_slice().elements()
    }
}

impl<S: AsRef<str>, const N: usize> PhoneDigits for [S; N] {
    fn elements(&self) -> Vec<&str> {
        self.as_slice().elements()
    }
}

fn to_digits<I: PhoneDigits + ?Sized>(phone: &I) -> Result<[char; PHONE_LENGTH], PhoneFormatError> {
    let elements = phone.elements();
    if elements.len() != PHONE_LENGTH {
        return Err(PhoneFormatError::WrongLength {
            actual: elements.len(),
        });
    }

    let mut digits = ['0'; PHONE_LENGTH];
    for (index, element) in elements.iter().enumerate() {
        let mut chars = element.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => digits[index] = c,
            _ => {
                return Err(PhoneFormatError::NonDigit {
                    index,
                    found: element.to_string(),
                })
            }
        }
    }
    Ok(digits)
}

fn to_strings(digits: &[char; PHONE_LENGTH]) -> Vec<String> {
    digits.iter().map(char::to_string).collect()
}

/// Shuffles a plain phone number into its stored form.
pub fn encode<I: PhoneDigits + ?Sized>(phone: &I) -> Result<Vec<String>, PhoneFormatError> {
    let digits = to_digits(phone)?;
    Ok(to_strings(&ENCODE.apply(&digits)))
}

/// Restores the plain phone number from its stored form.
pub fn decode<I: PhoneDigits + ?Sized>(phone: &I) -> Result<Vec<String>, PhoneFormatError> {
    let digits = to_digits(phone)?;
    Ok(to_strings(&DECODE.apply(&digits)))
}

/// `phone: ["d0", "d1", ...]`, ready to paste into `cv.json`.
pub fn encode_as_display_string<I: PhoneDigits + ?Sized>(
    phone: &I,
) -> Result<String, PhoneFormatError> {
    let encoded = encode(phone)?;
    Ok(format!("phone: [\"{}\"]", encoded.join("\", \"")))
}

/// Splits a plain number into its `3-3-4` groups.
pub fn groups<I: PhoneDigits + ?Sized>(phone: &I) -> Result<[String; 3], PhoneFormatError> {
    let digits = to_digits(phone)?;
    Ok([
        digits[0..3].iter().collect(),
        digits[3..6].iter().collect(),
        digits[6..].iter().collect(),
    ])
}

pub fn format_display<I: PhoneDigits + ?Sized>(phone: &I) -> Result<String, PhoneFormatError> {
    Ok(groups(phone)?.join("-"))
}

/// `tel:` link target; numbers are stored without country code and assumed `+1`.
pub fn tel_uri<I: PhoneDigits + ?Sized>(phone: &I) -> Result<String, PhoneFormatError> {
    let digits = to_digits(phone)?;
    Ok(format!("tel:+1{}", digits.iter().collect::<String>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_table_is_inverse_of_encode() {
        assert_eq!(DECODE.indices(), &[2, 0, 1, 5, 4, 3, 6, 8, 7, 9]);
        assert_eq!(DECODE.invert(), ENCODE);
    }

    #[test]
    fn test_encode_known_value() {
        let encoded = encode("0123456789").unwrap();
        assert_eq!(encoded, vec!["1", "2", "0", "5", "4", "3", "6", "8", "7", "9"]);
        assert_eq!(decode(&encoded).unwrap().concat(), "0123456789");
    }

    #[test]
    fn test_round_trip_both_directions() {
        for plain in ["5551234567", "0000000000", "9876543210", "1212121212"] {
            assert_eq!(decode(&encode(plain).unwrap()).unwrap().concat(), plain);
            assert_eq!(encode(&decode(plain).unwrap()).unwrap().concat(), plain);
        }
    }

    #[test]
    fn test_encode_is_not_an_involution() {
        let once = encode("0123456789").unwrap();
        let twice = encode(&once).unwrap();
        assert_ne!(twice.concat(), "0123456789");
    }

    #[test]
    fn test_accepts_string_and_array_inputs() {
        let from_str = encode("0123456789").unwrap();
        let from_array = encode(&["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]).unwrap();
        let owned: Vec<String> = "0123456789".chars().map(String::from).collect();
        let from_vec = encode(&owned).unwrap();
        assert_eq!(from_str, from_array);
        assert_eq!(from_str, from_vec);
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        assert_eq!(
            encode("012345678"),
            Err(PhoneFormatError::WrongLength { actual: 9 })
        );
        assert_eq!(
            decode("01234567890"),
            Err(PhoneFormatError::WrongLength { actual: 11 })
        );
        assert_eq!(encode(""), Err(PhoneFormatError::WrongLength { actual: 0 }));
    }

    #[test]
    fn test_non_digit_is_rejected() {
        assert_eq!(
            encode("01234a6789"),
            Err(PhoneFormatError::NonDigit {
                index: 5,
                found: "a".to_string()
            })
        );
        // multi-character elements are not single digits
        let elements = ["01", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
        assert!(matches!(
            decode(&elements),
            Err(PhoneFormatError::NonDigit { index: 0, .. })
        ));
        // non-ASCII digits are rejected too
        assert!(matches!(
            encode("012345678٣"),
            Err(PhoneFormatError::NonDigit { index: 9, .. })
        ));
    }

    #[test]
    fn test_display_string() {
        assert_eq!(
            encode_as_display_string("0123456789").unwrap(),
            r#"phone: ["1", "2", "0", "5", "4", "3", "6", "8", "7", "9"]"#
        );
    }

    #[test]
    fn test_groups_and_tel_uri() {
        assert_eq!(format_display("0123456789").unwrap(), "012-345-6789");
        assert_eq!(tel_uri("0123456789").unwrap(), "tel:+10123456789");
    }
}
