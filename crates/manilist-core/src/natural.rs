//! Natural ("alphanumeric") string ordering.
//!
//! Runs of ASCII digits compare by numeric value, everything else compares
//! byte-wise, so `img2` sorts before `img10`. UTF-8 compares correctly
//! byte-wise, so no decoding is needed.

use std::cmp::Ordering;

/// Compares two strings in natural order.
///
/// - digit runs compare by value, of any length, without overflow
/// - equal values with different zero padding: fewer leading zeros first
/// - a digit sorts before a non-digit at the same position
/// - a string that is a prefix of the other sorts first
///
/// The result is `Equal` only for identical strings.
///
/// # Examples
///
/// ```
/// use manilist_core::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("img2", "img10"), Ordering::Less);
/// assert_eq!(natural_cmp("v1.10", "v1.9"), Ordering::Greater);
/// assert_eq!(natural_cmp("a", "a"), Ordering::Equal);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (c1, c2) = (a[i], b[j]);
        let (d1, d2) = (c1.is_ascii_digit(), c2.is_ascii_digit());

        if d1 != d2 {
            return if d1 {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        if !d1 {
            if c1 != c2 {
                return c1.cmp(&c2);
            }
            i += 1;
            j += 1;
            continue;
        }

        let zeros1 = skip_while(a, i, |c| c == b'0');
        let zeros2 = skip_while(b, j, |c| c == b'0');
        let end1 = skip_while(a, zeros1, |c| c.is_ascii_digit());
        let end2 = skip_while(b, zeros2, |c| c.is_ascii_digit());

        // Without leading zeros a longer run is a larger number; equal
        // lengths compare digit by digit.
        let ordering = (end1 - zeros1)
            .cmp(&(end2 - zeros2))
            .then_with(|| a[zeros1..end1].cmp(&b[zeros2..end2]))
            .then_with(|| (zeros1 - i).cmp(&(zeros2 - j)));
        if ordering != Ordering::Equal {
            return ordering;
        }

        i = end1;
        j = end2;
    }

    (a.len() - i).cmp(&(b.len() - j))
}

/// Returns `true` if `a` sorts strictly before `b` in natural order.
///
/// # Examples
///
/// ```
/// use manilist_core::natural_less;
///
/// assert!(natural_less("app:v2", "app:v10"));
/// assert!(!natural_less("app:v10", "app:v10"));
/// ```
pub fn natural_less(a: &str, b: &str) -> bool {
    natural_cmp(a, b) == Ordering::Less
}

fn skip_while(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[start..]
        .iter()
        .position(|&c| !pred(c))
        .map_or(bytes.len(), |offset| start + offset)
}
