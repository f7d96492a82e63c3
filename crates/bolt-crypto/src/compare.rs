//! Constant-time byte comparison.

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Constant-time comparison of two byte strings.
///
/// Takes the same amount of time regardless of how many bytes match. Both
/// inputs are padded to the longer length with different fill bytes, and the
/// lengths are compared separately, so a length mismatch is not detectable
/// from an early return either. The padded copies are zeroized on return.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let max_len = a.len().max(b.len());

    let mut a_padded = Zeroizing::new(vec![0u8; max_len]);
    let mut b_padded = Zeroizing::new(vec![0xFFu8; max_len]);

    a_padded[..a.len()].copy_from_slice(a);
    b_padded[..b.len()].copy_from_slice(b);

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.as_slice().ct_eq(b_padded.as_slice());

    (lengths_equal & contents_equal).into()
}
