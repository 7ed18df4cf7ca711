/// Constant-time comparison utilities.
///
/// Used when comparing a recomputed digest against a stored one, so that
/// execution time does not reveal how many leading bytes matched.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    ///
    /// This method must not introduce data-dependent branches or early exits.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for [u8] {
    /// Constant-time equality test for byte slices.
    ///
    /// All bytes are XORed and accumulated before comparison, ensuring that
    /// the execution time does not depend on where the first difference occurs.
    /// Slice lengths are treated as public: a length mismatch returns `false`
    /// immediately.
    #[inline]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let diff = self
            .iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0u8, |acc, v| core::hint::black_box(acc | v));

        (((diff as u64).wrapping_sub(1) >> 63) as u8) == 1
    }
}

impl<const N: usize> ConstantTimeEq for [u8; N] {
    #[inline]
    fn ct_eq(&self, other: &Self) -> bool {
        self[..].ct_eq(&other[..])
    }
}
