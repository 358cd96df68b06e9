/// Generational reference to a body slot.
///
/// A handle outlives its body harmlessly: once the slot is reused the
/// generation no longer matches and lookups miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Pack into a single integer for the JS side.
    pub fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip() {
        let h = BodyHandle::new(17, 3);
        assert_eq!(h.to_bits(), (3u64 << 32) | 17);
        assert_eq!(BodyHandle::from_bits(h.to_bits()), h);
    }
}
