use alloc::vec::Vec;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::BitVector;

// Only the in-use words go over the wire, so spare capacity never leaks into
// the serialized form.
impl Serialize for BitVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.words().serialize(serializer)
    }
}

// Trailing zero words in the input are normalized away by `from_words`.
impl<'de> Deserialize<'de> for BitVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<u64>::deserialize(deserializer).map(BitVector::from_words)
    }
}
