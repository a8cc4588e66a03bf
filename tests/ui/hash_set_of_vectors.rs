use std::collections::HashSet;

use growable_bitvec::BitVector;

fn main() {
    let mut roomy = BitVector::with_capacity(4096);
    roomy.set(5);
    roomy.set(70);

    let mut seen = HashSet::new();
    seen.insert(roomy);
    assert!(seen.contains(&BitVector::from_ones_iter([5, 70])));
    assert!(!seen.insert(BitVector::from_words(vec![1 << 5, 1 << 6, 0])));
}
