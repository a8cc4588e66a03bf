use growable_bitvec::BitVector;

fn main() {
    let a = BitVector::from_ones_iter([1, 3, 5]);
    let b = BitVector::from_ones_iter([3, 5, 7]);

    assert_eq!((&a | &b).to_string(), "{1, 3, 5, 7}");
    assert_eq!((&a & &b).to_string(), "{3, 5}");
    assert_eq!((&a ^ &b).to_string(), "{1, 7}");
    assert_eq!((&a - &b).to_string(), "{1}");

    let mut c = a.clone();
    c |= &b;
    c -= &a;
    assert_eq!(c.to_string(), "{7}");
}
