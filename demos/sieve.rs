use growable_bitvec::BitVector;

/// Sieve of Eratosthenes: composite numbers are marked as set bits, so the
/// primes are the clear bits in `2..limit`.
fn primes_below(limit: usize) -> Vec<usize> {
    let mut composite = BitVector::with_capacity(limit);
    let mut candidate = 2;
    while candidate * candidate < limit {
        for multiple in (candidate * candidate..limit).step_by(candidate) {
            composite.set(multiple);
        }
        candidate = composite.next_clear_bit(candidate + 1);
    }

    let mut primes = Vec::new();
    let mut idx = composite.next_clear_bit(2);
    while idx < limit {
        primes.push(idx);
        idx = composite.next_clear_bit(idx + 1);
    }
    primes
}

fn main() {
    let primes = primes_below(100);
    println!("{} primes below 100: {primes:?}", primes.len());

    let twins = BitVector::from_ones_iter(primes.iter().copied());
    let shifted = BitVector::from_ones_iter(primes.iter().map(|p| p + 2));
    println!("upper members of twin primes: {}", &twins & &shifted);
}
