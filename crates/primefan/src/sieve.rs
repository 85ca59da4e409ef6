/// Single-array sieve of Eratosthenes over `[2, max_num]`.
///
/// The sequential reference oracle the concurrent engine is checked
/// against in tests and benchmarks. Not part of the concurrent path.
pub fn sieve(max_num: u64) -> Vec<u64> {
    if max_num < 2 {
        return Vec::new();
    }

    let n = max_num as usize;
    let mut composite = vec![false; n + 1];
    let mut primes = Vec::new();

    for p in 2..=n {
        if composite[p] {
            continue;
        }
        primes.push(p as u64);
        if let Some(mut multiple) = p.checked_mul(p) {
            while multiple <= n {
                composite[multiple] = true;
                multiple += p;
            }
        }
    }

    primes
}
