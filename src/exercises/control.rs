#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

impl Sign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Positive => "positive",
            Sign::Negative => "negative",
            Sign::Zero => "zero",
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `n` against zero. Values that compare neither above nor below zero
/// (such as NaN) are reported as [`Sign::Zero`].
pub fn check_sign<T>(n: T) -> Sign
where
    T: PartialOrd + Default,
{
    let zero = T::default();
    if n > zero {
        Sign::Positive
    } else if n < zero {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// The first `n` primes, by trial division against the primes found so far.
pub fn first_n_primes(n: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(n);
    let mut candidate = 2u64;

    while primes.len() < n {
        let is_prime = primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0);
        if is_prime {
            primes.push(candidate);
        }
        candidate += 1;
    }

    primes
}

/// `1 + 2 + ... + n`, summed one term at a time.
pub fn sum_1_to_n(n: u64) -> u64 {
    let mut total = 0;
    let mut i = 1;
    while i <= n {
        total += i;
        i += 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::{Sign, check_sign, first_n_primes, sum_1_to_n};

    #[test]
    fn classifies_sign() {
        assert_eq!(check_sign(5), Sign::Positive);
        assert_eq!(check_sign(-3), Sign::Negative);
        assert_eq!(check_sign(0), Sign::Zero);
        assert_eq!(check_sign(-0.5), Sign::Negative);
        assert_eq!(check_sign(f64::NAN), Sign::Zero);
        assert_eq!(check_sign(7u8).to_string(), "positive");
    }

    #[test]
    fn first_primes_match_known_sequence() {
        assert_eq!(first_n_primes(5), vec![2, 3, 5, 7, 11]);
        assert_eq!(
            first_n_primes(10),
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
        );
        assert!(first_n_primes(0).is_empty());
    }

    #[test]
    fn primes_strictly_increase() {
        let primes = first_n_primes(50);
        assert_eq!(primes.len(), 50);
        assert!(primes.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(primes.last(), Some(&229));
    }

    #[test]
    fn sums_match_closed_form() {
        assert_eq!(sum_1_to_n(10), 55);
        assert_eq!(sum_1_to_n(100), 5050);
        assert_eq!(sum_1_to_n(0), 0);
        for n in [1, 7, 33, 250] {
            assert_eq!(sum_1_to_n(n), n * (n + 1) / 2);
        }
    }
}
