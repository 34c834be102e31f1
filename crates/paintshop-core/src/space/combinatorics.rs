//! Checked integer combinatorics over `u128`.

/// `C(n, r)`, or `None` on overflow.
pub fn binomial(n: usize, r: usize) -> Option<u128> {
    if r > n {
        return Some(0);
    }
    let r = r.min(n - r);
    let mut result: u128 = 1;
    for i in 0..r {
        // Exact at every step: the running value is C(n - r + i + 1, i + 1).
        result = result.checked_mul((n - r + i + 1) as u128)? / (i as u128 + 1);
    }
    Some(result)
}

/// `n! / e!` for `e <= n`, or `None` on overflow.
pub fn falling_factorial(n: usize, e: usize) -> Option<u128> {
    ((e + 1)..=n).try_fold(1u128, |acc, x| acc.checked_mul(x as u128))
}

/// Positions of the `index`-th `size`-combination of `0..n` in
/// lexicographic order, or `None` when `index >= C(n, size)`.
pub fn nth_combination(n: usize, size: usize, mut index: u128) -> Option<Vec<usize>> {
    if index >= binomial(n, size)? {
        return None;
    }
    let mut picked = Vec::with_capacity(size);
    let mut next = 0;
    let mut left = size;
    while left > 0 {
        if n - next == left {
            picked.extend(next..n);
            break;
        }
        let mut x = next;
        loop {
            let extra = binomial(n - x - 1, left - 1)?;
            if index < extra {
                break;
            }
            index -= extra;
            x += 1;
        }
        picked.push(x);
        next = x + 1;
        left -= 1;
    }
    Some(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 2), Some(10));
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(3, 4), Some(0));
        assert_eq!(binomial(0, 0), Some(1));
        assert_eq!(binomial(100, 50), Some(100891344545564193334812497256));
    }

    #[test]
    fn test_falling_factorial() {
        assert_eq!(falling_factorial(4, 0), Some(24));
        assert_eq!(falling_factorial(4, 2), Some(12));
        assert_eq!(falling_factorial(4, 4), Some(1));
        assert_eq!(falling_factorial(40, 0), None);
    }

    #[test]
    fn test_nth_combination_is_lexicographic() {
        let all: Vec<_> = (0..6).map(|i| nth_combination(4, 2, i).unwrap()).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
        assert_eq!(nth_combination(4, 2, 6), None);
        assert_eq!(nth_combination(3, 0, 0), Some(vec![]));
    }
}
