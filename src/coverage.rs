// --- 覆盖池 ---
// 通配位置数量不少于字符集数量时，每个字符集至少贡献一个字符；
// 其余位置先均匀选字符集，再均匀选字符，最后整体洗牌。

// --- 导入依赖 ---
use rand::CryptoRng;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::core::Error;

/// Pre-shuffled characters for wildcard positions, consumed through a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveragePool {
    chars: Vec<char>,
    cursor: usize,
}

impl CoveragePool {
    /// Samples `wildcard_count` characters from `sets`.
    ///
    /// Empty sets are ignored. Fails with [`Error::NoEligibleCategories`] if
    /// characters are needed but no set remains.
    ///
    /// With fewer wildcard positions than sets, the set order is shuffled
    /// before the forced picks, so which sets get covered is random.
    pub fn sample<R: CryptoRng + ?Sized>(
        sets: &[&[char]],
        wildcard_count: usize,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let mut order: Vec<&[char]> = sets.iter().copied().filter(|s| !s.is_empty()).collect();
        if wildcard_count == 0 {
            return Ok(Self::from_chars(Vec::new()));
        }
        if order.is_empty() {
            return Err(Error::NoEligibleCategories);
        }
        if wildcard_count < order.len() {
            order.shuffle(rng);
        }

        // 前 |order| 个位置强制覆盖对应字符集。
        let mut chars: Vec<char> = (0..wildcard_count)
            .map(|i| {
                let set = if i < order.len() {
                    order[i]
                } else {
                    order[rng.random_range(0..order.len())]
                };
                set[rng.random_range(0..set.len())]
            })
            .collect();
        chars.shuffle(rng);

        trace!(sets = order.len(), wildcard_count, "coverage pool sampled");
        Ok(Self::from_chars(chars))
    }

    fn from_chars(chars: Vec<char>) -> Self {
        Self { chars, cursor: 0 }
    }

    /// Next unconsumed character, or `None` once the pool is drained.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.chars.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(ch)
    }

    #[cfg(test)]
    fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Characters not yet handed out by [`CoveragePool::next`].
    pub fn remaining(&self) -> usize {
        self.chars.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    const UPPER: &[char] = &['A', 'B', 'C'];
    const DIGITS: &[char] = &['1', '2', '3', '4'];
    const BRACKETS: &[char] = &['(', ')'];

    #[test]
    fn every_set_is_covered() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..500 {
            let pool = CoveragePool::sample(&[UPPER, DIGITS, BRACKETS], 3, &mut rng).unwrap();
            assert_eq!(pool.remaining(), 3);
            for set in [UPPER, DIGITS, BRACKETS] {
                assert!(pool.as_slice().iter().any(|c| set.contains(c)), "{:?}", pool);
            }
        }
    }

    #[test]
    fn forced_picks_are_not_front_loaded() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut first_positions = HashSet::new();
        for _ in 0..200 {
            let pool = CoveragePool::sample(&[UPPER, DIGITS], 8, &mut rng).unwrap();
            first_positions.insert(UPPER.contains(&pool.as_slice()[0]));
        }
        assert_eq!(first_positions.len(), 2, "首位字符应该来自不同的字符集");
    }

    #[test]
    fn all_members_eventually_appear() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..300 {
            let pool = CoveragePool::sample(&[UPPER, DIGITS], 4, &mut rng).unwrap();
            seen.extend(pool.as_slice().iter().copied());
        }
        for ch in UPPER.iter().chain(DIGITS) {
            assert!(seen.contains(ch), "字符 {ch} 从未出现");
        }
    }

    #[test]
    fn short_pool_covers_random_subset() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut covered = HashSet::new();
        for _ in 0..200 {
            let pool = CoveragePool::sample(&[UPPER, DIGITS, BRACKETS], 1, &mut rng).unwrap();
            let ch = pool.as_slice()[0];
            covered.insert([UPPER, DIGITS, BRACKETS].iter().position(|s| s.contains(&ch)));
        }
        assert_eq!(covered.len(), 3);
    }

    #[test]
    fn cursor_drains_in_order() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut pool = CoveragePool::sample(&[DIGITS], 3, &mut rng).unwrap();
        let expected = pool.as_slice().to_vec();
        let drained: Vec<char> = std::iter::from_fn(|| pool.next()).collect();
        assert_eq!(drained, expected);
        assert_eq!(pool.remaining(), 0);
        assert_eq!(pool.next(), None);
    }

    #[test]
    fn no_sets_with_wildcards_fails() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(
            CoveragePool::sample(&[], 2, &mut rng),
            Err(Error::NoEligibleCategories)
        );
        assert!(CoveragePool::sample(&[], 0, &mut rng).unwrap().remaining() == 0);
    }
}
