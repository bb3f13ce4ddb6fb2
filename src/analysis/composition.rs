use super::pool::CandidatePool;
use crate::error::AppError;
use serde::Serialize;
use std::fmt;

pub const TEAM_SIZE: usize = 5;

/// An unordered team of five, stored with its members sorted so two
/// permutations of the same team compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Composition([String; TEAM_SIZE]);

impl Composition {
    pub fn new<I, S>(members: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members: Vec<String> = members.into_iter().map(Into::into).collect();
        members.sort();

        if members.windows(2).any(|w| w[0] == w[1]) {
            return Err(AppError::InvalidComposition(format!(
                "duplicate champion in {:?}",
                members
            )));
        }

        let members: [String; TEAM_SIZE] = members.try_into().map_err(|v: Vec<String>| {
            AppError::InvalidComposition(format!(
                "expected {} champions, got {}",
                TEAM_SIZE,
                v.len()
            ))
        })?;

        Ok(Composition(members))
    }

    pub fn members(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|m| m == name)
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// C(n, k) without overflow for the pool sizes we deal with.
pub fn combination_count(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
}

/// Lazy iterator over every 5-subset of a pool, in lexicographic order.
pub struct Compositions<'a> {
    names: Vec<&'a String>,
    indices: [usize; TEAM_SIZE],
    remaining: usize,
}

impl<'a> Compositions<'a> {
    pub fn new(pool: &'a CandidatePool) -> Self {
        let names: Vec<&String> = pool.iter().collect();
        let remaining = combination_count(names.len(), TEAM_SIZE);
        Compositions {
            names,
            indices: [0, 1, 2, 3, 4],
            remaining,
        }
    }

    fn advance(&mut self) {
        let n = self.names.len();
        let mut i = TEAM_SIZE;
        while i > 0 {
            i -= 1;
            if self.indices[i] != i + n - TEAM_SIZE {
                self.indices[i] += 1;
                for j in i + 1..TEAM_SIZE {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return;
            }
        }
    }
}

impl Iterator for Compositions<'_> {
    type Item = Composition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Pool names are sorted and indices strictly increase, so members
        // come out already in canonical order.
        let members = std::array::from_fn(|i| self.names[self.indices[i]].clone());
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }

        Some(Composition(members))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Compositions<'_> {}

/// Every 5-champion team buildable from `pool`. Empty when the pool has
/// fewer than five champions.
pub fn enumerate(pool: &CandidatePool) -> Compositions<'_> {
    Compositions::new(pool)
}
