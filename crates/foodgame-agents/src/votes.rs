//! Vote tallies for skill-auction rotation and global bid bounds.

use core::marker::PhantomData;

use foodgame_types::{FoodVote, Skill};

/// A category that can be voted for.
pub trait Ballot: Copy + 'static {
    /// Every category, in tally order.
    const CATEGORIES: &'static [Self];

    /// Position of this category in tally order.
    fn position(self) -> usize;
}

impl Ballot for Skill {
    const CATEGORIES: &'static [Self] = &Skill::ALL;

    fn position(self) -> usize {
        self.index()
    }
}

impl Ballot for FoodVote {
    const CATEGORIES: &'static [Self] = &FoodVote::ALL;

    fn position(self) -> usize {
        self.index()
    }
}

/// Per-category vote counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally<B: Ballot> {
    counts: Vec<u32>,
    _ballot: PhantomData<B>,
}

/// Votes for the next auctioned skill.
pub type SkillVoteTally = VoteTally<Skill>;

/// Votes to move the global bid bounds.
pub type FoodVoteTally = VoteTally<FoodVote>;

impl<B: Ballot> VoteTally<B> {
    /// A tally with every counter at zero.
    pub fn new() -> Self {
        Self {
            counts: vec![0; B::CATEGORIES.len()],
            _ballot: PhantomData,
        }
    }

    /// Count one vote.
    pub fn add(&mut self, ballot: B) {
        if let Some(count) = self.counts.get_mut(ballot.position()) {
            *count = count.saturating_add(1);
        }
    }

    /// Votes for one category.
    pub fn get(&self, ballot: B) -> u32 {
        self.counts.get(ballot.position()).copied().unwrap_or(0)
    }

    /// Counters in tally order.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    /// The highest non-zero category, with ties going to the earliest.
    pub fn earliest_leader(&self) -> Option<B> {
        let mut best: Option<(usize, u32)> = None;
        for (i, &count) in self.counts.iter().enumerate() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((i, count));
            }
        }
        best.and_then(|(i, _)| B::CATEGORIES.get(i).copied())
    }

    /// The highest non-zero category, or `None` when two or more share it.
    pub fn unique_leader(&self) -> Option<B> {
        let leader = self.earliest_leader()?;
        let top = self.get(leader);
        let holders = self.counts.iter().filter(|&&c| c == top).count();
        if holders == 1 { Some(leader) } else { None }
    }
}

impl<B: Ballot> Default for VoteTally<B> {
    fn default() -> Self {
        Self::new()
    }
}
