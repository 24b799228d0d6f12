//! Seed vocabularies and the role pool that drive each round.

use rand::prelude::*;

/// Niches an idea can be pitched into.
pub const NICHES: &[&str] = &[
    "crypto alerts",
    "weather widgets",
    "stock trackers",
    "meme generators",
    "niche RSS feeds",
    "affiliate bots",
    "micro-task automators",
    "quote APIs",
    "data aggregators",
    "AI wrappers",
];

/// Constraints the idea must live within.
pub const CONSTRAINTS: &[&str] = &[
    "under 30 LOC",
    "no database",
    "serverless only",
    "crypto-integrated",
    "ad-free monetization",
    "SEO-driven",
    "affiliate-only",
    "open-data reliant",
];

/// Creative hooks offered as inspiration.
pub const HOOKS: &[&str] = &[
    "What if we flipped [common app] on its head?",
    "Inspired by [real example like Honeygain or BOINC], but lighter.",
    "Target underserved niche like [devs/gamers/freelancers].",
    "Make it viral with shareable outputs.",
];

/// The role that makes the opening pitch of every round.
pub const INITIATING_ROLE: &str = "ALPHA IDEA_GEN";

/// The follow-up pool.  Duplicates weight the draw toward ethics and tech review.
pub const FOLLOW_UP_ROLES: &[&str] = &[
    "DELTA ETHICS",
    "ALPHA TECH",
    "DELTA UX",
    "ALPHA ECON",
    "DELTA SCALE",
    "ALPHA IDEA_GEN",
    "DELTA ETHICS",
    "ALPHA TECH",
];

///////////////////////////////////////////// RoleLabel ////////////////////////////////////////////

/// A persona tag attached to a turn, e.g. `DELTA ETHICS`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RoleLabel(String);

impl RoleLabel {
    /// The role that opens every round.
    pub fn initiating() -> Self {
        Self(INITIATING_ROLE.to_string())
    }

    /// The label as written into prompts and idea files.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The team is the first word of the label: `ALPHA` or `DELTA`.
    pub fn team(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or("")
    }
}

impl From<&str> for RoleLabel {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl std::fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/////////////////////////////////////////////// Seeds //////////////////////////////////////////////

/// The niche, constraint, and hook chosen for one round.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Seeds {
    /// Where the app lives.
    pub niche: &'static str,
    /// What the app must respect.
    pub constraint: &'static str,
    /// What the pitch should riff on.
    pub hook: &'static str,
}

impl Seeds {
    /// Draw each seed uniformly from its vocabulary.
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            niche: pick(rng, NICHES),
            constraint: pick(rng, CONSTRAINTS),
            hook: pick(rng, HOOKS),
        }
    }
}

fn pick(rng: &mut impl Rng, vocabulary: &'static [&'static str]) -> &'static str {
    // The vocabularies are non-empty constants.
    vocabulary.choose(rng).copied().unwrap_or_default()
}

///////////////////////////////////////////// RoundPlan ////////////////////////////////////////////

/// Everything random about a round, decided up front.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundPlan {
    /// The seeds for the opening pitch.
    pub seeds: Seeds,
    /// The follow-up pool, shuffled once for this round.
    pub roles: Vec<RoleLabel>,
}

impl RoundPlan {
    /// Draw the seeds, then shuffle the follow-up pool.
    ///
    /// The pool is shuffled exactly once; follow-ups walk it cyclically.
    pub fn draw(rng: &mut impl Rng) -> Self {
        let seeds = Seeds::draw(rng);
        let mut roles: Vec<RoleLabel> = FOLLOW_UP_ROLES
            .iter()
            .map(|r| RoleLabel::from(*r))
            .collect();
        roles.shuffle(rng);
        Self { seeds, roles }
    }

    /// The role for the `index`-th follow-up (zero-based).
    pub fn role_for(&self, index: usize) -> &RoleLabel {
        &self.roles[index % self.roles.len()]
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn team_is_first_word() {
        assert_eq!("ALPHA", RoleLabel::initiating().team());
        assert_eq!("DELTA", RoleLabel::from("DELTA ETHICS").team());
        assert_eq!("", RoleLabel::from("").team());
    }

    #[test]
    fn seeds_come_from_vocabularies() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let seeds = Seeds::draw(&mut rng);
            assert!(NICHES.contains(&seeds.niche));
            assert!(CONSTRAINTS.contains(&seeds.constraint));
            assert!(HOOKS.contains(&seeds.hook));
        }
    }

    #[test]
    fn same_seed_same_plan() {
        let mut a = StdRng::seed_from_u64(0xc0ffee);
        let mut b = StdRng::seed_from_u64(0xc0ffee);
        for _ in 0..8 {
            assert_eq!(RoundPlan::draw(&mut a), RoundPlan::draw(&mut b));
        }
    }

    #[test]
    fn plan_is_a_permutation_of_the_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = RoundPlan::draw(&mut rng);
        let mut got: Vec<&str> = plan.roles.iter().map(RoleLabel::as_str).collect();
        let mut want: Vec<&str> = FOLLOW_UP_ROLES.to_vec();
        got.sort();
        want.sort();
        assert_eq!(want, got);
    }

    #[test]
    fn role_for_cycles_without_reshuffle() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = RoundPlan::draw(&mut rng);
        let len = plan.roles.len();
        for i in 0..len {
            assert_eq!(plan.role_for(i), plan.role_for(i + len));
            assert_eq!(plan.role_for(i), plan.role_for(i + 2 * len));
        }
    }
}
