use crate::conversation::Turn;
use crate::templates::Templates;
use crate::vocabulary::{RoleLabel, Seeds, INITIATING_ROLE};

/// The system prompt sent with every request.
pub fn system_prompt() -> &'static str {
    include_str!("../prompts/system.md").trim()
}

/// The pitch that opens a round: mission, roster, then the seeded ask.
pub fn opening_prompt(templates: &Templates, seeds: &Seeds) -> String {
    format!(
        "{mission}\n\nRoles:\n{roles}\n\n{INITIATING_ROLE}: Pitch a creative, out-of-the-box core concept for an app in {niche} with {constraint}. Use {hook} for inspiration. Be wildly innovative but ground in real-world feasibility with analogies to existing successes.",
        mission = templates.mission,
        roles = templates.roles,
        niche = seeds.niche,
        constraint = seeds.constraint,
        hook = seeds.hook,
    )
}

/// A follow-up sees only the previous turn, then the critique ask for `role`.
pub fn follow_up_prompt(previous: Option<&Turn>, role: &RoleLabel) -> String {
    let history = previous.map(Turn::to_string).unwrap_or_default();
    format!(
        "{history}\n{role}: Critique deeply, add creative twists, and enhance feasibility with real-world examples, market data analogies, risk math, and step-by-step validation. Rate overall viability 1-10 with justification. Push for innovation while keeping it realistic."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> Templates {
        Templates {
            mission: "MISSION".to_string(),
            roles: "ROSTER".to_string(),
        }
    }

    #[test]
    fn system_prompt_is_trimmed() {
        let system = system_prompt();
        assert!(system.starts_with("Build progressively"));
        assert!(!system.ends_with('\n'));
    }

    #[test]
    fn opening_names_seeds_and_initiator() {
        let seeds = Seeds {
            niche: "quote APIs",
            constraint: "no database",
            hook: "Make it viral with shareable outputs.",
        };
        let prompt = opening_prompt(&templates(), &seeds);
        assert!(prompt.starts_with("MISSION\n\nRoles:\nROSTER\n\nALPHA IDEA_GEN: Pitch"));
        assert!(prompt.contains("an app in quote APIs with no database."));
        assert!(prompt.contains("Use Make it viral with shareable outputs. for inspiration."));
    }

    #[test]
    fn follow_up_carries_only_previous_turn() {
        let previous = Turn {
            role: RoleLabel::from("DELTA UX"),
            text: "make onboarding one tap".to_string(),
        };
        let prompt = follow_up_prompt(Some(&previous), &RoleLabel::from("ALPHA ECON"));
        assert!(prompt.starts_with("DELTA UX: make onboarding one tap\nALPHA ECON: Critique deeply"));
        assert!(prompt.contains("Rate overall viability 1-10"));
    }

    #[test]
    fn follow_up_without_history() {
        let prompt = follow_up_prompt(None, &RoleLabel::from("DELTA SCALE"));
        assert!(prompt.starts_with("\nDELTA SCALE: Critique deeply"));
    }
}
