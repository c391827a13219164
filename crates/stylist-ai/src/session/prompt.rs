//! Reply-stage system instruction.

use crate::profile::Profile;

const ASSISTANT_PERSONA: &str =
    "You are a friendly fashion assistant. Use the user's profile to personalize your advice.";

/// Persona plus the current profile as a bulleted block.
pub(crate) fn reply_instruction(profile: &Profile) -> String {
    format!(
        "{ASSISTANT_PERSONA}\n--- USER PROFILE ---\n{}\n--------------------",
        profile.to_bullets()
    )
}
