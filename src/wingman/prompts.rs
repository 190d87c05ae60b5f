//! Persona framing for Wingman queries.

/// Instruction block placed ahead of every user query.
pub const WINGMAN_PREAMBLE: &str = "\
You are \"Wingman\", an AI aviation assistant for the WingMentor platform.
Your goal is to assist student pilots and instructors with aviation knowledge, \
regulations (FAA/EASA), weather interpretation, and flight planning.

Maintain a professional, safety-oriented, yet encouraging tone.
Always prioritize safety. If a question is critical to immediate flight safety, \
remind the user to consult their official Flight Operations Manual or instructor.";

/// Label that introduces the raw user query after the preamble.
pub const QUERY_LABEL: &str = "Current User Query: ";

/// Wrap a raw user prompt in the Wingman preamble.
///
/// The prompt is appended verbatim; it is never trimmed or escaped.
pub fn frame_prompt(prompt: &str) -> String {
    let capacity = WINGMAN_PREAMBLE.len() + QUERY_LABEL.len() + prompt.len() + 2;
    let mut framed = String::with_capacity(capacity);
    framed.push_str(WINGMAN_PREAMBLE);
    framed.push_str("\n\n");
    framed.push_str(QUERY_LABEL);
    framed.push_str(prompt);
    framed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framed_prompt_ends_with_raw_query() {
        let prompt = "What is the minimum fuel reserve under VFR?";
        let framed = frame_prompt(prompt);
        assert!(framed.starts_with(WINGMAN_PREAMBLE));
        assert!(framed.ends_with(&format!("{QUERY_LABEL}{prompt}")));
    }

    #[test]
    fn test_preamble_carries_persona_and_safety_policy() {
        assert!(WINGMAN_PREAMBLE.contains("\"Wingman\""));
        assert!(WINGMAN_PREAMBLE.contains("FAA/EASA"));
        assert!(WINGMAN_PREAMBLE.contains("Flight Operations Manual or instructor"));
    }

    #[test]
    fn test_prompt_is_not_trimmed_or_mangled() {
        let prompt = "  METAR KJFK 121651Z 31015G25KT {x} %s \n";
        assert!(frame_prompt(prompt).contains(prompt));
    }

    #[test]
    fn test_blank_prompt_passes_through() {
        assert!(frame_prompt("").ends_with(QUERY_LABEL));
    }
}
