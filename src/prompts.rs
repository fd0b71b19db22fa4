//! Instruction templates and request builders for the two request kinds.
//!
//! Both system instructions are static: the art-director instruction carries
//! the category taxonomy and per-category keyword lists for first-time
//! generation, the editor instruction governs rewrites. Builders only
//! assemble payloads; they never inspect the eventual response.

use crate::error::PromptError;
use crate::ports::completion::CompletionRequest;

/// Upper bound on generated output tokens for both request kinds.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// Sampling temperature for first-time generation. Refinement leaves the
/// endpoint default in place.
pub const GENERATION_TEMPERATURE: f32 = 0.6;

/// The uniform technical style phrase appended to every generated prompt,
/// regardless of detected category.
pub const STYLE_PHRASE: &str = "hyper-realistic, 8k resolution, cinematic lighting, \
     photorealistic, highly detailed, shallow depth of field, \
     commercial stock photography, shot on a 35mm lens";

/// Category taxonomy with the keywords that must be woven into the output
/// when the category is detected.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Finance & Business", &["corporate", "growth chart", "boardroom", "city skyline", "professional attire"]),
    ("Commodities & Energy", &["oil rig", "gold bullion", "power grid", "wind turbines", "industrial scale"]),
    ("Beauty, Spa & Wellness", &["serene", "soft natural skin", "spa stones", "minimalist", "pastel tones"]),
    ("Travel & Hotel", &["wanderlust", "infinity pool", "golden hour", "luxury suite", "iconic landmark"]),
    ("Food & Restaurant", &["appetizing", "fresh ingredients", "rustic wooden table", "garnish", "rising steam"]),
    ("Lifestyle", &["candid", "authentic moment", "urban backdrop", "cozy interior", "natural light"]),
    ("Health & Fitness", &["athletic", "dynamic motion", "modern gym", "determination", "morning run"]),
    ("Abstract & 3D", &["geometric", "clean render", "smooth gradient", "layered depth", "futuristic"]),
];

/// Build the static art-director system instruction.
fn art_director_instruction() -> String {
    let mut instruction = String::from(
        "You are an elite stock photography art director. Analyze the reference \
         image and write a premium generative AI prompt for a matching stock photo.\n\n\
         CATEGORY DETECTION - classify the image into exactly one of:\n",
    );
    for (category, keywords) in CATEGORIES {
        instruction.push_str(&format!("- {category}: {}\n", keywords.join(", ")));
    }
    instruction.push_str(&format!(
        "\nKEYWORD INJECTION: weave the detected category's keywords into the prompt.\n\
         VISUAL STYLE: always end with \"{STYLE_PHRASE}\".\n\n\
         OUTPUT: a single cohesive paragraph. Start with the subject. \
         No introduction, no closing commentary.",
    ));
    instruction
}

/// Static editor instruction for the refine request kind.
const EDITOR_INSTRUCTION: &str = "You are a professional prompt editor. \
     Your goal is to REWRITE the stock photography prompt based on the user's feedback.\n\n\
     RULES:\n\
     1. Keep the core subject and technical style markers (8k, hyper-realistic) of the original prompt.\n\
     2. APPLY the user's specific instruction strictly (e.g., change lighting, add texture, change mood).\n\
     3. Output the FULL corrected prompt, not just the changes.\n\
     4. Do not talk to the user. Just output the prompt.";

/// Build a first-time generation request for an encoded reference image.
#[must_use]
pub fn generation_request(model: &str, image_data_url: String) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        system: art_director_instruction(),
        user_text: "Generate a detailed stock photo prompt.".to_string(),
        image_data_url: Some(image_data_url),
        max_output_tokens: MAX_OUTPUT_TOKENS,
        temperature: Some(GENERATION_TEMPERATURE),
    }
}

/// Build a refinement request from a prior prompt and a user instruction.
///
/// # Errors
///
/// Returns [`PromptError::EmptyInstruction`] if the instruction is empty or
/// whitespace-only. This fires before any request exists, so no network call
/// can be made with an empty instruction.
pub fn refinement_request(
    model: &str,
    original: &str,
    instruction: &str,
) -> Result<CompletionRequest, PromptError> {
    if instruction.trim().is_empty() {
        return Err(PromptError::EmptyInstruction);
    }

    let user_text = format!(
        "ORIGINAL PROMPT: \"{original}\"\n\n\
         USER INSTRUCTION: \"{instruction}\"\n\n\
         Rewrite the prompt to incorporate the instruction while maintaining \
         high stock photo quality.",
    );

    Ok(CompletionRequest {
        model: model.to_string(),
        system: EDITOR_INSTRUCTION.to_string(),
        user_text,
        image_data_url: None,
        max_output_tokens: MAX_OUTPUT_TOKENS,
        temperature: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_request_carries_image_and_sampling_config() {
        let request = generation_request("gpt-4o", "data:image/jpeg;base64,AAAA".into());
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.image_data_url.as_deref(), Some("data:image/jpeg;base64,AAAA"));
        assert_eq!(request.max_output_tokens, MAX_OUTPUT_TOKENS);
        assert_eq!(request.temperature, Some(GENERATION_TEMPERATURE));
    }

    #[test]
    fn generation_instruction_lists_every_category() {
        let request = generation_request("gpt-4o", String::new());
        for (category, keywords) in CATEGORIES {
            assert!(request.system.contains(category), "missing category {category}");
            for keyword in *keywords {
                assert!(request.system.contains(keyword), "missing keyword {keyword}");
            }
        }
    }

    #[test]
    fn generation_instruction_embeds_style_phrase() {
        let request = generation_request("gpt-4o", String::new());
        assert!(request.system.contains(STYLE_PHRASE));
        assert!(request.system.contains("single cohesive paragraph"));
    }

    #[test]
    fn refinement_request_carries_original_and_instruction() {
        let request =
            refinement_request("gpt-4o", "A corporate boardroom.", "change lighting to golden hour")
                .unwrap();
        assert!(request.user_text.contains("A corporate boardroom."));
        assert!(request.user_text.contains("change lighting to golden hour"));
        assert!(request.image_data_url.is_none());
        assert!(request.temperature.is_none(), "refine must leave temperature unset");
    }

    #[test]
    fn refinement_requires_full_rewrite() {
        let request = refinement_request("gpt-4o", "original", "add texture").unwrap();
        assert!(request.system.contains("FULL corrected prompt"));
    }

    #[test]
    fn empty_instruction_is_rejected() {
        assert!(matches!(
            refinement_request("gpt-4o", "original", ""),
            Err(PromptError::EmptyInstruction)
        ));
    }

    #[test]
    fn whitespace_instruction_is_rejected() {
        assert!(matches!(
            refinement_request("gpt-4o", "original", "   \n\t "),
            Err(PromptError::EmptyInstruction)
        ));
    }
}
