//! Prompt and part assembly for generation requests
//!
//! The part order is fixed: base image, then reference, object and mask
//! images when present, then the composed instruction text. Image
//! references in the instruction use ordinals derived from the actual
//! part positions, so adding or removing an optional image can never
//! point the text at the wrong image.

use lumina_ipc::{DataUri, GenerationRequest};

use crate::wire::Part;

/// Instruction sent with suggestion requests
pub const SUGGESTION_INSTRUCTION: &str = "Analyze this interior room image. Identify specific furniture, materials, and colors present. Generate 3 distinct, actionable design instructions that a user could give to an AI to redesign this specific room. \n\nExamples of good output:\n- \"Replace the beige carpet with light oak flooring\"\n- \"Change the wooden cabinets to matte black\"\n- \"Add a large abstract painting to the empty white wall\"\n\nKeep them short (max 15 words) and direct. Return as a JSON list of strings.";

/// Build the full part list for a generation request: images in order,
/// instruction text last
pub fn build_parts(request: &GenerationRequest) -> Vec<Part> {
    let mut parts = vec![Part::image(&request.base_image)];
    for image in [&request.reference_image, &request.object_image, &request.mask_image]
        .into_iter()
        .flatten()
    {
        parts.push(Part::image(image));
    }
    parts.push(Part::text(compose_instruction(request)));
    parts
}

/// Build the parts for a suggestion request
pub fn suggestion_parts(base_image: &DataUri) -> Vec<Part> {
    vec![Part::image(base_image), Part::text(SUGGESTION_INSTRUCTION)]
}

/// Compose the instruction text for a generation request
pub fn compose_instruction(request: &GenerationRequest) -> String {
    let mut text = format!(
        "Redesign the room shown in the first image.\nTarget Style: {}.",
        request.style
    );

    if !request.prompt.trim().is_empty() {
        text.push_str(&format!("\nUser Instructions: {}.", request.prompt));
    }

    // Image ordinals follow part order: base, reference, object, mask
    let mut next_ordinal = 2;

    if request.reference_image.is_some() {
        let ord = ordinal_word(next_ordinal);
        next_ordinal += 1;
        text.push_str(&format!(
            "\nThe {ord} image is a style reference. Adopt its color palette, lighting, and materials for the redesign."
        ));
    }

    if request.object_image.is_some() {
        let ord = ordinal_word(next_ordinal);
        text.push_str(&format!(
            "\nThe {ord} image shows a specific object (e.g. furniture or decor). Place this object into the room in a natural position"
        ));
        if request.mask_image.is_some() || request.region_hint.is_some() {
            text.push_str(" within the selected area or where appropriate based on the surface.");
        } else {
            text.push_str(" blending it with the perspective and lighting.");
        }
    }

    if request.mask_image.is_some() {
        text.push_str(
            "\nThe last image is a mask. The non-transparent brush strokes indicate the exact area you must modify. Keep everything outside this mask exactly as it is in the original image.",
        );
    } else if let Some(hint) = &request.region_hint {
        text.push_str(&format!("\n\nFocus changes on this area: {hint}"));
    }

    text.push_str(
        "\nRequirements:\n- Output a high-quality, photorealistic image.\n- Preserve the structural perspective.\n- Do not output text, only the image.",
    );

    text
}

fn ordinal_word(n: usize) -> &'static str {
    match n {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        _ => "next",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_ipc::DesignStyle;

    fn png(tag: &str) -> DataUri {
        DataUri::from_parts("image/png", tag)
    }

    fn base_request() -> GenerationRequest {
        GenerationRequest::new(png("base"), "add plants", DesignStyle::Scandinavian)
    }

    #[test]
    fn test_minimal_instruction() {
        let text = compose_instruction(&base_request());
        assert!(text.starts_with("Redesign the room shown in the first image."));
        assert!(text.contains("Target Style: Scandinavian."));
        assert!(text.contains("User Instructions: add plants."));
        assert!(text.contains("photorealistic"));
        assert!(!text.contains("style reference"));
    }

    #[test]
    fn test_blank_prompt_omits_instructions_line() {
        let mut request = base_request();
        request.prompt = "   ".to_string();
        let text = compose_instruction(&request);
        assert!(!text.contains("User Instructions"));
    }

    #[test]
    fn test_object_is_second_without_reference() {
        let mut request = base_request();
        request.object_image = Some(png("obj"));
        let text = compose_instruction(&request);
        assert!(text.contains("The second image shows a specific object"));
        assert!(text.contains("blending it with the perspective and lighting."));
    }

    #[test]
    fn test_object_is_third_after_reference() {
        let mut request = base_request();
        request.reference_image = Some(png("ref"));
        request.object_image = Some(png("obj"));
        let text = compose_instruction(&request);
        assert!(text.contains("The second image is a style reference"));
        assert!(text.contains("The third image shows a specific object"));
    }

    #[test]
    fn test_mask_changes_object_placement_wording() {
        let mut request = base_request();
        request.object_image = Some(png("obj"));
        request.mask_image = Some(png("mask"));
        let text = compose_instruction(&request);
        assert!(text.contains("within the selected area or where appropriate"));
        assert!(text.contains("The last image is a mask."));
    }

    #[test]
    fn test_region_hint_used_only_without_mask() {
        let mut request = base_request();
        request.region_hint = Some("the sofa corner".to_string());
        let text = compose_instruction(&request);
        assert!(text.contains("Focus changes on this area: the sofa corner"));

        request.mask_image = Some(png("mask"));
        let text = compose_instruction(&request);
        assert!(!text.contains("Focus changes on this area"));
        assert!(text.contains("The last image is a mask."));
    }

    #[test]
    fn test_parts_order_images_then_text() {
        let mut request = base_request();
        request.reference_image = Some(png("ref"));
        request.mask_image = Some(png("mask"));

        let parts = build_parts(&request);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].inline_data.as_ref().unwrap().data, "base");
        assert_eq!(parts[1].inline_data.as_ref().unwrap().data, "ref");
        assert_eq!(parts[2].inline_data.as_ref().unwrap().data, "mask");
        assert!(parts[3].text.is_some());
    }

    #[test]
    fn test_suggestion_parts() {
        let parts = suggestion_parts(&png("base"));
        assert_eq!(parts.len(), 2);
        assert!(parts[0].inline_data.is_some());
        assert_eq!(parts[1].text.as_deref(), Some(SUGGESTION_INSTRUCTION));
    }
}
