//! Prompt routing
//!
//! A submission is either text-only or image-augmented; each variant has its
//! own fixed template. Parts are assembled in the order the model expects:
//! the student's input first, then the inline image if present, then the
//! template.

use crate::gemini::models::Part;
use bytes::Bytes;

/// Template for text-only submissions
pub const TEXT_PROMPT_TEMPLATE: &str = "\
You are an expert in Maths. Greet the Student as MathSolver if the Student greets.

Start by introducing yourself.

If the Student specifically asks you to solve a problem, reply only with the solution. \
No additional explanation or questions are required unless the Student asks for them.

Explain the Student's query in a clear and engaging manner like a friendly teacher, \
using the image if provided to enhance understanding.

Provide a comprehensive learning experience with the following structure:

\"explanation\": \"Provide a clear and detailed explanation of the Student's query.\",

\"practice_problems_with_realtime\": \"Generate three practice problems based on the \
Student's query with real-time context to make the problems more relatable.\",

\"fun_facts\": \"Share two fun facts or trivia related to the Student's query.\",

\"interactive_question\": \"Ask an interactive question that encourages the student \
to explore the topic further.\"

If the Student asks for practice problems, help them solve the problems and provide \
additional support.

Always refer to yourself as MathSolver. Be concise and clear in your explanations.";

/// Template for image-augmented submissions
pub const IMAGE_PROMPT_TEMPLATE: &str = "\
You are an expert in Maths. Greet the Student as MathSolver if the Student greets.

Start by introducing yourself and discussing the importance and applications of the \
topic shown in daily life.

First analyze the uploaded image to understand the context and content. Then \
incorporate this visual information into your response.

If the Student specifically asks you to solve a problem using the image, reply only \
with the solution. No additional explanation or questions are required unless the \
Student asks for them.

Explain the Student's query in a clear and engaging manner, using the image to \
enhance understanding.";

/// Shown (and recorded) in place of a response when the inference call fails
pub const FALLBACK_RESPONSE: &str = "An error occurred while generating the response.";

/// An uploaded problem image: raw bytes plus the MIME type they arrived with
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Bytes,
}

impl ImageAttachment {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// One submission, tagged by whether an image accompanies the input
#[derive(Debug, Clone)]
pub enum TutorRequest {
    TextOnly { input: String },
    WithImage { input: String, image: ImageAttachment },
}

impl TutorRequest {
    /// The student's raw input text
    pub fn input(&self) -> &str {
        match self {
            Self::TextOnly { input } => input,
            Self::WithImage { input, .. } => input,
        }
    }

    /// The fixed template for this variant
    pub fn template(&self) -> &'static str {
        match self {
            Self::TextOnly { .. } => TEXT_PROMPT_TEMPLATE,
            Self::WithImage { .. } => IMAGE_PROMPT_TEMPLATE,
        }
    }

    /// Assemble the content parts sent to the model
    pub fn to_parts(&self) -> Vec<Part> {
        match self {
            Self::TextOnly { input } => {
                vec![Part::text(input), Part::text(TEXT_PROMPT_TEMPLATE)]
            }
            Self::WithImage { input, image } => vec![
                Part::text(input),
                Part::inline_image(image),
                Part::text(IMAGE_PROMPT_TEMPLATE),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    #[test]
    fn test_text_only_selects_text_template() {
        let request = TutorRequest::TextOnly {
            input: "What is 2x+3=7?".to_string(),
        };
        assert_eq!(request.template(), TEXT_PROMPT_TEMPLATE);
        assert_eq!(request.input(), "What is 2x+3=7?");
    }

    #[test]
    fn test_with_image_selects_image_template() {
        let request = TutorRequest::WithImage {
            input: "Solve this".to_string(),
            image: ImageAttachment::new("image/jpeg", vec![0xff, 0xd8, 0xff]),
        };
        assert_eq!(request.template(), IMAGE_PROMPT_TEMPLATE);
    }

    #[test]
    fn test_text_only_parts_order() {
        let request = TutorRequest::TextOnly {
            input: "What is 2x+3=7?".to_string(),
        };
        let parts = request.to_parts();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].as_text(), Some("What is 2x+3=7?"));
        assert_eq!(parts[1].as_text(), Some(TEXT_PROMPT_TEMPLATE));
    }

    #[test]
    fn test_image_parts_order_and_passthrough() {
        let image_bytes = vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];
        let request = TutorRequest::WithImage {
            input: "Solve this".to_string(),
            image: ImageAttachment::new("image/jpeg", image_bytes.clone()),
        };
        let parts = request.to_parts();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].as_text(), Some("Solve this"));
        assert_eq!(parts[2].as_text(), Some(IMAGE_PROMPT_TEMPLATE));

        // The image part must carry the bytes unmodified
        let inline = parts[1].as_inline_data().expect("inline data part");
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(STANDARD.decode(&inline.data).unwrap(), image_bytes);
    }
}
