//! Prompt constants for turning freeform text into infographic content.
//!
//! The model is asked for a single JSON object; callers parse it with
//! `parse_structured_content`, which also tolerates code fences.

pub const EXTRACT_SYSTEM: &str = "\
You are an information designer. You turn a piece of freeform text into the \
content of a one-page vertical infographic.\n\
\n\
Respond with valid JSON only, shaped exactly like:\n\
{\"title\": \"...\", \"overview\": \"...\", \"statistics\": [\"...\", \"...\", \"...\"], \
\"flowchart\": [{\"title\": \"...\", \"description\": \"...\"}, ...]}\n\
Do NOT use markdown code fences. Do NOT add any explanation outside the JSON object.";

pub const EXTRACT_PROMPT_TEMPLATE: &str = "\
Summarize the text below as infographic content.\n\
\n\
RULES:\n\
1. \"title\": at most 8 words, no trailing punctuation\n\
2. \"overview\": 2 to 3 plain sentences, at most 60 words\n\
3. \"statistics\": exactly 3 short facts, each containing a number from the text. \
Omit the field entirely if the text has no figures\n\
4. \"flowchart\": exactly 5 sequential steps, each with a title of at most 4 words \
and a description of at most 15 words. Omit the field entirely if the text \
describes no process\n\
5. Use only information present in the text. Do NOT invent figures\n\
\n\
TEXT:\n\
{raw_text}\n\
\n\
Return JSON only.";
