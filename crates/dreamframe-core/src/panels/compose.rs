//! Prompt composition: panel text plus continuity and style instructions.

use crate::types::{PanelPrompt, Style};

/// Instruction appended to every panel so the sequence reads as one story.
const CONTINUITY: &str = "Keep the same protagonist across all panels: same identity, \
face, hair and outfit. Keep the same setting and the same visual style. \
Only the camera framing may change between panels.";

const REALISTIC_SUFFIX: &str = "photorealistic, cinematic lighting, shot on 35mm film, \
natural color grading, shallow depth of field, highly detailed textures";

const COMIC_SUFFIX: &str = "comic book illustration, bold black ink outlines, flat vivid colors, \
Ben-Day dots halftone shading, dynamic composition, speech-bubble-free panel art";

const GHIBLI_SUFFIX: &str = "Studio Ghibli inspired hand-painted animation, soft watercolor \
backgrounds, warm pastel palette, gentle whimsical atmosphere, expressive characters";

/// The fixed aesthetic phrase bank for a style.
pub fn style_suffix(style: Style) -> &'static str {
    match style {
        Style::Realistic => REALISTIC_SUFFIX,
        Style::Comic => COMIC_SUFFIX,
        Style::Ghibli => GHIBLI_SUFFIX,
    }
}

/// Compose the full provider prompt for one panel.
pub fn compose_panel(text: &str, index: usize, total: usize, style: Style) -> PanelPrompt {
    let text = format!(
        "{}\n\nPanel {} of {}. {}\n\n{}",
        text.trim(),
        index + 1,
        total,
        CONTINUITY,
        style_suffix(style)
    );
    PanelPrompt { text, index, total }
}

/// Compose prompts for a whole sequence of panel fragments, in order.
pub fn compose_all(fragments: &[String], style: Style) -> Vec<PanelPrompt> {
    let total = fragments.len();
    fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| compose_panel(fragment, i, total, style))
        .collect()
}
