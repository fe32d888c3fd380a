//! Panel derivation: story text in, one composed prompt per panel out.
//!
//! - **divider**: split the story into `count` ordered fragments
//! - **compose**: add position, continuity and style instructions

pub mod compose;
pub mod divider;

pub use compose::{compose_all, compose_panel, style_suffix};
pub use divider::{divide, phase_label, split_sentences};

use crate::types::{GenerationRequest, PanelPrompt};

/// Derive the composed panel prompts for a validated request.
pub fn panel_prompts(request: &GenerationRequest) -> Vec<PanelPrompt> {
    let fragments = divide(&request.prompt, request.count);
    compose_all(&fragments, request.style)
}
