//! CSS side of the code generator.
//!
//! - [`style`]: property naming and responsive rule emission
//! - [`base`]: reset and theme blocks that open every stylesheet
//! - [`animation`]: keyframes, trigger rules and the runtime script that
//!   drives scroll and click triggers
//!
//! Everything here is a pure function of its input; output order is fixed
//! so the same tree always yields the same bytes.

pub mod animation;
pub mod base;
pub mod style;

pub use animation::{
    animation_declaration, keyframes_css, preset_keyframes, runtime_script, scroll_hidden_css,
    trigger_css, trigger_rules, PRESET_NAMES, SCROLL_CLASS,
};
pub use base::{default_theme, is_safe_css_token, theme_block, RESET_CSS};
pub use style::{render_rule, resolve_styles, responsive_rules, to_kebab_case, CssRule};
