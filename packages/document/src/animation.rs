//! Declarative animations attached to nodes through `props.animations`.

use crate::styles::StyleMap;
use serde::{Deserialize, Serialize};

/// What starts an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationTrigger {
    OnLoad,
    OnScroll,
    OnHover,
    OnClick,
    Continuous,
}

/// A single point on an animation timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position on the timeline, 0.0 ..= 1.0
    pub time: f32,
    #[serde(default)]
    pub properties: StyleMap,
}

impl Keyframe {
    pub fn new(time: f32, properties: StyleMap) -> Self {
        Self { time, properties }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationOptions {
    /// Duration in milliseconds
    #[serde(default = "default_duration")]
    pub duration: u32,

    /// Delay in milliseconds
    #[serde(default)]
    pub delay: u32,

    #[serde(default = "default_easing")]
    pub easing: String,

    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looped: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    /// Scroll animations only: play again every time the element re-enters
    /// the viewport instead of once.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rearm: bool,
}

fn default_duration() -> u32 {
    600
}

fn default_easing() -> String {
    "ease-out".to_string()
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            delay: 0,
            easing: default_easing(),
            looped: None,
            direction: None,
            rearm: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub id: String,
    pub name: String,
    pub trigger: AnimationTrigger,
    #[serde(default)]
    pub timeline: Vec<Keyframe>,
    #[serde(default)]
    pub options: AnimationOptions,
}

impl Animation {
    /// An animation that renders from the preset library by `name`.
    pub fn preset(id: impl Into<String>, name: impl Into<String>, trigger: AnimationTrigger) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trigger,
            timeline: Vec::new(),
            options: AnimationOptions::default(),
        }
    }

    pub fn with_timeline(mut self, timeline: Vec<Keyframe>) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn with_options(mut self, options: AnimationOptions) -> Self {
        self.options = options;
        self
    }

    /// Name of the generated `@keyframes` block.
    pub fn keyframes_name(&self) -> String {
        format!("animation-{}", self.id)
    }

    pub fn is_looping(&self) -> bool {
        self.trigger == AnimationTrigger::Continuous || self.options.looped == Some(true)
    }
}
