//! Animation output: keyframes, trigger rules and the runtime script.
//!
//! Every animation gets its own `@keyframes animation-<id>` block, built from
//! its explicit timeline or, when the timeline is empty, from the preset
//! library by name. How the keyframes are started depends on the trigger:
//!
//! | trigger      | rule                          | runtime                        |
//! |--------------|-------------------------------|--------------------------------|
//! | `onLoad`     | `selector { animation }`      | none                           |
//! | `continuous` | `selector { animation }`      | none, iteration is `infinite`  |
//! | `onHover`    | `selector:hover { animation }`| none                           |
//! | `onScroll`   | `selector.in-view { ... }`    | shared IntersectionObserver    |
//! | `onClick`    | `selector.is-clicked { ... }` | click listener restarting it   |
//!
//! Scroll animations are one-shot: the observer stops watching an element
//! once it has entered the viewport. Elements marked `data-scroll-rearm`
//! keep being observed and lose `in-view` again when they leave.

use crate::style::{to_kebab_case, CssRule};
use pagesmith_document::{style_map, Animation, AnimationTrigger, Keyframe};
use tracing::debug;

/// Class carried by elements with a scroll-triggered animation.
pub const SCROLL_CLASS: &str = "animate-on-scroll";

/// Names understood by [`preset_keyframes`].
pub const PRESET_NAMES: &[&str] = &[
    "fadeIn",
    "fadeInUp",
    "fadeInDown",
    "slideInLeft",
    "slideInRight",
    "zoomIn",
    "bounce",
    "pulse",
    "spin",
    "shake",
];

fn frame<'a>(time: f32, properties: impl IntoIterator<Item = (&'a str, &'a str)>) -> Keyframe {
    Keyframe::new(time, style_map(properties))
}

/// Keyframes of a named preset. Unknown names fall back to `fadeIn`.
pub fn preset_keyframes(name: &str) -> Vec<Keyframe> {
    match name {
        "fadeInUp" => vec![
            frame(0.0, [("opacity", "0"), ("transform", "translateY(20px)")]),
            frame(1.0, [("opacity", "1"), ("transform", "translateY(0)")]),
        ],
        "fadeInDown" => vec![
            frame(0.0, [("opacity", "0"), ("transform", "translateY(-20px)")]),
            frame(1.0, [("opacity", "1"), ("transform", "translateY(0)")]),
        ],
        "slideInLeft" => vec![
            frame(0.0, [("opacity", "0"), ("transform", "translateX(-100%)")]),
            frame(1.0, [("opacity", "1"), ("transform", "translateX(0)")]),
        ],
        "slideInRight" => vec![
            frame(0.0, [("opacity", "0"), ("transform", "translateX(100%)")]),
            frame(1.0, [("opacity", "1"), ("transform", "translateX(0)")]),
        ],
        "zoomIn" => vec![
            frame(0.0, [("opacity", "0"), ("transform", "scale(0.8)")]),
            frame(1.0, [("opacity", "1"), ("transform", "scale(1)")]),
        ],
        "bounce" => vec![
            frame(0.0, [("transform", "translateY(0)")]),
            frame(0.4, [("transform", "translateY(-20px)")]),
            frame(0.6, [("transform", "translateY(-10px)")]),
            frame(1.0, [("transform", "translateY(0)")]),
        ],
        "pulse" => vec![
            frame(0.0, [("transform", "scale(1)")]),
            frame(0.5, [("transform", "scale(1.05)")]),
            frame(1.0, [("transform", "scale(1)")]),
        ],
        "spin" => vec![
            frame(0.0, [("transform", "rotate(0deg)")]),
            frame(1.0, [("transform", "rotate(360deg)")]),
        ],
        "shake" => vec![
            frame(0.0, [("transform", "translateX(0)")]),
            frame(0.25, [("transform", "translateX(-10px)")]),
            frame(0.5, [("transform", "translateX(10px)")]),
            frame(0.75, [("transform", "translateX(-10px)")]),
            frame(1.0, [("transform", "translateX(0)")]),
        ],
        other => {
            if other != "fadeIn" {
                debug!(preset = other, "unknown animation preset, using fadeIn");
            }
            vec![
                frame(0.0, [("opacity", "0")]),
                frame(1.0, [("opacity", "1")]),
            ]
        }
    }
}

fn percentage(time: f32) -> String {
    let pct = (time.clamp(0.0, 1.0) * 10000.0).round() / 100.0;
    format!("{}%", pct)
}

/// `@keyframes animation-<id> { ... }` for one animation.
pub fn keyframes_css(animation: &Animation) -> String {
    let mut frames = if animation.timeline.is_empty() {
        preset_keyframes(&animation.name)
    } else {
        animation.timeline.clone()
    };
    frames.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut css = format!("@keyframes {} {{\n", animation.keyframes_name());
    for keyframe in &frames {
        css.push_str("  ");
        css.push_str(&percentage(keyframe.time));
        css.push_str(" {\n");
        for (property, value) in &keyframe.properties {
            css.push_str("    ");
            css.push_str(&to_kebab_case(property));
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }
        css.push_str("  }\n");
    }
    css.push_str("}\n\n");
    css
}

/// Value of the `animation` shorthand:
/// `<name> <duration> <easing> <delay> <iterations> <direction> both`.
pub fn animation_declaration(animation: &Animation) -> String {
    let options = &animation.options;
    let iterations = if animation.is_looping() { "infinite" } else { "1" };
    let direction = options.direction.as_deref().unwrap_or("normal");
    format!(
        "{} {}ms {} {}ms {} {} both",
        animation.keyframes_name(),
        options.duration,
        options.easing,
        options.delay,
        iterations,
        direction
    )
}

fn trigger_selector(selector: &str, trigger: AnimationTrigger) -> String {
    match trigger {
        AnimationTrigger::OnLoad | AnimationTrigger::Continuous => selector.to_string(),
        AnimationTrigger::OnHover => format!("{}:hover", selector),
        AnimationTrigger::OnScroll => format!("{}.in-view", selector),
        AnimationTrigger::OnClick => format!("{}.is-clicked", selector),
    }
}

/// Rules that start a node's animations.
///
/// Animations sharing a trigger selector are combined into one
/// comma-separated `animation` declaration, so none overrides another.
pub fn trigger_rules(selector: &str, animations: &[Animation]) -> Vec<CssRule> {
    let mut rules: Vec<CssRule> = Vec::new();

    for animation in animations {
        let target = trigger_selector(selector, animation.trigger);
        let declaration = animation_declaration(animation);

        match rules.iter_mut().find(|r| r.selector == target) {
            Some(rule) => {
                if let Some((_, value)) = rule.properties.first_mut() {
                    value.push_str(", ");
                    value.push_str(&declaration);
                }
            }
            None => rules.push(CssRule::new(target).with_property("animation", declaration)),
        }
    }

    rules
}

pub fn trigger_css(selector: &str, animations: &[Animation]) -> String {
    trigger_rules(selector, animations)
        .iter()
        .map(CssRule::to_css)
        .collect()
}

/// Hides scroll-animated elements until they first enter the viewport.
pub fn scroll_hidden_css() -> String {
    CssRule::new(format!(".{}:not(.in-view)", SCROLL_CLASS))
        .with_property("opacity", "0")
        .to_css()
}

/// Script wiring scroll and click triggers. Empty when neither is used.
pub fn runtime_script(threshold: f64, has_scroll: bool, has_click: bool) -> String {
    let mut js = String::new();

    if has_scroll {
        let threshold = threshold.clamp(0.0, 1.0);
        js.push_str(&format!(
            r#"(function () {{
  var observer = new IntersectionObserver(function (entries) {{
    entries.forEach(function (entry) {{
      var el = entry.target;
      var rearm = el.hasAttribute('data-scroll-rearm');
      if (entry.isIntersecting) {{
        el.classList.add('in-view');
        if (!rearm) observer.unobserve(el);
      }} else if (rearm) {{
        el.classList.remove('in-view');
      }}
    }});
  }}, {{ threshold: {} }});
  document.querySelectorAll('[data-animate-scroll]').forEach(function (el) {{
    observer.observe(el);
  }});
}})();
"#,
            threshold
        ));
    }

    if has_click {
        js.push_str(
            r#"(function () {
  document.querySelectorAll('[data-animate-click]').forEach(function (el) {
    el.addEventListener('click', function () {
      el.classList.remove('is-clicked');
      void el.offsetWidth;
      el.classList.add('is-clicked');
    });
  });
})();
"#,
        );
    }

    js
}
