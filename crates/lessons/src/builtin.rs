//! Lessons compiled into the binary, in teaching order.
//!
//! Each lesson pairs one of three shared vertex shaders with its own fragment
//! shader: `plane.vert` only positions the plane, `uv.vert` forwards `v_uv`,
//! and `position.vert` forwards the untransformed `v_position`.
use crate::{Lesson, LessonOrigin};

const PLANE_VERT: &str = include_str!("../shaders/plane.vert");
const UV_VERT: &str = include_str!("../shaders/uv.vert");
const POSITION_VERT: &str = include_str!("../shaders/position.vert");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinLesson {
    pub name: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub tags: &'static [&'static str],
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl BuiltinLesson {
    pub fn to_lesson(&self) -> Lesson {
        Lesson {
            name: self.name.to_string(),
            title: self.title.to_string(),
            summary: self.summary.to_string(),
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            vertex: self.vertex.to_string(),
            fragment: self.fragment.to_string(),
            color: None,
            origin: LessonOrigin::Builtin,
        }
    }
}

pub const BUILTIN_LESSONS: &[BuiltinLesson] = &[
    BuiltinLesson {
        name: "bare-loop",
        title: "The render loop",
        summary: "Fill the plane with u_color on every frame",
        tags: &["uniforms"],
        vertex: PLANE_VERT,
        fragment: include_str!("../shaders/bare-loop.frag"),
    },
    BuiltinLesson {
        name: "mouse-color",
        title: "Colour from the mouse",
        summary: "Map u_mouse / u_resolution to red and blue",
        tags: &["uniforms", "mouse"],
        vertex: PLANE_VERT,
        fragment: include_str!("../shaders/mouse-color.frag"),
    },
    BuiltinLesson {
        name: "time-color",
        title: "Colour from time",
        summary: "Cycle the channels with sin, atan and cos of u_time",
        tags: &["uniforms", "time"],
        vertex: PLANE_VERT,
        fragment: include_str!("../shaders/time-color.frag"),
    },
    BuiltinLesson {
        name: "gradient",
        title: "Gradient",
        summary: "Mix red into blue along gl_FragCoord.y / u_resolution.y",
        tags: &["mix", "fragcoord"],
        vertex: PLANE_VERT,
        fragment: include_str!("../shaders/gradient.frag"),
    },
    BuiltinLesson {
        name: "uv-varying",
        title: "UV varying",
        summary: "Pass uv from the vertex stage and show it as colour",
        tags: &["varying", "uv"],
        vertex: UV_VERT,
        fragment: include_str!("../shaders/uv-varying.frag"),
    },
    BuiltinLesson {
        name: "clamp",
        title: "clamp",
        summary: "Clamp the plane position into the colour range",
        tags: &["varying", "clamp"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/clamp.frag"),
    },
    BuiltinLesson {
        name: "step",
        title: "step",
        summary: "Hard edges along the x and y axes",
        tags: &["varying", "step"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/step.frag"),
    },
    BuiltinLesson {
        name: "smoothstep",
        title: "smoothstep",
        summary: "Soft edges along the x and y axes",
        tags: &["varying", "smoothstep"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/smoothstep.frag"),
    },
    BuiltinLesson {
        name: "circle",
        title: "Circle",
        summary: "A yellow disc from length() and step()",
        tags: &["shapes", "step"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/circle.frag"),
    },
    BuiltinLesson {
        name: "rectangle",
        title: "Rectangle",
        summary: "A yellow square from four step() edges",
        tags: &["shapes", "step"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/rectangle.frag"),
    },
    BuiltinLesson {
        name: "moving-rectangle",
        title: "Moving rectangle",
        summary: "Drive the rectangle centre around a circle with u_time",
        tags: &["shapes", "time"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/moving-rectangle.frag"),
    },
    BuiltinLesson {
        name: "rotation",
        title: "Rotation",
        summary: "Spin a rectangle with a mat2 rotation",
        tags: &["shapes", "transforms", "time"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/rotation.frag"),
    },
    BuiltinLesson {
        name: "scale",
        title: "Scale",
        summary: "Pulse a rectangle with a mat2 scale",
        tags: &["shapes", "transforms", "time"],
        vertex: POSITION_VERT,
        fragment: include_str!("../shaders/scale.frag"),
    },
    BuiltinLesson {
        name: "tiling",
        title: "Tiling",
        summary: "Repeat a breathing circle across a grid with fract()",
        tags: &["shapes", "tiling", "time"],
        vertex: UV_VERT,
        fragment: include_str!("../shaders/tiling.frag"),
    },
];

pub fn find_builtin(name: &str) -> Option<&'static BuiltinLesson> {
    BUILTIN_LESSONS.iter().find(|lesson| lesson.name == name)
}

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_LESSONS.iter().map(|lesson| lesson.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::is_slug;

    #[test]
    fn teaching_order_is_stable() {
        let names: Vec<_> = builtin_names().collect();
        assert_eq!(
            names,
            [
                "bare-loop",
                "mouse-color",
                "time-color",
                "gradient",
                "uv-varying",
                "clamp",
                "step",
                "smoothstep",
                "circle",
                "rectangle",
                "moving-rectangle",
                "rotation",
                "scale",
                "tiling",
            ]
        );
    }

    #[test]
    fn names_are_unique_slugs() {
        for (index, lesson) in BUILTIN_LESSONS.iter().enumerate() {
            assert!(is_slug(lesson.name), "{}", lesson.name);
            assert!(
                BUILTIN_LESSONS[index + 1..]
                    .iter()
                    .all(|other| other.name != lesson.name),
                "duplicate lesson {}",
                lesson.name
            );
        }
    }

    #[test]
    fn every_builtin_validates() {
        for lesson in BUILTIN_LESSONS {
            let program = lesson.to_lesson().to_program();
            if let Err(err) = renderer::validate_program(&program) {
                panic!("lesson `{}` failed to validate: {err}", lesson.name);
            }
        }
    }

    #[test]
    fn shape_lessons_share_position_varying() {
        let circle = renderer::translate_program(&find_builtin("circle").unwrap().to_lesson().to_program())
            .unwrap();
        assert_eq!(circle.varyings.len(), 1);
        assert_eq!(circle.varyings[0].name, "v_position");
        assert_eq!(circle.varyings[0].ty, "vec3");
    }

    #[test]
    fn unknown_builtin_is_none() {
        assert!(find_builtin("triangle").is_none());
        assert_eq!(find_builtin("step").map(|lesson| lesson.title), Some("step"));
    }
}
