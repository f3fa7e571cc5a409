//! Translates lesson shaders written in the WebGL `ShaderMaterial` dialect into
//! GLSL 450 that naga (and therefore `wgpu`) accepts.
//!
//! Lessons are authored the way the browser library expects them: bare
//! `uniform` declarations, `varying` links between stages, `gl_FragColor`, and
//! the implicit `position`/`uv` attributes plus camera matrices. The
//! translation keeps the lesson body intact and wraps it:
//!
//! ```text
//!   lesson.vert ─▶ strip #version/precision/builtin uniforms ─▶ varyings → `out`
//!                                         │
//!                                         └─▶ VERTEX_HEADER + body
//!   lesson.frag ─▶ same stripping ─▶ varyings → `in` (locations from vertex)
//!                                         │
//!                                         └─▶ FRAGMENT_HEADER + body + FRAGMENT_FOOTER
//! ```
//!
//! The uniform block layout must match [`MaterialUniforms`](crate::gpu::MaterialUniforms).

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;
use wgpu::naga::{self, ShaderStage};

use crate::types::ShaderProgram;

/// Uniform names provided by the injected material block.
const BUILTIN_UNIFORMS: [&str; 8] = [
    "projectionMatrix",
    "modelViewMatrix",
    "modelMatrix",
    "viewMatrix",
    "u_color",
    "u_mouse",
    "u_resolution",
    "u_time",
];

/// Vertex attributes the plane mesh feeds to every lesson.
const BUILTIN_ATTRIBUTES: [&str; 3] = ["position", "normal", "uv"];

const LESSON_MAIN: &str = "shaderbook_lesson_main";
const FRAG_COLOR: &str = "shaderbook_FragColor";
const FRAG_COORD: &str = "shaderbook_FragCoord";

/// Pipeline stage a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn naga(self) -> ShaderStage {
        match self {
            Stage::Vertex => ShaderStage::Vertex,
            Stage::Fragment => ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader declares unsupported uniform `{name}` on line {line}; only u_time, u_mouse, u_resolution, u_color and the camera matrices are bound")]
    UnsupportedUniform {
        stage: Stage,
        name: String,
        line: usize,
    },

    #[error("{stage} shader has a malformed varying declaration on line {line}: `{text}`")]
    MalformedVarying {
        stage: Stage,
        line: usize,
        text: String,
    },

    #[error("fragment varying `{name}` is never declared by the vertex shader")]
    UnmatchedVarying { name: String },

    #[error("varying `{name}` is `{vertex}` in the vertex shader but `{fragment}` in the fragment shader")]
    VaryingTypeMismatch {
        name: String,
        vertex: String,
        fragment: String,
    },

    #[error("{stage} shader does not define `main`")]
    MissingMain { stage: Stage },

    #[error("failed to parse {stage} shader:\n{message}")]
    Parse { stage: Stage, message: String },

    #[error("{stage} shader failed validation:\n{message}")]
    Validation { stage: Stage, message: String },

    #[error("GPU rejected {stage} shader: {message}")]
    Device { stage: Stage, message: String },

    #[error("GPU rejected render pipeline `{label}`: {message}")]
    Pipeline { label: String, message: String },
}

/// A `varying` shared between the two stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Varying {
    pub location: u32,
    pub qualifiers: Vec<String>,
    pub ty: String,
    pub name: String,
}

/// Both stages rewritten into GLSL 450.
#[derive(Debug, Clone)]
pub struct TranslatedProgram {
    pub label: String,
    pub vertex: String,
    pub fragment: String,
    pub varyings: Vec<Varying>,
}

impl TranslatedProgram {
    pub fn source(&self, stage: Stage) -> &str {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }
}

/// Rewrites a lesson program into stage sources naga can compile.
pub fn translate_program(program: &ShaderProgram) -> Result<TranslatedProgram, ShaderError> {
    let vertex_source = strip_comments(&program.vertex);
    let fragment_source = strip_comments(&program.fragment);
    let vertex_lines = sanitize(Stage::Vertex, &vertex_source)?;
    let fragment_lines = sanitize(Stage::Fragment, &fragment_source)?;
    for (stage, lines) in [(Stage::Vertex, &vertex_lines), (Stage::Fragment, &fragment_lines)] {
        if !defines_main(lines) {
            return Err(ShaderError::MissingMain { stage });
        }
    }

    let varyings: Vec<Varying> = vertex_lines
        .iter()
        .filter_map(|line| match line {
            Line::Varying(decl) => Some(decl.clone()),
            _ => None,
        })
        .enumerate()
        .map(|(index, decl)| Varying {
            location: index as u32,
            qualifiers: decl.qualifiers,
            ty: decl.ty,
            name: decl.name,
        })
        .collect();

    let mut vertex_body = String::new();
    for line in &vertex_lines {
        match line {
            Line::Code(text) => push_line(&mut vertex_body, text),
            Line::Varying(decl) => {
                let varying = varyings
                    .iter()
                    .find(|varying| varying.name == decl.name)
                    .ok_or_else(|| ShaderError::UnmatchedVarying {
                        name: decl.name.clone(),
                    })?;
                push_line(&mut vertex_body, &declare_varying(varying, "out"));
            }
            Line::Dropped => push_line(&mut vertex_body, ""),
        }
    }

    let mut fragment_body = String::new();
    for line in &fragment_lines {
        match line {
            Line::Code(text) => push_line(&mut fragment_body, text),
            Line::Varying(decl) => {
                let varying = varyings
                    .iter()
                    .find(|varying| varying.name == decl.name)
                    .ok_or_else(|| ShaderError::UnmatchedVarying {
                        name: decl.name.clone(),
                    })?;
                if varying.ty != decl.ty {
                    return Err(ShaderError::VaryingTypeMismatch {
                        name: decl.name.clone(),
                        vertex: varying.ty.clone(),
                        fragment: decl.ty.clone(),
                    });
                }
                push_line(&mut fragment_body, &declare_varying(varying, "in"));
            }
            Line::Dropped => push_line(&mut fragment_body, ""),
        }
    }

    let fragment_body = rename_identifier(&fragment_body, "main", LESSON_MAIN);
    let fragment_body = rename_identifier(&fragment_body, "gl_FragColor", FRAG_COLOR);
    let fragment_body = rename_identifier(&fragment_body, "gl_FragCoord", FRAG_COORD);

    Ok(TranslatedProgram {
        label: program.label.clone(),
        vertex: format!("{VERTEX_HEADER}\n{vertex_body}"),
        fragment: format!("{FRAGMENT_HEADER}\n{fragment_body}{FRAGMENT_FOOTER}"),
        varyings,
    })
}

/// Translates and runs both stages through naga's GLSL front end and validator.
///
/// This needs no GPU, so the CLI and tests use it to check lessons up front.
pub fn validate_program(program: &ShaderProgram) -> Result<TranslatedProgram, ShaderError> {
    let translated = translate_program(program)?;
    for stage in [Stage::Vertex, Stage::Fragment] {
        validate_stage(stage, translated.source(stage))?;
    }
    Ok(translated)
}

fn validate_stage(stage: Stage, source: &str) -> Result<naga::Module, ShaderError> {
    let mut frontend = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options::from(stage.naga());
    let module = frontend
        .parse(&options, source)
        .map_err(|err| ShaderError::Parse {
            stage,
            message: err.emit_to_string(source),
        })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|err| ShaderError::Validation {
            stage,
            message: err.emit_to_string(source),
        })?;
    Ok(module)
}

/// Creates both shader modules on the device, surfacing GPU-side failures as
/// errors instead of letting the device error handler panic.
pub(crate) fn create_shader_modules(
    device: &wgpu::Device,
    translated: &TranslatedProgram,
) -> Result<(wgpu::ShaderModule, wgpu::ShaderModule), ShaderError> {
    let vertex = create_module(device, translated, Stage::Vertex)?;
    let fragment = create_module(device, translated, Stage::Fragment)?;
    Ok((vertex, fragment))
}

fn create_module(
    device: &wgpu::Device,
    translated: &TranslatedProgram,
    stage: Stage,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let label = format!("{} {stage}", translated.label);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(translated.source(stage).to_string()),
            stage: stage.naga(),
            defines: &[],
        },
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(ShaderError::Device {
            stage,
            message: err.to_string(),
        });
    }
    Ok(module)
}

#[derive(Debug, Clone)]
struct VaryingDecl {
    qualifiers: Vec<String>,
    ty: String,
    name: String,
}

#[derive(Debug)]
enum Line<'a> {
    Code(&'a str),
    Varying(VaryingDecl),
    /// Kept as an empty line so the body keeps its line count.
    Dropped,
}

fn sanitize(stage: Stage, source: &str) -> Result<Vec<Line<'_>>, ShaderError> {
    let mut lines = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let trimmed = line.trim_start();
        let statement = trimmed.trim_end();

        if trimmed.starts_with("#version") || statement.starts_with("precision ") {
            lines.push(Line::Dropped);
            continue;
        }

        if statement.starts_with("uniform ") {
            for name in declared_names(statement) {
                if !BUILTIN_UNIFORMS.contains(&name.as_str()) {
                    return Err(ShaderError::UnsupportedUniform {
                        stage,
                        name,
                        line: number,
                    });
                }
            }
            lines.push(Line::Dropped);
            continue;
        }

        if statement.starts_with("attribute ") {
            let names = declared_names(statement);
            if stage == Stage::Vertex
                && names
                    .iter()
                    .all(|name| BUILTIN_ATTRIBUTES.contains(&name.as_str()))
            {
                lines.push(Line::Dropped);
                continue;
            }
        }

        let tokens: Vec<&str> = statement.split_whitespace().collect();
        if tokens.contains(&"varying") {
            let decl = parse_varying(&tokens).ok_or_else(|| ShaderError::MalformedVarying {
                stage,
                line: number,
                text: statement.to_string(),
            })?;
            lines.push(Line::Varying(decl));
            continue;
        }

        lines.push(Line::Code(line));
    }
    Ok(lines)
}

fn defines_main(lines: &[Line<'_>]) -> bool {
    lines.iter().any(|line| match line {
        Line::Code(text) => contains_identifier(text, "main"),
        _ => false,
    })
}

/// Blanks out `//` and `/* */` comments. Newlines inside block comments are
/// kept so line numbers in errors still match the lesson source.
fn strip_comments(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('/', Some('/')) => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                output.push(' ');
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        output.push('\n');
                    }
                    previous = next;
                }
            }
            _ => output.push(c),
        }
    }
    output
}

/// Extracts the variable names from `uniform`/`attribute` style declarations,
/// including comma-separated lists and array suffixes.
fn declared_names(statement: &str) -> Vec<String> {
    let body = statement.trim_end_matches(';');
    let mut parts = body.split(',');
    let mut names = Vec::new();
    if let Some(first) = parts.next() {
        if let Some(last) = first.split_whitespace().last() {
            names.push(last.to_string());
        }
    }
    for part in parts {
        names.push(part.trim().to_string());
    }
    names
        .into_iter()
        .map(|name| match name.find('[') {
            Some(index) => name[..index].trim().to_string(),
            None => name,
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn parse_varying(tokens: &[&str]) -> Option<VaryingDecl> {
    let position = tokens.iter().position(|token| *token == "varying")?;
    let qualifiers = tokens[..position]
        .iter()
        .map(|token| token.to_string())
        .collect();
    let rest: Vec<&str> = tokens[position + 1..]
        .iter()
        .copied()
        .filter(|token| !matches!(*token, "lowp" | "mediump" | "highp"))
        .collect();

    let (ty, name) = match rest.as_slice() {
        [ty, name] => (*ty, name.trim_end_matches(';')),
        [ty, name, ";"] => (*ty, *name),
        _ => return None,
    };
    if name.is_empty() || name.contains(',') || name.contains('[') || !is_identifier(name) {
        return None;
    }
    Some(VaryingDecl {
        qualifiers,
        ty: ty.to_string(),
        name: name.to_string(),
    })
}

fn declare_varying(varying: &Varying, direction: &str) -> String {
    let mut declaration = format!("layout(location = {}) ", varying.location);
    for qualifier in &varying.qualifiers {
        declaration.push_str(qualifier);
        declaration.push(' ');
    }
    declaration.push_str(&format!("{direction} {} {};", varying.ty, varying.name));
    declaration
}

fn push_line(buffer: &mut String, line: &str) {
    buffer.push_str(line);
    buffer.push('\n');
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn identifier_spans(source: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let bytes = source.as_bytes();
    let mut index = 0;
    std::iter::from_fn(move || {
        while index < bytes.len() {
            let byte = bytes[index];
            if byte.is_ascii_alphabetic() || byte == b'_' {
                let start = index;
                while index < bytes.len()
                    && (bytes[index].is_ascii_alphanumeric() || bytes[index] == b'_')
                {
                    index += 1;
                }
                return Some((start, index));
            }
            if byte.is_ascii_digit() {
                // Skip numeric literals so suffixes such as `1e5` are not read as identifiers.
                while index < bytes.len()
                    && (bytes[index].is_ascii_alphanumeric() || bytes[index] == b'.')
                {
                    index += 1;
                }
                continue;
            }
            index += 1;
        }
        None
    })
}

fn contains_identifier(source: &str, name: &str) -> bool {
    identifier_spans(source).any(|(start, end)| &source[start..end] == name)
}

/// Replaces whole-identifier occurrences of `from` with `to`.
fn rename_identifier(source: &str, from: &str, to: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for (start, end) in identifier_spans(source) {
        if &source[start..end] == from {
            output.push_str(&source[cursor..start]);
            output.push_str(to);
            cursor = end;
        }
    }
    output.push_str(&source[cursor..]);
    output
}

/// Uniform block shared by both stages. Member names carry a leading
/// underscore so the alias macros never expand inside the block itself.
macro_rules! material_block {
    () => {
        r"layout(std140, set = 0, binding = 0) uniform ShaderbookMaterial {
    mat4 _projectionMatrix;
    mat4 _modelViewMatrix;
    mat4 _modelMatrix;
    mat4 _viewMatrix;
    vec3 _u_color;
    vec2 _u_mouse;
    vec2 _u_resolution;
    float _u_time;
} shaderbook_material;

#define projectionMatrix shaderbook_material._projectionMatrix
#define modelViewMatrix shaderbook_material._modelViewMatrix
#define modelMatrix shaderbook_material._modelMatrix
#define viewMatrix shaderbook_material._viewMatrix
#define u_color shaderbook_material._u_color
#define u_mouse shaderbook_material._u_mouse
#define u_resolution shaderbook_material._u_resolution
#define u_time shaderbook_material._u_time
"
    };
}

/// GLSL prologue injected ahead of every lesson vertex shader.
const VERTEX_HEADER: &str = concat!(
    "#version 450\n\n",
    material_block!(),
    r"
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;
layout(location = 2) in vec2 uv;
"
);

/// GLSL prologue injected ahead of every lesson fragment shader.
const FRAGMENT_HEADER: &str = concat!(
    "#version 450\n\n",
    material_block!(),
    r"
layout(location = 0) out vec4 shaderbook_FragColor;
vec4 shaderbook_FragCoord;
"
);

/// Remaps `gl_FragCoord` to a bottom-left origin, then runs the lesson body.
const FRAGMENT_FOOTER: &str = r"
void main() {
    shaderbook_FragCoord = vec4(
        gl_FragCoord.x,
        u_resolution.y - gl_FragCoord.y,
        gl_FragCoord.z,
        gl_FragCoord.w
    );
    shaderbook_lesson_main();
}
";

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r"
        varying vec2 v_uv;
        varying vec3 v_position;

        void main() {
            v_uv = uv;
            v_position = position;
            gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
        }
    ";

    const FRAGMENT: &str = r"
        uniform vec3 u_color;
        uniform vec2 u_mouse;
        uniform vec2 u_resolution;
        uniform float u_time;

        varying vec3 v_position;

        float rect(vec2 pt, vec2 size, vec2 center) {
            vec2 p = pt - center;
            vec2 halfsize = size * 0.5;
            float horiz = step(-halfsize.x, p.x) - step(halfsize.x, p.x);
            float vert = step(-halfsize.y, p.y) - step(halfsize.y, p.y);
            return horiz * vert;
        }

        void main() {
            float in_rect = rect(v_position.xy, vec2(1.0), vec2(0.0));
            vec3 color = vec3(1.0, 1.0, 0.0) * in_rect;
            gl_FragColor = vec4(color, 1.0);
        }
    ";

    fn program(vertex: &str, fragment: &str) -> ShaderProgram {
        ShaderProgram::new("test", vertex, fragment)
    }

    #[test]
    fn strips_builtin_uniforms_and_keeps_body() {
        let translated = translate_program(&program(VERTEX, FRAGMENT)).unwrap();
        assert!(!translated.fragment.contains("uniform vec3 u_color"));
        assert!(!translated.fragment.contains("uniform float u_time"));
        assert!(translated.fragment.contains("float rect(vec2 pt"));
        assert!(translated.fragment.contains("void shaderbook_lesson_main()"));
        assert!(translated.fragment.contains("shaderbook_FragColor = vec4(color, 1.0);"));
        assert!(!translated.fragment.contains("gl_FragColor"));
    }

    #[test]
    fn assigns_varying_locations_from_vertex_order() {
        let translated = translate_program(&program(VERTEX, FRAGMENT)).unwrap();
        assert_eq!(translated.varyings.len(), 2);
        assert_eq!(translated.varyings[0].name, "v_uv");
        assert_eq!(translated.varyings[1].location, 1);
        assert!(translated
            .vertex
            .contains("layout(location = 1) out vec3 v_position;"));
        assert!(translated
            .fragment
            .contains("layout(location = 1) in vec3 v_position;"));
    }

    #[test]
    fn rejects_fragment_varying_missing_from_vertex() {
        let fragment = "varying vec2 v_uv;\nvoid main() { gl_FragColor = vec4(v_uv, 0.0, 1.0); }";
        let vertex = "void main() { gl_Position = vec4(position, 1.0); }";
        let err = translate_program(&program(vertex, fragment)).unwrap_err();
        assert!(matches!(err, ShaderError::UnmatchedVarying { name } if name == "v_uv"));
    }

    #[test]
    fn rejects_varying_type_mismatch() {
        let vertex = "varying vec3 v_uv;\nvoid main() { v_uv = position; gl_Position = vec4(position, 1.0); }";
        let fragment = "varying vec2 v_uv;\nvoid main() { gl_FragColor = vec4(v_uv, 0.0, 1.0); }";
        let err = translate_program(&program(vertex, fragment)).unwrap_err();
        assert!(matches!(err, ShaderError::VaryingTypeMismatch { .. }));
    }

    #[test]
    fn rejects_unknown_uniforms_with_line_number() {
        let fragment = "\nuniform sampler2D u_texture;\nvoid main() { gl_FragColor = vec4(1.0); }";
        let err = translate_program(&program(VERTEX, fragment)).unwrap_err();
        match err {
            ShaderError::UnsupportedUniform { stage, name, line } => {
                assert_eq!(stage, Stage::Fragment);
                assert_eq!(name, "u_texture");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn commented_out_declarations_are_left_alone() {
        let fragment = "// uniform sampler2D u_texture;\n// varying vec2 v_missing;\nvoid main() { gl_FragColor = vec4(1.0); }";
        assert!(translate_program(&program(VERTEX, fragment)).is_ok());
    }

    #[test]
    fn drops_version_precision_and_attributes() {
        let vertex = "#version 100\nprecision mediump float;\nattribute vec3 position;\nvoid main() { gl_Position = vec4(position, 1.0); }";
        let fragment = "precision highp float;\nvoid main() { gl_FragColor = vec4(1.0); }";
        let translated = translate_program(&program(vertex, fragment)).unwrap();
        assert!(!translated.vertex.contains("#version 100"));
        assert!(!translated.vertex.contains("precision mediump"));
        assert!(!translated.vertex.contains("attribute vec3 position"));
        assert!(!translated.fragment.contains("precision highp"));
    }

    #[test]
    fn block_comments_are_ignored() {
        let fragment = "/* uniform sampler2D u_tex; */\n/*\nuniform sampler2D u_other;\n*/\nuniform sampler2D u_bad;\nvoid main() { gl_FragColor = vec4(1.0); }";
        let err = translate_program(&program(VERTEX, fragment)).unwrap_err();
        match err {
            ShaderError::UnsupportedUniform { name, line, .. } => {
                assert_eq!(name, "u_bad");
                assert_eq!(line, 5);
            }
            other => panic!("unexpected error: {other}"),
        }

        let fragment = "/* uniform sampler2D u_tex; */\nvoid main() { gl_FragColor = vec4(1.0); /* main */ }";
        assert!(translate_program(&program(VERTEX, fragment)).is_ok());
    }

    #[test]
    fn missing_main_is_reported() {
        let err = translate_program(&program("void helper() {}", FRAGMENT)).unwrap_err();
        assert!(matches!(err, ShaderError::MissingMain { stage: Stage::Vertex }));

        let fragment = "varying vec3 v_position;\n// void main() {}\nvoid helper() {}";
        let err = translate_program(&program(VERTEX, fragment)).unwrap_err();
        assert!(matches!(err, ShaderError::MissingMain { stage: Stage::Fragment }));
    }

    #[test]
    fn rename_only_touches_whole_identifiers() {
        let renamed = rename_identifier("void main() { main_color = 1e5; domain(); }", "main", "x");
        assert_eq!(renamed, "void x() { main_color = 1e5; domain(); }");
    }

    #[test]
    fn declared_names_handles_lists_and_arrays() {
        assert_eq!(
            declared_names("uniform highp float u_time, u_speed[2];"),
            vec!["u_time".to_string(), "u_speed".to_string()]
        );
    }

    #[test]
    fn translated_program_passes_naga_validation() {
        validate_program(&program(VERTEX, FRAGMENT)).expect("program validates");
    }

    #[test]
    fn naga_reports_parse_errors_per_stage() {
        let fragment = "void main() { gl_FragColor = vec4(1.0) }";
        let err = validate_program(&program(VERTEX, fragment)).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Parse {
                stage: Stage::Fragment,
                ..
            }
        ));
    }
}
