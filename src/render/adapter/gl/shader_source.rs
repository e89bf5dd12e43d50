// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! GLSL sources without the `#version` line, which `GlShader::new` prepends.
//! The Phong pair lives in `assets/shaders` and is read at start-up.

/// Position only, one mvp matrix
pub const BASIC_VERTEX_SRC: &str = r#"
            layout(location = 0) in vec3 aPos;

            uniform mat4 mvp;

            void main()
            {
                gl_Position = mvp * vec4(aPos, 1.0);
            }
        "#;

pub const BASIC_FRAGMENT_SRC: &str = r#"
            precision highp float;

            out vec4 FragColor;

            uniform vec4 color;

            void main()
            {
                FragColor = color;
            }
        "#;

/// Full screen quad, texture coordinates remapped into `area`
pub const GENERAL2D_VERTEX_SRC: &str = r#"
            precision highp float;

            layout(location = 0) in vec3 aPos;
            layout(location = 2) in vec2 aTexCoord;

            out vec2 TexCoord;

            uniform mat4 transform;
            uniform vec4 area;       // x, y, width, height in uv space

            void main()
            {
                TexCoord = vec2(
                    mix(area.x, area.x + area.z, aTexCoord.x),
                    mix(area.y, area.y + area.w, aTexCoord.y)
                );
                gl_Position = transform * vec4(aPos.xy, 0.0, 1.0);
            }
        "#;

pub const GENERAL2D_FRAGMENT_SRC: &str = r#"
            precision highp float;

            out vec4 FragColor;
            in vec2 TexCoord;

            uniform sampler2D texture1;
            uniform vec4 color;

            void main()
            {
                FragColor = texture(texture1, TexCoord) * color;
            }
        "#;
