/// WebGL2 pipeline for drawing a lit mesh
use orbview_core::lighting::{LIGHT_COLOR, SPECULAR_COLOR, SURFACE_COLOR};
use orbview_core::{FrameUniforms, Mesh};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = include_str!("shaders/mesh.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/mesh.frag");

// must match the layout qualifiers in mesh.vert
const POSITION_LOCATION: u32 = 0;
const NORMAL_LOCATION: u32 = 1;

const CLEAR_COLOR: [f32; 4] = [0.7, 0.5, 0.9, 1.0];

struct Uniforms {
    world_view_projection: Option<WebGlUniformLocation>,
    world: Option<WebGlUniformLocation>,
    light_rotation: Option<WebGlUniformLocation>,
    light_position: Option<WebGlUniformLocation>,
    view_position: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
    specular_color: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &Gl, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            world_view_projection: at("u_worldViewProjection"),
            world: at("u_world"),
            light_rotation: at("u_lightRotation"),
            light_position: at("u_lightWorldPosition"),
            view_position: at("u_viewWorldPosition"),
            shininess: at("u_shininess"),
            color: at("u_color"),
            light_color: at("u_lightColor"),
            specular_color: at("u_specularColor"),
        }
    }
}

/// Compiled program plus the currently uploaded mesh
pub struct GlRenderer {
    gl: Gl,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    position_buffer: WebGlBuffer,
    normal_buffer: WebGlBuffer,
    uniforms: Uniforms,
    vertex_count: i32,
}

impl GlRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, String> {
        let gl = canvas
            .get_context("webgl2")
            .map_err(|_| "failed to query a WebGL2 context".to_string())?
            .ok_or("WebGL2 is not available in this browser")?
            .dyn_into::<Gl>()
            .map_err(|_| "canvas context is not WebGL2".to_string())?;

        let vertex = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let vao = gl.create_vertex_array().ok_or("unable to create vertex array")?;
        let position_buffer = gl.create_buffer().ok_or("unable to create position buffer")?;
        let normal_buffer = gl.create_buffer().ok_or("unable to create normal buffer")?;
        let uniforms = Uniforms::locate(&gl, &program);

        gl.enable(Gl::DEPTH_TEST);

        Ok(Self {
            gl,
            program,
            vao,
            position_buffer,
            normal_buffer,
            uniforms,
            vertex_count: 0,
        })
    }

    /// Replace the vertex buffers with `mesh`
    pub fn upload(&mut self, mesh: &Mesh) {
        let gl = &self.gl;
        gl.bind_vertex_array(Some(&self.vao));
        upload_attribute(gl, &self.position_buffer, POSITION_LOCATION, 3, &mesh.positions);
        upload_attribute(gl, &self.normal_buffer, NORMAL_LOCATION, 3, &mesh.vertex_normals());
        gl.bind_vertex_array(None);

        self.vertex_count = mesh.vertex_count() as i32;
        log::debug!("uploaded {} vertices", self.vertex_count);
    }

    pub fn draw(&self, frame: &FrameUniforms, width: u32, height: u32) {
        let gl = &self.gl;
        let u = &self.uniforms;

        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], CLEAR_COLOR[3]);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        let wvp = u.world_view_projection.as_ref();
        gl.uniform_matrix4fv_with_f32_array(wvp, false, &frame.world_view_projection);
        gl.uniform_matrix4fv_with_f32_array(u.world.as_ref(), false, &frame.world);
        let light_rotation = u.light_rotation.as_ref();
        gl.uniform_matrix4fv_with_f32_array(light_rotation, false, &frame.light_rotation);
        gl.uniform3fv_with_f32_array(u.light_position.as_ref(), &frame.light_position);
        gl.uniform3fv_with_f32_array(u.view_position.as_ref(), &frame.view_position);
        gl.uniform1f(u.shininess.as_ref(), frame.shininess);
        gl.uniform4fv_with_f32_array(u.color.as_ref(), &SURFACE_COLOR);
        gl.uniform3fv_with_f32_array(u.light_color.as_ref(), &LIGHT_COLOR);
        gl.uniform3fv_with_f32_array(u.specular_color.as_ref(), &SPECULAR_COLOR);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(Gl::TRIANGLES, 0, self.vertex_count);
        gl.bind_vertex_array(None);
    }
}

fn upload_attribute(gl: &Gl, buffer: &WebGlBuffer, location: u32, size: i32, data: &[f32]) {
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
    let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
    gl.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, &bytes, Gl::STATIC_DRAW);
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, Gl::FLOAT, false, 0, 0);
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, String> {
    let shader = gl.create_shader(kind).ok_or("unable to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error compiling shader".to_string()))
    }
}

fn link_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, String> {
    let program = gl.create_program().ok_or("unable to create program")?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error linking program".to_string()))
    }
}
