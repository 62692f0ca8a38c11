/// orbview Web - WASM bindings for the browser viewer
///
/// The page owns the canvas and the DOM listeners; it forwards pointer, wheel and
/// key events here and calls `render` once per animation frame.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

pub mod gl;
pub mod logger;
pub mod viewer;

use gl::GlRenderer;
pub use viewer::ViewerState;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Uniform values for a single frame
#[wasm_bindgen]
pub struct Frame {
    inner: orbview_core::FrameUniforms,
}

#[wasm_bindgen]
impl Frame {
    /// Column-major `mat4`
    #[wasm_bindgen(getter, js_name = worldViewProjection)]
    pub fn world_view_projection(&self) -> Vec<f32> {
        self.inner.world_view_projection.to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn world(&self) -> Vec<f32> {
        self.inner.world.to_vec()
    }

    #[wasm_bindgen(getter, js_name = lightRotation)]
    pub fn light_rotation(&self) -> Vec<f32> {
        self.inner.light_rotation.to_vec()
    }

    #[wasm_bindgen(getter, js_name = lightPosition)]
    pub fn light_position(&self) -> Vec<f32> {
        self.inner.light_position.to_vec()
    }

    #[wasm_bindgen(getter, js_name = viewPosition)]
    pub fn view_position(&self) -> Vec<f32> {
        self.inner.view_position.to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn shininess(&self) -> f32 {
        self.inner.shininess
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    state: ViewerState,
    canvas: Option<HtmlCanvasElement>,
    renderer: Option<GlRenderer>,
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebViewer, JsValue> {
        let state = ViewerState::default();
        log::info!("orbview ready with {} models", state.model_names().len());
        Ok(WebViewer {
            state,
            canvas: None,
            renderer: None,
        })
    }

    /// Attach to the canvas with the given id and build the WebGL2 pipeline
    pub fn init(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;

        let mut renderer = GlRenderer::new(&canvas).map_err(to_js)?;
        if let Some(mesh) = self.state.current_mesh() {
            renderer.upload(mesh);
        }

        self.canvas = Some(canvas);
        self.renderer = Some(renderer);
        self.resize();
        Ok(())
    }

    /// Match the drawing buffer to the canvas's displayed size
    pub fn resize(&mut self) {
        if let Some(canvas) = &self.canvas {
            canvas.set_width(canvas.client_width().max(1) as u32);
            canvas.set_height(canvas.client_height().max(1) as u32);
        }
    }

    #[wasm_bindgen(js_name = modelNames)]
    pub fn model_names(&self) -> Vec<String> {
        self.state.model_names()
    }

    #[wasm_bindgen(js_name = selectModel)]
    pub fn select_model(&mut self, index: usize) -> Result<(), JsValue> {
        if !self.state.select(index) {
            return Err(JsValue::from_str(&format!("no model at index {}", index)));
        }
        self.upload_current();
        Ok(())
    }

    #[wasm_bindgen(js_name = selectModelByName)]
    pub fn select_model_by_name(&mut self, name: &str) -> Result<usize, JsValue> {
        let index = self.state.select_by_name(name).map_err(to_js)?;
        self.upload_current();
        Ok(index)
    }

    /// Parse OBJ text (e.g. fetched by the page) and display it
    #[wasm_bindgen(js_name = loadModel)]
    pub fn load_model(&mut self, name: &str, text: &str) -> Result<usize, JsValue> {
        let index = self.state.load(name, text).map_err(|e| {
            log::warn!("rejected model '{}': {}", name, e);
            to_js(e)
        })?;
        self.upload_current();
        Ok(index)
    }

    /// Vertex attributes of the displayed model
    pub fn positions(&self) -> Vec<f32> {
        self.state.current_mesh().map(|m| m.positions.clone()).unwrap_or_default()
    }

    pub fn normals(&self) -> Vec<f32> {
        self.state.current_mesh().map(|m| m.normals.clone()).unwrap_or_default()
    }

    pub fn texcoords(&self) -> Vec<f32> {
        self.state.current_mesh().map(|m| m.texcoords.clone()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.state.current_mesh().map_or(0, |m| m.vertex_count())
    }

    /// Update a panel setting by key; returns the clamped value
    #[wasm_bindgen(js_name = setSetting)]
    pub fn set_setting(&mut self, key: &str, value: f32) -> Result<f32, JsValue> {
        self.state
            .set_setting(key, value)
            .ok_or_else(|| JsValue::from_str(&format!("unknown setting '{}'", key)))
    }

    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.state.controls.mouse_down(x, y);
    }

    #[wasm_bindgen(js_name = mouseUp)]
    pub fn mouse_up(&mut self) {
        self.state.controls.mouse_up();
    }

    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let width = self.canvas.as_ref().map_or(f32::INFINITY, |c| c.width() as f32);
        self.state.controls.mouse_move(x, y, width);
    }

    /// Legacy `wheelDelta` units: positive when rolled away from the user
    pub fn wheel(&mut self, delta: f32) {
        self.state.controls.wheel(delta);
    }

    /// Handle a `KeyboardEvent.code`; returns whether the key was used
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, code: &str) -> bool {
        self.state.key_down(code)
    }

    /// Uniforms for the next frame, for pages that drive their own pipeline
    pub fn frame(&self, aspect: f32) -> Frame {
        Frame {
            inner: self.state.frame(aspect),
        }
    }

    /// Draw one frame into the attached canvas
    pub fn render(&mut self) -> Result<(), JsValue> {
        let (Some(canvas), Some(renderer)) = (&self.canvas, &self.renderer) else {
            return Err(JsValue::from_str("viewer is not attached to a canvas; call init first"));
        };
        let (width, height) = (canvas.width().max(1), canvas.height().max(1));
        let frame = self.state.frame(width as f32 / height as f32);
        renderer.draw(&frame, width, height);
        Ok(())
    }
}

impl WebViewer {
    /// Push the selected model's buffers to the GPU, if attached
    fn upload_current(&mut self) {
        if let (Some(renderer), Some(mesh)) = (self.renderer.as_mut(), self.state.current_mesh()) {
            renderer.upload(mesh);
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    logger::init(log::LevelFilter::Info);
    Ok(())
}
