/// Browser-independent viewer state behind the wasm bindings
use orbview_core::{
    frame_uniforms, Command, FrameUniforms, Mesh, Model, ModelLibrary, Result, Setting,
    ViewerControls, ViewerSettings,
};

/// Models, input and settings for one canvas
#[derive(Debug, Clone)]
pub struct ViewerState {
    library: ModelLibrary,
    current: usize,
    pub controls: ViewerControls,
    pub settings: ViewerSettings,
}

impl ViewerState {
    pub fn new(library: ModelLibrary) -> Self {
        Self {
            library,
            current: 0,
            controls: ViewerControls::new(),
            settings: ViewerSettings::default(),
        }
    }

    pub fn model_names(&self) -> Vec<String> {
        self.library.names().map(str::to_string).collect()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_model(&self) -> Option<&Model> {
        self.library.get(self.current)
    }

    pub fn current_mesh(&self) -> Option<&Mesh> {
        self.current_model().map(|m| &m.mesh)
    }

    /// Switch to the model at `index`; returns false when there is none
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.library.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<usize> {
        let (index, _) = self.library.find(name)?;
        self.current = index;
        Ok(index)
    }

    /// Parse `text` as a new model and show it
    pub fn load(&mut self, name: &str, text: &str) -> Result<usize> {
        let index = self.library.insert(name, text)?;
        self.current = index;
        Ok(index)
    }

    /// Apply a panel setting by key; `None` for an unknown key
    pub fn set_setting(&mut self, key: &str, value: f32) -> Option<f32> {
        let setting = key.parse::<Setting>().ok()?;
        Some(self.settings.set(setting, value))
    }

    /// Handle a `KeyboardEvent.code`; returns whether it was consumed
    pub fn key_down(&mut self, code: &str) -> bool {
        match Command::from_key_code(code) {
            Some(command) => {
                self.controls.apply(command);
                true
            }
            None => false,
        }
    }

    pub fn frame(&self, aspect: f32) -> FrameUniforms {
        frame_uniforms(&self.controls.snapshot(&self.settings, aspect))
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(ModelLibrary::builtin())
    }
}
