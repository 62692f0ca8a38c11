/// Built-in models and the switchable model library
use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::obj::parse_obj;

/// OBJ sources compiled into the binary, in menu order
pub const BUILTIN_MODELS: [(&str, &str); 3] = [
    ("Cube", include_str!("../assets/cube.obj")),
    ("Pyramid", include_str!("../assets/pyramid.obj")),
    ("Octahedron", include_str!("../assets/octahedron.obj")),
];

/// A named, parsed mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub mesh: Mesh,
}

/// Every model the viewer can switch between
#[derive(Debug, Clone, Default)]
pub struct ModelLibrary {
    models: Vec<Model>,
}

impl ModelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the built-in models. A model that fails to parse is left out.
    pub fn builtin() -> Self {
        Self::from_sources(BUILTIN_MODELS)
    }

    pub fn from_sources<I, N, T>(sources: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let mut library = Self::new();
        for (name, text) in sources {
            let name = name.into();
            if let Err(err) = library.insert(name.clone(), text.as_ref()) {
                log::warn!("skipping model '{}': {}", name, err);
            }
        }
        library
    }

    /// Parse and add a model, replacing one with the same name.
    ///
    /// On failure the library is left untouched. Returns the model's index.
    pub fn insert(&mut self, name: impl Into<String>, text: &str) -> Result<usize> {
        let name = name.into();
        let mesh = parse_obj(text)?;
        log::debug!("loaded model '{}' ({} vertices)", name, mesh.vertex_count());

        let model = Model { name, mesh };
        match self.position(&model.name) {
            Some(index) => {
                self.models[index] = model;
                Ok(index)
            }
            None => {
                self.models.push(model);
                Ok(self.models.len() - 1)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Model> {
        self.models.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.models.iter().map(|m| m.name.as_str())
    }

    /// Case-insensitive lookup by name
    pub fn find(&self, name: &str) -> Result<(usize, &Model)> {
        self.position(name)
            .map(|index| (index, &self.models[index]))
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.models
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name))
    }
}
