/// User-adjustable viewer settings and fixed frame constants
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Near clip distance
pub const NEAR: f32 = 0.1;
/// Far clip distance
pub const FAR: f32 = 2000.0;
/// Initial camera distance along Z
pub const INITIAL_CAMERA_Z: f32 = 135.0;

/// A single adjustable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    FieldOfView,
    CameraX,
    CameraY,
    TranslationY,
    LightY,
    Shininess,
}

impl Setting {
    pub const ALL: [Setting; 6] = [
        Setting::FieldOfView,
        Setting::CameraX,
        Setting::CameraY,
        Setting::TranslationY,
        Setting::LightY,
        Setting::Shininess,
    ];

    /// Key used by the settings panel
    pub fn key(self) -> &'static str {
        match self {
            Setting::FieldOfView => "fieldOfView",
            Setting::CameraX => "cameraX",
            Setting::CameraY => "cameraY",
            Setting::TranslationY => "yTrans",
            Setting::LightY => "yLight",
            Setting::Shininess => "shininess",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Setting::FieldOfView => "Field of View",
            Setting::CameraX => "Camera X",
            Setting::CameraY => "Camera Y",
            Setting::TranslationY => "Translation Y",
            Setting::LightY => "Light Y",
            Setting::Shininess => "Shininess",
        }
    }

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            // 0 and 180 would make the projection degenerate
            Setting::FieldOfView => 1.0..=179.0,
            Setting::CameraX => -360.0..=360.0,
            Setting::CameraY => -200.0..=200.0,
            Setting::TranslationY => -60.0..=60.0,
            Setting::LightY => -60.0..=60.0,
            Setting::Shininess => 1.0..=300.0,
        }
    }
}

impl FromStr for Setting {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Setting::ALL
            .into_iter()
            .find(|s| s.key() == key)
            .ok_or_else(|| format!("unknown setting '{}'", key))
    }
}

/// Values controlled from the settings panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    pub camera_x: f32,
    pub camera_y: f32,
    pub y_translate: f32,
    pub light_y: f32,
    pub shininess: f32,
}

impl ViewerSettings {
    pub fn get(&self, setting: Setting) -> f32 {
        match setting {
            Setting::FieldOfView => self.field_of_view,
            Setting::CameraX => self.camera_x,
            Setting::CameraY => self.camera_y,
            Setting::TranslationY => self.y_translate,
            Setting::LightY => self.light_y,
            Setting::Shininess => self.shininess,
        }
    }

    /// Update a setting, clamping it into its range. Returns the stored value.
    pub fn set(&mut self, setting: Setting, value: f32) -> f32 {
        let range = setting.range();
        let value = if value.is_nan() {
            self.get(setting)
        } else {
            value.clamp(*range.start(), *range.end())
        };
        let slot = match setting {
            Setting::FieldOfView => &mut self.field_of_view,
            Setting::CameraX => &mut self.camera_x,
            Setting::CameraY => &mut self.camera_y,
            Setting::TranslationY => &mut self.y_translate,
            Setting::LightY => &mut self.light_y,
            Setting::Shininess => &mut self.shininess,
        };
        *slot = value;
        value
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            field_of_view: 25.0,
            camera_x: 0.0,
            camera_y: 40.0,
            y_translate: -5.0,
            light_y: 14.0,
            shininess: 150.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let settings = ViewerSettings::default();
        for setting in Setting::ALL {
            assert!(setting.range().contains(&settings.get(setting)), "{:?}", setting);
        }
    }

    #[test]
    fn test_set_clamps() {
        let mut settings = ViewerSettings::default();
        assert_eq!(settings.set(Setting::FieldOfView, 0.0), 1.0);
        assert_eq!(settings.set(Setting::Shininess, 1000.0), 300.0);
        assert_eq!(settings.set(Setting::CameraX, -12.5), -12.5);
        assert_eq!(settings.camera_x, -12.5);
        assert_eq!(settings.set(Setting::LightY, f32::NAN), 14.0);
    }

    #[test]
    fn test_keys_round_trip() {
        for setting in Setting::ALL {
            assert_eq!(setting.key().parse::<Setting>(), Ok(setting));
        }
        assert!("zoom".parse::<Setting>().is_err());
    }
}
