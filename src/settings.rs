//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0). No key binding; edit the stored JSON.
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,

    // === Visuals ===
    /// Draw each tower's range ring
    pub show_range_rings: bool,
    /// Draw the ghost tower under the cursor when placement is possible
    pub show_placement_preview: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            show_range_rings: true,
            show_placement_preview: true,

            show_fps: false,
        }
    }
}

impl Settings {
    /// Volume step for the `[` / `]` keys
    pub const VOLUME_STEP: f32 = 0.1;

    /// Nudge the master volume, staying within 0-1
    pub fn adjust_master_volume(&mut self, delta: f32) {
        self.master_volume = (self.master_volume + delta).clamp(0.0, 1.0);
    }

    /// Volume actually applied to sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tower_defense_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume_respects_mute() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_master_volume_steps_are_clamped() {
        let mut settings = Settings::default();
        for _ in 0..5 {
            settings.adjust_master_volume(Settings::VOLUME_STEP);
        }
        assert_eq!(settings.master_volume, 1.0);
        for _ in 0..15 {
            settings.adjust_master_volume(-Settings::VOLUME_STEP);
        }
        assert_eq!(settings.master_volume, 0.0);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_old_settings_json_fills_new_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert!(settings.show_range_rings);
        assert_eq!(settings.master_volume, 0.8);
    }
}
