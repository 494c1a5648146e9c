use serde::Deserialize;

/// Colors that change with the light/dark mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    pub text: u32,
    pub grid_center: u32,
    pub grid_lines: u32,
}

pub const LIGHT_PALETTE: Palette = Palette {
    background: 0xebebeb,
    text: 0x000000,
    grid_center: 0xb7b7b7,
    grid_lines: 0xcbcbcb,
};

pub const DARK_PALETTE: Palette = Palette {
    background: 0x2c2c2c,
    text: 0xffffff,
    grid_center: 0x474747,
    grid_lines: 0x474747,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Dark only when the platform reports a dark preference
    pub fn from_system(system: Option<winit::window::Theme>) -> Self {
        match system {
            Some(winit::window::Theme::Dark) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => LIGHT_PALETTE,
            Theme::Dark => DARK_PALETTE,
        }
    }

    /// Sun in light mode, moon in dark mode
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "☀",
            Theme::Dark => "🌙",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// What the user asked for on the command line or in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

/// Current mode plus whether it still tracks the platform setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    current: Theme,
    follow_system: bool,
}

impl ThemeState {
    pub fn new(preference: ThemePreference, system: Option<winit::window::Theme>) -> Self {
        match preference {
            ThemePreference::System => Self {
                current: Theme::from_system(system),
                follow_system: true,
            },
            ThemePreference::Light => Self {
                current: Theme::Light,
                follow_system: false,
            },
            ThemePreference::Dark => Self {
                current: Theme::Dark,
                follow_system: false,
            },
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn follows_system(&self) -> bool {
        self.follow_system
    }

    /// Flip the mode from the toggle button; returns the new mode
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.current
    }

    /// Platform theme changed. Returns the new mode if it changed.
    pub fn system_changed(&mut self, system: winit::window::Theme) -> Option<Theme> {
        if !self.follow_system {
            return None;
        }
        let next = Theme::from_system(Some(system));
        (next != self.current).then(|| {
            self.current = next;
            next
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::window::Theme as SystemTheme;

    #[test]
    fn test_from_system_defaults_to_light() {
        assert_eq!(Theme::from_system(None), Theme::Light);
        assert_eq!(Theme::from_system(Some(SystemTheme::Light)), Theme::Light);
        assert_eq!(Theme::from_system(Some(SystemTheme::Dark)), Theme::Dark);
    }

    #[test]
    fn test_icons_differ() {
        assert_ne!(Theme::Light.icon(), Theme::Dark.icon());
    }

    #[test]
    fn test_explicit_preference_ignores_system() {
        let mut state = ThemeState::new(ThemePreference::Light, Some(SystemTheme::Dark));
        assert_eq!(state.current(), Theme::Light);
        assert!(!state.follows_system());
        assert_eq!(state.system_changed(SystemTheme::Dark), None);
        assert_eq!(state.current(), Theme::Light);
    }

    #[test]
    fn test_system_preference_tracks_changes() {
        let mut state = ThemeState::new(ThemePreference::System, Some(SystemTheme::Light));
        assert_eq!(state.current(), Theme::Light);
        assert_eq!(state.system_changed(SystemTheme::Dark), Some(Theme::Dark));
        assert_eq!(state.system_changed(SystemTheme::Dark), None);
    }

    #[test]
    fn test_manual_toggle_then_system_change() {
        let mut state = ThemeState::new(ThemePreference::System, Some(SystemTheme::Dark));
        assert_eq!(state.toggle(), Theme::Light);
        // the platform flipping to light matches what the user already picked
        assert_eq!(state.system_changed(SystemTheme::Light), None);
        assert_eq!(state.system_changed(SystemTheme::Dark), Some(Theme::Dark));
    }
}
