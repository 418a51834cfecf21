/// Placeholder shown until the learner picks a name.
pub const DEFAULT_DISPLAY_NAME: &str = "متعلم بايثون";

/// Learner profile assembled from independently persisted keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    display_name: String,
    dark_mode: bool,
    streak: u32,
}

impl Profile {
    /// Rebuild a profile from whatever was found in storage.
    ///
    /// Missing values fall back to their defaults: the placeholder name,
    /// `system_dark` for the theme, and a zero streak.
    #[must_use]
    pub fn from_persisted(
        display_name: Option<String>,
        dark_mode: Option<bool>,
        streak: Option<u32>,
        system_dark: bool,
    ) -> Self {
        Self {
            display_name: normalize_display_name(display_name)
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_owned()),
            dark_mode: dark_mode.unwrap_or(system_dark),
            streak: streak.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Consecutive active days. Nothing increments this yet.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::from_persisted(None, None, None, false)
    }
}

/// Trim a stored name; blank names count as missing.
#[must_use]
pub fn normalize_display_name(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_stored() {
        let profile = Profile::from_persisted(None, None, None, true);
        assert_eq!(profile.display_name(), DEFAULT_DISPLAY_NAME);
        assert!(profile.dark_mode());
        assert_eq!(profile.streak(), 0);
    }

    #[test]
    fn blank_name_falls_back_to_placeholder() {
        let profile = Profile::from_persisted(Some("   ".into()), Some(false), Some(3), true);
        assert_eq!(profile.display_name(), DEFAULT_DISPLAY_NAME);
        assert!(!profile.dark_mode());
        assert_eq!(profile.streak(), 3);
    }

    #[test]
    fn stored_name_is_trimmed() {
        let profile = Profile::from_persisted(Some("  سارة ".into()), None, None, false);
        assert_eq!(profile.display_name(), "سارة");
    }
}
