use std::sync::Arc;

use baython_core::model::{DEFAULT_DISPLAY_NAME, Profile, normalize_display_name};
use storage::keys;
use storage::repository::KeyValueStore;

use crate::persisted::{WriteOutcome, read_json, read_raw, write_json, write_raw};

/// Profile settings, each persisted under its own key.
#[derive(Clone)]
pub struct ProfileService {
    kv: Arc<dyn KeyValueStore>,
}

impl ProfileService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load every profile value, defaulting whatever is missing.
    pub async fn load(&self, system_dark: bool) -> Profile {
        let name = read_raw(self.kv.as_ref(), keys::PROFILE_NAME).await;
        let dark_mode = read_json::<bool>(self.kv.as_ref(), keys::DARK_MODE).await;
        let streak = read_json::<u32>(self.kv.as_ref(), keys::STREAK).await;
        Profile::from_persisted(name, dark_mode, streak, system_dark)
    }

    pub async fn display_name(&self) -> String {
        let stored = read_raw(self.kv.as_ref(), keys::PROFILE_NAME).await;
        normalize_display_name(stored).unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_owned())
    }

    /// Persist the name exactly as entered; blank names read back as the placeholder.
    pub async fn set_display_name(&self, name: &str) -> WriteOutcome {
        write_raw(self.kv.as_ref(), keys::PROFILE_NAME, name).await
    }

    /// Stored theme preference, or `system_dark` if none was ever saved.
    pub async fn dark_mode(&self, system_dark: bool) -> bool {
        read_json(self.kv.as_ref(), keys::DARK_MODE)
            .await
            .unwrap_or(system_dark)
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> WriteOutcome {
        write_json(self.kv.as_ref(), keys::DARK_MODE, &enabled).await
    }

    /// Flip the theme preference. Returns the new value.
    pub async fn toggle_dark_mode(&self, system_dark: bool) -> (bool, WriteOutcome) {
        let enabled = !self.dark_mode(system_dark).await;
        let write = self.set_dark_mode(enabled).await;
        (enabled, write)
    }

    /// Consecutive-day streak. Read-only: nothing in the app increments it.
    pub async fn streak(&self) -> u32 {
        read_json(self.kv.as_ref(), keys::STREAK)
            .await
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingStore;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn defaults_when_nothing_is_stored() {
        let service = ProfileService::new(Arc::new(InMemoryStore::new()));

        assert_eq!(service.display_name().await, DEFAULT_DISPLAY_NAME);
        assert!(service.dark_mode(true).await);
        assert!(!service.dark_mode(false).await);
        assert_eq!(service.streak().await, 0);
    }

    #[tokio::test]
    async fn name_round_trips() {
        let kv = Arc::new(InMemoryStore::new());
        let service = ProfileService::new(kv.clone());

        assert_eq!(service.set_display_name("سارة").await, WriteOutcome::Persisted);

        assert_eq!(service.display_name().await, "سارة");
        let raw = kv.get(keys::PROFILE_NAME).await.unwrap();
        assert_eq!(raw.as_deref(), Some("سارة"));
    }

    #[tokio::test]
    async fn dark_mode_is_stored_as_json_boolean() {
        let kv = Arc::new(InMemoryStore::new());
        let service = ProfileService::new(kv.clone());

        let (enabled, write) = service.toggle_dark_mode(false).await;

        assert!(enabled);
        assert_eq!(write, WriteOutcome::Persisted);
        assert_eq!(kv.get(keys::DARK_MODE).await.unwrap().as_deref(), Some("true"));
        // Stored preference wins over the system theme from now on.
        assert!(service.dark_mode(false).await);
    }

    #[tokio::test]
    async fn malformed_values_fall_back_to_defaults() {
        let kv = Arc::new(InMemoryStore::with_entries([
            (keys::DARK_MODE, "maybe"),
            (keys::STREAK, "-3"),
        ]));
        let service = ProfileService::new(kv);

        assert!(service.dark_mode(true).await);
        assert_eq!(service.streak().await, 0);
    }

    #[tokio::test]
    async fn streak_is_read_from_storage() {
        let kv = Arc::new(InMemoryStore::with_entries([(keys::STREAK, "6")]));
        let service = ProfileService::new(kv);

        let profile = service.load(false).await;
        assert_eq!(profile.streak(), 6);
        assert_eq!(profile.display_name(), DEFAULT_DISPLAY_NAME);
    }

    #[tokio::test]
    async fn write_failures_are_reported_not_raised() {
        let kv = Arc::new(FailingStore::read_only([]));
        let service = ProfileService::new(kv.clone());

        assert_eq!(service.set_display_name("x").await, WriteOutcome::Failed);
        let (enabled, write) = service.toggle_dark_mode(false).await;
        assert!(enabled);
        assert_eq!(write, WriteOutcome::Failed);
        assert_eq!(kv.attempted_writes(), 2);
    }

    #[tokio::test]
    async fn read_failures_use_defaults() {
        let service = ProfileService::new(Arc::new(FailingStore::broken()));
        let profile = service.load(true).await;
        assert_eq!(profile, Profile::from_persisted(None, None, None, true));
    }
}
