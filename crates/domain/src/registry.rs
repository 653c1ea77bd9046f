//! Registry — the fixed, ordered set of greenhouses plus the active-timer
//! pointer.
//!
//! The key set is decided at startup (from configuration) and never changes
//! at runtime. Persisted state is merged into a freshly built registry key by
//! key, so a changed configuration only drops state for keys that no longer
//! exist.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::NotFoundError;
use crate::greenhouse::Greenhouse;
use crate::id::GreenhouseKey;

/// The fixed set of greenhouses, in configured order, and the at-most-one
/// key currently being counted down.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    keys: Vec<GreenhouseKey>,
    greenhouses: HashMap<GreenhouseKey, Greenhouse>,
    active: Option<GreenhouseKey>,
}

impl Registry {
    /// Build a registry of idle greenhouses from `(key, label)` pairs,
    /// preserving their order.
    #[must_use]
    pub fn new(plots: impl IntoIterator<Item = (GreenhouseKey, String)>) -> Self {
        let mut keys = Vec::new();
        let mut greenhouses = HashMap::new();
        for (key, label) in plots {
            keys.push(key.clone());
            greenhouses.insert(key, Greenhouse::idle(label));
        }
        Self {
            keys,
            greenhouses,
            active: None,
        }
    }

    /// The configured keys, in insertion order.
    #[must_use]
    pub fn keys(&self) -> &[GreenhouseKey] {
        &self.keys
    }

    /// The key currently being counted down, if any.
    #[must_use]
    pub fn active(&self) -> Option<&GreenhouseKey> {
        self.active.as_ref()
    }

    /// Point the active timer at `key`, or clear it with `None`.
    pub fn set_active(&mut self, key: Option<GreenhouseKey>) {
        self.active = key;
    }

    /// Look up a greenhouse by key.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for keys outside the configured set.
    pub fn get(&self, key: &GreenhouseKey) -> Result<&Greenhouse, NotFoundError> {
        self.greenhouses.get(key).ok_or_else(|| NotFoundError {
            entity: "Greenhouse",
            key: key.to_string(),
        })
    }

    /// Replace a greenhouse's state wholesale (single atomic slot write).
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for keys outside the configured set.
    pub fn replace(
        &mut self,
        key: &GreenhouseKey,
        greenhouse: Greenhouse,
    ) -> Result<(), NotFoundError> {
        match self.greenhouses.get_mut(key) {
            Some(slot) => {
                *slot = greenhouse;
                Ok(())
            }
            None => Err(NotFoundError {
                entity: "Greenhouse",
                key: key.to_string(),
            }),
        }
    }

    /// Iterate `(key, greenhouse)` pairs in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (&GreenhouseKey, &Greenhouse)> {
        self.keys.iter().map(|key| (key, &self.greenhouses[key]))
    }

    /// Merge a persisted snapshot into this registry.
    ///
    /// Per-key state is applied only for keys in the configured set, and only
    /// when the countdown fields are mutually consistent; anything else is
    /// ignored and the slot stays at its default. The active pointer is
    /// restored only when it names a configured key whose restored state is
    /// actually mid-run.
    pub fn restore(&mut self, persisted: PersistedState) {
        for (key, greenhouse) in persisted.greenhouses {
            if !greenhouse.countdown_consistent() {
                continue;
            }
            if let Some(slot) = self.greenhouses.get_mut(&key) {
                let label = slot.label.clone();
                *slot = Greenhouse { label, ..greenhouse };
            }
        }
        let active = persisted
            .active_timer
            .filter(|key| self.get(key).is_ok_and(|g| g.current_time.is_some()));
        self.active = active;
    }

    /// Produce the serializable snapshot persisted by the storage bridge.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            active_timer: self.active.clone(),
            greenhouses: self.greenhouses.clone(),
        }
    }

    /// Produce the ordered read-only view handed to presentation adapters.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            active_timer: self.active.clone(),
            greenhouses: self
                .iter()
                .map(|(key, g)| GreenhouseView::of(key, g))
                .collect(),
        }
    }

    /// Read-only view of a single greenhouse.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for keys outside the configured set.
    pub fn view(&self, key: &GreenhouseKey) -> Result<GreenhouseView, NotFoundError> {
        self.get(key).map(|g| GreenhouseView::of(key, g))
    }
}

/// The durable on-disk shape of the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Key of the greenhouse being counted down, if any.
    pub active_timer: Option<GreenhouseKey>,
    /// Per-key timer state.
    pub greenhouses: HashMap<GreenhouseKey, Greenhouse>,
}

/// Ordered, read-only registry view for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    pub active_timer: Option<GreenhouseKey>,
    pub greenhouses: Vec<GreenhouseView>,
}

/// One greenhouse as exposed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenhouseView {
    pub key: GreenhouseKey,
    pub label: String,
    pub last_run: Option<crate::time::Timestamp>,
    pub current_time: Option<u32>,
    pub target_time: Option<crate::time::Timestamp>,
}

impl GreenhouseView {
    fn of(key: &GreenhouseKey, greenhouse: &Greenhouse) -> Self {
        Self {
            key: key.clone(),
            label: greenhouse.label.clone(),
            last_run: greenhouse.last_run,
            current_time: greenhouse.current_time,
            target_time: greenhouse.target_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::WateringDuration;
    use crate::time::now;

    fn registry() -> Registry {
        Registry::new((0..3).map(|i| (GreenhouseKey::new(format!("solar{i}")), format!("Solar {}", i + 1))))
    }

    #[test]
    fn should_keep_configured_key_order() {
        let registry = registry();
        let keys: Vec<&str> = registry.keys().iter().map(GreenhouseKey::as_str).collect();
        assert_eq!(keys, ["solar0", "solar1", "solar2"]);
    }

    #[test]
    fn should_return_not_found_for_unknown_key() {
        let registry = registry();
        let result = registry.get(&GreenhouseKey::new("solar99"));
        assert!(result.is_err());
    }

    #[test]
    fn should_replace_state_for_known_key() {
        let mut registry = registry();
        let key = GreenhouseKey::new("solar1");
        let mut g = registry.get(&key).unwrap().clone();
        g.begin(now(), WateringDuration::M5);
        registry.replace(&key, g).unwrap();

        assert_eq!(registry.get(&key).unwrap().current_time, Some(300));
    }

    #[test]
    fn should_roundtrip_through_persisted_state() {
        let mut registry = registry();
        let key = GreenhouseKey::new("solar0");
        let mut g = registry.get(&key).unwrap().clone();
        g.begin(now(), WateringDuration::M10);
        registry.replace(&key, g).unwrap();
        registry.set_active(Some(key.clone()));

        let persisted = registry.to_persisted();
        let json = serde_json::to_string(&persisted).unwrap();
        let reloaded: PersistedState = serde_json::from_str(&json).unwrap();

        let mut fresh = Registry::new([
            (GreenhouseKey::new("solar0"), "Solar 1".to_string()),
            (GreenhouseKey::new("solar1"), "Solar 2".to_string()),
            (GreenhouseKey::new("solar2"), "Solar 3".to_string()),
        ]);
        fresh.restore(reloaded);

        assert_eq!(fresh, registry);
    }

    #[test]
    fn should_drop_persisted_state_for_unknown_keys() {
        let mut registry = registry();
        let mut stray = Greenhouse::idle("Ghost");
        stray.begin(now(), WateringDuration::M5);
        let persisted = PersistedState {
            active_timer: Some(GreenhouseKey::new("ghost0")),
            greenhouses: [(GreenhouseKey::new("ghost0"), stray)].into_iter().collect(),
        };
        registry.restore(persisted);

        assert!(registry.active().is_none());
        assert!(registry.get(&GreenhouseKey::new("ghost0")).is_err());
    }

    #[test]
    fn should_ignore_inconsistent_countdown_fields_on_restore() {
        let mut registry = registry();
        let key = GreenhouseKey::new("solar0");
        let broken = Greenhouse {
            label: "Solar 1".to_string(),
            last_run: None,
            current_time: Some(120),
            target_time: None,
        };
        let persisted = PersistedState {
            active_timer: Some(key.clone()),
            greenhouses: [(key.clone(), broken)].into_iter().collect(),
        };
        registry.restore(persisted);

        assert!(registry.get(&key).unwrap().is_idle());
        assert!(registry.active().is_none());
    }

    #[test]
    fn should_keep_configured_label_over_persisted_label() {
        let mut registry = registry();
        let key = GreenhouseKey::new("solar2");
        let persisted = PersistedState {
            active_timer: None,
            greenhouses: [(key.clone(), Greenhouse::idle("Renamed"))]
                .into_iter()
                .collect(),
        };
        registry.restore(persisted);

        assert_eq!(registry.get(&key).unwrap().label, "Solar 3");
    }
}
