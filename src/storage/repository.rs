//! Typed, per-user access to persisted progress state.
//!
//! Every document lives under `"{user_id}:{suffix}"`. A document that is
//! missing or fails to parse loads as its default value.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::gamification::types::{
    Achievement, BadgeState, Challenge, StreakState, UserContext,
};
use crate::storage::kv::{KeyValueStore, StoreError};
use crate::waste::WasteTally;

/// Kinds of per-user state documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    Badges,
    Streak,
    Challenges,
    Achievements,
    Tally,
}

impl StateKey {
    pub fn suffix(&self) -> &'static str {
        match self {
            StateKey::Badges => "badges",
            StateKey::Streak => "streak",
            StateKey::Challenges => "challenges",
            StateKey::Achievements => "achievements",
            StateKey::Tally => "tally",
        }
    }

    /// Full storage key for `user`.
    pub fn for_user(&self, user: &UserContext) -> String {
        format!("{}:{}", user.user_id, self.suffix())
    }
}

/// Repository over an injected key-value store.
#[derive(Clone)]
pub struct StateRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StateRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    async fn load<T>(&self, user: &UserContext, key: StateKey) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let storage_key = key.for_user(user);
        let Some(raw) = self.store.get(&storage_key).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    "Malformed {} state for {}, reinitializing: {}",
                    key.suffix(),
                    user.user_id,
                    e
                );
                Ok(T::default())
            }
        }
    }

    async fn save<T>(&self, user: &UserContext, key: StateKey, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.store.set(&key.for_user(user), json).await
    }

    pub async fn load_badges(&self, user: &UserContext) -> Result<BadgeState, StoreError> {
        self.load(user, StateKey::Badges).await
    }

    pub async fn save_badges(
        &self,
        user: &UserContext,
        badges: &BadgeState,
    ) -> Result<(), StoreError> {
        self.save(user, StateKey::Badges, badges).await
    }

    pub async fn load_streak(&self, user: &UserContext) -> Result<StreakState, StoreError> {
        self.load(user, StateKey::Streak).await
    }

    pub async fn save_streak(
        &self,
        user: &UserContext,
        streak: &StreakState,
    ) -> Result<(), StoreError> {
        self.save(user, StateKey::Streak, streak).await
    }

    pub async fn load_challenges(&self, user: &UserContext) -> Result<Vec<Challenge>, StoreError> {
        self.load(user, StateKey::Challenges).await
    }

    pub async fn save_challenges(
        &self,
        user: &UserContext,
        challenges: &[Challenge],
    ) -> Result<(), StoreError> {
        self.save(user, StateKey::Challenges, challenges).await
    }

    pub async fn load_achievements(
        &self,
        user: &UserContext,
    ) -> Result<Vec<Achievement>, StoreError> {
        self.load(user, StateKey::Achievements).await
    }

    pub async fn save_achievements(
        &self,
        user: &UserContext,
        achievements: &[Achievement],
    ) -> Result<(), StoreError> {
        self.save(user, StateKey::Achievements, achievements).await
    }

    pub async fn load_tally(&self, user: &UserContext) -> Result<WasteTally, StoreError> {
        self.load(user, StateKey::Tally).await
    }

    pub async fn save_tally(&self, user: &UserContext, tally: &WasteTally) -> Result<(), StoreError> {
        self.save(user, StateKey::Tally, tally).await
    }

    /// Remove every document belonging to `user`.
    pub async fn clear(&self, user: &UserContext) -> Result<(), StoreError> {
        for key in [
            StateKey::Badges,
            StateKey::Streak,
            StateKey::Challenges,
            StateKey::Achievements,
            StateKey::Tally,
        ] {
            self.store.remove(&key.for_user(user)).await?;
        }
        Ok(())
    }
}
