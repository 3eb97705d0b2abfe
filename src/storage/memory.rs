use super::DrillStore;
use crate::errors::StoreError;
use crate::models::{Completion, Drill, DrillCollections};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

/// Keeps both collections in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<DrillCollections>,
}

impl MemoryStore {
    pub async fn snapshot(&self) -> DrillCollections {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl DrillStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn drills_added_through(&self, date: NaiveDateTime) -> Result<Vec<Drill>, StoreError> {
        Ok(drills_added_through(&*self.data.read().await, date))
    }

    async fn insert_drill(&self, drill: &Drill) -> Result<(), StoreError> {
        self.data.write().await.drills.push(drill.clone());
        Ok(())
    }

    async fn completions_on(&self, date: NaiveDateTime) -> Result<Vec<Completion>, StoreError> {
        Ok(completions_on(&*self.data.read().await, date))
    }

    async fn insert_completion(&self, completion: &Completion) -> Result<(), StoreError> {
        self.data.write().await.completions.push(completion.clone());
        Ok(())
    }
}

pub(super) fn drills_added_through(data: &DrillCollections, date: NaiveDateTime) -> Vec<Drill> {
    data.drills
        .iter()
        .filter(|drill| drill.added <= date)
        .cloned()
        .collect()
}

pub(super) fn completions_on(data: &DrillCollections, date: NaiveDateTime) -> Vec<Completion> {
    data.completions
        .iter()
        .filter(|completion| completion.date == date)
        .cloned()
        .collect()
}
