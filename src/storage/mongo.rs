use super::DrillStore;
use crate::errors::StoreError;
use crate::models::{Completion, Drill, DrillId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DATABASE_NAME: &str = "DailyDrill";

#[derive(Debug, Serialize, Deserialize)]
struct DrillDocument {
    #[serde(rename = "_id")]
    id: String,
    added: BsonDateTime,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CompletionDocument {
    date: BsonDateTime,
    drill: String,
}

/// MongoDB backend. Midnight timestamps are stored as BSON dates with the
/// naive wall-clock value read as UTC.
pub struct MongoStore {
    drills: Collection<DrillDocument>,
    completions: Collection<CompletionDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(DATABASE_NAME);
        info!(database = DATABASE_NAME, "connected to mongodb");
        Ok(Self {
            drills: database.collection("drills"),
            completions: database.collection("completions"),
        })
    }
}

#[async_trait]
impl DrillStore for MongoStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn drills_added_through(&self, date: NaiveDateTime) -> Result<Vec<Drill>, StoreError> {
        let documents: Vec<DrillDocument> = self
            .drills
            .find(doc! { "added": { "$lte": to_bson(date) } })
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|document| {
                Ok(Drill {
                    id: DrillId::from(document.id),
                    added: from_bson(document.added)?,
                    name: document.name,
                })
            })
            .collect()
    }

    async fn insert_drill(&self, drill: &Drill) -> Result<(), StoreError> {
        let document = DrillDocument {
            id: drill.id.to_string(),
            added: to_bson(drill.added),
            name: drill.name.clone(),
        };
        self.drills.insert_one(document).await?;
        Ok(())
    }

    async fn completions_on(&self, date: NaiveDateTime) -> Result<Vec<Completion>, StoreError> {
        let documents: Vec<CompletionDocument> = self
            .completions
            .find(doc! { "date": to_bson(date) })
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|document| {
                Ok(Completion {
                    date: from_bson(document.date)?,
                    drill: DrillId::from(document.drill),
                })
            })
            .collect()
    }

    async fn insert_completion(&self, completion: &Completion) -> Result<(), StoreError> {
        let document = CompletionDocument {
            date: to_bson(completion.date),
            drill: completion.drill.to_string(),
        };
        self.completions.insert_one(document).await?;
        Ok(())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Driver(err.to_string())
    }
}

fn to_bson(value: NaiveDateTime) -> BsonDateTime {
    BsonDateTime::from_millis(value.and_utc().timestamp_millis())
}

fn from_bson(value: BsonDateTime) -> Result<NaiveDateTime, StoreError> {
    let millis = value.timestamp_millis();
    DateTime::from_timestamp_millis(millis)
        .map(|instant| instant.naive_utc())
        .ok_or(StoreError::InvalidTimestamp(millis))
}
