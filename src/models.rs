use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a drill. Completions hold one as a plain reference; nothing
/// checks that the drill it names exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrillId(String);

impl DrillId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DrillId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DrillId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    #[serde(rename = "_id")]
    pub id: DrillId,
    pub added: NaiveDateTime,
    pub name: String,
}

impl Drill {
    pub fn new(name: impl Into<String>, added: NaiveDateTime) -> Self {
        Self {
            id: DrillId::generate(),
            added,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub date: NaiveDateTime,
    pub drill: DrillId,
}

/// Both document collections, as held by the in-process backends.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DrillCollections {
    #[serde(default)]
    pub drills: Vec<Drill>,
    #[serde(default)]
    pub completions: Vec<Completion>,
}

/// First value submitted for `key`. Repeats of a key are ignored, matching
/// how browsers and most form libraries read a single-valued field.
pub fn first_param(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

#[derive(Debug, Default)]
pub struct HomeQuery {
    pub date: Option<String>,
}

impl HomeQuery {
    pub fn from_params(params: &[(String, String)]) -> Self {
        Self {
            date: first_param(params, "date"),
        }
    }
}

#[derive(Debug, Default)]
pub struct AddDrillForm {
    pub drill: Option<String>,
}

impl AddDrillForm {
    pub fn from_params(params: &[(String, String)]) -> Self {
        Self {
            drill: first_param(params, "drill"),
        }
    }
}

#[derive(Debug, Default)]
pub struct CompleteForm {
    pub date: Option<String>,
    pub drillid: Option<String>,
}

impl CompleteForm {
    pub fn from_params(params: &[(String, String)]) -> Self {
        Self {
            date: first_param(params, "date"),
            drillid: first_param(params, "drillid"),
        }
    }
}

#[derive(Debug)]
pub struct HomeView {
    pub title: &'static str,
    pub selected_date: NaiveDateTime,
    pub drills: Vec<Drill>,
    pub completions: Vec<DrillId>,
    pub date_range: Vec<NaiveDate>,
}

impl HomeView {
    pub fn is_completed(&self, id: &DrillId) -> bool {
        self.completions.contains(id)
    }
}

#[derive(Debug)]
pub struct AddDrillView {
    pub title: &'static str,
    pub selected_date: NaiveDateTime,
}
