//! Firestore REST backend
//!
//! Talks to the Firestore v1 REST API over blocking HTTP. Documents carry
//! `subject`, `details`, `status` and `by_who` string fields plus a
//! server-stamped `timestamp`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::record::{Announcement, NewAnnouncement};
use crate::store::AnnouncementStore;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const TIMESTAMP_FIELD: &str = "timestamp";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    string_value: Option<String>,
    timestamp_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
    create_time: Option<String>,
}

/// One element of a runQuery response stream
#[derive(Debug, Deserialize)]
struct QueryItem {
    document: Option<Document>,
}

impl Document {
    fn string_field(&self, key: &str, fallback: &str) -> String {
        self.fields
            .get(key)
            .and_then(|v| v.string_value.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    fn into_announcement(self) -> Result<Announcement, StoreError> {
        let raw_time = self
            .fields
            .get(TIMESTAMP_FIELD)
            .and_then(|v| v.timestamp_value.as_deref())
            .or(self.create_time.as_deref())
            .ok_or_else(|| {
                StoreError::InvalidResponse(format!("document {} has no timestamp", self.name))
            })?;
        let timestamp = parse_timestamp(raw_time)?;

        let id = self
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(Announcement {
            subject: self.string_field("subject", "No subject"),
            details: self.string_field("details", "No details"),
            status: self.string_field("status", "INFO"),
            by_who: self.string_field("by_who", "Unknown"),
            timestamp,
            id,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidResponse(format!("bad timestamp {raw:?}: {e}")))
}

fn map_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(status, response) => StoreError::Status {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => StoreError::Request(transport.to_string()),
    }
}

/// Document ids are a single path segment
fn check_document_id(id: &str) -> Result<(), StoreError> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '?', '#']) {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Convert a runQuery response into announcements, skipping malformed documents
fn parse_query_response(items: Vec<QueryItem>) -> Vec<Announcement> {
    items
        .into_iter()
        .filter_map(|item| item.document)
        .filter_map(|doc| match doc.into_announcement() {
            Ok(announcement) => Some(announcement),
            Err(e) => {
                warn!("Skipping announcement: {}", e);
                None
            }
        })
        .collect()
}

/// Announcement store backed by a Firestore collection
pub struct FirestoreStore {
    agent: ureq::Agent,
    project_id: String,
    collection: String,
    api_token: Option<String>,
    id_counter: AtomicU32,
}

impl FirestoreStore {
    pub fn new(
        project_id: impl Into<String>,
        collection: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            project_id: project_id.into(),
            collection: collection.into(),
            api_token,
            id_counter: AtomicU32::new(0),
        }
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.project_id)
    }

    fn document_name(&self, id: &str) -> String {
        format!("{}/documents/{}/{}", self.database_path(), self.collection, id)
    }

    fn next_id(&self) -> String {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let counter = self.id_counter.fetch_add(1, Ordering::Relaxed) & 0xffff;
        format!("{:016x}{:04x}", nanos, counter)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.api_token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    fn commit_body(&self, id: &str, announcement: &NewAnnouncement) -> Value {
        json!({
            "writes": [{
                "update": {
                    "name": self.document_name(id),
                    "fields": {
                        "subject": { "stringValue": announcement.subject() },
                        "details": { "stringValue": announcement.details() },
                        "status": { "stringValue": announcement.status().as_str() },
                        "by_who": { "stringValue": announcement.by_who() },
                    }
                },
                "updateTransforms": [{
                    "fieldPath": TIMESTAMP_FIELD,
                    "setToServerValue": "REQUEST_TIME"
                }],
                "currentDocument": { "exists": false }
            }]
        })
    }

    fn query_body(&self) -> Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "orderBy": [{
                    "field": { "fieldPath": TIMESTAMP_FIELD },
                    "direction": "DESCENDING"
                }]
            }
        })
    }
}

impl AnnouncementStore for FirestoreStore {
    fn name(&self) -> &str {
        "firestore"
    }

    fn create(&self, announcement: &NewAnnouncement) -> Result<String, StoreError> {
        let id = self.next_id();
        let url = format!("{}/{}/documents:commit", FIRESTORE_BASE_URL, self.database_path());

        self.authorize(self.agent.post(&url))
            .send_json(self.commit_body(&id, announcement))
            .map_err(map_error)?;

        info!("Posted announcement {} ({})", id, announcement.subject());
        Ok(id)
    }

    fn list(&self) -> Result<Vec<Announcement>, StoreError> {
        let url = format!("{}/{}/documents:runQuery", FIRESTORE_BASE_URL, self.database_path());

        let items: Vec<QueryItem> = self
            .authorize(self.agent.post(&url))
            .send_json(self.query_body())
            .map_err(map_error)?
            .into_json()
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        let announcements = parse_query_response(items);
        debug!("Fetched {} announcements", announcements.len());
        Ok(announcements)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        check_document_id(id)?;
        let url = format!(
            "{}/{}?currentDocument.exists=true",
            FIRESTORE_BASE_URL,
            self.document_name(id)
        );

        match self.authorize(self.agent.delete(&url)).call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(404, _)) => Err(StoreError::NotFound(id.to_string())),
            Err(e) => Err(map_error(e)),
        }
    }
}
