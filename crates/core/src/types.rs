/// Template primary keys are UUIDs assigned by the store.
pub type TemplateId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
