/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Command primary keys are generated UUIDs (v4).
pub type CommandId = uuid::Uuid;
