/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The geographic coordinate reference system used throughout: WGS84.
pub const STANDARD_SRID: i32 = 4326;
