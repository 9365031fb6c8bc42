//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Koder records.
    ///
    /// `CHECK` constraints mirror the domain schema bounds on `name`, `age`
    /// and `sex`.
    koders (id) {
        /// Primary key: UUID v4 assigned by the service.
        id -> Uuid,
        /// 3 to 10 characters.
        name -> Varchar,
        /// 18 to 100.
        age -> Int4,
        generation -> Nullable<Varchar>,
        module -> Nullable<Varchar>,
        /// One of `f`, `m`, `o`.
        sex -> Nullable<Varchar>,
        /// Insertion timestamp; defines list order.
        created_at -> Timestamptz,
    }
}
