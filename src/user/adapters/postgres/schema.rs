//! Diesel schema for user accounts.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 64]
        username -> Varchar,
        /// Opaque credential hash.
        credential_hash -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
