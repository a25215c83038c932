//! Diesel schema for task persistence.

diesel::table! {
    /// Task records scoped by owner.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Non-empty task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Task lifecycle state.
        #[max_length = 32]
        state -> Varchar,
        /// Task priority.
        #[max_length = 16]
        priority -> Varchar,
        /// Optional category label.
        #[max_length = 64]
        category -> Nullable<Varchar>,
        /// Planned start date.
        scheduled_date -> Nullable<Date>,
        /// Planned start time.
        scheduled_time -> Nullable<Time>,
        /// Due date.
        due_date -> Nullable<Date>,
        /// Due time.
        due_time -> Nullable<Time>,
        /// Reminder offset in minutes before the due instant.
        reminder_minutes -> Nullable<Int4>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
