//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records.
    todos (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Task description.
        task -> Text,
        /// Status tag.
        #[max_length = 32]
        status -> Varchar,
        /// Priority.
        priority -> Int4,
        /// Revision counter for conditional writes.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
