//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Registered schools.
    ///
    /// `email` and `refer_code` each carry a unique constraint
    /// (`schools_email_key`, `schools_refer_code_key`).
    schools (id) {
        id -> Uuid,
        name -> Varchar,
        affiliation_code -> Varchar,
        phone -> Varchar,
        /// Lowercased at registration.
        email -> Varchar,
        city -> Varchar,
        pin_code -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        refer_code -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered students, keyed to a school by refer code.
    students (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        class_label -> Varchar,
        phone -> Varchar,
        /// Refer code of the owning school; a lookup value, not a foreign key.
        school_refer_code -> Varchar,
        /// Either `pending` or `paid`.
        payment_status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(schools, students);
