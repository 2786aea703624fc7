//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. The
//! `diesel print-schema` command regenerates them from a live database.

diesel::table! {
    /// Registered accounts. `email` is unique and stored normalised.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Varchar,
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// API tokens, at most one per user.
    auth_tokens (key) {
        key -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    events (id) {
        id -> Uuid,
        creator_id -> Uuid,
        name -> Varchar,
        description -> Text,
        date -> Date,
        start_event -> Time,
        end_event -> Time,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::joinable!(events -> users (creator_id));

diesel::allow_tables_to_appear_in_same_query!(users, auth_tokens, events);
