//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    users (id) {
        id -> Int4,
        #[max_length = 64]
        username -> Varchar,
        password_hash -> Bytea,
    }
}

diesel::table! {
    pictures (id) {
        id -> Int4,
        picture_path -> Text,
    }
}

diesel::table! {
    customers (id) {
        id -> Int4,
        #[max_length = 32]
        name -> Varchar,
        #[max_length = 32]
        surname -> Varchar,
        picture_id -> Int4,
        created_by_user_id -> Int4,
        last_modified_by_user_id -> Int4,
    }
}

diesel::joinable!(customers -> pictures (picture_id));

diesel::allow_tables_to_appear_in_same_query!(customers, pictures, users);
