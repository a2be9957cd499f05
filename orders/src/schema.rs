diesel::table! {
    orders (id) {
        id -> Int4,
        user_id -> Int4,
        product_id -> Int4,
        created_at -> Timestamptz,
    }
}
