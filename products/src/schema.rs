diesel::table! {
    products (id) {
        id -> Int4,
        name -> Text,
        description -> Nullable<Text>,
        price -> Float8,
    }
}
