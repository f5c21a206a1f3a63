diesel::table! {
    products (id) {
        id -> Uuid,
        #[max_length = 200]
        name -> Varchar,
        price -> Numeric,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    product_sizes (id) {
        id -> Uuid,
        product_id -> Uuid,
        #[max_length = 10]
        label -> Varchar,
        quantity -> Int4,
        position -> Int4,
    }
}

diesel::table! {
    orders (id) {
        id -> Uuid,
        #[max_length = 100]
        user_id -> Varchar,
        total -> Numeric,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    order_items (id) {
        id -> Uuid,
        order_id -> Uuid,
        product_id -> Uuid,
        qty -> Int4,
        price -> Numeric,
        position -> Int4,
    }
}

diesel::joinable!(product_sizes -> products (product_id));
diesel::joinable!(order_items -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(products, product_sizes, orders, order_items,);
