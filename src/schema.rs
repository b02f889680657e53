table! {
    beer (beer_id) {
        beer_id -> Int8,
        name -> Varchar,
        brewery -> Varchar,
        country -> Nullable<Varchar>,
        style -> Nullable<Varchar>,
        price -> Nullable<Float8>,
        volume -> Nullable<Float8>,
        abv -> Nullable<Float8>,
        selection -> Varchar,
        buyable -> Bool,
        status -> Varchar,
        launch_date -> Nullable<Date>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    login_session (id) {
        id -> Bpchar,
        person_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        expires_at -> Timestamptz,
    }
}

table! {
    person (id) {
        id -> Int4,
        name -> Varchar,
        is_admin -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    store (store_id) {
        store_id -> Varchar,
        name -> Varchar,
        address -> Nullable<Varchar>,
        zip_code -> Nullable<Varchar>,
        area -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    untappd (beer_id) {
        beer_id -> Int8,
        brewery -> Varchar,
        style -> Varchar,
        rating -> Nullable<Float8>,
        num_ratings -> Int4,
        last_updated -> Timestamptz,
    }
}

table! {
    untappd_mapping (beer_id) {
        beer_id -> Int8,
        untappd_id -> Int8,
        auto_match -> Bool,
        verified -> Bool,
        last_updated -> Timestamptz,
    }
}

table! {
    user_checkin (checkin_id) {
        checkin_id -> Int8,
        person_id -> Int4,
        beer_id -> Int8,
        rating -> Float8,
        checked_in_at -> Timestamptz,
    }
}

table! {
    user_wishlist (person_id, beer_id) {
        person_id -> Int4,
        beer_id -> Int8,
        added_at -> Timestamptz,
    }
}

joinable!(login_session -> person (person_id));
joinable!(untappd -> beer (beer_id));
joinable!(untappd_mapping -> beer (beer_id));
joinable!(user_checkin -> beer (beer_id));
joinable!(user_checkin -> person (person_id));
joinable!(user_wishlist -> beer (beer_id));
joinable!(user_wishlist -> person (person_id));

allow_tables_to_appear_in_same_query!(
    beer,
    login_session,
    person,
    store,
    untappd,
    untappd_mapping,
    user_checkin,
    user_wishlist,
);
