mod common;

use diesel::prelude::*;

#[test]
fn fresh_database_is_migrated_and_pooled() {
    let db = common::TestDb::new("fresh_pool.db");

    // Migrations ran: the identities table exists and starts empty.
    let mut conn = db.pool().get().expect("pooled connection");
    let total: i64 = idm_api::schema::identities::table
        .count()
        .get_result(&mut conn)
        .expect("identities table");
    assert_eq!(total, 0);

    // A second connection can be acquired while the first is held.
    assert!(db.pool().get().is_ok());
}
