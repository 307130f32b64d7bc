use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error;

use crate::models::{NewUser, User};
use crate::schema::users;

pub fn create_user(conn: &mut PgConnection, new_user: &NewUser) -> Result<User, Error> {
    diesel::insert_into(users::table)
        .values(new_user)
        .returning(User::as_returning())
        .get_result(conn)
}

pub fn find_user(conn: &mut PgConnection, user_id: i32) -> Result<Option<User>, Error> {
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn find_user_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<User>, Error> {
    users::table
        .filter(users::email.eq(email))
        .select(User::as_select())
        .first(conn)
        .optional()
}

/// Refreshes `updated_at`; the column is never maintained by a trigger.
pub fn touch_user(conn: &mut PgConnection, user_id: i32) -> Result<User, Error> {
    diesel::update(users::table.find(user_id))
        .set(users::updated_at.eq(Utc::now()))
        .returning(User::as_returning())
        .get_result(conn)
}
