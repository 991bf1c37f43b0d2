//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types.

use diesel::prelude::*;
use diesel::sql_types::{Int4, Text, Varchar};

use crate::domain::{CustomerId, CustomerView, PictureId, PictureRecord};

use super::schema::{pictures, users};

/// Insertable struct for new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a [u8],
}

/// Row struct for the credential lookup.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub id: i32,
    pub password_hash: Vec<u8>,
}

/// Row struct for the pictures table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pictures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PictureRow {
    pub id: i32,
    pub picture_path: String,
}

impl TryFrom<PictureRow> for PictureRecord {
    type Error = String;

    fn try_from(row: PictureRow) -> Result<Self, Self::Error> {
        let id = PictureId::new(row.id).map_err(|err| err.to_string())?;
        Ok(Self {
            id,
            picture_path: row.picture_path,
        })
    }
}

/// Joined customer projection returned by the raw view queries.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct CustomerViewRow {
    #[diesel(sql_type = Int4)]
    pub id: i32,
    #[diesel(sql_type = Varchar)]
    pub name: String,
    #[diesel(sql_type = Varchar)]
    pub surname: String,
    #[diesel(sql_type = Int4)]
    pub picture_id: i32,
    #[diesel(sql_type = Text)]
    pub picture_path: String,
    #[diesel(sql_type = Varchar)]
    pub created_by_user: String,
    #[diesel(sql_type = Varchar)]
    pub last_modified_by_user: String,
}

impl TryFrom<CustomerViewRow> for CustomerView {
    type Error = String;

    fn try_from(row: CustomerViewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(row.id).map_err(|err| err.to_string())?,
            name: row.name,
            surname: row.surname,
            picture_id: PictureId::new(row.picture_id).map_err(|err| err.to_string())?,
            picture_path: row.picture_path,
            created_by_user: row.created_by_user,
            last_modified_by_user: row.last_modified_by_user,
        })
    }
}
