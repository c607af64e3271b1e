use sqlx::{Executor, FromRow, Sqlite};
use shared::{AdminRecord, Direction, Reputation, VoteRecord};
use crate::error::{DirectoryError, DirectoryResult};

pub const ADMINS_TABLE: &str = "adminslist";
pub const VOTES_TABLE: &str = "adminslist_users";

#[derive(Debug, FromRow)]
struct AdminRow {
    auth: String,
    contact: Option<String>,
    likes: i64,
    dislikes: i64,
}

impl TryFrom<AdminRow> for AdminRecord {
    type Error = DirectoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let counter = |value: i64, name: &str| {
            u64::try_from(value).map_err(|_| {
                DirectoryError::CorruptRecord(row.auth.clone(), format!("{name} = {value}"))
            })
        };
        let likes = counter(row.likes, "likes")?;
        let dislikes = counter(row.dislikes, "dislikes")?;
        Ok(AdminRecord {
            auth: row.auth,
            contact: row.contact,
            likes,
            dislikes,
        })
    }
}

pub struct Queries;

impl Queries {
    pub async fn table_exists<'e, E>(executor: E, table: &str) -> DirectoryResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?"
        )
        .bind(table)
        .fetch_one(executor)
        .await?;
        Ok(count > 0)
    }

    pub async fn fetch_all_admins<'e, E>(executor: E) -> DirectoryResult<Vec<AdminRecord>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, AdminRow>(
            "SELECT auth, contact, likes, dislikes FROM adminslist"
        )
        .fetch_all(executor)
        .await?
        .into_iter()
        .map(AdminRecord::try_from)
        .collect()
    }

    pub async fn fetch_admin<'e, E>(executor: E, auth: &str) -> DirectoryResult<Option<AdminRecord>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, AdminRow>(
            "SELECT auth, contact, likes, dislikes FROM adminslist WHERE auth = ?"
        )
        .bind(auth)
        .fetch_optional(executor)
        .await?
        .map(AdminRecord::try_from)
        .transpose()
    }

    pub async fn admin_exists<'e, E>(executor: E, auth: &str) -> DirectoryResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM adminslist WHERE auth = ?")
            .bind(auth)
            .fetch_one(executor)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert_admin<'e, E>(executor: E, auth: &str) -> DirectoryResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO adminslist (auth, contact, likes, dislikes) VALUES (?, NULL, 0, 0)"
        )
        .bind(auth)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn update_contact<'e, E>(executor: E, auth: &str, contact: &str) -> DirectoryResult<u64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE adminslist SET contact = ? WHERE auth = ?")
            .bind(contact)
            .bind(auth)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn fetch_vote_direction<'e, E>(
        executor: E,
        voter: &str,
        admin: &str,
    ) -> DirectoryResult<Option<Direction>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let flag: Option<i64> = sqlx::query_scalar(
            r#"SELECT direction FROM adminslist_users WHERE "user" = ? AND admin = ?"#
        )
        .bind(voter)
        .bind(admin)
        .fetch_optional(executor)
        .await?;

        flag.map(|flag| {
            Direction::from_flag(flag).ok_or_else(|| {
                DirectoryError::CorruptRecord(admin.to_string(), format!("vote direction = {flag}"))
            })
        })
        .transpose()
    }

    /// Writes both counters of `auth`. Returns the number of admin rows touched.
    pub async fn set_counters<'e, E>(executor: E, auth: &str, reputation: Reputation) -> DirectoryResult<u64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let column = |value: u64, name: &str| {
            i64::try_from(value).map_err(|_| {
                DirectoryError::CorruptRecord(auth.to_string(), format!("{name} = {value} overflows storage"))
            })
        };
        let likes = column(reputation.likes, "likes")?;
        let dislikes = column(reputation.dislikes, "dislikes")?;

        let result = sqlx::query("UPDATE adminslist SET likes = ?, dislikes = ? WHERE auth = ?")
            .bind(likes)
            .bind(dislikes)
            .bind(auth)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Inserts the vote, or overwrites the direction of the existing (voter, admin) row.
    pub async fn upsert_vote<'e, E>(executor: E, vote: &VoteRecord) -> DirectoryResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"INSERT INTO adminslist_users ("user", admin, direction)
               VALUES (?, ?, ?)
               ON CONFLICT ("user", admin) DO UPDATE SET direction = excluded.direction"#
        )
        .bind(&vote.voter)
        .bind(&vote.admin)
        .bind(vote.direction.as_flag())
        .execute(executor)
        .await?;
        Ok(())
    }
}
