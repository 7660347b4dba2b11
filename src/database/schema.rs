use crate::database::enums::database_drivers::DatabaseDrivers;
use sqlx::mysql::MySqlDatabaseError;

const MYSQL_DUPLICATE_FIELD: u16 = 1060;
const MYSQL_TABLE_EXISTS: u16 = 1050;

/// Tables the embedded store starts with. The networked schema is provisioned
/// out-of-band and only receives the evolution statements.
pub const SQLITE_TABLES: &[(&str, &str)] = &[
    (
        "users",
        "CREATE TABLE IF NOT EXISTS `users` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, `username` TEXT NOT NULL UNIQUE, `password` TEXT NOT NULL)",
    ),
    (
        "clubs",
        "CREATE TABLE IF NOT EXISTS `clubs` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, `name` TEXT NOT NULL UNIQUE, `country` TEXT, `stadium` TEXT)",
    ),
    (
        "players",
        "CREATE TABLE IF NOT EXISTS `players` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, `name` TEXT NOT NULL, `club_id` INTEGER, `position` TEXT)",
    ),
    (
        "trainers",
        "CREATE TABLE IF NOT EXISTS `trainers` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, `name` TEXT NOT NULL, `club_id` INTEGER)",
    ),
    (
        "titles",
        "CREATE TABLE IF NOT EXISTS `titles` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, `club_id` INTEGER, `title` TEXT NOT NULL, `year` INTEGER)",
    ),
    (
        "players_by_club",
        "CREATE TABLE IF NOT EXISTS `players_by_club` (`club_id` INTEGER NOT NULL, `player_id` INTEGER NOT NULL, PRIMARY KEY (`club_id`, `player_id`))",
    ),
    (
        "trainers_per_club",
        "CREATE TABLE IF NOT EXISTS `trainers_per_club` (`trainer_id` INTEGER NOT NULL, `club_id` INTEGER NOT NULL, `start_year` INTEGER, PRIMARY KEY (`trainer_id`, `club_id`))",
    ),
    (
        "titles_per_club",
        "CREATE TABLE IF NOT EXISTS `titles_per_club` (`title_id` INTEGER NOT NULL, `club_id` INTEGER NOT NULL, `year` INTEGER NOT NULL, PRIMARY KEY (`title_id`, `club_id`, `year`))",
    ),
];

/// A nullable column added after the initial schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAddition {
    pub table: &'static str,
    pub column: &'static str,
    pub sqlite_type: &'static str,
    pub mysql_type: &'static str,
}

/// Additive only: nothing here ever drops or rewrites an existing column.
pub const COLUMN_ADDITIONS: &[ColumnAddition] = &[
    ColumnAddition { table: "clubs", column: "uuid", sqlite_type: "TEXT", mysql_type: "VARCHAR(36)" },
    ColumnAddition { table: "clubs", column: "competition_id", sqlite_type: "INTEGER", mysql_type: "INT" },
    ColumnAddition { table: "clubs", column: "competition_name", sqlite_type: "TEXT", mysql_type: "VARCHAR(255)" },
    ColumnAddition { table: "players", column: "firstname", sqlite_type: "TEXT", mysql_type: "VARCHAR(255)" },
    ColumnAddition { table: "trainers", column: "firstname", sqlite_type: "TEXT", mysql_type: "VARCHAR(255)" },
];

impl ColumnAddition {
    pub fn alter_statement(&self, engine: DatabaseDrivers) -> String {
        let column_type = match engine {
            DatabaseDrivers::sqlite3 => self.sqlite_type,
            DatabaseDrivers::mysql => self.mysql_type,
        };
        format!(
            "ALTER TABLE `{}` ADD COLUMN `{}` {}",
            self.table, self.column, column_type
        )
    }
}

/// True when a schema statement failed only because its target already
/// exists. Everything else must propagate.
pub fn is_ignorable_schema_error(engine: DatabaseDrivers, error: &sqlx::Error) -> bool {
    let Some(db_error) = error.as_database_error() else {
        return false;
    };
    match engine {
        DatabaseDrivers::sqlite3 => {
            let message = db_error.message().to_ascii_lowercase();
            message.contains("duplicate column name") || message.contains("already exists")
        }
        DatabaseDrivers::mysql => {
            if let Some(mysql_error) = db_error.try_downcast_ref::<MySqlDatabaseError>() {
                return matches!(mysql_error.number(), MYSQL_DUPLICATE_FIELD | MYSQL_TABLE_EXISTS);
            }
            matches!(db_error.code().as_deref(), Some("42S21") | Some("42S01"))
        }
    }
}
