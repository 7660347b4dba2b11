use crate::database::structs::connection_tracker::ConnectionTracker;
use sqlx::{
    MySql,
    Pool
};

#[derive(Debug, Clone)]
pub struct DatabaseConnectorMySQL {
    pub(crate) pool: Pool<MySql>,
    pub(crate) tracker: ConnectionTracker,
}
