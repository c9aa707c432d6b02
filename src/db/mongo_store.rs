use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::{Client, Database};
use serde::Deserialize;

use footstats_core::{DocumentStore, Principal, ReferenceDocument, StoreError, UserInfo};

/// Server code for "User already exists".
const USER_ALREADY_EXISTS: i32 = 51003;
/// Server code for a missing namespace (older servers on `drop`).
const NAMESPACE_NOT_FOUND: i32 = 26;
const UNAUTHORIZED: i32 = 13;
const AUTHENTICATION_FAILED: i32 = 18;

/// [`DocumentStore`] backed by a MongoDB deployment.
pub struct MongoStore {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UsersInfoReply {
    #[serde(default)]
    users: Vec<UserInfo>,
}

impl MongoStore {
    /// Build a client from a connection string. No I/O happens until the
    /// first command; call [`DocumentStore::ping`] to check the server.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await.map_err(store_error)?;
        Ok(Self { client })
    }

    fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    async fn users_info(&self, database: &str, filter: Bson) -> Result<Vec<UserInfo>, StoreError> {
        let reply = self
            .database(database)
            .run_command(doc! { "usersInfo": filter })
            .await
            .map_err(store_error)?;
        let reply: UsersInfoReply = mongodb::bson::from_document(reply)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        Ok(reply.users)
    }
}

impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let reply = self
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(store_error)?;

        if ok_value(&reply) != 1 {
            return Err(StoreError::Connection(format!(
                "unexpected ping reply: {}",
                reply
            )));
        }
        tracing::info!("Connected to database cluster");
        Ok(())
    }

    async fn find_user(
        &self,
        database: &str,
        name: &str,
    ) -> Result<Option<UserInfo>, StoreError> {
        let users = self
            .users_info(database, Bson::Document(doc! { "user": name, "db": database }))
            .await?;
        Ok(users.into_iter().find(|u| u.name == name))
    }

    async fn list_users(&self, database: &str) -> Result<Vec<UserInfo>, StoreError> {
        let mut users = self.users_info(database, Bson::Int32(1)).await?;
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn create_user(&self, database: &str, principal: &Principal) -> Result<(), StoreError> {
        let roles: Vec<Document> = principal
            .roles
            .iter()
            .map(|r| doc! { "role": &r.role, "db": &r.database })
            .collect();

        self.database(database)
            .run_command(doc! {
                "createUser": &principal.name,
                "pwd": &principal.secret,
                "roles": roles,
            })
            .await
            .map_err(|e| create_user_error(e, &principal.name, database))?;
        Ok(())
    }

    async fn drop_collection(&self, database: &str, collection: &str) -> Result<(), StoreError> {
        match self
            .database(database)
            .collection::<Document>(collection)
            .drop()
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if command_code(&e) == Some(NAMESPACE_NOT_FOUND) => Ok(()),
            Err(e) => Err(store_error(e)),
        }
    }

    async fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: &[ReferenceDocument],
    ) -> Result<Vec<String>, StoreError> {
        let result = self
            .database(database)
            .collection::<ReferenceDocument>(collection)
            .insert_many(documents)
            .await
            .map_err(store_error)?;

        let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        ids.sort_by_key(|(index, _)| *index);
        Ok(ids
            .into_iter()
            .map(|(_, id)| match id {
                Bson::ObjectId(oid) => oid.to_hex(),
                other => other.to_string(),
            })
            .collect())
    }

    async fn find_all(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<ReferenceDocument>, StoreError> {
        let cursor = self
            .database(database)
            .collection::<ReferenceDocument>(collection)
            .find(doc! {})
            .await
            .map_err(store_error)?;
        cursor.try_collect().await.map_err(store_error)
    }
}

/// `ok` as an integer; servers send it as a double or an int.
fn ok_value(reply: &Document) -> i64 {
    match reply.get("ok") {
        Some(Bson::Double(v)) => *v as i64,
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        _ => 0,
    }
}

fn command_code(e: &MongoError) -> Option<i32> {
    match e.kind.as_ref() {
        ErrorKind::Command(command) => Some(command.code),
        _ => None,
    }
}

/// `createUser` failures: a taken name is a duplicate principal.
fn create_user_error(e: MongoError, name: &str, database: &str) -> StoreError {
    match command_code(&e) {
        Some(USER_ALREADY_EXISTS) => StoreError::DuplicatePrincipal {
            name: name.to_string(),
            database: database.to_string(),
        },
        _ => store_error(e),
    }
}

/// Map a driver error onto the store taxonomy.
fn store_error(e: MongoError) -> StoreError {
    match e.kind.as_ref() {
        ErrorKind::Command(command) => match command.code {
            UNAUTHORIZED | AUTHENTICATION_FAILED => {
                StoreError::Unauthorized(command.message.clone())
            }
            code => StoreError::Command {
                code: Some(code),
                message: command.message.clone(),
            },
        },
        ErrorKind::Authentication { message, .. } => StoreError::Unauthorized(message.clone()),
        ErrorKind::ServerSelection { message, .. } => StoreError::Connection(message.clone()),
        ErrorKind::Io(_) => StoreError::Connection(e.to_string()),
        ErrorKind::InvalidArgument { message, .. } => StoreError::Connection(message.clone()),
        ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
            StoreError::InvalidDocument(e.to_string())
        }
        ErrorKind::InsertMany(_) => StoreError::InvalidDocument(e.to_string()),
        _ => StoreError::Command {
            code: None,
            message: e.to_string(),
        },
    }
}
