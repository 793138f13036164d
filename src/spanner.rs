use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::client::{Client, ClientConfig, Error as ClientError};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert_or_update, update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use std::sync::Arc;

use crate::config::SpannerConfig;
use crate::models::Pet;
use crate::store::{PetStore, StoreError, StoreResult};

const PETS_TABLE: &str = "pets";
const PET_COLUMNS: [&str; 3] = ["id", "name", "age"];

/// Pet store backed by a Spanner table keyed by pet id
#[derive(Clone)]
pub struct SpannerPetStore {
    inner: Arc<Client>,
}

impl SpannerPetStore {
    /// Connect to Spanner, provisioning the instance, database and `pets`
    /// table first if they don't exist.
    ///
    /// `ClientConfig::default()` picks up `SPANNER_EMULATOR_HOST` on its own,
    /// so the same code path serves the emulator and production.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    async fn read_pet(&self, id: &str) -> Result<Option<Pet>> {
        let mut statement = Statement::new("SELECT id, name, age FROM pets WHERE id = @id");
        statement.add_param("id", &id.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query pet from Spanner")?;

        if let Some(row) = result_set.next().await? {
            tracing::debug!("Read pet with id: {}", id);
            Ok(Some(pet_from_row(&row)?))
        } else {
            tracing::debug!("Pet not found with id: {}", id);
            Ok(None)
        }
    }

    async fn read_all(&self) -> Result<Vec<Pet>> {
        let statement = Statement::new("SELECT id, name, age FROM pets ORDER BY id ASC");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction for scan")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to scan pets from Spanner")?;

        let mut pets = Vec::new();
        while let Some(row) = result_set.next().await? {
            pets.push(pet_from_row(&row)?);
        }

        tracing::debug!("Scanned {} pets", pets.len());
        Ok(pets)
    }

    async fn select_one(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

#[async_trait]
impl PetStore for SpannerPetStore {
    async fn put(&self, pet: &Pet) -> StoreResult<()> {
        let age = i64::from(pet.age);
        let mutation = insert_or_update(PETS_TABLE, &PET_COLUMNS, &[&pet.id, &pet.name, &age]);

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to upsert pet to Spanner")?;

        tracing::debug!("Upserted pet with id: {}", pet.id);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Pet>> {
        Ok(self.read_pet(id).await?)
    }

    async fn scan(&self) -> StoreResult<Vec<Pet>> {
        Ok(self.read_all().await?)
    }

    async fn put_if_exists(&self, pet: &Pet) -> StoreResult<()> {
        // An `update` mutation is rejected with NOT_FOUND when the row is gone.
        let age = i64::from(pet.age);
        let mutation = update(PETS_TABLE, &PET_COLUMNS, &[&pet.id, &pet.name, &age]);

        match self.inner.apply(vec![mutation]).await {
            Ok(_) => {
                tracing::debug!("Updated pet with id: {}", pet.id);
                Ok(())
            }
            Err(ClientError::GRPC(status)) if status.code() == Code::NotFound => {
                tracing::warn!("Conditional update found no pet with id: {}", pet.id);
                Err(StoreError::Missing(pet.id.clone()))
            }
            Err(e) => Err(anyhow::Error::from(e)
                .context("Failed to update pet in Spanner")
                .into()),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Pet>> {
        let Some(pet) = self.read_pet(id).await? else {
            return Ok(None);
        };

        let mutation = delete(PETS_TABLE, Key::new(&pet.id));
        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to delete pet from Spanner")?;

        tracing::debug!("Deleted pet with id: {}", id);
        Ok(Some(pet))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(self.select_one().await?)
    }
}

fn pet_from_row(row: &Row) -> Result<Pet> {
    let id: String = row.column_by_name("id")?;
    let name: String = row.column_by_name("name")?;
    let age: i64 = row.column_by_name("age")?;
    let age = i32::try_from(age)
        .with_context(|| format!("Stored age {} for pet {} is out of range", age, id))?;

    Ok(Pet { id, name, age })
}

/// Automatically provision Spanner instance, database, and table
///
/// This function checks if the configured resources exist and creates them if needed.
/// It's designed to enable zero-setup local development with the emulator.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let table_exists = ddl_response
        .into_inner()
        .statements
        .iter()
        .any(|stmt| stmt.contains("CREATE TABLE pets") || stmt.contains("CREATE TABLE `pets`"));

    if table_exists {
        tracing::info!("Table 'pets' already exists");
        return Ok(());
    }

    tracing::info!("Table 'pets' not found, creating...");

    let create_table_ddl = r#"
CREATE TABLE pets (
    id STRING(MAX) NOT NULL,
    name STRING(MAX) NOT NULL,
    age INT64 NOT NULL,
) PRIMARY KEY (id)
"#
    .trim()
    .to_string();

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![create_table_ddl],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table 'pets' created successfully");
    Ok(())
}
