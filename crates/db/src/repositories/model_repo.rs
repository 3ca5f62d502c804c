//! Repository for the `models`, `model_bands`, and `classification_classes`
//! tables.

use driftnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::model::{
    ClassificationClass, CreateModel, Model, ModelQuery, ModelWithRelations,
};
use crate::models::satellite::Band;

const COLUMNS: &str = "id, model_id, model_url, version, expected_image_height, \
    expected_image_width, type, output_dtype, created_at";

const CLASS_COLUMNS: &str = "id, model_id, name, class_index";

/// Provides listing and transactional creation for models.
pub struct ModelRepo;

impl ModelRepo {
    /// List models with optional filters on external id, url, version, and
    /// type.
    pub async fn list(pool: &PgPool, params: &ModelQuery) -> Result<Vec<Model>, sqlx::Error> {
        // Build dynamic WHERE clauses, binding in declaration order.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.model_id.is_some() {
            conditions.push(format!("model_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.model_url.is_some() {
            conditions.push(format!("model_url = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.version.is_some() {
            conditions.push(format!("version = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.model_type.is_some() {
            conditions.push(format!("type = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM models {where_clause} ORDER BY id");

        let mut q = sqlx::query_as::<_, Model>(&query);
        if let Some(ref model_id) = params.model_id {
            q = q.bind(model_id);
        }
        if let Some(ref model_url) = params.model_url {
            q = q.bind(model_url);
        }
        if let Some(version) = params.version {
            q = q.bind(version);
        }
        if let Some(model_type) = params.model_type {
            q = q.bind(model_type);
        }

        q.fetch_all(pool).await
    }

    /// Check whether a model row exists by internal ID.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM models WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Check whether any model version exists for an external identifier.
    pub async fn exists_by_external_id(
        pool: &PgPool,
        model_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM models WHERE model_id = $1)")
            .bind(model_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a model with its band links and classification classes in one
    /// transaction. `bands` must already be resolved against the satellite.
    ///
    /// Classification class indices are assigned 1-based from the order of
    /// `input.classification_classes`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateModel,
        bands: &[Band],
    ) -> Result<ModelWithRelations, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_model = format!(
            "INSERT INTO models \
                (model_id, model_url, version, expected_image_height, \
                 expected_image_width, type, output_dtype) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let model = sqlx::query_as::<_, Model>(&insert_model)
            .bind(&input.model_id)
            .bind(&input.model_url)
            .bind(input.version)
            .bind(input.expected_image_height)
            .bind(input.expected_image_width)
            .bind(input.model_type)
            .bind(&input.output_dtype)
            .fetch_one(&mut *tx)
            .await?;

        for band in bands {
            sqlx::query("INSERT INTO model_bands (model_id, band_id) VALUES ($1, $2)")
                .bind(model.id)
                .bind(band.id)
                .execute(&mut *tx)
                .await?;
        }

        let insert_class = format!(
            "INSERT INTO classification_classes (model_id, name, class_index) \
             VALUES ($1, $2, $3) \
             RETURNING {CLASS_COLUMNS}"
        );
        let mut classes = Vec::with_capacity(input.classification_classes.len());
        for (position, name) in input.classification_classes.iter().enumerate() {
            let class = sqlx::query_as::<_, ClassificationClass>(&insert_class)
                .bind(model.id)
                .bind(name)
                .bind(position as i32 + 1)
                .fetch_one(&mut *tx)
                .await?;
            classes.push(class);
        }

        tx.commit().await?;
        Ok(ModelWithRelations {
            model,
            bands: bands.to_vec(),
            classification_classes: classes,
        })
    }
}
